//! Headless simulator (default binary).
//!
//! Runs a greedy autoplayer against the engine at a fixed frame rate, with no
//! window and no terminal UI, and prints the outcome.
//!
//! Usage: `ebitris-sim [--seed N] [--width W] [--height H] [--frames N] [--json]`

use anyhow::Result;

use ebitris::sim::{parse_sim_args, run};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_sim_args(&args)?;

    let report = run(&config);
    let snap = &report.snapshot;
    println!(
        "status={} score={} lines={} level={} pieces={} level_ups={} frames={}",
        snap.status.as_str(),
        snap.score,
        snap.lines,
        snap.level,
        report.pieces_locked,
        report.level_ups,
        report.frames_run,
    );

    let actions: Vec<String> = report
        .actions
        .iter()
        .map(|(name, count)| format!("{}={}", name, count))
        .collect();
    println!("actions: {}", actions.join(" "));

    if config.json {
        println!("{}", serde_json::to_string_pretty(snap)?);
    }

    Ok(())
}
