//! Ebitris (workspace facade crate).
//!
//! Exposes the engine as `ebitris::{core,types}` while the implementation lives
//! in dedicated crates under `crates/`.

pub use ebitris_core as core;
pub use ebitris_types as types;

pub mod sim;
