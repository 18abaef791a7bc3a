//! Core game logic module - pure, deterministic, and testable
//!
//! This crate is the game-state engine of a falling-block puzzle game.
//! It has **no dependencies** on rendering, input, audio, or I/O, which makes it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is a plain method call
//! - **Portable**: any loop that ticks at a fixed rate can drive it
//!
//! # Module Structure
//!
//! - [`pieces`]: the catalog of the 7 tetrominoes and their rotation states
//! - [`board`]: the grid, collision queries and line clearing
//! - [`piece`]: a shape instance with position and rotation
//! - [`game_state`]: current/next pieces, gravity, scoring, lifecycle
//! - [`rng`]: seeded shape generator with a one-retry anti-repeat bias
//! - [`scoring`]: line clear points, levels and gravity delays
//! - [`snapshot`]: serializable read-only copies of a game
//!
//! # Game Rules
//!
//! - **Rotation**: next rotation state in place, no wall kicks
//! - **Locking**: when gravity is blocked, or on hard drop (never on manual down)
//! - **Scoring**: 100/300/500/800 for 1-4 lines, times (level + 1)
//! - **Levels**: one per 10 lines; each level removes 2 frames of gravity delay,
//!   down to a floor of 10 frames
//! - **Game over**: after a lock, any filled cell in row 0 ends the game for good
//!
//! # Example
//!
//! ```
//! use ebitris_core::GameState;
//! use ebitris_core::types::{GameAction, Status};
//!
//! let mut game = GameState::with_seed(10, 20, 12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // One lock happened; the board now holds four cells
//! let filled = game.board().cells().iter().filter(|&&c| c != 0).count();
//! assert_eq!(filled, 4);
//!
//! for _ in 0..60 {
//!     game.update();
//! }
//! assert_ne!(game.status(), Status::Paused);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::update`](game_state::GameState::update) once per frame
//! (nominally 60 per second). Gravity moves the current piece down one row
//! every `gravity_delay` frames.

pub mod board;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use ebitris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, LockEvents};
pub use piece::Piece;
pub use pieces::{get_shape, rotation_count, PieceShape};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_score, gravity_delay_for_level, ScoreResult};
pub use snapshot::{GameSnapshot, PieceSnapshot};
