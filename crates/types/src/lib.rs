//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data (only `serde` for their wire form), so the
//! engine, a renderer, or a headless driver can all use them.
//!
//! # Board Dimensions
//!
//! The board size is chosen per session. The classic playfield is:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (`width / 2 - 2`, [`SPAWN_ROW`])
//!
//! # Tuning Constants
//!
//! Timing values are in frames of the host loop (nominally 60 per second):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAMES_PER_SECOND` | 60 | Nominal tick rate of the host loop |
//! | `BASE_GRAVITY_DELAY` | 48 | Frames per gravity step at level 0 (~0.8s) |
//! | `GRAVITY_DELAY_STEP` | 2 | Frames removed per level |
//! | `MIN_GRAVITY_DELAY` | 10 | Gravity never gets faster than this |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level |
//! | `SPAWN_ROW` | 0 | Y coordinate of freshly spawned pieces |
//!
//! # Gravity by Level
//!
//! | Level | Delay |
//! |-------|-------|
//! | 0 | 48 frames |
//! | 1 | 46 frames |
//! | 5 | 38 frames |
//! | 19+ | 10 frames (floor) |
//!
//! # Examples
//!
//! ```
//! use ebitris_types::{GameAction, PieceColor, ShapeKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! let shape = ShapeKind::T;
//! assert_eq!(ShapeKind::from_str("t"), Some(shape));
//! assert_eq!(shape.color(), PieceColor::Magenta);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Classic board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Classic board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Nominal host loop rate; `GameState::update` is expected this often.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Row at which new pieces spawn and at which the next piece is promoted.
pub const SPAWN_ROW: i32 = 0;

/// Frames between gravity steps at level 0 (~0.8 seconds at 60 FPS)
pub const BASE_GRAVITY_DELAY: u32 = 48;

/// Frames removed from the gravity delay per level
pub const GRAVITY_DELAY_STEP: u32 = 2;

/// Gravity delay floor in frames
pub const MIN_GRAVITY_DELAY: u32 = 10;

/// Lines cleared per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table
///
/// Base points for clearing N lines in one lock:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points (Tetris!)
///
/// Points are multiplied by (level + 1), using the level before the clear.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven tetromino shapes
///
/// Each shape has a canonical color:
/// - **I**: Cyan, straight line
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// All shapes in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Shape at a catalog index, wrapping around
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Canonical display color of the shape
    pub fn color(&self) -> PieceColor {
        match self {
            ShapeKind::I => PieceColor::Cyan,
            ShapeKind::O => PieceColor::Yellow,
            ShapeKind::T => PieceColor::Magenta,
            ShapeKind::S => PieceColor::Green,
            ShapeKind::Z => PieceColor::Red,
            ShapeKind::J => PieceColor::Blue,
            ShapeKind::L => PieceColor::Orange,
        }
    }

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use ebitris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
        }
    }
}

/// Color identifiers written into the board grid
///
/// Values 1-7 are the only non-zero values a grid cell ever holds.
/// `Shadow` is a display-only value for the shadow projection and is never locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceColor {
    Red = 1,
    Green = 2,
    Blue = 3,
    Yellow = 4,
    Cyan = 5,
    Magenta = 6,
    Orange = 7,
    Shadow = 8,
}

impl PieceColor {
    /// Grid value of this color
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Color for a grid value, `None` for empty (0) or unknown values
    ///
    /// # Examples
    ///
    /// ```
    /// use ebitris_types::PieceColor;
    ///
    /// assert_eq!(PieceColor::from_value(5), Some(PieceColor::Cyan));
    /// assert_eq!(PieceColor::from_value(0), None);
    /// ```
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(PieceColor::Red),
            2 => Some(PieceColor::Green),
            3 => Some(PieceColor::Blue),
            4 => Some(PieceColor::Yellow),
            5 => Some(PieceColor::Cyan),
            6 => Some(PieceColor::Magenta),
            7 => Some(PieceColor::Orange),
            8 => Some(PieceColor::Shadow),
            _ => None,
        }
    }

    /// RGBA used by renderers
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            PieceColor::Red => [255, 0, 0, 255],
            PieceColor::Green => [0, 255, 0, 255],
            PieceColor::Blue => [0, 0, 255, 255],
            PieceColor::Yellow => [255, 255, 0, 255],
            PieceColor::Cyan => [0, 255, 255, 255],
            PieceColor::Magenta => [255, 0, 255, 255],
            PieceColor::Orange => [255, 165, 0, 255],
            PieceColor::Shadow => [40, 40, 50, 255],
        }
    }
}

/// Session status
///
/// `Playing <-> Paused` via explicit calls; `Playing -> GameOver` is automatic
/// and permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[default]
    Playing,
    Paused,
    GameOver,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Playing => "playing",
            Status::Paused => "paused",
            Status::GameOver => "gameOver",
        }
    }
}

/// Player commands accepted by the engine
///
/// These are what an input layer (keyboard, replay, bot) produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    MoveDown,
    /// Rotate to the next rotation state, no wall kicks
    Rotate,
    /// Drop to the lowest free row and lock
    HardDrop,
    Pause,
    Resume,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use ebitris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
        }
    }
}

/// Relative cell offset `(x, y)` of one mino inside a piece's local grid
pub type CellOffset = (i32, i32);

/// Final numbers of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameOverPayload {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

/// Event recorded by the engine while locking a piece.
///
/// The engine only records these; dispatching them is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LinesCleared { count: u32, points: u32 },
    LevelUp { level: u32 },
    GameOver(GameOverPayload),
}
