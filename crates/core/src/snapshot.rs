use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::types::Status;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub shape: String,
    pub color: u8,
    pub x: i32,
    pub y: i32,
    pub rotation: usize,
    /// Absolute board cells, may include rows above the board
    pub cells: Vec<(i32, i32)>,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: value.shape.as_str().to_string(),
            color: value.color.value(),
            x: value.x,
            y: value.y,
            rotation: value.rotation,
            cells: value.board_cells(0, 0).to_vec(),
        }
    }
}

/// Read-only copy of a game, safe to hand to another thread or serialize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Grid rows, top first; 0 empty, 1-7 locked color
    pub board: Vec<Vec<u8>>,
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    pub shadow: PieceSnapshot,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    /// Serialized as "playing", "paused" or "gameOver"
    pub status: Status,
    pub frame_count: u32,
    pub gravity_delay: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == Status::Playing
    }

    /// Number of occupied grid cells
    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|&&cell| cell != 0)
            .count()
    }
}
