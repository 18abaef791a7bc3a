//! Piece module - a movable instance of a catalog shape
//!
//! A piece knows its shape, color, anchor position and rotation index.
//! Every mutator here is unconditional: collision checks belong to the caller.

use crate::pieces::{get_shape, rotation_count, PieceShape};
use crate::types::{CellOffset, PieceColor, ShapeKind};

/// A falling (or projected) tetromino
///
/// `x`/`y` is the top-left anchor of the shape's local grid in board
/// coordinates. `y` may be negative while the piece pokes above the board.
/// The type is `Copy`, so every holder owns an independent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: ShapeKind,
    pub color: PieceColor,
    pub x: i32,
    pub y: i32,
    pub rotation: usize,
}

impl Piece {
    /// Create a piece with the shape's canonical color
    pub fn new(shape: ShapeKind, x: i32, y: i32, rotation: usize) -> Self {
        Self {
            shape,
            color: shape.color(),
            x,
            y,
            rotation,
        }
    }

    /// Relative offsets of the occupied cells for the current rotation
    pub fn cells(&self) -> PieceShape {
        get_shape(self.shape, self.rotation)
    }

    /// Absolute board coordinates of the occupied cells, shifted by `(dx, dy)`
    pub fn board_cells(&self, dx: i32, dy: i32) -> [CellOffset; 4] {
        self.cells()
            .map(|(cx, cy)| (self.x + cx + dx, self.y + cy + dy))
    }

    /// Advance to the next rotation state
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % rotation_count(self.shape);
    }

    pub fn move_left(&mut self) {
        self.shift(-1, 0);
    }

    pub fn move_right(&mut self) {
        self.shift(1, 0);
    }

    pub fn move_down(&mut self) {
        self.shift(0, 1);
    }

    pub fn move_up(&mut self) {
        self.shift(0, -1);
    }

    fn shift(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}
