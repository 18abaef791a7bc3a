//! Pieces module - the tetromino catalog
//!
//! Static rotation tables for the seven shapes. Offsets live in a small local
//! grid and are pre-shifted per rotation so every shape spawns in its classic
//! orientation; they are not normalized to the origin.
//!
//! Rotation state counts:
//! - O: 1 (rotationally symmetric)
//! - I, S, Z: 2
//! - T, J, L: 4
//!
//! There are no kick tables: a rotation either fits in place or is rejected.

use crate::types::{CellOffset, PieceColor, ShapeKind};

/// Shape of a piece - 4 mino offsets from the piece anchor
pub type PieceShape = [CellOffset; 4];

const I_ROTATIONS: [PieceShape; 2] = [
    // horizontal
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    // vertical
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

const O_ROTATIONS: [PieceShape; 1] = [[(1, 1), (2, 1), (1, 2), (2, 2)]];

const T_ROTATIONS: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_ROTATIONS: [PieceShape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_ROTATIONS: [PieceShape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (2, 1), (1, 1), (1, 2)],
];

const J_ROTATIONS: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_ROTATIONS: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// All rotation states of a shape, in clockwise order
pub fn rotations(kind: ShapeKind) -> &'static [PieceShape] {
    match kind {
        ShapeKind::I => &I_ROTATIONS,
        ShapeKind::O => &O_ROTATIONS,
        ShapeKind::T => &T_ROTATIONS,
        ShapeKind::S => &S_ROTATIONS,
        ShapeKind::Z => &Z_ROTATIONS,
        ShapeKind::J => &J_ROTATIONS,
        ShapeKind::L => &L_ROTATIONS,
    }
}

/// Number of distinct rotation states of a shape
pub fn rotation_count(kind: ShapeKind) -> usize {
    rotations(kind).len()
}

/// Get the mino offsets for a shape and rotation index
///
/// The index is taken modulo the shape's rotation count, so this never fails.
pub fn get_shape(kind: ShapeKind, rotation: usize) -> PieceShape {
    let table = rotations(kind);
    table[rotation % table.len()]
}

/// Canonical color of a shape
pub fn shape_color(kind: ShapeKind) -> PieceColor {
    kind.color()
}
