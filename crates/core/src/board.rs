//! Board module - manages the game grid
//!
//! The board is a `width x height` grid of color values: 0 is empty, 1-7 is the
//! color of a locked mino. Storage is a flat row-major `Vec<u8>` sized once at
//! construction, so rows are moved by copying cells rather than by swapping
//! row handles.
//!
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows with negative y lie above the visible board. Pieces may occupy them,
//! but nothing is ever stored there.

use crate::piece::Piece;

/// Largest value a grid cell may hold
pub const MAX_CELL_VALUE: u8 = 7;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<u8>,
}

impl Board {
    /// Create a new empty board
    ///
    /// # Panics
    ///
    /// Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Build a board from explicit rows (top row first)
    ///
    /// Returns `None` if the rows are empty, ragged, or hold values above 7.
    pub fn from_rows(rows: &[Vec<u8>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 {
            return None;
        }
        if rows
            .iter()
            .any(|row| row.len() != width || row.iter().any(|&v| v > MAX_CELL_VALUE))
        {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.concat(),
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or the value is not a valid cell value
    pub fn set(&mut self, x: i32, y: i32, value: u8) -> bool {
        if value > MAX_CELL_VALUE {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(v) if v != 0)
    }

    /// Whether `piece`, shifted by `(offset_x, offset_y)`, overlaps a wall,
    /// the floor, or a locked cell.
    ///
    /// Cells above the top row are allowed.
    pub fn is_colliding(&self, piece: &Piece, offset_x: i32, offset_y: i32) -> bool {
        piece
            .board_cells(offset_x, offset_y)
            .iter()
            .any(|&(x, y)| {
                if x < 0 || x as usize >= self.width || (y >= 0 && y as usize >= self.height) {
                    return true;
                }
                y >= 0 && self.is_occupied(x, y)
            })
    }

    /// Write the piece's color into every in-bounds cell it occupies.
    ///
    /// Cells above the board are dropped. A display-only color (the shadow)
    /// writes nothing.
    pub fn lock_piece(&mut self, piece: &Piece) {
        let value = piece.color.value();
        for (x, y) in piece.board_cells(0, 0) {
            self.set(x, y, value);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|&cell| cell != 0))
            .unwrap_or(false)
    }

    /// Remove row `y`, shifting everything above it down one row and
    /// inserting an empty row at the top
    fn remove_row(&mut self, y: usize) {
        let width = self.width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(0);
    }

    /// Clear all full rows and return how many were removed
    ///
    /// Scans bottom to top. After a removal the same row index is examined
    /// again, since the row above has just moved into it.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;

        while y > 0 {
            if self.is_row_full(y - 1) {
                self.remove_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// True iff anything is locked in the topmost visible row
    pub fn is_game_over(&self) -> bool {
        self.cells[..self.width].iter().any(|&cell| cell != 0)
    }

    /// One row as a slice
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Convert to 2D vector (top row first)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(
            crate::types::DEFAULT_BOARD_WIDTH,
            crate::types::DEFAULT_BOARD_HEIGHT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
        assert_eq!(board.index(0, -1), None);
    }

    #[test]
    fn test_set_rejects_out_of_range_values() {
        let mut board = Board::new(4, 4);
        assert!(board.set(1, 1, 7));
        assert!(!board.set(1, 1, 8));
        assert_eq!(board.get(1, 1), Some(7));
    }

    #[test]
    fn test_remove_row_shifts_down() {
        let mut board = Board::from_rows(&[
            vec![1, 0],
            vec![0, 2],
            vec![3, 3],
        ])
        .unwrap();
        board.remove_row(2);
        assert_eq!(board.to_rows(), vec![vec![0, 0], vec![1, 0], vec![0, 2]]);
    }

    #[test]
    fn test_shadow_color_is_never_locked() {
        let mut board = Board::new(10, 20);
        let mut shadow = Piece::new(ShapeKind::O, 3, 5, 0);
        shadow.color = crate::types::PieceColor::Shadow;
        board.lock_piece(&shadow);
        assert!(board.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_from_rows_validation() {
        assert!(Board::from_rows(&[]).is_none());
        assert!(Board::from_rows(&[vec![]]).is_none());
        assert!(Board::from_rows(&[vec![0, 0], vec![0]]).is_none());
        assert!(Board::from_rows(&[vec![0, 9]]).is_none());
        assert!(Board::from_rows(&[vec![0, 1], vec![2, 0]]).is_some());
    }
}
