use std::fmt;

use bevy::math::IVec2;

use super::piece::{Piece, PieceKind};

/// 0 is empty, `k` is a cell settled by the catalog piece at index `k - 1`.
pub type BoardCell = u8;

pub struct Board {
    width: usize,
    height: usize,
    // row 0 is the top of the board
    cells: Vec<Vec<BoardCell>>,
}
impl Board {
    pub fn new(width: usize, height: usize) -> Board {
        let cells = (0..height).map(|_| vec![0; width]).collect();

        Board {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<BoardCell>] {
        &self.cells
    }

    pub fn cell(&self, loc: IVec2) -> BoardCell {
        self.cells[loc.y as usize][loc.x as usize]
    }
    fn cell_mut(&mut self, loc: IVec2) -> &mut BoardCell {
        &mut self.cells[loc.y as usize][loc.x as usize]
    }

    /// Walls, floor and settled cells block; the open space above row 0 does not.
    fn is_blocked(&self, loc: IVec2) -> bool {
        if loc.x < 0 || loc.x >= (self.width as i32) || loc.y >= (self.height as i32) {
            return true;
        }

        if loc.y < 0 {
            return false;
        }

        self.cell(loc) != 0
    }

    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|loc| self.is_blocked(loc))
    }

    pub fn merge(&mut self, piece: &Piece) {
        debug_assert!(!self.collides(piece));
        let value = piece.kind().cell_value();
        for loc in piece.cells().filter(|loc| loc.y >= 0) {
            *self.cell_mut(loc) = value;
        }
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|&cell| cell != 0)
    }

    /// Removes every full row, bottom to top, dropping the stack above it by one.
    /// Returns how many rows were removed.
    pub fn sweep(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = self.height;
        while row > 0 {
            // after a removal the row above has shifted into this index, so look again
            if self.is_row_full(row - 1) {
                self.cells.remove(row - 1);
                self.cells.insert(0, vec![0; self.width]);
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }
}

/// One line per row, top first: `.` for empty, the piece letter for settled cells.
impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &cell in row {
                match PieceKind::from_cell(cell) {
                    Some(kind) => write!(f, "{:?}", kind)?,
                    None => f.write_str(".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
