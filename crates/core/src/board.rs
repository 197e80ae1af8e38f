//! Board module - manages the game grid
//!
//! The board is a fixed-size grid (10x20 canonically) where each cell is either empty or
//! filled with a color tag. Storage is a flat row-major vector allocated once at
//! construction; its dimensions never change afterwards.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use std::ops::Index;

use arrayvec::ArrayVec;

use crate::types::{BoardError, Cell, Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_LINES_PER_LOCK};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty 10x20 board
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create an empty board with custom dimensions.
    ///
    /// Dimensions are clamped to at least 4x4 so every tetromino fits, and to at most
    /// 127 so coordinates stay representable.
    pub fn with_size(width: u8, height: u8) -> Self {
        let width = width.clamp(4, i8::MAX as u8);
        let height = height.clamp(4, i8::MAX as u8);
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` and ` ` are empty. A piece letter (`I`, `O`, `T`, `S`, `Z`, `J`, `L`, any case)
    /// fills the cell with that piece's color; any other character fills it with
    /// `Color::Blue`. Short rows are padded with empty cells, long rows are truncated.
    /// The text occupies the bottom of the board.
    ///
    /// ```
    /// use tetromino_core::Board;
    /// use tetromino_types::{Cell, Color};
    ///
    /// let board = Board::from_rows(10, 20, &["IIII..IIII"]);
    /// assert_eq!(board.cell_at(0, 19), Ok(Cell::Filled(Color::Cyan)));
    /// assert_eq!(board.cell_at(4, 19), Ok(Cell::Empty));
    /// ```
    pub fn from_rows(width: u8, height: u8, rows: &[&str]) -> Self {
        let mut board = Self::with_size(width, height);
        let skip = rows.len().saturating_sub(board.height as usize);
        let top = board.height as usize - (rows.len() - skip);

        for (row_offset, row) in rows.iter().skip(skip).enumerate() {
            let y = top + row_offset;
            for (x, ch) in row.chars().take(board.width as usize).enumerate() {
                let cell = match ch {
                    '.' | ' ' => Cell::Empty,
                    other => {
                        let color = PieceKind::from_str(other.encode_utf8(&mut [0; 4]))
                            .map_or(Color::Blue, PieceKind::color);
                        Cell::Filled(color)
                    }
                };
                let idx = y * board.width as usize + x;
                board.cells[idx] = cell;
            }
        }

        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn flat_index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Read a cell, failing with `OutOfBounds` outside the board
    pub fn cell_at(&self, x: i8, y: i8) -> Result<Cell, BoardError> {
        self.get(x, y).ok_or(BoardError::OutOfBounds { x, y })
    }

    /// Write a cell, failing with `OutOfBounds` outside the board
    pub fn set_cell(&mut self, x: i8, y: i8, cell: Cell) -> Result<(), BoardError> {
        let idx = self.flat_index(x, y).ok_or(BoardError::OutOfBounds { x, y })?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.flat_index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Filled(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    fn row(&self, y: i8) -> Option<&[Cell]> {
        if y < 0 || y >= self.height as i8 {
            return None;
        }
        let width = self.width as usize;
        let start = y as usize * width;
        Some(&self.cells[start..start + width])
    }

    /// Check if a row is completely filled. Rows outside the board are never full.
    pub fn is_row_full(&self, y: i8) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_filled()))
            .unwrap_or(false)
    }

    /// Check if a row has no filled cell
    pub fn is_row_empty(&self, y: i8) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_empty()))
            .unwrap_or(true)
    }

    /// Remove row `y`, shift every row above it down by one and insert an empty row
    /// at the top.
    pub fn remove_row(&mut self, y: i8) -> Result<(), BoardError> {
        if y < 0 || y >= self.height as i8 {
            return Err(BoardError::OutOfBounds { x: 0, y });
        }

        let width = self.width as usize;
        let y = y as usize;

        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);

        for cell in &mut self.cells[..width] {
            *cell = Cell::Empty;
        }

        Ok(())
    }

    /// Indices of every full row, scanned bottom to top.
    ///
    /// A lock can complete at most four rows; a board that already holds more full
    /// rows than that only reports the lowest four.
    pub fn full_rows(&self) -> ArrayVec<i8, MAX_LINES_PER_LOCK> {
        let mut rows = ArrayVec::new();
        for y in (0..self.height as i8).rev() {
            if self.is_row_full(y) && rows.try_push(y).is_err() {
                break;
            }
        }
        rows
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Height of the stack in column `x` (0 for an empty column)
    pub fn column_height(&self, x: i8) -> u8 {
        (0..self.height as i8)
            .find(|&y| self.is_occupied(x, y))
            .map_or(0, |top| self.height - top as u8)
    }

    /// Empty cells with at least one filled cell above them in the same column
    pub fn hole_count(&self) -> usize {
        let mut holes = 0;
        for x in 0..self.width as i8 {
            let mut covered = false;
            for y in 0..self.height as i8 {
                if self.is_occupied(x, y) {
                    covered = true;
                } else if covered {
                    holes += 1;
                }
            }
        }
        holes
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Snapshot codes, row-major: 0 empty, 1..=7 color code
    pub fn codes(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.code()).collect()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::Empty;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Panicking access for code that has already validated its coordinates.
impl Index<(i8, i8)> for Board {
    type Output = Cell;

    fn index(&self, (x, y): (i8, i8)) -> &Self::Output {
        match self.flat_index(x, y) {
            Some(idx) => &self.cells[idx],
            None => panic!(
                "cell ({x}, {y}) is outside the {}x{} board",
                self.width, self.height
            ),
        }
    }
}
