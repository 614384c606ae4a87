//! Fixed-capacity byte tape with a single cursor.

/// Number of cells allocated when no other capacity is configured.
pub const DEFAULT_TAPE_SIZE: usize = 30_000;

/// The cursor was asked to leave `[0, capacity)`.
///
/// Carries the cursor position the move started from; the tape is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("tape cursor out of bounds (cursor={cursor}, capacity={capacity})")]
pub struct CursorOutOfBounds {
    pub cursor: usize,
    pub capacity: usize,
}

/// Zero-initialized byte cells plus the data cursor.
///
/// Only cursor movement is checked. Once a move has been validated the cursor
/// is in range by construction, so cell access indexes directly.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Box<[u8]>,
    cursor: usize,
}

impl Tape {
    /// Allocate a tape of [`DEFAULT_TAPE_SIZE`] cells.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TAPE_SIZE)
    }

    /// Allocate a zeroed tape with `capacity` cells.
    ///
    /// A capacity of 0 is bumped to 1 so the cursor always has a cell to point at.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: vec![0; capacity.max(1)].into_boxed_slice(),
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn advance_cursor(&mut self) -> Result<(), CursorOutOfBounds> {
        if self.cursor + 1 >= self.cells.len() {
            return Err(self.out_of_bounds());
        }
        self.cursor += 1;
        Ok(())
    }

    pub fn retreat_cursor(&mut self) -> Result<(), CursorOutOfBounds> {
        if self.cursor == 0 {
            return Err(self.out_of_bounds());
        }
        self.cursor -= 1;
        Ok(())
    }

    pub fn increment_cell(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement_cell(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(1);
    }

    pub fn read_cell(&self) -> u8 {
        self.cells[self.cursor]
    }

    pub fn write_cell(&mut self, byte: u8) {
        self.cells[self.cursor] = byte;
    }

    fn out_of_bounds(&self) -> CursorOutOfBounds {
        CursorOutOfBounds {
            cursor: self.cursor,
            capacity: self.cells.len(),
        }
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}
