//! The interpreter's addressable byte memory.

/// Number of cells on a default tape.
pub const TAPE_SIZE: usize = 30_000;

/// Raised when the data pointer would leave the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds;

/// A fixed-length, zero-initialized tape of `u8` cells with a single cursor.
///
/// The cursor always points at a valid cell: [`Tape::advance`] and
/// [`Tape::retreat`] refuse to move it off either end and leave it where it
/// was.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<u8>,
    cursor: usize,
}

impl Tape {
    /// A tape of [`TAPE_SIZE`] zeroed cells.
    pub fn new() -> Self {
        Self::with_len(TAPE_SIZE)
    }

    /// A tape of `len` zeroed cells.
    ///
    /// A tape always has at least one cell: `with_len(0)` returns a one-cell
    /// tape, since the cursor must point at a valid cell.
    pub fn with_len(len: usize) -> Self {
        Self {
            cells: vec![0; len.max(1)],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn advance(&mut self) -> Result<(), OutOfBounds> {
        if self.cursor + 1 >= self.cells.len() {
            return Err(OutOfBounds);
        }
        self.cursor += 1;
        Ok(())
    }

    pub fn retreat(&mut self) -> Result<(), OutOfBounds> {
        if self.cursor == 0 {
            return Err(OutOfBounds);
        }
        self.cursor -= 1;
        Ok(())
    }

    pub fn increment_current(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement_current(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(1);
    }

    pub fn read_current(&self) -> u8 {
        self.cells[self.cursor]
    }

    pub fn write_current(&mut self, byte: u8) {
        self.cells[self.cursor] = byte;
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}
