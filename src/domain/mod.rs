//! Storage for the solution grid.
//!
//! Every rank owns a `LocalGrid` holding its block of columns for every
//! row of the marching axis. The root additionally needs a view of the
//! whole grid, which is either the local grid itself or a separately
//! owned reassembly buffer, see `RootView`.

mod root_view;

pub use root_view::*;

/// Read access to a dense row-major grid.
pub trait GridView {
    fn rows(&self) -> usize;

    fn width(&self) -> usize;

    fn buffer(&self) -> &[f64];

    #[track_caller]
    fn view(&self, row: usize, col: usize) -> f64 {
        debug_assert!(
            row < self.rows() && col < self.width(),
            "({row}, {col}) outside {}x{}",
            self.rows(),
            self.width()
        );
        self.buffer()[row * self.width() + col]
    }

    fn row(&self, row: usize) -> &[f64] {
        let w = self.width();
        &self.buffer()[row * w..(row + 1) * w]
    }
}

/// One rank's block, `rows x part`, row-major by marching index.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalGrid {
    rows: usize,
    part: usize,
    buffer: Vec<f64>,
}

impl LocalGrid {
    pub fn new(rows: usize, part: usize) -> Self {
        LocalGrid {
            rows,
            part,
            buffer: vec![0.0; rows * part],
        }
    }

    pub fn buffer_mut(&mut self) -> &mut [f64] {
        &mut self.buffer
    }

    #[track_caller]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.rows && col < self.part);
        self.buffer[row * self.part + col] = value;
    }

    /// Two consecutive rows, the second one writable.
    /// Used when computing a row from its predecessor.
    pub fn split_rows_mut(&mut self, row: usize) -> (&[f64], &mut [f64]) {
        debug_assert!(row >= 1 && row < self.rows);
        let w = self.part;
        let (head, tail) = self.buffer.split_at_mut(row * w);
        (&head[(row - 1) * w..], &mut tail[..w])
    }

    /// Rows `row - 2`, `row - 1` and a writable `row`.
    pub fn split_three_rows_mut(
        &mut self,
        row: usize,
    ) -> (&[f64], &[f64], &mut [f64]) {
        debug_assert!(row >= 2 && row < self.rows);
        let w = self.part;
        let (head, tail) = self.buffer.split_at_mut(row * w);
        let (older, previous) = head[(row - 2) * w..].split_at(w);
        (older, previous, &mut tail[..w])
    }
}

impl GridView for LocalGrid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn width(&self) -> usize {
        self.part
    }

    fn buffer(&self) -> &[f64] {
        &self.buffer
    }
}
