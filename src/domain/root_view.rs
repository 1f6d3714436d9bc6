use super::*;

/// What the root holds of the whole grid.
///
/// With a single rank the local block already spans the full padded grid,
/// so the root view aliases it. Otherwise rank 0 owns a reassembly buffer
/// that the gather step fills row by row.
#[derive(Debug, Clone, PartialEq)]
pub enum RootView {
    /// Not the root, nothing to hold.
    Absent,
    /// The local grid is the full grid.
    SelfView,
    /// Separately owned `rows x padded` buffer.
    Buffer(Vec<f64>),
}

impl RootView {
    pub fn new(rank: usize, size: usize, rows: usize, padded: usize) -> Self {
        match (rank, size) {
            (0, 1) => RootView::SelfView,
            (0, _) => RootView::Buffer(vec![0.0; rows * padded]),
            _ => RootView::Absent,
        }
    }

    /// Mutable row of the reassembly buffer, only for `Buffer`.
    pub fn gather_row_mut(&mut self, row: usize, padded: usize) -> Option<&mut [f64]> {
        match self {
            RootView::Buffer(buffer) => Some(&mut buffer[row * padded..(row + 1) * padded]),
            _ => None,
        }
    }

    /// The full padded grid seen from the root.
    pub fn resolve<'a>(&'a self, local: &'a LocalGrid, padded: usize) -> Option<FullGrid<'a>> {
        match self {
            RootView::Absent => None,
            RootView::SelfView => Some(FullGrid {
                rows: local.rows(),
                width: local.width(),
                buffer: local.buffer(),
            }),
            RootView::Buffer(buffer) => Some(FullGrid {
                rows: buffer.len() / padded,
                width: padded,
                buffer,
            }),
        }
    }
}

/// Borrowed `rows x padded` view of the reassembled grid.
#[derive(Debug, Clone, Copy)]
pub struct FullGrid<'a> {
    rows: usize,
    width: usize,
    buffer: &'a [f64],
}

impl GridView for FullGrid<'_> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn width(&self) -> usize {
        self.width
    }

    fn buffer(&self) -> &[f64] {
        self.buffer
    }
}
