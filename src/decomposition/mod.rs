//! Block decomposition of the distributed axis over a ring of ranks.
//!
//! The axis is padded up to a multiple of the ring size so that every
//! rank owns the same number of columns. Padding columns are computed
//! like any other and clipped away when the solution is assembled.

use crate::error::*;

/// Linear neighbour adjacency `0 <-> 1 <-> ... <-> size - 1`, no wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingTopology {
    rank: usize,
    size: usize,
}

impl RingTopology {
    pub fn new(rank: usize, size: usize) -> Self {
        debug_assert!(rank < size);
        RingTopology { rank, size }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_root(&self) -> bool {
        self.rank == 0
    }

    pub fn left(&self) -> Option<usize> {
        self.rank.checked_sub(1)
    }

    pub fn right(&self) -> Option<usize> {
        let next = self.rank + 1;
        (next < self.size).then_some(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decomposition {
    /// Columns owned by every rank.
    pub part: usize,
    /// Distributed axis size after padding, `part * size`.
    pub padded: usize,
    /// Global index of this rank's first column.
    pub start: usize,
}

impl Decomposition {
    pub fn new(axis_size: usize, size: usize, rank: usize) -> Result<Self> {
        if size == 0 {
            return Err(SolverError::Decomposition(
                "ring must have at least one rank".to_string(),
            ));
        }
        if rank >= size {
            return Err(SolverError::Decomposition(format!(
                "rank {rank} outside a ring of {size}"
            )));
        }

        let part = axis_size.div_ceil(size);
        if part < 2 {
            return Err(SolverError::Decomposition(format!(
                "{axis_size} columns over {size} ranks leaves {part} per rank, \
                 at least 2 are needed"
            )));
        }

        Ok(Decomposition {
            part,
            padded: part * size,
            start: part * rank,
        })
    }

    /// Global column indices owned by this rank.
    pub fn columns(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.part
    }
}
