//! Message passing between the ranks of the ring.
//!
//! The solver only needs blocking point-to-point calls with per-pair FIFO
//! ordering, a rank-ordered gather and a barrier. Implementations:
//! `LocalEndpoint` runs every rank as a thread of the current process,
//! `RecordingTransport` logs outgoing traffic of any other transport,
//! `MpiTransport` (feature `mpi`) uses the MPI world communicator.

mod local;
#[cfg(feature = "mpi")]
mod mpi_world;
mod recording;

pub use local::*;
#[cfg(feature = "mpi")]
pub use mpi_world::*;
pub use recording::*;

use crate::error::TransportError;

/// Protocol step a boundary message belongs to.
///
/// Channels are FIFO, so the tag never selects among messages; receivers
/// only verify that the next message is the one the protocol expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Pair of boundary values seeding row 1.
    FirstRow,
    /// Last column value of row `k`, needed to compute row `k + 1`.
    Row(usize),
}

impl Tag {
    /// Integer form for transports with numeric tags.
    pub fn wire(&self) -> u64 {
        match self {
            Tag::FirstRow => 0,
            Tag::Row(k) => *k as u64,
        }
    }

    /// Inverse of `wire`, up to whatever wrapping the transport applied.
    pub fn from_wire(wire: u64) -> Tag {
        match wire {
            0 => Tag::FirstRow,
            k => Tag::Row(k as usize),
        }
    }
}

pub trait Transport {
    fn rank(&self) -> usize;

    fn size(&self) -> usize;

    /// Blocks until `values` may be reused.
    fn send(&self, dst: usize, tag: Tag, values: &[f64]) -> Result<(), TransportError>;

    /// Blocks until the next message from `src` arrived and fills `values`.
    fn recv(&self, src: usize, tag: Tag, values: &mut [f64]) -> Result<(), TransportError>;

    /// Collective: every rank contributes `local`, the root receives the
    /// concatenation ordered by rank in `out`. Non-roots pass `None`.
    fn gather(
        &self,
        root: usize,
        local: &[f64],
        out: Option<&mut [f64]>,
    ) -> Result<(), TransportError>;

    fn barrier(&self) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn rank(&self) -> usize {
        (**self).rank()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn send(&self, dst: usize, tag: Tag, values: &[f64]) -> Result<(), TransportError> {
        (**self).send(dst, tag, values)
    }

    fn recv(&self, src: usize, tag: Tag, values: &mut [f64]) -> Result<(), TransportError> {
        (**self).recv(src, tag, values)
    }

    fn gather(
        &self,
        root: usize,
        local: &[f64],
        out: Option<&mut [f64]>,
    ) -> Result<(), TransportError> {
        (**self).gather(root, local, out)
    }

    fn barrier(&self) -> Result<(), TransportError> {
        (**self).barrier()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn wire_tags() {
        assert_eq!(Tag::FirstRow.wire(), 0);
        assert_eq!(Tag::Row(7).wire(), 7);
        for tag in [Tag::FirstRow, Tag::Row(1), Tag::Row(40000)] {
            assert_eq!(Tag::from_wire(tag.wire()), tag);
        }
    }
}
