//! MPI backend, every rank is an OS process started by `mpirun`.
//!
//! MPI reports failures by aborting the job, so every call here either
//! succeeds or never returns.

use super::*;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

/// The MPI standard only guarantees tags up to 32767. Rank 0 waits on no
/// one and can run ahead by any number of rows, so wrapped tags may repeat
/// in a queue. Receives never select by tag, they take the next message
/// from the source and compare, which keeps the check meaningful.
const TAG_MODULUS: u64 = 32768;

pub struct MpiTransport {
    world: SimpleCommunicator,
    rank: usize,
    size: usize,
    _universe: mpi::environment::Universe,
}

impl MpiTransport {
    /// Initializes MPI, returns `None` if it was already initialized.
    pub fn initialize() -> Option<Self> {
        let universe = mpi::initialize()?;
        let world = universe.world();
        let rank = world.rank() as usize;
        let size = world.size() as usize;
        Some(MpiTransport {
            world,
            rank,
            size,
            _universe: universe,
        })
    }

    fn check_rank(&self, rank: usize) -> Result<mpi::Rank, TransportError> {
        if rank < self.size {
            Ok(rank as mpi::Rank)
        } else {
            Err(TransportError::InvalidRank {
                rank,
                size: self.size,
            })
        }
    }
}

fn wire_tag(tag: Tag) -> mpi::Tag {
    (tag.wire() % TAG_MODULUS) as mpi::Tag
}

impl Transport for MpiTransport {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn send(&self, dst: usize, tag: Tag, values: &[f64]) -> Result<(), TransportError> {
        let dst = self.check_rank(dst)?;
        self.world
            .process_at_rank(dst)
            .send_with_tag(values, wire_tag(tag));
        Ok(())
    }

    fn recv(&self, src: usize, tag: Tag, values: &mut [f64]) -> Result<(), TransportError> {
        let src_rank = self.check_rank(src)?;
        let status = self.world.process_at_rank(src_rank).receive_into(values);
        let expected = wire_tag(tag);
        if status.tag() != expected {
            return Err(TransportError::UnexpectedTag {
                peer: src,
                expected: tag,
                found: Tag::from_wire(status.tag() as u64),
            });
        }
        let found = status.count(f64::equivalent_datatype()) as usize;
        if found != values.len() {
            return Err(TransportError::LengthMismatch {
                peer: src,
                expected: values.len(),
                found,
            });
        }
        Ok(())
    }

    fn gather(
        &self,
        root: usize,
        local: &[f64],
        out: Option<&mut [f64]>,
    ) -> Result<(), TransportError> {
        let root_rank = self.check_rank(root)?;
        let root_process = self.world.process_at_rank(root_rank);
        if self.rank != root {
            root_process.gather_into(local);
            return Ok(());
        }
        match out {
            Some(out) if out.len() == local.len() * self.size => {
                root_process.gather_into_root(local, out);
                Ok(())
            }
            other => Err(TransportError::LengthMismatch {
                peer: root,
                expected: local.len() * self.size,
                found: other.map_or(0, |o| o.len()),
            }),
        }
    }

    fn barrier(&self) -> Result<(), TransportError> {
        self.world.barrier();
        Ok(())
    }
}
