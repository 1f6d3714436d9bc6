use super::*;
use crate::error::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Barrier, Mutex};

#[derive(Debug)]
struct Envelope {
    tag: Tag,
    values: Vec<f64>,
}

/// One rank of an in-process ring.
///
/// Every ordered pair of ranks has its own FIFO link, collectives travel
/// over a second set of links so they can never interleave with boundary
/// traffic. Dropping an endpoint disconnects all of its links, which
/// makes peers fail instead of waiting forever.
#[derive(Debug)]
pub struct LocalEndpoint {
    rank: usize,
    size: usize,
    links_out: Vec<Sender<Envelope>>,
    links_in: Vec<Receiver<Envelope>>,
    collective_out: Vec<Sender<Vec<f64>>>,
    collective_in: Vec<Receiver<Vec<f64>>>,
    barrier: Arc<Barrier>,
}

type Links<T> = (Vec<Vec<Sender<T>>>, Vec<Vec<Receiver<T>>>);

fn links<T>(size: usize) -> Links<T> {
    let mut senders = Vec::with_capacity(size);
    let mut receivers: Vec<Vec<Receiver<T>>> =
        (0..size).map(|_| Vec::with_capacity(size)).collect();
    for _src in 0..size {
        let mut outgoing = Vec::with_capacity(size);
        for incoming in receivers.iter_mut() {
            let (tx, rx) = unbounded();
            outgoing.push(tx);
            incoming.push(rx);
        }
        senders.push(outgoing);
    }
    (senders, receivers)
}

pub struct LocalRing;

impl LocalRing {
    /// Fully connected endpoints for a ring of `size` ranks, in rank order.
    pub fn endpoints(size: usize) -> Vec<LocalEndpoint> {
        let (links_out, links_in) = links::<Envelope>(size);
        let (collective_out, collective_in) = links::<Vec<f64>>(size);
        let barrier = Arc::new(Barrier::new(size.max(1)));

        links_out
            .into_iter()
            .zip(links_in)
            .zip(collective_out.into_iter().zip(collective_in))
            .enumerate()
            .map(
                |(rank, ((links_out, links_in), (collective_out, collective_in)))| LocalEndpoint {
                    rank,
                    size,
                    links_out,
                    links_in,
                    collective_out,
                    collective_in,
                    barrier: barrier.clone(),
                },
            )
            .collect()
    }
}

impl LocalEndpoint {
    fn check_rank(&self, rank: usize) -> std::result::Result<(), TransportError> {
        if rank < self.size {
            Ok(())
        } else {
            Err(TransportError::InvalidRank {
                rank,
                size: self.size,
            })
        }
    }
}

impl Transport for LocalEndpoint {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn send(
        &self,
        dst: usize,
        tag: Tag,
        values: &[f64],
    ) -> std::result::Result<(), TransportError> {
        self.check_rank(dst)?;
        self.links_out[dst]
            .send(Envelope {
                tag,
                values: values.to_vec(),
            })
            .map_err(|_| TransportError::Disconnected { peer: dst })
    }

    fn recv(
        &self,
        src: usize,
        tag: Tag,
        values: &mut [f64],
    ) -> std::result::Result<(), TransportError> {
        self.check_rank(src)?;
        let envelope = self.links_in[src]
            .recv()
            .map_err(|_| TransportError::Disconnected { peer: src })?;
        if envelope.tag != tag {
            return Err(TransportError::UnexpectedTag {
                peer: src,
                expected: tag,
                found: envelope.tag,
            });
        }
        if envelope.values.len() != values.len() {
            return Err(TransportError::LengthMismatch {
                peer: src,
                expected: values.len(),
                found: envelope.values.len(),
            });
        }
        values.copy_from_slice(&envelope.values);
        Ok(())
    }

    fn gather(
        &self,
        root: usize,
        local: &[f64],
        out: Option<&mut [f64]>,
    ) -> std::result::Result<(), TransportError> {
        self.check_rank(root)?;
        if self.rank != root {
            return self.collective_out[root]
                .send(local.to_vec())
                .map_err(|_| TransportError::Disconnected { peer: root });
        }

        let n = local.len();
        let out = match out {
            Some(out) if out.len() == n * self.size => out,
            other => {
                return Err(TransportError::LengthMismatch {
                    peer: root,
                    expected: n * self.size,
                    found: other.map_or(0, |o| o.len()),
                })
            }
        };
        for (src, chunk) in out.chunks_exact_mut(n.max(1)).enumerate().take(self.size) {
            if src == root {
                chunk.copy_from_slice(local);
                continue;
            }
            let values = self.collective_in[src]
                .recv()
                .map_err(|_| TransportError::Disconnected { peer: src })?;
            if values.len() != n {
                return Err(TransportError::LengthMismatch {
                    peer: src,
                    expected: n,
                    found: values.len(),
                });
            }
            chunk.copy_from_slice(&values);
        }
        Ok(())
    }

    fn barrier(&self) -> std::result::Result<(), TransportError> {
        self.barrier.wait();
        Ok(())
    }
}

/// Runs `job` once per rank, each on its own thread, and returns the
/// results in rank order. The pool has exactly `size` threads so that
/// every rank can block on its links at the same time.
pub fn run_local<R, F>(size: usize, job: F) -> Result<Vec<R>>
where
    R: Send,
    F: Fn(LocalEndpoint) -> R + Sync,
{
    if size == 0 {
        return Err(SolverError::Decomposition(
            "ring must have at least one rank".to_string(),
        ));
    }

    let slots: Vec<Mutex<Option<LocalEndpoint>>> = LocalRing::endpoints(size)
        .into_iter()
        .map(|endpoint| Mutex::new(Some(endpoint)))
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(size)
        .thread_name(|i| format!("rank-{i}"))
        .build()?;

    let results = pool.broadcast(|ctx| {
        let endpoint = slots[ctx.index()]
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())?;
        catch_unwind(AssertUnwindSafe(|| job(endpoint))).ok()
    });

    results
        .into_iter()
        .enumerate()
        .map(|(rank, result)| result.ok_or(SolverError::RankPanicked(rank)))
        .collect()
}
