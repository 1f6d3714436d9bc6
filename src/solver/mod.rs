pub mod ring;
pub mod sequential;

pub use ring::*;
pub use sequential::*;

use crate::equation::*;
use crate::error::*;
use crate::orientation::*;
use crate::solution::*;
use crate::transport::*;
use std::time::{Duration, Instant};

/// What one rank reports after a run.
#[derive(Debug)]
pub struct RunOutcome {
    pub rank: usize,
    pub ranks: usize,
    pub orientation: Orientation,
    pub pace: Pace,
    /// Wall clock time from the start barrier to the end of reassembly.
    pub elapsed: Duration,
    /// Present on the root only.
    pub solution: Option<Solution>,
}

/// Full pipeline on one rank: setup, fills, reassembly.
pub fn solve<E, T>(equation: &E, transport: T) -> Result<RunOutcome>
where
    E: Equation + ?Sized,
    T: Transport,
{
    let rank = transport.rank();
    let ranks = transport.size();
    transport
        .barrier()
        .map_err(SolverError::transport(rank))?;
    let start = Instant::now();

    let mut solver = RingSolver::new(equation, transport)?;
    let solution = solver.run()?;
    let elapsed = start.elapsed();

    let layout = solver.layout();
    if rank == 0 {
        tracing::info!(elapsed = elapsed.as_secs_f64(), "solved");
    }
    Ok(RunOutcome {
        rank,
        ranks,
        orientation: layout.orientation(),
        pace: layout.pace(),
        elapsed,
        solution,
    })
}

/// Runs the whole ring inside this process and returns the root's outcome.
///
/// When ranks fail, the reported error is the first one that is not a
/// disconnect, since disconnects are only the echo of another failure.
pub fn solve_local<E>(equation: &E, ranks: usize) -> Result<RunOutcome>
where
    E: Equation + ?Sized,
{
    let results = run_local(ranks, |endpoint| solve(equation, endpoint))?;
    root_outcome(results)
}

fn root_outcome(results: Vec<Result<RunOutcome>>) -> Result<RunOutcome> {
    let mut root = None;
    let mut echo = None;
    for result in results {
        match result {
            Ok(outcome) if outcome.rank == 0 => root = Some(outcome),
            Ok(_) => {}
            Err(
                e @ SolverError::Transport {
                    source: crate::error::TransportError::Disconnected { .. },
                    ..
                },
            ) => {
                echo.get_or_insert(e);
            }
            Err(e) => return Err(e),
        }
    }
    match (echo, root) {
        (Some(e), _) => Err(e),
        (None, Some(outcome)) => Ok(outcome),
        (None, None) => Err(SolverError::RankPanicked(0)),
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::error::TransportError;

    /// Fails the first send of one protocol step.
    struct FailingSend<T> {
        inner: T,
        tag: Tag,
    }

    impl<T: Transport> Transport for FailingSend<T> {
        fn rank(&self) -> usize {
            self.inner.rank()
        }

        fn size(&self) -> usize {
            self.inner.size()
        }

        fn send(
            &self,
            dst: usize,
            tag: Tag,
            values: &[f64],
        ) -> std::result::Result<(), TransportError> {
            if tag == self.tag {
                return Err(TransportError::LengthMismatch {
                    peer: dst,
                    expected: values.len(),
                    found: 0,
                });
            }
            self.inner.send(dst, tag, values)
        }

        fn recv(
            &self,
            src: usize,
            tag: Tag,
            values: &mut [f64],
        ) -> std::result::Result<(), TransportError> {
            self.inner.recv(src, tag, values)
        }

        fn gather(
            &self,
            root: usize,
            local: &[f64],
            out: Option<&mut [f64]>,
        ) -> std::result::Result<(), TransportError> {
            self.inner.gather(root, local, out)
        }

        fn barrier(&self) -> std::result::Result<(), TransportError> {
            self.inner.barrier()
        }
    }

    fn is_disconnect(result: &Result<RunOutcome>) -> bool {
        matches!(
            result,
            Err(SolverError::Transport {
                source: TransportError::Disconnected { .. },
                ..
            })
        )
    }

    #[test]
    fn failing_rank_stops_the_ring() {
        // 10 columns over 4 ranks, 20 rows
        let eq = ExpSinEquation::new(GridSpec::new(1.0, 1.0, 1.0, 0.1, 0.05));
        let results = run_local(4, |ep| {
            if ep.rank() == 1 {
                let failing = FailingSend {
                    inner: ep,
                    tag: Tag::Row(5),
                };
                solve(&eq, failing)
            } else {
                solve(&eq, ep)
            }
        })
        .unwrap();

        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.is_err()));
        assert!(matches!(
            results[1],
            Err(SolverError::Transport {
                rank: 1,
                source: TransportError::LengthMismatch { peer: 2, .. },
            })
        ));
        for rank in [0, 2, 3] {
            assert!(is_disconnect(&results[rank]), "rank {rank}");
        }

        assert!(matches!(
            root_outcome(results),
            Err(SolverError::Transport { rank: 1, .. })
        ));
    }

    #[test]
    fn disconnect_reported_when_nothing_else_failed() {
        let results = vec![
            Err(SolverError::transport(0)(TransportError::Disconnected { peer: 1 })),
            Err(SolverError::RankPanicked(1)),
        ];
        assert!(matches!(
            root_outcome(results),
            Err(SolverError::RankPanicked(1))
        ));

        let results = vec![Err(SolverError::transport(2)(
            TransportError::Disconnected { peer: 1 },
        ))];
        assert!(is_disconnect(&root_outcome(results)));
    }

    #[test]
    fn local_run_reports_root() {
        let eq = ExpSinEquation::new(GridSpec::new(1.0, 1.0, 1.0, 0.1, 0.05));
        let outcome = solve_local(&eq, 3).unwrap();
        assert_eq!(outcome.rank, 0);
        assert_eq!(outcome.ranks, 3);
        assert_eq!(outcome.orientation, Orientation::Direct);
        let solution = outcome.solution.unwrap();
        assert_eq!(solution.space_points(), 10);
        assert_eq!(solution.time_steps(), 20);
    }

    #[test]
    fn invalid_grid_fails_every_rank() {
        let eq = ExpSinEquation::new(GridSpec::new(-1.0, 1.0, 1.0, 0.1, 0.05));
        assert!(matches!(
            solve_local(&eq, 2),
            Err(SolverError::InvalidGrid(_))
        ));
    }
}
