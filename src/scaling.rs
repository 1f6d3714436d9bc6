//! Speedup sweep over ring sizes, run with the in-process transport.

use crate::decomposition::*;
use crate::equation::*;
use crate::error::*;
use crate::orientation::*;
use crate::solver::*;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingPoint {
    pub ranks: usize,
    /// Mean over all repeats.
    pub elapsed: Duration,
    /// `T(1) / T(ranks)`
    pub speedup: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalingReport {
    pub orientation: Orientation,
    pub pace: Pace,
    pub points: Vec<ScalingPoint>,
}

/// Solves the problem on `1..=max_ranks` ranks, `repeats` times each.
/// Ring sizes the axis cannot be split into are skipped.
pub fn sweep<E: Equation + ?Sized>(
    equation: &E,
    max_ranks: usize,
    repeats: usize,
) -> Result<ScalingReport> {
    let grid = *equation.grid();
    grid.validate()?;
    let layout = Layout::new(grid);
    let repeats = repeats.max(1);

    let mut timings = Vec::new();
    for ranks in 1..=max_ranks {
        if let Err(e) = Decomposition::new(layout.parallel_axis_size(), ranks, 0) {
            tracing::warn!(ranks, error = %e, "skipping ring size");
            continue;
        }
        profiling::scope!("scaling: ring size");
        let mut total = Duration::ZERO;
        for _ in 0..repeats {
            total += solve_local(equation, ranks)?.elapsed;
        }
        let mean = total / repeats as u32;
        tracing::debug!(ranks, mean = mean.as_secs_f64(), "measured");
        timings.push((ranks, mean));
    }

    let baseline = timings
        .iter()
        .find(|(ranks, _)| *ranks == 1)
        .map(|(_, t)| t.as_secs_f64());
    let points = timings
        .into_iter()
        .map(|(ranks, elapsed)| ScalingPoint {
            ranks,
            elapsed,
            speedup: match baseline {
                Some(t1) if elapsed.as_secs_f64() > 0.0 => t1 / elapsed.as_secs_f64(),
                _ => f64::NAN,
            },
        })
        .collect();

    Ok(ScalingReport {
        orientation: layout.orientation(),
        pace: layout.pace(),
        points,
    })
}

impl std::fmt::Display for ScalingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "orientation: {} ({})", self.orientation, self.pace)?;
        writeln!(f, "{:>5} {:>12} {:>8}", "ranks", "seconds", "speedup")?;
        for p in &self.points {
            writeln!(
                f,
                "{:>5} {:>12.6} {:>8.3}",
                p.ranks,
                p.elapsed.as_secs_f64(),
                p.speedup
            )?;
        }
        Ok(())
    }
}
