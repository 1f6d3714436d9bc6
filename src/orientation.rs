//! Stability-driven choice of the decomposition axis.
//!
//! The explicit scheme is only stable while marching along an axis whose
//! Courant ratio is below one. In `Direct` orientation we march in time and
//! distribute space, in `Inversed` orientation we march in space and
//! distribute time. Nothing is ever swapped in place, `Layout` answers
//! axis questions by branching on the orientation.

use crate::equation::*;
use crate::stencil::AxisCoefficients;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Direct,
    Inversed,
}

/// Fast when the distributed axis is longer than the marching axis.
/// A square grid counts as fast only in direct orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pace {
    Slow,
    Fast,
}

impl Orientation {
    pub fn select(grid: &GridSpec) -> Self {
        if grid.courant() < 1.0 {
            Orientation::Direct
        } else {
            Orientation::Inversed
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Direct => write!(f, "direct"),
            Orientation::Inversed => write!(f, "inversed"),
        }
    }
}

impl std::fmt::Display for Pace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pace::Slow => write!(f, "slow"),
            Pace::Fast => write!(f, "fast"),
        }
    }
}

/// The true grid viewed through an orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    grid: GridSpec,
    orientation: Orientation,
}

impl Layout {
    pub fn new(grid: GridSpec) -> Self {
        Layout {
            grid,
            orientation: Orientation::select(&grid),
        }
    }

    pub fn with_orientation(grid: GridSpec, orientation: Orientation) -> Self {
        Layout { grid, orientation }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn pace(&self) -> Pace {
        let (m, k) = (self.grid.space_points(), self.grid.time_steps());
        let fast = match self.orientation {
            Orientation::Direct => m >= k,
            Orientation::Inversed => m < k,
        };
        if fast {
            Pace::Fast
        } else {
            Pace::Slow
        }
    }

    /// Number of true points along the distributed axis.
    pub fn parallel_axis_size(&self) -> usize {
        match self.orientation {
            Orientation::Direct => self.grid.space_points(),
            Orientation::Inversed => self.grid.time_steps(),
        }
    }

    /// Number of true points along the marching axis.
    pub fn sequential_axis_size(&self) -> usize {
        match self.orientation {
            Orientation::Direct => self.grid.time_steps(),
            Orientation::Inversed => self.grid.space_points(),
        }
    }

    pub fn parallel_step(&self) -> f64 {
        match self.orientation {
            Orientation::Direct => self.grid.h,
            Orientation::Inversed => self.grid.tau,
        }
    }

    pub fn sequential_step(&self) -> f64 {
        match self.orientation {
            Orientation::Direct => self.grid.tau,
            Orientation::Inversed => self.grid.h,
        }
    }

    /// Wave speed multiplies the space derivative,
    /// which is the parallel axis in direct orientation.
    pub fn coefficients(&self) -> AxisCoefficients {
        match self.orientation {
            Orientation::Direct => AxisCoefficients {
                sequential: 1.0,
                parallel: self.grid.a,
            },
            Orientation::Inversed => AxisCoefficients {
                sequential: self.grid.a,
                parallel: 1.0,
            },
        }
    }

    /// Source term at a point given in (sequential, parallel) coordinates.
    pub fn source<E: Equation + ?Sized>(
        &self,
        equation: &E,
        sequential: f64,
        parallel: f64,
    ) -> f64 {
        match self.orientation {
            Orientation::Direct => equation.source(parallel, sequential),
            Orientation::Inversed => equation.source(sequential, parallel),
        }
    }

    /// Profile along the distributed axis, written into row 0.
    pub fn parallel_profile<E: Equation + ?Sized>(
        &self,
        equation: &E,
        coord: f64,
    ) -> f64 {
        match self.orientation {
            Orientation::Direct => equation.initial_profile(coord),
            Orientation::Inversed => equation.boundary_profile(coord),
        }
    }

    /// Profile along the marching axis, written into column 0 on the root.
    pub fn sequential_profile<E: Equation + ?Sized>(
        &self,
        equation: &E,
        coord: f64,
    ) -> f64 {
        match self.orientation {
            Orientation::Direct => equation.boundary_profile(coord),
            Orientation::Inversed => equation.initial_profile(coord),
        }
    }

    /// Maps a true (time row, space column) pair to
    /// (sequential index, parallel index) of the stored grid.
    pub fn stored_index(&self, time_row: usize, space_col: usize) -> (usize, usize) {
        match self.orientation {
            Orientation::Direct => (time_row, space_col),
            Orientation::Inversed => (space_col, time_row),
        }
    }
}
