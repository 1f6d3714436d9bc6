//! Equation model.
//!
//! We solve `u_t + a u_x = f(x, t)` on `[0, X] x [0, T]` with
//! `u(x, 0) = phi(x)` and `u(0, t) = psi(t)`.
//! Every rank must build the same `GridSpec`, the orientation
//! is never communicated.

use crate::error::*;

/// Physical and numerical constants of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Wave speed.
    pub a: f64,
    /// Spatial extent.
    pub x_extent: f64,
    /// Time horizon.
    pub t_horizon: f64,
    /// Spatial step.
    pub h: f64,
    /// Time step.
    pub tau: f64,
}

impl Default for GridSpec {
    /// The compiled-in lab configuration, a slow direct run.
    fn default() -> Self {
        GridSpec {
            a: 1.0,
            x_extent: 5.0,
            t_horizon: 100.0,
            h: 0.005,
            tau: 0.001,
        }
    }
}

impl GridSpec {
    pub fn new(a: f64, x_extent: f64, t_horizon: f64, h: f64, tau: f64) -> Self {
        GridSpec {
            a,
            x_extent,
            t_horizon,
            h,
            tau,
        }
    }

    /// Number of true spatial points, `M`.
    pub fn space_points(&self) -> usize {
        (self.x_extent / self.h).round() as usize
    }

    /// Number of true time rows, `K`.
    pub fn time_steps(&self) -> usize {
        (self.t_horizon / self.tau).round() as usize
    }

    /// Courant number `a * tau / h`.
    pub fn courant(&self) -> f64 {
        self.a * self.tau / self.h
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("a", self.a),
            ("X", self.x_extent),
            ("T", self.t_horizon),
            ("h", self.h),
            ("tau", self.tau),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SolverError::InvalidGrid(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if self.space_points() < 2 || self.time_steps() < 2 {
            return Err(SolverError::InvalidGrid(format!(
                "need at least 2x2 points, got M = {}, K = {}",
                self.space_points(),
                self.time_steps()
            )));
        }
        Ok(())
    }
}

/// A concrete problem: grid plus source and boundary functions.
pub trait Equation: Sync {
    fn grid(&self) -> &GridSpec;

    /// Right hand side `f(x, t)`.
    fn source(&self, x: f64, t: f64) -> f64;

    /// `phi(x) = u(x, 0)`.
    fn initial_profile(&self, x: f64) -> f64;

    /// `psi(t) = u(0, t)`.
    fn boundary_profile(&self, t: f64) -> f64;
}

/// The lab problem:
/// `f = exp(sin(x t / X / T))`, `phi = cos(pi x / X)`, `psi = exp(-t / T)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpSinEquation {
    grid: GridSpec,
}

impl ExpSinEquation {
    pub fn new(grid: GridSpec) -> Self {
        ExpSinEquation { grid }
    }
}

impl Equation for ExpSinEquation {
    fn grid(&self) -> &GridSpec {
        &self.grid
    }

    fn source(&self, x: f64, t: f64) -> f64 {
        (x * t / self.grid.x_extent / self.grid.t_horizon).sin().exp()
    }

    fn initial_profile(&self, x: f64) -> f64 {
        (std::f64::consts::PI * x / self.grid.x_extent).cos()
    }

    fn boundary_profile(&self, t: f64) -> f64 {
        (-t / self.grid.t_horizon).exp()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn counts() {
        let grid = GridSpec::new(1.0, 1.0, 1.0, 0.05, 0.001);
        assert_eq!(grid.space_points(), 20);
        assert_eq!(grid.time_steps(), 1000);
        assert_approx_eq!(f64, grid.courant(), 0.02, ulps = 2);

        let lab = GridSpec::default();
        assert_eq!(lab.space_points(), 1000);
        assert_eq!(lab.time_steps(), 100000);
    }

    #[test]
    fn validate() {
        assert!(GridSpec::default().validate().is_ok());
        assert!(GridSpec::new(0.0, 1.0, 1.0, 0.1, 0.1).validate().is_err());
        assert!(GridSpec::new(1.0, 1.0, 1.0, f64::NAN, 0.1)
            .validate()
            .is_err());
        assert!(GridSpec::new(1.0, 1.0, 1.0, 1.0, 0.1).validate().is_err());
        assert!(GridSpec::new(1.0, 1.0, 0.1, 0.1, 0.1).validate().is_err());
    }

    #[test]
    fn lab_functions() {
        let eq = ExpSinEquation::new(GridSpec::new(1.0, 2.0, 4.0, 0.1, 0.1));
        assert_approx_eq!(f64, eq.initial_profile(0.0), 1.0);
        assert_approx_eq!(f64, eq.initial_profile(2.0), -1.0, epsilon = 1e-15);
        assert_approx_eq!(f64, eq.boundary_profile(0.0), 1.0);
        assert_approx_eq!(f64, eq.boundary_profile(4.0), (-1.0f64).exp());
        assert_approx_eq!(f64, eq.source(0.0, 3.0), 1.0);
        assert_approx_eq!(f64, eq.source(2.0, 4.0), 1.0f64.sin().exp());
    }
}
