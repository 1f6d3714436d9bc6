//! Single threaded reference for the ring solver.
//!
//! Works on the full padded grid with global column indices. The block
//! width only decides which columns use the corner stencil, so running
//! it with the ring size reproduces what the ring computes.

use crate::decomposition::*;
use crate::domain::*;
use crate::equation::*;
use crate::error::*;
use crate::orientation::*;
use crate::solution::*;
use crate::stencil::*;

pub fn solve_sequential<E: Equation + ?Sized>(equation: &E, ranks: usize) -> Result<Solution> {
    let grid = *equation.grid();
    grid.validate()?;
    let layout = Layout::new(grid);
    let decomposition = Decomposition::new(layout.parallel_axis_size(), ranks, 0)?;
    let part = decomposition.part;
    let width = decomposition.padded;
    let rows = layout.sequential_axis_size();
    let st = layout.sequential_step();
    let pt = layout.parallel_step();
    let stencil = MarchStencil::new(layout.coefficients(), st, pt);

    let mut u = LocalGrid::new(rows, width);

    for k in 0..rows {
        u.set(k, 0, layout.sequential_profile(equation, st * k as f64));
    }
    for c in 0..width {
        u.set(0, c, layout.parallel_profile(equation, pt * c as f64));
    }

    for c in 1..width {
        let source = layout.source(equation, 1.5 * st, (c as f64 + 0.5) * pt);
        let value = stencil.corner(source, u.view(1, c - 1), u.view(0, c - 1), u.view(0, c));
        u.set(1, c, value);
    }

    for k in 1..rows - 1 {
        for c in 1..width {
            let value = if c % part == part - 1 {
                let source =
                    layout.source(equation, (k as f64 + 0.5) * st, (c as f64 + 0.5) * pt);
                stencil.corner(
                    source,
                    u.view(k + 1, c - 1),
                    u.view(k, c - 1),
                    u.view(k, c),
                )
            } else {
                let source = layout.source(equation, k as f64 * st, c as f64 * pt);
                stencil.cross(
                    source,
                    u.view(k - 1, c),
                    u.view(k, c + 1),
                    u.view(k, c - 1),
                )
            };
            u.set(k + 1, c, value);
        }
    }

    Ok(Solution::from_grid(&layout, &u))
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn constant_solution_without_source() {
        // u = 1 solves u_t + a u_x = 0 with phi = psi = 1
        struct Flat(GridSpec);
        impl Equation for Flat {
            fn grid(&self) -> &GridSpec {
                &self.0
            }
            fn source(&self, _x: f64, _t: f64) -> f64 {
                0.0
            }
            fn initial_profile(&self, _x: f64) -> f64 {
                1.0
            }
            fn boundary_profile(&self, _t: f64) -> f64 {
                1.0
            }
        }

        for (h, tau) in [(0.1, 0.05), (0.05, 0.1)] {
            let eq = Flat(GridSpec::new(1.0, 1.0, 1.0, h, tau));
            for ranks in [1, 2, 3] {
                let s = solve_sequential(&eq, ranks).unwrap();
                for v in s.row_major() {
                    assert_approx_eq!(f64, v, 1.0, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn linear_profile_is_transported() {
        // u = x - a t solves u_t + a u_x = 0 and both stencils are exact on it
        struct Ramp(GridSpec);
        impl Equation for Ramp {
            fn grid(&self) -> &GridSpec {
                &self.0
            }
            fn source(&self, _x: f64, _t: f64) -> f64 {
                0.0
            }
            fn initial_profile(&self, x: f64) -> f64 {
                x
            }
            fn boundary_profile(&self, t: f64) -> f64 {
                -self.0.a * t
            }
        }

        let grid = GridSpec::new(0.5, 1.0, 1.0, 0.1, 0.05);
        let s = solve_sequential(&Ramp(grid), 2).unwrap();
        for k in 0..s.time_steps() {
            for m in 0..s.space_points() {
                let expected = m as f64 * grid.h - grid.a * k as f64 * grid.tau;
                assert_approx_eq!(f64, s.value(k, m), expected, epsilon = 1e-9);
            }
        }
    }
}
