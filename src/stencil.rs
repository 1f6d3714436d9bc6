//! Finite difference stencils of the marching scheme.
//!
//! Rows are indexed along the marching (sequential) axis, columns along the
//! distributed (parallel) axis. Both stencils solve the discretized equation
//! for the single unknown value in the next row.

/// Factor multiplying the derivative along each axis.
/// `(1, a)` in direct orientation, `(a, 1)` in inversed orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCoefficients {
    pub sequential: f64,
    pub parallel: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchStencil {
    coefficients: AxisCoefficients,
    sequential_step: f64,
    parallel_step: f64,
}

impl MarchStencil {
    pub fn new(
        coefficients: AxisCoefficients,
        sequential_step: f64,
        parallel_step: f64,
    ) -> Self {
        MarchStencil {
            coefficients,
            sequential_step,
            parallel_step,
        }
    }

    /// Four point box stencil centred between two rows and two columns.
    ///
    /// `up` and `down` are the left column in the next and current row,
    /// `here` is the current row in the target column, `source` is the
    /// right hand side at the cell centre.
    pub fn corner(&self, source: f64, up: f64, down: f64, here: f64) -> f64 {
        let cs = self.coefficients.sequential;
        let cp = self.coefficients.parallel;
        let st = self.sequential_step;
        let pt = self.parallel_step;

        let first_part = (up - down - here) / (2.0 * st);
        let second_part = (-up - down + here) / (2.0 * pt);

        (source - cs * first_part - cp * second_part) * 2.0 / (cs / st + cp / pt)
    }

    /// Three point cross stencil, central differences on both axes.
    ///
    /// `below` is two rows back in the target column, `right` and `left` are
    /// the neighbours in the current row.
    pub fn cross(&self, source: f64, below: f64, right: f64, left: f64) -> f64 {
        let cs = self.coefficients.sequential;
        let cp = self.coefficients.parallel;
        let st = self.sequential_step;
        let pt = self.parallel_step;

        let first_part = (-below) / (2.0 * st);
        let second_part = (right - left) / (2.0 * pt);

        (source - cs * first_part - cp * second_part) * 2.0 * st / cs
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn direct(a: f64, tau: f64, h: f64) -> MarchStencil {
        MarchStencil::new(
            AxisCoefficients {
                sequential: 1.0,
                parallel: a,
            },
            tau,
            h,
        )
    }

    #[test]
    fn corner_satisfies_box_scheme() {
        let (a, tau, h) = (0.7, 0.01, 0.05);
        let s = direct(a, tau, h);
        let (up, down, here, f) = (0.3, 0.25, 0.4, 1.2);
        let next = s.corner(f, up, down, here);

        // (u_t) + a (u_x) at the cell centre
        let u_t = (next - here + up - down) / (2.0 * tau);
        let u_x = (next - up + here - down) / (2.0 * h);
        assert_approx_eq!(f64, u_t + a * u_x, f, epsilon = 1e-12);
    }

    #[test]
    fn cross_satisfies_leapfrog_scheme() {
        let (a, tau, h) = (0.7, 0.01, 0.05);
        let s = direct(a, tau, h);
        let (below, right, left, f) = (0.3, 0.5, 0.1, 1.2);
        let next = s.cross(f, below, right, left);

        let u_t = (next - below) / (2.0 * tau);
        let u_x = (right - left) / (2.0 * h);
        assert_approx_eq!(f64, u_t + a * u_x, f, epsilon = 1e-12);
    }

    #[test]
    fn inversed_puts_speed_on_marching_axis() {
        let (a, h, tau) = (2.5, 0.01, 0.05);
        let s = MarchStencil::new(
            AxisCoefficients {
                sequential: a,
                parallel: 1.0,
            },
            h,
            tau,
        );
        let (below, right, left, f) = (0.3, 0.5, 0.1, 1.2);
        let next = s.cross(f, below, right, left);

        // rows are space, columns are time
        let u_x = (next - below) / (2.0 * h);
        let u_t = (right - left) / (2.0 * tau);
        assert_approx_eq!(f64, u_t + a * u_x, f, epsilon = 1e-12);

        let expected = (f - a * (-below / (2.0 * h)) - (right - left) / (2.0 * tau))
            * 2.0
            * h
            / a;
        assert_eq!(next, expected);
    }

    #[test]
    fn direct_matches_closed_form() {
        let (a, tau, h) = (1.0, 0.001, 0.005);
        let s = direct(a, tau, h);
        let (up, down, here, f) = (0.9, 0.8, 0.7, 1.1);
        let first = (up - down - here) / (2.0 * tau);
        let second = (-up - down + here) / (2.0 * h);
        let expected = (f - first - a * second) * 2.0 / (1.0 / tau + a / h);
        assert_eq!(s.corner(f, up, down, here), expected);
    }
}
