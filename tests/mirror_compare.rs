use float_cmp::assert_approx_eq;
use ringfd::equation::*;
use ringfd::orientation::*;
use ringfd::solver::*;

/// The same problem with the roles of x and t exchanged.
///
/// If `u` solves `u_t + a u_x = f` then `v(x, t) = u(t, x)` solves
/// `v_t + v_x / a = f(t, x) / a`, with the two profiles exchanged.
struct Mirrored<E> {
    inner: E,
    grid: GridSpec,
}

impl<E: Equation> Mirrored<E> {
    fn new(inner: E) -> Self {
        let g = *inner.grid();
        let grid = GridSpec::new(1.0 / g.a, g.t_horizon, g.x_extent, g.tau, g.h);
        Mirrored { inner, grid }
    }
}

impl<E: Equation> Equation for Mirrored<E> {
    fn grid(&self) -> &GridSpec {
        &self.grid
    }

    fn source(&self, x: f64, t: f64) -> f64 {
        self.inner.source(t, x) / self.inner.grid().a
    }

    fn initial_profile(&self, x: f64) -> f64 {
        self.inner.boundary_profile(x)
    }

    fn boundary_profile(&self, t: f64) -> f64 {
        self.inner.initial_profile(t)
    }
}

fn check_mirror(grid: GridSpec, ranks: usize, epsilon: f64) {
    let eq = ExpSinEquation::new(grid);
    let mirror = Mirrored::new(eq);
    assert_eq!(Orientation::select(eq.grid()), Orientation::Direct);
    assert_eq!(Orientation::select(mirror.grid()), Orientation::Inversed);

    let s = solve_local(&eq, ranks).unwrap().solution.unwrap();
    let t = solve_local(&mirror, ranks).unwrap().solution.unwrap();
    assert_eq!(s.time_steps(), t.space_points());
    assert_eq!(s.space_points(), t.time_steps());
    for k in 0..s.time_steps() {
        for m in 0..s.space_points() {
            assert_approx_eq!(f64, s.value(k, m), t.value(m, k), epsilon = epsilon);
        }
    }
}

#[test]
fn mirrored_problem_is_transposed() {
    // C = 0.8 here, 1.25 for the mirror
    let grid = GridSpec::new(1.0, 1.0, 2.0, 0.05, 0.04);
    assert_approx_eq!(f64, grid.courant(), 0.8, epsilon = 1e-12);
    for ranks in [1, 3, 4] {
        check_mirror(grid, ranks, 1e-12);
    }
}

#[test]
fn mirrored_problem_with_slow_wave() {
    let grid = GridSpec::new(0.5, 1.0, 2.0, 0.05, 0.04);
    check_mirror(grid, 2, 1e-9);
}
