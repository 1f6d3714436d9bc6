//! Wavefront solver for one rank of the ring.
//!
//! Rank `r` can compute row `k + 1` only after rank `r - 1` handed over the
//! last column of row `k`, which gives a diagonal front moving through the
//! (rank, row) plane. Each rank sends its own boundary value before waiting
//! on the left neighbour, so the right neighbour's wait overlaps with this
//! rank's computation of the row.

use crate::decomposition::*;
use crate::domain::*;
use crate::equation::*;
use crate::error::*;
use crate::orientation::*;
use crate::solution::*;
use crate::stencil::*;
use crate::transport::*;

pub struct RingSolver<'a, E: Equation + ?Sized, T: Transport> {
    equation: &'a E,
    transport: T,
    layout: Layout,
    topology: RingTopology,
    decomposition: Decomposition,
    stencil: MarchStencil,
    local: LocalGrid,
    root: RootView,
}

impl<'a, E: Equation + ?Sized, T: Transport> RingSolver<'a, E, T> {
    /// Selects the orientation, decomposes the distributed axis and
    /// allocates every buffer this rank will use.
    pub fn new(equation: &'a E, transport: T) -> Result<Self> {
        let grid = *equation.grid();
        grid.validate()?;

        let (rank, size) = (transport.rank(), transport.size());
        let layout = Layout::new(grid);
        let decomposition = Decomposition::new(layout.parallel_axis_size(), size, rank)?;
        let topology = RingTopology::new(rank, size);

        if topology.is_root() {
            tracing::info!(
                orientation = %layout.orientation(),
                pace = %layout.pace(),
                courant = grid.courant(),
                ranks = size,
                "selected marching axis"
            );
        }
        tracing::debug!(
            rank,
            start = decomposition.start,
            part = decomposition.part,
            padded = decomposition.padded,
            "decomposed"
        );

        let rows = layout.sequential_axis_size();
        let stencil = MarchStencil::new(
            layout.coefficients(),
            layout.sequential_step(),
            layout.parallel_step(),
        );

        Ok(RingSolver {
            equation,
            transport,
            layout,
            topology,
            decomposition,
            stencil,
            local: LocalGrid::new(rows, decomposition.part),
            root: RootView::new(rank, size, rows, decomposition.padded),
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn local(&self) -> &LocalGrid {
        &self.local
    }

    /// Row 0 from the distributed-axis profile, plus column 0 from the
    /// marching-axis profile on the root. Row 0 wins at the corner.
    pub fn fill_initial_conditions(&mut self) {
        profiling::scope!("ring: initial conditions");
        let st = self.layout.sequential_step();
        let pt = self.layout.parallel_step();
        let start = self.decomposition.start;

        if self.topology.is_root() {
            for k in 0..self.local.rows() {
                let value = self.layout.sequential_profile(self.equation, st * k as f64);
                self.local.set(k, 0, value);
            }
        }

        for i in 0..self.decomposition.part {
            let value = self
                .layout
                .parallel_profile(self.equation, pt * (start + i) as f64);
            self.local.set(0, i, value);
        }
    }

    /// Row 1, marching left to right across the whole ring with the corner
    /// stencil. Needs `[row1, row0]` of the left neighbour's last column.
    pub fn fill_first_row(&mut self) -> Result<()> {
        profiling::scope!("ring: first row");
        let rank = self.topology.rank();
        let part = self.decomposition.part;
        let start = self.decomposition.start;
        let st = self.layout.sequential_step();
        let pt = self.layout.parallel_step();

        let mut boundary = [0.0; 2];
        if let Some(left) = self.topology.left() {
            self.transport
                .recv(left, Tag::FirstRow, &mut boundary)
                .map_err(SolverError::transport(rank))?;
        }

        let first = usize::from(self.topology.is_root());
        let sequential = 1.5 * st;
        let (row0, row1) = self.local.split_rows_mut(1);
        for m in first..part {
            let (up, down) = if m == 0 {
                (boundary[0], boundary[1])
            } else {
                (row1[m - 1], row0[m - 1])
            };
            let parallel = ((start + m) as f64 + 0.5) * pt;
            let source = self.layout.source(self.equation, sequential, parallel);
            row1[m] = self.stencil.corner(source, up, down, row0[m]);
        }

        if let Some(right) = self.topology.right() {
            let last = part - 1;
            self.transport
                .send(right, Tag::FirstRow, &[row1[last], row0[last]])
                .map_err(SolverError::transport(rank))?;
        }
        tracing::trace!(rank, "first row done");
        Ok(())
    }

    /// Rows 2 and up. Interior columns use the cross stencil, the last
    /// column has no right neighbour on this rank and uses the corner one.
    pub fn fill_remaining_rows(&mut self) -> Result<()> {
        profiling::scope!("ring: remaining rows");
        let rank = self.topology.rank();
        let part = self.decomposition.part;
        let start = self.decomposition.start;
        let st = self.layout.sequential_step();
        let pt = self.layout.parallel_step();
        let first = usize::from(self.topology.is_root());
        let last = part - 1;
        let rows = self.local.rows();

        for k in 1..rows - 1 {
            let (older, current, next) = self.local.split_three_rows_mut(k + 1);

            if let Some(right) = self.topology.right() {
                self.transport
                    .send(right, Tag::Row(k), &current[last..])
                    .map_err(SolverError::transport(rank))?;
            }

            let mut received = [0.0];
            if let Some(left) = self.topology.left() {
                self.transport
                    .recv(left, Tag::Row(k), &mut received)
                    .map_err(SolverError::transport(rank))?;
            }

            let sequential = k as f64 * st;
            for m in first..last {
                let left = if m == 0 { received[0] } else { current[m - 1] };
                let parallel = (start + m) as f64 * pt;
                let source = self.layout.source(self.equation, sequential, parallel);
                next[m] = self.stencil.cross(source, older[m], current[m + 1], left);
            }

            let sequential = (k as f64 + 0.5) * st;
            let parallel = ((start + last) as f64 + 0.5) * pt;
            let source = self.layout.source(self.equation, sequential, parallel);
            next[last] = self
                .stencil
                .corner(source, next[last - 1], current[last - 1], current[last]);
        }
        tracing::trace!(rank, rows, "remaining rows done");
        Ok(())
    }

    /// One collective gather per row into the root buffer.
    /// Nothing to do on a single rank, the root view aliases the local grid.
    pub fn gather(&mut self) -> Result<()> {
        if self.topology.size() == 1 {
            return Ok(());
        }
        profiling::scope!("ring: gather");
        let rank = self.topology.rank();
        let padded = self.decomposition.padded;
        for k in 0..self.local.rows() {
            let out = self.root.gather_row_mut(k, padded);
            self.transport
                .gather(0, self.local.row(k), out)
                .map_err(SolverError::transport(rank))?;
        }
        Ok(())
    }

    /// The clipped true grid, only on the root.
    pub fn solution(&self) -> Option<Solution> {
        self.root
            .resolve(&self.local, self.decomposition.padded)
            .map(|full| Solution::from_grid(&self.layout, &full))
    }

    /// All phases in order.
    pub fn run(&mut self) -> Result<Option<Solution>> {
        self.fill_initial_conditions();
        self.fill_first_row()?;
        self.fill_remaining_rows()?;
        self.gather()?;
        Ok(self.solution())
    }
}
