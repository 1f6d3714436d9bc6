//! The reassembled solution and its text format.
//!
//! ```text
//! X:   <X>
//! h:   <h>
//! T:   <T>
//! tau: <tau>
//! M:   <M>
//! K:   <K>
//! <u[0][0]>
//! <u[0][1]>
//! ...
//! ```
//!
//! followed by `M * K` values, row-major over (time row, space column).

use crate::domain::*;
use crate::equation::*;
use crate::error::*;
use crate::orientation::*;
use nalgebra::DMatrix;
use std::io::Write;

/// True `K x M` grid, time rows by space columns, padding removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    grid: GridSpec,
    orientation: Orientation,
    values: DMatrix<f64>,
}

impl Solution {
    /// Reads the padded stored grid through the layout, transposing back
    /// when the marching axis was space.
    pub fn from_grid<G: GridView>(layout: &Layout, full: &G) -> Self {
        let grid = *layout.grid();
        let values = DMatrix::from_fn(grid.time_steps(), grid.space_points(), |k, m| {
            let (row, col) = layout.stored_index(k, m);
            full.view(row, col)
        });
        Solution {
            grid,
            orientation: layout.orientation(),
            values,
        }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Orientation the grid was computed in.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn time_steps(&self) -> usize {
        self.values.nrows()
    }

    pub fn space_points(&self) -> usize {
        self.values.ncols()
    }

    pub fn value(&self, time_row: usize, space_col: usize) -> f64 {
        self.values[(time_row, space_col)]
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Values in serialization order.
    pub fn row_major(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.time_steps())
            .flat_map(move |k| (0..self.space_points()).map(move |m| self.value(k, m)))
    }

    pub fn write<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "X:   {}", self.grid.x_extent)?;
        writeln!(out, "h:   {}", self.grid.h)?;
        writeln!(out, "T:   {}", self.grid.t_horizon)?;
        writeln!(out, "tau: {}", self.grid.tau)?;
        writeln!(out, "M:   {}", self.space_points())?;
        writeln!(out, "K:   {}", self.time_steps())?;
        for value in self.row_major() {
            writeln!(out, "{value}")?;
        }
        Ok(())
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: &P) -> Result<()> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "writing solution");
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            crate::util::ensure_dir_exists(&parent)?;
        }
        let mut output = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write(&mut output)?;
        output.flush()?;
        Ok(())
    }

    /// Largest absolute difference to another solution of the same shape.
    pub fn max_abs_diff(&self, other: &Solution) -> f64 {
        debug_assert_eq!(self.values.shape(), other.values.shape());
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
