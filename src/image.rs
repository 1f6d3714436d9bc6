use crate::error::*;
use crate::solution::*;

/// Renders the solution with the TURBO gradient, x along the width and
/// t along the height, the earliest time row at the top.
/// Values are scaled to the grid's own min..max range.
pub fn heatmap(solution: &Solution) -> image::RgbImage {
    let width = solution.space_points() as u32;
    let height = solution.time_steps() as u32;
    let values = solution.values();
    let min = values.min();
    let max = values.max();
    let range = if max > min { max - min } else { 1.0 };

    let gradient = colorous::TURBO;
    let mut img = image::RgbImage::new(width, height);
    for t in 0..height {
        for x in 0..width {
            let r = (solution.value(t as usize, x as usize) - min) / range;
            let c = gradient.eval_continuous(r);
            img.put_pixel(x, t, image::Rgb(c.as_array()));
        }
    }
    img
}

pub fn write_heatmap<F: AsRef<std::path::Path>>(solution: &Solution, s: &F) -> Result<()> {
    let path = s.as_ref();
    tracing::info!(path = %path.display(), "writing heatmap");
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::util::ensure_dir_exists(&parent)?;
    }
    heatmap(solution).save(path)?;
    Ok(())
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::domain::*;
    use crate::equation::*;
    use crate::orientation::*;

    #[test]
    fn extremes_map_to_gradient_ends() {
        let grid = GridSpec::new(0.5, 2.0, 2.0, 1.0, 1.0);
        let layout = Layout::with_orientation(grid, Orientation::Direct);
        let mut g = LocalGrid::new(2, 2);
        g.buffer_mut().copy_from_slice(&[0.0, 1.0, 2.0, 4.0]);
        let s = Solution::from_grid(&layout, &g);

        let img = heatmap(&s);
        assert_eq!(img.dimensions(), (2, 2));
        let low = colorous::TURBO.eval_continuous(0.0).as_array();
        let high = colorous::TURBO.eval_continuous(1.0).as_array();
        assert_eq!(img.get_pixel(0, 0).0, low);
        assert_eq!(img.get_pixel(1, 1).0, high);
    }

    #[test]
    fn flat_grid_does_not_divide_by_zero() {
        let grid = GridSpec::new(0.5, 2.0, 2.0, 1.0, 1.0);
        let layout = Layout::with_orientation(grid, Orientation::Direct);
        let mut g = LocalGrid::new(2, 2);
        g.buffer_mut().fill(3.0);
        let img = heatmap(&Solution::from_grid(&layout, &g));
        let low = colorous::TURBO.eval_continuous(0.0).as_array();
        assert!(img.pixels().all(|p| p.0 == low));
    }
}
