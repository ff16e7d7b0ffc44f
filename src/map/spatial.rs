use glam::DVec2;
use std::collections::HashMap;

/// Spatial index over feature bounding boxes in canvas pixels.
/// Each feature is inserted into every cell its bbox overlaps, so a point
/// query never misses a feature but may return extras that the caller
/// weeds out with an exact point-in-polygon test.
pub struct FeatureGrid {
    cells: HashMap<(i32, i32), Vec<usize>>,
    cell_size: f64,
}

impl FeatureGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cells: HashMap::new(),
            cell_size,
        }
    }

    #[inline(always)]
    fn to_cell(&self, p: DVec2) -> (i32, i32) {
        let x = (p.x / self.cell_size).floor() as i32;
        let y = (p.y / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Build from `(index, min, max)` boxes; boxes with NaN corners are skipped
    pub fn build(bboxes: impl Iterator<Item = (usize, DVec2, DVec2)>, cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, min, max) in bboxes {
            if !(min.is_finite() && max.is_finite()) {
                continue;
            }
            let min_cell = grid.to_cell(min);
            let max_cell = grid.to_cell(max);
            for y in min_cell.1..=max_cell.1 {
                for x in min_cell.0..=max_cell.0 {
                    grid.cells.entry((x, y)).or_default().push(idx);
                }
            }
        }
        grid
    }

    /// Feature indices whose bbox cell covers `p`, in insertion order
    pub fn query_point(&self, p: DVec2) -> &[usize] {
        if !p.is_finite() {
            return &[];
        }
        self.cells.get(&self.to_cell(p)).map(Vec::as_slice).unwrap_or(&[])
    }
}
