use glam::Vec3;

use crate::constants::{MAX_AXIS_CELLS, MIN_AXIS_CELLS};
use crate::rng::RandomSource;

/// Cell counts along each axis, drawn once at startup and fixed for the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    pub count_x: u32,
    pub count_y: u32,
    pub count_z: u32,
}

/// One lattice cell: its mask index and raw loop coordinates.
///
/// Coordinates start at `-count/2` and step by one, so odd counts land on
/// half-integers. Renderers recover the centered position with
/// [`GridSpec::position`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GridSpec {
    /// Draw the three axis counts, each independently in
    /// [`MIN_AXIS_CELLS`, `MAX_AXIS_CELLS`].
    pub fn generate(rng: &mut RandomSource) -> Self {
        let count_x = rng.int_in_range(MIN_AXIS_CELLS, MAX_AXIS_CELLS);
        let count_y = rng.int_in_range(MIN_AXIS_CELLS, MAX_AXIS_CELLS);
        let count_z = rng.int_in_range(MIN_AXIS_CELLS, MAX_AXIS_CELLS);
        Self {
            count_x,
            count_y,
            count_z,
        }
    }

    #[inline]
    pub fn total(&self) -> usize {
        (self.count_x * self.count_y * self.count_z) as usize
    }

    /// Decompose a mask index; `z` varies slowest, `x` fastest.
    pub fn cell(&self, index: usize) -> Cell {
        debug_assert!(index < self.total());
        let cx = self.count_x as usize;
        let cy = self.count_y as usize;
        let ix = index % cx;
        let iy = (index / cx) % cy;
        let iz = index / (cx * cy);
        Cell {
            index,
            x: ix as f64 - self.count_x as f64 / 2.0,
            y: iy as f64 - self.count_y as f64 / 2.0,
            z: iz as f64 - self.count_z as f64 / 2.0,
        }
    }

    /// Every cell in mask order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let spec = *self;
        (0..spec.total()).map(move |i| spec.cell(i))
    }

    /// Centered world-space position of a cell (half-cell offset per axis).
    pub fn position(&self, index: usize) -> Vec3 {
        let c = self.cell(index);
        Vec3::new((c.x + 0.5) as f32, (c.y + 0.5) as f32, (c.z + 0.5) as f32)
    }
}
