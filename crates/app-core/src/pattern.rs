//! Per-cell band classification and rejection-sampled mask generation.
//!
//! Each layer samples a warped copy of one noise field three times per cell
//! (the cyclic rotations of its coordinates) and keeps cells whose summed
//! value lands inside a narrow band around 1.5. A whole pair of layers is
//! redrawn until the primary layer is dense enough.

use thiserror::Error;

use crate::constants::{
    BAND_CENTER, BAND_THRESHOLD_BASE, BAND_THRESHOLD_SPREAD, DEFAULT_MAX_ATTEMPTS,
    MIN_ACTIVE_CELLS, TIME_PHASE_SPREAD,
};
use crate::grid::GridSpec;
use crate::noise_field::NoiseField3;
use crate::rng::RandomSource;

/// Per-cell visibility for one layer, in grid mask order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityMask {
    cells: Vec<u8>,
}

impl VisibilityMask {
    fn from_cells(cells: Vec<u8>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn is_active(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(0) == 1
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Scale target a renderer lerps each cell toward (1 visible, 0 hidden).
    #[inline]
    pub fn scale_target(&self, index: usize) -> f32 {
        if self.is_active(index) {
            1.0
        } else {
            0.0
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

/// The two independently classified layers of one generation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerMasks {
    pub primary: VisibilityMask,
    pub secondary: VisibilityMask,
}

#[derive(Clone, Copy, Debug)]
pub struct GeneratorParams {
    /// Active cells required of the primary layer.
    pub min_active: usize,
    /// Redraw attempts before generation gives up.
    pub max_attempts: u32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            min_active: MIN_ACTIVE_CELLS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("no mask with {min_active} active cells after {attempts} attempts")]
    RetryLimit { attempts: u32, min_active: usize },
}

pub struct PatternGenerator<F: NoiseField3> {
    grid: GridSpec,
    field: F,
    params: GeneratorParams,
}

impl<F: NoiseField3> PatternGenerator<F> {
    pub fn new(grid: GridSpec, field: F, params: GeneratorParams) -> Self {
        Self {
            grid,
            field,
            params,
        }
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Classify every cell of one layer at a fixed time phase.
    ///
    /// `scale_threshold` stretches the sampling coordinates (the nested layer
    /// passes `band_threshold + 1`, which is what thins it out);
    /// `band_threshold` is the half-width of the acceptance band itself.
    /// Both band comparisons are strict, so a sum exactly on an edge is
    /// inactive.
    pub fn layer_mask(
        &self,
        time_phase: f64,
        scale_threshold: f64,
        band_threshold: f64,
    ) -> VisibilityMask {
        let half_x = f64::from(self.grid.count_x) / 2.0;
        let half_y = f64::from(self.grid.count_y) / 2.0;
        let half_z = f64::from(self.grid.count_z) / 2.0;
        let lo = BAND_CENTER - band_threshold;
        let hi = BAND_CENTER + band_threshold;

        // First argument is always normalized by the z extent, second by y,
        // third by x, regardless of which coordinate is passed where.
        let warp = |v: f64, half: f64| ((v + 0.5) / half * time_phase * scale_threshold).abs();
        let sample = |a: f64, b: f64, c: f64| {
            self.field
                .sample(warp(a, half_z), warp(b, half_y), warp(c, half_x))
        };

        let mut cells = Vec::with_capacity(self.grid.total());
        for cell in self.grid.cells() {
            let (x, y, z) = (cell.x, cell.y, cell.z);
            let combined = sample(x, y, z) + sample(y, z, x) + sample(z, x, y);
            cells.push(u8::from(combined > lo && combined < hi));
        }
        VisibilityMask::from_cells(cells)
    }

    /// Generate the mask pair for one interaction.
    ///
    /// `elapsed_secs` comes from the caller's clock and is read once for the
    /// whole pass. Each attempt draws a fresh time stretch and band width per
    /// layer; when the primary layer misses the density floor, both layers
    /// are discarded and redrawn together.
    pub fn generate_pair(
        &self,
        rng: &mut RandomSource,
        elapsed_secs: f64,
    ) -> Result<LayerMasks, PatternError> {
        for attempt in 1..=self.params.max_attempts {
            let primary = self.draw_layer(rng, elapsed_secs, 0);
            let secondary = self.draw_layer(rng, elapsed_secs, 1);
            if primary.active_count() >= self.params.min_active {
                if attempt > 1 {
                    log::debug!("mask pair converged after {attempt} attempts");
                }
                return Ok(LayerMasks { primary, secondary });
            }
        }
        Err(PatternError::RetryLimit {
            attempts: self.params.max_attempts,
            min_active: self.params.min_active,
        })
    }

    fn draw_layer(&self, rng: &mut RandomSource, elapsed_secs: f64, layer: u32) -> VisibilityMask {
        let time_phase = elapsed_secs * (1.0 + TIME_PHASE_SPREAD * rng.unit());
        let band_threshold = BAND_THRESHOLD_BASE + BAND_THRESHOLD_SPREAD * rng.unit();
        self.layer_mask(time_phase, band_threshold + f64::from(layer), band_threshold)
    }
}
