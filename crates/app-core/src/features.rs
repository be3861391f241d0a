use std::fmt;

use crate::grid::GridSpec;
use crate::palette::{Color, Instrument, Palette};

/// Startup traits of one run, fixed before the first interaction. Frontends
/// publish this record once (gallery metadata, logs).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureRecord {
    pub instrument: Instrument,
    pub x_row_count: u32,
    pub y_row_count: u32,
    pub z_row_count: u32,
    pub bg_color: Color,
    pub primary_color: Color,
    pub secondary_color: Color,
}

impl FeatureRecord {
    pub fn new(grid: &GridSpec, palette: &Palette) -> Self {
        Self {
            instrument: palette.instrument,
            x_row_count: grid.count_x,
            y_row_count: grid.count_y,
            z_row_count: grid.count_z,
            bg_color: palette.background,
            primary_color: palette.primary,
            secondary_color: palette.secondary,
        }
    }
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "instrument={} rows={}x{}x{} bg={} primary={} secondary={}",
            self.instrument,
            self.x_row_count,
            self.y_row_count,
            self.z_row_count,
            self.bg_color,
            self.primary_color,
            self.secondary_color
        )
    }
}
