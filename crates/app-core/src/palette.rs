//! Startup palette: colors, instrument and lighting levels drawn once per
//! run and immutable afterwards.

use std::fmt;

use thiserror::Error;

use crate::constants::{
    AMBIENT_LIGHT_MAX, AMBIENT_LIGHT_MIN, BACKGROUND_COLORS, CUBE_COLORS, ENV_MAP_INTENSITY_MAX,
    ENV_MAP_INTENSITY_MIN, INSTRUMENTS, PLUCKED_SAMPLES, SUSTAINED_SAMPLES, THEME_WEIGHT_FACTOR,
};
use crate::rng::RandomSource;

/// 24-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub fn rgb_f32(&self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }

    pub fn rgba_f32(&self, alpha: f32) -> [f32; 4] {
        let [r, g, b] = self.rgb_f32();
        [r, g, b, alpha]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleBank {
    Plucked,
    Sustained,
}

impl SampleBank {
    pub fn samples(&self) -> &'static [&'static str] {
        match self {
            SampleBank::Plucked => PLUCKED_SAMPLES,
            SampleBank::Sustained => SUSTAINED_SAMPLES,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instrument {
    Harp,
    MusicBox,
    Strings,
    Choir,
}

impl Instrument {
    /// Plucked instruments share one chord bank, sustained ones the other.
    pub fn bank(&self) -> SampleBank {
        match self {
            Instrument::Harp | Instrument::MusicBox => SampleBank::Plucked,
            Instrument::Strings | Instrument::Choir => SampleBank::Sustained,
        }
    }

    /// Fixed sampler trigger note (MIDI, C-1 = 0).
    pub fn trigger_midi(&self) -> u8 {
        match self {
            Instrument::MusicBox => 8, // G#-1
            _ => 1,                    // C#-1
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Instrument::Harp => "harp",
            Instrument::MusicBox => "music-box",
            Instrument::Strings => "strings",
            Instrument::Choir => "choir",
        };
        f.write_str(name)
    }
}

/// Startup table problems; all of these are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("background color table is empty")]
    NoBackgroundColors,
    #[error("cube color table is empty")]
    NoCubeColors,
    #[error("instrument table is empty")]
    NoInstruments,
    #[error("sample bank for {0} is empty")]
    EmptySampleBank(Instrument),
}

/// Tables the palette draws from. `default()` wires up the built-in sets
/// from [`crate::constants`].
#[derive(Clone, Copy, Debug)]
pub struct PaletteTables<'a> {
    pub backgrounds: &'a [Color],
    pub cube_colors: &'a [Color],
    pub instruments: &'a [Instrument],
}

impl Default for PaletteTables<'static> {
    fn default() -> Self {
        Self {
            backgrounds: BACKGROUND_COLORS,
            cube_colors: CUBE_COLORS,
            instruments: INSTRUMENTS,
        }
    }
}

/// Colors, instrument and lighting levels for one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
    pub instrument: Instrument,
    pub env_map_intensity: f32,
    pub ambient_light: f32,
}

impl Palette {
    /// Draw a palette. The draw order (instrument, lighting levels, then the
    /// three colors) is fixed; reordering it changes what a seed produces.
    pub fn generate(rng: &mut RandomSource, tables: &PaletteTables) -> Result<Self, ConfigError> {
        let instrument = *rng
            .pick(tables.instruments)
            .ok_or(ConfigError::NoInstruments)?;
        if instrument.bank().samples().is_empty() {
            return Err(ConfigError::EmptySampleBank(instrument));
        }
        let env_map_intensity =
            rng.decimal_in_range(ENV_MAP_INTENSITY_MIN, ENV_MAP_INTENSITY_MAX) as f32;
        let ambient_light = rng.decimal_in_range(AMBIENT_LIGHT_MIN, AMBIENT_LIGHT_MAX) as f32;
        let background = *rng
            .pick(tables.backgrounds)
            .ok_or(ConfigError::NoBackgroundColors)?;
        let primary = *rng
            .pick(tables.cube_colors)
            .ok_or(ConfigError::NoCubeColors)?;
        let secondary = *rng
            .pick(tables.cube_colors)
            .ok_or(ConfigError::NoCubeColors)?;
        Ok(Self {
            background,
            primary,
            secondary,
            instrument,
            env_map_intensity,
            ambient_light,
        })
    }
}

/// One color per cell, favoring the layer theme over the shared pool.
pub fn draw_cell_colors(
    rng: &mut RandomSource,
    theme: Color,
    pool: &[Color],
    total: usize,
) -> Vec<Color> {
    let weight = pool.len() * THEME_WEIGHT_FACTOR;
    (0..total)
        .map(|_| *rng.pick_with_theme(&theme, pool, weight))
        .collect()
}
