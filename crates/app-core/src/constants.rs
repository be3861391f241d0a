use crate::palette::{Color, Instrument};

// Shared tuning constants for the lattice, the pattern band and presentation.

// Grid extents (cells per axis, drawn independently at startup)
pub const MIN_AXIS_CELLS: u32 = 4;
pub const MAX_AXIS_CELLS: u32 = 7;
pub const MIN_TOTAL_CELLS: usize = 64; // 4 * 4 * 4
pub const MAX_TOTAL_CELLS: usize = 343; // 7 * 7 * 7

// Pattern band
pub const BAND_CENTER: f64 = 1.5; // three noise samples centered on 0.5 each
pub const BAND_THRESHOLD_BASE: f64 = 0.05; // minimum acceptance half-width
pub const BAND_THRESHOLD_SPREAD: f64 = 0.05; // extra half-width per unit draw
pub const TIME_PHASE_SPREAD: f64 = 60.0; // time stretch per unit draw
pub const MIN_ACTIVE_CELLS: usize = 15; // primary-layer density floor
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000; // redraws before generation gives up

// Palette draws
pub const ENV_MAP_INTENSITY_MIN: f64 = 0.5;
pub const ENV_MAP_INTENSITY_MAX: f64 = 1.0;
pub const AMBIENT_LIGHT_MIN: f64 = 0.0;
pub const AMBIENT_LIGHT_MAX: f64 = 0.5;
pub const THEME_WEIGHT_FACTOR: usize = 3; // per-cell colors favor the layer theme 3:1

// Presentation
pub const ZOOM_AT_MIN_TOTAL: f32 = 55.0; // orthographic zoom for the smallest lattice
pub const ZOOM_AT_MAX_TOTAL: f32 = 35.0; // orthographic zoom for the largest lattice
pub const SECONDARY_LAYER_SCALE: f32 = 0.25; // nested-layer cube size
pub const CUBE_CORNER_RADIUS: f32 = 0.075; // rounded-box edge radius per unit cube
pub const GROUP_TILT: f32 = std::f32::consts::FRAC_PI_4; // static x/y tilt of the lattice
pub const GROUP_SCALE_LERP_RATE: f32 = 0.02; // breathing-scale chase rate
pub const ROTATION_LERP_RATE: f32 = 0.1; // rotation-target chase rate

// Background palette (muted; one is drawn per run)
pub const BACKGROUND_COLORS: &[Color] = &[
    Color(0x101019),
    Color(0x1d1d2c),
    Color(0x27203b),
    Color(0x20303c),
    Color(0xe8dfd3),
    Color(0xf2ede4),
];

// Cube palette (layer themes and the shared per-cell pool)
pub const CUBE_COLORS: &[Color] = &[
    Color(0xff4e00),
    Color(0xff8500),
    Color(0xffb600),
    Color(0xffd60a),
    Color(0x8ea604),
    Color(0x2ec4b6),
    Color(0x00b4d8),
    Color(0x4361ee),
    Color(0x7209b7),
    Color(0xb5179e),
    Color(0xf72585),
    Color(0xd80fe7),
];

pub const INSTRUMENTS: &[Instrument] = &[
    Instrument::Harp,
    Instrument::MusicBox,
    Instrument::Strings,
    Instrument::Choir,
];

// Chord sample banks; plucked instruments share one set of recordings,
// sustained instruments the other.
pub const PLUCKED_SAMPLES: &[&str] = &["cmaj9", "dmin11", "emin7", "fmaj7", "gadd9", "amin9"];
pub const SUSTAINED_SAMPLES: &[&str] = &["cmaj9", "dmin11", "emin7", "fmaj7", "gadd9", "amin9"];
