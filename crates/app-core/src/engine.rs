//! Interaction state machine.
//!
//! Owns the run's one [`RandomSource`] and the current mask pair. Every
//! pointer interaction calls [`InteractionEngine::advance`], which bumps the
//! iteration, regenerates both layers and yields exactly one audio cue.
//! Frontends poll [`InteractionEngine::snapshot`] for a complete copy of the
//! mutable state; cross-thread use wraps the engine in a mutex so overlapping
//! interactions serialize.

use smallvec::SmallVec;
use thiserror::Error;

use crate::features::FeatureRecord;
use crate::grid::GridSpec;
use crate::noise_field::PerlinField3;
use crate::palette::{draw_cell_colors, Color, ConfigError, Palette, PaletteTables};
use crate::pattern::{GeneratorParams, LayerMasks, PatternError, PatternGenerator};
use crate::rng::RandomSource;

/// One sampler cue: which chord sample to fire and at which trigger note.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioCue {
    pub sample_index: usize,
    pub trigger_midi: u8,
}

/// Result of one interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub iteration: u64,
    pub cue: AudioCue,
}

/// Complete copy of the mutable engine state, cloned out for renderers.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub iteration: u64,
    pub masks: LayerMasks,
    pub last_cue: Option<usize>,
}

/// Playback boundary implemented by frontends.
///
/// `ensure_started` must be idempotent; adapters call it on a user gesture
/// before forwarding the first cue. `play` is fire-and-forget: the engine
/// never waits on playback.
pub trait AudioSink {
    fn ensure_started(&mut self) -> anyhow::Result<()>;
    fn play(&mut self, cue: AudioCue) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

pub struct InteractionEngine {
    rng: RandomSource,
    grid: GridSpec,
    palette: Palette,
    features: FeatureRecord,
    layer_colors: [Vec<Color>; 2],
    generator: PatternGenerator<PerlinField3>,
    iteration: u64,
    masks: LayerMasks,
    last_cue: Option<usize>,
}

impl InteractionEngine {
    /// Draw the whole startup state from one seed and run the initial
    /// generation pass (iteration 0, no cue).
    pub fn new(params: GeneratorParams, seed: u64) -> Result<Self, EngineError> {
        let mut rng = RandomSource::seeded(seed);
        let tables = PaletteTables::default();
        let grid = GridSpec::generate(&mut rng);
        let palette = Palette::generate(&mut rng, &tables)?;
        let field = PerlinField3::new(rng.table_seed());
        let features = FeatureRecord::new(&grid, &palette);
        let layer_colors = [
            draw_cell_colors(&mut rng, palette.primary, tables.cube_colors, grid.total()),
            draw_cell_colors(&mut rng, palette.secondary, tables.cube_colors, grid.total()),
        ];
        let generator = PatternGenerator::new(grid, field, params);
        let masks = generator.generate_pair(&mut rng, 0.0)?;
        log::info!("engine ready: {} cells, {features}", grid.total());
        Ok(Self {
            rng,
            grid,
            palette,
            features,
            layer_colors,
            generator,
            iteration: 0,
            masks,
            last_cue: None,
        })
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn features(&self) -> &FeatureRecord {
        &self.features
    }

    /// Per-cell colors for layer 0 (primary) and layer 1 (secondary).
    pub fn layer_colors(&self) -> &[Vec<Color>; 2] {
        &self.layer_colors
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn masks(&self) -> &LayerMasks {
        &self.masks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            iteration: self.iteration,
            masks: self.masks.clone(),
            last_cue: self.last_cue,
        }
    }

    /// Process one interaction at `elapsed_secs` on the caller's clock.
    ///
    /// On failure the iteration, masks and cue history are left untouched.
    pub fn advance(&mut self, elapsed_secs: f64) -> Result<Transition, PatternError> {
        let masks = self.generator.generate_pair(&mut self.rng, elapsed_secs)?;
        self.masks = masks;
        self.iteration += 1;
        let bank = self.palette.instrument.bank().samples();
        let sample_index = select_sample(&mut self.rng, bank.len(), self.last_cue);
        self.last_cue = Some(sample_index);
        let cue = AudioCue {
            sample_index,
            trigger_midi: self.palette.instrument.trigger_midi(),
        };
        log::debug!(
            "iteration {}: {}/{} primary cells active, cue {sample_index}",
            self.iteration,
            self.masks.primary.active_count(),
            self.masks.primary.len()
        );
        Ok(Transition {
            iteration: self.iteration,
            cue,
        })
    }
}

/// Pick the next sample index, avoiding an immediate repeat whenever the
/// bank offers an alternative (a one-sample bank falls back to repeating).
pub fn select_sample(rng: &mut RandomSource, bank_len: usize, last: Option<usize>) -> usize {
    let mut candidates: SmallVec<[usize; 16]> =
        (0..bank_len).filter(|&i| Some(i) != last).collect();
    if candidates.is_empty() {
        candidates.extend(0..bank_len);
    }
    rng.pick(&candidates).copied().unwrap_or(0)
}
