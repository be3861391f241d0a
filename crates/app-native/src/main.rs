use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use app_core::{
    view, AudioCue, AudioSink, GeneratorParams, InteractionEngine, SampleBank,
    ROTATION_LERP_RATE, SECONDARY_LAYER_SCALE,
};

#[derive(Parser, Debug)]
#[command(name = "tonelattice", about = "Drive the lattice engine from the terminal")]
struct Args {
    /// Seed for every random draw (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated pointer interactions before exit
    #[arg(long, default_value_t = 8)]
    interactions: u32,
    /// Pause between interactions, in milliseconds
    #[arg(long, default_value_t = 400)]
    tick_ms: u64,
}

/// Logs cues instead of playing them; stands in for a sampler backend.
struct LogSink {
    bank: SampleBank,
    started: bool,
}

impl AudioSink for LogSink {
    fn ensure_started(&mut self) -> anyhow::Result<()> {
        if !self.started {
            self.started = true;
            log::info!("audio started ({:?} bank)", self.bank);
        }
        Ok(())
    }

    fn play(&mut self, cue: AudioCue) -> anyhow::Result<()> {
        let name = self
            .bank
            .samples()
            .get(cue.sample_index)
            .copied()
            .unwrap_or("?");
        log::info!("play {name} at midi {}", cue.trigger_midi);
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}");

    let engine = InteractionEngine::new(GeneratorParams::default(), seed)?;
    let grid = engine.grid();
    log::info!(
        "{} | camera zoom {:.1}",
        engine.features(),
        view::camera_zoom(grid.total())
    );
    let mut sink = LogSink {
        bank: engine.palette().instrument.bank(),
        started: false,
    };

    let shared = Arc::new(Mutex::new(engine));
    let running = Arc::new(AtomicBool::new(true));
    let start = Instant::now();

    // Poller thread standing in for a renderer: clones snapshots and chases
    // the animation targets, never holding the lock across a frame.
    let poller = {
        let shared = Arc::clone(&shared);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut rot_y = 0.0f32;
            let mut rot_z = 0.0f32;
            while running.load(Ordering::Relaxed) {
                let snap = shared.lock().unwrap().snapshot();
                let (target_y, target_z) = view::rotation_targets(snap.iteration);
                rot_y = view::lerp(rot_y, target_y, ROTATION_LERP_RATE);
                rot_z = view::lerp(rot_z, target_z, ROTATION_LERP_RATE);
                log::debug!(
                    "frame: iteration {} rot ({rot_y:.2}, {rot_z:.2}) pulse {:.3} primary {}/{}",
                    snap.iteration,
                    view::pulse_scale(start.elapsed().as_secs_f32()),
                    snap.masks.primary.active_count(),
                    snap.masks.primary.len()
                );
                thread::sleep(Duration::from_millis(33));
            }
        })
    };

    for _ in 0..args.interactions {
        thread::sleep(Duration::from_millis(args.tick_ms));
        sink.ensure_started()?;
        let transition = {
            let mut engine = shared.lock().unwrap();
            engine.advance(start.elapsed().as_secs_f64())?
        };
        sink.play(transition.cue)?;
        let snap = shared.lock().unwrap().snapshot();
        log::info!(
            "iteration {}: {} primary / {} secondary cells active",
            transition.iteration,
            snap.masks.primary.active_count(),
            snap.masks.secondary.active_count()
        );
    }

    running.store(false, Ordering::Relaxed);
    if poller.join().is_err() {
        log::warn!("poller thread panicked");
    }

    // Final frame: the instance buffers a renderer would upload.
    let engine = shared.lock().unwrap();
    let snap = engine.snapshot();
    let colors = engine.layer_colors();
    let primary = view::cell_instances(&grid, &snap.masks.primary, &colors[0], 1.0);
    let secondary = view::cell_instances(
        &grid,
        &snap.masks.secondary,
        &colors[1],
        SECONDARY_LAYER_SCALE,
    );
    log::info!(
        "final frame: {} + {} instances, {} bytes each",
        primary.len(),
        secondary.len(),
        std::mem::size_of::<view::CellInstance>()
    );
    Ok(())
}
