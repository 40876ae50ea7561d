//! strip: smallest runnable hexrail world.
//!
//! Lays a short loop of track around a depot with three `place_track`
//! commands, drops two trains on it at full throttle, and writes car poses
//! and track diffs to `output/strip/`.
//!
//! ```text
//! cargo run -p strip                  # default RailConfig
//! cargo run -p strip -- config.json   # RailConfig from JSON
//! RUST_LOG=debug cargo run -p strip   # per-tile logging
//! ```

mod layout;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use hr_core::glam::Vec2;
use hr_core::grid::cell_center;
use hr_core::{GridPlacement, HexCoordEdge, RailConfig, Tick, TrainId};
use hr_output::{CsvWriter, TraceObserver, TraceWriter};
use hr_sim::{WorldBuilder, WorldObserver};
use hr_track::TrackDiff;
use hr_train::{Train, TrainCar};

const OUTPUT_DIR: &str = "output/strip";
const WAGONS:     usize = 2;

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: TraceWriter> {
    inner:     TraceObserver<W>,
    pose_rows: usize,
    diff_rows: usize,
    halts:     Vec<(Tick, TrainId, HexCoordEdge)>,
}

impl<W: TraceWriter> CountingObserver<W> {
    fn new(inner: TraceObserver<W>) -> Self {
        Self { inner, pose_rows: 0, diff_rows: 0, halts: Vec::new() }
    }
}

impl<W: TraceWriter> WorldObserver for CountingObserver<W> {
    fn on_track_diff(&mut self, tick: Tick, diff: &TrackDiff) {
        self.diff_rows += 1;
        self.inner.on_track_diff(tick, diff);
    }

    fn on_train_halted(&mut self, tick: Tick, train: TrainId, at: HexCoordEdge) {
        self.halts.push((tick, train, at));
    }

    fn on_snapshot(&mut self, tick: Tick, trains: &[Train], placement: &GridPlacement) {
        self.pose_rows += trains.iter().map(|t| t.car_poses().count()).sum::<usize>();
        self.inner.on_snapshot(tick, trains, placement);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ─────────────────────────────────────────────────────────────────────

fn init_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .with(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?)
        .init();
    Ok(())
}

fn load_config() -> Result<RailConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(RailConfig::default());
    };
    let file = File::open(&path).with_context(|| format!("opening {path}"))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    init_logging()?;
    let config = load_config()?;

    println!("=== strip: hexrail ===");
    println!(
        "Ticks: {}  |  dt: {:.4} s  |  Seed: {}  |  Friction: {:?}",
        config.total_ticks, config.dt, config.seed, config.friction_model
    );
    println!();

    // 1. World with the depot reserved.
    let mut world = WorldBuilder::new(config.clone()).footprints(layout::depot()).build()?;

    // 2. Lay the loop.
    for (start, end) in layout::ROUTES {
        let diffs = world.place_track(start, end)?;
        info!(%start, %end, cells = diffs.len(), "route laid");
    }
    println!("Track: {} cells", world.track.len());

    // 3. Trains.
    for cell in layout::spawn_cells() {
        let cars = std::iter::once(TrainCar::engine(&config))
            .chain(std::iter::repeat_with(|| TrainCar::wagon(&config)).take(WAGONS));
        let id = world.add_train(cell_center(cell), Vec2::Y, cars)?;
        world.set_throttle(id, 1.0)?;
    }

    // 4. Output.
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(TraceObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    world.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!(
        "Simulation complete in {:.3} s ({:.1} s simulated)",
        elapsed.as_secs_f64(),
        world.clock.elapsed_secs()
    );
    println!("  car_poses.csv   : {} rows", obs.pose_rows);
    println!("  track_diffs.csv : {} rows", obs.diff_rows);
    for (tick, train, at) in &obs.halts {
        println!("  {train} halted at {at} ({tick})");
    }
    println!();

    println!("{:<10} {:<9} {:>9} {:<10}", "Train", "On track", "Speed", "Cell");
    println!("{}", "-".repeat(42));
    for train in world.trains() {
        let cell = train
            .head_tile()
            .map(|t| t.coord.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<10} {:<9} {:>9.3} {:<10}",
            train.id.to_string(),
            if train.is_on_track() { "yes" } else { "no" },
            train.velocity(),
            cell,
        );
    }

    Ok(())
}
