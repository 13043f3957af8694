//! harvest — farmers crossing a shared corridor to a corn field and back.
//!
//! `FARMERS` threads each loop: forward trip through the corridor, collect a
//! random number of cobs, reverse trip, deposit at the storehouse.  A
//! control-center thread calls a soft stop part-way through (every farmer
//! drops what it is doing and starts over) and later ends the simulation.
//!
//! Positions are written to `output/harvest/positions.csv` and streamed as
//! `presentInPath` messages to a presentation thread.  Set `RUST_LOG=debug`
//! to see every step.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hv_core::{CorridorConfig, Direction, MoverId, PauseMode, SimRng};
use hv_output::{ChannelSink, CsvSink, PresentMessage};
use hv_path::{ControlAction, Corridor, CorridorBuilder, Mover, PathError, PathResult, PositionSink};

// ── Constants ─────────────────────────────────────────────────────────────────

const FARMERS:        usize    = 5;
const SEED:           u64      = 42;
const MAX_COBS:       u32      = 10;
const COLLECT_TIME:   Duration = Duration::from_millis(150);
const RESTART_PAUSE:  Duration = Duration::from_millis(50);
const STOP_AFTER:     Duration = Duration::from_secs(3);
const END_AFTER:      Duration = Duration::from_secs(4);

// ── Sink wiring ───────────────────────────────────────────────────────────────

/// Feeds every update to two sinks.
struct Tee<A, B>(A, B);

impl<A: PositionSink, B: PositionSink> PositionSink for Tee<A, B> {
    fn on_position_update(&self, mover: MoverId, lane: usize, depth: usize) {
        self.0.on_position_update(mover, lane, depth);
        self.1.on_position_update(mover, lane, depth);
    }

    fn on_leave(&self, mover: MoverId) {
        self.0.on_leave(mover);
        self.1.on_leave(mover);
    }
}

type DemoCorridor = Corridor<Tee<Arc<CsvSink>, ChannelSink>>;

// ── Farmers ───────────────────────────────────────────────────────────────────

#[derive(Default, Debug)]
struct FarmerStats {
    deliveries: u32,
    restarts:   u32,
}

/// One full harvest run: out to the field, back with cobs.
fn harvest_run(
    corridor:   &DemoCorridor,
    farmer:     &mut Mover,
    rng:        &mut SimRng,
    storehouse: &AtomicU64,
) -> PathResult<u32> {
    farmer.heading(Direction::Forward);
    corridor.enter(farmer)?;
    corridor.advance(farmer)?;

    thread::sleep(COLLECT_TIME);
    farmer.load(rng.gen_range(1..=MAX_COBS));

    farmer.heading(Direction::Reverse);
    corridor.enter(farmer)?;
    corridor.advance(farmer)?;

    let cobs = farmer.unload();
    storehouse.fetch_add(u64::from(cobs), Ordering::SeqCst);
    Ok(cobs)
}

fn farmer(corridor: Arc<DemoCorridor>, id: MoverId, storehouse: Arc<AtomicU64>) -> Result<FarmerStats> {
    let mut mover = Mover::new(id, SEED);
    let mut rng = SimRng::for_mover(SEED, id).child(1);
    let mut stats = FarmerStats::default();

    loop {
        match harvest_run(&corridor, &mut mover, &mut rng, &storehouse) {
            Ok(cobs) => {
                stats.deliveries += 1;
                info!(farmer = %id, cobs, "delivered to storehouse");
            }
            Err(PathError::StopHarvest) => {
                // Cobs picked up but not yet carried in are lost with the run.
                mover.discard_cargo();
                stats.restarts += 1;
                thread::sleep(RESTART_PAUSE);
            }
            Err(PathError::SimulationEnded) => return Ok(stats),
            Err(e) => return Err(anyhow!("farmer {id}: {e}")),
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = CorridorConfig {
        required_movers: FARMERS,
        lane_capacity:   FARMERS,
        seed:            SEED,
        pause_mode:      PauseMode::Release,
        ..CorridorConfig::default()
    };
    println!("=== harvest — shared corridor demo ===");
    println!(
        "Farmers: {FARMERS}  |  Corridor: {} × {}  |  Max step: {}  |  Seed: {SEED}",
        config.path_size, config.lane_capacity, config.max_steps
    );
    println!();

    // 1. Sinks: CSV recorder plus a presentation thread on a channel.
    std::fs::create_dir_all("output/harvest")?;
    let csv = Arc::new(CsvSink::create(Path::new("output/harvest/positions.csv"))?);
    let (channel, rx) = ChannelSink::new();
    let presenter = thread::spawn(move || {
        let mut latest: HashMap<MoverId, PresentMessage> = HashMap::new();
        let mut received = 0usize;
        for msg in rx {
            received += 1;
            latest.insert(msg.mover, msg);
        }
        (received, latest)
    });

    // 2. Corridor.
    let corridor = Arc::new(
        CorridorBuilder::new()
            .config(config)
            .sink(Tee(Arc::clone(&csv), channel))
            .build()?,
    );
    let storehouse = Arc::new(AtomicU64::new(0));

    // 3. Farmers.
    let t0 = Instant::now();
    let farmers: Vec<_> = (0..FARMERS)
        .map(|i| -> Result<_> {
            let corridor = Arc::clone(&corridor);
            let storehouse = Arc::clone(&storehouse);
            let id = MoverId::try_from(i)?;
            Ok(thread::Builder::new()
                .name(format!("farmer-{i}"))
                .spawn(move || farmer(corridor, id, storehouse))?)
        })
        .collect::<Result<_>>()?;

    // 4. Control center.
    let control = {
        let corridor = Arc::clone(&corridor);
        thread::spawn(move || -> PathResult<()> {
            thread::sleep(STOP_AFTER);
            corridor.control_str(ControlAction::StopHarvest.as_str())?;
            thread::sleep(END_AFTER);
            corridor.control(ControlAction::EndSimulation)
        })
    };

    control.join().map_err(|_| anyhow!("control center panicked"))??;

    let mut stats = Vec::with_capacity(FARMERS);
    for (i, handle) in farmers.into_iter().enumerate() {
        match handle.join() {
            Ok(Ok(s)) => stats.push((i, s)),
            Ok(Err(e)) => error!(farmer = i, error = %e, "farmer failed"),
            Err(_) => error!(farmer = i, "farmer panicked"),
        }
    }
    let elapsed = t0.elapsed();

    let snapshot = corridor.snapshot()?;
    drop(corridor);
    let (received, latest) = presenter.join().map_err(|_| anyhow!("presenter panicked"))?;
    if let Err(e) = csv.finish() {
        warn!(error = %e, "positions.csv incomplete");
    }

    // 5. Summary.
    println!("Simulation ended after {:.3} s", elapsed.as_secs_f64());
    println!("  storehouse          : {} cobs", storehouse.load(Ordering::SeqCst));
    println!("  positions.csv       : {} rows", csv.rows_written());
    println!("  presentInPath msgs  : {received}");
    println!("  still inside at end : {}", snapshot.order.len());
    println!();

    println!("{:<10} {:<12} {:<10} {:<16}", "Farmer", "Deliveries", "Restarts", "Last message");
    println!("{}", "-".repeat(50));
    for (i, s) in &stats {
        let last = MoverId::try_from(*i)
            .ok()
            .and_then(|id| latest.get(&id))
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("{:<10} {:<12} {:<10} {:<16}", i, s.deliveries, s.restarts, last);
    }

    Ok(())
}
