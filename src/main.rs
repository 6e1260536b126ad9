//! Headless driver: fixed-rate tick loop with scripted commands, periodic
//! JSON snapshots and a JSONL event log. Stands in for the window/keyboard
//! front end, which only reads snapshots and injects commands.

use clap::Parser;
use tracing::{info, warn};

use outbreak_sim::events::{EventLog, HealthEventKind};
use outbreak_sim::output;
use outbreak_sim::setup::DEFAULT_AGENT_COUNT;
use outbreak_sim::{Command, SimParams, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "outbreak_sim")]
#[command(about = "Grid epidemic simulation with timed quarantine and masking")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate (10 ticks = 1 second)
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Population size
    #[arg(long, default_value_t = DEFAULT_AGENT_COUNT)]
    agents: usize,

    /// Interval between world snapshots (in ticks)
    #[arg(long, default_value_t = 50)]
    snapshot_interval: u64,

    /// Directory for snapshot output
    #[arg(long, default_value = "output/snapshots")]
    snapshot_dir: String,

    /// Optional JSONL event log path
    #[arg(long)]
    events_log: Option<String>,

    /// Tick at which to mask the whole population
    #[arg(long)]
    mask_at: Option<u64>,

    /// Tick at which to quarantine all infected agents
    #[arg(long)]
    quarantine_at: Option<u64>,

    /// Tick at which to reseed a random infection
    #[arg(long)]
    reseed_at: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let params = SimParams::default();
    let dt = params.tick_dt();

    let mut event_log = match &args.events_log {
        Some(path) => match EventLog::new(path) {
            Ok(log) => log,
            Err(e) => {
                warn!(path = %path, error = %e, "could not open event log, discarding events");
                EventLog::null()
            }
        },
        None => EventLog::null(),
    };

    info!(
        seed = args.seed,
        ticks = args.ticks,
        agents = args.agents,
        "starting simulation"
    );

    let mut sim = Simulation::with_params(args.seed, args.agents, params);

    for tick in 1..=args.ticks {
        if args.mask_at == Some(tick) {
            sim.apply(Command::MaskAll);
            info!(tick, "masked population");
        }
        if args.quarantine_at == Some(tick) {
            sim.apply(Command::QuarantineAll);
            info!(tick, "quarantined infected agents");
        }
        if args.reseed_at == Some(tick) {
            sim.apply(Command::SeedInfection);
            info!(tick, "reseeded infection");
        }

        sim.tick(dt);

        let events = sim.drain_events();
        let infections = events
            .iter()
            .filter(|e| e.kind == HealthEventKind::Infected)
            .count();
        if infections > 0 {
            info!(tick, infections, "new infections");
        }
        if let Err(e) = event_log.log_batch(&events) {
            warn!(tick, error = %e, "could not write events");
        }

        // The elapsed counter restarts whenever the outbreak is over
        if sim.all_healthy() {
            sim.reset_elapsed();
        }

        if tick % args.snapshot_interval == 0 {
            let snapshot = sim.snapshot();
            info!(
                tick,
                healthy = snapshot.counts.healthy,
                infected = snapshot.counts.infected,
                quarantined = snapshot.counts.quarantined,
                protected = snapshot.counts.protected,
                "state counts"
            );
            if let Err(e) = output::write_snapshot(&snapshot, &args.snapshot_dir) {
                warn!(tick, error = %e, "could not write snapshot");
            }
        }
    }

    let final_snapshot = sim.snapshot();
    if let Err(e) = output::write_snapshot(&final_snapshot, &args.snapshot_dir) {
        warn!(error = %e, "could not write final snapshot");
    }
    info!(
        ticks = args.ticks,
        elapsed_secs = f64::from(sim.elapsed_secs()),
        events = event_log.written(),
        "simulation complete"
    );
}
