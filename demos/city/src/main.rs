//! city — run the grid city simulation from the command line.
//!
//! With no arguments this reproduces the reference demo: a 20×10 grid,
//! seed 0, 25 agents walking between 8 random places for 5 steps, then the
//! final metrics and an ASCII occupancy grid.
//!
//! Settings come from (lowest to highest precedence) the built-in defaults,
//! `city.json` in the working directory or the file named by `--config`,
//! then individual flags.
//!
//! Run with:
//!   cargo run -p city -- --steps 20 --output out/
//!   RUST_LOG=debug cargo run -p city

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use city_core::config::DEFAULT_CONFIG_FILE;
use city_core::{SimConfig, Step};
use city_output::{
    CsvWriter, OutputError, OutputWriter, SimOutputObserver, client_id, grid_to_ascii,
    metrics_payload, topic,
};
use city_sim::{CitySim, EntityStore, NoopObserver, OccupancyGrid, SimMetrics, SimObserver};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "city", about = "Agents walking to random places on a grid city")]
struct Args {
    /// JSON config file (defaults to ./city.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Grid height in cells
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// RNG seed
    #[arg(short, long, conflicts_with = "random_seed")]
    seed: Option<u64>,

    /// Seed from OS entropy (non-reproducible run)
    #[arg(long)]
    random_seed: bool,

    /// Number of agents
    #[arg(short, long)]
    agents: Option<usize>,

    /// Number of places
    #[arg(short, long)]
    places: Option<usize>,

    /// Steps to run
    #[arg(short = 'n', long)]
    steps: Option<u64>,

    /// Snapshot every N steps (0 = never)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Write step_metrics.csv and agent_snapshots.csv into this directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the metrics payload each step under the configured base topic
    #[arg(long)]
    payload: bool,

    /// Base topic for printed payloads (implies --payload)
    #[arg(long)]
    payload_topic: Option<String>,

    /// Print every snapshot grid, not only the final one
    #[arg(long)]
    show_snapshots: bool,

    /// Skip printing the final grid
    #[arg(long)]
    no_grid: bool,
}

impl Args {
    /// Load the base config, then apply any flags that were given.
    fn resolve_config(&self) -> Result<SimConfig> {
        let mut cfg = match &self.config {
            Some(path) => SimConfig::from_json_path(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => SimConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("reading {DEFAULT_CONFIG_FILE}"))?,
        };

        if let Some(w) = self.width             { cfg.width = w; }
        if let Some(h) = self.height            { cfg.height = h; }
        if let Some(s) = self.seed              { cfg.seed = Some(s); }
        if self.random_seed                     { cfg.seed = None; }
        if let Some(a) = self.agents            { cfg.agents = a; }
        if let Some(p) = self.places            { cfg.places = p; }
        if let Some(n) = self.steps             { cfg.steps = n; }
        if let Some(i) = self.snapshot_interval { cfg.snapshot_interval_steps = i; }
        if let Some(t) = &self.payload_topic    { cfg.publish.base_topic = t.clone(); }

        cfg.validate()?;
        Ok(cfg)
    }

    fn prints_payload(&self) -> bool {
        self.payload || self.payload_topic.is_some()
    }
}

// ── Console observer ──────────────────────────────────────────────────────────

/// Logs progress, optionally prints payloads and snapshot grids, and
/// forwards every callback to `inner`.
struct ConsoleObserver<O: SimObserver> {
    inner:          O,
    payload_topic:  Option<String>,
    show_snapshots: bool,
    payload_error:  Option<OutputError>,
}

impl<O: SimObserver> ConsoleObserver<O> {
    fn new(inner: O, payload_base: Option<&str>, show_snapshots: bool) -> Self {
        Self {
            inner,
            payload_topic: payload_base.map(|base| topic(base, "metrics")),
            show_snapshots,
            payload_error: None,
        }
    }
}

impl<O: SimObserver> SimObserver for ConsoleObserver<O> {
    fn on_step_start(&mut self, step: Step) {
        self.inner.on_step_start(step);
    }

    fn on_step_end(&mut self, metrics: &SimMetrics) {
        info!(
            step = metrics.step,
            mean_distance_to_goal = metrics.mean_distance_to_goal,
            "step done"
        );
        if let Some(t) = &self.payload_topic {
            match metrics_payload(metrics) {
                Ok(body) => println!("{t} {body}"),
                Err(e) => {
                    if self.payload_error.is_none() {
                        self.payload_error = Some(e);
                    }
                }
            }
        }
        self.inner.on_step_end(metrics);
    }

    fn on_snapshot(&mut self, step: Step, grid: &OccupancyGrid, store: &EntityStore) {
        if self.show_snapshots {
            println!("── {step} ──");
            println!("{}", grid_to_ascii(grid));
        }
        self.inner.on_snapshot(step, grid, store);
    }

    fn on_run_end(&mut self, final_step: Step) {
        self.inner.on_run_end(final_step);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = args.resolve_config()?;

    info!(
        width = config.width,
        height = config.height,
        seed = ?config.seed,
        agents = config.agents,
        places = config.places,
        steps = config.steps,
        "starting city simulation"
    );

    let payload_base = args.prints_payload().then_some(config.publish.base_topic.as_str());
    if payload_base.is_some() {
        info!(
            client_id = %client_id(&config.publish.client_id_prefix, Some("sim")),
            base_topic = %config.publish.base_topic,
            "printing metrics payloads"
        );
    }

    let mut sim = CitySim::from_config(&config)?;
    let t0 = Instant::now();

    match &args.output {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            let writer = CsvWriter::new(dir)?;
            let mut obs = ConsoleObserver::new(
                SimOutputObserver::new(writer),
                payload_base,
                args.show_snapshots,
            );
            sim.run(config.steps, &mut obs)?;
            report_payload_error(&mut obs);
            finish_output(&mut obs.inner, dir)?;
            info!(dir = %dir.display(), "wrote CSV output");
        }
        None => {
            let mut obs = ConsoleObserver::new(
                NoopObserver,
                payload_base,
                args.show_snapshots,
            );
            sim.run(config.steps, &mut obs)?;
            report_payload_error(&mut obs);
        }
    }

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "simulation complete");

    println!("{}", sim.metrics());
    if !args.no_grid {
        println!("{}", grid_to_ascii(&sim.snapshot_grid()));
    }
    Ok(())
}

/// Surface the first write error stored during the run.
fn finish_output<W: OutputWriter>(obs: &mut SimOutputObserver<W>, dir: &Path) -> Result<()> {
    match obs.take_error() {
        Some(e) => Err(e).with_context(|| format!("writing output to {}", dir.display())),
        None => Ok(()),
    }
}

fn report_payload_error<O: SimObserver>(obs: &mut ConsoleObserver<O>) {
    if let Some(e) = obs.payload_error.take() {
        warn!("payload error: {e}");
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
