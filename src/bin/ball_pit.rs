//! Ball Pit - headless driver
//!
//! Run with: `cargo run --bin ball_pit -- --frames 600 --every 60`
//!
//! Plays the simulation at a fixed frame rate without a window and prints
//! render snapshots as JSON lines on stdout. Control events can be scripted:
//!
//! - `--event 120=pause`: toggle pause at frame 120
//! - `--event 300=restart`: clear and regenerate at frame 300
//!
//! Logs go to stderr.

use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use ball_pit_engine::game::{
    ControlEvent, Frontend, RenderSnapshot, ScriptedFrontend, SimScene, SimulationConfig, run_frame,
};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Headless ball pit simulation
#[derive(Parser, Debug)]
#[command(name = "ball_pit")]
#[command(version, about = "Fixed-step sphere simulation, printed as JSON snapshots", long_about = None)]
struct Cli {
    /// JSON configuration file; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of balls
    #[arg(long)]
    balls: Option<usize>,

    /// Frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Frontend frame rate (frames per second)
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Print a snapshot every N frames (0 = final frame only)
    #[arg(short, long, default_value_t = 0)]
    every: u64,

    /// Scripted control event, FRAME=EVENT (restart | pause); repeatable
    #[arg(long = "event", value_parser = parse_scheduled_event)]
    events: Vec<(u64, ControlEvent)>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn parse_scheduled_event(raw: &str) -> Result<(u64, ControlEvent), String> {
    let (frame, event) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FRAME=EVENT, got `{raw}`"))?;
    let frame = frame
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("bad frame `{frame}`: {e}"))?;
    let event = event.parse::<ControlEvent>().map_err(|e| e.to_string())?;
    Ok((frame, event))
}

/// Writes snapshots to stdout as JSON lines.
struct JsonLinesFrontend {
    inner: ScriptedFrontend,
    out: BufWriter<Stdout>,
    every: u64,
    final_frame: u64,
    error: Option<io::Error>,
}

impl JsonLinesFrontend {
    fn write_snapshot(&mut self, snapshot: &RenderSnapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")
    }
}

impl Frontend for JsonLinesFrontend {
    fn delta_time(&mut self) -> f32 {
        self.inner.delta_time()
    }

    fn poll_events(&mut self) -> Vec<ControlEvent> {
        let events = self.inner.poll_events();
        for event in &events {
            info!("[Frontend] Frame {}: {}", self.inner.frame(), event);
        }
        events
    }

    fn present(&mut self, snapshot: &RenderSnapshot) {
        let frame = self.inner.frame();
        self.inner.present(snapshot);
        if self.error.is_some() {
            return;
        }
        let periodic = self.every > 0 && frame % self.every == 0;
        if (periodic || frame == self.final_frame)
            && let Err(err) = self.write_snapshot(snapshot)
        {
            self.error = Some(err);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.random_seed = seed;
    }
    if let Some(balls) = cli.balls {
        config.number_of_balls = balls;
    }

    if cli.dump_config {
        config.validate()?;
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    if !(cli.fps > 0.0) {
        bail!("--fps must be positive, got {}", cli.fps);
    }
    if cli.frames == 0 {
        bail!("--frames must be at least 1");
    }

    let mut scene = SimScene::new(config)?;
    info!(
        "[BallPit] {} bodies, {} Hz fixed step, {} solver iterations",
        scene.bodies().len(),
        scene.config().simulation_frequency,
        scene.config().solver_iterations
    );

    let mut inner = ScriptedFrontend::new(1.0 / cli.fps);
    for &(frame, event) in &cli.events {
        inner.schedule(frame, event);
    }
    let mut frontend = JsonLinesFrontend {
        inner,
        out: BufWriter::new(io::stdout()),
        every: cli.every,
        final_frame: cli.frames - 1,
        error: None,
    };

    let mut total_steps = 0usize;
    for _ in 0..cli.frames {
        total_steps += run_frame(&mut scene, &mut frontend);
        if frontend.error.is_some() {
            break;
        }
    }

    if let Some(err) = frontend.error.take() {
        return Err(err).context("writing snapshot");
    }
    frontend.out.flush().context("flushing stdout")?;

    let last_step = scene.last_step_stats();
    info!(
        "[BallPit] Done: {} steps, {:.2}s simulated, kinetic energy {:.3} J, momentum {:?}",
        total_steps,
        scene.simulated_time(),
        scene.kinetic_energy(),
        scene.linear_momentum()
    );
    info!(
        "[BallPit] Last step: {} candidate pairs, {} contacts",
        last_step.pairs, last_step.contacts
    );
    Ok(())
}
