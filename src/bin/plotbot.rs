use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use plotbot::{
    DrawingEngine, DrawingMetadata, DrawingReader, DrawingSettings, EngineConfig, ManualClock,
    PlaybackDiagnostics, Point,
    hardware::{DirectoryProbe, MediaMonitor, MotionSystem, RecordingServo, SimulatedMotion},
    storage::fs::FsStorage,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "plotbot", version)]
struct Cli {
    /// Log at debug level (honours `RUST_LOG` when set).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a drawing and print its header and point statistics.
    Inspect(InspectArgs),
    /// Play a drawing back on a simulated robot.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input drawing file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input drawing file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the arrival distance threshold.
    #[arg(long)]
    precision: Option<f64>,

    /// Robot travel per tick, unless the drawing sets `followVelocity`.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Simulated time per tick, in milliseconds.
    #[arg(long, default_value_t = 10)]
    tick_ms: u64,

    /// Give up after this many ticks.
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: u64,
}

#[derive(serde::Serialize)]
struct InspectReport {
    metadata: DrawingMetadata,
    settings: DrawingSettings,
    points: usize,
    decode_warnings: usize,
}

#[derive(serde::Serialize)]
struct SimulationSummary {
    drawing: DrawingMetadata,
    ticks: u64,
    finished: bool,
    progress: f64,
    position: Point,
    servo_commands: usize,
    diagnostics: PlaybackDiagnostics,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the JSON report.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn split_path(path: &Path) -> anyhow::Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("drawing path '{}' has no file name", path.display()))?
        .to_string();
    Ok((dir, name))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{text}");
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (dir, name) = split_path(&args.in_path)?;
    let storage = FsStorage::new(dir);
    tracing::debug!(root = %storage.root().display(), drawing = %name, "inspecting drawing");
    let mut reader = DrawingReader::open(&storage, &name)
        .with_context(|| format!("open drawing '{}'", args.in_path.display()))?;

    let metadata = reader.metadata().clone();
    let settings = *reader.settings();
    let mut points = 0;
    let mut decode_warnings = 0;
    for read in reader.by_ref() {
        points += 1;
        decode_warnings += read.warnings.len();
    }
    reader.close();

    print_json(&InspectReport {
        metadata,
        settings,
        points,
        decode_warnings,
    })
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.speed.is_finite() && args.speed > 0.0,
        "--speed must be a positive number"
    );
    anyhow::ensure!(args.tick_ms > 0, "--tick-ms must be at least 1");

    let mut config = match &args.config {
        Some(path) => EngineConfig::load_json(path)?,
        None => EngineConfig::default(),
    };
    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    config.validate()?;

    let (dir, name) = split_path(&args.in_path)?;
    let mut monitor = MediaMonitor::new(DirectoryProbe::new(&dir));
    monitor.set_listener(|state| tracing::info!(?state, "storage media changed"));
    monitor.refresh();

    let clock = ManualClock::new();
    let mut engine = DrawingEngine::new(
        config,
        SimulatedMotion::new(Point::ORIGIN, args.speed),
        RecordingServo::new(),
        FsStorage::new(&dir),
    )
    .with_clock(clock.clone())
    .with_media(monitor.signal());

    engine
        .try_load(&name)
        .with_context(|| format!("load drawing '{}'", args.in_path.display()))?;

    let tick = Duration::from_millis(args.tick_ms);
    let mut ticks = 0;
    while ticks < args.max_ticks {
        monitor.refresh();
        if engine.is_loaded() && !engine.is_running() {
            engine.start();
        }
        engine.update();
        clock.advance(tick);
        ticks += 1;

        if engine.is_finished() && !engine.is_settling() {
            break;
        }
    }

    if !engine.is_finished() {
        tracing::warn!(ticks, progress = engine.progress(), "simulation stopped before the drawing finished");
    }

    print_json(&SimulationSummary {
        drawing: engine.metadata().clone(),
        ticks,
        finished: engine.is_finished(),
        progress: engine.progress(),
        position: engine.motion().position(),
        servo_commands: engine.servo().commands().len(),
        diagnostics: engine.diagnostics(),
    })
}
