use std::io::BufRead as _;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use trailfx::{
    ConfigHandle, ConfigLimits, CpuSurface, FrameRate, FrameSink as _, FrameSource,
    ImageSequenceSource, IntervalScheduler, PngSequenceSink, RenderLoop, Resolution, SinkConfig,
    SyntheticSource, TickOutcome, TrailConfig,
};

#[derive(Parser, Debug)]
#[command(name = "trailfx", version)]
struct Cli {
    /// Log per-tick diagnostics.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the trail loop and optionally write composited frames as PNGs.
    Run(RunArgs),
    /// Print the history indices sampled for a history length and slice count.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// JSON configuration file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trail length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Number of history slices drawn under the live frame.
    #[arg(long)]
    slices: Option<u32>,

    /// Assumed tick rate used to size the history.
    #[arg(long)]
    fps: Option<u32>,

    /// Output width; defaults to the source's native width or 320.
    #[arg(long)]
    width: Option<u32>,

    /// Output height; defaults to the source's native height or 240.
    #[arg(long)]
    height: Option<u32>,

    /// `synthetic`, or a directory of images to loop over.
    #[arg(long, default_value = "synthetic")]
    source: String,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 120)]
    ticks: u64,

    /// Directory to write composited frames into.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write every Nth rendered tick.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Pace ticks to the configured frame rate instead of running flat out.
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Read `duration <secs>` / `slices <n>` commands from stdin while running.
    #[arg(long, default_value_t = false)]
    controls: bool,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// History length in frames.
    #[arg(long)]
    len: usize,

    /// Slice count.
    #[arg(long)]
    slices: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let indices = trailfx::sample_indices(args.len, args.slices);
    println!("{}", serde_json::to_string(&indices)?);
    Ok(())
}

fn load_config(args: &RunArgs) -> anyhow::Result<TrailConfig> {
    let mut cfg = match &args.config {
        Some(path) => TrailConfig::from_json_path(path)?,
        None => TrailConfig::default(),
    };
    if let Some(d) = args.duration {
        cfg.duration_secs = d;
    }
    if let Some(s) = args.slices {
        cfg.slice_count = s;
    }
    if let Some(fps) = args.fps {
        cfg.frame_rate = FrameRate::new(fps)?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let handle = ConfigHandle::new(cfg, ConfigLimits::default())?;

    let (source, native) = match args.source.as_str() {
        "synthetic" => (Box::new(SyntheticSource::new()) as Box<dyn FrameSource>, None),
        dir => {
            let seq = ImageSequenceSource::load_dir(Path::new(dir))?;
            let native = seq.native_resolution();
            (Box::new(seq) as Box<dyn FrameSource>, native)
        }
    };
    let resolution = Resolution::new(
        args.width.or(native.map(|r| r.width)).unwrap_or(320),
        args.height.or(native.map(|r| r.height)).unwrap_or(240),
    )?;

    if args.controls {
        spawn_controls(handle.clone());
    }

    let mut lp = RenderLoop::new(source, CpuSurface::new(resolution), handle.clone());
    lp.ready().context("start render loop")?;

    let mut sink = args.out.as_ref().map(PngSequenceSink::new);
    if let Some(sink) = sink.as_mut() {
        sink.begin(SinkConfig {
            resolution,
            frame_rate: cfg.frame_rate,
        })?;
    }

    let mut scheduler = if args.realtime {
        IntervalScheduler::paced(cfg.frame_rate)
    } else {
        IntervalScheduler::unpaced()
    };

    let every = args.every.max(1);
    let (mut rendered, mut skipped) = (0u64, 0u64);
    let mut sink_err: Option<trailfx::TrailError> = None;
    if args.ticks > 0 {
        lp.drive(&mut scheduler, |lp, outcome| {
            match outcome {
                TickOutcome::Rendered(stats) => {
                    rendered += 1;
                    if let Some(sink) = sink.as_mut()
                        && stats.tick % every == 0
                        && let Err(err) = sink.push_frame(stats.tick, lp.surface().pixels())
                    {
                        sink_err = Some(err);
                        return ControlFlow::Break(());
                    }
                }
                TickOutcome::Skipped { .. } => skipped += 1,
                TickOutcome::Idle => {}
            }
            if lp.ticks() >= args.ticks {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
    }

    if let Some(err) = sink_err {
        return Err(err).context("write composited frame");
    }
    if let Some(sink) = sink.as_mut() {
        sink.end()?;
        eprintln!(
            "wrote {} frames to {}",
            sink.written().len(),
            sink.dir().display()
        );
    }
    eprintln!(
        "ticks: {rendered} rendered, {skipped} skipped, history {} frames",
        lp.history().len()
    );
    Ok(())
}

fn spawn_controls(handle: ConfigHandle) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if let Err(err) = apply_control(&handle, &line) {
                tracing::warn!(error = %err, line = %line, "ignoring control input");
            }
        }
    });
}

fn apply_control(handle: &ConfigHandle, line: &str) -> anyhow::Result<()> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("duration"), Some(v)) => {
            let secs: f64 = v.parse().with_context(|| format!("parse duration '{v}'"))?;
            handle.set_duration_secs(secs);
        }
        (Some("slices"), Some(v)) => {
            let n: u32 = v.parse().with_context(|| format!("parse slice count '{v}'"))?;
            handle.set_slice_count(n);
        }
        (None, _) => {}
        _ => anyhow::bail!("expected `duration <secs>` or `slices <n>`"),
    }
    Ok(())
}
