use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "gcc-reel", version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a reel and print a summary.
    Check(CheckArgs),
    /// Evaluate one frame and print it as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range into a JSON-lines file.
    Range(RangeArgs),
    /// Print settle times of the spring presets.
    Springs(SpringsArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input reel JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input reel JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RangeArgs {
    /// Input reel JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0, conflicts_with = "start_secs")]
    start: u64,

    /// Last frame (exclusive); reel duration when omitted.
    #[arg(long, conflicts_with = "end_secs")]
    end: Option<u64>,

    /// First frame as a time in seconds, rounded down to a frame.
    #[arg(long)]
    start_secs: Option<f64>,

    /// Last frame (exclusive) as a time in seconds, rounded down to a frame.
    #[arg(long)]
    end_secs: Option<f64>,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,

    /// Evaluate chunks on a rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Write frames identical to their predecessor as repeat markers.
    #[arg(long)]
    elide_static: bool,
}

#[derive(Parser, Debug)]
struct SpringsArgs {
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Range(args) => cmd_range(args),
        Command::Springs(args) => cmd_springs(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "gcc_reel=debug,warn"
    } else {
        "gcc_reel=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn read_reel(path: &Path) -> anyhow::Result<gcc_reel::Reel> {
    let reel = gcc_reel::Reel::from_path(path)
        .with_context(|| format!("load reel '{}'", path.display()))?;
    reel.validate()
        .with_context(|| format!("validate reel '{}'", path.display()))?;
    Ok(reel)
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let reel = read_reel(&args.in_path)?;
    let v = reel.video;
    println!(
        "{}x{} @ {}/{} fps, {} frames ({:.2}s)",
        v.canvas.width,
        v.canvas.height,
        v.fps.num,
        v.fps.den,
        v.duration.0,
        v.fps.frames_to_secs(v.duration.0)
    );
    for scene in &reel.scenes {
        let r = reel.scene_range(scene)?;
        println!(
            "  {:<16} [{:>5}, {:>5})  {:>6.2}s  fade {}/{}  z {:>2}  {} elements",
            scene.id,
            r.start.0,
            r.end.0,
            v.fps.frames_to_secs(r.len_frames()),
            scene.fade_in,
            scene.fade_out,
            scene.z,
            scene.elements.len()
        );
    }
    eprintln!("ok {}", args.in_path.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let reel = read_reel(&args.in_path)?;
    let out = gcc_reel::Evaluator::eval_frame(&reel, gcc_reel::FrameIndex(args.frame))?;
    let json = serde_json::to_string_pretty(&out).context("serialize frame")?;

    match args.out {
        Some(path) => {
            create_parent(&path)?;
            std::fs::write(&path, json.as_bytes())
                .with_context(|| format!("write frame '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Forwards writes while hashing them.
struct Sha256Writer<W: Write> {
    inner: W,
    hasher: sha2::Sha256,
}

impl<W: Write> Write for Sha256Writer<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

fn cmd_range(args: RangeArgs) -> anyhow::Result<()> {
    let reel = read_reel(&args.in_path)?;
    let fps = reel.video.fps;
    let start = match args.start_secs {
        Some(secs) => fps.secs_to_frames_floor(secs),
        None => args.start,
    };
    let end = match (args.end_secs, args.end) {
        (Some(secs), _) => fps.secs_to_frames_floor(secs),
        (None, Some(end)) => end,
        (None, None) => reel.video.duration.0,
    };
    let range =
        gcc_reel::FrameRange::new(gcc_reel::FrameIndex(start), gcc_reel::FrameIndex(end))?;
    let threading = gcc_reel::EvalThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
        static_frame_elision: args.elide_static,
    };

    create_parent(&args.out)?;
    let file = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let writer = Sha256Writer {
        inner: BufWriter::new(file),
        hasher: sha2::Sha256::new(),
    };
    let mut sink = gcc_reel::JsonLinesSink::new(writer);
    let stats = gcc_reel::eval_to_sink(&reel, range, &threading, &mut sink)?;
    let writer = sink.into_inner();

    eprintln!(
        "wrote {} ({} frames, {} elided)",
        args.out.display(),
        stats.frames_total,
        stats.frames_elided
    );
    println!("sha256 {}", hex(&writer.hasher.finalize()));
    Ok(())
}

fn cmd_springs(args: SpringsArgs) -> anyhow::Result<()> {
    for preset in gcc_reel::SpringPreset::ALL {
        let cfg = preset.config();
        let frames =
            gcc_reel::measure_spring(args.fps, &cfg, gcc_reel::SPRING_REST_THRESHOLD)?;
        println!(
            "{:<11} damping {:>4} mass {:>4} stiffness {:>4} clamp {:<5} \
             zeta {:.3}  settles in {} frames",
            preset.name(),
            cfg.damping,
            cfg.mass,
            cfg.stiffness,
            cfg.overshoot_clamping,
            cfg.damping_ratio(),
            frames
        );
    }
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
