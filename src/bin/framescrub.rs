use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framescrub", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the settled frame for one scroll position as a PNG.
    Frame(FrameArgs),
    /// Simulate a scroll from top to bottom and write every painted tick as a PNG.
    Sweep(SweepArgs),
    /// Print the effective player configuration as JSON.
    Config(ConfigArgs),
    /// Open an interactive preview window.
    #[cfg(feature = "viewer")]
    View(ViewArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Directory the sequence's relative frame paths are resolved against.
    #[arg(long)]
    frames: PathBuf,

    /// Player configuration JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Normalized scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Directory the sequence's relative frame paths are resolved against.
    #[arg(long)]
    frames: PathBuf,

    /// Player configuration JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for numbered PNGs.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of ticks the scroll from 0 to 1 is spread over.
    #[arg(long, default_value_t = 120)]
    steps: u32,

    /// Simulated tick rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Skip writing ticks whose pixels match the previous written tick.
    #[arg(long, default_value_t = false)]
    elide: bool,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Player configuration JSON to validate and print (defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[cfg(feature = "viewer")]
#[derive(Parser, Debug)]
struct ViewArgs {
    /// Directory the sequence's relative frame paths are resolved against.
    #[arg(long)]
    frames: PathBuf,

    /// Player configuration JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial window width.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height.
    #[arg(long, default_value_t = 720)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Config(args) => cmd_config(args),
        #[cfg(feature = "viewer")]
        Command::View(args) => cmd_view(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<framescrub::PlayerConfig> {
    match path {
        Some(p) => framescrub::PlayerConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(framescrub::PlayerConfig::default()),
    }
}

fn ready_player(
    config: framescrub::PlayerConfig,
    frames: &Path,
    viewport: framescrub::Viewport,
) -> anyhow::Result<framescrub::FrameSequencePlayer> {
    let mut player = framescrub::FrameSequencePlayer::new(config, viewport)?;
    let source = framescrub::FsFrameSource::new(frames);
    player.load_blocking(&source)?;

    if let Some(report) = player.load_report()
        && !report.is_complete()
    {
        eprintln!(
            "warning: {} of {} frames failed to load and will render blank",
            report.failures.len(),
            report.requested
        );
    }
    Ok(player)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let viewport = framescrub::Viewport::new(args.width, args.height);
    let mut player = ready_player(config, &args.frames, viewport)?;

    player.set_progress(args.progress);
    let outcome = player.render(player.target_index().0 as f64)?;
    let framescrub::RenderOutcome::Painted { frame_index, .. } = outcome else {
        anyhow::bail!("nothing was painted ({outcome:?})");
    };

    let surface = player
        .surface()
        .context("player has no surface after painting")?;
    surface.save_png(&args.out)?;

    eprintln!(
        "wrote {} (frame {})",
        args.out.display(),
        frame_index.sequence_number()
    );
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    if args.steps == 0 {
        anyhow::bail!("--steps must be >= 1");
    }

    let config = read_config(args.config.as_deref())?;
    let viewport = framescrub::Viewport::new(args.width, args.height);
    let mut player = ready_player(config, &args.frames, viewport)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let dt = 1.0 / args.fps;
    let mut written = 0u64;
    let mut elided = 0u64;
    let mut last_fingerprint = None;
    let mut write_tick = |player: &framescrub::FrameSequencePlayer| -> anyhow::Result<()> {
        let surface = player.surface().context("player has no surface")?;
        let fp = surface.fingerprint();
        if args.elide && last_fingerprint == Some(fp) {
            elided += 1;
            return Ok(());
        }
        last_fingerprint = Some(fp);
        let path = args.out_dir.join(format!("tick-{written:05}.png"));
        surface.save_png(&path)?;
        written += 1;
        Ok(())
    };

    write_tick(&player)?;
    for step in 1..=args.steps {
        player.set_progress(f64::from(step) / f64::from(args.steps));
        if player.tick(dt)?.is_some() {
            write_tick(&player)?;
        }
    }
    // Let the spring come to rest on the final frame.
    let max_settle_ticks = (args.fps * 10.0).ceil() as u64;
    for _ in 0..max_settle_ticks {
        if player.is_settled() {
            break;
        }
        if player.tick(dt)?.is_some() {
            write_tick(&player)?;
        }
    }

    eprintln!(
        "wrote {written} frames to {} ({elided} duplicates elided)",
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    println!("{}", config.to_json_pretty()?);
    Ok(())
}

#[cfg(feature = "viewer")]
fn cmd_view(args: ViewArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let viewport = framescrub::Viewport::new(args.width, args.height);
    let player = framescrub::FrameSequencePlayer::new(config, viewport)?;
    let source: std::sync::Arc<dyn framescrub::FrameSource> =
        std::sync::Arc::new(framescrub::FsFrameSource::new(&args.frames));
    framescrub::viewer::run_viewer(player, source, "framescrub")?;
    Ok(())
}
