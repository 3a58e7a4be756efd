use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use splitshot::{
    AlignConfig, AnimationRequest, AnimationStyle, Format, GifSinkOpts, ImageInput, Landmark,
    LabelStyle, PhotoRef, PhotoSource, RenderSettings, StillFormat, StillRequest,
    calculate_alignment_with,
};

#[derive(Parser, Debug)]
#[command(name = "splitshot", version)]
struct Cli {
    /// Log derived geometry and encoder activity.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the alignment of two photos as JSON.
    Align(AlignArgs),
    /// Compose a side-by-side still (PNG or JPEG).
    Still(StillArgs),
    /// Render an animated GIF comparison.
    Animate(AnimateArgs),
}

#[derive(Args, Debug)]
struct AlignArgs {
    /// Before photo size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    before_size: (u32, u32),

    /// After photo size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    after_size: (u32, u32),

    /// Pose JSON for the before photo.
    #[arg(long)]
    before_pose: Option<PathBuf>,

    /// Pose JSON for the after photo.
    #[arg(long)]
    after_pose: Option<PathBuf>,

    /// Target box width.
    #[arg(long)]
    width: u32,

    /// Target box height.
    #[arg(long)]
    height: u32,

    /// Alignment tuning JSON (partial objects allowed).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PairArgs {
    /// Before photo.
    #[arg(long)]
    before: PathBuf,

    /// After photo.
    #[arg(long)]
    after: PathBuf,

    /// Pose JSON for the before photo.
    #[arg(long)]
    before_pose: Option<PathBuf>,

    /// Pose JSON for the after photo.
    #[arg(long)]
    after_pose: Option<PathBuf>,

    /// Aspect ratio: 1:1, 4:5 or 9:16.
    #[arg(long, default_value = "4:5")]
    format: Format,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1080)]
    width: u32,

    /// Overlay "Before"/"After" labels.
    #[arg(long)]
    labels: bool,

    /// Extra font directory for labels.
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Alignment tuning JSON (partial objects allowed).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StillArgs {
    #[command(flatten)]
    pair: PairArgs,

    /// Output path; `.png`, `.jpg` or `.jpeg`.
    #[arg(long)]
    out: PathBuf,

    /// JPEG quality (ignored for PNG).
    #[arg(long, default_value_t = 90)]
    quality: u8,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    pair: PairArgs,

    /// slider, crossfade or toggle.
    #[arg(long, default_value = "slider")]
    style: AnimationStyle,

    /// Loop duration in seconds (style default when omitted).
    #[arg(long)]
    duration: Option<f64>,

    /// Encoder deadline in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Align(args) => cmd_align(args),
        Command::Still(args) => cmd_still(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn cmd_align(args: AlignArgs) -> anyhow::Result<()> {
    let cfg = read_align_config(args.config.as_deref())?;
    let before = photo_ref(args.before_size, args.before_pose.as_deref())?;
    let after = photo_ref(args.after_size, args.after_pose.as_deref())?;
    let result = calculate_alignment_with(
        &cfg,
        &before,
        &after,
        f64::from(args.width),
        f64::from(args.height),
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let encoding = match StillFormat::from_path(&args.out)? {
        StillFormat::Jpeg { .. } => StillFormat::Jpeg {
            quality: args.quality,
        },
        other => other,
    };
    let (before, after) = photo_sources(&args.pair)?;
    let req = StillRequest::new(before, after, args.pair.format, args.pair.width)
        .with_settings(render_settings(&args.pair))
        .with_align_config(read_align_config(args.pair.config.as_deref())?)
        .with_encoding(encoding);

    let out = splitshot::export_still(&req, None)?;
    write_output(&args.out, &out.bytes)?;
    eprintln!("wrote {} ({}x{})", args.out.display(), out.width, out.height);
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let (before, after) = photo_sources(&args.pair)?;
    let mut req = AnimationRequest::new(
        before,
        after,
        args.style,
        args.pair.format,
        args.pair.width,
    )
    .with_settings(render_settings(&args.pair))
    .with_align_config(read_align_config(args.pair.config.as_deref())?);
    if let Some(secs) = args.duration {
        req = req.with_duration_secs(secs);
    }

    let opts = GifSinkOpts::default()
        .with_timeout(Duration::from_secs(args.timeout))
        .with_progress(|done, total| tracing::debug!(done, total, "gif frame encoded"));
    let out = splitshot::export_gif(&req, opts, None)?;
    write_output(&args.out, &out.bytes)?;
    eprintln!(
        "wrote {} ({}x{}, {} frames)",
        args.out.display(),
        out.summary.canvas.width,
        out.summary.canvas.height,
        out.summary.schedule.frame_count
    );
    Ok(())
}

fn render_settings(pair: &PairArgs) -> RenderSettings {
    let labels = pair.labels.then(|| {
        let style = LabelStyle::default();
        match &pair.font_dir {
            Some(dir) => style.with_font_dir(dir),
            None => style,
        }
    });
    RenderSettings::default().with_labels(labels)
}

fn photo_sources(pair: &PairArgs) -> anyhow::Result<(PhotoSource, PhotoSource)> {
    let source = |path: &Path, pose: Option<&Path>| -> anyhow::Result<PhotoSource> {
        let src = PhotoSource::new(ImageInput::Path(path.to_path_buf()));
        Ok(match pose {
            Some(p) => src.with_landmarks(read_pose(p)?),
            None => src,
        })
    };
    Ok((
        source(&pair.before, pair.before_pose.as_deref())?,
        source(&pair.after, pair.after_pose.as_deref())?,
    ))
}

fn photo_ref(size: (u32, u32), pose: Option<&Path>) -> anyhow::Result<PhotoRef> {
    let r = PhotoRef::new(size.0, size.1);
    Ok(match pose {
        Some(p) => r.with_landmarks(read_pose(p)?),
        None => r,
    })
}

fn read_pose(path: &Path) -> anyhow::Result<Vec<Landmark>> {
    let f = File::open(path).with_context(|| format!("open pose '{}'", path.display()))?;
    let landmarks: Vec<Landmark> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse pose '{}'", path.display()))?;
    Ok(landmarks)
}

fn read_align_config(path: Option<&Path>) -> anyhow::Result<AlignConfig> {
    let Some(path) = path else {
        return Ok(AlignConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read align config '{}'", path.display()))?;
    Ok(AlignConfig::from_json(&json)?)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let h = h.trim().parse::<u32>().map_err(|e| e.to_string())?;
    Ok((w, h))
}
