use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version, about = "Render scene documents to video")]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Parse and validate a project, then print its resolved timeline.
    Validate(ValidateArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Write a sample project document.
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Extra font file to make available by family name (repeatable).
    #[arg(long = "font-file")]
    font_files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path. Defaults to the project's `output.path`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Refuse to overwrite an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Render without the soundtrack.
    #[arg(long, default_value_t = false)]
    no_audio: bool,

    /// Write the processed project, with all defaults applied, as JSON.
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write the processed project, with all defaults applied, as JSON.
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Args, Debug)]
struct SampleArgs {
    /// Where to write the project JSON.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_json);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn init_logging(level: &str, json: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    if json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

fn assets_root(in_path: &Path) -> &Path {
    in_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn font_book(args: &FontArgs) -> anyhow::Result<storyreel::FontBook> {
    let mut fonts = storyreel::FontBook::with_system_fonts();
    for path in &args.font_files {
        fonts
            .load_font_file(path)
            .with_context(|| format!("load font '{}'", path.display()))?;
    }
    Ok(fonts)
}

fn load_session(
    in_path: &Path,
    fonts: &FontArgs,
    opts: storyreel::RenderSessionOpts,
) -> anyhow::Result<(storyreel::Project, storyreel::RenderSession)> {
    let project = storyreel::Project::from_path(in_path)?;
    let session = storyreel::RenderSession::with_fonts(
        &project,
        assets_root(in_path),
        opts,
        &font_book(fonts)?,
    )?;
    Ok((project, session))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = storyreel::RenderSessionOpts {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
        channel_capacity: 4,
        enable_audio: !args.no_audio,
    };
    let (mut project, session) = load_session(&args.in_path, &args.fonts, opts)?;

    let out = match args.out {
        Some(out) => {
            project.output.path = out.clone();
            out
        }
        None => assets_root(&args.in_path).join(&project.output.path),
    };
    if let Some(path) = &args.save_config {
        save_config(&project, path)?;
    }
    let mut sink_opts = storyreel::FfmpegSinkOpts::from_output(&project.output, &out);
    sink_opts.overwrite = !args.no_overwrite;
    let mut sink = storyreel::FfmpegSink::new(sink_opts);

    let stats = session.render_range(
        session.full_range(),
        &mut sink,
        &storyreel::CancelToken::new(),
    )?;

    eprintln!(
        "wrote {} ({} frames{})",
        out.display(),
        stats.frames_rendered,
        if stats.audio { ", with audio" } else { "" }
    );
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let opts = storyreel::RenderSessionOpts::default();
    let (project, session) = load_session(&args.in_path, &args.fonts, opts)?;
    let timeline = session.timeline();

    println!(
        "{}x{} @ {} fps, {} scene(s), {:.3}s, {} frames",
        project.canvas.width,
        project.canvas.height,
        project.fps.as_f64(),
        timeline.entries.len(),
        timeline.total_duration_sec,
        timeline.total_frames
    );
    for e in &timeline.entries {
        let transition = match e.transition_in {
            Some(t) => format!("{:?} {:.3}s", t.kind, t.duration_sec),
            None => "-".to_owned(),
        };
        println!(
            "{:>3}  {:<24} start {:>8.3}s  dur {:>7.3}s  frames {:>6}..{:<6}  in: {transition}",
            e.scene,
            e.id,
            e.start_sec,
            e.duration_sec,
            e.start_frame,
            e.start_frame + e.frame_count
        );
    }
    for w in &project.warnings {
        println!("warning: {}: {}", w.context, w.message);
    }
    if let Some(path) = &args.save_config {
        save_config(&project, path)?;
    }
    Ok(())
}

fn save_config(project: &storyreel::Project, path: &Path) -> anyhow::Result<()> {
    project
        .save_processed(path)
        .with_context(|| format!("save processed config '{}'", path.display()))?;
    eprintln!("saved processed config to {}", path.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let opts = storyreel::RenderSessionOpts::default();
    let (_, session) = load_session(&args.in_path, &args.fonts, opts)?;
    let frame = session.render_frame(storyreel::FrameIndex(args.frame))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, storyreel::sample_project_json())
        .with_context(|| format!("write sample '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
