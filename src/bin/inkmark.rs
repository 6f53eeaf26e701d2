use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "inkmark", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one segment at a given reveal progress as a PNG.
    Frame(FrameArgs),
    /// Print the effective options (and any warnings) for a set of overrides as JSON.
    Options(OptionsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Drawing mode.
    #[arg(long, value_enum, default_value_t = ModeChoice::Highlight)]
    mode: ModeChoice,

    /// Segment width in pixels.
    #[arg(long, default_value_t = 320.0)]
    width: f64,

    /// Segment (line) height in pixels.
    #[arg(long, default_value_t = 24.0)]
    height: f64,

    /// Base color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    #[arg(long, default_value = "#ffd500")]
    color: String,

    /// Reveal progress in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    progress: f64,

    /// Override options as a JSON object, e.g. `{"amplitude": 1.2}`.
    #[arg(long)]
    options: Option<String>,

    /// Seed for the geometry's random stream.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct OptionsArgs {
    /// Override options as a JSON object.
    #[arg(long)]
    options: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Highlight,
    Circle,
    Burst,
    Scribble,
    Sketchout,
}

impl ModeChoice {
    fn mode(self) -> inkmark::DrawingMode {
        match self {
            Self::Highlight => inkmark::DrawingMode::Highlight,
            Self::Circle => inkmark::DrawingMode::Circle,
            Self::Burst => inkmark::DrawingMode::Burst,
            Self::Scribble => inkmark::DrawingMode::Scribble,
            Self::Sketchout => inkmark::DrawingMode::Sketchout,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Options(args) => cmd_options(args),
    }
}

fn parse_overrides(raw: Option<&str>) -> anyhow::Result<inkmark::OptionMap> {
    match raw {
        Some(raw) => inkmark::config::parse_option_map(raw).context("invalid --options"),
        None => Ok(inkmark::OptionMap::new()),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.progress) {
        anyhow::bail!("--progress must be within [0, 1], got {}", args.progress);
    }

    let mut overrides = parse_overrides(args.options.as_deref())?;
    overrides.insert(
        "drawingMode".to_owned(),
        Value::from(args.mode.mode().name()),
    );

    let resolver = inkmark::ConfigResolver::new(inkmark::StyleRegistry::global());
    let resolved = resolver.resolve(&inkmark::OptionMap::new(), None, &overrides);
    for w in &resolved.warnings {
        eprintln!("warning: {w}");
    }

    let color = inkmark::Color::parse(&args.color)?;
    let segment = inkmark::Segment::from_ltwh(0.0, 0.0, args.width, args.height);
    let mut renderer = inkmark::Renderer::new(resolved.config, color, segment, args.seed)?;
    renderer.set_bounds(&mut inkmark::CpuSurfaceFactory)?;
    renderer.step(0.0, args.progress)?;

    let surface = renderer.surface().context("renderer has no surface")?;
    let (width, height) = (surface.width(), surface.height());
    let data = surface
        .read_rgba8()
        .context("surface has no readable pixels")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &data,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {} of {} primitives)",
        args.out.display(),
        width,
        height,
        renderer.painted_count(),
        renderer.primitive_count()
    );
    Ok(())
}

fn cmd_options(args: OptionsArgs) -> anyhow::Result<()> {
    let overrides = parse_overrides(args.options.as_deref())?;
    let resolver = inkmark::ConfigResolver::new(inkmark::StyleRegistry::global());
    let resolved = resolver.resolve(&inkmark::OptionMap::new(), None, &overrides);

    let report = serde_json::json!({
        "effective": resolved.config,
        "warnings": resolved.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
    });
    let text = serde_json::to_string_pretty(&report).with_context(|| "serialize options")?;
    println!("{text}");
    Ok(())
}
