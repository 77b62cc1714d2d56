use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use photostitch::{
    ArgbColor, CpuSurfaceProvider, DrawOptions, FileSource, FileSourceOpts, ImageSource,
    OutputFormat, ResampleFilter, StitchEngine, StitchPreferences, StitchRequest, StitcherOpts,
    TracingReporter,
};

#[derive(Parser, Debug)]
#[command(name = "photostitch", version, about = "Stitch images into one along an axis")]
struct Cli {
    /// Input image files or directories (directories expand to their images, sorted by name).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Preferences JSON; flags below override individual fields.
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Stack left to right.
    #[arg(long, conflicts_with = "vertical")]
    horizontal: bool,

    /// Stack top to bottom.
    #[arg(long)]
    vertical: bool,

    /// Upscale images so they cover the perpendicular axis (default: downscale to fit it).
    #[arg(long)]
    fill_up: bool,

    /// Zoom multiplier applied to every image and to spacing.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Canvas width; derived from the inputs when omitted.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height; derived from the inputs when omitted.
    #[arg(long)]
    height: Option<u32>,

    /// Horizontal spacing in device-independent units.
    #[arg(long)]
    spacing_h: Option<u32>,

    /// Vertical spacing in device-independent units.
    #[arg(long)]
    spacing_v: Option<u32>,

    /// Background color as AARRGGBB or RRGGBB hex.
    #[arg(long)]
    background: Option<String>,

    /// Pixels per device-independent unit.
    #[arg(long, default_value_t = 1.0)]
    density: f64,

    /// Resampling filter.
    #[arg(long, value_enum, default_value_t = FilterChoice::CatmullRom)]
    filter: FilterChoice,

    /// Output format; guessed from `--out` when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Encoder quality (JPEG only), 1-100.
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
    Webp,
}

impl From<FormatChoice> for OutputFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Png => OutputFormat::Png,
            FormatChoice::Jpeg => OutputFormat::Jpeg,
            FormatChoice::Webp => OutputFormat::WebP,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterChoice {
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl From<FilterChoice> for ResampleFilter {
    fn from(c: FilterChoice) -> Self {
        match c {
            FilterChoice::Nearest => ResampleFilter::Nearest,
            FilterChoice::Triangle => ResampleFilter::Triangle,
            FilterChoice::CatmullRom => ResampleFilter::CatmullRom,
            FilterChoice::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let prefs = resolve_prefs(&cli)?;
    let paths = expand_inputs(&cli.inputs)?;
    anyhow::ensure!(!paths.is_empty(), "no input images found");

    let format = match cli.format {
        Some(f) => f.into(),
        None => OutputFormat::from_path(&cli.out).unwrap_or(OutputFormat::Png),
    };

    let mut source = FileSource::new(paths, FileSourceOpts::default());
    let (width, height) = canvas_size(&cli, &prefs, &mut source)?;

    let opts = StitcherOpts {
        density: cli.density,
        draw: DrawOptions {
            filter: cli.filter.into(),
            blend: true,
        },
    };
    let mut stitcher = StitchEngine::new(
        Arc::new(CpuSurfaceProvider::default()),
        Arc::new(prefs),
        opts,
    )
    .setup(Box::new(source), Box::new(TracingReporter));

    let result = stitcher
        .stitch(StitchRequest {
            selected_scale: cli.scale,
            result_width: width,
            result_height: height,
            format,
            quality: cli.quality,
        })
        .await;

    let Some(output) = result.output else {
        anyhow::bail!("stitch produced no output ({:?})", result.status);
    };
    photostitch::write_to_path(&output, format, cli.quality, &cli.out)
        .with_context(|| format!("write '{}'", cli.out.display()))?;

    eprintln!(
        "wrote {} ({} images, {}x{})",
        cli.out.display(),
        result.processed_count,
        output.width(),
        output.height()
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_prefs(cli: &Cli) -> anyhow::Result<StitchPreferences> {
    let mut prefs = match &cli.prefs {
        Some(path) => StitchPreferences::from_json_path(path)?,
        None => StitchPreferences::default(),
    };

    if cli.horizontal {
        prefs.stack_horizontally = true;
    }
    if cli.vertical {
        prefs.stack_horizontally = false;
    }
    if cli.fill_up {
        prefs.scale_priority = true;
    }
    if let Some(v) = cli.spacing_h {
        prefs.image_spacing_horizontal = v;
    }
    if let Some(v) = cli.spacing_v {
        prefs.image_spacing_vertical = v;
    }
    if let Some(bg) = &cli.background {
        prefs.bg_fill_color = ArgbColor::parse_hex(bg)?;
    }
    Ok(prefs)
}

fn expand_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let dir = FileSource::from_dir(input, FileSourceOpts::default())?;
            out.extend(dir.paths().iter().cloned());
        } else {
            anyhow::ensure!(input.exists(), "input '{}' does not exist", input.display());
            out.push(input.clone());
        }
    }
    Ok(out)
}

/// Canvas size from flags, filling in whatever is missing by measuring the inputs.
///
/// The perpendicular extent defaults to the first image's scaled extent.
fn canvas_size(
    cli: &Cli,
    prefs: &StitchPreferences,
    source: &mut FileSource,
) -> anyhow::Result<(u32, u32)> {
    if let (Some(w), Some(h)) = (cli.width, cli.height) {
        return Ok((w, h));
    }

    let axis = prefs.axis();
    let mut dims = Vec::new();
    source.reset();
    while let Some(desc) = source.next_descriptor()? {
        dims.push((desc.width, desc.height));
    }
    source.reset();

    let fixed_across = match axis {
        photostitch::Axis::Horizontal => cli.height,
        photostitch::Axis::Vertical => cli.width,
    };
    let across = match fixed_across {
        Some(v) => v,
        None => {
            let (_, first_across) = dims
                .first()
                .map(|&(w, h)| axis.split(w, h))
                .context("no input images")?;
            (f64::from(first_across) * cli.scale).round().max(1.0) as u32
        }
    };

    let spacing = prefs.spacing_px(cli.density, cli.scale)?;
    let measured = photostitch::measure(
        axis,
        cli.scale,
        across,
        spacing,
        prefs.priority(),
        dims.iter().copied(),
    )?;
    Ok((
        cli.width.unwrap_or(measured.width),
        cli.height.unwrap_or(measured.height),
    ))
}
