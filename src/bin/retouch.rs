use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "retouch", version)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crop an image, either to a fixed region or by replaying pointer gestures.
    Crop(CropArgs),
    /// Render a breathing-zoom WebM video (requires `ffmpeg`).
    Animate(AnimateArgs),
    /// Print the edit prompt for the configured style.
    Prompt(PromptArgs),
    /// Print the JSON body of an edit request for an image.
    Request(RequestArgs),
    /// Classify an edit response JSON and write the returned image.
    Classify(ClassifyArgs),
}

#[derive(Parser, Debug)]
struct CropArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Region as `x,y,width,height` percentages; skips gesture replay.
    #[arg(long, conflicts_with = "gestures")]
    region: Option<retouch::CropRegion>,

    /// JSON array of pointer events (container pixel positions) to replay.
    #[arg(long)]
    gestures: Option<PathBuf>,

    /// Displayed container size as `WIDTHxHEIGHT`; defaults to the image's natural size.
    #[arg(long, value_parser = parse_container)]
    container: Option<retouch::ContainerSize>,

    /// Aspect preset (`free`, `1:1`, `9:16`, `16:9`, `21:9`, `4:3`, `3:4`).
    #[arg(long)]
    aspect: Option<retouch::AspectPreset>,

    /// Print the crop as a PNG data URI on stdout.
    #[arg(long)]
    data_uri: bool,

    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output WebM path.
    #[arg(long)]
    out: PathBuf,

    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PromptArgs {
    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append a chat refinement to the prompt.
    #[arg(long)]
    refine: Option<String>,
}

#[derive(Parser, Debug)]
struct RequestArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Target aspect (`AUTO`, `1:1`, `3:4`, `4:3`, `9:16`, `16:9`, `21:9`).
    #[arg(long, default_value = "1:1")]
    aspect: retouch::TargetAspect,

    /// Prompt text; defaults to the prompt built from the configured style.
    #[arg(long)]
    prompt: Option<String>,

    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    /// Edit response JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path for the decoded image.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Crop(args) => cmd_crop(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Prompt(args) => cmd_prompt(args),
        Command::Request(args) => cmd_request(args),
        Command::Classify(args) => cmd_classify(args),
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
        .with_target(false)
        .init();
}

fn parse_container(s: &str) -> Result<retouch::ContainerSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    retouch::ContainerSize::new(w, h).map_err(|e| e.to_string())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<retouch::StudioConfig> {
    Ok(match path {
        Some(path) => retouch::StudioConfig::from_path(path)?,
        None => retouch::StudioConfig::default(),
    })
}

fn read_gestures(path: &Path) -> anyhow::Result<Vec<retouch::PointerEvent>> {
    let f = File::open(path).with_context(|| format!("open gestures '{}'", path.display()))?;
    let events = serde_json::from_reader(BufReader::new(f)).with_context(|| "parse gestures JSON")?;
    Ok(events)
}

fn cmd_crop(args: CropArgs) -> anyhow::Result<()> {
    if args.out.is_none() && !args.data_uri {
        anyhow::bail!("nothing to do: pass --out and/or --data-uri");
    }
    let cfg = load_config(args.config.as_deref())?;
    let source = retouch::load_image_path(&args.in_path)?;

    let cropped = match args.region {
        Some(region) => retouch::extract_region(&source, &region)?,
        None => {
            let container = match args.container {
                Some(c) => c,
                None => retouch::ContainerSize::new(
                    f64::from(source.natural_width()),
                    f64::from(source.natural_height()),
                )?,
            };
            let mut session = retouch::CropSession::new(container);
            session.set_aspect_lock(args.aspect.unwrap_or(cfg.crop.aspect).lock());
            session.begin(source)?;
            if let Some(path) = args.gestures.as_deref() {
                for event in read_gestures(path)? {
                    session.handle_event(event);
                }
            }
            session.confirm()?
        }
    };

    if let Some(out) = args.out.as_deref() {
        cropped.save_png(out)?;
        eprintln!(
            "wrote {} ({}x{} at {},{})",
            out.display(),
            cropped.rect.width,
            cropped.rect.height,
            cropped.rect.x,
            cropped.rect.y
        );
    }
    if args.data_uri {
        println!("{}", cropped.to_data_uri()?);
    }
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let synth = retouch::MotionSynthesizer::new(cfg.motion)?;
    let source = retouch::load_image_path(&args.in_path)?;
    let artifact = synth.synthesize(&source, &args.out, &retouch::CancelToken::new())?;
    eprintln!(
        "wrote {} ({}, {}x{}, {} frames)",
        artifact.uri(),
        artifact.mime(),
        artifact.canvas.width,
        artifact.canvas.height,
        artifact.frames
    );
    Ok(())
}

fn cmd_prompt(args: PromptArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let prompt = match args.refine.as_deref() {
        Some(message) => retouch::refine_prompt(&cfg.style, message),
        None => retouch::build_prompt(&cfg.style),
    };
    println!("{prompt}");
    Ok(())
}

fn cmd_request(args: RequestArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let mime = image::guess_format(&bytes)
        .map(|f| f.to_mime_type())
        .unwrap_or("image/jpeg");
    let uri = retouch::DataUri::from_bytes(mime, &bytes);
    let prompt = args
        .prompt
        .unwrap_or_else(|| retouch::build_prompt(&cfg.style));
    let request = retouch::EditRequest::from_image(&uri.to_string(), prompt, args.aspect)?;
    println!("{}", serde_json::to_string_pretty(&request.to_json())?);
    Ok(())
}

fn cmd_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read response '{}'", args.in_path.display()))?;
    let response = retouch::EditResponse::from_json_str(&json)?;
    let uri = response.into_image().map_err(retouch::StudioError::from)?;
    let bytes = uri.decode_payload()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write image '{}'", args.out.display()))?;
    eprintln!("wrote {} ({})", args.out.display(), uri.mime);
    Ok(())
}
