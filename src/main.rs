// SPDX-License-Identifier: MPL-2.0
use lens_edit::config;
use lens_edit::editor::{Session, TransformPatch};
use lens_edit::error::Error;
use lens_edit::media::{DirectorySink, ExportFormat};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`info` when unset).
const LOG_ENV: &str = "LENS_EDIT_LOG";

const HELP: &str = "\
lens_edit - apply one edit to an image and export it

USAGE:
  lens_edit <INPUT> [OPTIONS]

OPTIONS:
  --scale F           Uniform scale, 0.1 to 3.0
  --rotate DEG        Rotation in degrees, -180 to 180
  --flip-h            Mirror horizontally
  --flip-v            Mirror vertically
  --brightness P      Brightness percent, 0 to 200
  --contrast P        Contrast percent, 0 to 200
  --saturation P      Saturation percent, 0 to 200
  --format FMT        png, jpeg or webp
  --quality Q         Lossy quality, 0.01 to 1.0
  --out DIR           Output directory (default: current directory)
  --name FILE         Output filename (default: generated)
  --config-dir DIR    Directory holding settings.toml
  -h, --help          Print this help
";

struct Args {
    input: PathBuf,
    patch: TransformPatch,
    format: Option<ExportFormat>,
    quality: Option<f32>,
    out: PathBuf,
    name: Option<String>,
    config_dir: Option<PathBuf>,
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_extension(value).ok_or_else(|| format!("unknown format: {value}"))
}

fn parse_args(mut args: pico_args::Arguments) -> Result<Option<Args>, pico_args::Error> {
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let patch = TransformPatch {
        scale: args.opt_value_from_str("--scale")?,
        rotation_degrees: args.opt_value_from_str("--rotate")?,
        flip_horizontal: args.contains("--flip-h").then_some(true),
        flip_vertical: args.contains("--flip-v").then_some(true),
        brightness_percent: args.opt_value_from_str("--brightness")?,
        contrast_percent: args.opt_value_from_str("--contrast")?,
        saturation_percent: args.opt_value_from_str("--saturation")?,
    };
    let format = args.opt_value_from_fn("--format", parse_format)?;
    let quality = args.opt_value_from_str("--quality")?;
    let out = args
        .opt_value_from_str("--out")?
        .unwrap_or_else(|| PathBuf::from("."));
    let name = args.opt_value_from_str("--name")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let input = args.free_from_str()?;

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unused arguments");
    }

    Ok(Some(Args {
        input,
        patch,
        format,
        quality,
        out,
        name,
        config_dir,
    }))
}

fn run(args: Args) -> Result<PathBuf, Error> {
    // A bad config file is already logged as a warning
    let (config, _) = config::load_with_override(args.config_dir);

    let mut request = config.export_request();
    if let Some(format) = args.format {
        request.format = format;
    }
    if let Some(quality) = args.quality {
        request.quality = lens_edit::domain::editing::ExportQuality::new(quality);
    }
    request.filename = args.name;

    let mut session = Session::new(config, DirectorySink::new(args.out));
    session.load_path(&args.input)?;
    if !args.patch.is_empty() {
        session.update(&args.patch)?;
    }
    session.export(&request)?;

    session
        .sink()
        .written()
        .last()
        .cloned()
        .ok_or_else(|| Error::Sink("nothing was written".to_string()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(pico_args::Arguments::from_env()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
