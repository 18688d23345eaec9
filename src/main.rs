//! gcollect - delete files older than an age threshold.
//!
//! Usage:
//!   gcollect -dir=PATH [-sub] [-ext=LIST] [-expire=DAYS] [-confirm] [-silent]
//!   gcollect --help          Show help
//!
//! Single-dash long flags are accepted alongside the usual `--flag` form.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::builder::BoolishValueParser;
use clap::{CommandFactory, Parser, ValueEnum};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gcollect_core::{ConfigError, ExtensionFilter, TraversalConfig, parse_expire_days};
use gcollect_ops::{ConfirmationGate, ConsoleReporter, Reporter, StdinResponses, SummaryFormat};
use gcollect_scan::Walker;

/// Long flags that may be written with a single dash.
const LEGACY_FLAGS: &[&str] = &[
    "dir",
    "sub",
    "ext",
    "expire",
    "confirm",
    "silent",
    "prune-empty",
    "format",
];

#[derive(Parser)]
#[command(
    name = "gcollect",
    version,
    about = "Delete files older than a number of days",
    long_about = "gcollect walks a directory (or checks a single file) and deletes \
                  regular files whose modification time is older than the expiry \
                  threshold, asking for confirmation unless told otherwise.",
    after_help = "Example: gcollect -dir=/var/www/project-name/data/cache -ext=jpg,jpeg,png,gif,webp -expire=60"
)]
struct Cli {
    /// Directory or single file to process
    #[arg(long)]
    dir: Option<String>,

    /// Descend into subdirectories
    #[arg(long, num_args = 0..=1, require_equals = true, default_value = "false",
          default_missing_value = "true", value_parser = BoolishValueParser::new())]
    sub: bool,

    /// Comma-separated extensions to restrict deletion to (e.g. "jpg,png")
    #[arg(long, default_value = "")]
    ext: String,

    /// Age threshold in days; 0 deletes regardless of age
    #[arg(long, default_value = "90", allow_hyphen_values = true)]
    expire: String,

    /// Delete without asking
    #[arg(long, num_args = 0..=1, require_equals = true, default_value = "false",
          default_missing_value = "true", value_parser = BoolishValueParser::new())]
    confirm: bool,

    /// With --confirm, do not print per-file messages
    #[arg(long, num_args = 0..=1, require_equals = true, default_value = "false",
          default_missing_value = "true", value_parser = BoolishValueParser::new())]
    silent: bool,

    /// With --sub, remove directories left empty after deletion
    #[arg(long, num_args = 0..=1, require_equals = true, default_value = "false",
          default_missing_value = "true", value_parser = BoolishValueParser::new())]
    prune_empty: bool,

    /// Summary format
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<OutputFormat> for SummaryFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => SummaryFormat::Text,
            OutputFormat::Json => SummaryFormat::Json,
        }
    }
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let mut reporter = ConsoleReporter::stdio(cli.format.into());

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(ConfigError::MissingRoot) => {
            reporter.fatal(&ConfigError::MissingRoot.into());
            eprintln!("{}", Cli::command().render_help());
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => {
            reporter.fatal(&err.into());
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut gate = ConfirmationGate::new(&config, StdinResponses);
    match Walker::new(&config).run(&mut gate, &mut reporter) {
        Ok(outcome) => {
            info!(
                deleted = outcome.files_deleted,
                failed = outcome.files_failed,
                elapsed_ms = outcome.duration.as_millis() as u64,
                "run finished"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            reporter.fatal(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Turn parsed flags into a config. `-dir` is checked first, then the expiry;
/// neither touches the filesystem.
fn build_config(cli: &Cli) -> Result<TraversalConfig, ConfigError> {
    let dir = cli
        .dir
        .as_deref()
        .filter(|dir| !dir.is_empty())
        .ok_or(ConfigError::MissingRoot)?;

    let expire_days = parse_expire_days(&cli.expire)?;

    Ok(TraversalConfig::builder()
        .root(dir)
        .recursive(cli.sub)
        .extensions(ExtensionFilter::parse(&cli.ext))
        .expire_days(expire_days)
        .auto_confirm(cli.confirm)
        .silent(cli.silent)
        .prune_empty_dirs(cli.prune_empty)
        .build()?)
}

/// Rewrite `-dir=x` style flags to `--dir=x` so clap can parse them.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if LEGACY_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}
