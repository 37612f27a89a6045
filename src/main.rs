use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yttext::format::{self, OutputFormat};
use yttext::{ClientConfig, ErrorKind, TranscriptError, TranscriptFetcher};

static LANGUAGE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z-]{2,10}$").expect("language pattern is valid"));

#[derive(Parser)]
#[command(
    name = "yttext",
    version,
    about = "Download YouTube captions as a readable, paragraphed transcript"
)]
struct Cli {
    /// YouTube URL or 11 character video id
    #[arg(value_name = "URL_OR_ID")]
    locator: String,

    /// Preferred caption language (e.g. en, es); translated if not published natively
    #[arg(short, long, value_name = "LANG", env = "YTTEXT_LANGUAGE", value_parser = parse_language)]
    language: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the transcript to FILE instead of stdout
    #[arg(short, long, value_name = "FILE", conflicts_with = "save")]
    output: Option<PathBuf>,

    /// Write the transcript to <VIDEO_ID>.<ext> in the current directory
    #[arg(long)]
    save: bool,

    /// Target paragraph length in characters
    #[arg(long, value_name = "CHARS", env = "YTTEXT_PARAGRAPH_LENGTH")]
    paragraph_length: Option<usize>,

    /// YAML file with client settings
    #[arg(long, value_name = "FILE", env = "YTTEXT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging for yttext, on top of any RUST_LOG directives
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(log_filter(env_directives.as_deref(), cli.verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// `RUST_LOG` directives (or `yttext=info`), with `-v` forcing debug output
/// for this crate either way.
fn log_filter(env_directives: Option<&str>, verbose: bool) -> EnvFilter {
    let filter = env_directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("yttext=info"));
    if !verbose {
        return filter;
    }
    match "yttext=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn parse_language(value: &str) -> std::result::Result<String, String> {
    let value = value.trim();
    if LANGUAGE_CODE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "{value:?} is not a language code (2-10 letters or '-', e.g. en, pt-BR)"
        ))
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(length) = cli.paragraph_length {
        config.paragraph_target = length;
    }

    let fetcher = TranscriptFetcher::from_config(config)?;

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, cancelling request");
            on_ctrl_c.cancel();
        }
    });

    let result = fetcher
        .fetch_transcript(&cli.locator, cli.language.as_deref(), &cancel)
        .await?;
    let rendered = format::render(&result, cli.format)?;

    let path = match (cli.output, cli.save) {
        (Some(path), _) => Some(path),
        (None, true) => Some(PathBuf::from(format::default_export_name(&result, cli.format))),
        (None, false) => None,
    };

    match path {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Transcript saved to: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn exit_code(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<TranscriptError>().map(TranscriptError::kind) {
        Some(ErrorKind::InvalidLocator) | Some(ErrorKind::Config) => 2,
        Some(ErrorKind::MetadataNotFound)
        | Some(ErrorKind::NoCaptionsAvailable)
        | Some(ErrorKind::TranscriptUnavailable) => 3,
        Some(ErrorKind::NetworkFailure) => 4,
        Some(ErrorKind::Cancelled) => 130,
        None => 1,
    }
}
