//! Pager Decode
//!
//! Runs piped input through the pager's escape decoder and prints the
//! resulting styled text, either as style runs or as JSON tokens.

use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::AsFd;
use std::path::PathBuf;
use std::process::ExitCode;

use pager_source::app::{default_config_path, Config};
use pager_source::core::Token;
use pager_source::source::{PipeSource, Source};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    // Parse command line arguments
    let mut input_file: Option<String> = None;
    let mut config_file: Option<PathBuf> = None;
    let mut output_format = OutputFormat::Text;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--file" => {
                i += 1;
                if i < args.len() {
                    input_file = Some(args[i].clone());
                }
            },
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(PathBuf::from(&args[i]));
                }
            },
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            },
            "-t" | "--text" => {
                output_format = OutputFormat::Text;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    // A broken per-user config is not fatal, but is only reported once logging is up
    let mut ignored_config = None;
    let config = match &config_file {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            },
        },
        None => match default_config_path() {
            Some(path) => Config::load_if_exists(&path).unwrap_or_else(|e| {
                ignored_config = Some((path, e));
                Config::default()
            }),
            None => Config::default(),
        },
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Some((path, e)) = ignored_config {
        tracing::warn!("ignoring {}: {}", path.display(), e);
    }

    let result = match &input_file {
        Some(path) => match File::open(path) {
            Ok(file) => run(file, &config, output_format),
            Err(e) => {
                tracing::error!("Error opening '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => run(io::stdin(), &config, output_format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            ExitCode::FAILURE
        },
    }
}

/// Pump the source until end of input
fn run<R: Read + AsFd>(
    reader: R,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = PipeSource::with_config(reader, config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    while !source.eof() {
        if !source.poll_ready(config.source.poll_timeout_ms)? {
            continue;
        }
        let tokens = source.read_chunk()?;
        write_tokens(&mut out, &tokens, format)?;
    }

    out.flush()?;
    Ok(())
}

fn write_tokens(out: &mut impl Write, tokens: &[Token], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            for token in tokens {
                let line = serde_json::to_string(token).map_err(io::Error::other)?;
                writeln!(out, "{}", line)?;
            }
        },
        OutputFormat::Text => {
            // One line per run of identically styled characters
            for group in tokens.chunk_by(|a, b| a.style == b.style) {
                let text: String = group.iter().map(|t| t.ch).collect();
                writeln!(out, "{}\t{:?}", group[0].style, text)?;
            }
        },
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn print_help() {
    println!("Pager Decode");
    println!();
    println!("Usage: pager-decode [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -f, --file <PATH>    Read input from file");
    println!("  -c, --config <PATH>  Load configuration from a JSON file");
    println!("  -j, --json           Print one JSON token per line");
    println!("  -t, --text           Print runs of styled text (default)");
    println!("  -h, --help           Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!();
    println!("Examples:");
    println!("  printf 'a\\033[1mb\\033[0m' | pager-decode");
    println!("  man ls | pager-decode --json");
}
