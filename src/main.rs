//! mdpress - Convert Markdown documents to styled PDF
//!
//! Entry point for the command-line tool. Handles argument parsing,
//! logging initialization, and configuration loading.

use anyhow::{Context, Result};
use mdpress::config::{Config, Preset};
use mdpress::error::AppError;
use mdpress::markdown::{Converter, ExportFormat};
use mdpress::pdf::PdfEngine;
use mdpress::utils::path::{expand_tilde, is_markdown};
use std::path::PathBuf;

/// Application name for logging
const APP_NAME: &str = "mdpress";

/// Options gathered from the command line
#[derive(Debug, Default)]
struct Flags {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    html: bool,
    preset: Option<Preset>,
    config: Option<PathBuf>,
    engine: Option<PdfEngine>,
    no_wrap: bool,
    verbose: bool,
}

fn main() {
    let flags = parse_args();

    init_logging(flags.verbose);

    if let Err(err) = run(flags) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

/// Initialize the logging system
fn init_logging(verbose: bool) {
    // Set default log level if not specified
    if std::env::var("RUST_LOG").is_err() {
        let filter = if verbose { "info,mdpress=debug" } else { "warn" };
        std::env::set_var("RUST_LOG", filter);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();
}

fn run(flags: Flags) -> Result<()> {
    let Some(input) = flags.input else {
        print_help();
        std::process::exit(1);
    };
    let input = expand_tilde(&input);
    if !is_markdown(&input) {
        log::warn!("{} does not have a markdown extension", input.display());
    }

    let mut config = match &flags.config {
        Some(path) => Config::load_from(&expand_tilde(path))
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            log::warn!("{err}, using default configuration");
            Config::default()
        }),
    };
    if let Some(preset) = flags.preset {
        config.apply_preset(preset);
    }
    if let Some(engine) = flags.engine {
        config.output.pdf_engine = engine;
    }
    if flags.no_wrap {
        config.code.wrap = false;
    }

    let format = if flags.html {
        ExportFormat::Html
    } else {
        ExportFormat::Pdf
    };
    let output = flags.output.as_deref().map(expand_tilde);

    let converter = Converter::new(config).context("building highlighters")?;
    let conversion = match converter.convert(&input, output.as_deref(), format) {
        Ok(conversion) => conversion,
        Err(AppError::FileIO(err)) => anyhow::bail!(err.user_message()),
        Err(err) => return Err(err).context(format!("converting {}", input.display())),
    };

    if let Some(offset) = conversion.report.unterminated_at {
        eprintln!("Warning: unterminated code fence at byte {offset}");
    }
    if !conversion.report.unknown_languages.is_empty() {
        log::info!(
            "not highlighted (unknown language): {}",
            conversion.report.unknown_languages.join(", ")
        );
    }
    println!("{}", conversion.output.display());
    Ok(())
}

/// Parse command line arguments
fn parse_args() -> Flags {
    let args: Vec<String> = std::env::args().collect();
    let mut flags = Flags::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-v" | "--verbose" => flags.verbose = true,
            "--html" => flags.html = true,
            "--no-wrap" => flags.no_wrap = true,
            "-o" | "--output" => flags.output = Some(PathBuf::from(value(&args, &mut i))),
            "--config" => flags.config = Some(PathBuf::from(value(&args, &mut i))),
            "--preset" => flags.preset = Some(parse_value(&args, &mut i)),
            "--engine" => flags.engine = Some(parse_value(&args, &mut i)),
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
            arg => {
                if flags.input.is_some() {
                    eprintln!("Error: only one input file may be given");
                    std::process::exit(1);
                }
                flags.input = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    flags
}

/// The argument following option `args[*i]`
fn value<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    match args.get(*i + 1) {
        Some(v) => {
            *i += 1;
            v
        }
        None => {
            eprintln!("Error: {} requires an argument", args[*i]);
            std::process::exit(1);
        }
    }
}

fn parse_value<T>(args: &[String], i: &mut usize) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let option = args[*i].clone();
    match value(args, i).parse() {
        Ok(v) => v,
        Err(err) => {
            eprintln!("Error: {option}: {err}");
            std::process::exit(1);
        }
    }
}

/// Print help message
fn print_help() {
    println!(
        r#"mdpress - Convert Markdown to PDF with highlighted code blocks

USAGE:
    mdpress [OPTIONS] <INPUT.md>

OPTIONS:
    -o, --output <PATH>     Output file (default: first heading + .pdf, next to input)
        --html              Write the HTML page instead of a PDF
        --preset <NAME>     Layout preset: default, compact
        --config <PATH>     Configuration file (default: ~/.config/mdpress/config.json)
        --engine <NAME>     PDF engine: wkhtmltopdf, weasyprint
        --no-wrap           Do not wrap long code lines
    -v, --verbose           Log progress
    -h, --help              Show this help message
    -V, --version           Show version information

HIGHLIGHTED LANGUAGES:
    sql, mysql, postgresql, postgres, sqlite, tsql, plsql
    python, py, python3
    pyspark, spark
    r, rlang, rscript

EXAMPLES:
    mdpress notes.md                    Write "<First Heading>.pdf"
    mdpress notes.md -o out.pdf         Write to a specific file
    mdpress --html --preset compact a.md
"#
    );
}

/// Print version information
fn print_version() {
    println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
}
