//! Command-line interface for clipmark
//!
//! Reads an HTML selection from a file or stdin and prints Markdown.
//!
//! Usage:
//!   clipmark [INPUT]                      - Convert INPUT (or stdin) to stdout
//!   clipmark page.html -o page.md         - Write the Markdown to a file
//!   clipmark --base-url https://x/ [...]  - Resolve relative links and images

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use clipmark::{parse_html, ClipmarkError, ConvertService, Options};
use log::{debug, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "clipmark", version, about = "Convert an HTML selection to Markdown")]
struct Cli {
    /// Input HTML file; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Write the Markdown here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Base URL for relative link and image destinations
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Leave `*`, `_` and backticks in text unescaped
    #[arg(long)]
    no_escape: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("clipmark: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` overrides the level picked by `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<(), ClipmarkError> {
    let html = read_input(cli.input.as_ref())?;
    debug!("read {} bytes of HTML", html.len());

    let mut options = Options::default();
    if let Some(base) = &cli.base_url {
        options = options.with_base_url(base)?;
    }
    options.escape = !cli.no_escape;

    let service = ConvertService::with_options(options);
    let fragment = parse_html(&html);
    let markdown = service.convert_selection(Some(&fragment))?;

    match &cli.output {
        Some(path) => fs::write(path, markdown)?,
        None => print!("{markdown}"),
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
