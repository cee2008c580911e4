//! mailtext CLI - convert an HTML email body to plain text.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, LevelFilter};
use mailtext::{TextOptions, TextService};

fn main() {
    if let Err(err) = try_main() {
        let _ = writeln!(io::stderr(), "{err:?}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let html = read_input(cli.input.as_ref())?;
    let service = TextService::with_options(cli.options());
    debug!("converting with {:?}", service.options());

    let text = service.convert(&html);
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").context("failed to write output")?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Convert an HTML email body to readable plain text."
)]
struct Cli {
    /// HTML file to convert; stdin when absent or `-`
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Wrap lines at this many columns (0 disables wrapping)
    #[arg(short, long, value_name = "COLUMNS")]
    width: Option<usize>,
    /// Marker that starts each list item
    #[arg(long, value_name = "CHAR", default_value_t = '*')]
    list_marker: char,
    /// Rule symbol for h1 headings
    #[arg(long, value_name = "CHAR", default_value_t = '*')]
    primary_heading: char,
    /// Rule symbol for h2-h6 headings
    #[arg(long, value_name = "CHAR", default_value_t = '-')]
    secondary_heading: char,
    /// Suppress all log output
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    quiet: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> TextOptions {
        TextOptions {
            line_width: self.width,
            list_marker: self.list_marker,
            primary_heading_symbol: self.primary_heading,
            secondary_heading_symbol: self.secondary_heading,
        }
    }

    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.filter_level(cli.log_level());
    builder.format_timestamp(None);
    if let Err(err) = builder.try_init() {
        eprintln!("logger already initialized: {err}");
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .context("failed to read stdin")?;
            Ok(html)
        }
    }
}
