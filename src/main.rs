//! tabsel: streaming column selection for tab-separated data
//!
//! Usage: tabsel <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tabsel::commands::{HeadersCommand, SelectCommand};
use tabsel::config::{parse_index_list, SelectorOptions};
use tabsel::SelectError;

#[derive(Parser)]
#[command(name = "tabsel")]
#[command(version)]
#[command(about = "Select columns from tab-separated data by index or header name", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select columns, streaming input to output
    Select {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated 0-based column indexes, e.g. 0,2
        #[arg(short = 'c', long)]
        columns: Option<String>,

        /// Comma-separated header names; the first row must be the header
        #[arg(short = 'n', long, value_delimiter = ',')]
        names: Vec<String>,

        /// Output buffer pre-allocation factor (>= 1)
        #[arg(long, default_value = "1.0")]
        buffer_multiplier: f64,

        /// Bytes read per step (default: 2MB, 64KB with --low-memory)
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Use smaller I/O buffers
        #[arg(long)]
        low_memory: bool,

        /// Memory-map the input file instead of reading it
        #[arg(long)]
        mmap: bool,

        /// Print statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// List header columns with their indexes
    Headers {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tabsel={level}")));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Select {
            input,
            output,
            columns,
            names,
            buffer_multiplier,
            chunk_size,
            low_memory,
            mmap,
            stats,
        } => run_select(
            input,
            output,
            columns,
            names,
            buffer_multiplier,
            chunk_size,
            low_memory,
            mmap,
            stats,
        ),
        Commands::Headers { input } => run_headers(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// `None` and `-` both mean stdin.
fn file_input(input: Option<PathBuf>) -> Option<PathBuf> {
    input.filter(|p| p.to_string_lossy() != "-")
}

#[allow(clippy::too_many_arguments)]
fn run_select(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    columns: Option<String>,
    names: Vec<String>,
    buffer_multiplier: f64,
    chunk_size: Option<usize>,
    low_memory: bool,
    mmap: bool,
    stats: bool,
) -> Result<(), SelectError> {
    let mut options = SelectorOptions::new().with_cache_buffer_multiplier(buffer_multiplier);
    if let Some(list) = columns {
        options = options.with_col_indexes(parse_index_list(&list)?);
    }
    if !names.is_empty() {
        options = options.with_col_names(names);
    }
    // Fail on bad options before touching the input.
    options.validate()?;

    let cmd = SelectCommand::new(options)
        .with_low_memory(low_memory)
        .with_chunk_size(chunk_size.unwrap_or(0));

    let mut sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let result = match file_input(input) {
        Some(path) if mmap => cmd.run_mmap(&path, &mut sink)?,
        Some(path) => cmd.run(&path, &mut sink)?,
        None => {
            if mmap {
                tracing::warn!("--mmap ignored for stdin input");
            }
            cmd.run_stdin(&mut sink)?
        }
    };

    if stats {
        eprintln!("Select stats: {}", result);
    }

    Ok(())
}

fn run_headers(input: Option<PathBuf>) -> Result<(), SelectError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let cmd = HeadersCommand::new();

    let count = match file_input(input) {
        Some(path) => cmd.run(&path, &mut handle)?,
        None => cmd.run_stdin(&mut handle)?,
    };
    tracing::info!(columns = count, "listed header");

    Ok(())
}
