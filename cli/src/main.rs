mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, Metadata, Record};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "grid-diff")]
#[command(about = "Compare two grids of cell values and show row, column, and cell differences")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compare two grid files (.json or .csv)")]
    Diff {
        #[arg(help = "Path to the old/base file")]
        old: PathBuf,
        #[arg(help = "Path to the new/changed file")]
        new: PathBuf,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(long, short, help = "Quiet mode: only show summary")]
        quiet: bool,
        #[arg(long, help = "Let entirely blank rows and columns match each other")]
        blank_lines_match: bool,
        #[arg(long, value_name = "N", help = "Largest alignment table allowed per pass")]
        max_lcs_cells: Option<u64>,
    },
    #[command(about = "Show the sheets and dimensions of a grid file")]
    Info {
        #[arg(help = "Path to the file")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff {
            old,
            new,
            format,
            quiet,
            blank_lines_match,
            max_lcs_cells,
        } => commands::diff::run(&old, &new, format, quiet, blank_lines_match, max_lcs_cells),
        Commands::Info { path } => commands::info::run(&path),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging() {
    static LOGGER: SimpleLogger = SimpleLogger;
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log_level_from_env());
}

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn log_level_from_env() -> LevelFilter {
    match std::env::var("GRID_DIFF_LOG").as_deref() {
        Ok("error") => LevelFilter::Error,
        Ok("warn") => LevelFilter::Warn,
        Ok("info") => LevelFilter::Info,
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        Ok("off") => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}
