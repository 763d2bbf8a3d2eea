use std::error::Error;
use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    render::{self, RenderArgs},
    run::{self, RunArgs},
    simulate::{self, SimulateArgs},
    sum::{self, SumArgs},
};
use env_logger::Env;
use log::debug;
use serde::de::DeserializeOwned;

mod commands;
mod settings;

#[derive(Parser, Debug)]
#[command(
    name = "rcf",
    version,
    about = "Render and cross-check closed forms of linear recurrences"
)]
struct Cli {
    /// Log verbosity; `RUST_LOG` refines it per module.
    #[arg(long, value_enum, global = true, default_value = "info")]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a saved closed form in canonical notation.
    Render(RenderArgs),
    /// Forward-simulate a recurrence specification.
    Simulate(SimulateArgs),
    /// Evaluate a partial sum by direct summation and forward simulation.
    Sum(SumArgs),
    /// Run a scenario end to end against a saved solver output.
    Run(RunArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .filter_level(cli.log_level.into())
        .init();
    debug!("rcf v{} starting", env!("CARGO_PKG_VERSION"));
    match cli.command {
        Command::Render(args) => render::run(&args),
        Command::Simulate(args) => simulate::run(&args),
        Command::Sum(args) => sum::run(&args),
        Command::Run(args) => run::run(&args),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let bytes = fs::read(path)?;
    rcf_orch::from_json_slice(&bytes).map_err(|err| Box::new(err) as Box<dyn Error>)
}

fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
