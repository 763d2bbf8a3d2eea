use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use rcf_core::{LinearRecurrenceSpec, RenderConfig};
use rcf_orch::clamp_index;
use rcf_render::{format_value, recurrence_label};
use rcf_verify::forward_sequence;

use crate::read_json;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// JSON recurrence specification.
    #[arg(long)]
    pub spec: PathBuf,
    /// Index to evaluate; negative values clamp to zero.
    #[arg(long, allow_hyphen_values = true)]
    pub index: f64,
    /// Decimal digits kept in displayed numbers.
    #[arg(long, default_value_t = 4)]
    pub precision: u32,
    /// Print every value up to the index instead of the last one.
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: &SimulateArgs) -> Result<(), Box<dyn Error>> {
    let spec: LinearRecurrenceSpec = read_json(&args.spec)?;
    let config =
        RenderConfig::new(args.precision).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let index = clamp_index(args.index).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let values =
        forward_sequence(&spec, index).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    println!("{}", recurrence_label(&spec, &config));
    let start = if args.all { 0 } else { values.len() - 1 };
    for (offset, value) in values.iter().enumerate().skip(start) {
        println!("a({offset}) = {}", format_value(*value, &config));
    }
    Ok(())
}
