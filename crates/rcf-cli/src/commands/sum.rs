use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use rcf_core::RenderConfig;
use rcf_orch::{clamp_index, prepare, Scenario, SumInput, TermInput};
use rcf_render::{format_value, sum_label};
use rcf_verify::cross_check_sum;

use crate::read_json;

#[derive(Args, Debug)]
pub struct SumArgs {
    /// JSON list of summand terms (`[{"poly": [...], "base": [re, im]}]`).
    #[arg(long)]
    pub terms: PathBuf,
    /// Upper summation bound; negative values clamp to zero.
    #[arg(long, allow_hyphen_values = true)]
    pub index: f64,
    /// Decimal digits kept in displayed numbers.
    #[arg(long, default_value_t = 4)]
    pub precision: u32,
}

pub fn run(args: &SumArgs) -> Result<(), Box<dyn Error>> {
    let terms: Vec<TermInput> = read_json(&args.terms)?;
    let config =
        RenderConfig::new(args.precision).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let index = clamp_index(args.index).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let prepared = prepare(&Scenario::Sum(SumInput { terms }))
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let check = cross_check_sum(&prepared.spec.forcing_terms, index)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    println!("{}", sum_label(&prepared.spec.forcing_terms, &config));
    println!("n = {index}");
    println!("direct:  {}", format_value(check.direct, &config));
    println!("forward: {}", format_value(check.forward, &config));
    println!("deviation: {:e}", check.deviation());
    Ok(())
}
