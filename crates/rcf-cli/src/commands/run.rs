use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use futures::executor::block_on;
use log::info;
use rcf_orch::{
    clamp_index, ClosedFormDocument, Orchestrator, ReplaySolver, RunOutcome, RunReport,
    Scenario, VerifyMode,
};
use rcf_render::{format_value, partial_sum_label};

use crate::settings::RunSettings;
use crate::write_json;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// JSON scenario (`{"kind": "recurrence", ...}` or `{"kind": "sum", ...}`).
    #[arg(long)]
    pub spec: PathBuf,
    /// JSON closed-form document saved from the solver.
    #[arg(long)]
    pub solution: PathBuf,
    /// Optional YAML run settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Overrides the configured precision.
    #[arg(long)]
    pub precision: Option<u32>,
    /// Overrides the configured index variable.
    #[arg(long)]
    pub variable: Option<String>,
    /// Overrides the configured verification index; negative values clamp to zero.
    #[arg(long, allow_hyphen_values = true)]
    pub index: Option<f64>,
    /// Overrides the configured verification engines.
    #[arg(long, value_enum)]
    pub verify: Option<VerifyArg>,
    /// Directory receiving `run_report.json`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum VerifyArg {
    Forward,
    Direct,
    Both,
}

impl From<VerifyArg> for VerifyMode {
    fn from(arg: VerifyArg) -> Self {
        match arg {
            VerifyArg::Forward => VerifyMode::Forward,
            VerifyArg::Direct => VerifyMode::Direct,
            VerifyArg::Both => VerifyMode::Both,
        }
    }
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let settings = resolve_settings(args)?;
    let options = settings
        .to_options()
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let scenario: Scenario = crate::read_json(&args.spec)?;
    let document = ClosedFormDocument::from_json_slice(&std::fs::read(&args.solution)?)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let solver = ReplaySolver::new(document).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let orchestrator = Orchestrator::new(solver);

    let report = match block_on(orchestrator.run(&scenario, &options)) {
        RunOutcome::Completed(report) => report,
        RunOutcome::Failed(error) => return Err(Box::new(error)),
        RunOutcome::Superseded(run_id) => {
            return Err(format!("run {run_id} was superseded").into());
        }
    };
    print_report(&report, &settings);
    if let Some(out) = &args.out {
        let path = out.join("run_report.json");
        write_json(&path, &report)?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn resolve_settings(args: &RunArgs) -> Result<RunSettings, Box<dyn Error>> {
    let mut settings = match &args.config {
        Some(path) => RunSettings::load(path)?,
        None => RunSettings::default(),
    };
    if let Some(precision) = args.precision {
        settings.precision = precision;
    }
    if let Some(variable) = &args.variable {
        settings.variable = variable.clone();
    }
    if let Some(index) = args.index {
        settings.verify_index =
            clamp_index(index).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    }
    if let Some(verify) = args.verify {
        settings.verify = verify.into();
    }
    Ok(settings)
}

fn print_report(report: &RunReport, settings: &RunSettings) {
    let config = rcf_core::RenderConfig {
        precision: settings.precision,
        variable: settings.variable.clone(),
    };
    println!("{} {}", report.label, report.notation);
    if let Some(sum) = &report.partial_sum_notation {
        println!("{} {sum}", partial_sum_label(&config));
    }
    let verification = &report.verification;
    println!("{} = {}", config.variable, verification.index);
    println!("solver:  {}", format_value(verification.solver, &config));
    if let Some(forward) = verification.forward {
        println!("forward: {}", format_value(forward, &config));
    }
    if let Some(direct) = verification.direct {
        println!("direct:  {}", format_value(direct, &config));
    }
    if let Some(value) = verification.partial_sum_solver {
        println!("S solver:  {}", format_value(value, &config));
    }
    if let Some(value) = verification.partial_sum_forward {
        println!("S forward: {}", format_value(value, &config));
    }
    println!("max deviation: {:e}", verification.max_deviation());
}
