use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use rcf_core::{ClosedForm, RenderConfig};
use rcf_render::{render_closed_form, ClosedFormRenderer, TextRenderer};

use crate::read_json;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// JSON closed form (`{"terms": [...]}`).
    #[arg(long)]
    pub closed_form: PathBuf,
    /// Decimal digits kept in displayed numbers.
    #[arg(long, default_value_t = 4)]
    pub precision: u32,
    /// Index variable used in the notation.
    #[arg(long, default_value = "n")]
    pub variable: String,
    /// Skip structured rendering and rewrite the plain notation instead.
    #[arg(long)]
    pub text: bool,
}

pub fn run(args: &RenderArgs) -> Result<(), Box<dyn Error>> {
    let closed_form: ClosedForm = read_json(&args.closed_form)?;
    let config = RenderConfig::new(args.precision)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?
        .with_variable(args.variable.clone());
    let rendered = if args.text {
        TextRenderer.render(&closed_form, &config)
    } else {
        render_closed_form(&closed_form, &config).map(|rendered| rendered.text)
    };
    let text = rendered.map_err(|err| Box::new(err) as Box<dyn Error>)?;
    println!("{text}");
    Ok(())
}
