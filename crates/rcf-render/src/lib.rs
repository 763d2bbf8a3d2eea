#![deny(missing_docs)]
#![doc = "Canonical notation rendering for closed forms produced by an external recurrence solver."]

mod label;
mod number;
mod renderer;
mod structured;
mod text;

pub use label::{partial_sum_label, recurrence_label, render_general_terms, sum_label};
pub use number::{enclose_if_needed, format_complex, format_number, format_value};
pub use renderer::{render, render_closed_form, ClosedFormRenderer, Rendered, RendererKind};
pub use structured::{render_structure, render_term, StructuredRenderer};
pub use text::{rewrite_notation, TextRenderer};
