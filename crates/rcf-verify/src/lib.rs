#![deny(missing_docs)]
#![doc = "Local evaluation engines used to cross-check closed forms returned by an external solver."]

mod compare;
mod direct;
mod forward;

pub use compare::{cross_check_sum, deviation, max_deviation, CrossCheck};
pub use direct::direct_sum;
pub use forward::{forward_eval, forward_prefix_sum, forward_sequence};
