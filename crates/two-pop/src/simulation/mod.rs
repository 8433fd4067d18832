//! Orchestration of a complete run.

mod driver;
mod reference;

#[cfg(test)]
mod driver_test;

pub use driver::{run_model, run_two_pop, RunOptions, Visualizer};
pub use reference::{analytic_reference, AnalyticReference};
