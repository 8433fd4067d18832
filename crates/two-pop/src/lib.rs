//! Two-population dust evolution in a viscously evolving protoplanetary disk.
//!
//! A run starts from the self-similar Lynden-Bell & Pringle gas disk with a
//! constant dust-to-gas ratio, hands it to a [`GrowthIntegrator`] and
//! collects the snapshots into [`Results`], which can be exported to and
//! imported from a directory of plain-text field files.
//!
//! ```no_run
//! use two_pop::{run_two_pop, Parameters};
//!
//! let results = run_two_pop(&Parameters::default())?;
//! results.export("data")?;
//! # Ok::<(), two_pop::Error>(())
//! ```

pub mod analytic;
pub mod constants;
mod error;
pub mod grid;
pub mod integrator;
pub mod params;
pub mod results;
pub mod simulation;


pub use analytic::{lbp_solution, lbp_solution_dimensioned, DimensionedLbpProfile, LbpProfile};
pub use error::{Error, Result};
pub use grid::InitialConditions;
pub use integrator::{
    Evolution, GrowthIntegrator, IntegratorInput, PowerLawReconstruction, ReconstructionInput,
    SizeDistribution, SizeReconstruction, TwoPopModel,
};
pub use params::{ParameterKind, ParameterValue, Parameters, PARAMETERS};
pub use results::Results;
pub use simulation::{
    analytic_reference, run_model, run_two_pop, AnalyticReference, RunOptions, Visualizer,
};
