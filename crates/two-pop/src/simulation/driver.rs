//! Run orchestration.
//!
//! One run goes through the same stages every time:
//! 1. Validate the parameters and log them
//! 2. Build the grids and the initial disk
//! 3. Integrate over the snapshot times
//! 4. Reconstruct the final size distribution, if the integrator can
//! 5. Assemble the results
//! 6. Export and plot, if requested

use nalgebra::DMatrix;
use tracing::{info, warn};

use crate::error::Result;
use crate::grid::{log_spaced, InitialConditions};
use crate::integrator::{
    Evolution, GrowthIntegrator, IntegratorInput, ReconstructionInput, SizeDistribution,
    SizeReconstruction, TwoPopModel,
};
use crate::params::Parameters;
use crate::results::Results;

/// Upper end of the reconstruction size axis relative to the largest grain
const SIZE_AXIS_HEADROOM: f64 = 5.0;

/// What to do with the results once they exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Export to `parameters.dir`
    pub save: bool,
    /// Hand the results to the visualizer
    pub plot: bool,
}

/// Anything that can display a finished run.
pub trait Visualizer {
    fn plot(&self, results: &Results) -> Result<()>;
}

/// Run one simulation.
///
/// A failing reconstruction is logged and leaves the size distribution
/// empty; a failing export is returned to the caller.
pub fn run_model(
    parameters: &Parameters,
    integrator: &dyn GrowthIntegrator,
    visualizer: Option<&dyn Visualizer>,
    options: &RunOptions,
) -> Result<Results> {
    parameters.validate()?;

    info!("two-population dust evolution");
    for line in parameters.summary() {
        info!("{line}");
    }

    let initial = InitialConditions::from_parameters(parameters)?;
    let input = IntegratorInput::new(&initial, parameters);

    info!(snapshots = input.times.len(), cells = input.radii.len(), "integrating");
    let evolution = integrator.integrate(&input)?;
    evolution.check_shape(input.times.len(), input.radii.len())?;

    let size_distribution = match integrator.reconstruction() {
        Some(reconstruction) => {
            info!("reconstructing size distribution");
            match reconstruct(reconstruction, parameters, &input, &evolution) {
                Ok(distribution) => Some(distribution),
                Err(err) => {
                    warn!("size distribution reconstruction failed, continuing without it: {err:?}");
                    None
                }
            }
        }
        None => {
            info!("integrator offers no size reconstruction, skipping it");
            None
        }
    };

    let results = Results::new(parameters.clone(), initial, evolution, size_distribution);

    if options.save {
        results.export(&parameters.dir)?;
    }

    if options.plot {
        match visualizer {
            Some(visualizer) => {
                if let Err(err) = visualizer.plot(&results) {
                    warn!("plotting failed: {err}");
                }
            }
            None => info!("no visualizer available, skipping plots"),
        }
    }

    Ok(results)
}

/// Run with the built-in two-population model, without saving or plotting.
pub fn run_two_pop(parameters: &Parameters) -> Result<Results> {
    run_model(parameters, &TwoPopModel::default(), None, &RunOptions::default())
}

/// Reconstruct the size distribution of the last snapshot.
///
/// The size axis runs from `a0` to [`SIZE_AXIS_HEADROOM`] times the largest
/// representative size reached at any snapshot.
fn reconstruct(
    reconstruction: &dyn SizeReconstruction,
    parameters: &Parameters,
    input: &IntegratorInput,
    evolution: &Evolution,
) -> Result<SizeDistribution> {
    let last = evolution.n_times() - 1;
    let row = |m: &DMatrix<f64>| -> Vec<f64> { m.row(last).iter().copied().collect() };

    let a_max = evolution.a_t.iter().copied().fold(parameters.a0, f64::max);
    let sizes = log_spaced(parameters.a0, SIZE_AXIS_HEADROOM * a_max, parameters.na);

    reconstruction.reconstruct(&ReconstructionInput {
        radii: input.radii.clone(),
        sizes,
        sigma_g: row(&evolution.sigma_g),
        sigma_d: row(&evolution.sigma_d),
        a_dr: row(&evolution.a_dr),
        a_fr: row(&evolution.a_fr),
        a_df: row(&evolution.a_df),
        a_t: row(&evolution.a_t),
        alpha: input.alpha.clone(),
        temperature: input.temperature.clone(),
        rhos: parameters.rhos,
        mstar: parameters.mstar,
        vfrag: parameters.vfrag,
        a0: parameters.a0,
    })
}
