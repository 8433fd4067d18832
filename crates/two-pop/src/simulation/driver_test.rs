use std::cell::Cell;

use nalgebra::DMatrix;

use super::*;
use crate::constants::YEAR;
use crate::error::{Error, Result};
use crate::integrator::{
    Evolution, GrowthIntegrator, IntegratorInput, ReconstructionInput, SizeDistribution,
    SizeReconstruction,
};
use crate::params::Parameters;
use crate::results::Results;

fn quick() -> Parameters {
    Parameters {
        nr: 40,
        nt: 5,
        na: 20,
        tmax: 1e4 * YEAR,
        ..Parameters::default()
    }
}

/// Repeats the initial state at every snapshot.
struct Frozen {
    reconstruction: Option<Box<dyn SizeReconstruction>>,
}

impl GrowthIntegrator for Frozen {
    fn integrate(&self, input: &IntegratorInput) -> Result<Evolution> {
        let nt = input.times.len();
        let repeat = |v: &[f64]| DMatrix::from_fn(nt, v.len(), |_, j| v[j]);
        let a0 = vec![input.a0; input.radii.len()];
        Ok(Evolution {
            sigma_g: repeat(&input.sigma_g),
            sigma_d: repeat(&input.sigma_d),
            v_gas: repeat(&input.v_gas),
            v_dust: repeat(&input.v_gas),
            v_0: repeat(&input.v_gas),
            v_1: repeat(&input.v_gas),
            a_dr: repeat(&a0),
            a_fr: repeat(&a0),
            a_df: repeat(&a0),
            a_t: repeat(&a0),
        })
    }

    fn reconstruction(&self) -> Option<&dyn SizeReconstruction> {
        self.reconstruction.as_deref()
    }
}

struct Broken;

impl SizeReconstruction for Broken {
    fn reconstruct(&self, _input: &ReconstructionInput) -> Result<SizeDistribution> {
        Err(Error::Reconstruction("no convergence".to_string()))
    }
}

/// Records how it was called.
struct SeenSizes(Cell<usize>);

impl SizeReconstruction for SeenSizes {
    fn reconstruct(&self, input: &ReconstructionInput) -> Result<SizeDistribution> {
        self.0.set(input.sizes.len());
        Ok(SizeDistribution {
            sizes: input.sizes.clone(),
            sigma: DMatrix::zeros(input.radii.len(), input.sizes.len()),
            upper_size: vec![input.a0; input.radii.len()],
        })
    }
}

/// Drops the last snapshot.
struct Truncating;

impl GrowthIntegrator for Truncating {
    fn integrate(&self, input: &IntegratorInput) -> Result<Evolution> {
        let mut shorter = input.clone();
        shorter.times.pop();
        Frozen {
            reconstruction: None,
        }
        .integrate(&shorter)
    }
}

/// Grains that grew large early on and shrank back to `a0` by the end.
struct Receding {
    reconstruction: Option<Box<dyn SizeReconstruction>>,
}

impl GrowthIntegrator for Receding {
    fn integrate(&self, input: &IntegratorInput) -> Result<Evolution> {
        let mut evolution = Frozen {
            reconstruction: None,
        }
        .integrate(input)?;
        evolution.a_t.row_mut(0).fill(100.0 * input.a0);
        Ok(evolution)
    }

    fn reconstruction(&self) -> Option<&dyn SizeReconstruction> {
        self.reconstruction.as_deref()
    }
}

#[derive(Default)]
struct CountingVisualizer {
    calls: Cell<usize>,
}

impl Visualizer for CountingVisualizer {
    fn plot(&self, _results: &Results) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

#[test]
fn failing_reconstruction_leaves_distribution_empty() {
    let integrator = Frozen {
        reconstruction: Some(Box::new(Broken)),
    };
    let results = run_model(&quick(), &integrator, None, &RunOptions::default()).unwrap();

    assert!(results.size_distribution.is_none());
    assert_eq!(results.n_times(), 5);
}

#[test]
fn missing_reconstruction_is_not_an_error() {
    let integrator = Frozen {
        reconstruction: None,
    };
    let results = run_model(&quick(), &integrator, None, &RunOptions::default()).unwrap();
    assert!(results.size_distribution.is_none());
}

#[test]
fn reconstruction_receives_the_size_axis() {
    let integrator = Frozen {
        reconstruction: Some(Box::new(SeenSizes(Cell::new(0)))),
    };
    let results = run_model(&quick(), &integrator, None, &RunOptions::default()).unwrap();

    let distribution = results.size_distribution.unwrap();
    assert_eq!(distribution.sizes.len(), 20);
    assert_eq!(distribution.sizes[0], quick().a0);
    // Largest grain is a0, so the axis ends at 5 a0
    approx::assert_relative_eq!(distribution.sizes[19], 5.0 * quick().a0, max_relative = 1e-12);
}

#[test]
fn size_axis_covers_the_largest_grain_of_the_run() {
    let integrator = Receding {
        reconstruction: Some(Box::new(SeenSizes(Cell::new(0)))),
    };
    let results = run_model(&quick(), &integrator, None, &RunOptions::default()).unwrap();

    // Final snapshot holds only a0, the first one 100 a0
    let distribution = results.size_distribution.unwrap();
    assert_eq!(distribution.sizes[0], quick().a0);
    approx::assert_relative_eq!(distribution.sizes[19], 500.0 * quick().a0, max_relative = 1e-12);
}

#[test]
fn visualizer_runs_only_when_plotting() {
    let integrator = Frozen {
        reconstruction: None,
    };
    let visualizer = CountingVisualizer::default();

    run_model(&quick(), &integrator, Some(&visualizer), &RunOptions::default()).unwrap();
    assert_eq!(visualizer.calls.get(), 0);

    let options = RunOptions {
        save: false,
        plot: true,
    };
    run_model(&quick(), &integrator, Some(&visualizer), &options).unwrap();
    assert_eq!(visualizer.calls.get(), 1);

    // Plotting without a visualizer is only reported
    assert!(run_model(&quick(), &integrator, None, &options).is_ok());
}

#[test]
fn saving_exports_to_the_parameter_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out");
    let parameters = Parameters {
        dir: target.to_string_lossy().into_owned(),
        ..quick()
    };
    let options = RunOptions {
        save: true,
        plot: false,
    };

    let results = run_model(
        &parameters,
        &Frozen {
            reconstruction: None,
        },
        None,
        &options,
    )
    .unwrap();

    let restored = Results::import(&target).unwrap();
    assert_eq!(restored, results);
}

#[test]
fn invalid_parameters_stop_the_run() {
    let parameters = Parameters { nt: 0, ..quick() };
    let integrator = Frozen {
        reconstruction: None,
    };
    let err = run_model(&parameters, &integrator, None, &RunOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { name: "nt", .. }));
}

#[test]
fn integrator_output_of_wrong_shape_is_rejected() {
    let err = run_model(&quick(), &Truncating, None, &RunOptions::default()).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { expected: (5, 40), found: (4, 40), .. }));
}

#[test]
fn analytic_reference_matches_initial_gas() {
    let integrator = Frozen {
        reconstruction: None,
    };
    let results = run_model(&quick(), &integrator, None, &RunOptions::default()).unwrap();
    let reference = analytic_reference(&results).unwrap();

    assert_eq!(reference.initial.len(), 40);
    for (j, expected) in reference.initial.iter().enumerate() {
        if *expected > 1e-50 {
            approx::assert_relative_eq!(results.sigma_g[(0, j)], *expected, max_relative = 1e-12);
        }
    }
    assert!(reference.rc > results.parameters.rc);
    assert_eq!(reference.elapsed, results.times[4] - results.times[0]);
}
