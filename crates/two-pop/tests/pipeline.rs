//! End-to-end runs through the orchestrator and the built-in integrator.

use approx::assert_relative_eq;
use units::{Length, Time};

use two_pop::constants::{AU, YEAR};
use two_pop::grid::TIME_GRID_START;
use two_pop::{
    analytic_reference, run_model, run_two_pop, Parameters, Results, RunOptions, TwoPopModel,
};

#[test]
fn reference_run() {
    let parameters = Parameters::default();
    let results = run_two_pop(&parameters).unwrap();

    assert_eq!(results.n_radii(), 200);
    assert_eq!(results.n_times(), 100);
    assert!(results.sigma_g.iter().all(|&s| s > 0.0 && s.is_finite()));
    assert!(results.sigma_d.iter().all(|&s| s > 0.0 && s.is_finite()));

    assert_relative_eq!(results.times[0], TIME_GRID_START);
    assert_relative_eq!(results.times[99], parameters.tmax);
    assert!(results.times.windows(2).all(|w| w[0] < w[1]));

    let initial = results.gas_mass(0);
    let last = results.gas_mass(99);
    assert!(last <= initial * (1.0 + 1e-10), "gas mass grew from {initial} to {last}");
    assert!(results.dust_mass(99) < results.dust_mass(0));

    // Grains grow beyond the monomer size somewhere in the disk
    assert!(results.a_t.row(99).iter().any(|&a| a > 100.0 * parameters.a0));
}

#[test]
fn reference_run_reconstructs_the_size_distribution() {
    let parameters = Parameters {
        nr: 100,
        nt: 20,
        ..Parameters::default()
    };
    let results = run_two_pop(&parameters).unwrap();
    let distribution = results.size_distribution.as_ref().unwrap();

    assert_eq!(distribution.sizes.len(), parameters.na);
    assert_eq!(distribution.sizes[0], parameters.a0);
    assert_eq!(distribution.sigma.shape(), (100, parameters.na));

    let last = results.dust_profile(19);
    for (i, expected) in last.iter().enumerate() {
        let total: f64 = distribution.sigma.row(i).iter().sum();
        assert_relative_eq!(total, *expected, max_relative = 1e-10);
    }
}

#[test]
fn frozen_gas_run() {
    let parameters = Parameters {
        nr: 100,
        nt: 20,
        gasevol: false,
        ..Parameters::default()
    };
    let results = run_two_pop(&parameters).unwrap();

    for k in 1..results.n_times() {
        assert_eq!(results.sigma_g.row(k), results.sigma_g.row(0));
    }
    assert_ne!(results.sigma_d.row(19), results.sigma_d.row(0));
}

#[test]
fn viscous_disk_follows_self_similar_solution() {
    let parameters = Parameters {
        nr: 100,
        nt: 20,
        tmax: Time::from_years(1e5).to_seconds(),
        ..Parameters::viscous_test()
    };
    let model = TwoPopModel::default().without_reconstruction();
    let results = run_model(&parameters, &model, None, &RunOptions::default()).unwrap();
    assert!(results.size_distribution.is_none());

    let reference = analytic_reference(&results).unwrap();
    assert_relative_eq!(reference.elapsed, parameters.tmax - TIME_GRID_START);
    assert!(reference.rc > parameters.rc);

    let deviation = reference
        .last_deviation(&results, 5.0 * AU..=50.0 * AU)
        .unwrap();
    assert!(deviation < 0.3, "gas deviates by {deviation} dex from the analytic disk");
}

#[test]
fn saved_run_can_be_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    let parameters = Parameters {
        nr: 50,
        nt: 10,
        na: 30,
        tmax: 1e5 * YEAR,
        rc: Length::from_au(50.0).to_cm(),
        dir: dir.path().join("run").to_string_lossy().into_owned(),
        ..Parameters::default()
    };
    let options = RunOptions {
        save: true,
        plot: false,
    };

    let results = run_model(&parameters, &TwoPopModel::default(), None, &options).unwrap();
    let restored = Results::import(&parameters.dir).unwrap();

    assert_eq!(restored, results);
    assert!(restored.size_distribution.is_some());
}
