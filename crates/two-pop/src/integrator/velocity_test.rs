use approx::assert_relative_eq;

use super::velocity::*;
use super::IntegratorInput;
use crate::constants::YEAR;
use crate::grid::InitialConditions;
use crate::params::Parameters;

fn reference_input() -> IntegratorInput {
    let p = Parameters {
        nr: 100,
        nt: 10,
        ..Parameters::default()
    };
    let init = InitialConditions::from_parameters(&p).unwrap();
    IntegratorInput::new(&init, &p)
}

fn at_time(input: &IntegratorInput, time: f64) -> Populations {
    let background = Background::new(input);
    populations(input, &background, &input.sigma_g, &input.sigma_d, &input.v_gas, time)
}

#[test]
fn stokes_number_is_linear_in_size() {
    let st = stokes_number(1.0, 1.6, 100.0);
    assert_relative_eq!(st, std::f64::consts::PI * 1.6 / 200.0);
    assert_relative_eq!(stokes_number(2.0, 1.6, 100.0), 2.0 * st);
}

#[test]
fn drift_peaks_at_unit_stokes_number() {
    let (gamma_p, cs, v_k) = (2.75, 5e4, 3e6);
    let peak = radial_velocity(0.0, 1.0, gamma_p, cs, v_k);

    assert_relative_eq!(peak, -gamma_p * cs * cs / (2.0 * v_k));
    assert!(radial_velocity(0.0, 0.1, gamma_p, cs, v_k) > peak);
    assert!(radial_velocity(0.0, 10.0, gamma_p, cs, v_k) > peak);
}

#[test]
fn tiny_grains_follow_the_gas() {
    let v = radial_velocity(-10.0, 1e-8, 2.75, 5e4, 3e6);
    assert_relative_eq!(v, -10.0, max_relative = 1e-3);
}

#[test]
fn background_viscosity_matches_alpha_prescription() {
    let input = reference_input();
    let background = Background::new(&input);

    for i in [0, 50, 99] {
        let expected = input.alpha[i] * background.cs[i].powi(2) / background.omega[i];
        assert_relative_eq!(background.nu[i], expected, max_relative = 1e-14);
        assert_relative_eq!(background.v_k[i], background.omega[i] * input.radii[i], max_relative = 1e-12);
    }
}

#[test]
fn pressure_exponent_of_power_law() {
    let input = reference_input();
    let background = Background::new(&input);

    // Σ ∝ r^-1, Ω ∝ r^-3/2 and c_s ∝ r^-1/4 where irradiation dominates
    let sigma: Vec<f64> = input.radii.iter().map(|r| 1e15 / r).collect();
    let gamma_p = background.pressure_exponent(&sigma);
    assert_relative_eq!(gamma_p[10], 2.75, max_relative = 1e-2);
}

#[test]
fn representative_size_is_bounded() {
    let input = reference_input();
    for time in [0.0, 1e3 * YEAR, 1e6 * YEAR] {
        let pops = at_time(&input, time);
        for i in 0..input.radii.len() {
            let a_max = pops.a_fr[i].min(pops.a_dr[i]).min(pops.a_df[i]);
            assert!(pops.a_t[i] >= input.a0);
            assert!(pops.a_t[i] <= a_max.max(input.a0));
        }
    }
}

#[test]
fn grains_grow_with_time() {
    let input = reference_input();
    let early = at_time(&input, 1e2 * YEAR);
    let late = at_time(&input, 1e5 * YEAR);

    assert!(late.a_t.iter().zip(&early.a_t).all(|(l, e)| l >= e));
    assert!(late.a_t.iter().zip(&early.a_t).any(|(l, e)| l > e));
}

#[test]
fn without_growth_both_populations_coincide() {
    let input = IntegratorInput {
        no_growth: true,
        ..reference_input()
    };
    let pops = at_time(&input, 1e6 * YEAR);

    assert!(pops.a_t.iter().all(|&a| a == input.a0));
    assert_eq!(pops.v_0, pops.v_1);
    for (v, v0) in pops.v_dust.iter().zip(&pops.v_0) {
        assert_relative_eq!(*v, *v0, max_relative = 1e-12);
    }
}

#[test]
fn dust_velocity_weights_the_populations() {
    let input = reference_input();
    let pops = at_time(&input, 1e6 * YEAR);

    for i in 0..input.radii.len() {
        let drift_limited = pops.a_dr[i] < pops.a_fr[i].min(pops.a_df[i]);
        let f_m = if drift_limited {
            DRIFT_LIMITED_FRACTION
        } else {
            FRAGMENTATION_LIMITED_FRACTION
        };
        let expected = (1.0 - f_m) * pops.v_0[i] + f_m * pops.v_1[i];
        assert_relative_eq!(pops.v_dust[i], expected, max_relative = 1e-12);
    }
}

#[test]
fn fragmentation_limit_scales_with_velocity_squared() {
    let input = reference_input();
    let faster = IntegratorInput {
        vfrag: 2.0 * input.vfrag,
        ..input.clone()
    };

    let slow = at_time(&input, 0.0);
    let fast = at_time(&faster, 0.0);
    assert_relative_eq!(fast.a_fr[20], 4.0 * slow.a_fr[20], max_relative = 1e-12);
}
