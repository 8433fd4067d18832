use approx::assert_relative_eq;

use crate::length::Length;
use crate::viscosity::KinematicViscosity;

#[test]
fn alpha_prescription() {
    // ν = α c_s² / Ω
    let nu = KinematicViscosity::from_alpha(1e-3, 1e5, 1e-7);
    assert_relative_eq!(nu.to_cm2_per_sec(), 1e-3 * 1e10 / 1e-7);
}

#[test]
fn viscous_timescale_is_r_squared_over_nu() {
    let nu = KinematicViscosity::from_cm2_per_sec(2e15);
    let r = Length::from_cm(1e14);

    assert_relative_eq!(nu.viscous_timescale(r).to_seconds(), 1e28 / 2e15);
}

#[test]
fn viscosity_ratio() {
    let nu1 = KinematicViscosity::from_cm2_per_sec(1e12);
    let nu2 = nu1 * 4.0;

    assert_relative_eq!(nu2 / nu1, 4.0);
}
