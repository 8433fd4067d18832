use approx::assert_relative_eq;

use crate::surface_density::SurfaceDensity;

#[test]
fn solar_units_round_trip() {
    let sigma = SurfaceDensity::from_solar_masses_per_au2(1e-6);
    let round_trip = SurfaceDensity::from_grams_per_cm2(sigma.to_grams_per_cm2());

    assert_relative_eq!(round_trip.to_solar_masses_per_au2(), 1e-6, max_relative = 1e-12);
}

#[test]
fn dust_to_gas_ratio() {
    let gas = SurfaceDensity::from_grams_per_cm2(100.0);
    let dust = 1e-2 * gas;

    assert_relative_eq!(dust / gas, 1e-2);
    assert_relative_eq!((gas + dust).to_grams_per_cm2(), 101.0);
    assert_relative_eq!((gas - dust).to_grams_per_cm2(), 99.0);
    assert_relative_eq!((gas / 4.0).to_grams_per_cm2(), 25.0);
}

#[test]
fn floor_keeps_larger_value() {
    let floor = SurfaceDensity::from_grams_per_cm2(1e-100);

    assert_eq!(SurfaceDensity::zero().max(floor), floor);
    assert_eq!(
        SurfaceDensity::from_grams_per_cm2(-3.0).max(floor),
        floor
    );

    let sigma = SurfaceDensity::from_grams_per_cm2(5.0);
    assert_eq!(sigma.max(floor), sigma);
}
