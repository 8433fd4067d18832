//! Physical constants in cgs.
//!
//! Astronomical conversions are shared with the `units` crate so that values
//! converted on the command line and values used by the solvers agree.

pub use units::{AU_CM as AU, SECONDS_PER_YEAR as YEAR, SOLAR_MASS_G as M_SUN, SOLAR_RADIUS_CM as R_SUN};

/// Gravitational constant (cm³/(g·s²))
pub const G: f64 = 6.672_59e-8;

/// Boltzmann constant (erg/K)
pub const K_B: f64 = 1.380_650_3e-16;

/// Proton mass (g)
pub const M_PROTON: f64 = 1.672_623_1e-24;

/// Mean molecular weight of the disk gas
pub const MU: f64 = 2.3;

/// Pi
pub const PI: f64 = std::f64::consts::PI;

/// Isothermal sound speed c_s = √(k_B T / (μ m_p)) for temperature `t` (K).
pub fn sound_speed(t: f64) -> f64 {
    (K_B * t / (MU * M_PROTON)).sqrt()
}

/// Keplerian orbital frequency Ω = √(G M / r³).
pub fn orbital_frequency(mstar: f64, r: f64) -> f64 {
    (G * mstar / r.powi(3)).sqrt()
}

/// Keplerian orbital velocity v_K = √(G M / r).
pub fn keplerian_velocity(mstar: f64, r: f64) -> f64 {
    (G * mstar / r).sqrt()
}
