//! Grain size limits and radial velocities of the two dust populations.
//!
//! Follows Birnstiel, Klahr & Ercolano (2012): the small population stays at
//! the monomer size `a0`, the large one grows towards the smallest of the
//! fragmentation, drift and drift-fragmentation limits.

use super::transport::gradient;
use super::IntegratorInput;
use crate::constants::{keplerian_velocity, orbital_frequency, sound_speed, PI};

/// Calibration factor of the fragmentation limit
pub const FRAGMENTATION_FACTOR: f64 = 0.37;

/// Calibration factor of the drift limit
pub const DRIFT_FACTOR: f64 = 0.55;

/// Fraction of relative velocity caused by drift in the drift-fragmentation limit
const DRIFT_FRAGMENTATION_N: f64 = 0.5;

/// Mass fraction of the large population when growth is drift-limited
pub const DRIFT_LIMITED_FRACTION: f64 = 0.97;

/// Mass fraction of the large population when growth is fragmentation-limited
pub const FRAGMENTATION_LIMITED_FRACTION: f64 = 0.75;

/// Time-independent disk structure at the cell centers.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub radii: Vec<f64>,
    /// Isothermal sound speed (cm/s)
    pub cs: Vec<f64>,
    /// Orbital frequency (1/s)
    pub omega: Vec<f64>,
    /// Keplerian velocity (cm/s)
    pub v_k: Vec<f64>,
    /// Kinematic viscosity ν = α c_s² / Ω (cm²/s)
    pub nu: Vec<f64>,
}

impl Background {
    pub fn new(input: &IntegratorInput) -> Self {
        let cs: Vec<f64> = input.temperature.iter().map(|&t| sound_speed(t)).collect();
        let omega: Vec<f64> = input
            .radii
            .iter()
            .map(|&r| orbital_frequency(input.mstar, r))
            .collect();
        let v_k = input
            .radii
            .iter()
            .map(|&r| keplerian_velocity(input.mstar, r))
            .collect();
        let nu = input
            .alpha
            .iter()
            .zip(&cs)
            .zip(&omega)
            .map(|((a, c), o)| a * c * c / o)
            .collect();

        Self {
            radii: input.radii.clone(),
            cs,
            omega,
            v_k,
            nu,
        }
    }

    /// |d ln P / d ln r| for a midplane pressure P ∝ Σ_g Ω c_s.
    pub fn pressure_exponent(&self, sigma_g: &[f64]) -> Vec<f64> {
        let ln_r: Vec<f64> = self.radii.iter().map(|r| r.ln()).collect();
        let ln_p: Vec<f64> = sigma_g
            .iter()
            .zip(&self.omega)
            .zip(&self.cs)
            .map(|((s, o), c)| (s * o * c).ln())
            .collect();
        gradient(&ln_r, &ln_p).into_iter().map(f64::abs).collect()
    }
}

/// Sizes and velocities of both populations at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Populations {
    pub a_dr: Vec<f64>,
    pub a_fr: Vec<f64>,
    pub a_df: Vec<f64>,
    pub a_t: Vec<f64>,
    pub v_0: Vec<f64>,
    pub v_1: Vec<f64>,
    pub v_dust: Vec<f64>,
    /// Dust diffusivity (cm²/s)
    pub diffusivity: Vec<f64>,
}

/// Stokes number of grains of size `a` in the midplane.
pub fn stokes_number(a: f64, rhos: f64, sigma_g: f64) -> f64 {
    PI * a * rhos / (2.0 * sigma_g)
}

/// Radial velocity of grains with Stokes number `st`.
pub fn radial_velocity(v_gas: f64, st: f64, gamma_p: f64, cs: f64, v_k: f64) -> f64 {
    v_gas / (1.0 + st * st) - gamma_p * cs * cs / (v_k * (st + 1.0 / st))
}

/// Size limits, representative size and velocities at `time`.
pub fn populations(
    input: &IntegratorInput,
    background: &Background,
    sigma_g: &[f64],
    sigma_d: &[f64],
    v_gas: &[f64],
    time: f64,
) -> Populations {
    let gamma_p = background.pressure_exponent(sigma_g);
    let n = sigma_g.len();
    let mut out = Populations {
        a_dr: Vec::with_capacity(n),
        a_fr: Vec::with_capacity(n),
        a_df: Vec::with_capacity(n),
        a_t: Vec::with_capacity(n),
        v_0: Vec::with_capacity(n),
        v_1: Vec::with_capacity(n),
        v_dust: Vec::with_capacity(n),
        diffusivity: Vec::with_capacity(n),
    };

    for i in 0..n {
        let (sg, sd) = (sigma_g[i], sigma_d[i]);
        let cs2 = background.cs[i] * background.cs[i];
        let v_k = background.v_k[i];
        let gp = gamma_p[i];

        let a_fr = FRAGMENTATION_FACTOR * 2.0 * sg / (3.0 * PI * input.rhos * input.alpha[i])
            * (input.vfrag / background.cs[i]).powi(2);
        let a_dr = input.edrift * DRIFT_FACTOR * 2.0 * sd / (PI * input.rhos) * v_k * v_k / (cs2 * gp);
        let a_df = FRAGMENTATION_FACTOR * 2.0 * sg / (PI * input.rhos) * input.vfrag * v_k
            / (gp * cs2 * (1.0 - DRIFT_FRAGMENTATION_N));
        let a_max = a_fr.min(a_dr).min(a_df);

        let a_t = if input.no_growth {
            input.a0
        } else {
            let tau = sg / (sd * background.omega[i]);
            (input.a0 * (time / tau).exp()).min(a_max).max(input.a0)
        };

        let st_0 = stokes_number(input.a0, input.rhos, sg);
        let st_1 = stokes_number(a_t, input.rhos, sg);
        let v_0 = radial_velocity(v_gas[i], st_0, gp, background.cs[i], v_k);
        let v_1 = radial_velocity(v_gas[i], st_1, gp, background.cs[i], v_k);

        let f_m = if a_dr < a_fr.min(a_df) {
            DRIFT_LIMITED_FRACTION
        } else {
            FRAGMENTATION_LIMITED_FRACTION
        };

        out.a_dr.push(a_dr);
        out.a_fr.push(a_fr);
        out.a_df.push(a_df);
        out.a_t.push(a_t);
        out.v_0.push(v_0);
        out.v_1.push(v_1);
        out.v_dust.push((1.0 - f_m) * v_0 + f_m * v_1);
        out.diffusivity.push(background.nu[i] / (1.0 + st_1 * st_1));
    }

    out
}
