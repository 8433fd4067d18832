//! Radial and temporal grids and the initial disk state.
//!
//! The radial grid is built from `nr + 1` logarithmically spaced cell edges
//! between [`R_INNER_AU`] and [`R_OUTER_AU`]; quantities live at the
//! arithmetic midpoints of the edges. Snapshot times are logarithmically
//! spaced from [`TIME_GRID_START`] to `tmax`.

use tracing::debug;
use units::KinematicViscosity;

use crate::analytic::lbp_solution;
use crate::constants::{keplerian_velocity, orbital_frequency, sound_speed, AU, K_B, MU, M_PROTON, PI};
use crate::error::Result;
use crate::params::Parameters;

/// Inner edge of the radial grid (AU)
pub const R_INNER_AU: f64 = 0.05;

/// Outer edge of the radial grid (AU)
pub const R_OUTER_AU: f64 = 3000.0;

/// Time of the first snapshot (s)
pub const TIME_GRID_START: f64 = 1e4;

/// Lower bound applied to surface densities (g/cm²)
pub const SIGMA_FLOOR: f64 = 1e-100;

/// Temperature floor of the background radiation field (K)
pub const BACKGROUND_TEMPERATURE: f64 = 7.0;

/// Grazing angle of the stellar irradiation
const IRRADIATION_ANGLE: f64 = 0.05;

// =============================================================================
// Grids
// =============================================================================

/// `n` logarithmically spaced values from `min` to `max`, both included.
///
/// A single point yields `[min]`; zero points yield an empty vector.
pub fn log_spaced(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let log_min = min.ln();
            let log_max = max.ln();
            let mut values: Vec<f64> = (0..n)
                .map(|i| {
                    let frac = i as f64 / (n - 1) as f64;
                    (log_min + frac * (log_max - log_min)).exp()
                })
                .collect();
            values[0] = min;
            values[n - 1] = max;
            values
        }
    }
}

/// Radial cell edges and centers, in cm.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGrid {
    /// `nr + 1` cell interfaces
    pub edges: Vec<f64>,
    /// `nr` cell centers, the arithmetic means of adjacent edges
    pub centers: Vec<f64>,
}

impl RadialGrid {
    /// Grid of `nr` cells spanning [`R_INNER_AU`] to [`R_OUTER_AU`].
    pub fn new(nr: usize) -> Self {
        Self::between(R_INNER_AU * AU, R_OUTER_AU * AU, nr)
    }

    /// Grid of `nr` cells with log-spaced edges from `r_in` to `r_out` (cm).
    pub fn between(r_in: f64, r_out: f64, nr: usize) -> Self {
        let edges = log_spaced(r_in, r_out, nr + 1);
        let centers = edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
        Self { edges, centers }
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Annulus area of each cell, π (r_{i+1}² - r_i²).
    pub fn areas(&self) -> Vec<f64> {
        annulus_areas(&self.edges)
    }
}

/// Annulus areas between consecutive edges.
pub fn annulus_areas(edges: &[f64]) -> Vec<f64> {
    edges
        .windows(2)
        .map(|w| PI * (w[1] * w[1] - w[0] * w[0]))
        .collect()
}

/// Mass held by a surface density profile on the given cell edges.
pub fn disk_mass(edges: &[f64], sigma: &[f64]) -> f64 {
    annulus_areas(edges)
        .iter()
        .zip(sigma)
        .map(|(area, s)| area * s)
        .sum()
}

/// Snapshot times (s): `nt` log-spaced values from [`TIME_GRID_START`] to `tmax`.
pub fn time_grid(nt: usize, tmax: f64) -> Vec<f64> {
    log_spaced(TIME_GRID_START, tmax, nt)
}

// =============================================================================
// Disk structure
// =============================================================================

/// Midplane temperature of a passively irradiated disk with a 7 K floor.
///
/// T = ((0.05^¼ T★ (r/R★)^-½)⁴ + 7⁴)^¼
pub fn temperature_profile(radii: &[f64], tstar: f64, rstar: f64) -> Vec<f64> {
    radii
        .iter()
        .map(|&r| {
            let irradiated = IRRADIATION_ANGLE.powf(0.25) * tstar * (r / rstar).powf(-0.5);
            (irradiated.powi(4) + BACKGROUND_TEMPERATURE.powi(4)).powf(0.25)
        })
        .collect()
}

/// Turbulence profile α(r) = α₀ (r/r₀)^(γ-1), normalized at the first radius.
pub fn turbulence_profile(radii: &[f64], alpha0: f64, gamma: f64) -> Vec<f64> {
    let Some(&r0) = radii.first() else {
        return Vec::new();
    };
    radii
        .iter()
        .map(|&r| alpha0 * (r / r0).powf(gamma - 1.0))
        .collect()
}

/// Viscosity ν₁ = α₀ c_s² / Ω at radius `r` with temperature `t`.
pub fn viscosity_normalization(alpha0: f64, t: f64, mstar: f64, r: f64) -> f64 {
    KinematicViscosity::from_alpha(alpha0, sound_speed(t), orbital_frequency(mstar, r)).to_cm2_per_sec()
}

/// Radial gas velocity of a steady viscous disk with Σ ∝ 1/r and T ∝ r^-½.
pub fn initial_gas_velocity(radii: &[f64], alpha: &[f64], temperature: &[f64], mstar: f64) -> Vec<f64> {
    radii
        .iter()
        .zip(alpha)
        .zip(temperature)
        .map(|((&r, &a), &t)| {
            -3.0 * a * K_B * t / (MU * M_PROTON) / 2.0 / keplerian_velocity(mstar, r) * (1.0 + 7.0 / 4.0)
        })
        .collect()
}

// =============================================================================
// Initial conditions
// =============================================================================

/// Everything the integrator needs at t = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialConditions {
    pub grid: RadialGrid,
    /// Snapshot times (s)
    pub times: Vec<f64>,
    /// Midplane temperature (K)
    pub temperature: Vec<f64>,
    /// Turbulence parameter per cell
    pub alpha: Vec<f64>,
    /// Viscosity at the first cell center (cm²/s)
    pub nu1: f64,
    /// Gas surface density (g/cm²)
    pub sigma_g: Vec<f64>,
    /// Dust surface density (g/cm²)
    pub sigma_d: Vec<f64>,
    /// Radial gas velocity (cm/s)
    pub v_gas: Vec<f64>,
}

impl InitialConditions {
    /// Build grids and the self-similar initial disk for `parameters`.
    pub fn from_parameters(parameters: &Parameters) -> Result<Self> {
        parameters.validate()?;

        let grid = RadialGrid::new(parameters.nr);
        let times = time_grid(parameters.nt, parameters.tmax);
        let x = &grid.centers;

        let temperature = temperature_profile(x, parameters.tstar, parameters.rstar);
        let alpha = turbulence_profile(x, parameters.alpha, parameters.gamma);
        let nu1 = viscosity_normalization(parameters.alpha, temperature[0], parameters.mstar, x[0]);

        let profile = lbp_solution(
            x,
            parameters.gamma,
            nu1,
            parameters.mstar,
            parameters.mdisk,
            parameters.rc,
            0.0,
        );
        let sigma_g: Vec<f64> = profile.sigma.iter().map(|s| s.max(SIGMA_FLOOR)).collect();
        let sigma_d = sigma_g.iter().map(|s| s * parameters.d2g).collect();
        let v_gas = initial_gas_velocity(x, &alpha, &temperature, parameters.mstar);

        debug!(
            nr = grid.len(),
            nt = times.len(),
            nu1,
            gas_mass = disk_mass(&grid.edges, &sigma_g),
            "initial conditions ready"
        );

        Ok(Self {
            grid,
            times,
            temperature,
            alpha,
            nu1,
            sigma_g,
            sigma_d,
            v_gas,
        })
    }
}
