//! Lynden-Bell & Pringle self-similar viscous disk.
//!
//! For a viscosity ν = ν₁ (r/R₁)^γ the surface density of a viscously
//! spreading disk has the closed form (Hartmann et al. 1998)
//!
//! ```text
//! Σ(r, t) = C / (3π ν₁ r̃) · T^(-(5/2-γ)/(2-γ)) · exp(-r̃^(2-γ) / T)
//! ```
//!
//! with r̃ = r/R₁ and the dimensionless time T = t/t_s + 1 measured in units
//! of the viscous time at R₁, t_s = R₁² / (3 (2-γ)² ν₁). The characteristic
//! radius grows as R_c(t) = T^(1/(2-γ)) R₁.
//!
//! Two entry points share one dimensionless core: [`lbp_solution`] takes
//! plain cgs numbers, [`lbp_solution_dimensioned`] takes `units` quantities.
//!
//! Inputs are not validated. γ ≥ 2 or ν₁ ≤ 0 produce non-finite values, and
//! the profile is not floored.

use units::{KinematicViscosity, Length, Mass, SurfaceDensity, Time};

use crate::constants::PI;

/// Surface density profile and characteristic radius at one instant, in cgs.
#[derive(Debug, Clone, PartialEq)]
pub struct LbpProfile {
    /// Gas surface density at each input radius (g/cm²)
    pub sigma: Vec<f64>,
    /// Characteristic radius at the requested time (cm)
    pub rc: f64,
}

/// Dimensioned counterpart of [`LbpProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionedLbpProfile {
    pub sigma: Vec<SurfaceDensity>,
    pub rc: Length,
}

/// Self-similar solution for radii and scalars given in cgs.
///
/// # Arguments
/// * `r` - Radii (cm); `r[0]` must be nonzero and is the normalization radius
/// * `gamma` - Viscosity exponent
/// * `nu1` - Viscosity at `r[0]` (cm²/s)
/// * `_mstar` - Stellar mass (g); the solution does not depend on it
/// * `mdisk` - Disk mass at t = 0 (g)
/// * `rc0` - Characteristic radius at t = 0 (cm)
/// * `time` - Elapsed time (s)
pub fn lbp_solution(
    r: &[f64],
    gamma: f64,
    nu1: f64,
    _mstar: f64,
    mdisk: f64,
    rc0: f64,
    time: f64,
) -> LbpProfile {
    self_similar(r, gamma, nu1, mdisk, rc0, time)
}

/// Self-similar solution for dimensioned inputs.
///
/// Produces the same numbers as [`lbp_solution`] after converting every
/// argument to cgs, and returns dimensioned values.
pub fn lbp_solution_dimensioned(
    r: &[Length],
    gamma: f64,
    nu1: KinematicViscosity,
    mstar: Mass,
    mdisk: Mass,
    rc0: Length,
    time: Time,
) -> DimensionedLbpProfile {
    let radii: Vec<f64> = r.iter().map(Length::to_cm).collect();
    let profile = lbp_solution(
        &radii,
        gamma,
        nu1.to_cm2_per_sec(),
        mstar.to_grams(),
        mdisk.to_grams(),
        rc0.to_cm(),
        time.to_seconds(),
    );

    DimensionedLbpProfile {
        sigma: profile
            .sigma
            .into_iter()
            .map(SurfaceDensity::from_grams_per_cm2)
            .collect(),
        rc: Length::from_cm(profile.rc),
    }
}

/// Characteristic radius after `time`, without evaluating the profile.
pub fn characteristic_radius(r1: f64, gamma: f64, nu1: f64, rc0: f64, time: f64) -> f64 {
    let scales = SimilarityScales::new(r1, gamma, nu1, rc0);
    scales.radius_at(time)
}

/// Time-independent scales of the solution.
struct SimilarityScales {
    r1: f64,
    gamma: f64,
    /// Viscous time at r1
    ts: f64,
    /// Dimensionless time corresponding to rc0
    t0: f64,
}

impl SimilarityScales {
    fn new(r1: f64, gamma: f64, nu1: f64, rc0: f64) -> Self {
        let ts = r1.powi(2) / (3.0 * (2.0 - gamma).powi(2) * nu1);
        let t0 = (rc0 / r1).powf(2.0 - gamma);
        Self { r1, gamma, ts, t0 }
    }

    /// Dimensionless time T₁ reached after `time`.
    fn dimensionless_time(&self, time: f64) -> f64 {
        let toff = (self.t0 - 1.0) * self.ts;
        (time + toff) / self.ts + 1.0
    }

    fn radius_at(&self, time: f64) -> f64 {
        self.dimensionless_time(time).powf(1.0 / (2.0 - self.gamma)) * self.r1
    }
}

fn self_similar(r: &[f64], gamma: f64, nu1: f64, mdisk: f64, rc0: f64, time: f64) -> LbpProfile {
    let Some(&r1) = r.first() else {
        return LbpProfile {
            sigma: Vec::new(),
            rc: rc0,
        };
    };

    let scales = SimilarityScales::new(r1, gamma, nu1, rc0);
    let t1 = scales.dimensionless_time(time);

    // Normalization so that the disk holds mdisk at t = 0
    let c = -3.0 * mdisk * nu1 * scales.t0.powf(1.0 / (4.0 - 2.0 * gamma)) * (gamma - 2.0)
        / 2.0
        / r1.powi(2);

    let decay = t1.powf(-(2.5 - gamma) / (2.0 - gamma));
    let sigma = r
        .iter()
        .map(|&radius| {
            let x = radius / r1;
            c / (3.0 * PI * nu1 * x) * decay * (-x.powf(2.0 - gamma) / t1).exp()
        })
        .collect();

    LbpProfile {
        sigma,
        rc: scales.radius_at(time),
    }
}
