//! Kinematic viscosity.
//!
//! In an α-disk the turbulent viscosity is ν = α c_s² / Ω, which has units of
//! cm²/s. The self-similar disk solution is normalized by ν at the inner grid
//! radius, so it gets its own quantity type rather than a bare `f64`.

use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

use crate::length::Length;
use crate::time::Time;

/// A kinematic viscosity stored in cm²/s.
///
/// # Examples
///
/// ```rust
/// use units::{KinematicViscosity, Length};
///
/// let nu = KinematicViscosity::from_cm2_per_sec(1e15);
/// let r = Length::from_au(10.0);
///
/// // r²/ν is the local viscous timescale
/// let t_visc = nu.viscous_timescale(r);
/// assert!(t_visc.to_years() > 1e4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct KinematicViscosity(f64); // Base unit: cm²/s

impl KinematicViscosity {
    /// Creates a new `KinematicViscosity` from a value in cm²/s.
    pub fn from_cm2_per_sec(value: f64) -> Self {
        Self(value)
    }

    /// Shakura-Sunyaev viscosity ν = α c_s² / Ω.
    ///
    /// # Arguments
    /// * `alpha` - Dimensionless turbulence parameter
    /// * `sound_speed` - Isothermal sound speed (cm/s)
    /// * `orbital_frequency` - Keplerian frequency (rad/s)
    pub fn from_alpha(alpha: f64, sound_speed: f64, orbital_frequency: f64) -> Self {
        Self(alpha * sound_speed * sound_speed / orbital_frequency)
    }

    /// Returns the viscosity in cm²/s.
    pub fn to_cm2_per_sec(&self) -> f64 {
        self.0
    }

    /// Viscous timescale t = r² / ν.
    pub fn viscous_timescale(&self, r: Length) -> Time {
        Time::from_seconds(r.to_cm().powi(2) / self.0)
    }
}

impl Mul<f64> for KinematicViscosity {
    type Output = KinematicViscosity;

    fn mul(self, rhs: f64) -> KinematicViscosity {
        KinematicViscosity(self.0 * rhs)
    }
}

impl Div for KinematicViscosity {
    type Output = f64;

    fn div(self, rhs: KinematicViscosity) -> f64 {
        self.0 / rhs.0
    }
}
