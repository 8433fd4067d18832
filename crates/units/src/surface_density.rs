use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::length::AU_CM;
use crate::mass::SOLAR_MASS_G;

/// A surface mass density (mass per disk area) stored in g/cm².
///
/// This is the standard unit for protoplanetary disk surface density in the
/// literature; the gas and dust fields of the disk solvers are all in g/cm².
///
/// # Examples
///
/// ```rust
/// use units::SurfaceDensity;
///
/// let sigma = SurfaceDensity::from_grams_per_cm2(1700.0);
/// let dust = sigma * 1e-2;
///
/// assert_eq!(dust.to_grams_per_cm2(), 17.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SurfaceDensity(f64); // Base unit: g/cm²

impl SurfaceDensity {
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `SurfaceDensity` from a value in g/cm².
    pub fn from_grams_per_cm2(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `SurfaceDensity` from solar masses per square AU.
    pub fn from_solar_masses_per_au2(value: f64) -> Self {
        Self(value * SOLAR_MASS_G / (AU_CM * AU_CM))
    }

    /// Returns the surface density in g/cm².
    pub fn to_grams_per_cm2(&self) -> f64 {
        self.0
    }

    /// Converts the surface density to solar masses per square AU.
    pub fn to_solar_masses_per_au2(&self) -> f64 {
        self.0 * AU_CM * AU_CM / SOLAR_MASS_G
    }

    /// Clamp from below, e.g. to keep a profile strictly positive.
    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }
}

impl Add for SurfaceDensity {
    type Output = SurfaceDensity;

    fn add(self, rhs: SurfaceDensity) -> SurfaceDensity {
        SurfaceDensity(self.0 + rhs.0)
    }
}

impl Sub for SurfaceDensity {
    type Output = SurfaceDensity;

    fn sub(self, rhs: SurfaceDensity) -> SurfaceDensity {
        SurfaceDensity(self.0 - rhs.0)
    }
}

impl Mul<f64> for SurfaceDensity {
    type Output = SurfaceDensity;

    fn mul(self, rhs: f64) -> SurfaceDensity {
        SurfaceDensity(self.0 * rhs)
    }
}

impl Div<f64> for SurfaceDensity {
    type Output = SurfaceDensity;

    fn div(self, rhs: f64) -> SurfaceDensity {
        SurfaceDensity(self.0 / rhs)
    }
}

/// Division of SurfaceDensity by SurfaceDensity returns a ratio (e.g. dust-to-gas)
impl Div for SurfaceDensity {
    type Output = f64;

    fn div(self, rhs: SurfaceDensity) -> f64 {
        self.0 / rhs.0
    }
}

impl Mul<SurfaceDensity> for f64 {
    type Output = SurfaceDensity;

    fn mul(self, rhs: SurfaceDensity) -> SurfaceDensity {
        rhs * self
    }
}
