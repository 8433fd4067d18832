//! Dimensioned quantities for disk modelling.
//!
//! Every type stores its value in cgs base units (cm, g, s), which is the unit
//! system the disk solvers work in. Astronomical conversions (AU, solar radii,
//! solar masses, years) go through the constants exported here so that the
//! command line, the parameter summary and the solvers agree on them.

pub mod length;
pub mod mass;
pub mod surface_density;
pub mod time;
pub mod viscosity;

#[cfg(test)]
mod surface_density_test;
#[cfg(test)]
mod viscosity_test;

pub use length::{Length, AU_CM, SOLAR_RADIUS_CM};
pub use mass::{Mass, SOLAR_MASS_G};
pub use surface_density::SurfaceDensity;
pub use time::{Time, SECONDS_PER_YEAR};
pub use viscosity::KinematicViscosity;
