//! Dust growth integrators and size-distribution reconstruction.
//!
//! The orchestrator only talks to the [`GrowthIntegrator`] trait. An
//! integrator advances the gas and dust disk across a set of snapshot times
//! and may expose a [`SizeReconstruction`] that turns the final state into a
//! full grain size distribution.
//!
//! [`TwoPopModel`] is the built-in integrator, with [`PowerLawReconstruction`]
//! as its default reconstruction.

mod reconstruction;
pub(crate) mod transport;
mod two_pop;
pub(crate) mod velocity;

#[cfg(test)]
mod velocity_test;

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::grid::InitialConditions;
use crate::params::Parameters;

pub use reconstruction::PowerLawReconstruction;
pub use two_pop::TwoPopModel;

/// Initial state and physical setup handed to an integrator.
///
/// Radial arrays are sampled at the cell centers `radii`; all values in cgs.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegratorInput {
    /// Cell centers (cm)
    pub radii: Vec<f64>,
    /// Cell edges (cm), one more than `radii`
    pub edges: Vec<f64>,
    /// Monomer grain size (cm)
    pub a0: f64,
    /// Snapshot times (s), strictly increasing
    pub times: Vec<f64>,
    /// Gas surface density at `times[0]` (g/cm²)
    pub sigma_g: Vec<f64>,
    /// Dust surface density at `times[0]` (g/cm²)
    pub sigma_d: Vec<f64>,
    /// Radial gas velocity at `times[0]` (cm/s)
    pub v_gas: Vec<f64>,
    /// Midplane temperature (K)
    pub temperature: Vec<f64>,
    /// Turbulence parameter
    pub alpha: Vec<f64>,
    /// Stellar mass (g)
    pub mstar: f64,
    /// Fragmentation velocity (cm/s)
    pub vfrag: f64,
    /// Grain bulk density (g/cm³)
    pub rhos: f64,
    /// Drift efficiency factor
    pub edrift: f64,
    /// Keep grains at `a0`
    pub no_growth: bool,
    /// Evolve the gas viscously
    pub gas_evolution: bool,
}

impl IntegratorInput {
    /// Integrator input for the initial disk of a parameter set, with growth on.
    pub fn new(initial: &InitialConditions, parameters: &Parameters) -> Self {
        Self {
            radii: initial.grid.centers.clone(),
            edges: initial.grid.edges.clone(),
            a0: parameters.a0,
            times: initial.times.clone(),
            sigma_g: initial.sigma_g.clone(),
            sigma_d: initial.sigma_d.clone(),
            v_gas: initial.v_gas.clone(),
            temperature: initial.temperature.clone(),
            alpha: initial.alpha.clone(),
            mstar: parameters.mstar,
            vfrag: parameters.vfrag,
            rhos: parameters.rhos,
            edrift: parameters.edrift,
            no_growth: false,
            gas_evolution: parameters.gasevol,
        }
    }

    /// Check array lengths and the ordering of radii and times.
    pub fn validate(&self) -> Result<()> {
        let nr = self.radii.len();
        if nr == 0 {
            return Err(Error::IntegratorInput("radial grid is empty".to_string()));
        }
        if self.edges.len() != nr + 1 {
            return Err(Error::IntegratorInput(format!(
                "{} cell edges for {nr} cells",
                self.edges.len()
            )));
        }
        for (name, values) in [
            ("sigma_g", &self.sigma_g),
            ("sigma_d", &self.sigma_d),
            ("v_gas", &self.v_gas),
            ("temperature", &self.temperature),
            ("alpha", &self.alpha),
        ] {
            if values.len() != nr {
                return Err(Error::IntegratorInput(format!(
                    "{name} has {} values for {nr} cells",
                    values.len()
                )));
            }
        }
        if self.times.is_empty() {
            return Err(Error::IntegratorInput("no snapshot times".to_string()));
        }
        if self.times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::IntegratorInput(
                "snapshot times are not strictly increasing".to_string(),
            ));
        }
        if self.edges.windows(2).any(|w| w[1] <= w[0]) || self.edges[0] <= 0.0 {
            return Err(Error::IntegratorInput(
                "cell edges must be positive and strictly increasing".to_string(),
            ));
        }
        Ok(())
    }
}

/// Time evolution of the disk, one row per snapshot and one column per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Evolution {
    /// Gas surface density (g/cm²)
    pub sigma_g: DMatrix<f64>,
    /// Dust surface density (g/cm²)
    pub sigma_d: DMatrix<f64>,
    /// Radial gas velocity (cm/s)
    pub v_gas: DMatrix<f64>,
    /// Mass-weighted radial dust velocity (cm/s)
    pub v_dust: DMatrix<f64>,
    /// Radial velocity of the small population (cm/s)
    pub v_0: DMatrix<f64>,
    /// Radial velocity of the large population (cm/s)
    pub v_1: DMatrix<f64>,
    /// Drift-limited size (cm)
    pub a_dr: DMatrix<f64>,
    /// Fragmentation-limited size (cm)
    pub a_fr: DMatrix<f64>,
    /// Drift-fragmentation size (cm)
    pub a_df: DMatrix<f64>,
    /// Representative size of the large population (cm)
    pub a_t: DMatrix<f64>,
}

impl Evolution {
    pub fn n_times(&self) -> usize {
        self.sigma_g.nrows()
    }

    pub fn n_radii(&self) -> usize {
        self.sigma_g.ncols()
    }

    /// Check that every field has `nt` snapshots of `nr` cells.
    pub fn check_shape(&self, nt: usize, nr: usize) -> Result<()> {
        let fields = [
            ("sigma_g", &self.sigma_g),
            ("sigma_d", &self.sigma_d),
            ("v_gas", &self.v_gas),
            ("v_dust", &self.v_dust),
            ("v_0", &self.v_0),
            ("v_1", &self.v_1),
            ("a_dr", &self.a_dr),
            ("a_fr", &self.a_fr),
            ("a_df", &self.a_df),
            ("a_t", &self.a_t),
        ];
        for (field, matrix) in fields {
            if matrix.shape() != (nt, nr) {
                return Err(Error::ShapeMismatch {
                    field,
                    expected: (nt, nr),
                    found: matrix.shape(),
                });
            }
        }
        Ok(())
    }
}

/// Final disk state handed to a size reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructionInput {
    /// Cell centers (cm)
    pub radii: Vec<f64>,
    /// Candidate grain sizes (cm), strictly increasing
    pub sizes: Vec<f64>,
    pub sigma_g: Vec<f64>,
    pub sigma_d: Vec<f64>,
    pub a_dr: Vec<f64>,
    pub a_fr: Vec<f64>,
    pub a_df: Vec<f64>,
    pub a_t: Vec<f64>,
    pub alpha: Vec<f64>,
    pub temperature: Vec<f64>,
    pub rhos: f64,
    pub mstar: f64,
    pub vfrag: f64,
    pub a0: f64,
}

/// Dust surface density resolved in grain size.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeDistribution {
    /// Grain sizes (cm)
    pub sizes: Vec<f64>,
    /// Dust surface density per size bin (g/cm²), radius × size
    pub sigma: DMatrix<f64>,
    /// Largest populated size at each radius (cm)
    pub upper_size: Vec<f64>,
}

/// Turns the final disk state into a size distribution.
pub trait SizeReconstruction {
    fn reconstruct(&self, input: &ReconstructionInput) -> Result<SizeDistribution>;
}

/// Advances the disk over the snapshot times.
pub trait GrowthIntegrator {
    /// Evolve `input` and return every snapshot, the first one being the
    /// initial state.
    fn integrate(&self, input: &IntegratorInput) -> Result<Evolution>;

    /// Size reconstruction offered by this integrator, if any.
    fn reconstruction(&self) -> Option<&dyn SizeReconstruction> {
        None
    }
}
