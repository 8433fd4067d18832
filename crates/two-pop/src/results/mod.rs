//! Outcome of one run and its on-disk representation.

pub mod schema;
mod text;


use std::fs;
use std::path::Path;

use nalgebra::DMatrix;
use tracing::info;

use crate::error::{Error, Result};
use crate::grid::{disk_mass, InitialConditions};
use crate::integrator::{Evolution, SizeDistribution};
use crate::params::Parameters;
use schema::{FieldSpec, A, EVOLUTION_FIELDS, SIGMA_D_A, T, TIME, X, XI};

/// Everything a run produced, plus the parameters that produced it.
///
/// Time × radius fields have one row per snapshot and one column per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Results {
    pub parameters: Parameters,
    /// Cell centers (cm)
    pub radii: Vec<f64>,
    /// Cell edges (cm)
    pub edges: Vec<f64>,
    /// Midplane temperature (K)
    pub temperature: Vec<f64>,
    /// Snapshot times (s)
    pub times: Vec<f64>,
    pub sigma_g: DMatrix<f64>,
    pub sigma_d: DMatrix<f64>,
    pub v_gas: DMatrix<f64>,
    pub v_dust: DMatrix<f64>,
    pub v_0: DMatrix<f64>,
    pub v_1: DMatrix<f64>,
    pub a_dr: DMatrix<f64>,
    pub a_fr: DMatrix<f64>,
    pub a_df: DMatrix<f64>,
    pub a_t: DMatrix<f64>,
    /// Present when a reconstruction ran and succeeded
    pub size_distribution: Option<SizeDistribution>,
}

impl Results {
    /// Assemble results from the initial state and the integrator output.
    pub fn new(
        parameters: Parameters,
        initial: InitialConditions,
        evolution: Evolution,
        size_distribution: Option<SizeDistribution>,
    ) -> Self {
        Self {
            parameters,
            radii: initial.grid.centers,
            edges: initial.grid.edges,
            temperature: initial.temperature,
            times: initial.times,
            sigma_g: evolution.sigma_g,
            sigma_d: evolution.sigma_d,
            v_gas: evolution.v_gas,
            v_dust: evolution.v_dust,
            v_0: evolution.v_0,
            v_1: evolution.v_1,
            a_dr: evolution.a_dr,
            a_fr: evolution.a_fr,
            a_df: evolution.a_df,
            a_t: evolution.a_t,
            size_distribution,
        }
    }

    pub fn n_times(&self) -> usize {
        self.times.len()
    }

    pub fn n_radii(&self) -> usize {
        self.radii.len()
    }

    /// Gas surface density of snapshot `k`.
    pub fn gas_profile(&self, k: usize) -> Vec<f64> {
        self.sigma_g.row(k).iter().copied().collect()
    }

    /// Dust surface density of snapshot `k`.
    pub fn dust_profile(&self, k: usize) -> Vec<f64> {
        self.sigma_d.row(k).iter().copied().collect()
    }

    /// Gas mass on the grid at snapshot `k` (g).
    pub fn gas_mass(&self, k: usize) -> f64 {
        disk_mass(&self.edges, &self.gas_profile(k))
    }

    /// Dust mass on the grid at snapshot `k` (g).
    pub fn dust_mass(&self, k: usize) -> f64 {
        disk_mass(&self.edges, &self.dust_profile(k))
    }

    fn evolution_field(&self, spec: &FieldSpec) -> Option<&DMatrix<f64>> {
        let matrix = match spec.name {
            "sigma_g" => &self.sigma_g,
            "sigma_d" => &self.sigma_d,
            "v_gas" => &self.v_gas,
            "v_dust" => &self.v_dust,
            "v_0" => &self.v_0,
            "v_1" => &self.v_1,
            "a_dr" => &self.a_dr,
            "a_fr" => &self.a_fr,
            "a_df" => &self.a_df,
            "a_t" => &self.a_t,
            _ => return None,
        };
        Some(matrix)
    }

    fn evolution_field_mut(&mut self, spec: &FieldSpec) -> Option<&mut DMatrix<f64>> {
        let matrix = match spec.name {
            "sigma_g" => &mut self.sigma_g,
            "sigma_d" => &mut self.sigma_d,
            "v_gas" => &mut self.v_gas,
            "v_dust" => &mut self.v_dust,
            "v_0" => &mut self.v_0,
            "v_1" => &mut self.v_1,
            "a_dr" => &mut self.a_dr,
            "a_fr" => &mut self.a_fr,
            "a_df" => &mut self.a_df,
            "a_t" => &mut self.a_t,
            _ => return None,
        };
        Some(matrix)
    }

    /// Write every field and the parameter file into `dir`.
    ///
    /// The directory is created if needed. Without a size distribution any
    /// distribution files left in `dir` are removed.
    pub fn export(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        info!(dir = %dir.display(), "writing results");

        text::write_vector(dir, &X, &self.radii)?;
        text::write_vector(dir, &XI, &self.edges)?;
        text::write_vector(dir, &T, &self.temperature)?;
        text::write_vector(dir, &TIME, &self.times)?;
        for spec in EVOLUTION_FIELDS {
            if let Some(matrix) = self.evolution_field(spec) {
                text::write_matrix(dir, spec, matrix)?;
            }
        }

        match &self.size_distribution {
            Some(distribution) => {
                text::write_vector(dir, &A, &distribution.sizes)?;
                text::write_matrix(dir, &SIGMA_D_A, &distribution.sigma)?;
            }
            None => {
                text::remove(dir, &A)?;
                text::remove(dir, &SIGMA_D_A)?;
            }
        }

        self.parameters.write_to_dir(dir)
    }

    /// Read a directory written by [`Results::export`].
    ///
    /// The parameter file and every required field must be present. The
    /// size distribution is read when both of its files exist.
    pub fn import(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let parameters = Parameters::read_from_dir(dir)?;

        let radii = text::read_vector(dir, &X, None)?;
        let nr = radii.len();
        let edges = text::read_vector(dir, &XI, Some(nr + 1))?;
        let temperature = text::read_vector(dir, &T, Some(nr))?;
        let times = text::read_vector(dir, &TIME, None)?;
        let nt = times.len();

        let empty = DMatrix::zeros(nt, nr);
        let mut results = Self {
            parameters,
            radii,
            edges,
            temperature,
            times,
            sigma_g: empty.clone(),
            sigma_d: empty.clone(),
            v_gas: empty.clone(),
            v_dust: empty.clone(),
            v_0: empty.clone(),
            v_1: empty.clone(),
            a_dr: empty.clone(),
            a_fr: empty.clone(),
            a_df: empty.clone(),
            a_t: empty,
            size_distribution: None,
        };
        for spec in EVOLUTION_FIELDS {
            let matrix = text::read_matrix(dir, spec, (nt, nr))?;
            if let Some(slot) = results.evolution_field_mut(spec) {
                *slot = matrix;
            }
        }

        results.size_distribution = match (text::exists(dir, &A), text::exists(dir, &SIGMA_D_A)) {
            (false, false) => None,
            (true, true) => Some(read_distribution(dir, nr)?),
            (false, true) => return Err(missing(dir, &A)),
            (true, false) => return Err(missing(dir, &SIGMA_D_A)),
        };

        Ok(results)
    }
}

fn missing(dir: &Path, spec: &FieldSpec) -> Error {
    Error::MissingField {
        field: spec.name,
        path: dir.join(spec.file),
    }
}

fn read_distribution(dir: &Path, nr: usize) -> Result<SizeDistribution> {
    let sizes = text::read_vector(dir, &A, None)?;
    let sigma = text::read_matrix(dir, &SIGMA_D_A, (nr, sizes.len()))?;
    let upper_size = upper_sizes(&sizes, &sigma);
    Ok(SizeDistribution {
        sizes,
        sigma,
        upper_size,
    })
}

/// Largest size with a populated bin at each radius, or the smallest size
/// where nothing is populated.
fn upper_sizes(sizes: &[f64], sigma: &DMatrix<f64>) -> Vec<f64> {
    sigma
        .row_iter()
        .map(|row| {
            let bins: Vec<f64> = row.iter().copied().collect();
            let j = bins.iter().rposition(|&s| s > 0.0).unwrap_or(0);
            sizes.get(j).copied().unwrap_or(f64::NAN)
        })
        .collect()
}
