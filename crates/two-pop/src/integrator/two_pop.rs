//! Built-in two-population integrator.

use nalgebra::DMatrix;
use tracing::debug;

use super::reconstruction::PowerLawReconstruction;
use super::transport::{dust_fluxes, gradient, implicit_step, viscous_fluxes};
use super::velocity::{populations, Background, Populations};
use super::{Evolution, GrowthIntegrator, IntegratorInput, SizeReconstruction};
use crate::constants::YEAR;
use crate::error::{Error, Result};
use crate::grid::annulus_areas;

/// Smallest accepted step size as a fraction of the current time
const MIN_TIME_STEP_FRACTION: f64 = 1e-6;

/// Two-population dust model on an evolving viscous gas disk.
///
/// Steps are implicit with `dt = time_step_fraction · t`, shortened to land
/// exactly on every snapshot time.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoPopModel {
    pub time_step_fraction: f64,
    reconstruction: Option<PowerLawReconstruction>,
}

impl Default for TwoPopModel {
    fn default() -> Self {
        Self {
            time_step_fraction: 0.05,
            reconstruction: Some(PowerLawReconstruction::default()),
        }
    }
}

impl TwoPopModel {
    /// Same model, but offering no size reconstruction.
    pub fn without_reconstruction(self) -> Self {
        Self {
            reconstruction: None,
            ..self
        }
    }

    pub fn with_reconstruction(self, reconstruction: PowerLawReconstruction) -> Self {
        Self {
            reconstruction: Some(reconstruction),
            ..self
        }
    }

    pub fn with_time_step_fraction(self, time_step_fraction: f64) -> Self {
        Self {
            time_step_fraction,
            ..self
        }
    }
}

impl GrowthIntegrator for TwoPopModel {
    fn integrate(&self, input: &IntegratorInput) -> Result<Evolution> {
        input.validate()?;
        if input.times[0] <= 0.0 {
            return Err(Error::IntegratorInput(format!(
                "first snapshot at {} s, must be positive",
                input.times[0]
            )));
        }
        let f = self.time_step_fraction;
        if !f.is_finite() || f < MIN_TIME_STEP_FRACTION {
            return Err(Error::IntegratorInput(format!(
                "time step fraction {f} is not usable"
            )));
        }

        let background = Background::new(input);
        let areas = annulus_areas(&input.edges);
        let gas_fluxes = viscous_fluxes(&input.edges, &input.radii, &background.nu);

        let mut sigma_g = input.sigma_g.clone();
        let mut sigma_d = input.sigma_d.clone();
        let mut v_gas = input.v_gas.clone();
        let mut t = input.times[0];

        let mut recorder = Recorder::new(input.times.len(), input.radii.len());
        let pops = populations(input, &background, &sigma_g, &sigma_d, &v_gas, t);
        recorder.record(&sigma_g, &sigma_d, &v_gas, pops);

        for (snapshot, &target) in input.times.iter().enumerate().skip(1) {
            let mut steps = 0_usize;
            while t < target {
                let next = (t * (1.0 + f)).min(target);
                let dt = next - t;

                if input.gas_evolution {
                    implicit_step(&areas, &gas_fluxes, &mut sigma_g, dt);
                    v_gas = viscous_velocity(&background, &sigma_g);
                }

                let pops = populations(input, &background, &sigma_g, &sigma_d, &v_gas, next);
                let fluxes = dust_fluxes(
                    &input.edges,
                    &input.radii,
                    &pops.v_dust,
                    &pops.diffusivity,
                    &sigma_g,
                );
                implicit_step(&areas, &fluxes, &mut sigma_d, dt);

                t = next;
                steps += 1;
            }

            let pops = populations(input, &background, &sigma_g, &sigma_d, &v_gas, t);
            recorder.record(&sigma_g, &sigma_d, &v_gas, pops);
            debug!(snapshot, years = t / YEAR, steps, "snapshot recorded");
        }

        Ok(recorder.finish())
    }

    fn reconstruction(&self) -> Option<&dyn SizeReconstruction> {
        self.reconstruction
            .as_ref()
            .map(|r| r as &dyn SizeReconstruction)
    }
}

/// Gas velocity of a viscously evolving disk, v = -3/(Σ r^½) ∂_r(ν Σ r^½).
fn viscous_velocity(background: &Background, sigma_g: &[f64]) -> Vec<f64> {
    let g: Vec<f64> = sigma_g
        .iter()
        .zip(&background.nu)
        .zip(&background.radii)
        .map(|((s, nu), r)| nu * s * r.sqrt())
        .collect();

    gradient(&background.radii, &g)
        .iter()
        .zip(sigma_g)
        .zip(&background.radii)
        .map(|((dg, s), r)| -3.0 * dg / (s * r.sqrt()))
        .collect()
}

/// Row-major snapshot storage, turned into matrices at the end.
struct Recorder {
    nt: usize,
    nr: usize,
    sigma_g: Vec<f64>,
    sigma_d: Vec<f64>,
    v_gas: Vec<f64>,
    v_dust: Vec<f64>,
    v_0: Vec<f64>,
    v_1: Vec<f64>,
    a_dr: Vec<f64>,
    a_fr: Vec<f64>,
    a_df: Vec<f64>,
    a_t: Vec<f64>,
}

impl Recorder {
    fn new(nt: usize, nr: usize) -> Self {
        let field = || Vec::with_capacity(nt * nr);
        Self {
            nt,
            nr,
            sigma_g: field(),
            sigma_d: field(),
            v_gas: field(),
            v_dust: field(),
            v_0: field(),
            v_1: field(),
            a_dr: field(),
            a_fr: field(),
            a_df: field(),
            a_t: field(),
        }
    }

    fn record(&mut self, sigma_g: &[f64], sigma_d: &[f64], v_gas: &[f64], pops: Populations) {
        self.sigma_g.extend_from_slice(sigma_g);
        self.sigma_d.extend_from_slice(sigma_d);
        self.v_gas.extend_from_slice(v_gas);
        self.v_dust.extend(pops.v_dust);
        self.v_0.extend(pops.v_0);
        self.v_1.extend(pops.v_1);
        self.a_dr.extend(pops.a_dr);
        self.a_fr.extend(pops.a_fr);
        self.a_df.extend(pops.a_df);
        self.a_t.extend(pops.a_t);
    }

    fn finish(self) -> Evolution {
        let (nt, nr) = (self.nt, self.nr);
        let matrix = |data: Vec<f64>| DMatrix::from_row_slice(nt, nr, &data);

        Evolution {
            sigma_g: matrix(self.sigma_g),
            sigma_d: matrix(self.sigma_d),
            v_gas: matrix(self.v_gas),
            v_dust: matrix(self.v_dust),
            v_0: matrix(self.v_0),
            v_1: matrix(self.v_1),
            a_dr: matrix(self.a_dr),
            a_fr: matrix(self.a_fr),
            a_df: matrix(self.a_df),
            a_t: matrix(self.a_t),
        }
    }
}
