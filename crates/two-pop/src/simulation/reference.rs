//! Self-similar reference for the simulated gas disk.

use std::ops::RangeInclusive;

use crate::analytic::lbp_solution;
use crate::grid::viscosity_normalization;
use crate::results::Results;

/// Self-similar gas profile at the first and last snapshot of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticReference {
    /// Σ_g at the first snapshot (g/cm²)
    pub initial: Vec<f64>,
    /// Σ_g at the last snapshot (g/cm²)
    pub last: Vec<f64>,
    /// Time elapsed between the two (s)
    pub elapsed: f64,
    /// Characteristic radius at the last snapshot (cm)
    pub rc: f64,
}

impl AnalyticReference {
    /// Largest |log₁₀(Σ_sim / Σ_ref)| at the last snapshot, over cells whose
    /// center lies in `radii` (cm). `None` when no cell qualifies.
    pub fn last_deviation(&self, results: &Results, radii: RangeInclusive<f64>) -> Option<f64> {
        let last = results.n_times().checked_sub(1)?;
        let simulated = results.gas_profile(last);
        results
            .radii
            .iter()
            .zip(simulated.iter().zip(&self.last))
            .filter(|(r, _)| radii.contains(*r))
            .map(|(_, (sim, reference))| (sim / reference).log10().abs())
            .reduce(f64::max)
    }
}

/// Evaluate the self-similar solution matching the setup of `results`.
///
/// The last profile is evaluated at the time elapsed since the first
/// snapshot, `t_last - t_first`, rather than at the absolute `t_last`, so
/// that the first snapshot coincides with the t = 0 profile the disk was
/// started from.
///
/// `None` when the results hold no cells or no snapshots.
pub fn analytic_reference(results: &Results) -> Option<AnalyticReference> {
    let p = &results.parameters;
    let (&t_first, &t_last) = (results.times.first()?, results.times.last()?);
    let (&r0, &temperature0) = (results.radii.first()?, results.temperature.first()?);
    let nu1 = viscosity_normalization(p.alpha, temperature0, p.mstar, r0);
    let elapsed = t_last - t_first;

    let initial = lbp_solution(&results.radii, p.gamma, nu1, p.mstar, p.mdisk, p.rc, 0.0);
    let last = lbp_solution(&results.radii, p.gamma, nu1, p.mstar, p.mdisk, p.rc, elapsed);

    Some(AnalyticReference {
        initial: initial.sigma,
        last: last.sigma,
        elapsed,
        rc: last.rc,
    })
}
