//! Implicit conservative transport on a radial finite-volume grid.
//!
//! The mass flux through interface `i + ½` is written as
//!
//! ```text
//! F_{i+½} = 2π (a_i Σ_i - b_i Σ_{i+1})
//! ```
//!
//! with non-negative coefficients `a_i`, `b_i`. Backward Euler then gives a
//! tridiagonal system whose matrix is column diagonally dominant with
//! positive diagonal and non-positive off-diagonals, so the update is
//! unconditionally stable, keeps Σ non-negative and conserves mass up to
//! what leaves through the inner edge.

use crate::constants::PI;
use crate::grid::SIGMA_FLOOR;

/// Interface coefficients for one implicit step.
#[derive(Debug, Clone, PartialEq)]
pub struct Fluxes {
    /// Outward coefficients, one per interior interface
    pub outward: Vec<f64>,
    /// Inward coefficients, one per interior interface
    pub inward: Vec<f64>,
    /// Loss coefficient through the inner edge, multiplying Σ_0
    pub inner_loss: f64,
}

/// Advance `sigma` by `dt` with the given fluxes, in place.
///
/// `areas` are the annulus areas of the cells. The outer edge is closed.
pub fn implicit_step(areas: &[f64], fluxes: &Fluxes, sigma: &mut [f64], dt: f64) {
    let n = sigma.len();
    if n == 0 {
        return;
    }

    let k = 2.0 * PI * dt;
    let mut lower = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut upper = vec![0.0; n];
    let mut rhs = vec![0.0; n];

    for i in 0..n {
        diag[i] = areas[i];
        rhs[i] = areas[i] * sigma[i];
        if i + 1 < n {
            diag[i] += k * fluxes.outward[i];
            upper[i] = -k * fluxes.inward[i];
        }
        if i > 0 {
            diag[i] += k * fluxes.inward[i - 1];
            lower[i] = -k * fluxes.outward[i - 1];
        }
    }
    diag[0] += k * fluxes.inner_loss;

    let solution = solve_tridiagonal(&lower, &diag, &upper, &rhs);
    for (s, new) in sigma.iter_mut().zip(solution) {
        *s = new.max(SIGMA_FLOOR);
    }
}

/// Thomas algorithm for a tridiagonal system.
///
/// `lower[0]` and `upper[n-1]` are ignored.
pub fn solve_tridiagonal(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    c[0] = upper[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for i in 1..n {
        let m = diag[i] - lower[i] * c[i - 1];
        c[i] = upper[i] / m;
        d[i] = (rhs[i] - lower[i] * d[i - 1]) / m;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d[i] - c[i] * x[i + 1];
    }
    x
}

/// Viscous gas fluxes for ∂Σ/∂t = (3/r) ∂_r[r^½ ∂_r(ν Σ r^½)].
///
/// `nu` is given at the cell centers. The inner edge is a zero-torque
/// boundary, where ν Σ r^½ vanishes.
pub fn viscous_fluxes(edges: &[f64], centers: &[f64], nu: &[f64]) -> Fluxes {
    let w: Vec<f64> = nu
        .iter()
        .zip(centers)
        .map(|(nu, x)| nu * x.sqrt())
        .collect();

    let (outward, inward) = centers
        .windows(2)
        .enumerate()
        .map(|(i, x)| {
            let k = 3.0 * edges[i + 1].sqrt() / (x[1] - x[0]);
            (k * w[i], k * w[i + 1])
        })
        .unzip();

    let inner_loss = 3.0 * edges[0].sqrt() / (centers[0] - edges[0]) * w[0];

    Fluxes {
        outward,
        inward,
        inner_loss,
    }
}

/// Dust fluxes: donor-cell advection plus diffusion of the dust-to-gas ratio.
///
/// `velocity` and `diffusivity` are given at the cell centers and averaged
/// onto the interfaces. Dust only leaves through the inner edge, and only
/// when it moves inward.
pub fn dust_fluxes(
    edges: &[f64],
    centers: &[f64],
    velocity: &[f64],
    diffusivity: &[f64],
    sigma_g: &[f64],
) -> Fluxes {
    let (outward, inward) = centers
        .windows(2)
        .enumerate()
        .map(|(i, x)| {
            let r = edges[i + 1];
            let v = 0.5 * (velocity[i] + velocity[i + 1]);
            let d = 0.5 * (diffusivity[i] + diffusivity[i + 1]);
            let gas = sigma_g[i].min(sigma_g[i + 1]);
            let mix = d * gas / (x[1] - x[0]);

            let out = r * (v.max(0.0) + mix / sigma_g[i]);
            let inn = r * (-v.min(0.0) + mix / sigma_g[i + 1]);
            (out, inn)
        })
        .unzip();

    let inner_loss = -edges[0] * velocity[0].min(0.0);

    Fluxes {
        outward,
        inward,
        inner_loss,
    }
}

/// Centered derivative of `f` with respect to `x`, one-sided at the ends.
pub fn gradient(x: &[f64], f: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n < 2 {
        return vec![0.0; n];
    }

    (0..n)
        .map(|i| {
            let (lo, hi) = match i {
                0 => (0, 1),
                i if i == n - 1 => (n - 2, n - 1),
                i => (i - 1, i + 1),
            };
            (f[hi] - f[lo]) / (x[hi] - x[lo])
        })
        .collect()
}
