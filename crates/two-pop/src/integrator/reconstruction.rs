//! Power-law size distribution reconstruction.
//!
//! At each radius the dust surface density is spread over the sizes up to
//! the representative size `a_t`. The mass per logarithmic size bin follows
//! a^p with p = 0.5 where growth is fragmentation-limited and p = 1.25 where
//! it is drift-limited (Birnstiel, Klahr & Ercolano 2012).

use nalgebra::DMatrix;

use super::{ReconstructionInput, SizeDistribution, SizeReconstruction};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawReconstruction {
    /// Mass-per-log-bin exponent in the fragmentation-limited regime
    pub fragmentation_exponent: f64,
    /// Mass-per-log-bin exponent in the drift-limited regime
    pub drift_exponent: f64,
}

impl Default for PowerLawReconstruction {
    fn default() -> Self {
        Self {
            fragmentation_exponent: 0.5,
            drift_exponent: 1.25,
        }
    }
}

impl SizeReconstruction for PowerLawReconstruction {
    fn reconstruct(&self, input: &ReconstructionInput) -> Result<SizeDistribution> {
        check(input)?;

        let (nr, na) = (input.radii.len(), input.sizes.len());
        let a_min = input.sizes[0];
        let mut sigma = DMatrix::zeros(nr, na);
        let mut upper_size = Vec::with_capacity(nr);

        for i in 0..nr {
            let drift_limited = input.a_dr[i] < input.a_fr[i].min(input.a_df[i]);
            let p = if drift_limited {
                self.drift_exponent
            } else {
                self.fragmentation_exponent
            };

            // The smallest size is always populated
            let populated = input
                .sizes
                .iter()
                .take_while(|&&a| a <= input.a_t[i])
                .count()
                .max(1);
            let weights: Vec<f64> = input.sizes[..populated]
                .iter()
                .map(|a| (a / a_min).powf(p))
                .collect();
            let total: f64 = weights.iter().sum();

            for (j, w) in weights.iter().enumerate() {
                sigma[(i, j)] = input.sigma_d[i] * w / total;
            }
            upper_size.push(input.sizes[populated - 1]);
        }

        Ok(SizeDistribution {
            sizes: input.sizes.clone(),
            sigma,
            upper_size,
        })
    }
}

fn check(input: &ReconstructionInput) -> Result<()> {
    let nr = input.radii.len();
    if nr == 0 {
        return Err(Error::Reconstruction("no radii".to_string()));
    }
    if input.sizes.is_empty() {
        return Err(Error::Reconstruction("empty size axis".to_string()));
    }
    if !input.sizes.iter().all(|a| a.is_finite() && *a > 0.0)
        || input.sizes.windows(2).any(|w| w[1] <= w[0])
    {
        return Err(Error::Reconstruction(
            "size axis must be positive, finite and strictly increasing".to_string(),
        ));
    }

    for (name, values) in [
        ("sigma_d", &input.sigma_d),
        ("a_dr", &input.a_dr),
        ("a_fr", &input.a_fr),
        ("a_df", &input.a_df),
        ("a_t", &input.a_t),
    ] {
        if values.len() != nr {
            return Err(Error::Reconstruction(format!(
                "{name} has {} values for {nr} radii",
                values.len()
            )));
        }
    }
    if let Some(i) = input
        .sigma_d
        .iter()
        .zip(&input.a_t)
        .position(|(s, a)| !s.is_finite() || *s < 0.0 || !a.is_finite())
    {
        return Err(Error::Reconstruction(format!(
            "non-finite disk state at radius index {i}"
        )));
    }

    Ok(())
}
