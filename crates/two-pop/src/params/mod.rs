//! Simulation parameters.
//!
//! All parameters are declared once in [`PARAMETERS`] (name, kind, meaning).
//! That table drives construction from loose key/value pairs and the
//! summary logged at run start; `parameters.toml` is read and written
//! through the serde derives of [`Parameters`].
//!
//! Every dimensional value is stored in cgs: `tmax` in seconds, `mstar` and
//! `mdisk` in grams, `rstar` and `rc` in centimeters.

mod file;

#[cfg(test)]
mod params_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;
use units::{Length, Mass, Time};

use crate::constants::{AU, M_SUN, R_SUN, YEAR};
use crate::error::{Error, Result};
use crate::grid::{time_grid, TIME_GRID_START};

pub use file::{PARAMETER_FILE, PARAMETER_SECTION};

/// Value type of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Integer,
    Float,
    Boolean,
    Text,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterKind::Integer => "an integer",
            ParameterKind::Float => "a float",
            ParameterKind::Boolean => "a boolean",
            ParameterKind::Text => "a string",
        };
        f.write_str(name)
    }
}

/// A loosely typed parameter value, as supplied by a caller or read from disk.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Integer(_) => ParameterKind::Integer,
            ParameterValue::Float(_) => ParameterKind::Float,
            ParameterValue::Boolean(_) => ParameterKind::Boolean,
            ParameterValue::Text(_) => ParameterKind::Text,
        }
    }

    fn type_error(&self, spec: &ParameterSpec) -> Error {
        Error::ParameterType {
            name: spec.name.to_string(),
            expected: spec.kind,
            found: self.kind(),
        }
    }

    fn as_count(&self, spec: &ParameterSpec) -> Result<usize> {
        match *self {
            ParameterValue::Integer(v) => usize::try_from(v).map_err(|_| Error::InvalidParameter {
                name: spec.name,
                reason: format!("{v} is not a valid count"),
            }),
            _ => Err(self.type_error(spec)),
        }
    }

    /// Floats accept integer values (`vfrag = 1000`), never the other way round.
    fn as_float(&self, spec: &ParameterSpec) -> Result<f64> {
        match *self {
            ParameterValue::Float(v) => Ok(v),
            ParameterValue::Integer(v) => Ok(v as f64),
            _ => Err(self.type_error(spec)),
        }
    }

    fn as_bool(&self, spec: &ParameterSpec) -> Result<bool> {
        match *self {
            ParameterValue::Boolean(v) => Ok(v),
            _ => Err(self.type_error(spec)),
        }
    }

    fn as_text(&self, spec: &ParameterSpec) -> Result<String> {
        match self {
            ParameterValue::Text(v) => Ok(v.clone()),
            _ => Err(self.type_error(spec)),
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Boolean(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

/// Declaration of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParameterKind,
    pub description: &'static str,
}

const fn spec(name: &'static str, kind: ParameterKind, description: &'static str) -> ParameterSpec {
    ParameterSpec {
        name,
        kind,
        description,
    }
}

/// Every parameter the model knows about, in persistence order.
pub const PARAMETERS: &[ParameterSpec] = &[
    spec("nr", ParameterKind::Integer, "number of radial grid cells"),
    spec("nt", ParameterKind::Integer, "number of snapshots"),
    spec("na", ParameterKind::Integer, "number of particle sizes for the reconstruction"),
    spec("tmax", ParameterKind::Float, "simulation end time [s]"),
    spec("alpha", ParameterKind::Float, "turbulence parameter at the inner grid radius"),
    spec("d2g", ParameterKind::Float, "initial dust-to-gas ratio"),
    spec("mstar", ParameterKind::Float, "stellar mass [g]"),
    spec("tstar", ParameterKind::Float, "stellar effective temperature [K]"),
    spec("rstar", ParameterKind::Float, "stellar radius [cm]"),
    spec("rc", ParameterKind::Float, "initial characteristic disk radius [cm]"),
    spec("mdisk", ParameterKind::Float, "initial disk mass [g]"),
    spec("rhos", ParameterKind::Float, "grain bulk density [g/cm^3]"),
    spec("vfrag", ParameterKind::Float, "fragmentation velocity [cm/s]"),
    spec("a0", ParameterKind::Float, "initial grain size [cm]"),
    spec("gamma", ParameterKind::Float, "viscosity exponent, nu ~ r^gamma"),
    spec("edrift", ParameterKind::Float, "drift efficiency factor"),
    spec("gasevol", ParameterKind::Boolean, "evolve the gas viscously"),
    spec("dir", ParameterKind::Text, "output directory"),
];

/// Look up the declaration of a parameter by name.
pub fn parameter_spec(name: &str) -> Option<&'static ParameterSpec> {
    PARAMETERS.iter().find(|spec| spec.name == name)
}

/// Complete, immutable parameter set for one run.
///
/// Build it with [`Parameters::default`], one of the presets, or
/// [`Parameters::from_values`]; it is only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Number of radial grid cells
    pub nr: usize,
    /// Number of snapshots
    pub nt: usize,
    /// Number of particle sizes for the size-distribution reconstruction
    pub na: usize,
    /// End time (s)
    pub tmax: f64,
    /// Turbulence parameter α at the inner grid radius
    pub alpha: f64,
    /// Initial dust-to-gas ratio
    pub d2g: f64,
    /// Stellar mass (g)
    pub mstar: f64,
    /// Stellar effective temperature (K)
    pub tstar: f64,
    /// Stellar radius (cm)
    pub rstar: f64,
    /// Initial characteristic radius (cm)
    pub rc: f64,
    /// Initial disk mass (g)
    pub mdisk: f64,
    /// Grain bulk density (g/cm³)
    pub rhos: f64,
    /// Fragmentation velocity (cm/s)
    pub vfrag: f64,
    /// Initial grain size (cm)
    pub a0: f64,
    /// Viscosity exponent: ν ∝ r^γ
    pub gamma: f64,
    /// Drift efficiency factor
    pub edrift: f64,
    /// Whether the gas evolves viscously
    pub gasevol: bool,
    /// Output directory
    pub dir: String,
}

impl Default for Parameters {
    /// A 0.7 M☉ T Tauri star with a 0.07 M☉ disk of characteristic radius
    /// 200 AU, evolved for 1 Myr.
    fn default() -> Self {
        let mstar = 0.7 * M_SUN;
        Self {
            nr: 200,
            nt: 100,
            na: 150,
            tmax: 1e6 * YEAR,
            alpha: 1e-3,
            d2g: 1e-2,
            mstar,
            tstar: 4010.0,
            rstar: 1.806 * R_SUN,
            rc: 200.0 * AU,
            mdisk: 0.1 * mstar,
            rhos: 1.156,
            vfrag: 1000.0,
            a0: 1e-5,
            gamma: 1.0,
            edrift: 1.0,
            gasevol: true,
            dir: "data".to_string(),
        }
    }
}

impl Parameters {
    /// Compact, strongly viscous disk used to check the gas evolution
    /// against the self-similar solution.
    pub fn viscous_test() -> Self {
        Self {
            rc: 20.0 * AU,
            alpha: 1e-2,
            ..Self::default()
        }
    }

    /// Build a parameter set from name/value pairs on top of the defaults.
    ///
    /// Unknown names are reported and ignored. A value of the wrong kind is
    /// an error, except that integers are accepted for float parameters.
    pub fn from_values<I, K>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, ParameterValue)>,
        K: AsRef<str>,
    {
        let mut parameters = Self::default();
        for (name, value) in values {
            let name = name.as_ref();
            match parameter_spec(name) {
                Some(spec) => parameters.assign(spec, &value)?,
                None => warn!(parameter = name, "no such parameter, value ignored"),
            }
        }
        parameters.validate()?;
        Ok(parameters)
    }

    fn assign(&mut self, spec: &ParameterSpec, value: &ParameterValue) -> Result<()> {
        match spec.name {
            "nr" => self.nr = value.as_count(spec)?,
            "nt" => self.nt = value.as_count(spec)?,
            "na" => self.na = value.as_count(spec)?,
            "tmax" => self.tmax = value.as_float(spec)?,
            "alpha" => self.alpha = value.as_float(spec)?,
            "d2g" => self.d2g = value.as_float(spec)?,
            "mstar" => self.mstar = value.as_float(spec)?,
            "tstar" => self.tstar = value.as_float(spec)?,
            "rstar" => self.rstar = value.as_float(spec)?,
            "rc" => self.rc = value.as_float(spec)?,
            "mdisk" => self.mdisk = value.as_float(spec)?,
            "rhos" => self.rhos = value.as_float(spec)?,
            "vfrag" => self.vfrag = value.as_float(spec)?,
            "a0" => self.a0 = value.as_float(spec)?,
            "gamma" => self.gamma = value.as_float(spec)?,
            "edrift" => self.edrift = value.as_float(spec)?,
            "gasevol" => self.gasevol = value.as_bool(spec)?,
            "dir" => self.dir = value.as_text(spec)?,
            other => {
                return Err(Error::InvalidParameter {
                    name: spec.name,
                    reason: format!("`{other}` is declared but not a field of the parameter set"),
                })
            }
        }
        Ok(())
    }

    /// Current value of a declared parameter.
    pub fn value(&self, name: &str) -> Option<ParameterValue> {
        let value = match name {
            "nr" => ParameterValue::Integer(self.nr as i64),
            "nt" => ParameterValue::Integer(self.nt as i64),
            "na" => ParameterValue::Integer(self.na as i64),
            "tmax" => ParameterValue::Float(self.tmax),
            "alpha" => ParameterValue::Float(self.alpha),
            "d2g" => ParameterValue::Float(self.d2g),
            "mstar" => ParameterValue::Float(self.mstar),
            "tstar" => ParameterValue::Float(self.tstar),
            "rstar" => ParameterValue::Float(self.rstar),
            "rc" => ParameterValue::Float(self.rc),
            "mdisk" => ParameterValue::Float(self.mdisk),
            "rhos" => ParameterValue::Float(self.rhos),
            "vfrag" => ParameterValue::Float(self.vfrag),
            "a0" => ParameterValue::Float(self.a0),
            "gamma" => ParameterValue::Float(self.gamma),
            "edrift" => ParameterValue::Float(self.edrift),
            "gasevol" => ParameterValue::Boolean(self.gasevol),
            "dir" => ParameterValue::Text(self.dir.clone()),
            _ => return None,
        };
        Some(value)
    }

    /// Check the values the grid construction depends on.
    ///
    /// The snapshot times built from `nt` and `tmax` must be strictly
    /// increasing.
    ///
    /// Physical scalars such as `gamma` are deliberately left alone: a
    /// degenerate value shows up as non-finite output instead.
    pub fn validate(&self) -> Result<()> {
        for (name, count) in [("nr", self.nr), ("nt", self.nt), ("na", self.na)] {
            if count == 0 {
                return Err(Error::InvalidParameter {
                    name,
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        if !self.tmax.is_finite() || self.tmax <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "tmax",
                reason: format!("{} is not a positive, finite time", self.tmax),
            });
        }
        if self.nt > 1 && self.tmax <= TIME_GRID_START {
            return Err(Error::InvalidParameter {
                name: "tmax",
                reason: format!(
                    "{} s does not exceed the first snapshot at {TIME_GRID_START} s",
                    self.tmax
                ),
            });
        }
        if self.nt > 1 && time_grid(self.nt, self.tmax).windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::InvalidParameter {
                name: "tmax",
                reason: format!(
                    "{} s is too close to {TIME_GRID_START} s for {} distinct snapshots",
                    self.tmax, self.nt
                ),
            });
        }

        Ok(())
    }

    /// Human-readable listing in convenient units, one line per parameter.
    pub fn summary(&self) -> Vec<String> {
        let rows: [(&str, f64, &str); 16] = [
            ("nr", self.nr as f64, ""),
            ("nt", self.nt as f64, ""),
            ("na", self.na as f64, ""),
            ("tmax", Time::from_seconds(self.tmax).to_years(), "years"),
            ("alpha", self.alpha, ""),
            ("d2g", self.d2g, ""),
            ("mstar", Mass::from_grams(self.mstar).to_solar_masses(), "solar masses"),
            ("tstar", self.tstar, "K"),
            ("rstar", Length::from_cm(self.rstar).to_solar_radii(), "R_sun"),
            ("rc", Length::from_cm(self.rc).to_au(), "AU"),
            ("mdisk", self.mdisk / self.mstar, "M_star"),
            ("rhos", self.rhos, "g/cm^3"),
            ("vfrag", self.vfrag, "cm/s"),
            ("a0", self.a0, "cm"),
            ("gamma", self.gamma, ""),
            ("edrift", self.edrift, ""),
        ];

        let mut lines: Vec<String> = rows
            .iter()
            .map(|(name, value, unit)| format!("{name:<9} = {value:>10.3e} {unit}").trim_end().to_string())
            .collect();
        let gas = if self.gasevol { "on" } else { "off" };
        lines.push(format!("{:<9} = {gas:>10}", "gas evol."));
        lines.push(format!("{:<9} = {:>10}", "dir", self.dir));
        lines
    }
}
