//! Persistence of [`Parameters`] as a TOML key/value file.
//!
//! The file holds a single `[parameters]` table with one entry per declared
//! parameter and is mapped onto the struct by its serde derives. Integer
//! entries are accepted for float parameters (`vfrag = 1000`), float entries
//! for count parameters are not.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{parameter_spec, Parameters, PARAMETERS};
use crate::error::{Error, Result};

/// File name of the persisted parameters inside an output directory.
pub const PARAMETER_FILE: &str = "parameters.toml";

/// Name of the single section holding the parameters.
pub const PARAMETER_SECTION: &str = "parameters";

#[derive(Serialize)]
struct ParameterFileRef<'a> {
    parameters: &'a Parameters,
}

#[derive(Deserialize)]
struct ParameterFile {
    parameters: Parameters,
}

impl Parameters {
    /// Serialize every parameter into the `[parameters]` table.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(&ParameterFileRef { parameters: self })?)
    }

    /// Parse a parameter file produced by [`Parameters::to_toml_string`].
    ///
    /// Every declared parameter must be present. Unknown entries are
    /// reported and ignored.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let root: toml::Table = text.parse()?;
        let section = root
            .get(PARAMETER_SECTION)
            .and_then(toml::Value::as_table)
            .ok_or(Error::MissingSection(PARAMETER_SECTION))?;

        for key in section.keys() {
            if parameter_spec(key).is_none() {
                warn!(parameter = key.as_str(), "unknown entry in parameter file ignored");
            }
        }
        if let Some(spec) = PARAMETERS.iter().find(|spec| !section.contains_key(spec.name)) {
            return Err(Error::MissingParameter(spec.name));
        }

        let file: ParameterFile = toml::Value::Table(root).try_into()?;
        file.parameters.validate()?;
        Ok(file.parameters)
    }

    /// Write `parameters.toml` into `dir`, creating the directory if needed.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

        let path = dir.join(PARAMETER_FILE);
        let text = self.to_toml_string()?;
        fs::write(&path, text).map_err(|e| Error::io(&path, e))
    }

    /// Read `parameters.toml` from `dir`.
    pub fn read_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(PARAMETER_FILE);
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Self::from_toml_str(&text)
    }
}
