//! Reading and writing single field files.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::DMatrix;

use super::schema::{header, header_version, FieldSpec, SCHEMA_VERSION};
use crate::error::{Error, Result};

/// Write a one-dimensional field, one value per line.
pub fn write_vector(dir: &Path, spec: &FieldSpec, values: &[f64]) -> Result<()> {
    write_rows(dir, spec, values.iter().map(std::slice::from_ref))
}

/// Write a two-dimensional field, one matrix row per line.
pub fn write_matrix(dir: &Path, spec: &FieldSpec, matrix: &DMatrix<f64>) -> Result<()> {
    let rows: Vec<Vec<f64>> = matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect();
    write_rows(dir, spec, rows.iter().map(Vec::as_slice))
}

fn write_rows<'a>(dir: &Path, spec: &FieldSpec, rows: impl Iterator<Item = &'a [f64]>) -> Result<()> {
    let path = dir.join(spec.file);
    let write = || -> io::Result<()> {
        let mut out = BufWriter::new(File::create(&path)?);
        writeln!(out, "{}", header(spec))?;
        for row in rows {
            let line: Vec<String> = row.iter().map(|v| format!("{v:.18e}")).collect();
            writeln!(out, "{}", line.join(" "))?;
        }
        out.flush()
    };
    write().map_err(|e| Error::io(&path, e))
}

/// Remove a field file if it exists.
pub fn remove(dir: &Path, spec: &FieldSpec) -> Result<()> {
    let path = dir.join(spec.file);
    match fs::remove_file(&path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(Error::io(&path, e)),
        _ => Ok(()),
    }
}

/// Whether the file of `spec` exists in `dir`.
pub fn exists(dir: &Path, spec: &FieldSpec) -> bool {
    dir.join(spec.file).is_file()
}

/// Read the rows of a field file, skipping comment lines.
pub fn read_rows(dir: &Path, spec: &FieldSpec) -> Result<Vec<Vec<f64>>> {
    let path = dir.join(spec.file);
    let file = File::open(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::MissingField {
            field: spec.name,
            path: path.clone(),
        },
        _ => Error::io(&path, e),
    })?;

    let mut rows = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::io(&path, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            if let Some(found) = header_version(comment) {
                if found > SCHEMA_VERSION {
                    return Err(Error::UnsupportedSchema {
                        found,
                        supported: SCHEMA_VERSION,
                    });
                }
            }
            continue;
        }

        let row = line
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::MalformedField {
                path: path.clone(),
                line: index + 1,
                reason: e.to_string(),
            })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read a one-dimensional field, checking its length when `expected` is given.
pub fn read_vector(dir: &Path, spec: &FieldSpec, expected: Option<usize>) -> Result<Vec<f64>> {
    let values: Vec<f64> = read_rows(dir, spec)?.into_iter().flatten().collect();
    if let Some(n) = expected {
        if values.len() != n {
            return Err(Error::ShapeMismatch {
                field: spec.name,
                expected: (n, 1),
                found: (values.len(), 1),
            });
        }
    }
    Ok(values)
}

/// Read a two-dimensional field of shape `(nrows, ncols)`.
pub fn read_matrix(dir: &Path, spec: &FieldSpec, (nrows, ncols): (usize, usize)) -> Result<DMatrix<f64>> {
    let rows = read_rows(dir, spec)?;
    let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
    if rows.len() != nrows || rows.iter().any(|row| row.len() != ncols) {
        return Err(Error::ShapeMismatch {
            field: spec.name,
            expected: (nrows, ncols),
            found: (rows.len(), widest),
        });
    }
    Ok(DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]))
}
