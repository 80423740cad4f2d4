//! Elmer `scalar_results.names` + `scalar_results`.
//!
//! The names file lists one column per line (`  3: res: cmf 12`). The
//! S-matrix is stored as an N² block of real parts (`cmf 11`, `cmf 12`, ...)
//! followed directly by the N² imaginary parts (`cmf im 11`, ...).

use crate::error::ConvertError;
use crate::network::{DbDeg, ParsedNetwork};
use crate::parser::{parse_number, read_text};
use crate::scale::Scale;
use log::info;
use num::complex::c64;
use std::f64::consts::PI;
use std::path::Path;

const OMEGA_COLUMN: &str = "angular frequency";
const MATRIX_PREFIX: &str = "cmf";
const RE_S11_COLUMN: &str = "cmf 11";
const IM_S11_COLUMN: &str = "cmf im 11";

/// Reads the names file at `names_path` and the data file next to it
pub fn read_elmer(names_path: &Path, tolerance: f64) -> Result<ParsedNetwork, ConvertError> {
    let names = read_text(names_path)?;
    let data_path = names_path.with_extension("");
    let data = read_text(&data_path)?;
    parse_elmer(&names, &data, tolerance)
}

/// Column names in column order
fn column_names(names: &str) -> Vec<String> {
    names
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
                return None;
            }
            let parts: Vec<&str> = trimmed.split(':').collect();
            if parts.len() >= 3 {
                Some(parts[2].trim().to_string())
            } else {
                None
            }
        })
        .collect()
}

fn column_index(columns: &[String], name: &str) -> Result<usize, ConvertError> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| ConvertError::format(format!("column '{}' not found in names file", name)))
}

/// Elmer reports phase with the opposite sign convention.
fn elmer_db_deg(re: f64, im: f64) -> DbDeg {
    let v = DbDeg::from_complex(c64(re, im));
    DbDeg::new(v.db, -v.deg)
}

pub fn parse_elmer(names: &str, data: &str, tolerance: f64) -> Result<ParsedNetwork, ConvertError> {
    let columns = column_names(names);
    let count = columns
        .iter()
        .filter(|c| c.starts_with(MATRIX_PREFIX))
        .count();
    let nports = ((count as f64 / 2.0).sqrt()).floor() as usize;
    if nports == 0 {
        return Err(ConvertError::format(format!(
            "no '{}' matrix columns in names file",
            MATRIX_PREFIX
        )));
    }
    info!("Number of ports: {}", nports);

    let omega_col = column_index(&columns, OMEGA_COLUMN)?;
    let re_col = column_index(&columns, RE_S11_COLUMN)?;
    let im_col = column_index(&columns, IM_S11_COLUMN)?;
    let block = nports * nports;
    if re_col + block != im_col {
        return Err(ConvertError::format(format!(
            "imaginary block starts at column {} but {} ports need it at {}",
            im_col,
            nports,
            re_col + block
        )));
    }
    let width = (omega_col + 1).max(im_col + block);

    let scale = Scale::Giga;
    let mut net = ParsedNetwork::new(nports, scale, tolerance);
    for (idx, line) in data.lines().enumerate() {
        let lineno = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < width {
            return Err(ConvertError::format(format!(
                "line {}: {} columns, names file needs {}",
                lineno,
                fields.len(),
                width
            )));
        }
        let row = fields
            .iter()
            .map(|f| parse_number(f, "value", lineno))
            .collect::<Result<Vec<f64>, ConvertError>>()?;

        let freq = scale.scale(row[omega_col] / (2.0 * PI));
        let sample = net.sample_at(freq);
        for m in 0..nports {
            for n in 0..nports {
                let offset = m * nports + n;
                sample.set((m, n), elmer_db_deg(row[re_col + offset], row[im_col + offset]));
            }
        }
    }
    Ok(net)
}
