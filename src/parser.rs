use crate::discovery::{DiscoveredFile, SolverFormat};
use crate::error::ConvertError;
use crate::network::ParsedNetwork;
use std::fs;
use std::path::Path;

pub mod elmer;
pub mod palace;

pub use self::elmer::{parse_elmer, read_elmer};
pub use self::palace::{parse_palace, read_palace};

/// Parses a discovered result file with the parser matching its solver
pub fn read_result(file: &DiscoveredFile, tolerance: f64) -> Result<ParsedNetwork, ConvertError> {
    match file.format {
        SolverFormat::Palace => read_palace(&file.path, tolerance),
        SolverFormat::Elmer => read_elmer(&file.path, tolerance),
    }
}

pub(crate) fn read_text(path: &Path) -> Result<String, ConvertError> {
    fs::read_to_string(path).map_err(|err| ConvertError::io(path, err))
}

pub(crate) fn parse_number(token: &str, what: &str, line: usize) -> Result<f64, ConvertError> {
    token.parse::<f64>().map_err(|_| {
        ConvertError::format(format!(
            "line {}: {} '{}' is not a number",
            line, what, token
        ))
    })
}
