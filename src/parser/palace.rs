//! Palace `port-S.csv`.
//!
//! Every excitation block starts with a header naming the frequency unit and
//! the `|S[i][j]| (dB)`, `arg(S[i][j]) (deg.)` columns it carries, followed by
//! one line per frequency. Blocks repeat the same frequency grid, so samples
//! are merged by frequency.

use crate::error::ConvertError;
use crate::network::{DbDeg, ParsedNetwork, PortVal};
use crate::parser::{parse_number, read_text};
use crate::scale::Scale;
use log::{debug, info};
use regex::{Regex, RegexBuilder};
use std::path::Path;
use std::str::FromStr;

pub fn read_palace(path: &Path, tolerance: f64) -> Result<ParsedNetwork, ConvertError> {
    let content = read_text(path)?;
    parse_palace(&content, tolerance)
}

struct Patterns {
    unit: Regex,
    label: Regex,
}

impl Patterns {
    fn new() -> Result<Patterns, ConvertError> {
        Ok(Patterns {
            unit: RegexBuilder::new(r"\(\s*(?<freq>[a-z]?hz)\s*\)")
                .case_insensitive(true)
                .build()?,
            label: Regex::new(r"\|\s*S\[(?<row>\d+)\]\[(?<col>\d+)\]\s*\|")?,
        })
    }

    /// One-based port pairs in column order
    fn labels(&self, line: &str) -> Result<Vec<(usize, usize)>, ConvertError> {
        self.label
            .captures_iter(line)
            .map(|caps| {
                let row = caps["row"].parse::<usize>();
                let col = caps["col"].parse::<usize>();
                match (row, col) {
                    (Ok(row), Ok(col)) if row > 0 && col > 0 => Ok((row, col)),
                    _ => Err(ConvertError::format(format!(
                        "invalid port label '{}'",
                        &caps[0]
                    ))),
                }
            })
            .collect()
    }
}

fn tokens(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_header(line: &str) -> bool {
    match tokens(line).first() {
        Some(first) => first.parse::<f64>().is_err(),
        None => false,
    }
}

pub fn parse_palace(content: &str, tolerance: f64) -> Result<ParsedNetwork, ConvertError> {
    let patterns = Patterns::new()?;

    // The port count spans all excitation blocks, so headers are scanned first.
    let mut nports = 0;
    for line in content.lines().filter(|l| is_header(l)) {
        for (row, col) in patterns.labels(line)? {
            nports = nports.max(row).max(col);
        }
    }
    if nports == 0 {
        return Err(ConvertError::format(
            "no |S[i][j]| columns found in any header",
        ));
    }
    info!("Number of ports: {}", nports);

    let mut net: Option<ParsedNetwork> = None;
    let mut unit: Option<Scale> = None;
    let mut columns: Vec<PortVal> = vec![];

    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        let fields = tokens(line);
        if fields.is_empty() {
            continue;
        }

        if is_header(line) {
            let Some(caps) = patterns.unit.captures(line) else {
                return Err(ConvertError::format(format!(
                    "line {}: header without frequency unit",
                    lineno
                )));
            };
            let block_unit = Scale::from_str(&caps["freq"].to_lowercase())?;
            match unit {
                Some(u) if u != block_unit => {
                    return Err(ConvertError::format(format!(
                        "line {}: frequency unit {} differs from {} of the first block",
                        lineno, block_unit, u
                    )));
                }
                Some(_) => {}
                None => {
                    unit = Some(block_unit);
                    net = Some(ParsedNetwork::new(nports, block_unit, tolerance));
                }
            }
            columns = patterns
                .labels(line)?
                .into_iter()
                .map(|(row, col)| (row - 1, col - 1))
                .collect();
            debug!("line {}: block with {} parameters", lineno, columns.len());
            continue;
        }

        let Some(net) = net.as_mut() else {
            return Err(ConvertError::format(format!(
                "line {}: data before a header with frequency unit",
                lineno
            )));
        };
        let needed = 1 + 2 * columns.len();
        if fields.len() < needed {
            return Err(ConvertError::format(format!(
                "line {}: {} values, block needs {}",
                lineno,
                fields.len(),
                needed
            )));
        }
        let freq = parse_number(fields[0], "frequency", lineno)?;
        let mut values = Vec::with_capacity(columns.len());
        for (k, port) in columns.iter().enumerate() {
            let db = parse_number(fields[1 + 2 * k], "magnitude", lineno)?;
            let deg = parse_number(fields[2 + 2 * k], "phase", lineno)?;
            values.push((*port, DbDeg::new(db, deg)));
        }
        let sample = net.sample_at(freq);
        for (port, val) in values {
            sample.set(port, val);
        }
    }

    net.ok_or_else(|| ConvertError::format("no header with frequency unit"))
}
