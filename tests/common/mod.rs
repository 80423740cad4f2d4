#![allow(dead_code)]
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Fresh directory, removed when the guard drops
pub fn scratch() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

pub fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Deterministic dB/degree value of S[i][j] (one-based) at sample k
pub fn cell(i: usize, j: usize, k: usize) -> (f64, f64) {
    (
        -((10 * i + j) as f64) - 0.25 * k as f64,
        (10 * i + j + k) as f64,
    )
}

/// Palace `port-S.csv` with one block per excited port
pub fn palace_csv(nports: usize, excited: &[usize], freqs: &[f64]) -> String {
    let mut out = String::new();
    for &j in excited.iter() {
        out.push_str("            f (GHz)");
        for i in 1..=nports {
            out.push_str(&format!(
                ",      |S[{i}][{j}]| (dB),    arg(S[{i}][{j}]) (deg.)"
            ));
        }
        out.push('\n');
        for (k, f) in freqs.iter().enumerate() {
            out.push_str(&format!(" {:+.9e}", f));
            for i in 1..=nports {
                let (db, deg) = cell(i, j, k);
                out.push_str(&format!(", {:+.9e}, {:+.9e}", db, deg));
            }
            out.push('\n');
        }
    }
    out
}

/// `n` frequencies in GHz starting at `start`
pub fn grid(n: usize, start: f64, step: f64) -> Vec<f64> {
    (0..n).map(|k| start + step * k as f64).collect()
}

/// Written Touchstone split into comments, option line and numeric rows
pub struct Written {
    pub comments: Vec<String>,
    pub option: String,
    pub rows: Vec<Vec<f64>>,
}

pub fn read_written(path: &Path) -> Written {
    let text = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("cannot read {}: {}", path.display(), err));
    let mut written = Written {
        comments: vec![],
        option: String::new(),
        rows: vec![],
    };
    for line in text.lines() {
        if let Some(c) = line.strip_prefix('!') {
            written.comments.push(c.trim().to_string());
        } else if line.starts_with('#') {
            written.option = line.to_string();
        } else if !line.trim().is_empty() {
            written.rows.push(
                line.split_whitespace()
                    .map(|v| v.parse::<f64>().unwrap())
                    .collect(),
            );
        }
    }
    written
}

/// (dB, deg) of the k-th pair on a data row
pub fn pair(row: &[f64], k: usize) -> (f64, f64) {
    (row[1 + 2 * k], row[2 + 2 * k])
}
