//! Synthetic zero-frequency sample by polar cubic extrapolation.

use crate::config::Config;
use crate::consts::{DC_COMMENT, DC_SUFFIX};
use crate::error::ConvertError;
use crate::math::{unwrap_phase, CubicSpline};
use crate::network::{DbDeg, FrequencySample, NetworkBuilder, NetworkDocument};
use log::{debug, info};
use ndarray::prelude::*;
use num::complex::Complex64;

/// Result of a DC extrapolation attempt
#[derive(Clone, Debug)]
pub enum DcOutcome {
    Extrapolated(NetworkDocument),
    /// Not applicable to this document, with the reason
    Skipped(String),
}

/// Reason the document does not qualify for DC extrapolation, if any
pub fn dc_skip_reason(doc: &NetworkDocument, cfg: &Config) -> Option<String> {
    let Some(start_hz) = doc.start_hz() else {
        return Some("no frequency samples".to_string());
    };
    if doc.npts() <= cfg.dc_min_samples() {
        return Some(format!(
            "not enough frequency points ({}, need more than {})",
            doc.npts(),
            cfg.dc_min_samples()
        ));
    }
    if start_hz > cfg.dc_max_start_hz() {
        return Some(format!(
            "no data at low frequency (starts at {} Hz, limit {} Hz)",
            start_hz,
            cfg.dc_max_start_hz()
        ));
    }
    if start_hz == 0.0 {
        return Some("document already has a DC sample".to_string());
    }
    None
}

/// Value of one S-parameter at zero frequency.
///
/// Linear magnitude and unwrapped phase are fitted separately.
fn extrapolate_param(freqs: &[f64], values: &[DbDeg]) -> Result<DbDeg, ConvertError> {
    let mag: Vec<f64> = values.iter().map(|v| v.mag()).collect();
    let phase: Vec<f64> = values.iter().map(|v| v.deg.to_radians()).collect();
    let phase = unwrap_phase(&phase);

    let mag0 = CubicSpline::new(freqs, &mag)?.eval(0.0);
    let phase0 = CubicSpline::new(freqs, &phase)?.eval(0.0);
    if !mag0.is_finite() || !phase0.is_finite() {
        return Err(ConvertError::Numeric(
            "DC extrapolation produced a non-finite value".to_string(),
        ));
    }
    Ok(DbDeg::from_complex(Complex64::from_polar(mag0, phase0)))
}

/// Zero-frequency sample of `doc`, one spline pair per S-parameter
pub fn dc_sample(doc: &NetworkDocument) -> Result<FrequencySample, ConvertError> {
    let n = doc.nports();
    let freqs = doc.freqs();
    let mut s = Array2::from_elem((n, n), DbDeg::default());
    for i in 0..n {
        for j in 0..n {
            let values: Vec<DbDeg> = doc.samples().iter().map(|x| x.at((i, j))).collect();
            s[(i, j)] = extrapolate_param(&freqs, &values)?;
        }
    }
    Ok(FrequencySample::new(0.0, s))
}

/// Derives `<name>_dc` with one extra sample at frequency 0 prepended
pub fn extrapolate_to_dc(doc: &NetworkDocument, cfg: &Config) -> Result<DcOutcome, ConvertError> {
    if let Some(reason) = dc_skip_reason(doc, cfg) {
        info!("{}: skipping DC extrapolation, {}", doc.name(), reason);
        return Ok(DcOutcome::Skipped(reason));
    }

    let dc = dc_sample(doc)?;
    debug!("{}: S11 at DC {:?}", doc.name(), dc.at((0, 0)));
    let mut samples = Vec::with_capacity(doc.npts() + 1);
    samples.push(dc);
    samples.extend(doc.samples().iter().cloned());

    let extrapolated = NetworkBuilder::derive_from(doc)
        .name(&format!("{}{}", doc.name(), DC_SUFFIX))
        .comment(DC_COMMENT)
        .samples(doc.nports(), samples)
        .build()?;
    Ok(DcOutcome::Extrapolated(extrapolated))
}
