//! Removal of parasitic port inductance.
//!
//! Each port with known geometry gets a series inductor of negative value
//! cascaded onto its reference plane. The inductor is described by its ABCD
//! matrix, converted to S-parameters referenced to 50 Ohm and joined to the
//! network with the sub-network connection formula.

use crate::consts::{DEEMBED_COMMENT, DEEMBED_SUFFIX, DEFAULT_Z0};
use crate::error::ConvertError;
use crate::metadata::PortMetadata;
use crate::network::{FrequencySample, NetworkBuilder, NetworkDocument, Point};
use log::{debug, info, warn};
use ndarray::prelude::*;
use num::complex::{c64, Complex64};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Self-inductance (H) of a flat conductor strip.
///
/// `length`, `width` and `thickness` are in units of `unit` meters. The
/// expression is Terman's flat wire formula.
pub fn flat_strip_inductance(length: f64, width: f64, thickness: f64, unit: f64) -> f64 {
    let wt = width + thickness;
    2e-7 * length * unit * ((2.0 * length / wt).ln() + 0.5 + 0.2235 * wt / length)
}

/// Inductance to remove at a zero-based port
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortInductance {
    pub port: usize,
    pub henry: f64,
}

/// Port inductances from descriptor geometry, in ascending port order.
///
/// Ports without a number, length or width, or numbered outside `1..=nports`
/// are left out and reported in the returned warnings. A port listed twice
/// keeps its last entry.
pub fn port_inductances(meta: &PortMetadata, nports: usize) -> (Vec<PortInductance>, Vec<String>) {
    let mut by_port: BTreeMap<usize, f64> = BTreeMap::new();
    let mut warnings = vec![];
    for (idx, entry) in meta.ports().iter().enumerate() {
        let Some(number) = entry.portnumber else {
            warnings.push(format!("port entry {} has no port number, not de-embedded", idx + 1));
            continue;
        };
        let Some((length, width)) = entry.geometry() else {
            warnings.push(format!("port {} lacks length or width, not de-embedded", number));
            continue;
        };
        if number < 1 || number as usize > nports {
            warnings.push(format!(
                "port {} is outside 1..{}, not de-embedded",
                number, nports
            ));
            continue;
        }
        // ports are zero-thickness sheets
        let henry = flat_strip_inductance(length, width, 0.0, meta.unit());
        by_port.insert(number as usize - 1, henry);
    }
    for w in warnings.iter() {
        warn!("{}", w);
    }
    let inductances = by_port
        .into_iter()
        .map(|(port, henry)| PortInductance { port, henry })
        .collect();
    (inductances, warnings)
}

/// Chain matrix of a two-port
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Abcd {
    pub a: Complex64,
    pub b: Complex64,
    pub c: Complex64,
    pub d: Complex64,
}

impl Abcd {
    pub fn series_impedance(z: Complex64) -> Abcd {
        Abcd {
            a: c64(1.0, 0.0),
            b: z,
            c: c64(0.0, 0.0),
            d: c64(1.0, 0.0),
        }
    }

    pub fn determinant(&self) -> Complex64 {
        self.a * self.d - self.b * self.c
    }

    /// S-parameters with both ports referenced to `z0`
    pub fn to_s(&self, z0: f64) -> Result<Point, ConvertError> {
        let den = self.a + self.b / z0 + self.c * z0 + self.d;
        if den.norm() == 0.0 {
            return Err(ConvertError::Numeric(
                "two-port has no S-parameter representation".to_string(),
            ));
        }
        let s11 = (self.a + self.b / z0 - self.c * z0 - self.d) / den;
        let s22 = (-self.a + self.b / z0 - self.c * z0 + self.d) / den;
        let s21 = c64(2.0, 0.0) / den;
        let s12 = c64(2.0, 0.0) * self.determinant() / den;
        Ok(array![[s11, s12], [s21, s22]])
    }
}

/// S-matrix of a series inductor at angular frequency `omega`
pub fn series_inductor(henry: f64, omega: f64, z0: f64) -> Result<Point, ConvertError> {
    Abcd::series_impedance(c64(0.0, omega * henry)).to_s(z0)
}

/// Joins port `p1` of `a` to port `p2` of `b`.
///
/// The result keeps the remaining ports of `a` followed by the remaining
/// ports of `b`, each group in its original order.
pub fn connect(a: &Point, p1: usize, b: &Point, p2: usize) -> Result<Point, ConvertError> {
    let pa = a.nrows();
    let pb = b.nrows();
    if p1 >= pa || p2 >= pb {
        return Err(ConvertError::Numeric(format!(
            "connection ports {} and {} exceed networks of {} and {} ports",
            p1, p2, pa, pb
        )));
    }
    let nports = pa + pb;
    let k = p1;
    let l = p2 + pa;
    let matrix = Array2::from_shape_fn((nports, nports), |(i, j)| {
        if i < pa && j < pa {
            a[(i, j)]
        } else if i >= pa && j >= pa {
            b[(i - pa, j - pa)]
        } else {
            c64(0.0, 0.0)
        }
    });

    let akl = c64(1.0, 0.0) - matrix[(k, l)];
    let alk = c64(1.0, 0.0) - matrix[(l, k)];
    let akk = matrix[(k, k)];
    let all = matrix[(l, l)];
    let denom = akl * alk - akk * all;
    if denom.norm() == 0.0 {
        return Err(ConvertError::Numeric(
            "singular connection between networks".to_string(),
        ));
    }

    let ext: Vec<usize> = (0..nports).filter(|&i| i != k && i != l).collect();
    let out = Array2::from_shape_fn((nports - 2, nports - 2), |(r, c)| {
        let (i, j) = (ext[r], ext[c]);
        let tmp_a = (matrix[(i, l)] * alk + matrix[(i, k)] * all) / denom;
        let tmp_b = (matrix[(i, l)] * akk + matrix[(i, k)] * akl) / denom;
        matrix[(i, j)] + matrix[(k, j)] * tmp_a + matrix[(l, j)] * tmp_b
    });
    Ok(out)
}

/// Reorders ports so that result port `q` is port `perm[q]` of `pt`
pub fn permute_ports(pt: &Point, perm: &[usize]) -> Point {
    Array2::from_shape_fn((perm.len(), perm.len()), |(r, c)| pt[(perm[r], perm[c])])
}

/// Cascades a series inductor onto `port` of `pt`, keeping port numbering
pub fn add_series_inductor(
    pt: &Point,
    port: usize,
    henry: f64,
    omega: f64,
    z0: f64,
) -> Result<Point, ConvertError> {
    let inductor = series_inductor(henry, omega, z0)?;
    // inductor port 0 faces the network, its port 1 becomes result port 0
    let joined = connect(&inductor, 0, pt, port)?;
    let perm: Vec<usize> = (0..pt.nrows())
        .map(|q| match q.cmp(&port) {
            std::cmp::Ordering::Less => q + 1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => q,
        })
        .collect();
    Ok(permute_ports(&joined, &perm))
}

/// Derives `<name>_deembedded` by cascading `-L` at every listed port.
///
/// The inductor is referenced to 50 Ohm whatever impedance the document
/// annotates.
pub fn deembed(
    doc: &NetworkDocument,
    inductances: &[PortInductance],
) -> Result<NetworkDocument, ConvertError> {
    for l in inductances.iter() {
        if l.port >= doc.nports() {
            return Err(ConvertError::Numeric(format!(
                "cannot de-embed port {} of a {}-port network",
                l.port + 1,
                doc.nports()
            )));
        }
        info!(
            "{}: cascading L = {:.2} pH at port {}",
            doc.name(),
            -l.henry * 1e12,
            l.port + 1
        );
    }

    let mut samples = Vec::with_capacity(doc.npts());
    for idx in 0..doc.npts() {
        let omega = 2.0 * PI * doc.freq_hz(idx);
        let mut pt = doc.point(idx);
        for l in inductances.iter() {
            pt = add_series_inductor(&pt, l.port, -l.henry, omega, DEFAULT_Z0)?;
        }
        samples.push(FrequencySample::from_point(doc.sample(idx).freq(), &pt));
    }
    debug!("{}: de-embedded {} samples", doc.name(), samples.len());

    NetworkBuilder::derive_from(doc)
        .name(&format!("{}{}", doc.name(), DEEMBED_SUFFIX))
        .comment(DEEMBED_COMMENT)
        .samples(doc.nports(), samples)
        .build()
}
