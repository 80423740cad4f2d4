use crate::network::{FrequencySample, Point};
use crate::scale::Scale;
use std::fmt;

/// Canonical N-port network ready to be written as Touchstone.
///
/// Samples are strictly ascending in frequency and all have `nports` rows
/// and columns; [`NetworkBuilder`](crate::network::NetworkBuilder) checks
/// both before handing one out. S-matrices keep the solver orientation
/// (row = receiving port, column = excited port); the two-port line order
/// is applied only when writing.
#[derive(Clone, PartialEq)]
pub struct NetworkDocument {
    pub(super) name: String,
    pub(super) comments: Vec<String>,
    pub(super) nports: usize,
    pub(super) unit: Scale,
    pub(super) z0: Vec<f64>,
    pub(super) samples: Vec<FrequencySample>,
}

impl NetworkDocument {
    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn comments(&self) -> &Vec<String> {
        &self.comments
    }

    pub fn nports(&self) -> usize {
        self.nports
    }

    pub fn npts(&self) -> usize {
        self.samples.len()
    }

    pub fn unit(&self) -> Scale {
        self.unit
    }

    /// Reference impedances as annotated in the option line
    pub fn z0(&self) -> &Vec<f64> {
        &self.z0
    }

    pub fn samples(&self) -> &[FrequencySample] {
        &self.samples
    }

    pub fn sample(&self, idx: usize) -> &FrequencySample {
        &self.samples[idx]
    }

    /// Frequencies in the document unit
    pub fn freqs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.freq()).collect()
    }

    pub fn freq_hz(&self, idx: usize) -> f64 {
        self.unit.unscale(self.samples[idx].freq())
    }

    /// Lowest frequency in Hz
    pub fn start_hz(&self) -> Option<f64> {
        self.samples.first().map(|s| self.unit.unscale(s.freq()))
    }

    pub fn point(&self, idx: usize) -> Point {
        self.samples[idx].to_point()
    }

    /// Touchstone extension, e.g. `s4p`
    pub fn extension(&self) -> String {
        format!("s{}p", self.nports)
    }

    /// Reference impedance annotation of the option line
    pub fn z0_annotation(&self) -> String {
        self.z0
            .iter()
            .map(|z| z.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl fmt::Display for NetworkDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name: {name}\nnports: {nports}\nnpoints: {npts}\nunit: {unit}\nz0: {z0}",
            name = self.name,
            nports = self.nports,
            npts = self.npts(),
            unit = self.unit,
            z0 = self.z0_annotation(),
        )
    }
}

impl fmt::Debug for NetworkDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkDocument")
            .field("name", &self.name)
            .field("comments", &self.comments)
            .field("nports", &self.nports)
            .field("unit", &self.unit)
            .field("z0", &self.z0)
            .field("npts", &self.npts())
            .finish()
    }
}
