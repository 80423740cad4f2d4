use crate::consts::DEFAULT_Z0;
use crate::error::ConvertError;
use crate::network::{FrequencySample, NetworkDocument};
use crate::scale::Scale;

/// Builder design pattern for NetworkDocument
///
/// ## Example
/// ```
/// use ndarray::prelude::*;
/// use snpcombine::network::{DbDeg, FrequencySample, NetworkBuilder};
/// use snpcombine::scale::Scale;
///
/// let s = Array2::from_elem((1, 1), DbDeg::new(-20.0, 45.0));
/// let doc = NetworkBuilder::new()
///     .name("stub")
///     .unit(Scale::Giga)
///     .samples(1, vec![FrequencySample::new(1.0, s)])
///     .build()
///     .unwrap();
/// assert_eq!(doc.npts(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct NetworkBuilder {
    name: String,
    comments: Vec<String>,
    nports: usize,
    unit: Scale,
    z0: Vec<f64>,
    samples: Vec<FrequencySample>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        NetworkBuilder::default()
    }

    /// Start from an existing document, keeping everything but the samples
    pub fn derive_from(doc: &NetworkDocument) -> Self {
        NetworkBuilder {
            name: doc.name.clone(),
            comments: doc.comments.clone(),
            nports: doc.nports,
            unit: doc.unit,
            z0: doc.z0.clone(),
            samples: vec![],
        }
    }

    /// Provide name of NetworkDocument
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Append a comment line
    pub fn comment(mut self, comment: &str) -> Self {
        self.comments.push(comment.to_string());
        self
    }

    /// Provide frequency unit
    pub fn unit(mut self, unit: Scale) -> Self {
        self.unit = unit;
        self
    }

    /// Provide reference impedances
    pub fn z0(mut self, z0: Vec<f64>) -> Self {
        self.z0 = z0;
        self
    }

    /// Provide port count and samples
    pub fn samples(mut self, nports: usize, samples: Vec<FrequencySample>) -> Self {
        self.nports = nports;
        self.samples = samples;
        self
    }

    pub fn build(self) -> Result<NetworkDocument, ConvertError> {
        if self.nports == 0 {
            return Err(ConvertError::format(format!(
                "network '{}' has no ports",
                self.name
            )));
        }
        for sample in self.samples.iter() {
            if !sample.freq().is_finite() {
                return Err(ConvertError::format(format!(
                    "network '{}' has a non-finite frequency",
                    self.name
                )));
            }
            let dim = sample.s().dim();
            if dim != (self.nports, self.nports) {
                return Err(ConvertError::format(format!(
                    "sample at {} is {}x{}, expected {n}x{n}",
                    sample.freq(),
                    dim.0,
                    dim.1,
                    n = self.nports
                )));
            }
        }
        for pair in self.samples.windows(2) {
            if pair[1].freq() <= pair[0].freq() {
                return Err(ConvertError::format(format!(
                    "frequencies not strictly ascending: {} then {}",
                    pair[0].freq(),
                    pair[1].freq()
                )));
            }
        }
        let z0 = if self.z0.is_empty() {
            vec![DEFAULT_Z0]
        } else {
            self.z0
        };

        Ok(NetworkDocument {
            name: self.name,
            comments: self.comments,
            nports: self.nports,
            unit: self.unit,
            z0,
            samples: self.samples,
        })
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        NetworkBuilder {
            name: "".to_string(),
            comments: vec![],
            nports: 0,
            unit: Scale::Giga,
            z0: vec![DEFAULT_Z0],
            samples: vec![],
        }
    }
}
