use crate::network::{DbDeg, PortVal};
use crate::scale::Scale;
use ndarray::prelude::*;

/// Partially populated S-matrix collected while parsing one frequency
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedSample {
    pub freq: f64,
    pub s: Array2<Option<DbDeg>>,
}

impl ParsedSample {
    pub fn new(freq: f64, nports: usize) -> ParsedSample {
        ParsedSample {
            freq,
            s: Array2::from_elem((nports, nports), None),
        }
    }

    pub fn set(&mut self, port: PortVal, val: DbDeg) {
        self.s[port] = Some(val);
    }

    pub fn get(&self, port: PortVal) -> Option<DbDeg> {
        self.s[port]
    }

    /// Number of populated port pairs
    pub fn filled(&self) -> usize {
        self.s.iter().filter(|v| v.is_some()).count()
    }
}

/// Output of a solver parser: port count, unit and samples in file order
#[derive(Clone, Debug)]
pub struct ParsedNetwork {
    nports: usize,
    unit: Scale,
    tolerance: f64,
    samples: Vec<ParsedSample>,
}

impl ParsedNetwork {
    pub fn new(nports: usize, unit: Scale, tolerance: f64) -> ParsedNetwork {
        ParsedNetwork {
            nports,
            unit,
            tolerance: tolerance.abs(),
            samples: vec![],
        }
    }

    pub fn nports(&self) -> usize {
        self.nports
    }

    pub fn unit(&self) -> Scale {
        self.unit
    }

    pub fn samples(&self) -> &[ParsedSample] {
        &self.samples
    }

    pub fn npts(&self) -> usize {
        self.samples.len()
    }

    /// Port pairs not populated by any block, summed over all samples
    pub fn missing(&self) -> usize {
        let full = self.nports * self.nports;
        self.samples.iter().map(|s| full - s.filled()).sum()
    }

    pub fn into_samples(self) -> Vec<ParsedSample> {
        self.samples
    }

    /// Sample matching `freq` within the merge tolerance, created if absent
    pub fn sample_at(&mut self, freq: f64) -> &mut ParsedSample {
        let tol = self.tolerance;
        let idx = match self
            .samples
            .iter()
            .position(|s| (s.freq - freq).abs() <= tol)
        {
            Some(idx) => idx,
            None => {
                self.samples.push(ParsedSample::new(freq, self.nports));
                self.samples.len() - 1
            }
        };
        &mut self.samples[idx]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn matching_frequency_merges() {
        let mut net = ParsedNetwork::new(2, Scale::Giga, 0.0);
        net.sample_at(1.0).set((0, 0), DbDeg::new(-10.0, 5.0));
        net.sample_at(2.0).set((0, 0), DbDeg::new(-11.0, 6.0));
        net.sample_at(1.0).set((1, 0), DbDeg::new(-1.0, -90.0));

        assert_eq!(net.npts(), 2);
        let first = &net.samples()[0];
        assert_eq!(first.filled(), 2);
        assert_eq!(first.get((1, 0)), Some(DbDeg::new(-1.0, -90.0)));
        assert_eq!(first.get((0, 1)), None);
        assert_eq!(net.missing(), 2 + 3);
    }

    #[test]
    fn tolerance_controls_matching() {
        let mut exact = ParsedNetwork::new(1, Scale::Giga, 0.0);
        exact.sample_at(1.0);
        exact.sample_at(1.0 + 1e-12);
        assert_eq!(exact.npts(), 2);

        let mut loose = ParsedNetwork::new(1, Scale::Giga, 1e-9);
        loose.sample_at(1.0);
        loose.sample_at(1.0 + 1e-12);
        assert_eq!(loose.npts(), 1);
    }
}
