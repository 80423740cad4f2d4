use ndarray::prelude::*;
use num::complex::Complex64;

pub mod builder;
pub mod network;
pub mod parsed;
pub mod sample;

pub use self::builder::NetworkBuilder;
pub use self::network::NetworkDocument;
pub use self::parsed::{ParsedNetwork, ParsedSample};
pub use self::sample::{DbDeg, FrequencySample};

/// Complex S-matrix at a single frequency
pub type Point = Array2<Complex64>;

/// Descriptor of a port pair (row, column), zero-based
pub type PortVal = (usize, usize);

/// Order in which port pairs are written on a Touchstone data line.
///
/// Row-major over the requested matrix, except that a two-port network is
/// written S11 S21 S12 S22, i.e. the lookup for (i, j) is (j, i).
pub fn touchstone_order(nports: usize) -> Vec<PortVal> {
    let mut out = Vec::with_capacity(nports * nports);
    for i in 0..nports {
        for j in 0..nports {
            if nports == 2 {
                out.push((j, i));
            } else {
                out.push((i, j));
            }
        }
    }
    out
}
