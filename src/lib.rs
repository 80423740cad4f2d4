//! Conversion of Palace and Elmer S-parameter results into Touchstone files,
//! with optional DC extrapolation and port inductance de-embedding.

pub mod config;
pub mod consts;
pub mod deembed;
pub mod discovery;
pub mod error;
pub mod extrapolate;
pub mod math;
pub mod metadata;
pub mod network;
pub mod parser;
pub mod pipeline;
pub mod prelude;
pub mod report;
pub mod scale;
pub mod touchstone;
pub mod util;
