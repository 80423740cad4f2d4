//! snpcombine prelude.
//!
//! The types and entry points most callers need, importable as a group.
//!
//! ```
//! use snpcombine::prelude::*;
//!
//! let cfg = Config::builder().write_dc(false).build();
//! assert!(!cfg.write_dc());
//! ```

#[doc(no_inline)]
pub use crate::config::{Config, ConfigBuilder};

#[doc(no_inline)]
pub use crate::error::ConvertError;

#[doc(no_inline)]
pub use crate::discovery::{discover, DiscoveredFile, SolverFormat};

#[doc(no_inline)]
pub use crate::metadata::{resolve_metadata, PortMetadata};

#[doc(no_inline)]
pub use crate::network::{
    DbDeg, FrequencySample, NetworkBuilder, NetworkDocument, ParsedNetwork, Point, PortVal,
};

#[doc(no_inline)]
pub use crate::deembed::{deembed, flat_strip_inductance, port_inductances, PortInductance};
#[doc(no_inline)]
pub use crate::extrapolate::{extrapolate_to_dc, DcOutcome};
#[doc(no_inline)]
pub use crate::touchstone::{assemble, render, write_touchstone};

#[doc(no_inline)]
pub use crate::pipeline::run;
#[doc(no_inline)]
pub use crate::report::{FileReport, RunReport};

#[doc(no_inline)]
pub use crate::scale::Scale;
