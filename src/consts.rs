//! Fixed names and thresholds shared across the pipeline.

/// Result file written by Palace, one per simulation directory.
pub const PALACE_RESULT_FILE: &str = "port-S.csv";

/// Column description file written by Elmer next to `scalar_results`.
pub const ELMER_RESULT_FILE: &str = "scalar_results.names";

/// Default working directory name used by Elmer runs.
pub const ELMER_WORKDIR_NAME: &str = "mesh";

/// Optional sidecar describing port impedance and geometry.
pub const PORT_DESCRIPTOR_FILE: &str = "port_information.json";

/// Reference impedance assumed when no descriptor lists one.
pub const DEFAULT_Z0: f64 = 50.0;

/// Length unit (meters per unit) assumed when the descriptor omits `unit`.
pub const DEFAULT_LENGTH_UNIT: f64 = 1e-6;

/// A document needs strictly more samples than this to be extrapolated.
pub const DC_MIN_SAMPLES: usize = 20;

/// Lowest frequency (Hz) must not exceed this for DC extrapolation.
pub const DC_MAX_START_HZ: f64 = 1e9;

/// Suffix of the DC extrapolated document.
pub const DC_SUFFIX: &str = "_dc";

/// Suffix of the de-embedded document.
pub const DEEMBED_SUFFIX: &str = "_deembedded";

/// Comment line written into DC extrapolated documents.
pub const DC_COMMENT: &str = "DC point added by extrapolation";

/// Comment line written into de-embedded documents.
pub const DEEMBED_COMMENT: &str = "De-embedded by adding negative series L at ports";

/// Magnitudes below this are written at this floor to keep dB values finite.
pub const MIN_MAGNITUDE: f64 = 1e-20;
