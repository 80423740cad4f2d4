use crate::consts::{DC_MAX_START_HZ, DC_MIN_SAMPLES};
use log::warn;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the frequency merge tolerance
pub const ENV_FREQ_TOLERANCE: &str = "SNPCOMBINE_FREQ_TOLERANCE";

/// Environment variable turning fatal format errors into per-file failures
pub const ENV_CONTINUE_ON_ERROR: &str = "SNPCOMBINE_CONTINUE_ON_ERROR";

/// Settings for one batch run
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    root: PathBuf,
    freq_tolerance: f64,
    dc_min_samples: usize,
    dc_max_start_hz: f64,
    write_dc: bool,
    write_deembedded: bool,
    continue_on_error: bool,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Defaults for `root`, overridden by the `SNPCOMBINE_*` variables
    pub fn from_env(root: &Path) -> Config {
        let mut builder = Config::builder().root(root);
        if let Ok(val) = env::var(ENV_FREQ_TOLERANCE) {
            match val.trim().parse::<f64>() {
                Ok(tol) if tol.is_finite() && tol >= 0.0 => builder = builder.freq_tolerance(tol),
                _ => warn!("ignoring {}='{}', expected a non-negative number", ENV_FREQ_TOLERANCE, val),
            }
        }
        if let Ok(val) = env::var(ENV_CONTINUE_ON_ERROR) {
            builder = builder.continue_on_error(parse_flag(&val));
        }
        builder.build()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn freq_tolerance(&self) -> f64 {
        self.freq_tolerance
    }

    pub fn dc_min_samples(&self) -> usize {
        self.dc_min_samples
    }

    pub fn dc_max_start_hz(&self) -> f64 {
        self.dc_max_start_hz
    }

    pub fn write_dc(&self) -> bool {
        self.write_dc
    }

    pub fn write_deembedded(&self) -> bool {
        self.write_deembedded
    }

    pub fn continue_on_error(&self) -> bool {
        self.continue_on_error
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::default().build()
    }
}

fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Builder design pattern for Config
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    root: PathBuf,
    freq_tolerance: f64,
    dc_min_samples: usize,
    dc_max_start_hz: f64,
    write_dc: bool,
    write_deembedded: bool,
    continue_on_error: bool,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        ConfigBuilder::default()
    }

    /// Directory the discovery walk starts from
    pub fn root(mut self, root: &Path) -> Self {
        self.root = root.to_path_buf();
        self
    }

    /// Largest frequency difference treated as the same sample when merging
    pub fn freq_tolerance(mut self, tol: f64) -> Self {
        self.freq_tolerance = tol.abs();
        self
    }

    pub fn dc_min_samples(mut self, n: usize) -> Self {
        self.dc_min_samples = n;
        self
    }

    pub fn dc_max_start_hz(mut self, f: f64) -> Self {
        self.dc_max_start_hz = f;
        self
    }

    pub fn write_dc(mut self, val: bool) -> Self {
        self.write_dc = val;
        self
    }

    pub fn write_deembedded(mut self, val: bool) -> Self {
        self.write_deembedded = val;
        self
    }

    pub fn continue_on_error(mut self, val: bool) -> Self {
        self.continue_on_error = val;
        self
    }

    pub fn build(self) -> Config {
        Config {
            root: self.root,
            freq_tolerance: self.freq_tolerance,
            dc_min_samples: self.dc_min_samples,
            dc_max_start_hz: self.dc_max_start_hz,
            write_dc: self.write_dc,
            write_deembedded: self.write_deembedded,
            continue_on_error: self.continue_on_error,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        ConfigBuilder {
            root: PathBuf::from("."),
            freq_tolerance: 0.0,
            dc_min_samples: DC_MIN_SAMPLES,
            dc_max_start_hz: DC_MAX_START_HZ,
            write_dc: true,
            write_deembedded: true,
            continue_on_error: false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_pipeline_conventions() {
        let cfg = Config::default();
        assert_eq!(cfg.freq_tolerance(), 0.0);
        assert_eq!(cfg.dc_min_samples(), 20);
        assert_eq!(cfg.dc_max_start_hz(), 1e9);
        assert!(cfg.write_dc());
        assert!(cfg.write_deembedded());
        assert!(!cfg.continue_on_error());
    }

    #[test]
    fn builder_overrides() {
        let cfg = Config::builder()
            .root(Path::new("/tmp/x"))
            .freq_tolerance(-1e-6)
            .write_dc(false)
            .continue_on_error(true)
            .build();
        assert_eq!(cfg.root(), Path::new("/tmp/x"));
        assert_eq!(cfg.freq_tolerance(), 1e-6);
        assert!(!cfg.write_dc());
        assert!(cfg.continue_on_error());
    }

    #[test]
    fn flags() {
        for on in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(on), "{}", on);
        }
        for off in ["0", "false", "", "nope"] {
            assert!(!parse_flag(off), "{}", off);
        }
    }
}
