use simple_error::{bail, SimpleError};
use std::{fmt, str::FromStr};

/// Descriptor of frequency scaling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scale {
    #[default]
    Base,
    Kilo,
    Mega,
    Giga,
    Tera,
}

impl Scale {
    pub fn to_str(&self) -> &str {
        match self {
            Scale::Base => "",
            Scale::Kilo => "k",
            Scale::Mega => "M",
            Scale::Giga => "G",
            Scale::Tera => "T",
        }
    }

    /// Frequency unit as written by the solvers, e.g. `GHz`
    pub fn unit_label(&self) -> String {
        format!("{}Hz", self.to_str())
    }

    /// Frequency unit token of a Touchstone option line, e.g. `GHZ`
    pub fn touchstone_token(&self) -> String {
        self.unit_label().to_uppercase()
    }

    /// Provides multiplier for scale
    /// Scale::Giga = 1e9
    pub fn multiplier(&self) -> f64 {
        match self {
            Scale::Base => 1.0,
            Scale::Kilo => 1e3,
            Scale::Mega => 1e6,
            Scale::Giga => 1e9,
            Scale::Tera => 1e12,
        }
    }

    /// Hz -> scaled value
    pub fn scale(&self, val: f64) -> f64 {
        val / self.multiplier()
    }

    /// Scaled value -> Hz
    pub fn unscale(&self, val: f64) -> f64 {
        val * self.multiplier()
    }
}

impl FromStr for Scale {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Hz" | "hz" | "HZ" => Ok(Scale::Base),
            "kHz" | "khz" | "KHz" | "KHZ" => Ok(Scale::Kilo),
            "MHz" | "mhz" | "MHZ" => Ok(Scale::Mega),
            "GHz" | "ghz" | "GHZ" => Ok(Scale::Giga),
            "THz" | "thz" | "THZ" => Ok(Scale::Tera),
            other => bail!("'{}' is not a frequency unit", other),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unit_label())
    }
}

#[cfg(test)]
mod scale_tests {
    use super::*;

    #[test]
    fn test_parse_scale() {
        let hz = ["Hz", "hz", "HZ"];
        let khz = ["kHz", "khz", "KHz"];
        let mhz = ["MHz", "mhz", "MHZ"];
        let ghz = ["GHz", "ghz", "GHZ", " GHz "];
        let thz = ["THz", "thz"];

        for unit in hz.iter() {
            assert_eq!(Scale::from_str(unit).unwrap(), Scale::Base);
        }
        for unit in khz.iter() {
            assert_eq!(Scale::from_str(unit).unwrap(), Scale::Kilo);
        }
        for unit in mhz.iter() {
            assert_eq!(Scale::from_str(unit).unwrap(), Scale::Mega);
        }
        for unit in ghz.iter() {
            assert_eq!(Scale::from_str(unit).unwrap(), Scale::Giga);
        }
        for unit in thz.iter() {
            assert_eq!(Scale::from_str(unit).unwrap(), Scale::Tera);
        }
    }

    #[test]
    fn test_parse_scale_rejects_non_frequency() {
        for unit in ["", "G", "pF", "deg."].iter() {
            assert!(Scale::from_str(unit).is_err(), "accepted '{}'", unit);
        }
    }

    #[test]
    fn test_touchstone_token() {
        assert_eq!(Scale::Giga.touchstone_token(), "GHZ");
        assert_eq!(Scale::Mega.touchstone_token(), "MHZ");
        assert_eq!(Scale::Base.touchstone_token(), "HZ");
        assert_eq!(Scale::Kilo.to_string(), "kHz");
    }

    #[test]
    fn test_scale_unscale() {
        assert_eq!(Scale::Giga.unscale(0.5), 0.5e9);
        assert_eq!(Scale::Mega.scale(2.0e6), 2.0);
        assert_eq!(Scale::Base.unscale(3.0), 3.0);
    }
}
