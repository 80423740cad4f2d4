//! Optional `port_information.json` sidecar with per-port reference
//! impedance and geometry.

use crate::consts::{DEFAULT_LENGTH_UNIT, DEFAULT_Z0, PORT_DESCRIPTOR_FILE};
use crate::error::ConvertError;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk layout of the descriptor. Every field is optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortDescriptor {
    /// Meters per geometry unit
    pub unit: Option<f64>,
    pub name: Option<String>,
    pub ports: Vec<PortEntry>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortEntry {
    pub portnumber: Option<i64>,
    #[serde(rename = "Z0")]
    pub z0: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
}

impl PortEntry {
    /// Length and width when both are present and usable
    pub fn geometry(&self) -> Option<(f64, f64)> {
        match (self.length, self.width) {
            (Some(l), Some(w)) if l > 0.0 && w > 0.0 => Some((l, w)),
            _ => None,
        }
    }
}

/// Port information resolved for one result file
#[derive(Clone, Debug, PartialEq)]
pub struct PortMetadata {
    descriptor: Option<PathBuf>,
    unit: f64,
    model_name: Option<String>,
    ports: Vec<PortEntry>,
}

impl Default for PortMetadata {
    fn default() -> Self {
        PortMetadata {
            descriptor: None,
            unit: DEFAULT_LENGTH_UNIT,
            model_name: None,
            ports: vec![],
        }
    }
}

impl PortMetadata {
    pub fn from_descriptor(desc: PortDescriptor, path: Option<PathBuf>) -> PortMetadata {
        PortMetadata {
            descriptor: path,
            unit: desc.unit.unwrap_or(DEFAULT_LENGTH_UNIT),
            model_name: desc.name.filter(|n| !n.trim().is_empty()),
            ports: desc.ports,
        }
    }

    /// Descriptor the metadata was read from, if any
    pub fn descriptor(&self) -> Option<&Path> {
        self.descriptor.as_deref()
    }

    pub fn unit(&self) -> f64 {
        self.unit
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }

    pub fn ports(&self) -> &[PortEntry] {
        &self.ports
    }

    /// True if at least one port lists its reference impedance
    pub fn impedance_listed(&self) -> bool {
        self.ports.iter().any(|p| p.z0.is_some())
    }

    /// True if at least one numbered port has length and width
    pub fn has_geometry(&self) -> bool {
        self.ports
            .iter()
            .any(|p| p.portnumber.is_some() && p.geometry().is_some())
    }

    /// Reference impedances for the option line.
    ///
    /// Values are taken in descriptor order, not port-number order. A single
    /// value is returned when all ports agree.
    pub fn z0_list(&self) -> Vec<f64> {
        let values: Vec<f64> = self.ports.iter().filter_map(|p| p.z0).collect();
        match values.first() {
            None => vec![DEFAULT_Z0],
            Some(&first) if values.iter().all(|&z| z == first) => vec![first],
            Some(_) => values,
        }
    }
}

/// Descriptor candidates for a result file: two levels above its directory,
/// then one level above.
pub fn descriptor_candidates(result_path: &Path) -> Vec<PathBuf> {
    let mut out = vec![];
    if let Some(dir) = result_path.parent() {
        if let Some(one_up) = dir.parent() {
            if let Some(two_up) = one_up.parent() {
                out.push(two_up.join(PORT_DESCRIPTOR_FILE));
            }
            out.push(one_up.join(PORT_DESCRIPTOR_FILE));
        }
    }
    out
}

pub fn read_descriptor(path: &Path) -> Result<PortDescriptor, ConvertError> {
    let content = fs::read_to_string(path).map_err(|err| {
        ConvertError::Metadata(format!("cannot read {}: {}", path.display(), err))
    })?;
    let desc: PortDescriptor = serde_json::from_str(&content)?;
    Ok(desc)
}

/// Loads the first descriptor found for `result_path`.
///
/// No descriptor is not an error: every port falls back to 50 Ohm without
/// geometry or model name.
pub fn resolve_metadata(result_path: &Path) -> Result<PortMetadata, ConvertError> {
    let Some(path) = descriptor_candidates(result_path)
        .into_iter()
        .find(|p| p.is_file())
    else {
        info!(
            "no {} for {}, assuming {} Ohm",
            PORT_DESCRIPTOR_FILE,
            result_path.display(),
            DEFAULT_Z0
        );
        return Ok(PortMetadata::default());
    };
    info!("Found port information: {}", path.display());
    let desc = read_descriptor(&path)?;
    let meta = PortMetadata::from_descriptor(desc, Some(path));
    debug!("port impedances {:?}", meta.z0_list());
    Ok(meta)
}
