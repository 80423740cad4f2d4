//! Batch driver: discover, parse, resolve port metadata, write the base
//! document, then derive the DC and de-embedded documents.

use crate::config::Config;
use crate::deembed::{deembed, port_inductances};
use crate::discovery::{discover, DiscoveredFile};
use crate::error::ConvertError;
use crate::extrapolate::{extrapolate_to_dc, DcOutcome};
use crate::metadata::{resolve_metadata, PortMetadata};
use crate::network::NetworkDocument;
use crate::parser::read_result;
use crate::report::{FileReport, RunReport};
use crate::touchstone::{assemble, document_name, write_touchstone};
use log::{error, info, warn};
use std::path::Path;

/// Processes every result file under the configured root.
///
/// A fatal error aborts the run unless `continue_on_error` is set, in which
/// case it is recorded on the file's report and the walk goes on.
pub fn run(cfg: &Config) -> Result<RunReport, ConvertError> {
    let mut report = RunReport::default();
    let mut walk = discover(cfg.root())?;
    for file in walk.by_ref() {
        let mut file_report = FileReport::new(&file.path, file.format);
        if let Err(err) = process_file(&file, cfg, &mut file_report) {
            if err.is_fatal() && !cfg.continue_on_error() {
                error!("{}: {}", file.path.display(), err);
                return Err(err);
            }
            warn!("{}: {}", file.path.display(), err);
            file_report.error = Some(err.to_string());
        }
        report.files.push(file_report);
    }
    report.traversal = walk.skipped().to_vec();
    if report.files.is_empty() {
        info!("no solver results under {}", cfg.root().display());
    }
    Ok(report)
}

/// Converts one result file, recording what was written or left out
pub fn process_file(
    file: &DiscoveredFile,
    cfg: &Config,
    report: &mut FileReport,
) -> Result<(), ConvertError> {
    info!("Processing {} result {}", file.format, file.path.display());
    let dir = file.path.parent().ok_or_else(|| {
        ConvertError::format(format!("{} has no parent directory", file.path.display()))
    })?;

    let parsed = read_result(file, cfg.freq_tolerance())?;
    report.nports = Some(parsed.nports());
    let missing = parsed.missing();
    if missing > 0 {
        report.note(format!(
            "{} S-parameter values missing from solver output, written as 0 dB 0 deg",
            missing
        ));
    }

    let meta = match resolve_metadata(&file.path) {
        Ok(meta) => meta,
        Err(err) => {
            warn!("{}, using defaults", err);
            report.warn(format!("{}, using defaults", err));
            PortMetadata::default()
        }
    };
    if let Some(path) = meta.descriptor() {
        report.note(format!("port information from {}", path.display()));
    }
    if !meta.impedance_listed() {
        report.note("port impedance not listed, assuming 50 Ohm");
    }

    let name = document_name(&file.path, &meta)?;
    let base = assemble(parsed, &name, meta.z0_list())?;
    report.outputs.push(write_touchstone(&base, dir)?);
    info!(
        "Created combined S-parameter file for {} ports: {}",
        base.nports(),
        base.name()
    );

    let dc = derive_dc(&base, cfg, dir, report)?;
    derive_deembedded(&base, dc.as_ref(), &meta, cfg, dir, report)
}

fn derive_dc(
    base: &NetworkDocument,
    cfg: &Config,
    dir: &Path,
    report: &mut FileReport,
) -> Result<Option<NetworkDocument>, ConvertError> {
    if !cfg.write_dc() {
        report.skip("DC extrapolation: disabled");
        return Ok(None);
    }
    match extrapolate_to_dc(base, cfg) {
        Ok(DcOutcome::Extrapolated(doc)) => {
            report.outputs.push(write_touchstone(&doc, dir)?);
            Ok(Some(doc))
        }
        Ok(DcOutcome::Skipped(reason)) => {
            report.skip(format!("DC extrapolation: {}", reason));
            Ok(None)
        }
        Err(err) => {
            warn!("{}: DC extrapolation failed: {}", base.name(), err);
            report.warn(format!("DC extrapolation failed: {}", err));
            Ok(None)
        }
    }
}

fn derive_deembedded(
    base: &NetworkDocument,
    dc: Option<&NetworkDocument>,
    meta: &PortMetadata,
    cfg: &Config,
    dir: &Path,
    report: &mut FileReport,
) -> Result<(), ConvertError> {
    if !cfg.write_deembedded() {
        report.skip("de-embedding: disabled");
        return Ok(());
    }
    if !meta.has_geometry() {
        report.skip("de-embedding: no port geometry information");
        return Ok(());
    }
    let (inductances, warnings) = port_inductances(meta, base.nports());
    for w in warnings {
        report.warn(w);
    }
    if inductances.is_empty() {
        report.skip("de-embedding: no port with usable geometry");
        return Ok(());
    }

    for doc in std::iter::once(base).chain(dc) {
        match deembed(doc, &inductances) {
            Ok(out) => report.outputs.push(write_touchstone(&out, dir)?),
            Err(err) => {
                warn!("{}: de-embedding failed: {}", doc.name(), err);
                report.warn(format!("de-embedding {} failed: {}", doc.name(), err));
            }
        }
    }
    Ok(())
}
