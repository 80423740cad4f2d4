//! Assembly of parsed solver data into a [`NetworkDocument`] and Touchstone
//! serialization in `S DB` form.

use crate::consts::ELMER_WORKDIR_NAME;
use crate::error::ConvertError;
use crate::metadata::PortMetadata;
use crate::network::{
    touchstone_order, DbDeg, FrequencySample, NetworkBuilder, NetworkDocument, ParsedNetwork,
};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Output name for a result file: its parent directory name, replaced by the
/// descriptor's model name when the parent is the Elmer working directory.
pub fn document_name(result_path: &Path, meta: &PortMetadata) -> Result<String, ConvertError> {
    let parent = result_path
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            ConvertError::format(format!(
                "cannot derive an output name for {}",
                result_path.display()
            ))
        })?;
    match meta.model_name() {
        Some(model) if parent == ELMER_WORKDIR_NAME => Ok(model.to_string()),
        _ => Ok(parent.to_string()),
    }
}

/// Sorts samples by frequency and fills absent pairs with `0 dB, 0 deg`.
pub fn assemble(
    parsed: ParsedNetwork,
    name: &str,
    z0: Vec<f64>,
) -> Result<NetworkDocument, ConvertError> {
    let nports = parsed.nports();
    let unit = parsed.unit();
    let missing = parsed.missing();
    if missing > 0 {
        info!(
            "{}: {} S-parameter values not in solver output, written as 0 dB 0 deg",
            name, missing
        );
    }

    let mut parsed_samples = parsed.into_samples();
    parsed_samples.sort_by(|a, b| a.freq.total_cmp(&b.freq));
    let samples = parsed_samples
        .into_iter()
        .map(|ps| FrequencySample::new(ps.freq, ps.s.map(|v| v.unwrap_or_default())))
        .collect::<Vec<FrequencySample>>();

    NetworkBuilder::new()
        .name(name)
        .unit(unit)
        .z0(z0)
        .samples(nports, samples)
        .build()
}

/// Number formatting for data lines: shortest round-trip text, exponent form
/// for very small or very large magnitudes.
pub fn format_value(val: f64) -> String {
    let abs = val.abs();
    if val != 0.0 && (abs < 1e-4 || abs >= 1e15) {
        format!("{:e}", val)
    } else {
        format!("{}", val)
    }
}

fn option_line(doc: &NetworkDocument) -> String {
    format!(
        "# {} S DB R {}",
        doc.unit().touchstone_token(),
        doc.z0_annotation()
    )
}

fn data_line(sample: &FrequencySample, order: &[(usize, usize)]) -> String {
    let mut line = format_value(sample.freq());
    for &port in order.iter() {
        let DbDeg { db, deg } = sample.at(port);
        line.push_str(&format!(" {} {}", format_value(db), format_value(deg)));
    }
    line
}

/// Full Touchstone text of a document
pub fn render(doc: &NetworkDocument) -> String {
    let order = touchstone_order(doc.nports());
    let mut out = String::new();
    for comment in doc.comments().iter() {
        out.push_str("! ");
        out.push_str(comment);
        out.push('\n');
    }
    out.push_str(&option_line(doc));
    out.push('\n');
    for sample in doc.samples().iter() {
        out.push_str(&data_line(sample, &order));
        out.push('\n');
    }
    out
}

/// Path `<dir>/<name>.s<N>p`
pub fn output_path(dir: &Path, doc: &NetworkDocument) -> PathBuf {
    dir.join(format!("{}.{}", doc.name(), doc.extension()))
}

/// Writes `doc` into `dir`, replacing an existing file of the same name
pub fn write_touchstone(doc: &NetworkDocument, dir: &Path) -> Result<PathBuf, ConvertError> {
    let path = output_path(dir, doc);
    fs::write(&path, render(doc)).map_err(|err| ConvertError::io(&path, err))?;
    debug!("wrote {} samples to {}", doc.npts(), path.display());
    Ok(path)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metadata::PortDescriptor;
    use crate::scale::Scale;
    use crate::util::comp_line;

    fn meta_named(name: &str) -> PortMetadata {
        let desc = PortDescriptor {
            name: Some(name.to_string()),
            ..Default::default()
        };
        PortMetadata::from_descriptor(desc, None)
    }

    #[test]
    fn name_is_parent_directory() {
        let meta = meta_named("model");
        assert_eq!(
            document_name(Path::new("/sim/filter/output/port-S.csv"), &meta).unwrap(),
            "output"
        );
        assert_eq!(
            document_name(Path::new("/sim/filter/mesh/scalar_results.names"), &meta).unwrap(),
            "model"
        );
        assert_eq!(
            document_name(
                Path::new("/sim/filter/mesh/scalar_results.names"),
                &PortMetadata::default()
            )
            .unwrap(),
            "mesh"
        );
    }

    #[test]
    fn sorts_and_fills() {
        let mut parsed = ParsedNetwork::new(2, Scale::Giga, 0.0);
        parsed.sample_at(2.0).set((0, 0), DbDeg::new(-2.0, 20.0));
        parsed.sample_at(1.0).set((1, 0), DbDeg::new(-1.0, 10.0));
        let doc = assemble(parsed, "dut", vec![50.0]).unwrap();
        assert_eq!(doc.freqs(), vec![1.0, 2.0]);
        assert_eq!(doc.sample(0).at((1, 0)), DbDeg::new(-1.0, 10.0));
        assert_eq!(doc.sample(0).at((0, 0)), DbDeg::new(0.0, 0.0));
        assert_eq!(doc.sample(1).at((1, 1)), DbDeg::new(0.0, 0.0));
    }

    #[test]
    fn two_port_lines_use_s21_before_s12() {
        let mut parsed = ParsedNetwork::new(2, Scale::Giga, 0.0);
        let sample = parsed.sample_at(1.0);
        sample.set((0, 0), DbDeg::new(-11.0, 1.0));
        sample.set((1, 0), DbDeg::new(-21.0, 2.0));
        sample.set((0, 1), DbDeg::new(-12.0, 3.0));
        sample.set((1, 1), DbDeg::new(-22.0, 4.0));
        let doc = assemble(parsed, "dut", vec![50.0]).unwrap();
        comp_line(
            "# GHZ S DB R 50\n1 -11 1 -21 2 -12 3 -22 4\n",
            &render(&doc),
            "two-port order",
        );
    }

    #[test]
    fn three_port_lines_are_row_major() {
        let mut parsed = ParsedNetwork::new(3, Scale::Mega, 0.0);
        let sample = parsed.sample_at(100.0);
        for i in 0..3 {
            for j in 0..3 {
                sample.set((i, j), DbDeg::new(-((10 * (i + 1) + j + 1) as f64), 0.5));
            }
        }
        let doc = assemble(parsed, "dut", vec![50.0, 25.0, 50.0]).unwrap();
        comp_line(
            "# MHZ S DB R 50 25 50\n\
             100 -11 0.5 -12 0.5 -13 0.5 -21 0.5 -22 0.5 -23 0.5 -31 0.5 -32 0.5 -33 0.5\n",
            &render(&doc),
            "three-port order",
        );
    }

    #[test]
    fn comments_precede_option_line() {
        let mut parsed = ParsedNetwork::new(1, Scale::Giga, 0.0);
        parsed.sample_at(1.0).set((0, 0), DbDeg::new(-3.0, 0.0));
        let doc = assemble(parsed, "dut", vec![50.0]).unwrap();
        let doc = NetworkBuilder::derive_from(&doc)
            .comment("first")
            .samples(1, doc.samples().to_vec())
            .build()
            .unwrap();
        assert!(render(&doc).starts_with("! first\n# GHZ S DB R 50\n"));
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-20.5), "-20.5");
        assert_eq!(format_value(1.5e-7), "1.5e-7");
        assert_eq!(format_value(2e15), "2e15");
        assert_eq!(format_value(-400.0), "-400");
    }

    #[test]
    fn writes_into_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        let mut parsed = ParsedNetwork::new(1, Scale::Giga, 0.0);
        parsed.sample_at(1.0).set((0, 0), DbDeg::new(-3.0, 45.0));
        let doc = assemble(parsed, "stub", vec![50.0]).unwrap();
        let path = write_touchstone(&doc, dir).unwrap();
        assert_eq!(path, dir.join("stub.s1p"));
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "# GHZ S DB R 50\n1 -3 45\n");
    }
}
