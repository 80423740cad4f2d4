//! Per-file processing report returned by the pipeline.

use crate::discovery::SolverFormat;
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of processing one discovered result file
#[derive(Clone, Debug, PartialEq)]
pub struct FileReport {
    pub source: PathBuf,
    pub format: SolverFormat,
    pub nports: Option<usize>,
    /// Written Touchstone files, base document first
    pub outputs: Vec<PathBuf>,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
    /// Derived documents not produced, with the reason
    pub skipped: Vec<String>,
    /// Set when processing stopped early
    pub error: Option<String>,
}

impl FileReport {
    pub fn new(source: &Path, format: SolverFormat) -> FileReport {
        FileReport {
            source: source.to_path_buf(),
            format,
            nports: None,
            outputs: vec![],
            notes: vec![],
            warnings: vec![],
            skipped: vec![],
            error: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn note(&mut self, msg: impl Into<String>) {
        self.notes.push(msg.into());
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn skip(&mut self, msg: impl Into<String>) {
        self.skipped.push(msg.into());
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.source.display(), self.format)?;
        if let Some(n) = self.nports {
            write!(f, ", {} ports", n)?;
        }
        writeln!(f, ")")?;
        for out in self.outputs.iter() {
            writeln!(f, "  wrote   {}", out.display())?;
        }
        for note in self.notes.iter() {
            writeln!(f, "  note    {}", note)?;
        }
        for skip in self.skipped.iter() {
            writeln!(f, "  skipped {}", skip)?;
        }
        for warning in self.warnings.iter() {
            writeln!(f, "  warning {}", warning)?;
        }
        if let Some(err) = &self.error {
            writeln!(f, "  error   {}", err)?;
        }
        Ok(())
    }
}

/// Reports of a whole run, in discovery order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    /// Subtrees the discovery walk could not read
    pub traversal: Vec<String>,
}

impl RunReport {
    pub fn outputs(&self) -> Vec<&Path> {
        self.files
            .iter()
            .flat_map(|f| f.outputs.iter().map(|p| p.as_path()))
            .collect()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| !f.is_ok()).count()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.files.is_empty() {
            writeln!(f, "no solver results found")?;
        }
        for file in self.files.iter() {
            write!(f, "{}", file)?;
        }
        for t in self.traversal.iter() {
            writeln!(f, "unreadable: {}", t)?;
        }
        write!(
            f,
            "{} result files, {} touchstone files written, {} failed",
            self.files.len(),
            self.outputs().len(),
            self.failed()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_lists_outputs_and_problems() {
        let mut file = FileReport::new(Path::new("/sim/a/port-S.csv"), SolverFormat::Palace);
        file.nports = Some(2);
        file.outputs.push(PathBuf::from("/sim/a/a.s2p"));
        file.skip("DC extrapolation: not enough frequency points");
        file.warn("port 3 lacks length or width");
        let text = file.to_string();
        assert!(text.starts_with("/sim/a/port-S.csv (Palace, 2 ports)\n"));
        assert!(text.contains("  wrote   /sim/a/a.s2p\n"));
        assert!(text.contains("  skipped DC extrapolation"));
        assert!(text.contains("  warning port 3"));

        let run = RunReport {
            files: vec![file],
            traversal: vec![],
        };
        assert!(run
            .to_string()
            .ends_with("1 result files, 1 touchstone files written, 0 failed"));
    }

    #[test]
    fn empty_run() {
        let run = RunReport::default();
        assert!(run.to_string().starts_with("no solver results found"));
        assert_eq!(run.failed(), 0);
    }
}
