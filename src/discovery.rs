//! Depth-first search for solver result files.

use crate::consts::{ELMER_RESULT_FILE, PALACE_RESULT_FILE};
use crate::error::ConvertError;
use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Solver that produced a result file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverFormat {
    /// `port-S.csv`
    Palace,
    /// `scalar_results.names` plus `scalar_results`
    Elmer,
}

impl SolverFormat {
    pub fn from_file_name(name: &str) -> Option<SolverFormat> {
        match name {
            PALACE_RESULT_FILE => Some(SolverFormat::Palace),
            ELMER_RESULT_FILE => Some(SolverFormat::Elmer),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            SolverFormat::Palace => "Palace",
            SolverFormat::Elmer => "Elmer",
        }
    }
}

impl fmt::Display for SolverFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub format: SolverFormat,
}

/// Lazy depth-first walk. Entries of each directory are visited in
/// lexicographic order and a subdirectory is descended into as soon as it is
/// reached, so the sequence is the same on every platform. Symlinked
/// directories are not followed.
pub struct Discovery {
    stack: Vec<std::vec::IntoIter<PathBuf>>,
    skipped: Vec<String>,
}

/// Starts a walk at `root`. Only an unreadable root is an error; unreadable
/// subtrees are logged, remembered in [`Discovery::skipped`] and passed over.
pub fn discover(root: &Path) -> Result<Discovery, ConvertError> {
    let entries = sorted_entries(root).map_err(|err| {
        ConvertError::Traversal(format!("cannot read {}: {}", root.display(), err))
    })?;
    Ok(Discovery {
        stack: vec![entries.into_iter()],
        skipped: vec![],
    })
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<PathBuf>>>()?;
    entries.sort();
    Ok(entries)
}

impl Discovery {
    /// Subtrees that could not be read so far, with the reason
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}

impl Iterator for Discovery {
    type Item = DiscoveredFile;

    fn next(&mut self) -> Option<DiscoveredFile> {
        loop {
            let path = match self.stack.last_mut()?.next() {
                Some(path) => path,
                None => {
                    self.stack.pop();
                    continue;
                }
            };
            let meta = match fs::symlink_metadata(&path) {
                Ok(meta) => meta,
                Err(err) => {
                    warn!("{} [{}]", path.display(), err);
                    self.skipped.push(format!("{}: {}", path.display(), err));
                    continue;
                }
            };
            if meta.is_dir() {
                match sorted_entries(&path) {
                    Ok(entries) => self.stack.push(entries.into_iter()),
                    Err(err) => {
                        warn!("{} [{}], skipping subtree", path.display(), err);
                        self.skipped.push(format!("{}: {}", path.display(), err));
                    }
                }
                continue;
            }
            let format = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(SolverFormat::from_file_name);
            if let Some(format) = format {
                let path = fs::canonicalize(&path).unwrap_or(path);
                debug!("found {} result {}", format, path.display());
                return Some(DiscoveredFile { path, format });
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn finds_both_formats_depth_first() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("b/output")).unwrap();
        fs::create_dir_all(root.join("a/mesh")).unwrap();
        fs::write(root.join("b/output/port-S.csv"), "").unwrap();
        fs::write(root.join("a/mesh/scalar_results.names"), "").unwrap();
        fs::write(root.join("a/mesh/scalar_results"), "").unwrap();
        fs::write(root.join("a/port-S.csv.bak"), "").unwrap();
        fs::write(root.join("z-port-S.csv"), "").unwrap();

        let found: Vec<DiscoveredFile> = discover(root).unwrap().collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].format, SolverFormat::Elmer);
        assert!(found[0].path.ends_with("a/mesh/scalar_results.names"));
        assert_eq!(found[1].format, SolverFormat::Palace);
        assert!(found[1].path.ends_with("b/output/port-S.csv"));
        assert!(found[1].path.is_absolute());
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("x/y")).unwrap();
        let mut walk = discover(root).unwrap();
        assert!(walk.next().is_none());
        assert!(walk.skipped().is_empty());
    }

    #[test]
    fn missing_root_is_traversal_error() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("does-not-exist");
        assert!(matches!(discover(&root), Err(ConvertError::Traversal(_))));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subtree_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a/output")).unwrap();
        fs::create_dir_all(root.join("b/output")).unwrap();
        fs::write(root.join("a/output/port-S.csv"), "").unwrap();
        fs::write(root.join("b/output/port-S.csv"), "").unwrap();
        let locked = root.join("a");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            // permissions are not enforced for this user
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut walk = discover(root).unwrap();
        let found: Vec<DiscoveredFile> = walk.by_ref().collect();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].path.ends_with("b/output/port-S.csv"));
        assert_eq!(walk.skipped().len(), 1);
        assert!(
            walk.skipped()[0].starts_with(&locked.display().to_string()),
            "{:?}",
            walk.skipped()
        );
    }

    #[test]
    fn file_names_map_to_formats() {
        assert_eq!(
            SolverFormat::from_file_name("port-S.csv"),
            Some(SolverFormat::Palace)
        );
        assert_eq!(
            SolverFormat::from_file_name("scalar_results.names"),
            Some(SolverFormat::Elmer)
        );
        assert_eq!(SolverFormat::from_file_name("scalar_results"), None);
    }
}
