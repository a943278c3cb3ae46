use crate::RetrievalSet;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A retrieval file that could not be read or parsed. Its results are
/// simply absent from every page; nothing else is affected.
#[derive(Debug)]
pub struct LoadError {
    pub file: String,
    pub error: anyhow::Error,
}

/// Read every entry of `dir` as one retrieval set, keyed by file name.
///
/// The fold is total: a failing entry lands in the error list and the walk
/// continues, so callers always get everything that did parse. An empty or
/// missing directory yields an empty map.
pub fn load_retrievals<P: AsRef<Path>>(
    dir: P,
) -> (BTreeMap<String, RetrievalSet>, Vec<LoadError>) {
    let dir = dir.as_ref();
    let mut sets = BTreeMap::new();
    let mut errors = Vec::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(LoadError {
                file: dir.display().to_string(),
                error: anyhow::Error::new(e)
                    .context(format!("reading retrievals directory {}", dir.display())),
            });
            return (sets, errors);
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                errors.push(LoadError {
                    file: dir.display().to_string(),
                    error: anyhow::Error::new(e).context("reading directory entry"),
                });
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        match parse_retrieval(&entry.path()) {
            Ok(set) => {
                sets.insert(name, set);
            }
            Err(error) => errors.push(LoadError { file: name, error }),
        }
    }

    (sets, errors)
}

fn parse_retrieval(path: &Path) -> Result<RetrievalSet> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
