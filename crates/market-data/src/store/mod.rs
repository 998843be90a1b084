//! Snapshot files on disk.
//!
//! Each cycle overwrites `commodities.json` and `pairs.json` wholesale. A file
//! is first written next to its target and then renamed over it, so a reader
//! never sees a half-written document.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::SnapshotError;
use crate::models::{CommoditiesDocument, PairsDocument, QuoteSnapshot};

pub const COMMODITIES_FILE: &str = "commodities.json";
pub const PAIRS_FILE: &str = "pairs.json";

/// Paths written by one [`SnapshotWriter::write`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub commodities: PathBuf,
    pub pairs: PathBuf,
}

/// Writes snapshots into an output directory, creating it when missing.
#[derive(Clone, Debug)]
pub struct SnapshotWriter {
    output_dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn paths(&self) -> SnapshotPaths {
        SnapshotPaths {
            commodities: self.output_dir.join(COMMODITIES_FILE),
            pairs: self.output_dir.join(PAIRS_FILE),
        }
    }

    /// Write both documents of a snapshot.
    pub fn write(&self, snapshot: &QuoteSnapshot) -> Result<SnapshotPaths, SnapshotError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| SnapshotError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let paths = self.paths();
        write_json(&paths.commodities, &snapshot.commodities_document())?;
        write_json(&paths.pairs, &snapshot.pairs_document())?;

        info!(
            "Wrote snapshot {} to {}",
            snapshot.generated_at().to_rfc3339(),
            self.output_dir.display()
        );
        Ok(paths)
    }
}

fn write_json<T: Serialize>(path: &Path, document: &T) -> Result<(), SnapshotError> {
    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|source| SnapshotError::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {}", path.display());
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let contents = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

/// Read a `commodities.json` document.
pub fn read_commodities(path: impl AsRef<Path>) -> Result<CommoditiesDocument, SnapshotError> {
    read_json(path.as_ref())
}

/// Read a `pairs.json` document.
pub fn read_pairs(path: impl AsRef<Path>) -> Result<PairsDocument, SnapshotError> {
    read_json(path.as_ref())
}
