//! Writing generated units to disk

use anyhow::{Context, Result};
use shapegen_codegen::OutputUnit;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What happened to one output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    /// Left in place because `noClobber` is set
    Skipped,
}

/// Writes output units under a root directory and records each outcome
pub struct FileManifest {
    root: PathBuf,
    no_clobber: bool,
    entries: Vec<(PathBuf, WriteOutcome)>,
}

impl FileManifest {
    pub fn new(root: impl Into<PathBuf>, no_clobber: bool) -> Self {
        Self {
            root: root.into(),
            no_clobber,
            entries: Vec::new(),
        }
    }

    /// Write one file, creating parent directories as needed
    ///
    /// An existing file always produces a warning; with `no_clobber` it is
    /// kept unchanged.
    pub fn write(&mut self, relative: &Path, contents: &str) -> Result<WriteOutcome> {
        let path = self.root.join(relative);
        let exists = path.exists();

        if exists && self.no_clobber {
            warn!(path = %path.display(), "Keeping existing file (noClobber)");
            self.entries.push((path, WriteOutcome::Skipped));
            return Ok(WriteOutcome::Skipped);
        }
        if exists {
            warn!(path = %path.display(), "Overwriting existing file");
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write file: {:?}", path))?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote file");

        let outcome = if exists {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        };
        self.entries.push((path, outcome));
        Ok(outcome)
    }

    /// Write every unit in order, stopping at the first I/O failure
    pub fn write_units(&mut self, units: &[OutputUnit]) -> Result<()> {
        for unit in units {
            self.write(&unit.path, &unit.contents)?;
        }
        Ok(())
    }

    pub fn entries(&self) -> &[(PathBuf, WriteOutcome)] {
        &self.entries
    }

    pub fn count(&self, outcome: WriteOutcome) -> usize {
        self.entries.iter().filter(|(_, o)| *o == outcome).count()
    }
}
