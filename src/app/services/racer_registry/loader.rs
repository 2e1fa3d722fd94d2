//! Registry snapshot persistence
//!
//! The snapshot is written to a temporary file in the target directory and
//! renamed into place, so a crash never leaves a half-written registry.

use super::{RacerRegistry, RegistryState};
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

impl RacerRegistry {
    /// Load a registry snapshot; a missing file yields an empty registry
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No registry at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open registry {}", path.display()), e))?;
        let state: RegistryState = serde_json::from_reader(BufReader::new(file))?;

        let registry = Self::from_state(state);
        info!(
            "Loaded registry: {} racers, {} races, {} results",
            registry.racer_count(),
            registry.race_count(),
            registry.result_count()
        );
        Ok(registry)
    }

    /// Atomically write the registry snapshot to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if self.in_import() {
            return Err(Error::registry("Cannot save while an import is in progress"));
        }

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(directory).map_err(|e| {
            Error::io(
                format!(
                    "Failed to create registry directory {}",
                    directory.display()
                ),
                e,
            )
        })?;

        let temp = NamedTempFile::new_in(directory)
            .map_err(|e| Error::io("Failed to create temporary registry file", e))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, &self.state)?;
            writer
                .flush()
                .map_err(|e| Error::io("Failed to flush registry snapshot", e))?;
        }

        temp.persist(path)
            .map_err(|e| Error::io(format!("Failed to replace {}", path.display()), e.error))?;

        debug!("Saved registry to {}", path.display());
        Ok(())
    }
}
