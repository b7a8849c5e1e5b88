//! Run files on disk (std-only).
//!
//! [`RunFile`] adds `save`/`load` to every [`Optimiser`]. The text itself
//! comes from the core codec; this module only moves it to and from disk.
//!
//! Saving writes `<name>.tmp` next to the target and renames it into place,
//! so a failed save never leaves a half-written run file behind. The temp
//! file is removed when the write or the rename fails.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use swarm_pso_core::codec::LoadReport;
use swarm_pso_core::traits::Optimiser;

use crate::error::RunError;

/// File-level persistence for optimisers
pub trait RunFile {
    /// Write configuration and full history to `path`.
    ///
    /// Does not change the optimiser.
    fn save(&self, path: &Path) -> Result<(), RunError>;

    /// Replace configuration and history with the run stored at `path`.
    ///
    /// On error the optimiser is left as it was.
    fn load(&mut self, path: &Path) -> Result<LoadReport, RunError>;
}

impl<T: Optimiser + ?Sized> RunFile for T {
    fn save(&self, path: &Path) -> Result<(), RunError> {
        let text = self.encode_run();
        atomic_write(path, text.as_bytes()).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to save run");
            e
        })?;
        tracing::info!(
            path = %path.display(),
            snapshots = self.history().len(),
            "saved run"
        );
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<LoadReport, RunError> {
        let text = read_text(path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to load run");
            e
        })?;
        let report = self.restore_run(&text).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "rejected run file");
            RunError::from(e)
        })?;
        tracing::info!(path = %path.display(), %report, "loaded run");
        Ok(report)
    }
}

fn read_text(path: &Path) -> Result<String, RunError> {
    let mut file = File::open(path).map_err(|e| RunError::open(path, e))?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text)
}

fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), RunError> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            RunError::open(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid file name"),
            )
        })?;

    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    let written = File::create(&tmp_path)
        .map_err(|e| RunError::open(&tmp_path, e))
        .and_then(|mut f| {
            f.write_all(bytes)?;
            f.flush()?;
            let _ = f.sync_all();
            Ok(())
        })
        .and_then(|()| fs::rename(&tmp_path, path).map_err(RunError::from));

    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}
