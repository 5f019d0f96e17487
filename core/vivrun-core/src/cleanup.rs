//! Post-run sweep of stray Vivado output files.
//!
//! Vivado scatters `vivado*.log` / `vivado*.jou` files into the directory it
//! was launched from. The sweep runs from inside the cleanup directory; a
//! drop guard restores the previous working directory no matter how the
//! delete loop ends. Individual delete failures are skipped, never fatal.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File-name prefix of the artifacts Vivado leaves behind.
const ARTIFACT_PREFIX: &str = "vivado";

/// Restores the working directory it was entered from on drop.
struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    fn enter(dir: &Path) -> std::io::Result<Self> {
        let original = env::current_dir()?;
        env::set_current_dir(dir)?;
        Ok(CwdGuard { original })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.original) {
            warn!(
                path = %self.original.display(),
                error = %err,
                "Failed to restore working directory after cleanup"
            );
        }
    }
}

/// Deletes `vivado*` files in `dir`, returning how many were removed.
///
/// A missing or non-directory path is a no-op.
pub fn sweep_artifacts(dir: &Path) -> usize {
    if !dir.is_dir() {
        return 0;
    }

    let _guard = match CwdGuard::enter(dir) {
        Ok(guard) => guard,
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "Cannot enter cleanup directory");
            return 0;
        }
    };

    let entries = match fs::read_dir(".") {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "Cannot list cleanup directory");
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !name.starts_with(ARTIFACT_PREFIX) {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(err) => debug!(file = name, error = %err, "Skipping artifact"),
        }
    }

    if removed > 0 {
        info!(removed, dir = %dir.display(), "Swept Vivado artifacts");
    }
    removed
}
