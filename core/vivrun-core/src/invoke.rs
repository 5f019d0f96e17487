//! Synchronous Vivado invocation.
//!
//! Two invocation variants are the entire protocol surface:
//!
//! - attach (project already open): `-mode tcl`, a batch session that feeds
//!   the control script to the running instance.
//! - fresh launch: `-mode gui`, opening the project interactively.
//!
//! The call blocks until Vivado exits. A non-zero exit is fatal and carries
//! the captured output streams; a missing executable is its own error.

use crate::error::{LaunchError, Result};
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Captured output of a successful run.
#[derive(Debug)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Mode flags for the two invocation variants.
pub fn mode_args(already_open: bool) -> [&'static str; 2] {
    if already_open {
        ["-mode", "tcl"]
    } else {
        ["-mode", "gui"]
    }
}

/// Adjusts the executable name for the host platform.
///
/// Vivado on Windows is launched through its `.bat` wrapper.
pub fn platform_executable(vivado_path: &str) -> String {
    if cfg!(windows) && !vivado_path.ends_with(".bat") {
        format!("{vivado_path}.bat")
    } else {
        vivado_path.to_string()
    }
}

/// Runs Vivado to completion against the control script.
pub fn run_tool(vivado_path: &str, already_open: bool, tcl_path: &Path) -> Result<ToolOutput> {
    let executable = platform_executable(vivado_path);
    let mode = mode_args(already_open);
    info!(
        executable = %executable,
        mode = mode[1],
        script = %tcl_path.display(),
        "Invoking Vivado"
    );

    let output = Command::new(&executable)
        .args(mode)
        .arg("-source")
        .arg(tcl_path)
        .output()
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => LaunchError::ExecutableNotFound(executable.clone()),
            _ => LaunchError::Io {
                context: format!("spawning {executable}"),
                source,
            },
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(LaunchError::ToolFailed {
            code: output.status.code(),
            stdout,
            stderr,
        });
    }

    info!("Vivado exited cleanly");
    Ok(ToolOutput { stdout, stderr })
}
