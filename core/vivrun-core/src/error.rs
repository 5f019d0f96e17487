//! Error types for vivrun operations.

use std::path::PathBuf;

/// All errors that can occur while launching a simulation.
///
/// Policy is no local recovery: every variant is fatal to the run. The
/// binary logs a diagnostic and terminates with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Project file not found: {0}")]
    ProjectNotFound(PathBuf),

    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Missing required setting: {0} (pass it on the command line or in the config file)")]
    ConfigMissing(&'static str),

    // ─────────────────────────────────────────────────────────────────────
    // Environment Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Vivado executable not found: {0}")]
    ExecutableNotFound(String),

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Failed to write Tcl script: {path}: {source}")]
    ScriptWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────────────
    // Execution Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Vivado exited with status {code:?}")]
    ToolFailed {
        /// Exit code if the process exited normally (None if killed by signal).
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

/// Convenience type alias for Results using LaunchError.
pub type Result<T> = std::result::Result<T, LaunchError>;
