//! Detection of an already-open Vivado project.
//!
//! Two-tier check, ordered from cheapest to most expensive:
//!
//! 1. The lock file Vivado drops under `.Xil/` while a project is open.
//! 2. A scan of running processes: any process whose executable name contains
//!    "vivado" and that either names the project file in its arguments or has
//!    the project directory as its working directory.
//!
//! Processes that cannot be inspected (permission denied, exited mid-scan)
//! simply surface with empty command lines or no cwd and fail to match; a
//! single unreadable process never aborts the scan.

use crate::config::LaunchConfig;
use std::fs;
use std::path::Path;
use sysinfo::{ProcessRefreshKind, System, UpdateKind};
use tracing::{debug, info};

/// Case-insensitive needle matched against process executable names.
const TOOL_NAME: &str = "vivado";

/// Returns true if a live Vivado instance holds the configured project open.
pub fn project_is_open(config: &LaunchConfig) -> bool {
    let lock_file = config.lock_file();
    if lock_file.exists() {
        info!(path = %lock_file.display(), "Lock file present, project is open");
        return true;
    }

    let project_file_name = config.project_file_name();
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessRefreshKind::new()
            .with_cmd(UpdateKind::Always)
            .with_cwd(UpdateKind::Always),
    );

    for (pid, process) in sys.processes() {
        if process_matches(
            process.name(),
            process.cmd(),
            process.cwd(),
            &project_file_name,
            &config.project_dir,
        ) {
            info!(
                pid = pid.as_u32(),
                project = %project_file_name,
                "Found a running Vivado holding the project"
            );
            return true;
        }
    }

    debug!("No open project found");
    false
}

/// Pure per-process match decision, split out so tests need no live Vivado.
fn process_matches(
    name: &str,
    cmd: &[String],
    cwd: Option<&Path>,
    project_file_name: &str,
    project_dir: &Path,
) -> bool {
    if !name.to_lowercase().contains(TOOL_NAME) {
        return false;
    }

    // Project file named anywhere in the argument list (batch/Tcl launches).
    if cmd.iter().any(|arg| arg.contains(project_file_name)) {
        return true;
    }

    // Working directory is the project directory (GUI launches from the
    // project folder).
    match cwd {
        Some(cwd) => same_entity(cwd, project_dir),
        None => false,
    }
}

/// Whether two paths resolve to the same filesystem entity.
///
/// Any canonicalization failure (missing path, permission) counts as "not
/// the same"; a stale process cwd must not abort detection.
fn same_entity(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_TCL_SCRIPT, DEFAULT_VIVADO};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config_for(dir: &Path) -> LaunchConfig {
        LaunchConfig {
            project_dir: dir.to_path_buf(),
            project_name: "fir_filter".to_string(),
            vivado_path: DEFAULT_VIVADO.to_string(),
            tcl_script: DEFAULT_TCL_SCRIPT.to_string(),
            cleanup_dir: None,
        }
    }

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lock_file_short_circuits() {
        let temp = TempDir::new().unwrap();
        let config = config_for(temp.path());
        fs_err::create_dir_all(temp.path().join(".Xil")).unwrap();
        fs_err::write(temp.path().join(".Xil/fir_filter.xpr.lock"), "").unwrap();

        assert!(project_is_open(&config));
    }

    #[test]
    fn test_no_lock_no_process_is_closed() {
        let temp = TempDir::new().unwrap();
        // Unique-enough project name that no real process on the test host
        // can match it through the scan fallback.
        let mut config = config_for(temp.path());
        config.project_name = "vivrun_test_no_such_project_a7f3".to_string();

        assert!(!project_is_open(&config));
    }

    #[test]
    fn test_match_on_command_line() {
        let dir = PathBuf::from("/work/fpga/fir_filter");
        assert!(process_matches(
            "vivado",
            &args(&["vivado", "-mode", "gui", "/work/fpga/fir_filter/fir_filter.xpr"]),
            None,
            "fir_filter.xpr",
            &dir,
        ));
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let dir = PathBuf::from("/work/fpga/fir_filter");
        assert!(process_matches(
            "Vivado.exe",
            &args(&["Vivado.exe", "fir_filter.xpr"]),
            None,
            "fir_filter.xpr",
            &dir,
        ));
    }

    #[test]
    fn test_other_executables_never_match() {
        let dir = PathBuf::from("/work/fpga/fir_filter");
        assert!(!process_matches(
            "emacs",
            &args(&["emacs", "fir_filter.xpr"]),
            Some(&dir),
            "fir_filter.xpr",
            &dir,
        ));
    }

    #[test]
    fn test_match_on_working_directory() {
        let temp = TempDir::new().unwrap();
        assert!(process_matches(
            "vivado",
            &args(&["vivado"]),
            Some(temp.path()),
            "fir_filter.xpr",
            temp.path(),
        ));
    }

    #[test]
    fn test_missing_cwd_path_is_no_match() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("deleted-cwd");
        assert!(!process_matches(
            "vivado",
            &args(&["vivado"]),
            Some(&gone),
            "fir_filter.xpr",
            temp.path(),
        ));
    }

    #[test]
    fn test_unrelated_cwd_is_no_match() {
        let project = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        assert!(!process_matches(
            "vivado",
            &args(&["vivado"]),
            Some(elsewhere.path()),
            "fir_filter.xpr",
            project.path(),
        ));
    }
}
