//! Launch configuration and derived project paths.
//!
//! Settings come from an optional TOML file, with every field overridable on
//! the command line. The library itself never consults the environment; the
//! binary hands it a fully merged `LaunchConfig`.

use crate::error::{LaunchError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default executable name; resolved through PATH by the OS.
pub const DEFAULT_VIVADO: &str = "vivado";

/// Default file name for the generated Tcl control script.
pub const DEFAULT_TCL_SCRIPT: &str = "run_sim.tcl";

/// Everything needed to launch one simulation run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LaunchConfig {
    /// Directory containing the Vivado project.
    pub project_dir: PathBuf,

    /// Project name; the project file is `<project_name>.xpr`.
    pub project_name: String,

    /// Vivado executable, either a bare name resolved via PATH or a full path.
    #[serde(default = "default_vivado")]
    pub vivado_path: String,

    /// File name of the generated Tcl script, relative to `project_dir`.
    #[serde(default = "default_tcl_script")]
    pub tcl_script: String,

    /// Directory to sweep `vivado*` artifacts from after the run. None skips cleanup.
    #[serde(default)]
    pub cleanup_dir: Option<PathBuf>,
}

fn default_vivado() -> String {
    DEFAULT_VIVADO.to_string()
}

fn default_tcl_script() -> String {
    DEFAULT_TCL_SCRIPT.to_string()
}

impl LaunchConfig {
    /// Loads a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path).map_err(|e| LaunchError::Io {
            context: format!("reading config {}", path.display()),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| LaunchError::ConfigMalformed {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }

    /// File name of the project file, e.g. `fir_filter.xpr`.
    pub fn project_file_name(&self) -> String {
        format!("{}.xpr", self.project_name)
    }

    /// Full path to the project file.
    pub fn project_file(&self) -> PathBuf {
        self.project_dir.join(self.project_file_name())
    }

    /// Path to the lock file Vivado creates while the project is open.
    pub fn lock_file(&self) -> PathBuf {
        self.project_dir
            .join(".Xil")
            .join(format!("{}.lock", self.project_file_name()))
    }

    /// Path the Tcl control script is generated at.
    pub fn tcl_script_path(&self) -> PathBuf {
        self.project_dir.join(&self.tcl_script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn config() -> LaunchConfig {
        LaunchConfig {
            project_dir: PathBuf::from("/work/fpga/fir_filter"),
            project_name: "fir_filter".to_string(),
            vivado_path: DEFAULT_VIVADO.to_string(),
            tcl_script: DEFAULT_TCL_SCRIPT.to_string(),
            cleanup_dir: None,
        }
    }

    #[test]
    fn test_derived_paths() {
        let config = config();
        assert_eq!(
            config.project_file(),
            PathBuf::from("/work/fpga/fir_filter/fir_filter.xpr")
        );
        assert_eq!(
            config.lock_file(),
            PathBuf::from("/work/fpga/fir_filter/.Xil/fir_filter.xpr.lock")
        );
        assert_eq!(
            config.tcl_script_path(),
            PathBuf::from("/work/fpga/fir_filter/run_sim.tcl")
        );
    }

    #[test]
    fn test_from_file_applies_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vivrun.toml");
        let mut file = fs_err::File::create(&path).unwrap();
        writeln!(file, "project_dir = \"/work/fpga/fir_filter\"").unwrap();
        writeln!(file, "project_name = \"fir_filter\"").unwrap();
        drop(file);

        let loaded = LaunchConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config());
    }

    #[test]
    fn test_from_file_full() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vivrun.toml");
        fs_err::write(
            &path,
            concat!(
                "project_dir = \"/work/fpga/fir_filter\"\n",
                "project_name = \"fir_filter\"\n",
                "vivado_path = \"/opt/Xilinx/Vivado/2024.1/bin/vivado\"\n",
                "tcl_script = \"sim.tcl\"\n",
                "cleanup_dir = \"/work/fpga/fir_filter/scripts\"\n",
            ),
        )
        .unwrap();

        let loaded = LaunchConfig::from_file(&path).unwrap();
        assert_eq!(loaded.vivado_path, "/opt/Xilinx/Vivado/2024.1/bin/vivado");
        assert_eq!(loaded.tcl_script, "sim.tcl");
        assert_eq!(
            loaded.cleanup_dir,
            Some(PathBuf::from("/work/fpga/fir_filter/scripts"))
        );
    }

    #[test]
    fn test_from_file_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vivrun.toml");
        fs_err::write(&path, "project_dir = [not toml").unwrap();

        match LaunchConfig::from_file(&path) {
            Err(LaunchError::ConfigMalformed { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected ConfigMalformed, got {:?}", other),
        }
    }
}
