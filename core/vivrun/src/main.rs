//! vivrun: launches a Vivado behavioral simulation against a project.
//!
//! One run is a fixed sequence:
//!
//! 1. Verify the project file exists.
//! 2. Detect whether the project is already open (lock file, process scan).
//! 3. Generate the matching Tcl control script.
//! 4. Invoke Vivado and block until it exits.
//! 5. Sweep stray `vivado*` files from the cleanup directory, if configured.
//!
//! Every failure is fatal: log it and exit non-zero. A failed Vivado run
//! additionally dumps the captured output streams to stderr.

mod logging;

use clap::Parser;
use std::path::PathBuf;
use tracing::error;
use vivrun_core::{cleanup, config, invoke, liveness, script, LaunchConfig, LaunchError};

#[derive(Parser)]
#[command(name = "vivrun")]
#[command(about = "Runs a Vivado behavioral simulation against a project")]
#[command(version)]
struct Cli {
    /// TOML file with launch settings; command-line flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing the Vivado project
    #[arg(long, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Project name (the project file is <NAME>.xpr)
    #[arg(long, value_name = "NAME")]
    project_name: Option<String>,

    /// Vivado executable, a name on PATH or a full path
    #[arg(long, value_name = "PATH")]
    vivado: Option<String>,

    /// File name of the generated Tcl script, relative to the project dir
    #[arg(long, value_name = "FILE")]
    tcl_script: Option<String>,

    /// Directory to sweep vivado* artifacts from after the run
    #[arg(long, value_name = "DIR")]
    cleanup_dir: Option<PathBuf>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Invalid launch configuration");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&config) {
        error!(error = %err, "vivrun failed");
        if let LaunchError::ToolFailed { stdout, stderr, .. } = &err {
            if !stdout.is_empty() {
                eprintln!("--- vivado stdout ---\n{stdout}");
            }
            if !stderr.is_empty() {
                eprintln!("--- vivado stderr ---\n{stderr}");
            }
        }
        std::process::exit(1);
    }
}

fn run(config: &LaunchConfig) -> Result<(), LaunchError> {
    let project_file = config.project_file();
    if !project_file.exists() {
        return Err(LaunchError::ProjectNotFound(project_file));
    }

    let already_open = liveness::project_is_open(config);
    let tcl_path = config.tcl_script_path();
    script::write_control_script(&tcl_path, already_open, &project_file)?;
    invoke::run_tool(&config.vivado_path, already_open, &tcl_path)?;

    if let Some(dir) = &config.cleanup_dir {
        cleanup::sweep_artifacts(dir);
    }
    Ok(())
}

/// Merges the config file (if any) with command-line overrides.
fn resolve_config(cli: &Cli) -> Result<LaunchConfig, LaunchError> {
    let file = match &cli.config {
        Some(path) => Some(LaunchConfig::from_file(path)?),
        None => None,
    };

    let project_dir = cli
        .project_dir
        .clone()
        .or_else(|| file.as_ref().map(|c| c.project_dir.clone()))
        .ok_or(LaunchError::ConfigMissing("project_dir"))?;
    let project_name = cli
        .project_name
        .clone()
        .or_else(|| file.as_ref().map(|c| c.project_name.clone()))
        .ok_or(LaunchError::ConfigMissing("project_name"))?;
    let vivado_path = cli
        .vivado
        .clone()
        .or_else(|| file.as_ref().map(|c| c.vivado_path.clone()))
        .unwrap_or_else(|| config::DEFAULT_VIVADO.to_string());
    let tcl_script = cli
        .tcl_script
        .clone()
        .or_else(|| file.as_ref().map(|c| c.tcl_script.clone()))
        .unwrap_or_else(|| config::DEFAULT_TCL_SCRIPT.to_string());
    let cleanup_dir = cli
        .cleanup_dir
        .clone()
        .or_else(|| file.as_ref().and_then(|c| c.cleanup_dir.clone()));

    Ok(LaunchConfig {
        project_dir,
        project_name,
        vivado_path,
        tcl_script,
        cleanup_dir,
    })
}
