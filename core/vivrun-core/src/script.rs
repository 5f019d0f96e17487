//! Tcl control-script generation.
//!
//! The script drives Vivado's scripting interface. Its shape depends on
//! whether the project is already open:
//!
//! - attach mode: the batch Tcl session only launches the simulation in the
//!   already-open instance, then exits.
//! - fresh mode: the script opens the project first and leaves the GUI up
//!   when the simulation finishes.

use crate::error::{LaunchError, Result};
use std::path::Path;
use tracing::info;

/// Writes the control script for one run. Fatal on I/O failure.
pub fn write_control_script(path: &Path, already_open: bool, project_file: &Path) -> Result<()> {
    let content = render(already_open, project_file);
    info!(path = %path.display(), attach = already_open, "Writing Tcl control script");
    fs_err::write(path, content).map_err(|source| LaunchError::ScriptWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn render(already_open: bool, project_file: &Path) -> String {
    if already_open {
        "\
puts \"INFO: driving the simulation in the already-open instance\"
launch_simulation
run all
puts \"INFO: simulation complete, leaving the Tcl session\"
exit
"
        .to_string()
    } else {
        // Braces keep the path a single Tcl word even with spaces in it.
        format!(
            "\
puts \"INFO: opening project {path}\"
open_project {{{path}}}
puts \"INFO: starting behavioral simulation\"
launch_simulation
run all
puts \"INFO: simulation complete, close the GUI window to continue\"
",
            path = project_file.display()
        )
    }
}
