use crate::error::{MultiprofError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Derive the real command name from a wrapper name.
///
/// The suffix is only removed when the name ends with it; otherwise the name
/// passes through unchanged. An empty suffix always leaves the name as is.
pub fn target_command_name<'a>(invoked_name: &'a str, suffix: &str) -> &'a str {
	invoked_name.strip_suffix(suffix).unwrap_or(invoked_name)
}

/// Locate `command` using only the directories in `safe_path`.
///
/// The process `PATH` is neither read nor modified, so the wrapper directory
/// can never be found here.
pub fn resolve_target(command: &str, safe_path: &OsStr, cwd: &Path) -> Result<PathBuf> {
	log::debug!(
		"Searching for '{}' in safe PATH: {}",
		command,
		safe_path.to_string_lossy()
	);

	which::which_in(command, Some(safe_path), cwd).map_err(|source| {
		MultiprofError::CommandNotFound {
			command: command.to_string(),
			source,
		}
	})
}
