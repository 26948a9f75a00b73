use crate::error::{MultiprofError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// What `create_wrapper` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapperOutcome {
	Created(PathBuf),
	AlreadyExists(PathBuf),
}

/// Link `<wrapper_dir>/<command><suffix>` to the multiprof executable.
///
/// An entry already at that path is left alone and reported as existing.
pub fn create_wrapper(
	wrapper_dir: &Path,
	command: &str,
	suffix: &str,
	executable: &Path,
) -> Result<WrapperOutcome> {
	let link = wrapper_dir.join(format!("{command}{suffix}"));
	let create_error = |source| MultiprofError::WrapperCreateFailed {
		path: link.clone(),
		source,
	};

	std::fs::create_dir_all(wrapper_dir).map_err(create_error)?;

	if link.symlink_metadata().is_ok() {
		return Ok(WrapperOutcome::AlreadyExists(link));
	}

	link_executable(executable, &link).map_err(create_error)?;
	log::debug!("Linked {} -> {}", link.display(), executable.display());

	Ok(WrapperOutcome::Created(link))
}

#[cfg(unix)]
fn link_executable(executable: &Path, link: &Path) -> std::io::Result<()> {
	std::os::unix::fs::symlink(executable, link)
}

// Symlinks need extra privileges on Windows; a copy behaves the same.
#[cfg(not(unix))]
fn link_executable(executable: &Path, link: &Path) -> std::io::Result<()> {
	std::fs::copy(executable, link).map(|_| ())
}

/// Check whether `dir` is one of the entries of a `PATH` value.
pub fn path_contains_dir(path: &OsStr, dir: &Path) -> bool {
	std::env::split_paths(path).any(|entry| entry == dir)
}
