//! Computes the environment a wrapped command runs with.
//!
//! Nothing here touches the process environment. The new `HOME` is applied
//! only to the replacing command, and the safe `PATH` is only used to search
//! for the target.

use crate::config::types::Rule;
use crate::error::{MultiprofError, Result};
use crate::expand::expand_path;
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Environment changes derived from a matched rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvRewrite {
	/// Expanded home directory of the matched rule.
	pub new_home: String,

	/// `PATH` without the wrapper directory.
	pub safe_path: OsString,
}

/// Compute the new `HOME` and the safe search `PATH`.
pub fn rewrite_environment(
	rule: &Rule,
	path: Option<&OsStr>,
	wrapper_dir: &Path,
) -> Result<EnvRewrite> {
	let new_home = expand_path(&rule.home);
	let safe_path = safe_path(path.unwrap_or_default(), wrapper_dir)?;

	Ok(EnvRewrite {
		new_home,
		safe_path,
	})
}

/// Remove every entry naming `wrapper_dir` from a `PATH` value.
///
/// Entries are compared as paths, so `/wrap/` counts as `/wrap` while
/// `/wrapper` does not. Order and empty entries are preserved.
pub fn safe_path(path: &OsStr, wrapper_dir: &Path) -> Result<OsString> {
	if path.is_empty() {
		return Ok(OsString::new());
	}

	let kept: Vec<_> = std::env::split_paths(path)
		.filter(|entry| entry.as_path() != wrapper_dir)
		.collect();

	std::env::join_paths(kept).map_err(|source| MultiprofError::PathJoin { source })
}
