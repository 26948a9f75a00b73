//! `~` and environment-variable expansion for patterns and paths.
//!
//! The result is only ever compared as a string, so no normalization happens:
//! symlinks, `..` and duplicate separators are left as written.

use std::path::Path;

/// Expand a path or pattern against the real home directory and environment.
pub fn expand_path(input: &str) -> String {
	expand_path_with(input, dirs::home_dir().as_deref(), |name| {
		std::env::var(name).ok()
	})
}

/// Expand `input` using an explicit home directory and variable lookup.
///
/// A leading `~` is replaced by `home`, keeping the rest verbatim. After that
/// `$VAR` and `${VAR}` are substituted; variables unknown to `lookup` become
/// the empty string. When `home` is `None` the tilde is left alone.
pub fn expand_path_with<F>(input: &str, home: Option<&Path>, mut lookup: F) -> String
where
	F: FnMut(&str) -> Option<String>,
{
	let tilde_expanded = match (input.strip_prefix('~'), home) {
		(Some(rest), Some(home)) => format!("{}{}", home.to_string_lossy(), rest),
		_ => input.to_string(),
	};

	shellexpand::env_with_context_no_errors(&tilde_expanded, |name| {
		Some(lookup(name).unwrap_or_default())
	})
	.into_owned()
}
