use crate::config::types::Config;
use std::path::Path;
use std::process::{Command, Stdio};

const BASH_COMPLETION_SCRIPT: &str = "/usr/share/bash-completion/bash_completion";

/// Loads and prints the completion spec of the command given as `$1`.
const QUERY_SCRIPT: &str = r#"source "$0" ; __load_completion "$1" ; complete -p "$1""#;

/// A wrapper link whose name carries the configured suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixedWrapper {
	/// Name of the link, e.g. `aws_w`.
	pub wrapper: String,

	/// Command it stands for, e.g. `aws`.
	pub command: String,
}

/// Whether `name` can be written into a sourced shell script as a bare word.
fn is_plain_word(name: &str) -> bool {
	name.chars()
		.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+' | '@'))
}

/// List the symlinks in `wrapper_dir` whose names end with `suffix`, sorted.
///
/// Names that are not plain shell words are skipped, since the generated
/// snippet is sourced by the user's shell.
pub fn suffixed_wrappers(wrapper_dir: &Path, suffix: &str) -> std::io::Result<Vec<SuffixedWrapper>> {
	let mut found = Vec::new();

	for entry in std::fs::read_dir(wrapper_dir)? {
		let entry = entry?;
		if !entry.file_type()?.is_symlink() {
			continue;
		}

		let wrapper = entry.file_name().to_string_lossy().to_string();
		if !is_plain_word(&wrapper) {
			log::debug!("Skipping wrapper with unsafe name: {:?}", wrapper);
			continue;
		}
		let command = match wrapper.strip_suffix(suffix) {
			Some(command) if !suffix.is_empty() && !command.is_empty() => command.to_string(),
			_ => continue,
		};
		found.push(SuffixedWrapper { wrapper, command });
	}

	found.sort_by(|a, b| a.wrapper.cmp(&b.wrapper));
	Ok(found)
}

/// Point a `complete -p <command>` line at `wrapper` instead.
///
/// The command is the last word of the spec, so only that word is replaced;
/// options such as `-C aws_completer` are kept intact.
pub fn rewrite_completion_spec(spec: &str, command: &str, wrapper: &str) -> Option<String> {
	let head = spec.trim_end().strip_suffix(command)?;
	if !head.ends_with(' ') {
		return None;
	}
	Some(format!("{head}{wrapper}"))
}

/// Build the bash invocation querying the completion spec of `command`.
///
/// The command name is passed as a positional parameter and never becomes
/// part of the script text.
fn completion_query(command: &str) -> Command {
	let mut cmd = Command::new("bash");
	cmd.arg("-c")
		.arg(QUERY_SCRIPT)
		.arg(BASH_COMPLETION_SCRIPT)
		.arg(command);
	cmd
}

/// Ask bash-completion for the completion spec of `command`.
fn query_completion_spec(command: &str) -> Option<String> {
	let output = completion_query(command)
		.stdin(Stdio::null())
		.stderr(Stdio::null())
		.output()
		.ok()?;

	if !output.status.success() {
		log::debug!("No completion spec for '{}'", command);
		return None;
	}

	let spec = String::from_utf8_lossy(&output.stdout).trim().to_string();
	(!spec.is_empty()).then_some(spec)
}

/// Build a bash snippet registering completions for every suffixed wrapper.
///
/// Empty when the suffix is empty (wrappers then share their command's
/// completion) or the wrapper directory cannot be read.
pub fn generate_completions(config: &Config, wrapper_dir: &Path) -> String {
	let suffix = &config.settings.suffix;
	if suffix.is_empty() {
		return String::new();
	}

	let wrappers = match suffixed_wrappers(wrapper_dir, suffix) {
		Ok(wrappers) => wrappers,
		Err(e) => {
			log::debug!("Cannot read {}: {}", wrapper_dir.display(), e);
			return String::new();
		}
	};

	let mut script = String::from("# Generated by multiprof for suffixed wrappers.\n");
	for SuffixedWrapper { wrapper, command } in &wrappers {
		if let Some(line) = query_completion_spec(command)
			.and_then(|spec| rewrite_completion_spec(&spec, command, wrapper))
		{
			script.push_str(&line);
			script.push('\n');
		}
	}
	script
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Settings;

	#[test]
	fn test_rewrite_completion_spec() {
		assert_eq!(
			rewrite_completion_spec("complete -F _git git", "git", "git_w"),
			Some("complete -F _git git_w".to_string())
		);
	}

	#[test]
	fn test_rewrite_keeps_options_mentioning_command() {
		assert_eq!(
			rewrite_completion_spec("complete -C aws_completer aws\n", "aws", "aws_w"),
			Some("complete -C aws_completer aws_w".to_string())
		);
	}

	#[test]
	fn test_rewrite_rejects_unrelated_spec() {
		assert_eq!(rewrite_completion_spec("complete -F _xgit xgit", "git", "git_w"), None);
		assert_eq!(rewrite_completion_spec("", "git", "git_w"), None);
	}

	#[test]
	fn test_completion_query_keeps_command_out_of_script() {
		let cmd = completion_query("git; touch pwned");
		let args: Vec<_> = cmd.get_args().collect();

		assert_eq!(
			args,
			["-c", QUERY_SCRIPT, BASH_COMPLETION_SCRIPT, "git; touch pwned"]
		);
		assert!(!QUERY_SCRIPT.contains("git"));
	}

	#[test]
	fn test_is_plain_word() {
		assert!(is_plain_word("kubectl_w"));
		assert!(is_plain_word("docker-compose.v2_w"));
		assert!(!is_plain_word("x;rm_w"));
		assert!(!is_plain_word("$(id)_w"));
		assert!(!is_plain_word("a b_w"));
	}

	#[test]
	fn test_generate_with_empty_suffix_is_empty() {
		let temp_dir = tempfile::tempdir().unwrap();
		let config = Config::default();
		assert_eq!(generate_completions(&config, temp_dir.path()), "");
	}

	#[test]
	fn test_generate_with_missing_dir_is_empty() {
		let temp_dir = tempfile::tempdir().unwrap();
		let config = Config {
			settings: Settings {
				suffix: "_w".to_string(),
			},
			rules: vec![],
		};
		assert_eq!(
			generate_completions(&config, &temp_dir.path().join("missing")),
			""
		);
	}

	#[cfg(unix)]
	#[test]
	fn test_suffixed_wrappers_only_lists_suffixed_links() {
		let temp_dir = tempfile::tempdir().unwrap();
		let dir = temp_dir.path();
		let target = dir.join("target");
		std::fs::write(&target, "").unwrap();

		std::os::unix::fs::symlink(&target, dir.join("kubectl_w")).unwrap();
		std::os::unix::fs::symlink(&target, dir.join("aws_w")).unwrap();
		std::os::unix::fs::symlink(&target, dir.join("plain")).unwrap();
		std::os::unix::fs::symlink(&target, dir.join("_w")).unwrap();
		std::os::unix::fs::symlink(&target, dir.join("x;touch y_w")).unwrap();
		std::os::unix::fs::symlink(&target, dir.join("$(id)_w")).unwrap();
		std::fs::write(dir.join("file_w"), "").unwrap();

		let found = suffixed_wrappers(dir, "_w").unwrap();
		assert_eq!(
			found,
			vec![
				SuffixedWrapper {
					wrapper: "aws_w".to_string(),
					command: "aws".to_string(),
				},
				SuffixedWrapper {
					wrapper: "kubectl_w".to_string(),
					command: "kubectl".to_string(),
				},
			]
		);
	}
}
