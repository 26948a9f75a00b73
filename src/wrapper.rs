//! Wrapper execution: pick a rule for the current directory, re-home the
//! environment and hand the process over to the real command.
//!
//! The steps run in a fixed order: rule matcher, environment rewriter,
//! target resolver, then process replacement. Every input is passed in
//! explicitly, so [`prepare`] is deterministic for a given config,
//! directory and [`WrapperEnv`].

use crate::config::types::{Config, Rule};
use crate::environment::rewrite_environment;
use crate::error::{MultiprofError, Result};
use crate::exec::{replace_process, resolve_target, target_command_name};
use crate::rules::find_matching_rule;
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The parts of the process environment the wrapper depends on.
#[derive(Debug, Clone)]
pub struct WrapperEnv {
	/// The original `PATH`, if set.
	pub path: Option<OsString>,

	/// Directory holding the wrapper links, excluded from the target search.
	pub wrapper_dir: PathBuf,
}

impl WrapperEnv {
	/// Capture `PATH` and the wrapper directory of the current user.
	pub fn capture() -> Result<Self> {
		Ok(WrapperEnv {
			path: std::env::var_os("PATH"),
			wrapper_dir: crate::config::wrapper_dir()?,
		})
	}
}

/// Everything decided for one wrapper run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
	/// Base name the wrapper was invoked as.
	pub invoked_name: String,

	/// Directory that was matched against the rules.
	pub cwd: String,

	/// First rule covering `cwd`.
	pub matched_rule: Rule,

	/// Expanded home of the matched rule.
	pub resolved_home: String,

	/// `PATH` used to search for the target.
	pub safe_path: OsString,

	/// Absolute path of the real command.
	pub target_path: PathBuf,
}

/// Resolve everything needed to run the wrapped command.
pub fn prepare(
	invoked_name: &str,
	cwd: &Path,
	config: &Config,
	env: &WrapperEnv,
) -> Result<ExecutionContext> {
	let cwd_str = cwd.to_string_lossy().to_string();

	let outcome = find_matching_rule(&config.rules, &cwd_str);
	let matched = outcome
		.matched
		.ok_or_else(|| MultiprofError::NoMatchingRule {
			cwd: cwd_str.clone(),
		})?;

	let rewrite = rewrite_environment(matched.rule, env.path.as_deref(), &env.wrapper_dir)?;
	log::debug!("Set HOME to: '{}'", rewrite.new_home);

	let target_name = target_command_name(invoked_name, &config.settings.suffix);
	let target_path = resolve_target(target_name, &rewrite.safe_path, cwd)?;

	Ok(ExecutionContext {
		invoked_name: invoked_name.to_string(),
		cwd: cwd_str,
		matched_rule: matched.rule.clone(),
		resolved_home: rewrite.new_home,
		safe_path: rewrite.safe_path,
		target_path,
	})
}

/// Run the wrapper for the current process. Returns only on failure.
pub fn run(invoked_name: &str, argv: &[OsString], config: &Config) -> Result<Infallible> {
	let cwd =
		logical_current_dir().map_err(|source| MultiprofError::CurrentDirUnavailable { source })?;
	let env = WrapperEnv::capture()?;

	let ctx = prepare(invoked_name, &cwd, config, &env)?;
	replace_process(&ctx.target_path, argv, &ctx.resolved_home)
}

/// The command that would create a rule covering `cwd`.
pub fn add_rule_suggestion(cwd: &str) -> String {
	format!("multiprof add-rule --pattern \"{cwd}/**\" --home \"/path/to/home\"")
}

/// The working directory as the shell sees it.
///
/// `$PWD` is preferred when it names the same directory as `.`, so symlinked
/// directories match rules written against the path the user typed.
pub fn logical_current_dir() -> std::io::Result<PathBuf> {
	let physical = std::env::current_dir()?;

	#[cfg(unix)]
	{
		use std::os::unix::fs::MetadataExt;

		if let Some(pwd) = std::env::var_os("PWD").map(PathBuf::from)
			&& pwd.is_absolute()
			&& let (Ok(logical), Ok(actual)) = (std::fs::metadata(&pwd), std::fs::metadata("."))
			&& logical.dev() == actual.dev()
			&& logical.ino() == actual.ino()
		{
			return Ok(pwd);
		}
	}

	Ok(physical)
}

#[cfg(all(test, unix))]
mod tests {
	use super::*;
	use crate::config::Settings;
	use std::os::unix::fs::PermissionsExt;

	struct Fixture {
		_temp_dir: tempfile::TempDir,
		root: PathBuf,
		wrap_dir: PathBuf,
		bin_dir: PathBuf,
	}

	impl Fixture {
		fn new(tools: &[&str]) -> Self {
			let temp_dir = tempfile::tempdir().unwrap();
			let root = temp_dir.path().canonicalize().unwrap();
			let wrap_dir = root.join("wrap");
			let bin_dir = root.join("bin");
			std::fs::create_dir_all(&wrap_dir).unwrap();
			std::fs::create_dir_all(&bin_dir).unwrap();

			for tool in tools {
				for dir in [&wrap_dir, &bin_dir] {
					let path = dir.join(tool);
					std::fs::write(&path, "#!/bin/sh\n").unwrap();
					std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
						.unwrap();
				}
			}

			Fixture {
				_temp_dir: temp_dir,
				root,
				wrap_dir,
				bin_dir,
			}
		}

		fn env(&self) -> WrapperEnv {
			WrapperEnv {
				path: Some(std::env::join_paths([&self.wrap_dir, &self.bin_dir]).unwrap()),
				wrapper_dir: self.wrap_dir.clone(),
			}
		}
	}

	fn config(suffix: &str, rules: &[(&str, &str)]) -> Config {
		Config {
			settings: Settings {
				suffix: suffix.to_string(),
			},
			rules: rules.iter().map(|(p, h)| Rule::new(*p, *h)).collect(),
		}
	}

	#[test]
	fn test_prepare_full_scenario() {
		let fx = Fixture::new(&["aws"]);
		let work = format!("{}/work/**", fx.root.display());
		let config = config("_w", &[(work.as_str(), "/home/work")]);
		let cwd = fx.root.join("work/proj");

		let ctx = prepare("aws_w", &cwd, &config, &fx.env()).unwrap();

		assert_eq!(ctx.invoked_name, "aws_w");
		assert_eq!(ctx.cwd, cwd.to_string_lossy());
		assert_eq!(ctx.matched_rule.home, "/home/work");
		assert_eq!(ctx.resolved_home, "/home/work");
		assert_eq!(ctx.safe_path, fx.bin_dir.clone().into_os_string());
		assert_eq!(ctx.target_path, fx.bin_dir.join("aws"));
	}

	#[test]
	fn test_prepare_seamless_mode_skips_wrapper_copy() {
		let fx = Fixture::new(&["git"]);
		let pattern = format!("{}/**", fx.root.display());
		let config = config("", &[(pattern.as_str(), "/home/any")]);

		let ctx = prepare("git", &fx.root, &config, &fx.env()).unwrap();
		assert_eq!(ctx.target_path, fx.bin_dir.join("git"));
	}

	#[test]
	fn test_prepare_no_rules() {
		let fx = Fixture::new(&[]);
		let config = config("_w", &[]);
		let cwd = fx.root.join("anywhere");

		match prepare("aws_w", &cwd, &config, &fx.env()).unwrap_err() {
			MultiprofError::NoMatchingRule { cwd: reported } => {
				assert_eq!(reported, cwd.to_string_lossy());
			}
			other => panic!("Expected NoMatchingRule, got {other:?}"),
		}
	}

	#[test]
	fn test_prepare_first_rule_wins() {
		let fx = Fixture::new(&["aws"]);
		let general = format!("{}/a/**", fx.root.display());
		let specific = format!("{}/a/b/**", fx.root.display());
		let config = config(
			"_w",
			&[(general.as_str(), "/h/general"), (specific.as_str(), "/h/specific")],
		);

		let ctx = prepare("aws_w", &fx.root.join("a/b/c"), &config, &fx.env()).unwrap();
		assert_eq!(ctx.resolved_home, "/h/general");
	}

	#[test]
	fn test_prepare_target_only_in_wrapper_dir() {
		let fx = Fixture::new(&[]);
		let only_wrapped = fx.wrap_dir.join("ghost");
		std::fs::write(&only_wrapped, "#!/bin/sh\n").unwrap();
		std::fs::set_permissions(&only_wrapped, std::fs::Permissions::from_mode(0o755)).unwrap();

		let pattern = format!("{}/**", fx.root.display());
		let config = config("", &[(pattern.as_str(), "/h")]);

		match prepare("ghost", &fx.root, &config, &fx.env()).unwrap_err() {
			MultiprofError::CommandNotFound { command, .. } => assert_eq!(command, "ghost"),
			other => panic!("Expected CommandNotFound, got {other:?}"),
		}
	}

	#[test]
	fn test_add_rule_suggestion() {
		assert_eq!(
			add_rule_suggestion("/work/proj"),
			"multiprof add-rule --pattern \"/work/proj/**\" --home \"/path/to/home\""
		);
	}

	#[test]
	fn test_logical_current_dir_is_a_directory() {
		let dir = logical_current_dir().unwrap();
		assert!(dir.is_absolute());
		assert!(dir.is_dir());
	}
}
