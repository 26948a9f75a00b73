use crate::config::parser::{parse_config_file, render_config};
use crate::config::types::Config;
use crate::error::{MultiprofError, Result};
use std::path::{Path, PathBuf};

/// Location of the config file, relative to the user's home.
pub const CONFIG_RELATIVE_PATH: &str = ".config/multiprof/config.toml";

/// Location of the wrapper directory, relative to the user's home.
pub const WRAPPER_DIR_RELATIVE_PATH: &str = ".local/bin/multiprof";

/// Template written when no config exists yet.
pub const DEFAULT_CONFIG: &str = include_str!("default.toml");

fn home_dir() -> Result<PathBuf> {
	dirs::home_dir().ok_or(MultiprofError::HomeDirectoryNotFound)
}

/// Get the path to the user's config file.
pub fn config_path() -> Result<PathBuf> {
	Ok(home_dir()?.join(CONFIG_RELATIVE_PATH))
}

/// Get the directory holding wrapper symlinks.
pub fn wrapper_dir() -> Result<PathBuf> {
	Ok(home_dir()?.join(WRAPPER_DIR_RELATIVE_PATH))
}

/// Write the default template to `path` unless a file is already there.
///
/// Returns `true` when the file was created.
pub fn ensure_config(path: &Path) -> Result<bool> {
	if path.exists() {
		return Ok(false);
	}

	let write_error = |source| MultiprofError::ConfigWriteError {
		path: path.to_path_buf(),
		source,
	};

	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).map_err(write_error)?;
	}
	std::fs::write(path, DEFAULT_CONFIG).map_err(write_error)?;

	log::debug!("Created default config at {}", path.display());
	Ok(true)
}

/// Load the config at `path`, creating it from the template when missing.
pub fn load_config_from(path: &Path) -> Result<Config> {
	ensure_config(path)?;
	parse_config_file(path)
}

/// Load the user's config.
pub fn load_config() -> Result<Config> {
	load_config_from(&config_path()?)
}

/// Persist `config` to `path`.
pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
	let rendered = render_config(config)?;

	let write_error = |source| MultiprofError::ConfigWriteError {
		path: path.to_path_buf(),
		source,
	};

	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).map_err(write_error)?;
	}
	std::fs::write(path, rendered).map_err(write_error)
}

/// Persist `config` to the user's config file.
pub fn save_config(config: &Config) -> Result<()> {
	save_config_to(&config_path()?, config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parser::parse_config_str;
	use crate::config::types::Rule;

	#[test]
	fn test_default_template_parses() {
		let config = parse_config_str(DEFAULT_CONFIG, Path::new("default.toml")).unwrap();
		assert_eq!(config.settings.suffix, "_w");
		assert!(config.rules.is_empty());
	}

	#[test]
	fn test_config_path() {
		let path = config_path().unwrap();
		assert!(path.ends_with("multiprof/config.toml"));
	}

	#[test]
	fn test_wrapper_dir() {
		let dir = wrapper_dir().unwrap();
		assert!(dir.ends_with(".local/bin/multiprof"));
	}

	#[test]
	fn test_load_creates_missing_config() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("nested/dir/config.toml");

		let config = load_config_from(&path).unwrap();

		assert!(path.exists());
		assert_eq!(config.settings.suffix, "_w");
		assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
	}

	#[test]
	fn test_ensure_config_keeps_existing_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("config.toml");
		std::fs::write(&path, "[settings]\nsuffix = \"-x\"\n").unwrap();

		assert!(!ensure_config(&path).unwrap());
		assert_eq!(load_config_from(&path).unwrap().settings.suffix, "-x");
	}

	#[test]
	fn test_save_then_load() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("config.toml");

		let mut config = load_config_from(&path).unwrap();
		config.rules.push(Rule::new("~/work/**", "~/.homes/work"));
		save_config_to(&path, &config).unwrap();

		let loaded = load_config_from(&path).unwrap();
		assert_eq!(loaded, config);
	}

	#[test]
	fn test_load_malformed_config_fails() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("config.toml");
		std::fs::write(&path, "rules = 12").unwrap();

		assert!(matches!(
			load_config_from(&path),
			Err(MultiprofError::ConfigParseError { .. })
		));
	}

	#[test]
	fn test_blank_rule_does_not_discard_other_rules() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("config.toml");
		std::fs::write(
			&path,
			"[[rules]]\npattern = \"/work/**\"\nhome = \"/home/work\"\n\n[[rules]]\npattern = \"/other/**\"\nhome = \"\"\n",
		)
		.unwrap();

		let config = load_config_from(&path).unwrap();
		let outcome = crate::rules::find_matching_rule(&config.rules, "/work/proj");

		let matched = outcome.matched.unwrap();
		assert_eq!(matched.index, 0);
		assert_eq!(matched.rule.home, "/home/work");
	}
}
