use crate::config::types::Config;
use crate::error::{MultiprofError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content =
		std::fs::read_to_string(path).map_err(|source| MultiprofError::ConfigReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
///
/// Only the TOML shape is checked here. Rules with blank fields are kept;
/// they never match a working directory, so the rest of the rule set stays
/// usable. `Config::validate` is for callers about to write the file.
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	toml::from_str(content).map_err(|source| MultiprofError::ConfigParseError {
		path: path.to_path_buf(),
		source,
	})
}

/// Render a config back to TOML.
pub fn render_config(config: &Config) -> Result<String> {
	toml::to_string(config).map_err(|source| MultiprofError::ConfigSerializeError { source })
}
