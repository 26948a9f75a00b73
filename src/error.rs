use std::path::PathBuf;

/// Library-level structured errors for multiprof.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum MultiprofError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to write config file: {path}")]
	ConfigWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to serialize configuration")]
	ConfigSerializeError {
		#[source]
		source: toml::ser::Error,
	},

	#[error("Rule {index} has an empty `{field}`")]
	EmptyRuleField { index: usize, field: &'static str },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,

	#[error("Invalid glob pattern `{pattern}`: {reason}")]
	InvalidGlob {
		pattern: String,
		reason: &'static str,
	},

	#[error("Invalid glob pattern `{pattern}`")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to determine the current directory")]
	CurrentDirUnavailable {
		#[source]
		source: std::io::Error,
	},

	#[error("No multiprof rule matched the current directory: {cwd}")]
	NoMatchingRule { cwd: String },

	#[error("Could not find target command '{command}' in the system PATH")]
	CommandNotFound {
		command: String,
		#[source]
		source: which::Error,
	},

	#[error("Failed to rebuild PATH without the wrapper directory")]
	PathJoin {
		#[source]
		source: std::env::JoinPathsError,
	},

	#[error("Failed to execute: {command}")]
	ExecFailed {
		command: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to create wrapper: {path}")]
	WrapperCreateFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using MultiprofError.
pub type Result<T> = std::result::Result<T, MultiprofError>;
