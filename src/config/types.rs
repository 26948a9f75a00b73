use serde::{Deserialize, Serialize};

/// Top-level configuration from `~/.config/multiprof/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
	/// Global settings shared by every wrapper.
	#[serde(default)]
	pub settings: Settings,

	/// Rules mapping directory patterns to homes.
	/// First matching rule wins.
	#[serde(default)]
	pub rules: Vec<Rule>,
}

/// Global settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
	/// Trailing marker on wrapper names, stripped to recover the target command.
	/// Empty means wrappers are named exactly like their targets.
	#[serde(default)]
	pub suffix: String,
}

/// A rule selecting a home directory for matching working directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rule {
	/// Glob pattern matched against the current directory.
	/// `~` and `$VAR` are expanded before compiling.
	pub pattern: String,

	/// Directory to use as `$HOME` when the pattern matches.
	pub home: String,
}

impl Rule {
	pub fn new(pattern: impl Into<String>, home: impl Into<String>) -> Self {
		Rule {
			pattern: pattern.into(),
			home: home.into(),
		}
	}

	/// Validate that neither field is blank.
	pub fn validate(&self, index: usize) -> Result<(), crate::error::MultiprofError> {
		for (field, value) in [("pattern", &self.pattern), ("home", &self.home)] {
			if value.trim().is_empty() {
				return Err(crate::error::MultiprofError::EmptyRuleField { index, field });
			}
		}
		Ok(())
	}
}

impl Config {
	/// Validate all rules in this config.
	pub fn validate(&self) -> Result<(), crate::error::MultiprofError> {
		for (i, rule) in self.rules.iter().enumerate() {
			rule.validate(i + 1)?;
		}
		Ok(())
	}
}
