use crate::config::types::Rule;
use crate::error::Result;
use crate::expand::expand_path;
use crate::rules::glob::{GlobPattern, SEPARATOR};

/// A rule whose pattern has been expanded and compiled.
#[derive(Debug)]
pub struct CompiledRule<'a> {
	/// The original rule.
	pub rule: &'a Rule,

	/// The expanded, compiled pattern.
	pub pattern: GlobPattern,
}

impl<'a> CompiledRule<'a> {
	/// Expand and compile a rule's pattern.
	pub fn compile(rule: &'a Rule) -> Result<Self> {
		let pattern = GlobPattern::new(&expand_path(&rule.pattern))?;
		Ok(CompiledRule { rule, pattern })
	}

	/// Check if this rule matches any of the candidate forms of a directory.
	pub fn matches(&self, candidates: &[String]) -> bool {
		candidates.iter().any(|c| self.pattern.matches(c))
	}
}

/// The first rule that matched, with its position in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
	/// Zero-based position of the rule.
	pub index: usize,

	/// The matching rule.
	pub rule: &'a Rule,
}

/// Result of scanning the rule list for a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome<'a> {
	/// The expanded directory that was tested.
	pub tested: String,

	/// The first matching rule, if any.
	pub matched: Option<RuleMatch<'a>>,
}

/// The two forms a directory is matched in: as-is and with one trailing
/// separator, so `dir/**` covers `dir` itself.
pub fn candidate_forms(expanded_dir: &str) -> [String; 2] {
	[
		expanded_dir.to_string(),
		format!("{expanded_dir}{SEPARATOR}"),
	]
}

/// Find the first rule matching `cwd`, in configuration order.
///
/// Rules whose pattern does not compile are skipped.
pub fn find_matching_rule<'a>(rules: &'a [Rule], cwd: &str) -> MatchOutcome<'a> {
	let tested = expand_path(cwd);
	let candidates = candidate_forms(&tested);
	log::debug!(
		"Checking match for '{}' and '{}'",
		candidates[0],
		candidates[1]
	);

	let matched = rules.iter().enumerate().find_map(|(index, rule)| {
		let compiled = match CompiledRule::compile(rule) {
			Ok(compiled) => compiled,
			Err(e) => {
				log::debug!("Skipping rule {}: {}", index + 1, e);
				return None;
			}
		};

		if compiled.matches(&candidates) {
			log::debug!("Matched rule with pattern: '{}'", rule.pattern);
			Some(RuleMatch { index, rule })
		} else {
			None
		}
	});

	MatchOutcome { tested, matched }
}

/// Find an existing rule that already matches `new_pattern` taken literally.
///
/// A rule added after such a rule may never be reached for the directories
/// both cover.
pub fn find_shadowing_rule<'a>(rules: &'a [Rule], new_pattern: &str) -> Option<&'a Rule> {
	let expanded = expand_path(new_pattern);
	rules.iter().find(|rule| {
		CompiledRule::compile(rule)
			.map(|compiled| compiled.pattern.matches(&expanded))
			.unwrap_or(false)
	})
}
