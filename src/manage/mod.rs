//! Management operations behind the `multiprof` subcommands.
//!
//! This module handles:
//! - Appending rules and detecting shadowing
//! - Creating wrapper links
//! - Generating bash completions for suffixed wrappers

pub mod completions;
pub mod wrappers;

pub use completions::{generate_completions, rewrite_completion_spec, suffixed_wrappers};
pub use wrappers::{WrapperOutcome, create_wrapper, path_contains_dir};

use crate::config::types::{Config, Rule};
use crate::rules::find_shadowing_rule;

/// Append a rule to `config`.
///
/// Returns the existing rule that already covers `pattern`, if there is one.
/// The rule is appended either way; order decides priority.
pub fn add_rule(config: &mut Config, pattern: &str, home: &str) -> Option<Rule> {
	let shadowed_by = find_shadowing_rule(&config.rules, pattern).cloned();
	config.rules.push(Rule::new(pattern, home));
	shadowed_by
}
