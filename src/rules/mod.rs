//! Rule matching for multiprof.
//!
//! This module handles:
//! - Compiling glob patterns for working directories
//! - Finding the first rule that covers a directory
//! - Detecting rules that would shadow a new one

pub mod glob;
pub mod matcher;

pub use glob::GlobPattern;
pub use matcher::{
	CompiledRule, MatchOutcome, RuleMatch, candidate_forms, find_matching_rule,
	find_shadowing_rule,
};
