//! Configuration loading and persistence for multiprof.
//!
//! This module handles:
//! - The rule set data model
//! - TOML config file parsing and validation
//! - Default template creation and saving

pub mod parser;
pub mod store;
pub mod types;

pub use parser::{parse_config_file, parse_config_str, render_config};
pub use store::{
	config_path, ensure_config, load_config, load_config_from, save_config, save_config_to,
	wrapper_dir,
};
pub use types::{Config, Rule, Settings};
