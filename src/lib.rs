//! Multiprof - run command-line tools with a `HOME` chosen by the current
//! directory.
//!
//! A wrapper link named after a tool (e.g. `aws_w` for `aws`) points at the
//! multiprof binary. When run through such a link, multiprof:
//! - finds the first rule whose glob pattern matches the working directory
//! - sets `HOME` to that rule's home
//! - locates the real tool on `PATH` without the wrapper directory
//! - replaces itself with the real tool
//!
//! # Example
//!
//! ```no_run
//! use multiprof::config::load_config;
//! use multiprof::rules::find_matching_rule;
//!
//! let config = load_config().unwrap();
//! let outcome = find_matching_rule(&config.rules, "/home/me/work/project");
//!
//! if let Some(matched) = outcome.matched {
//!     println!("HOME would be {}", matched.rule.home);
//! }
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod exec;
pub mod expand;
pub mod invocation;
pub mod logging;
pub mod manage;
pub mod rules;
pub mod wrapper;

pub use error::{MultiprofError, Result};
pub use invocation::Invocation;
