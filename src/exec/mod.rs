//! Target resolution and process replacement for multiprof.
//!
//! This module handles:
//! - Mapping a wrapper name to the real command name
//! - Finding the real command without finding the wrapper
//! - Replacing the wrapper process with the real command

pub mod resolve;

pub use resolve::{resolve_target, target_command_name};

use crate::error::{MultiprofError, Result};
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

/// Build the command that takes over from the wrapper.
///
/// `argv` is the wrapper's full argument vector; `argv[0]` is kept as it was
/// invoked. The environment is inherited, including the original `PATH`,
/// with only `HOME` overridden.
pub fn build_command(target: &Path, argv: &[OsString], home: &str) -> Command {
	let mut cmd = Command::new(target);
	let mut args = argv.iter();
	let arg0 = args.next();

	#[cfg(unix)]
	{
		use std::os::unix::process::CommandExt;
		if let Some(arg0) = arg0 {
			cmd.arg0(arg0);
		}
	}
	#[cfg(not(unix))]
	let _ = arg0;

	cmd.args(args)
		.env("HOME", home)
		.stdin(Stdio::inherit())
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit());

	cmd
}

/// Replace the current process image with `target`.
///
/// Never returns on success; the error describes why the exec failed.
#[cfg(unix)]
pub fn replace_process(target: &Path, argv: &[OsString], home: &str) -> Result<Infallible> {
	use std::os::unix::process::CommandExt;

	log::debug!("Executing: {}", target.display());
	let source = build_command(target, argv, home).exec();

	Err(MultiprofError::ExecFailed {
		command: target.display().to_string(),
		source,
	})
}

/// Run `target` to completion and exit with its status.
///
/// Stands in for exec where the platform has none.
#[cfg(not(unix))]
pub fn replace_process(target: &Path, argv: &[OsString], home: &str) -> Result<Infallible> {
	log::debug!("Executing: {}", target.display());
	let status = build_command(target, argv, home)
		.status()
		.map_err(|source| MultiprofError::ExecFailed {
			command: target.display().to_string(),
			source,
		})?;

	std::process::exit(status.code().unwrap_or(1));
}
