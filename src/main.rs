use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::process::ExitCode;

use multiprof::config::{Rule, config_path, ensure_config, load_config, save_config, wrapper_dir};
use multiprof::manage::{WrapperOutcome, add_rule, create_wrapper, generate_completions};
use multiprof::wrapper::{add_rule_suggestion, logical_current_dir};
use multiprof::{Invocation, MultiprofError};

#[derive(Parser)]
#[command(name = "multiprof")]
#[command(
	author,
	version,
	about = "Run command-line tools with a HOME chosen by the current directory"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Create the config file and wrapper directory, then print setup steps
	Init,

	/// Append a rule mapping a directory pattern to a HOME
	AddRule {
		/// Glob pattern matching the directories of this context
		#[arg(long)]
		pattern: String,

		/// Directory to use as $HOME when the pattern matches
		#[arg(long)]
		home: String,
	},

	/// Create a wrapper link for a command
	AddWrapper {
		/// Name of the real command, e.g. `aws`
		command: String,
	},

	/// List the suffix and rules in priority order
	List,

	/// Print bash completions for suffixed wrappers
	GenerateCompletions,
}

fn main() -> ExitCode {
	multiprof::logging::init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let invocation = Invocation::current().context("Cannot determine own executable path")?;

	match invocation {
		Invocation::Manage => run_manager(),
		Invocation::Wrapper { invoked_name } => run_wrapper(&invoked_name),
	}
}

fn run_wrapper(invoked_name: &str) -> Result<ExitCode> {
	let argv: Vec<OsString> = std::env::args_os().collect();

	let config = match load_config() {
		Ok(config) => config,
		Err(e) => {
			log::warn!("Ignoring unusable configuration: {e}");
			Default::default()
		}
	};

	match multiprof::wrapper::run(invoked_name, &argv, &config) {
		Ok(never) => match never {},
		Err(MultiprofError::NoMatchingRule { cwd }) => {
			eprintln!("error: No multiprof rule matched the current directory: {cwd}");
			eprintln!("hint: To add a rule, run: {}", add_rule_suggestion(&cwd));
			Ok(ExitCode::FAILURE)
		}
		Err(e) => Err(e).with_context(|| format!("Failed to run wrapper '{invoked_name}'")),
	}
}

fn run_manager() -> Result<ExitCode> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Init => handle_init(),
		Commands::AddRule { pattern, home } => handle_add_rule(&pattern, &home),
		Commands::AddWrapper { command } => handle_add_wrapper(&command),
		Commands::List => handle_list(),
		Commands::GenerateCompletions => handle_generate_completions(),
	}
}

fn handle_init() -> Result<ExitCode> {
	let config_path = config_path()?;
	ensure_config(&config_path).context("Failed to create config file")?;
	println!("Config file: {}", config_path.display());

	let wrapper_dir = wrapper_dir()?;
	std::fs::create_dir_all(&wrapper_dir)
		.with_context(|| format!("Failed to create {}", wrapper_dir.display()))?;
	println!("Wrapper directory: {}", wrapper_dir.display());

	println!();
	println!("To complete the setup:");
	println!();
	println!("  1. Put the wrapper directory at the front of your PATH so wrappers are");
	println!("     found first. Add this line to your shell profile (~/.bashrc, ~/.zshrc):");
	println!();
	println!("       export PATH=\"{}:$PATH\"", wrapper_dir.display());
	println!();
	println!("  2. For wrappers with a suffix (e.g. '_w'), enable completions by adding");
	println!("     this line at the end of your shell profile:");
	println!();
	println!("       eval \"$(multiprof generate-completions)\"");
	println!();
	println!("  3. Restart your shell or source your profile.");

	Ok(ExitCode::SUCCESS)
}

fn handle_add_rule(pattern: &str, home: &str) -> Result<ExitCode> {
	let mut config = load_config().context("Failed to load configuration")?;

	Rule::new(pattern, home)
		.validate(config.rules.len() + 1)
		.context("Refusing to save an invalid rule")?;

	if let Some(existing) = add_rule(&mut config, pattern, home) {
		eprintln!(
			"warning: New pattern '{}' may be shadowed by existing rule '{}'.",
			pattern, existing.pattern
		);
		eprintln!("note: Rules are checked in the order they appear in the config file.");
	}

	save_config(&config).context("Failed to save configuration")?;

	println!("Added rule: when in '{pattern}', use '{home}' as HOME.");
	Ok(ExitCode::SUCCESS)
}

fn handle_add_wrapper(command: &str) -> Result<ExitCode> {
	let wrapper_dir = wrapper_dir()?;
	let on_path = std::env::var_os("PATH")
		.is_some_and(|path| multiprof::manage::path_contains_dir(&path, &wrapper_dir));
	if !on_path {
		eprintln!(
			"warning: Wrapper directory '{}' is not in your PATH.",
			wrapper_dir.display()
		);
		eprintln!("note: Run `multiprof init` and follow the setup instructions.");
	}

	let config = load_config().context("Failed to load configuration")?;
	let executable = std::env::current_exe().context("Cannot determine own executable path")?;

	match create_wrapper(&wrapper_dir, command, &config.settings.suffix, &executable)? {
		WrapperOutcome::Created(link) => {
			println!("Created wrapper for '{}' at {}", command, link.display());
		}
		WrapperOutcome::AlreadyExists(link) => {
			println!("Wrapper for '{}' already exists at {}", command, link.display());
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_list() -> Result<ExitCode> {
	let config = load_config().context("Failed to load configuration")?;

	println!("Wrapper suffix: \"{}\"", config.settings.suffix);
	println!("Rules (checked in order of priority):");

	if config.rules.is_empty() {
		println!("  No rules defined. Use 'multiprof add-rule' to create one.");
		if let Ok(cwd) = logical_current_dir() {
			println!("  e.g. {}", add_rule_suggestion(&cwd.to_string_lossy()));
		}
		return Ok(ExitCode::SUCCESS);
	}

	for (i, rule) in config.rules.iter().enumerate() {
		println!(
			"  {}: When in '{}', use '{}' as HOME.",
			i + 1,
			rule.pattern,
			rule.home
		);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_generate_completions() -> Result<ExitCode> {
	// Sourced from shell profiles, so a broken config must not break the shell.
	let Ok(config) = load_config() else {
		return Ok(ExitCode::SUCCESS);
	};

	print!("{}", generate_completions(&config, &wrapper_dir()?));
	Ok(ExitCode::SUCCESS)
}
