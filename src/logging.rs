use log::LevelFilter;
use std::io::Write;

/// Setting this to a truthy value turns on debug output.
pub const DEBUG_ENV_VAR: &str = "MULTIPROF_DEBUG";

/// Initialize `env_logger`.
///
/// `RUST_LOG` is honoured with `warn` as the default; a truthy
/// `MULTIPROF_DEBUG` raises everything to `debug`.
pub fn init() {
	let mut builder =
		env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

	if is_env_truthy(DEBUG_ENV_VAR) {
		builder.filter_level(LevelFilter::Debug);
	}

	builder
		.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
		.init();
}

/// Check if an environment variable is set to a truthy value.
pub fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}
