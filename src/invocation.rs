use std::ffi::OsStr;
use std::path::Path;

/// How the binary was started, decided once from `argv[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
	/// Started under its own name: run the management CLI.
	Manage,

	/// Started through a wrapper link named `invoked_name`.
	Wrapper { invoked_name: String },
}

impl Invocation {
	/// Compare the base name of `argv0` with the base name of the running
	/// executable. Any other name means a wrapper link was used.
	pub fn detect(argv0: Option<&OsStr>, own_exe: &Path) -> Self {
		let Some(invoked_name) = argv0.and_then(base_name) else {
			return Invocation::Manage;
		};

		match own_exe.file_name() {
			Some(own_name) if own_name.to_string_lossy() == invoked_name => Invocation::Manage,
			_ => Invocation::Wrapper { invoked_name },
		}
	}

	/// Detect the invocation of the current process.
	pub fn current() -> std::io::Result<Self> {
		let own_exe = std::env::current_exe()?;
		let own_exe = std::fs::canonicalize(&own_exe).unwrap_or(own_exe);
		let argv0 = std::env::args_os().next();
		Ok(Self::detect(argv0.as_deref(), &own_exe))
	}
}

fn base_name(path: &OsStr) -> Option<String> {
	Path::new(path)
		.file_name()
		.map(|name| name.to_string_lossy().to_string())
}
