//! Tracing subscriber setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Initializes logging on stderr. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbose: u8) {
	let default_filter = match verbose {
		0 => "warn",
		1 => "storesync=info,storesync_cli=info",
		_ => "storesync=debug,storesync_cli=debug",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
