use clap::Parser;
use storesync_cli::{cli::Cli, commands, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let store_path = cli.store_path();
	if let Err(err) = commands::dispatch(cli.command, &store_path).await {
		error!(target = "storesync", error = %err, "command failed");
		std::process::exit(1);
	}
}
