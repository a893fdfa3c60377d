use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::channel::default_store_path;

#[derive(Parser, Debug)]
#[command(name = "storesync")]
#[command(about = "Copy session/local storage between pages through a staging store")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Staging store file shared by all pages
	#[arg(long, global = true, value_name = "FILE")]
	pub store: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

impl Cli {
	pub fn store_path(&self) -> PathBuf {
		self.store.clone().unwrap_or_else(default_store_path)
	}
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Snapshot a page's storage and stage it for another page
	#[command(alias = "cap")]
	Capture {
		/// Page directory holding session.json and local.json
		page: PathBuf,

		/// Destination URL to open after capture
		#[arg(long, value_name = "URL")]
		dest: Option<String>,

		/// Leave session storage out of the snapshot
		#[arg(long)]
		skip_session: bool,

		/// Leave local storage out of the snapshot
		#[arg(long)]
		skip_local: bool,
	},

	/// Run one page load: detect a pending sync and apply it
	Apply {
		/// Destination page directory
		page: PathBuf,

		/// Skip the post-apply reload pass
		#[arg(long)]
		no_reload: bool,
	},

	/// Show what is currently staged
	Status,

	/// Show a page's own storage counts
	Inspect {
		/// Page directory to count
		page: PathBuf,
	},

	/// Remove staged data and any pending sync request
	Cleanup,

	/// Poll the staging store and report new staged data
	Watch {
		/// Poll interval in milliseconds
		#[arg(long, default_value = "1000")]
		interval_ms: u64,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_capture_command() {
		let cli = Cli::try_parse_from(["storesync", "capture", "/tmp/page", "--dest", "example.com"]).unwrap();
		match cli.command {
			Commands::Capture { page, dest, skip_session, skip_local } => {
				assert_eq!(page, PathBuf::from("/tmp/page"));
				assert_eq!(dest.as_deref(), Some("example.com"));
				assert!(!skip_session);
				assert!(!skip_local);
			}
			_ => panic!("expected Capture command"),
		}
	}

	#[test]
	fn parse_apply_with_no_reload() {
		let cli = Cli::try_parse_from(["storesync", "apply", "/tmp/dest", "--no-reload"]).unwrap();
		match cli.command {
			Commands::Apply { page, no_reload } => {
				assert_eq!(page, PathBuf::from("/tmp/dest"));
				assert!(no_reload);
			}
			_ => panic!("expected Apply command"),
		}
	}

	#[test]
	fn store_flag_overrides_default_path() {
		let cli = Cli::try_parse_from(["storesync", "--store", "/tmp/staging.json", "status"]).unwrap();
		assert_eq!(cli.store_path(), PathBuf::from("/tmp/staging.json"));
	}

	#[test]
	fn verbose_flag_counts() {
		let cli = Cli::try_parse_from(["storesync", "-vv", "status"]).unwrap();
		assert_eq!(cli.verbose, 2);
	}

	#[test]
	fn watch_interval_defaults() {
		let cli = Cli::try_parse_from(["storesync", "watch"]).unwrap();
		match cli.command {
			Commands::Watch { interval_ms } => assert_eq!(interval_ms, 1000),
			_ => panic!("expected Watch command"),
		}
	}

	#[test]
	fn unknown_command_fails() {
		assert!(Cli::try_parse_from(["storesync", "replicate"]).is_err());
	}
}
