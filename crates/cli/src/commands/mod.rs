pub mod apply;
pub mod capture;
pub mod cleanup;
pub mod inspect;
pub mod status;
pub mod watch;

use std::path::Path;

use storesync::{AreaChannel, StagingStore, SyncOrchestrator};

use crate::channel::FileChannel;
use crate::cli::Commands;
use crate::notify::ConsoleNotifier;
use crate::page::Page;

pub async fn dispatch(command: Commands, store_path: &Path) -> anyhow::Result<()> {
	match command {
		Commands::Capture { page, dest, skip_session, skip_local } => {
			capture::execute(&page, dest.as_deref(), skip_session, skip_local, store_path)
		}
		Commands::Apply { page, no_reload } => apply::execute(&page, no_reload, store_path).await,
		Commands::Status => status::execute(store_path),
		Commands::Inspect { page } => inspect::execute(&page),
		Commands::Cleanup => cleanup::execute(store_path),
		Commands::Watch { interval_ms } => watch::execute(store_path, interval_ms).await,
	}
}

/// One orchestrator per simulated page load: file store first, the page's
/// own local area as the degraded fallback, console feedback.
pub fn page_orchestrator(page: &Page, store_path: &Path) -> SyncOrchestrator<ConsoleNotifier> {
	let staging = StagingStore::with_fallback(
		Box::new(FileChannel::new(store_path.to_path_buf())),
		Box::new(AreaChannel::new(page.local.clone())),
	);
	SyncOrchestrator::new(staging, ConsoleNotifier)
}

/// Store-only orchestrator for commands that run without a page.
pub fn store_orchestrator(store_path: &Path) -> SyncOrchestrator<ConsoleNotifier> {
	let staging = StagingStore::new(Box::new(FileChannel::new(store_path.to_path_buf())));
	SyncOrchestrator::new(staging, ConsoleNotifier)
}
