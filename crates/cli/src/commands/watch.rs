use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use serde_json::Value;
use storesync::StagingStore;
use storesync_protocol::SNAPSHOT_KEY;

use crate::channel::FileChannel;

const MIN_INTERVAL_MS: u64 = 100;

/// Polls the staging store and reports when another page stages new data.
/// The file channel cannot push change events, so this is the polling
/// stand-in for a remote-change listener; it runs until interrupted.
pub async fn execute(store_path: &Path, interval_ms: u64) -> anyhow::Result<()> {
	let store = StagingStore::new(Box::new(FileChannel::new(store_path.to_path_buf())));

	let mut last: Option<Value> = store.lookup(SNAPSHOT_KEY);
	let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(MIN_INTERVAL_MS)));

	println!("watching {} for staged data", store_path.display());
	loop {
		ticker.tick().await;
		let current: Option<Value> = store.lookup(SNAPSHOT_KEY);
		if current.is_some() && current != last {
			println!("{}", "new staged storage data is available".cyan());
		}
		last = current;
	}
}
