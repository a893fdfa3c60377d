use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use colored::Colorize;

use super::store_orchestrator;

pub fn execute(store_path: &Path) -> anyhow::Result<()> {
	let orchestrator = store_orchestrator(store_path);

	let summary = orchestrator.staged_summary();
	println!(
		"staged snapshot: {} session / {} local entries",
		summary.session_count, summary.local_count
	);

	match orchestrator.pending_request() {
		Some(request) => {
			let now = SystemTime::now()
				.duration_since(UNIX_EPOCH)
				.unwrap_or_default()
				.as_millis() as u64;
			let age_secs = now.saturating_sub(request.timestamp) / 1000;
			let staleness = if request.is_expired(now) {
				" (stale, will be discarded)".yellow().to_string()
			} else {
				String::new()
			};
			println!(
				"pending sync request from {age_secs}s ago: session={} local={}{staleness}",
				request.include_session, request.include_local
			);
		}
		None => println!("no pending sync request"),
	}

	Ok(())
}
