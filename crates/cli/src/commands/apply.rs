use std::path::Path;
use std::time::Duration;

use anyhow::bail;
use colored::Colorize;
use storesync::DetectOutcome;
use tracing::{debug, info};

use super::page_orchestrator;
use crate::page::Page;

/// Runs one page load against the destination page, applying any pending
/// sync. A successful apply is followed by the scheduled reload, modeled as
/// a second page load that observes and clears the re-entry guard.
pub async fn execute(page_dir: &Path, no_reload: bool, store_path: &Path) -> anyhow::Result<()> {
	info!(target = "storesync", page = %page_dir.display(), "page load");

	let page = Page::open(page_dir);
	let mut session = page.session.clone();
	let mut local = page.local.clone();

	let orchestrator = page_orchestrator(&page, store_path);
	match orchestrator.detect_and_apply(&mut session, &mut local) {
		DetectOutcome::Applied { report, reload } => {
			debug!(
				target = "storesync",
				session = report.session_count,
				local = report.local_count,
				"apply finished"
			);
			if no_reload {
				println!("{}", "reload skipped; guard stays set for the next load".yellow());
				return Ok(());
			}

			tokio::time::sleep(Duration::from_millis(reload.delay_ms)).await;

			// The reloaded page constructs its own orchestrator.
			let reloaded = page_orchestrator(&page, store_path);
			let outcome = reloaded.detect_and_apply(&mut session, &mut local);
			debug!(target = "storesync", ?outcome, "post-apply reload pass");
			println!("{}", "page reloaded with synced storage".green());
			Ok(())
		}
		DetectOutcome::Rejected { report } => {
			bail!("apply rejected: {}", report.error.unwrap_or_else(|| "no data was written".to_string()))
		}
		DetectOutcome::Expired => {
			println!("stale sync request discarded");
			Ok(())
		}
		DetectOutcome::GuardCleared => {
			println!("freshly reloaded page; nothing to apply");
			Ok(())
		}
		DetectOutcome::NothingPending => {
			println!("no pending sync for this page");
			Ok(())
		}
	}
}
