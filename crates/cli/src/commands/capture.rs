use std::path::Path;

use anyhow::{anyhow, bail};
use colored::Colorize;
use storesync::{CaptureOutcome, SyncConfig};
use tracing::info;
use url::Url;

use super::page_orchestrator;
use crate::page::Page;

pub fn execute(page_dir: &Path, dest: Option<&str>, skip_session: bool, skip_local: bool, store_path: &Path) -> anyhow::Result<()> {
	info!(target = "storesync", page = %page_dir.display(), "capture");

	// Validate the destination up front so a typo doesn't cost the capture.
	let destination = dest.map(normalize_destination).transpose()?;

	let page = Page::open(page_dir);
	let orchestrator = page_orchestrator(&page, store_path);
	let config = SyncConfig {
		include_session: !skip_session,
		include_local: !skip_local,
	};

	match orchestrator.capture(&page.session, &page.local, &config) {
		CaptureOutcome::Staged { envelope_staged, .. } => {
			if let Some(url) = destination {
				println!("{} {url}", "open:".cyan().bold());
			}
			if !envelope_staged {
				info!(target = "storesync", "snapshot staged without a sync request; apply manually on the destination");
			}
			Ok(())
		}
		CaptureOutcome::NoData => Ok(()),
		CaptureOutcome::StageFailed => bail!("could not stage storage data on any channel"),
	}
}

/// Trims the input, defaults the scheme, and rejects anything that still
/// fails to parse as a URL.
pub fn normalize_destination(raw: &str) -> anyhow::Result<Url> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		bail!("destination URL is empty");
	}

	let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
		trimmed.to_string()
	} else {
		format!("http://{trimmed}")
	};

	Url::parse(&candidate).map_err(|err| anyhow!("invalid destination URL {candidate:?}: {err}"))
}
