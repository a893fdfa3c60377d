use std::path::Path;

use storesync::{AreaKind, capture_area};

use crate::notify::ConsoleNotifier;
use crate::page::Page;

/// Prints a page's own storage counts, without touching the staging store.
pub fn execute(page_dir: &Path) -> anyhow::Result<()> {
	let page = Page::open(page_dir);
	let notifier = ConsoleNotifier;

	let session = capture_area(&page.session, AreaKind::Session, &notifier);
	let local = capture_area(&page.local, AreaKind::Local, &notifier);

	println!("storage for {}:", page_dir.display());
	println!("  session storage: {} entries", session.len());
	println!("  local storage:   {} entries", local.len());
	Ok(())
}
