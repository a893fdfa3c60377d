use std::path::Path;

use tracing::info;

use super::store_orchestrator;

pub fn execute(store_path: &Path) -> anyhow::Result<()> {
	store_orchestrator(store_path).cleanup_staged();
	info!(target = "storesync", store = %store_path.display(), "staged data removed");
	println!("staged storage data and pending sync request removed");
	Ok(())
}
