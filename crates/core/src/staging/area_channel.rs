//! Staging fallback backed by a page storage area.
//!
//! When the out-of-band runtime is unavailable the original degrades to
//! stashing staged payloads in the page's own persistent storage. That
//! fallback only works while source and destination share an origin; it is
//! wired in as the second channel, never the first.

use parking_lot::Mutex;
use serde_json::Value;

use super::{RemoteChangeCallback, StagingChannel};
use crate::area::StorageArea;
use crate::error::{Result, SyncError};

/// Adapter exposing a [`StorageArea`] as a staging channel. Payloads are
/// stored as JSON text under the staging key, next to the page's own data.
pub struct AreaChannel<A: StorageArea + Send> {
	area: Mutex<A>,
}

impl<A: StorageArea + Send> AreaChannel<A> {
	pub fn new(area: A) -> Self {
		Self { area: Mutex::new(area) }
	}
}

impl<A: StorageArea + Send> StagingChannel for AreaChannel<A> {
	fn name(&self) -> &'static str {
		"page-local"
	}

	fn put(&self, key: &str, value: &Value) -> Result<()> {
		let text = serde_json::to_string(value)?;
		self.area.lock().set(key, &text)
	}

	fn get(&self, key: &str) -> Result<Option<Value>> {
		let Some(text) = self.area.lock().get(key)? else {
			return Ok(None);
		};
		serde_json::from_str(&text).map(Some).map_err(|err| SyncError::MalformedEnvelope {
			key: key.to_string(),
			detail: err.to_string(),
		})
	}

	fn delete(&self, key: &str) -> Result<()> {
		self.area.lock().remove(key)
	}

	/// Page-local storage cannot observe writes from other contexts.
	fn on_remote_change(&self, _key: &str, _callback: RemoteChangeCallback) -> bool {
		false
	}
}
