//! In-process staging channel.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use super::{RemoteChangeCallback, StagingChannel};
use crate::error::Result;

/// Shared in-memory channel. Clones share state, so a test can hold a
/// handle to the same channel it boxed into a [`super::StagingStore`] --
/// which is also how two simulated page loads see one another's writes.
#[derive(Clone, Default)]
pub struct MemoryChannel {
	inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
	values: Mutex<HashMap<String, Value>>,
	watchers: Mutex<HashMap<String, Vec<RemoteChangeCallback>>>,
}

impl MemoryChannel {
	pub fn new() -> Self {
		Self::default()
	}

	/// Writes a value as if it originated outside this page context,
	/// firing any registered watchers for the key.
	pub fn put_remote(&self, key: &str, value: Value) {
		self.inner.values.lock().insert(key.to_string(), value.clone());
		if let Some(callbacks) = self.inner.watchers.lock().get(key) {
			for callback in callbacks {
				callback(key, &value);
			}
		}
	}

	pub fn len(&self) -> usize {
		self.inner.values.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.values.lock().is_empty()
	}
}

impl StagingChannel for MemoryChannel {
	fn name(&self) -> &'static str {
		"memory"
	}

	fn put(&self, key: &str, value: &Value) -> Result<()> {
		self.inner.values.lock().insert(key.to_string(), value.clone());
		Ok(())
	}

	fn get(&self, key: &str) -> Result<Option<Value>> {
		Ok(self.inner.values.lock().get(key).cloned())
	}

	fn delete(&self, key: &str) -> Result<()> {
		self.inner.values.lock().remove(key);
		Ok(())
	}

	fn on_remote_change(&self, key: &str, callback: RemoteChangeCallback) -> bool {
		self.inner.watchers.lock().entry(key.to_string()).or_default().push(callback);
		true
	}
}
