//! The out-of-band channel that carries staged data across a navigation.
//!
//! The primary channel is whatever the host runtime provides that escapes
//! same-origin isolation; the fallback is an in-origin degraded mode that
//! will not survive a cross-origin hop. Every operation here is
//! non-throwing from the orchestrator's point of view: failures degrade to
//! "sync did not happen".

mod area_channel;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;

pub use area_channel::AreaChannel;
pub use memory::MemoryChannel;

/// Callback invoked when a watched key changes from outside this page context.
pub type RemoteChangeCallback = Box<dyn Fn(&str, &Value) + Send + Sync>;

/// One concrete key-value side-channel.
pub trait StagingChannel: Send + Sync {
	fn name(&self) -> &'static str;

	fn put(&self, key: &str, value: &Value) -> Result<()>;

	fn get(&self, key: &str) -> Result<Option<Value>>;

	fn delete(&self, key: &str) -> Result<()>;

	/// Registers a remote-change watcher. Returns false when the channel
	/// cannot watch; the sync handshake never depends on this.
	fn on_remote_change(&self, key: &str, callback: RemoteChangeCallback) -> bool {
		let _ = (key, callback);
		false
	}
}

/// Primary-then-fallback staging access.
pub struct StagingStore {
	primary: Box<dyn StagingChannel>,
	fallback: Option<Box<dyn StagingChannel>>,
}

impl StagingStore {
	pub fn new(primary: Box<dyn StagingChannel>) -> Self {
		Self { primary, fallback: None }
	}

	pub fn with_fallback(primary: Box<dyn StagingChannel>, fallback: Box<dyn StagingChannel>) -> Self {
		Self {
			primary,
			fallback: Some(fallback),
		}
	}

	fn channels(&self) -> impl Iterator<Item = &dyn StagingChannel> {
		std::iter::once(self.primary.as_ref()).chain(self.fallback.as_deref())
	}

	/// Writes to the first channel that accepts the value. Returns false
	/// when every channel refused.
	pub fn put<T: Serialize>(&self, key: &str, value: &T) -> bool {
		let value = match serde_json::to_value(value) {
			Ok(value) => value,
			Err(err) => {
				warn!(target = "storesync.stage", %key, error = %err, "payload not serializable");
				return false;
			}
		};

		for channel in self.channels() {
			match channel.put(key, &value) {
				Ok(()) => return true,
				Err(err) => {
					debug!(
						target = "storesync.stage",
						channel = channel.name(),
						%key,
						error = %err,
						"put failed; trying next channel"
					);
				}
			}
		}
		false
	}

	/// Reads the first parseable value for `key`, or `None`. Unparsable
	/// payloads are discarded and treated as absent.
	pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
		for channel in self.channels() {
			let value = match channel.get(key) {
				Ok(Some(value)) => value,
				Ok(None) => continue,
				Err(err) => {
					debug!(
						target = "storesync.stage",
						channel = channel.name(),
						%key,
						error = %err,
						"get failed; trying next channel"
					);
					continue;
				}
			};

			match serde_json::from_value(value) {
				Ok(parsed) => return Some(parsed),
				Err(err) => {
					debug!(
						target = "storesync.stage",
						channel = channel.name(),
						%key,
						error = %err,
						"malformed payload; treating as absent"
					);
				}
			}
		}
		None
	}

	/// Reads `key` with a default, never failing.
	pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
		self.lookup(key).unwrap_or(default)
	}

	/// Single-use read: returns the value and removes it from every
	/// channel, so a second taker finds nothing.
	pub fn take<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
		let value = self.lookup(key);
		self.delete(key);
		value
	}

	/// Best-effort removal from every channel. Idempotent.
	pub fn delete(&self, key: &str) {
		for channel in self.channels() {
			if let Err(err) = channel.delete(key) {
				debug!(
					target = "storesync.stage",
					channel = channel.name(),
					%key,
					error = %err,
					"delete failed"
				);
			}
		}
	}

	/// Watches `key` on the primary channel only; the fallback is local to
	/// this page context and cannot see remote writes.
	pub fn on_remote_change(&self, key: &str, callback: RemoteChangeCallback) -> bool {
		self.primary.on_remote_change(key, callback)
	}
}
