//! Error taxonomy for the sync engine.
//!
//! Nothing here crosses the orchestrator's public boundary: entry points
//! return structured outcomes and surface failures through the notifier.
//! These kinds exist so channel and area implementations can say precisely
//! what went wrong and tests can assert on it.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
	/// A page storage area refused enumeration or a read/write.
	#[error("storage area access failed: {0}")]
	StorageAccess(String),

	/// The staging channel cannot serve requests at all.
	#[error("staging channel unavailable: {0}")]
	ChannelUnavailable(String),

	/// A staged sync request sat past its expiry window.
	#[error("sync request expired after {age_ms}ms")]
	StaleRequest { age_ms: u64 },

	/// A staged payload failed to parse; treated as absent by consumers.
	#[error("malformed staged payload under {key}: {detail}")]
	MalformedEnvelope { key: String, detail: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}
