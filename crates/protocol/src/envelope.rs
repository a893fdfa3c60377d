//! The single-use sync-request envelope.

use serde::{Deserialize, Serialize};

use crate::SYNC_REQUEST_TTL_MS;

/// Marker staged next to a snapshot telling the destination page that an
/// apply is wanted. Consumed exactly once: whoever reads it deletes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
	/// Capture time, milliseconds since the Unix epoch.
	pub timestamp: u64,
	pub has_data: bool,
	pub include_session: bool,
	pub include_local: bool,
}

impl SyncRequest {
	pub fn new(timestamp: u64, has_data: bool, include_session: bool, include_local: bool) -> Self {
		Self {
			timestamp,
			has_data,
			include_session,
			include_local,
		}
	}

	/// True when the request is strictly older than the expiry window and
	/// must be discarded rather than applied.
	pub fn is_expired(&self, now_ms: u64) -> bool {
		now_ms.saturating_sub(self.timestamp) > SYNC_REQUEST_TTL_MS
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const MINUTE_MS: u64 = 60 * 1000;

	#[test]
	fn fresh_request_is_not_expired() {
		let request = SyncRequest::new(1_000_000, true, true, true);
		assert!(!request.is_expired(1_000_000 + 4 * MINUTE_MS + 59 * 1000));
	}

	#[test]
	fn request_past_five_minutes_is_expired() {
		let request = SyncRequest::new(1_000_000, true, true, true);
		assert!(request.is_expired(1_000_000 + 5 * MINUTE_MS + 1000));
	}

	#[test]
	fn exactly_five_minutes_is_still_fresh() {
		let request = SyncRequest::new(1_000_000, true, true, true);
		assert!(!request.is_expired(1_000_000 + 5 * MINUTE_MS));
	}

	#[test]
	fn clock_skew_does_not_underflow() {
		let request = SyncRequest::new(2_000_000, true, false, true);
		assert!(!request.is_expired(1_000_000));
	}

	#[test]
	fn envelope_round_trips_camel_case() {
		let request = SyncRequest::new(42, true, true, false);
		let json = serde_json::to_value(request).unwrap();
		assert_eq!(json["hasData"], true);
		assert_eq!(json["includeSession"], true);
		assert_eq!(json["includeLocal"], false);

		let back: SyncRequest = serde_json::from_value(json).unwrap();
		assert_eq!(back, request);
	}
}
