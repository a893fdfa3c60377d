//! Captured page-storage contents as they travel through the staging channel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Full key/value contents of both page storage areas at capture time.
///
/// Overwritten wholesale by each capture; there is no TTL on the snapshot
/// itself (freshness is the envelope's concern).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSnapshot {
	#[serde(default)]
	pub session_storage: BTreeMap<String, String>,
	#[serde(default)]
	pub local_storage: BTreeMap<String, String>,
}

impl StorageSnapshot {
	pub fn session_count(&self) -> usize {
		self.session_storage.len()
	}

	pub fn local_count(&self) -> usize {
		self.local_storage.len()
	}

	/// True when neither area contributed any keys.
	pub fn is_empty(&self) -> bool {
		self.session_storage.is_empty() && self.local_storage.is_empty()
	}
}

/// Read-only staged-snapshot counts for display surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedSummary {
	pub session_count: usize,
	pub local_count: usize,
}

impl From<&StorageSnapshot> for StagedSummary {
	fn from(snapshot: &StorageSnapshot) -> Self {
		Self {
			session_count: snapshot.session_count(),
			local_count: snapshot.local_count(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn snapshot_serializes_camel_case() {
		let mut snapshot = StorageSnapshot::default();
		snapshot.session_storage.insert("a".into(), "1".into());

		let json = serde_json::to_value(&snapshot).unwrap();
		assert_eq!(json["sessionStorage"]["a"], "1");
		assert_eq!(json["localStorage"], serde_json::json!({}));
	}

	#[test]
	fn missing_areas_deserialize_empty() {
		let snapshot: StorageSnapshot = serde_json::from_str("{}").unwrap();
		assert!(snapshot.is_empty());
	}

	#[test]
	fn summary_counts_both_areas() {
		let mut snapshot = StorageSnapshot::default();
		snapshot.session_storage.insert("a".into(), "1".into());
		snapshot.local_storage.insert("b".into(), "2".into());
		snapshot.local_storage.insert("c".into(), "3".into());

		let summary = StagedSummary::from(&snapshot);
		assert_eq!(summary.session_count, 1);
		assert_eq!(summary.local_count, 2);
	}
}
