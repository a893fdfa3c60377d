//! Apply-path result shapes.

use serde::{Deserialize, Serialize};

/// Outcome of writing a staged snapshot into a destination page.
///
/// `success` means at least one key landed across the requested areas; an
/// inaccessible area that had nothing to contribute does not count against
/// it. Produced and consumed synchronously, never staged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteReport {
	pub success: bool,
	pub session_count: usize,
	pub local_count: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl WriteReport {
	pub fn written(&self) -> usize {
		self.session_count + self.local_count
	}

	pub fn failed(error: impl Into<String>) -> Self {
		Self {
			success: false,
			session_count: 0,
			local_count: 0,
			error: Some(error.into()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn error_field_is_omitted_when_absent() {
		let report = WriteReport {
			success: true,
			session_count: 2,
			local_count: 0,
			error: None,
		};
		let json = serde_json::to_string(&report).unwrap();
		assert!(!json.contains("error"));
		assert!(json.contains("\"sessionCount\":2"));
	}

	#[test]
	fn failed_report_carries_message() {
		let report = WriteReport::failed("storage access restricted");
		assert!(!report.success);
		assert_eq!(report.written(), 0);
		assert_eq!(report.error.as_deref(), Some("storage access restricted"));
	}
}
