//! Reading and writing whole storage areas.
//!
//! Capture fails soft: an unreadable area becomes an empty map plus a
//! warning through the notifier, never an error to the caller. Apply
//! verifies every write by reading the key back, because some origins
//! silently drop writes to these stores.

use std::collections::BTreeMap;

use storesync_protocol::{StorageSnapshot, WriteReport};
use tracing::{debug, warn};

use crate::area::{AreaKind, StorageArea};
use crate::error::Result;
use crate::notify::{NoticeKind, Notifier};

const PROBE_KEY: &str = "__storesync_probe__";

/// Per-area apply outcome. The error carries the last per-key failure;
/// earlier keys that verified stay counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaWriteOutcome {
	pub count: usize,
	pub error: Option<String>,
}

/// Enumerates every key in `area` and returns its values.
///
/// Missing values read back as empty strings. Any enumeration or access
/// failure yields an empty map and a warning notice.
pub fn capture_area(area: &dyn StorageArea, kind: AreaKind, notifier: &dyn Notifier) -> BTreeMap<String, String> {
	match try_capture(area) {
		Ok(entries) => entries,
		Err(err) => {
			warn!(target = "storesync.area", %kind, error = %err, "capture failed");
			notifier.notify(NoticeKind::Warning, &format!("could not read {kind}"));
			BTreeMap::new()
		}
	}
}

fn try_capture(area: &dyn StorageArea) -> Result<BTreeMap<String, String>> {
	let mut entries = BTreeMap::new();
	for key in area.keys()? {
		let value = area.get(&key)?.unwrap_or_default();
		entries.insert(key, value);
	}
	Ok(entries)
}

/// Writes every entry into `area`, reading each key back to confirm the
/// value landed before counting it. Mismatches and write errors are
/// recorded per key and the remaining keys still apply.
pub fn apply_area(area: &mut dyn StorageArea, kind: AreaKind, data: &BTreeMap<String, String>) -> AreaWriteOutcome {
	let mut outcome = AreaWriteOutcome::default();
	for (key, value) in data {
		match area.set(key, value) {
			Ok(()) => match area.get(key) {
				Ok(Some(stored)) if stored == *value => outcome.count += 1,
				_ => outcome.error = Some(format!("{kind} write verification failed for {key}")),
			},
			Err(err) => {
				debug!(target = "storesync.area", %kind, %key, error = %err, "write failed");
				outcome.error = Some(format!("error writing {kind} key {key}"));
			}
		}
	}
	outcome
}

/// Probes writability with a disposable key.
pub fn check_access(area: &mut dyn StorageArea) -> bool {
	area.set(PROBE_KEY, PROBE_KEY).is_ok() && area.remove(PROBE_KEY).is_ok()
}

/// Writes a staged snapshot into the destination page's areas.
///
/// Only areas flagged by the caller participate, and only when they carry
/// data and probe as writable. Success means at least one key landed; an
/// inaccessible area that had nothing requested does not count against it.
pub fn write_snapshot(
	session: &mut dyn StorageArea,
	local: &mut dyn StorageArea,
	snapshot: &StorageSnapshot,
	include_session: bool,
	include_local: bool,
) -> WriteReport {
	let session_accessible = check_access(session);
	let local_accessible = check_access(local);

	let mut session_count = 0;
	let mut local_count = 0;
	let mut error: Option<String> = None;

	if include_session && !snapshot.session_storage.is_empty() && session_accessible {
		let outcome = apply_area(session, AreaKind::Session, &snapshot.session_storage);
		session_count = outcome.count;
		if outcome.error.is_some() {
			error = outcome.error;
		}
	}

	if include_local && !snapshot.local_storage.is_empty() && local_accessible {
		let outcome = apply_area(local, AreaKind::Local, &snapshot.local_storage);
		local_count = outcome.count;
		if outcome.error.is_some() {
			error = outcome.error;
		}
	}

	if session_count + local_count == 0 {
		let message = if !session_accessible && !local_accessible {
			error.unwrap_or_else(|| "storage access restricted".to_string())
		} else {
			error.unwrap_or_else(|| "no storage data to write".to_string())
		};
		return WriteReport::failed(message);
	}

	WriteReport {
		success: true,
		session_count,
		local_count,
		error,
	}
}
