//! The sync state machine.
//!
//! One [`SyncOrchestrator`] is constructed per page load and drives both
//! halves of the handshake: `capture` on the source page stages a snapshot
//! plus a single-use sync request, and `detect_and_apply` on the
//! destination page consumes them. The reload that follows a successful
//! apply is returned as a [`ScheduleReload`] command for the host to
//! execute; the guard key written beforehand makes the reloaded page's
//! detection short-circuit instead of applying again forever.

use std::time::{SystemTime, UNIX_EPOCH};

use storesync_protocol::{
	RELOAD_DELAY_MS, RELOAD_GUARD_KEY, SNAPSHOT_KEY, SYNC_REQUEST_KEY, StagedSummary, StorageSnapshot, SyncRequest, WriteReport,
};
use tracing::{debug, warn};

use crate::area::{AreaKind, StorageArea};
use crate::notify::{NoticeKind, Notifier};
use crate::snapshot::{capture_area, write_snapshot};
use crate::staging::StagingStore;


/// Which storage areas participate in a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
	pub include_session: bool,
	pub include_local: bool,
}

impl Default for SyncConfig {
	fn default() -> Self {
		Self {
			include_session: true,
			include_local: true,
		}
	}
}

/// Deferred-reload command returned from a successful apply. The host owns
/// the timer; the engine only decides that a reload should happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleReload {
	pub delay_ms: u64,
}

/// Outcome of the capture half of the handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
	/// Nothing to sync. A warning was surfaced; no envelope was staged.
	NoData,
	/// The snapshot could not be staged on any channel.
	StageFailed,
	/// Snapshot staged. `envelope_staged` is false when the sync request
	/// itself could not be written anywhere, leaving only manual apply.
	Staged {
		summary: StagedSummary,
		envelope_staged: bool,
	},
}

/// Outcome of one page load's detection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectOutcome {
	/// The re-entry guard was set: this load is the post-apply reload.
	GuardCleared,
	/// No consumable sync request was staged.
	NothingPending,
	/// A request existed but sat past its expiry window; discarded.
	Expired,
	/// Apply ran and wrote nothing; no reload, no retry.
	Rejected { report: WriteReport },
	/// Apply wrote data; the host should execute the reload.
	Applied {
		report: WriteReport,
		reload: ScheduleReload,
	},
}

impl DetectOutcome {
	/// The boolean the UI shell ultimately sees: did an apply occur.
	pub fn applied(&self) -> bool {
		matches!(self, DetectOutcome::Applied { .. })
	}
}

/// Per-page-load sync driver.
pub struct SyncOrchestrator<N: Notifier> {
	staging: StagingStore,
	notifier: N,
}

impl<N: Notifier> SyncOrchestrator<N> {
	pub fn new(staging: StagingStore, notifier: N) -> Self {
		Self { staging, notifier }
	}

	pub fn notifier(&self) -> &N {
		&self.notifier
	}

	pub fn staging(&self) -> &StagingStore {
		&self.staging
	}

	/// Snapshots the enabled areas and stages the snapshot plus a fresh
	/// sync request. Staging the snapshot before the envelope keeps the
	/// window where a reader sees a request without data as small as the
	/// channels allow.
	pub fn capture(&self, session: &dyn StorageArea, local: &dyn StorageArea, config: &SyncConfig) -> CaptureOutcome {
		let mut snapshot = StorageSnapshot::default();
		if config.include_session {
			snapshot.session_storage = capture_area(session, AreaKind::Session, &self.notifier);
		}
		if config.include_local {
			snapshot.local_storage = capture_area(local, AreaKind::Local, &self.notifier);
		}

		if snapshot.is_empty() {
			self.notifier.notify(NoticeKind::Warning, "no storage data selected or found to sync");
			return CaptureOutcome::NoData;
		}

		let summary = StagedSummary::from(&snapshot);
		if !self.staging.put(SNAPSHOT_KEY, &snapshot) {
			self.notifier.notify(NoticeKind::Error, "failed to stage storage data on any channel");
			return CaptureOutcome::StageFailed;
		}

		let request = SyncRequest::new(now_ms(), true, config.include_session, config.include_local);
		let envelope_staged = self.staging.put(SYNC_REQUEST_KEY, &request);
		if envelope_staged {
			self.notifier.notify(
				NoticeKind::Info,
				&format!("staged {} storage entries for sync", summary.session_count + summary.local_count),
			);
		} else {
			self.notifier.notify(
				NoticeKind::Warning,
				"sync request could not be staged; automatic sync is unlikely to occur",
			);
		}

		CaptureOutcome::Staged { summary, envelope_staged }
	}

	/// Runs the destination-side detection sequence for this page load.
	pub fn detect_and_apply(&self, session: &mut dyn StorageArea, local: &mut dyn StorageArea) -> DetectOutcome {
		// Loop breaker: an apply just reloaded this page, so the staged
		// request (already consumed) must not fire again.
		if matches!(session.get(RELOAD_GUARD_KEY), Ok(Some(_))) {
			if let Err(err) = session.remove(RELOAD_GUARD_KEY) {
				warn!(target = "storesync.sync", error = %err, "could not clear reload guard");
			}
			debug!(target = "storesync.sync", "reload guard observed; skipping detection");
			return DetectOutcome::GuardCleared;
		}

		// Read-then-delete makes the request single-use.
		let Some(request) = self.staging.take::<SyncRequest>(SYNC_REQUEST_KEY) else {
			return DetectOutcome::NothingPending;
		};

		if !request.has_data {
			debug!(target = "storesync.sync", "sync request carries no data");
			return DetectOutcome::NothingPending;
		}

		let now = now_ms();
		if request.is_expired(now) {
			// Expected race with the user browsing away and back; not a failure.
			debug!(
				target = "storesync.sync",
				age_ms = now.saturating_sub(request.timestamp),
				"discarding stale sync request"
			);
			return DetectOutcome::Expired;
		}

		let snapshot = self.staging.get(SNAPSHOT_KEY, StorageSnapshot::default());
		let report = write_snapshot(session, local, &snapshot, request.include_session, request.include_local);

		if !report.success {
			let reason = report.error.clone().unwrap_or_else(|| "no data was written".to_string());
			self.notifier.notify(NoticeKind::Error, &format!("storage sync failed: {reason}"));
			return DetectOutcome::Rejected { report };
		}

		if let Err(err) = session.set(RELOAD_GUARD_KEY, "true") {
			// Without the guard the reload would re-detect, but the request
			// is already consumed, so the worst case is a no-op load.
			warn!(target = "storesync.sync", error = %err, "could not set reload guard");
		}

		self.notifier
			.notify(NoticeKind::Info, &format!("applied {} synced storage entries", report.written()));

		DetectOutcome::Applied {
			report,
			reload: ScheduleReload { delay_ms: RELOAD_DELAY_MS },
		}
	}

	/// Counts from the currently staged snapshot, `{0, 0}` when none.
	pub fn staged_summary(&self) -> StagedSummary {
		let snapshot = self.staging.get(SNAPSHOT_KEY, StorageSnapshot::default());
		StagedSummary::from(&snapshot)
	}

	/// Non-consuming view of the pending sync request, for display only.
	pub fn pending_request(&self) -> Option<SyncRequest> {
		self.staging.lookup(SYNC_REQUEST_KEY)
	}

	/// Removes staged data and any pending request.
	pub fn cleanup_staged(&self) {
		self.staging.delete(SNAPSHOT_KEY);
		self.staging.delete(SYNC_REQUEST_KEY);
	}
}

pub(crate) fn now_ms() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.unwrap_or_default()
		.as_millis() as u64
}
