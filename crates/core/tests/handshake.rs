//! End-to-end handshake through the public API.

use serde_json::Value;
use storesync::protocol::{RELOAD_GUARD_KEY, SNAPSHOT_KEY, SYNC_REQUEST_KEY};
use storesync::{
	AreaChannel, DetectOutcome, MemoryArea, MemoryChannel, RecordingNotifier, Result, StagingChannel, StagingStore, StorageArea,
	SyncConfig, SyncError, SyncOrchestrator,
};

fn new_orchestrator(channel: &MemoryChannel) -> SyncOrchestrator<RecordingNotifier> {
	SyncOrchestrator::new(StagingStore::new(Box::new(channel.clone())), RecordingNotifier::new())
}

#[test]
fn two_origin_handshake_applies_and_guards() {
	// The shared channel is the piece that survives the navigation.
	let channel = MemoryChannel::new();

	let source_session = MemoryArea::from_entries([("token", "abc"), ("user", "amy")]);
	let source_local = MemoryArea::from_entries([("theme", "dark")]);
	new_orchestrator(&channel).capture(&source_session, &source_local, &SyncConfig::default());

	let mut dest_session = MemoryArea::new();
	let mut dest_local = MemoryArea::new();
	let destination = new_orchestrator(&channel);
	let outcome = destination.detect_and_apply(&mut dest_session, &mut dest_local);

	assert!(outcome.applied());
	assert_eq!(dest_session.get("token").unwrap().as_deref(), Some("abc"));
	assert_eq!(dest_local.get("theme").unwrap().as_deref(), Some("dark"));

	// The envelope is gone, the snapshot remains for inspection.
	assert!(channel.get(SYNC_REQUEST_KEY).unwrap().is_none());
	assert!(channel.get(SNAPSHOT_KEY).unwrap().is_some());

	// The reload sees the guard and stops.
	let reloaded = new_orchestrator(&channel);
	assert_eq!(
		reloaded.detect_and_apply(&mut dest_session, &mut dest_local),
		DetectOutcome::GuardCleared
	);
	assert!(dest_session.get(RELOAD_GUARD_KEY).unwrap().is_none());
}

/// Channel standing in for a missing host runtime.
struct UnavailableChannel;

impl StagingChannel for UnavailableChannel {
	fn name(&self) -> &'static str {
		"unavailable"
	}

	fn put(&self, _key: &str, _value: &Value) -> Result<()> {
		Err(SyncError::ChannelUnavailable("runtime absent".into()))
	}

	fn get(&self, _key: &str) -> Result<Option<Value>> {
		Err(SyncError::ChannelUnavailable("runtime absent".into()))
	}

	fn delete(&self, _key: &str) -> Result<()> {
		Err(SyncError::ChannelUnavailable("runtime absent".into()))
	}
}

#[test]
fn degraded_same_origin_sync_through_area_fallback() {
	// Primary dead on both ends; the fallback lives in the page's own
	// local area, so this only works while the origin stays the same.
	let shared_local = MemoryArea::from_entries([("pref", "1")]);

	let staging = StagingStore::with_fallback(
		Box::new(UnavailableChannel),
		Box::new(AreaChannel::new(shared_local.clone())),
	);
	let source = SyncOrchestrator::new(staging, RecordingNotifier::new());

	let session = MemoryArea::from_entries([("token", "abc")]);
	source.capture(&session, &shared_local, &SyncConfig::default());

	let staged_summary = source.staged_summary();
	assert_eq!(staged_summary.session_count, 1);

	// Same page context, manual apply: the degraded mode the fallback
	// exists for.

	let mut dest_session = MemoryArea::new();
	let mut dest_local = MemoryArea::new();
	let outcome = source.detect_and_apply(&mut dest_session, &mut dest_local);
	assert!(outcome.applied());
	assert_eq!(dest_session.get("token").unwrap().as_deref(), Some("abc"));
}
