//! Cross-page storage synchronization engine.
//!
//! Carries page-storage contents from one origin to another by staging a
//! snapshot in an out-of-band key-value channel, then detecting and applying
//! it on the destination page. The host supplies the concrete storage areas
//! and staging channels; everything here is seam-first so a harness can run
//! the whole handshake in-process.

pub mod area;
pub mod error;
pub mod notify;
pub mod orchestrator;
pub mod snapshot;
pub mod staging;

pub use area::{AreaKind, MemoryArea, StorageArea};
pub use error::{Result, SyncError};
pub use notify::{NoticeKind, Notifier, RecordingNotifier, TracingNotifier};
pub use orchestrator::{CaptureOutcome, DetectOutcome, ScheduleReload, SyncConfig, SyncOrchestrator};
pub use snapshot::{AreaWriteOutcome, apply_area, capture_area, check_access, write_snapshot};
pub use staging::{AreaChannel, MemoryChannel, RemoteChangeCallback, StagingChannel, StagingStore};

pub use storesync_protocol as protocol;
