//! Wire types for storesync staged data.
//!
//! This crate contains the serde-serializable shapes that cross the staging
//! channel between a capture on one page and an apply on another: the
//! storage snapshot, the single-use sync-request envelope, and the apply
//! report. Field names serialize in camelCase so staged payloads stay
//! readable next to the page storage they mirror.
//!
//! Types in this crate are pure data; the engine that moves them lives in
//! `storesync-core`.

pub mod envelope;
pub mod report;
pub mod snapshot;

pub use envelope::*;
pub use report::*;
pub use snapshot::*;

/// Staging key holding the most recent [`StorageSnapshot`].
pub const SNAPSHOT_KEY: &str = "tempStorageData";

/// Staging key holding the pending [`SyncRequest`], deleted on first read.
pub const SYNC_REQUEST_KEY: &str = "__storage_sync_needed";

/// Session-area key marking that an apply just reloaded this page.
pub const RELOAD_GUARD_KEY: &str = "__storage_data_written_need_refresh";

/// How long a staged sync request stays honorable, in milliseconds.
pub const SYNC_REQUEST_TTL_MS: u64 = 5 * 60 * 1000;

/// Settle delay before the post-apply reload, in milliseconds.
pub const RELOAD_DELAY_MS: u64 = 100;
