//! User-facing feedback seam.
//!
//! The engine never talks to a UI directly; notable outcomes go through a
//! [`Notifier`] the host supplies. Text stays non-technical -- the detail
//! lives in tracing output.

use parking_lot::Mutex;

/// Severity of a notice shown to the human driving the sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
	Info,
	Warning,
	Error,
}

/// Fire-and-forget feedback callback invoked on each notable outcome.
pub trait Notifier {
	fn notify(&self, kind: NoticeKind, text: &str);
}

/// Notifier that forwards notices to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
	fn notify(&self, kind: NoticeKind, text: &str) {
		match kind {
			NoticeKind::Info => tracing::info!(target = "storesync.notify", "{text}"),
			NoticeKind::Warning => tracing::warn!(target = "storesync.notify", "{text}"),
			NoticeKind::Error => tracing::error!(target = "storesync.notify", "{text}"),
		}
	}
}

/// Notifier that collects notices in memory for later assertion.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
	notices: Mutex<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn notices(&self) -> Vec<(NoticeKind, String)> {
		self.notices.lock().clone()
	}

	/// True when any recorded notice of the given kind contains `needle`.
	pub fn saw(&self, kind: NoticeKind, needle: &str) -> bool {
		self.notices
			.lock()
			.iter()
			.any(|(k, text)| *k == kind && text.contains(needle))
	}
}

impl Notifier for RecordingNotifier {
	fn notify(&self, kind: NoticeKind, text: &str) {
		self.notices.lock().push((kind, text.to_string()));
	}
}

impl<N: Notifier> Notifier for &N {
	fn notify(&self, kind: NoticeKind, text: &str) {
		(*self).notify(kind, text);
	}
}
