//! Page storage areas behind a trait seam.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;

/// Which of the two page-scoped stores a value lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
	/// Tab-lived storage, dropped when the page context ends.
	Session,
	/// Origin-persistent storage.
	Local,
}

impl fmt::Display for AreaKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AreaKind::Session => write!(f, "session storage"),
			AreaKind::Local => write!(f, "local storage"),
		}
	}
}

/// A flat string-keyed store scoped to a page.
///
/// Implementations are expected to be cheap to enumerate; the engine reads
/// areas fully at capture time and writes them key by key at apply time.
pub trait StorageArea {
	fn keys(&self) -> Result<Vec<String>>;
	fn get(&self, key: &str) -> Result<Option<String>>;
	fn set(&mut self, key: &str, value: &str) -> Result<()>;
	fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process storage area used by tests and embedded harnesses.
#[derive(Debug, Clone, Default)]
pub struct MemoryArea {
	entries: BTreeMap<String, String>,
}

impl MemoryArea {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_entries<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl StorageArea for MemoryArea {
	fn keys(&self) -> Result<Vec<String>> {
		Ok(self.entries.keys().cloned().collect())
	}

	fn get(&self, key: &str) -> Result<Option<String>> {
		Ok(self.entries.get(key).cloned())
	}

	fn set(&mut self, key: &str, value: &str) -> Result<()> {
		self.entries.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&mut self, key: &str) -> Result<()> {
		self.entries.remove(key);
		Ok(())
	}
}
