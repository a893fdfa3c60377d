//! File-backed staging channel.
//!
//! The stand-in for the userscript-manager value store: one JSON file
//! shared by every page directory, reachable regardless of which page the
//! CLI is pointed at. A corrupt store file starts over empty rather than
//! blocking the sync.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use storesync::{Result, StagingChannel};

/// Key-value channel persisted as a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileChannel {
	path: PathBuf,
}

impl FileChannel {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	fn load(&self) -> HashMap<String, Value> {
		fs::read_to_string(&self.path)
			.ok()
			.and_then(|content| serde_json::from_str(&content).ok())
			.unwrap_or_default()
	}

	fn save(&self, entries: &HashMap<String, Value>) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		let json = serde_json::to_string_pretty(entries)?;
		fs::write(&self.path, json)?;
		Ok(())
	}
}

impl StagingChannel for FileChannel {
	fn name(&self) -> &'static str {
		"file"
	}

	fn put(&self, key: &str, value: &Value) -> Result<()> {
		let mut entries = self.load();
		entries.insert(key.to_string(), value.clone());
		self.save(&entries)
	}

	fn get(&self, key: &str) -> Result<Option<Value>> {
		Ok(self.load().get(key).cloned())
	}

	fn delete(&self, key: &str) -> Result<()> {
		let mut entries = self.load();
		if entries.remove(key).is_some() {
			self.save(&entries)?;
		}
		Ok(())
	}
}

/// Default staging store location under the user config directory.
pub fn default_store_path() -> PathBuf {
	std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
		.unwrap_or_else(|| PathBuf::from("."))
		.join("storesync/staging.json")
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn values_survive_reopening_the_file() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("staging.json");

		let channel = FileChannel::new(path.clone());
		channel.put("k", &json!({"a": 1})).unwrap();

		let reopened = FileChannel::new(path);
		assert_eq!(reopened.get("k").unwrap(), Some(json!({"a": 1})));
	}

	#[test]
	fn corrupt_store_file_starts_empty() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("staging.json");
		fs::write(&path, "][").unwrap();

		let channel = FileChannel::new(path);
		assert_eq!(channel.get("k").unwrap(), None);
		channel.put("k", &json!("fresh")).unwrap();
		assert_eq!(channel.get("k").unwrap(), Some(json!("fresh")));
	}

	#[test]
	fn delete_removes_only_the_named_key() {
		let temp = TempDir::new().unwrap();
		let channel = FileChannel::new(temp.path().join("staging.json"));
		channel.put("a", &json!(1)).unwrap();
		channel.put("b", &json!(2)).unwrap();

		channel.delete("a").unwrap();
		assert_eq!(channel.get("a").unwrap(), None);
		assert_eq!(channel.get("b").unwrap(), Some(json!(2)));
	}

	#[test]
	fn unwritable_location_reports_an_error() {
		let channel = FileChannel::new(PathBuf::from("/dev/null/storesync/staging.json"));
		assert!(channel.put("k", &json!(1)).is_err());
	}
}
