//! File-backed pages.
//!
//! A "page" is a directory with `session.json` and `local.json`, each a
//! flat string map standing in for the browser storage areas. Reads are
//! lenient (a missing or corrupt file is an empty area); writes persist the
//! whole map.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use storesync::{Result, StorageArea};

/// One storage area persisted as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileArea {
	path: PathBuf,
}

impl FileArea {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load(&self) -> BTreeMap<String, String> {
		fs::read_to_string(&self.path)
			.ok()
			.and_then(|content| serde_json::from_str(&content).ok())
			.unwrap_or_default()
	}

	fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		let json = serde_json::to_string_pretty(entries)?;
		fs::write(&self.path, json)?;
		Ok(())
	}
}

impl StorageArea for FileArea {
	fn keys(&self) -> Result<Vec<String>> {
		Ok(self.load().keys().cloned().collect())
	}

	fn get(&self, key: &str) -> Result<Option<String>> {
		Ok(self.load().get(key).cloned())
	}

	fn set(&mut self, key: &str, value: &str) -> Result<()> {
		let mut entries = self.load();
		entries.insert(key.to_string(), value.to_string());
		self.save(&entries)
	}

	fn remove(&mut self, key: &str) -> Result<()> {
		let mut entries = self.load();
		if entries.remove(key).is_some() {
			self.save(&entries)?;
		}
		Ok(())
	}
}

/// Both storage areas of one page directory.
#[derive(Debug, Clone)]
pub struct Page {
	pub session: FileArea,
	pub local: FileArea,
}

impl Page {
	pub fn open(root: &Path) -> Self {
		Self {
			session: FileArea::new(root.join("session.json")),
			local: FileArea::new(root.join("local.json")),
		}
	}
}
