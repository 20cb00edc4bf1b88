use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::unity::text::key_value;
use crate::unity::validate::is_valid_guid;
use crate::unity::{Result, UnityError};

/// GUID to asset-path lookup, built outside the engine from `.meta` files.
pub trait GuidResolver {
	/// Project-relative path of the asset carrying `guid`.
	fn resolve(&self, guid: &str) -> Option<&str>;

	/// GUID of the `.cs` script whose file stem is `name`.
	fn find_script(&self, name: &str) -> Option<&str>;
}

/// In-memory GUID cache rooted at a project directory.
#[derive(Debug, Clone, Default)]
pub struct GuidCache {
	root: PathBuf,
	entries: HashMap<String, String>,
}

impl GuidCache {
	/// Cache whose relative paths resolve against `root`.
	pub fn new(root: impl Into<PathBuf>, entries: HashMap<String, String>) -> Self {
		Self { root: root.into(), entries }
	}

	/// Project root.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the cache is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Add or replace one entry.
	pub fn insert(&mut self, guid: impl Into<String>, path: impl Into<String>) {
		self.entries.insert(guid.into(), path.into());
	}

	/// Absolute path for a resolved GUID.
	pub fn absolute(&self, relative: &str) -> PathBuf {
		let relative = Path::new(relative);
		if relative.is_absolute() { relative.to_path_buf() } else { self.root.join(relative) }
	}
}

impl GuidResolver for GuidCache {
	fn resolve(&self, guid: &str) -> Option<&str> {
		self.entries.get(guid).map(String::as_str)
	}

	fn find_script(&self, name: &str) -> Option<&str> {
		let mut matches: Vec<(&String, &String)> = self
			.entries
			.iter()
			.filter(|(_, path)| {
				let path = Path::new(path.as_str());
				path.extension().is_some_and(|ext| ext == "cs") && path.file_stem().is_some_and(|stem| stem == name)
			})
			.collect();
		// Deterministic pick when several scripts share a stem.
		matches.sort_by(|left, right| left.1.cmp(right.1));
		matches.first().map(|(guid, _)| guid.as_str())
	}
}

/// Fresh asset GUID: 32 lowercase hex characters.
pub fn generate_guid() -> String {
	Uuid::new_v4().simple().to_string()
}

/// `.meta` sidecar path of an asset.
pub fn meta_path(asset: &Path) -> PathBuf {
	let mut name = asset.file_name().map(|item| item.to_os_string()).unwrap_or_default();
	name.push(".meta");
	asset.with_file_name(name)
}

/// GUID recorded in an asset's `.meta` sidecar.
pub fn read_meta_guid(asset: &Path) -> Result<String> {
	let meta = meta_path(asset);
	let text = fs::read_to_string(&meta).map_err(|err| UnityError::SourceUnreadable {
		path: meta.display().to_string(),
		reason: err.to_string(),
	})?;
	text.lines()
		.find_map(|line| key_value(line, "guid"))
		.map(str::to_owned)
		.filter(|guid| is_valid_guid(guid))
		.ok_or_else(|| UnityError::SourceUnreadable {
			path: meta.display().to_string(),
			reason: "no valid guid line".to_owned(),
		})
}

/// `.meta` text for a prefab asset.
pub fn prefab_meta(guid: &str) -> String {
	format!(
		"fileFormatVersion: 2\nguid: {guid}\nPrefabImporter:\n  externalObjects: {{}}\n  userData: \n  assetBundleName: \n  assetBundleVariant: \n"
	)
}

#[cfg(test)]
mod tests;
