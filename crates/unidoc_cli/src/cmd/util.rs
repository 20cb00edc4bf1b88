use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::{Map, Value};
use unidoc::unity::{FileRef, GuidCache, Result, Selector, UnityError};

/// Cache location relative to a project root.
pub(crate) const CACHE_FILE: &str = ".unidoc/guid-cache.json";

/// Parse an object selector; integers are fileIds, anything else a name.
pub(crate) fn selector(value: &str) -> Selector {
	Selector::parse(value)
}

/// Parent selector where `root` (or no value) means the scene root.
pub(crate) fn parent_selector(value: Option<&str>) -> Option<Selector> {
	value.filter(|item| !item.eq_ignore_ascii_case("root")).map(selector)
}

/// Parse `123` or an inline `{fileID: N, guid: G, type: T}` literal.
pub(crate) fn parse_file_ref(value: &str) -> Result<FileRef> {
	let value = value.trim();
	if let Ok(file_id) = value.parse::<i64>() {
		return Ok(FileRef::local(file_id));
	}
	FileRef::parse(value)
		.filter(|_| value.starts_with('{'))
		.ok_or_else(|| UnityError::InvalidArgument {
			message: format!("expected a fileID or {{fileID: N, guid: G, type: T}}, got {value:?}"),
		})
}

/// Parse a component fileId argument.
pub(crate) fn parse_file_id(value: &str) -> Result<i64> {
	value
		.trim()
		.parse::<i64>()
		.ok()
		.filter(|id| *id != 0)
		.ok_or_else(|| UnityError::InvalidArgument {
			message: format!("expected a nonzero fileID, got {value:?}"),
		})
}

/// Locate and read the GUID cache.
///
/// An explicit `--guid-cache` must exist. Otherwise the cache is looked up under
/// `--project`, or under the nearest ancestor of `target` holding one; a missing
/// implicit cache yields `None`.
pub(crate) fn load_guid_cache(project: Option<&Path>, explicit: Option<&Path>, target: &Path) -> Result<Option<GuidCache>> {
	let (path, root) = match (explicit, project) {
		(Some(file), Some(project)) => (file.to_path_buf(), project.to_path_buf()),
		(Some(file), None) => (file.to_path_buf(), file.parent().map(Path::to_path_buf).unwrap_or_default()),
		(None, Some(project)) => (project.join(CACHE_FILE), project.to_path_buf()),
		(None, None) => match discover_project(target) {
			Some(project) => (project.join(CACHE_FILE), project),
			None => return Ok(None),
		},
	};

	if !path.exists() {
		if explicit.is_some() {
			return Err(UnityError::FileNotFound {
				path: path.display().to_string(),
			});
		}
		debug!("no GUID cache at {}", path.display());
		return Ok(None);
	}

	let text = fs::read_to_string(&path)?;
	let entries: HashMap<String, String> = serde_json::from_str(&text).map_err(|err| UnityError::InvalidArgument {
		message: format!("GUID cache {} is not a guid->path object: {err}", path.display()),
	})?;
	debug!("loaded {} GUID cache entries from {}", entries.len(), path.display());
	Ok(Some(GuidCache::new(root, entries)))
}

fn discover_project(target: &Path) -> Option<PathBuf> {
	let absolute = target.canonicalize().ok()?;
	absolute.ancestors().skip(1).find(|dir| dir.join(CACHE_FILE).is_file()).map(Path::to_path_buf)
}

/// Serialize an operation payload into result fields.
pub(crate) fn fields<T: serde::Serialize>(payload: &T) -> Result<Value> {
	serde_json::to_value(payload).map_err(|err| UnityError::Io(io::Error::from(err)))
}

/// Print a JSON document on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: cannot render JSON: {err}"),
	}
}

/// Print the `{success, file_path, ...}` envelope; returns whether the operation succeeded.
pub(crate) fn emit_result(file_path: &Path, result: Result<Value>) -> bool {
	let mut envelope = Map::new();
	let success = result.is_ok();
	envelope.insert("success".to_owned(), Value::Bool(success));
	envelope.insert("file_path".to_owned(), Value::String(file_path.display().to_string()));
	match result {
		Ok(Value::Object(extra)) => envelope.extend(extra),
		Ok(Value::Null) => {}
		Ok(other) => {
			envelope.insert("result".to_owned(), other);
		}
		Err(err) => {
			envelope.insert("error".to_owned(), Value::String(err.to_string()));
			envelope.insert("error_kind".to_owned(), Value::String(err.kind().as_str().to_owned()));
		}
	}
	emit_json(&Value::Object(envelope));
	success
}
