use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, NoExpand, Regex};

static REF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{fileID:\s*(-?\d+)([^}]*)\}").expect("reference pattern is valid"));
static GUID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bguid:\s*([^,}\s]+)").expect("guid pattern is valid"));
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"type:\s*(-?\d+)").expect("type pattern is valid"));
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A(--- !u!\d+ &)(-?\d+)").expect("anchor pattern is valid"));

/// One `{fileID: N[, guid: G[, type: T]]}` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef {
	/// Target fileId; `0` is the null reference.
	pub file_id: i64,
	/// Asset GUID for cross-file references.
	pub guid: Option<String>,
	/// Unity asset type discriminator.
	pub kind: Option<i32>,
}

impl FileRef {
	/// Null reference `{fileID: 0}`.
	pub const NULL: FileRef = FileRef {
		file_id: 0,
		guid: None,
		kind: None,
	};

	/// In-document reference.
	pub fn local(file_id: i64) -> Self {
		Self {
			file_id,
			guid: None,
			kind: None,
		}
	}

	/// Cross-file reference.
	pub fn external(file_id: i64, guid: impl Into<String>, kind: i32) -> Self {
		Self {
			file_id,
			guid: Some(guid.into()),
			kind: Some(kind),
		}
	}

	/// Parse the first reference found in `text`.
	pub fn parse(text: &str) -> Option<Self> {
		first_ref(text)
	}

	/// Whether this is `{fileID: 0}`.
	pub fn is_null(&self) -> bool {
		self.file_id == 0
	}

	/// Whether the reference must resolve inside the same document.
	pub fn is_local(&self) -> bool {
		self.guid.is_none() && self.file_id != 0
	}
}

impl fmt::Display for FileRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{fileID: {}", self.file_id)?;
		if let Some(guid) = &self.guid {
			write!(f, ", guid: {guid}")?;
		}
		if let Some(kind) = self.kind {
			write!(f, ", type: {kind}")?;
		}
		f.write_str("}")
	}
}

fn from_captures(caps: &Captures<'_>) -> Option<FileRef> {
	let file_id = caps.get(1)?.as_str().parse().ok()?;
	let rest = caps.get(2).map_or("", |item| item.as_str());
	let guid = GUID_RE.captures(rest).and_then(|found| found.get(1)).map(|item| item.as_str().to_owned());
	let kind = TYPE_RE.captures(rest).and_then(|found| found.get(1)).and_then(|item| item.as_str().parse().ok());
	Some(FileRef { file_id, guid, kind })
}

pub(crate) fn first_ref(text: &str) -> Option<FileRef> {
	REF_RE.captures(text).as_ref().and_then(from_captures)
}

/// Every reference occurring in `text`, in order.
pub fn references(text: &str) -> Vec<FileRef> {
	REF_RE.captures_iter(text).filter_map(|caps| from_captures(&caps)).collect()
}

/// Rewrite the block anchor and every local reference found in `map`.
///
/// References carrying a `guid` point into another asset and are left untouched,
/// as are `fileID: 0` and ids outside the map.
pub fn remap(text: &str, map: &HashMap<i64, i64>) -> String {
	let anchored = ANCHOR_RE.replace(text, |caps: &Captures<'_>| {
		let old = &caps[2];
		match old.parse::<i64>().ok().and_then(|id| map.get(&id)) {
			Some(new_id) => format!("{}{}", &caps[1], new_id),
			None => caps[0].to_owned(),
		}
	});

	REF_RE
		.replace_all(&anchored, |caps: &Captures<'_>| {
			let whole = &caps[0];
			let rest = caps.get(2).map_or("", |item| item.as_str());
			if rest.contains("guid:") {
				return whole.to_owned();
			}
			let Some(id_match) = caps.get(1) else {
				return whole.to_owned();
			};
			let Some(new_id) = id_match.as_str().parse::<i64>().ok().filter(|id| *id != 0).and_then(|id| map.get(&id)) else {
				return whole.to_owned();
			};
			let offset = caps.get(0).map_or(0, |item| item.start());
			format!("{}{}{}", &whole[..id_match.start() - offset], new_id, &whole[id_match.end() - offset..])
		})
		.into_owned()
}

/// Replace every reference in `text`, local or external, with `{fileID: 0}`.
pub(crate) fn null_references(text: &str) -> String {
	REF_RE.replace_all(text, NoExpand("{fileID: 0}")).into_owned()
}

/// Replace the block's own anchor id.
pub fn rename_anchor(text: &str, new_id: i64) -> String {
	ANCHOR_RE.replace(text, |caps: &Captures<'_>| format!("{}{}", &caps[1], new_id)).into_owned()
}
