use std::sync::LazyLock;

use regex::Regex;

use crate::unity::block::BlockHeader;
use crate::unity::refs::null_references;
use crate::unity::text::{LineBuf, Sequence, continuation_end, indent_of, key_value};
use crate::unity::{FileRef, Result, UnityError};

static ARRAY_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(.+?)\.Array\.(?:data\[(\d+)\](?:\.(\w+))?|(size))$").expect("array path pattern is valid"));

/// Parsed Unity `propertyPath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyPath {
	/// Plain top-level field.
	Scalar(String),
	/// `parent.sub[.deeper...]` addressed inside an inline or nested mapping.
	Field {
		/// Top-level field.
		parent: String,
		/// Remaining keys, outermost first.
		keys: Vec<String>,
	},
	/// `parent.Array.data[N]`, optionally one mapping key inside the element.
	ArrayElement {
		/// Sequence field.
		parent: String,
		/// Element index.
		index: usize,
		/// Key inside a mapping element.
		key: Option<String>,
	},
	/// `parent.Array.size`.
	ArraySize {
		/// Sequence field.
		parent: String,
	},
}

impl PropertyPath {
	/// Parse one of the supported path grammars.
	pub fn parse(path: &str) -> Result<Self> {
		let path = path.trim();
		if path.is_empty() || path.starts_with('.') || path.ends_with('.') || path.contains("..") {
			return Err(UnityError::InvalidArgument {
				message: format!("malformed property path {path:?}"),
			});
		}

		if let Some(caps) = ARRAY_RE.captures(path) {
			let parent = caps[1].to_owned();
			if caps.get(4).is_some() {
				return Ok(Self::ArraySize { parent });
			}
			let index = caps[2].parse().map_err(|_| UnityError::InvalidArgument {
				message: format!("array index out of range in {path:?}"),
			})?;
			return Ok(Self::ArrayElement {
				parent,
				index,
				key: caps.get(3).map(|item| item.as_str().to_owned()),
			});
		}
		if path.contains(".Array.") {
			return Err(UnityError::InvalidArgument {
				message: format!("unsupported array property path {path:?}"),
			});
		}

		let mut parts = path.split('.').map(str::to_owned);
		let parent = parts.next().unwrap_or_default();
		let keys: Vec<String> = parts.collect();
		if keys.is_empty() {
			Ok(Self::Scalar(parent))
		} else {
			Ok(Self::Field { parent, keys })
		}
	}

	fn parent(&self) -> &str {
		match self {
			Self::Scalar(parent) | Self::Field { parent, .. } | Self::ArrayElement { parent, .. } | Self::ArraySize { parent } => parent,
		}
	}

	fn with_parent(self, name: String) -> Self {
		match self {
			Self::Scalar(_) => Self::Scalar(name),
			Self::Field { keys, .. } => Self::Field { parent: name, keys },
			Self::ArrayElement { index, key, .. } => Self::ArrayElement { parent: name, index, key },
			Self::ArraySize { .. } => Self::ArraySize { parent: name },
		}
	}
}

/// Value written for a modification: a non-null object reference wins over the plain value.
pub fn effective_value(value: &str, object_reference: Option<&FileRef>) -> String {
	match object_reference.filter(|found| !found.is_null()) {
		Some(found) => found.to_string(),
		None => value.to_owned(),
	}
}

/// Field name as stored in the block: `name` if present, else `m_name` if present, else `name`.
pub fn normalize_property(text: &str, name: &str) -> String {
	let buf = LineBuf::new(text);
	if buf.find_field(name).is_some() || name.starts_with("m_") {
		return name.to_owned();
	}
	let prefixed = format!("m_{name}");
	if buf.find_field(&prefixed).is_some() { prefixed } else { name.to_owned() }
}

/// Apply one property modification to a block's text.
///
/// Scalars missing from the block are appended; struct fields and array
/// elements must already exist.
pub fn apply_modification(text: &str, property_path: &str, value: &str, object_reference: Option<&FileRef>) -> Result<String> {
	let parsed = PropertyPath::parse(property_path)?;
	let name = normalize_property(text, parsed.parent());
	let parsed = parsed.with_parent(name);
	let value = effective_value(value, object_reference);
	let file_id = text.lines().next().and_then(BlockHeader::parse).map_or(0, |header| header.file_id);
	let not_found = || UnityError::PropertyNotFound {
		file_id,
		path: property_path.to_owned(),
	};

	let mut buf = LineBuf::new(text);
	match &parsed {
		PropertyPath::Scalar(key) => match buf.find_field(key) {
			Some(line) => {
				let end = buf.nested_end(line);
				buf.lines.drain(line + 1..end);
				buf.set_line_value(line, key, &value);
			}
			None => buf.append_field(key, &value),
		},
		PropertyPath::Field { parent, keys } => {
			let line = buf.find_field(parent).ok_or_else(not_found)?;
			if !set_nested(&mut buf, line, parent, keys, &value) {
				return Err(not_found());
			}
		}
		PropertyPath::ArrayElement { parent, index, key } => {
			let line = buf.find_field(parent).ok_or_else(not_found)?;
			let seq = buf.sequence(line);
			let Some(range) = seq.items.get(*index).cloned() else {
				return Err(UnityError::IndexOutOfRange {
					path: property_path.to_owned(),
					index: *index,
					len: seq.items.len(),
				});
			};
			let pad = " ".repeat(seq.item_indent);
			match key {
				None => {
					buf.lines.splice(range, [format!("{pad}- {value}")]);
				}
				Some(key) => {
					let hit = range.clone().find(|&idx| {
						let line = &buf.lines[idx];
						let content = if idx == range.start { line.trim_start().trim_start_matches("- ") } else { line.as_str() };
						key_value(content, key).is_some()
					});
					let Some(hit) = hit else {
						return Err(not_found());
					};
					let prefix = if hit == range.start { format!("{pad}- ") } else { " ".repeat(indent_of(&buf.lines[hit])) };
					let end = continuation_end(&buf.lines, hit).min(range.end);
					buf.lines.splice(hit..end, [format!("{prefix}{key}: {value}")]);
				}
			}
		}
		PropertyPath::ArraySize { parent } => {
			let line = buf.find_field(parent).ok_or_else(not_found)?;
			let size: usize = value.trim().parse().map_err(|_| UnityError::InvalidArgument {
				message: format!("array size {value:?} is not a non-negative integer"),
			})?;
			let seq = buf.sequence(line);
			resize_sequence(&mut buf, seq, parent, size);
		}
	}

	Ok(buf.render())
}

fn set_nested(buf: &mut LineBuf, line: usize, key: &str, keys: &[String], value: &str) -> bool {
	let Some((first, rest)) = keys.split_first() else {
		buf.set_line_value(line, key, value);
		return true;
	};

	let current = buf.folded_value(line, key).unwrap_or_default();
	if current.starts_with('{') {
		let Some(updated) = set_inline(&current, keys, value) else {
			return false;
		};
		buf.set_line_value(line, key, &updated);
		return true;
	}

	let end = buf.nested_end(line);
	let base = indent_of(&buf.lines[line]);
	let child = (line + 1..end).find(|&idx| indent_of(&buf.lines[idx]) > base && key_value(&buf.lines[idx], first).is_some());
	match child {
		Some(child) => set_nested(buf, child, first, rest, value),
		None => false,
	}
}

/// Replace `keys` inside an inline `{a: 1, b: {c: 2}}` mapping.
fn set_inline(map: &str, keys: &[String], value: &str) -> Option<String> {
	let (first, rest) = keys.split_first()?;
	let inner = map.trim().strip_prefix('{')?.strip_suffix('}')?;
	let mut entries = split_top_level(inner);
	let entry = entries.iter_mut().find(|entry| entry.split_once(':').is_some_and(|(name, _)| name.trim() == first.as_str()))?;
	let (name, current) = entry.split_once(':').map(|(name, current)| (name.trim().to_owned(), current.trim().to_owned()))?;
	let replacement = if rest.is_empty() { value.to_owned() } else { set_inline(&current, rest, value)? };
	*entry = format!("{name}: {replacement}");
	Some(format!("{{{}}}", entries.join(", ")))
}

fn split_top_level(inner: &str) -> Vec<String> {
	let mut out = Vec::new();
	let mut depth = 0_i32;
	let mut current = String::new();
	for ch in inner.chars() {
		match ch {
			'{' | '[' => depth += 1,
			'}' | ']' => depth -= 1,
			',' if depth == 0 => {
				out.push(current.trim().to_owned());
				current.clear();
				continue;
			}
			_ => {}
		}
		current.push(ch);
	}
	if !current.trim().is_empty() {
		out.push(current.trim().to_owned());
	}
	out
}

fn resize_sequence(buf: &mut LineBuf, seq: Sequence, key: &str, size: usize) {
	let len = seq.items.len();
	let pad = " ".repeat(seq.key_indent);
	if size == len {
		return;
	}
	if size < len {
		let start = seq.items[size].start;
		let end = seq.end_line();
		buf.lines.drain(start..end);
		if size == 0 {
			buf.lines[seq.key_line] = format!("{pad}{key}: []");
		}
		return;
	}

	// New items repeat the last one; references in it are nulled.
	let template: Vec<String> = match seq.items.last() {
		Some(last) => buf.lines[last.clone()].iter().map(|line| null_references(line)).collect(),
		None => vec![format!("{}- {}", " ".repeat(seq.item_indent), FileRef::NULL)],
	};
	let at = seq.end_line();
	if seq.inline_empty {
		buf.lines[seq.key_line] = format!("{pad}{key}:");
	}
	let added: Vec<String> = (len..size).flat_map(|_| template.iter().cloned()).collect();
	buf.lines.splice(at..at, added);
}
