use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::unity::class;
use crate::unity::refs::first_ref;
use crate::unity::text::{FIELD_INDENT, LineBuf, continuation_end, fold_lines, indent_of, key_value, unquote};
use crate::unity::{FileRef, Result, UnityError};

/// Marker opening every object block.
pub const BLOCK_MARKER: &str = "--- !u!";

static HEADER_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^--- !u!(\d+) &(-?\d+)( stripped)?[ \t]*$").expect("header pattern is valid"));

/// Parsed `--- !u!<classId> &<fileId>[ stripped]` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
	/// Unity class id.
	pub class_id: u32,
	/// Document-unique object id.
	pub file_id: i64,
	/// Placeholder for an object living inside a referenced prefab.
	pub stripped: bool,
}

impl BlockHeader {
	/// Parse a single header line.
	pub fn parse(line: &str) -> Option<Self> {
		let caps = HEADER_RE.captures(line.trim_end_matches('\r'))?;
		Some(Self {
			class_id: caps.get(1)?.as_str().parse().ok()?,
			file_id: caps.get(2)?.as_str().parse().ok()?,
			stripped: caps.get(3).is_some(),
		})
	}

	/// Render the header line without trailing newline.
	pub fn render(&self) -> String {
		let suffix = if self.stripped { " stripped" } else { "" };
		format!("{BLOCK_MARKER}{} &{}{}", self.class_id, self.file_id, suffix)
	}
}

/// One serialized object: header metadata plus its untouched source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
	/// Unity class id.
	pub class_id: u32,
	/// Document-unique object id.
	pub file_id: i64,
	/// Placeholder for an object living inside a referenced prefab.
	pub stripped: bool,
	/// Type line below the header (`GameObject`, `Transform`, ...).
	pub type_name: String,
	text: String,
}

impl Block {
	/// Parse block text starting at its `--- !u!` line.
	pub fn parse(text: impl Into<String>) -> Result<Self> {
		let text = text.into();
		let mut lines = text.lines();
		let first = lines.next().unwrap_or_default();
		let header = BlockHeader::parse(first).ok_or_else(|| UnityError::MalformedHeader {
			line: 1,
			text: first.to_owned(),
		})?;
		let type_name = lines.next().map(|line| line.trim().trim_end_matches(':').to_owned()).unwrap_or_default();

		Ok(Self {
			class_id: header.class_id,
			file_id: header.file_id,
			stripped: header.stripped,
			type_name,
			text,
		})
	}

	/// Raw block text including its header line.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Replace the block text, re-reading header metadata from it.
	pub fn set_text(&mut self, text: String) -> Result<()> {
		*self = Self::parse(text)?;
		Ok(())
	}

	pub(crate) fn ensure_trailing_newline(&mut self) {
		if !self.text.ends_with('\n') {
			self.text.push('\n');
		}
	}

	/// Header metadata.
	pub fn header(&self) -> BlockHeader {
		BlockHeader {
			class_id: self.class_id,
			file_id: self.file_id,
			stripped: self.stripped,
		}
	}

	/// Whether this block is a GameObject.
	pub fn is_game_object(&self) -> bool {
		self.class_id == class::GAME_OBJECT
	}

	/// Whether this block is a Transform or RectTransform.
	pub fn is_transform(&self) -> bool {
		class::is_transform(self.class_id)
	}

	/// Raw value of a top-level field, or of the first nested one when no top-level field exists.
	///
	/// Scalars folded over several lines come back joined.
	pub fn field(&self, key: &str) -> Option<Cow<'_, str>> {
		let lines: Vec<&str> = self.text.lines().collect();
		let found = (1..lines.len())
			.find(|&idx| indent_of(lines[idx]) == FIELD_INDENT && key_value(lines[idx], key).is_some())
			.or_else(|| (1..lines.len()).find(|&idx| key_value(lines[idx], key).is_some()))?;
		let value = key_value(lines[found], key)?;
		let end = continuation_end(&lines, found);
		if end == found + 1 {
			Some(Cow::Borrowed(value))
		} else {
			Some(Cow::Owned(fold_lines(value, lines[found + 1..end].iter().copied())))
		}
	}

	/// Whether the block has `key:` anywhere below the header.
	pub fn has_field(&self, key: &str) -> bool {
		self.field(key).is_some()
	}

	/// Reference stored under `key`.
	pub fn field_ref(&self, key: &str) -> Option<FileRef> {
		self.field(key).and_then(|value| first_ref(&value))
	}

	/// Local fileId stored under `key`; `0` for null or absent references.
	pub fn field_id(&self, key: &str) -> i64 {
		self.field_ref(key).filter(|found| found.guid.is_none()).map_or(0, |found| found.file_id)
	}

	/// Unquoted `m_Name`.
	pub fn name(&self) -> Option<String> {
		self.field("m_Name").map(|value| unquote(&value))
	}

	/// `m_GameObject` back-reference of a component.
	pub fn game_object_id(&self) -> i64 {
		self.field_id("m_GameObject")
	}

	/// `m_Father` of a Transform; `0` at the root.
	pub fn father_id(&self) -> i64 {
		self.field_id("m_Father")
	}

	/// `m_PrefabInstance` owning a stripped placeholder.
	pub fn prefab_instance_id(&self) -> i64 {
		self.field_id("m_PrefabInstance")
	}

	/// `m_Children` of a Transform.
	pub fn children_ids(&self) -> Vec<i64> {
		LineBuf::new(&self.text).sequence_ids("m_Children")
	}

	/// `m_Component` list of a GameObject.
	pub fn component_ids(&self) -> Vec<i64> {
		LineBuf::new(&self.text).sequence_ids("m_Component")
	}

	/// fileIds listed in the sequence under `key`.
	pub fn sequence_ids(&self, key: &str) -> Vec<i64> {
		LineBuf::new(&self.text).sequence_ids(key)
	}

	/// Overwrite an existing field value; returns whether the field was present.
	pub fn set_field(&mut self, key: &str, value: &str) -> bool {
		let mut buf = LineBuf::new(&self.text);
		let Some(line) = buf.find_field(key) else {
			return false;
		};
		buf.set_line_value(line, key, value);
		self.text = buf.render();
		true
	}

	/// Point a reference field at a local fileId.
	pub fn set_field_ref(&mut self, key: &str, file_id: i64) -> bool {
		self.set_field(key, &FileRef::local(file_id).to_string())
	}

	/// Add `- {fileID: id}` to the sequence under `key`, optionally right after `after`.
	pub fn add_sequence_ref(&mut self, key: &str, id: i64, after: Option<i64>) -> bool {
		self.edit_lines(|buf| buf.insert_item(key, &FileRef::local(id).to_string(), after))
	}

	/// Remove every `{fileID: id}` item from the sequence under `key`.
	pub fn remove_sequence_ref(&mut self, key: &str, id: i64) -> usize {
		self.edit_lines(|buf| buf.remove_items(key, id))
	}

	/// Append a child Transform id to `m_Children`.
	pub fn add_child(&mut self, child: i64, after: Option<i64>) -> bool {
		self.add_sequence_ref("m_Children", child, after)
	}

	/// Remove a child Transform id from `m_Children`.
	pub fn remove_child(&mut self, child: i64) -> usize {
		self.remove_sequence_ref("m_Children", child)
	}

	/// Append `- component: {fileID: id}` to a GameObject.
	pub fn add_component(&mut self, component: i64) -> bool {
		let item = format!("component: {}", FileRef::local(component));
		self.edit_lines(|buf| buf.insert_item("m_Component", &item, None))
	}

	/// Remove a component entry from a GameObject.
	pub fn remove_component(&mut self, component: i64) -> usize {
		self.remove_sequence_ref("m_Component", component)
	}

	fn edit_lines<T>(&mut self, edit: impl FnOnce(&mut LineBuf) -> T) -> T {
		let mut buf = LineBuf::new(&self.text);
		let out = edit(&mut buf);
		self.text = buf.render();
		out
	}
}
