use std::ops::Range;

use crate::unity::refs::first_ref;

/// Indentation of top-level fields inside a block body.
pub(crate) const FIELD_INDENT: usize = 2;

/// Count of leading spaces.
pub(crate) fn indent_of(line: &str) -> usize {
	line.len() - line.trim_start_matches(' ').len()
}

/// Value part of a `key: value` line, trimmed at the end.
pub(crate) fn key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
	let rest = line.trim_start_matches(' ').strip_prefix(key)?.strip_prefix(':')?;
	if rest.is_empty() {
		return Some("");
	}
	rest.strip_prefix(' ').or_else(|| rest.strip_prefix('\t')).map(str::trim_end)
}

/// Column where the key of `line` starts, past any `- ` item markers.
fn key_column(line: &str) -> usize {
	let mut column = indent_of(line);
	let mut rest = &line[column..];
	while let Some(after) = rest.strip_prefix("- ") {
		let pad = after.len() - after.trim_start_matches(' ').len();
		column += 2 + pad;
		rest = &after[pad..];
	}
	column
}

/// Exclusive end of the lines holding the value that starts on `line`.
///
/// A non-empty value followed by deeper-indented lines is a scalar Unity folded
/// over several lines; an empty value opens a nested collection and has no
/// continuation.
pub(crate) fn continuation_end<S: AsRef<str>>(lines: &[S], line: usize) -> usize {
	let raw = lines[line].as_ref();
	let column = key_column(raw);
	let content = raw[column..].trim_end();
	let opens_collection = content.is_empty() || (content.ends_with(':') && !content.contains(": "));
	if opens_collection {
		return line + 1;
	}
	let mut end = line + 1;
	let mut idx = line + 1;
	while idx < lines.len() {
		let next = lines[idx].as_ref();
		idx += 1;
		if next.trim().is_empty() {
			continue;
		}
		if indent_of(next) <= column {
			break;
		}
		end = idx;
	}
	end
}

/// Join a folded scalar: line breaks read as spaces, blank lines as newlines.
pub(crate) fn fold_lines<'a>(first: &str, continuation: impl IntoIterator<Item = &'a str>) -> String {
	let mut out = first.trim_end().to_owned();
	let mut after_blank = false;
	for line in continuation {
		let line = line.trim();
		if line.is_empty() {
			out.push('\n');
			after_blank = true;
			continue;
		}
		if !after_blank {
			out.push(' ');
		}
		after_blank = false;
		out.push_str(line);
	}
	out
}

/// Remove one layer of YAML single or double quotes.
pub(crate) fn unquote(value: &str) -> String {
	let value = value.trim();
	if value.len() >= 2 {
		if let Some(inner) = value.strip_prefix('\'').and_then(|item| item.strip_suffix('\'')) {
			return inner.replace("''", "'");
		}
		if let Some(inner) = value.strip_prefix('"').and_then(|item| item.strip_suffix('"')) {
			return inner.replace("\\\"", "\"").replace("\\\\", "\\");
		}
	}
	value.to_owned()
}

/// Render a string as a YAML plain scalar, single-quoting when a plain scalar would be misread.
pub fn yaml_scalar(value: &str) -> String {
	const LEADING: &[char] = &['{', '[', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`', '#', '-', '?', ',', ']', '}'];
	let needs_quotes = value.is_empty()
		|| value.starts_with(LEADING)
		|| value.starts_with(' ')
		|| value.ends_with(' ')
		|| value.ends_with(':')
		|| value.contains(": ")
		|| value.contains(" #")
		|| value.contains('\n');
	if needs_quotes && !value.is_empty() {
		format!("'{}'", value.replace('\'', "''"))
	} else {
		value.to_owned()
	}
}

/// Located block-sequence under a `key:` line.
#[derive(Debug, Clone)]
pub(crate) struct Sequence {
	pub key_line: usize,
	pub key_indent: usize,
	pub inline_empty: bool,
	pub item_indent: usize,
	/// Line ranges of each `- ` item including continuation lines.
	pub items: Vec<Range<usize>>,
}

impl Sequence {
	/// Line after which a new item is inserted.
	pub fn end_line(&self) -> usize {
		self.items.last().map(|item| item.end).unwrap_or(self.key_line + 1)
	}
}

/// Owned line buffer used for scoped edits of one block.
#[derive(Debug, Clone)]
pub(crate) struct LineBuf {
	pub lines: Vec<String>,
	trailing_newline: bool,
}

impl LineBuf {
	pub fn new(text: &str) -> Self {
		let trailing_newline = text.ends_with('\n');
		let body = text.strip_suffix('\n').unwrap_or(text);
		Self {
			lines: body.split('\n').map(str::to_owned).collect(),
			trailing_newline,
		}
	}

	pub fn render(&self) -> String {
		let mut out = self.lines.join("\n");
		if self.trailing_newline {
			out.push('\n');
		}
		out
	}

	/// First line at or after `from` holding `key:`; `indent` restricts the match depth.
	pub fn find_key(&self, key: &str, from: usize, indent: Option<usize>) -> Option<usize> {
		(from..self.lines.len()).find(|&idx| {
			let line = &self.lines[idx];
			key_value(line, key).is_some() && indent.is_none_or(|want| indent_of(line) == want)
		})
	}

	/// Top-level key first, any depth as fallback.
	pub fn find_field(&self, key: &str) -> Option<usize> {
		self.find_key(key, 1, Some(FIELD_INDENT)).or_else(|| self.find_key(key, 1, None))
	}

	/// Last line belonging to the mapping or sequence opened at `line` (exclusive end).
	pub fn nested_end(&self, line: usize) -> usize {
		let base = indent_of(&self.lines[line]);
		let mut end = line + 1;
		while end < self.lines.len() {
			let next = &self.lines[end];
			let next_indent = indent_of(next);
			let is_item = next[next_indent..].starts_with("- ") || &next[next_indent..] == "-";
			if next_indent > base || (is_item && next_indent == base) {
				end += 1;
			} else {
				break;
			}
		}
		end
	}

	pub fn sequence(&self, key_line: usize) -> Sequence {
		let key_indent = indent_of(&self.lines[key_line]);
		let inline_empty = self.lines[key_line].trim_end().ends_with("[]");
		let mut items: Vec<Range<usize>> = Vec::new();
		let mut item_indent = key_indent;
		if !inline_empty {
			let mut idx = key_line + 1;
			while idx < self.lines.len() {
				let line = &self.lines[idx];
				let indent = indent_of(line);
				let trimmed = &line[indent..];
				if indent >= key_indent && (trimmed.starts_with("- ") || trimmed == "-") {
					if items.is_empty() {
						item_indent = indent;
					} else if indent != item_indent {
						break;
					}
					items.push(idx..idx + 1);
				} else if indent > item_indent && !items.is_empty() {
					if let Some(last) = items.last_mut() {
						last.end = idx + 1;
					}
				} else {
					break;
				}
				idx += 1;
			}
		}
		Sequence {
			key_line,
			key_indent,
			inline_empty,
			item_indent,
			items,
		}
	}

	/// fileIDs of every item in the sequence under `key`.
	pub fn sequence_ids(&self, key: &str) -> Vec<i64> {
		let Some(key_line) = self.find_field(key) else {
			return Vec::new();
		};
		self.sequence(key_line)
			.items
			.iter()
			.filter_map(|item| first_ref(&self.lines[item.start]).map(|found| found.file_id))
			.collect()
	}

	/// Append `- item` to the sequence under `key`; `after` places it right after the item referencing that id.
	pub fn insert_item(&mut self, key: &str, item: &str, after: Option<i64>) -> bool {
		let Some(key_line) = self.find_field(key) else {
			return false;
		};
		let seq = self.sequence(key_line);
		if seq.inline_empty {
			self.lines[key_line] = format!("{}{}:", " ".repeat(seq.key_indent), key);
			self.lines.insert(key_line + 1, format!("{}- {}", " ".repeat(seq.key_indent), item));
			return true;
		}

		let at = after
			.and_then(|id| {
				seq.items
					.iter()
					.find(|range| first_ref(&self.lines[range.start]).is_some_and(|found| found.file_id == id))
					.map(|range| range.end)
			})
			.unwrap_or_else(|| seq.end_line());
		self.lines.insert(at, format!("{}- {}", " ".repeat(seq.item_indent), item));
		true
	}

	/// Remove every item of `key` whose first reference is `id`; collapses to `[]` when empty.
	pub fn remove_items(&mut self, key: &str, id: i64) -> usize {
		let Some(key_line) = self.find_field(key) else {
			return 0;
		};
		let seq = self.sequence(key_line);
		let doomed: Vec<Range<usize>> = seq
			.items
			.iter()
			.filter(|range| first_ref(&self.lines[range.start]).is_some_and(|found| found.file_id == id))
			.cloned()
			.collect();
		for range in doomed.iter().rev() {
			self.lines.drain(range.clone());
		}
		if !doomed.is_empty() && doomed.len() == seq.items.len() {
			self.lines[key_line] = format!("{}{}: []", " ".repeat(seq.key_indent), key);
		}
		doomed.len()
	}

	/// Value of `key:` on `line`, with folded continuation lines joined.
	pub fn folded_value(&self, line: usize, key: &str) -> Option<String> {
		let first = key_value(&self.lines[line], key)?;
		let end = continuation_end(&self.lines, line);
		Some(fold_lines(first, self.lines[line + 1..end].iter().map(String::as_str)))
	}

	/// Replace the value of an existing `key:` line, keeping its indentation.
	///
	/// Continuation lines of the old value are dropped; newlines in `value`
	/// are written back as folded lines.
	pub fn set_line_value(&mut self, line: usize, key: &str, value: &str) {
		let end = continuation_end(&self.lines, line);
		let indent = indent_of(&self.lines[line]);
		let mut segments = value.split('\n');
		let first = segments.next().unwrap_or_default();
		let mut replacement = vec![if first.is_empty() {
			format!("{}{}: ", " ".repeat(indent), key)
		} else {
			format!("{}{}: {}", " ".repeat(indent), key, first)
		}];
		for segment in segments {
			replacement.push(String::new());
			if !segment.is_empty() {
				replacement.push(format!("{}{}", " ".repeat(indent + 2), segment));
			}
		}
		self.lines.splice(line..end, replacement);
	}

	/// Append a top-level `key: value` line at the end of the block.
	pub fn append_field(&mut self, key: &str, value: &str) {
		while self.lines.last().is_some_and(|line| line.trim().is_empty()) && self.lines.len() > 2 {
			self.lines.pop();
		}
		self.lines.push(format!("{}{}: {}", " ".repeat(FIELD_INDENT), key, value));
	}
}

#[cfg(test)]
mod tests;
