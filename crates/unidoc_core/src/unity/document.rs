use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::unity::block::BLOCK_MARKER;
use crate::unity::{Block, Result, UnityError, class};

/// Standard preamble of every Unity text-serialized asset.
pub const UNITY_PREAMBLE: &str = "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n";

/// Read a Unity file and normalize line endings to LF.
pub fn read_unity_file(path: impl AsRef<Path>) -> Result<String> {
	let path = path.as_ref();
	if !path.exists() {
		return Err(UnityError::FileNotFound {
			path: path.display().to_string(),
		});
	}
	let content = fs::read_to_string(path)?;
	if content.contains('\r') {
		Ok(content.replace("\r\n", "\n"))
	} else {
		Ok(content)
	}
}

/// Lookup key for GameObjects and Transforms given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
	/// Numeric fileId.
	Id(i64),
	/// Exact `m_Name`.
	Name(String),
}

impl Selector {
	/// Integers select by fileId, anything else by name.
	pub fn parse(value: &str) -> Self {
		match value.trim().parse::<i64>() {
			Ok(id) => Self::Id(id),
			Err(_) => Self::Name(value.to_owned()),
		}
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Id(id) => write!(f, "{id}"),
			Self::Name(name) => f.write_str(name),
		}
	}
}

/// Ordered blocks of one scene, prefab or asset file plus its verbatim preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
	/// Text before the first block marker.
	pub preamble: String,
	blocks: Vec<Block>,
}

impl Document {
	/// Document with the standard preamble and no blocks.
	pub fn empty() -> Self {
		Self {
			preamble: UNITY_PREAMBLE.to_owned(),
			blocks: Vec::new(),
		}
	}

	/// Split raw text on block markers; the marker stays with its block.
	pub fn parse(text: &str) -> Result<Self> {
		let starts: Vec<usize> = text
			.match_indices(BLOCK_MARKER)
			.map(|(pos, _)| pos)
			.filter(|&pos| pos == 0 || text.as_bytes()[pos - 1] == b'\n')
			.collect();

		let Some(&first) = starts.first() else {
			return Ok(Self {
				preamble: text.to_owned(),
				blocks: Vec::new(),
			});
		};

		let mut blocks = Vec::with_capacity(starts.len());
		for (idx, &start) in starts.iter().enumerate() {
			let end = starts.get(idx + 1).copied().unwrap_or(text.len());
			let block = Block::parse(&text[start..end]).map_err(|err| match err {
				UnityError::MalformedHeader { text: header, .. } => UnityError::MalformedHeader {
					line: text[..start].matches('\n').count() + 1,
					text: header,
				},
				other => other,
			})?;
			blocks.push(block);
		}

		Ok(Self {
			preamble: text[..first].to_owned(),
			blocks,
		})
	}

	/// Concatenate preamble and block texts.
	pub fn render(&self) -> String {
		let mut out = String::with_capacity(self.preamble.len() + self.blocks.iter().map(|block| block.text().len()).sum::<usize>());
		out.push_str(&self.preamble);
		for block in &self.blocks {
			out.push_str(block.text());
		}
		out
	}

	/// Blocks in file order.
	pub fn blocks(&self) -> &[Block] {
		&self.blocks
	}

	/// Number of blocks.
	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	/// Whether the document holds no blocks.
	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}

	/// Every fileId in the document.
	pub fn ids(&self) -> HashSet<i64> {
		self.blocks.iter().map(|block| block.file_id).collect()
	}

	/// Index of the block carrying `file_id`.
	pub fn position(&self, file_id: i64) -> Option<usize> {
		self.blocks.iter().position(|block| block.file_id == file_id)
	}

	/// Block carrying `file_id`.
	pub fn get(&self, file_id: i64) -> Option<&Block> {
		self.blocks.iter().find(|block| block.file_id == file_id)
	}

	/// Mutable block carrying `file_id`.
	pub fn get_mut(&mut self, file_id: i64) -> Option<&mut Block> {
		self.blocks.iter_mut().find(|block| block.file_id == file_id)
	}

	/// Block carrying `file_id`, or `ObjectNotFound`.
	pub fn require(&self, file_id: i64) -> Result<&Block> {
		self.get(file_id).ok_or(UnityError::ObjectNotFound { file_id })
	}

	/// Mutable block carrying `file_id`, or `ObjectNotFound`.
	pub fn require_mut(&mut self, file_id: i64) -> Result<&mut Block> {
		self.get_mut(file_id).ok_or(UnityError::ObjectNotFound { file_id })
	}

	/// Block with class `class_id` and id `file_id`.
	pub fn find(&self, class_id: u32, file_id: i64) -> Option<&Block> {
		self.blocks.iter().find(|block| block.class_id == class_id && block.file_id == file_id)
	}

	/// First block of class `class_id` whose `m_Name` equals `name`.
	pub fn find_by_name(&self, class_id: u32, name: &str) -> Option<&Block> {
		self.blocks
			.iter()
			.find(|block| block.class_id == class_id && block.name().as_deref() == Some(name))
	}

	/// Whether any GameObject is named `name`.
	pub fn has_game_object_named(&self, name: &str) -> bool {
		self.find_by_name(class::GAME_OBJECT, name).is_some()
	}

	/// Resolve a non-stripped GameObject by fileId or name.
	pub fn resolve_game_object(&self, selector: &Selector) -> Result<&Block> {
		let found = match selector {
			Selector::Id(id) => self.find(class::GAME_OBJECT, *id),
			Selector::Name(name) => self.find_by_name(class::GAME_OBJECT, name),
		};
		found.filter(|block| !block.stripped).ok_or_else(|| UnityError::GameObjectNotFound {
			selector: selector.to_string(),
		})
	}

	/// Transform or RectTransform listed among a GameObject's components.
	pub fn transform_of(&self, game_object: i64) -> Option<&Block> {
		let owner = self.get(game_object)?;
		owner
			.component_ids()
			.into_iter()
			.filter_map(|id| self.get(id))
			.find(|block| block.is_transform())
	}

	/// Transform id of a GameObject, or `TransformNotFound`.
	pub fn require_transform_of(&self, game_object: i64) -> Result<i64> {
		self.transform_of(game_object)
			.map(|block| block.file_id)
			.ok_or(UnityError::TransformNotFound { game_object })
	}

	/// Resolve a Transform given a Transform id, a GameObject id or a GameObject name.
	pub fn resolve_transform(&self, selector: &Selector) -> Option<i64> {
		if let Selector::Id(id) = selector {
			if let Some(block) = self.get(*id).filter(|block| block.is_transform()) {
				return Some(block.file_id);
			}
		}
		let owner = self.resolve_game_object(selector).ok()?;
		self.transform_of(owner.file_id).map(|block| block.file_id)
	}

	/// The `SceneRoots` block id, when the scene carries one.
	pub fn scene_roots_id(&self) -> Option<i64> {
		self.blocks.iter().find(|block| block.class_id == class::SCENE_ROOTS).map(|block| block.file_id)
	}

	/// Append a block at the end.
	pub fn push(&mut self, block: Block) {
		let at = self.blocks.len();
		self.insert(at, block);
	}

	/// Insert a block at `index`, keeping every block newline-terminated.
	pub fn insert(&mut self, index: usize, mut block: Block) {
		if index > 0 {
			if let Some(prev) = self.blocks.get_mut(index - 1) {
				prev.ensure_trailing_newline();
			}
		}
		if index < self.blocks.len() {
			block.ensure_trailing_newline();
		}
		self.blocks.insert(index, block);
	}

	/// Remove and return the block carrying `file_id`.
	pub fn remove(&mut self, file_id: i64) -> Option<Block> {
		let idx = self.position(file_id)?;
		Some(self.blocks.remove(idx))
	}

	/// Remove every block whose id is in `ids`; returns how many were removed.
	pub fn remove_all(&mut self, ids: &HashSet<i64>) -> usize {
		let before = self.blocks.len();
		self.blocks.retain(|block| !ids.contains(&block.file_id));
		before - self.blocks.len()
	}

	/// Apply a text transformation to every block.
	pub fn rewrite_blocks(&mut self, mut rewrite: impl FnMut(&Block) -> Option<String>) -> Result<()> {
		for block in &mut self.blocks {
			if let Some(text) = rewrite(block) {
				if text != block.text() {
					block.set_text(text)?;
				}
			}
		}
		Ok(())
	}
}
