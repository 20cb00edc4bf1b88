use std::collections::HashSet;

use log::debug;

use crate::unity::{Document, Result, UnityError};

/// Closed set of blocks belonging to one GameObject and its descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtree {
	/// GameObject the walk started from.
	pub root_game_object: i64,
	/// Its Transform, when it has one.
	pub root_transform: Option<i64>,
	/// `m_Father` of the root Transform (`0` at scene root).
	pub father: i64,
	/// Collected ids in discovery order.
	pub ids: Vec<i64>,
}

impl Subtree {
	/// Whether `id` belongs to the subtree.
	pub fn contains(&self, id: i64) -> bool {
		self.ids.contains(&id)
	}

	/// Collected ids as a set.
	pub fn id_set(&self) -> HashSet<i64> {
		self.ids.iter().copied().collect()
	}
}

enum Visit {
	GameObject(i64),
	Transform(i64),
	PrefabInstance(i64),
}

struct Walker<'a> {
	doc: &'a Document,
	seen: HashSet<i64>,
	ids: Vec<i64>,
	queue: Vec<Visit>,
}

impl Walker<'_> {
	fn take(&mut self, id: i64) -> bool {
		if id == 0 || self.doc.get(id).is_none() || !self.seen.insert(id) {
			return false;
		}
		self.ids.push(id);
		true
	}

	fn run(&mut self) {
		while let Some(visit) = self.queue.pop() {
			match visit {
				Visit::GameObject(id) => self.game_object(id),
				Visit::Transform(id) => self.transform(id),
				Visit::PrefabInstance(id) => self.prefab_instance(id),
			}
		}
	}

	fn game_object(&mut self, id: i64) {
		if !self.take(id) {
			return;
		}
		let doc = self.doc;
		let Some(owner) = doc.get(id) else {
			return;
		};
		let components = owner.component_ids();
		for component in &components {
			self.take(*component);
		}
		// Children are queued in reverse so the stack pops them in list order.
		let children: Vec<i64> = components
			.iter()
			.filter_map(|component| doc.get(*component))
			.filter(|block| block.is_transform())
			.flat_map(|block| block.children_ids())
			.collect();
		for child in children.into_iter().rev() {
			self.queue.push(Visit::Transform(child));
		}
	}

	fn transform(&mut self, id: i64) {
		let doc = self.doc;
		let Some(block) = doc.get(id) else {
			debug!("m_Children entry {id} has no block; skipped");
			return;
		};
		if block.stripped {
			self.queue.push(Visit::PrefabInstance(block.prefab_instance_id()));
			return;
		}
		let owner = block.game_object_id();
		if doc.get(owner).is_some_and(|item| item.is_game_object()) {
			self.queue.push(Visit::GameObject(owner));
		} else {
			self.take(id);
		}
	}

	/// Nested prefab instance: its block, its placeholders and whatever the scene added onto them.
	fn prefab_instance(&mut self, id: i64) {
		if !self.take(id) {
			return;
		}
		let doc = self.doc;
		let stripped: Vec<i64> = doc
			.blocks()
			.iter()
			.filter(|block| block.stripped && block.prefab_instance_id() == id)
			.map(|block| block.file_id)
			.collect();
		for placeholder in &stripped {
			self.take(*placeholder);
		}
		for block in doc.blocks() {
			if block.stripped {
				continue;
			}
			if block.is_game_object() {
				continue;
			}
			if block.is_transform() && stripped.contains(&block.father_id()) {
				self.queue.push(Visit::GameObject(block.game_object_id()));
			} else if stripped.contains(&block.game_object_id()) {
				self.take(block.file_id);
			}
		}
	}
}

/// Collect a GameObject, its components and every descendant reachable through `m_Children`.
pub fn collect(doc: &Document, game_object: i64) -> Result<Subtree> {
	let root = doc
		.get(game_object)
		.filter(|block| block.is_game_object() && !block.stripped)
		.ok_or_else(|| UnityError::GameObjectNotFound {
			selector: game_object.to_string(),
		})?;

	let root_transform = doc.transform_of(root.file_id).map(|block| block.file_id);
	let father = root_transform.and_then(|id| doc.get(id)).map_or(0, |block| block.father_id());

	let mut walker = Walker {
		doc,
		seen: HashSet::new(),
		ids: Vec::new(),
		queue: vec![Visit::GameObject(game_object)],
	};
	walker.run();

	Ok(Subtree {
		root_game_object: game_object,
		root_transform,
		father,
		ids: walker.ids,
	})
}

#[cfg(test)]
mod tests;
