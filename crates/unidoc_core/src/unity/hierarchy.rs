use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::unity::text::yaml_scalar;
use crate::unity::{Block, Document, IdAllocator, Result, Selector, UnityError, class, collect, remap, templates};

/// Result of [`create_game_object`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
	/// New GameObject id.
	pub game_object: i64,
	/// New Transform id.
	pub transform: i64,
	/// Father Transform (`0` at scene root).
	pub father: i64,
}

/// Result of [`delete_game_object`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
	/// Deleted GameObject id.
	pub game_object: i64,
	/// Every removed block id, in discovery order.
	pub removed: Vec<i64>,
}

/// Result of [`duplicate_game_object`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateOutcome {
	/// Original GameObject id.
	pub source: i64,
	/// Cloned root GameObject id.
	pub game_object: i64,
	/// Cloned root Transform id.
	pub transform: Option<i64>,
	/// Name written to the clone.
	pub name: String,
	/// Father shared by original and clone.
	pub father: i64,
	/// Every new block id.
	pub created: Vec<i64>,
}

/// Result of [`reparent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReparentOutcome {
	/// Moved Transform id.
	pub transform: i64,
	/// Previous father (`0` at scene root).
	pub old_father: i64,
	/// New father (`0` at scene root).
	pub new_father: i64,
}

/// Fail unless `father` can list a new child.
///
/// The scene root and stripped prefab-instance Transforms always can; the
/// latter keep their children in the source prefab.
pub(crate) fn check_attachable(doc: &Document, father: i64) -> Result<()> {
	if father == 0 {
		return Ok(());
	}
	let block = doc.require(father)?;
	if block.stripped || block.has_field("m_Children") {
		Ok(())
	} else {
		Err(UnityError::InvalidArgument {
			message: format!("transform {father} has no m_Children list"),
		})
	}
}

/// Register `child` under `father`, or in `SceneRoots` when `father` is `0`.
pub(crate) fn attach(doc: &mut Document, father: i64, child: i64, after: Option<i64>) -> Result<()> {
	check_attachable(doc, father)?;
	if father == 0 {
		if let Some(roots) = doc.scene_roots_id() {
			doc.require_mut(roots)?.add_sequence_ref("m_Roots", child, after);
		}
		return Ok(());
	}
	let block = doc.require_mut(father)?;
	if block.stripped {
		debug!("{child} sits under prefab placeholder {father}; nothing to list");
		return Ok(());
	}
	block.add_child(child, after);
	Ok(())
}

/// Drop `child` from its father's `m_Children`, or from `SceneRoots` at the root.
pub(crate) fn detach(doc: &mut Document, father: i64, child: i64) {
	let holder = if father == 0 { doc.scene_roots_id() } else { Some(father) };
	let key = if father == 0 { "m_Roots" } else { "m_Children" };
	if let Some(block) = holder.and_then(|id| doc.get_mut(id)) {
		let removed = block.remove_sequence_ref(key, child);
		debug!("detached {child} from {} ({removed} entries)", block.file_id);
	}
}

/// Point every remaining local reference to a removed id at `{fileID: 0}`.
pub(crate) fn null_references(doc: &mut Document, removed: &HashSet<i64>) -> Result<()> {
	let map: HashMap<i64, i64> = removed.iter().map(|id| (*id, 0)).collect();
	doc.rewrite_blocks(|block| Some(remap(block.text(), &map)))
}

/// Add a GameObject with an identity Transform, at the scene root or under `parent`.
pub fn create_game_object(doc: &mut Document, name: &str, parent: Option<&Selector>) -> Result<CreateOutcome> {
	if name.trim().is_empty() {
		return Err(UnityError::EmptyName);
	}
	let father = match parent {
		Some(selector) => doc.resolve_transform(selector).ok_or_else(|| UnityError::ParentNotFound {
			selector: selector.to_string(),
		})?,
		None => 0,
	};
	check_attachable(doc, father)?;
	let rect = father != 0 && doc.get(father).is_some_and(|block| block.class_id == class::RECT_TRANSFORM);

	let mut ids = IdAllocator::for_document(doc);
	let game_object = ids.next();
	let transform = ids.next();
	doc.push(Block::parse(templates::game_object(game_object, name, &[transform]))?);
	doc.push(Block::parse(templates::transform(transform, game_object, father, rect))?);
	attach(doc, father, transform, None)?;

	info!("created {name:?} as {game_object} (transform {transform}, father {father})");
	Ok(CreateOutcome {
		game_object,
		transform,
		father,
	})
}

/// Remove a GameObject with its components and every descendant.
pub fn delete_game_object(doc: &mut Document, selector: &Selector) -> Result<DeleteOutcome> {
	let game_object = doc.resolve_game_object(selector)?.file_id;
	let subtree = collect(doc, game_object)?;
	if let Some(transform) = subtree.root_transform {
		detach(doc, subtree.father, transform);
	}

	let removed = subtree.id_set();
	doc.remove_all(&removed);
	null_references(doc, &removed)?;

	info!("deleted {game_object} ({} blocks)", removed.len());
	Ok(DeleteOutcome {
		game_object,
		removed: subtree.ids,
	})
}

/// `"<base> (n)"` with the smallest `n` no GameObject uses yet.
fn copy_name(doc: &Document, name: &str) -> String {
	let base = name
		.strip_suffix(')')
		.and_then(|rest| rest.rsplit_once(" ("))
		.filter(|(_, digits)| !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit()))
		.map_or(name, |(base, _)| base);
	(1..)
		.map(|n| format!("{base} ({n})"))
		.find(|candidate| !doc.has_game_object_named(candidate))
		.unwrap_or_else(|| format!("{base} (1)"))
}

/// Clone a GameObject subtree under fresh ids and register it next to the original.
pub fn duplicate_game_object(doc: &mut Document, selector: &Selector, new_name: Option<&str>) -> Result<DuplicateOutcome> {
	let source = doc.resolve_game_object(selector)?;
	let source_id = source.file_id;
	let source_name = source.name().unwrap_or_default();
	let name = match new_name {
		Some(name) if name.trim().is_empty() => return Err(UnityError::EmptyName),
		Some(name) => name.to_owned(),
		None => copy_name(doc, &source_name),
	};

	let subtree = collect(doc, source_id)?;
	check_attachable(doc, subtree.father)?;
	let mut ids = IdAllocator::for_document(doc);
	let map: HashMap<i64, i64> = subtree.ids.iter().map(|id| (*id, ids.next())).collect();

	let mut clones = Vec::with_capacity(subtree.ids.len());
	for block in doc.blocks().iter().filter(|block| subtree.contains(block.file_id)) {
		let mut clone = Block::parse(remap(block.text(), &map))?;
		if block.file_id == source_id {
			clone.set_field("m_Name", &yaml_scalar(&name));
		}
		clones.push(clone);
	}
	let created: Vec<i64> = clones.iter().map(|block| block.file_id).collect();
	for clone in clones {
		doc.push(clone);
	}

	let game_object = map.get(&source_id).copied().unwrap_or(source_id);
	let transform = subtree.root_transform.and_then(|id| map.get(&id).copied());
	if let Some(clone_transform) = transform {
		attach(doc, subtree.father, clone_transform, subtree.root_transform)?;
	}

	info!("duplicated {source_id} as {game_object} {name:?} ({} blocks)", created.len());
	Ok(DuplicateOutcome {
		source: source_id,
		game_object,
		transform,
		name,
		father: subtree.father,
		created,
	})
}

/// Move a Transform under `target`, or to the scene root when `target` is `None`.
pub fn reparent(doc: &mut Document, child: &Selector, target: Option<&Selector>) -> Result<ReparentOutcome> {
	let transform = doc
		.resolve_transform(child)
		.filter(|id| doc.get(*id).is_some_and(|block| !block.stripped))
		.ok_or_else(|| UnityError::GameObjectNotFound { selector: child.to_string() })?;
	let new_father = match target {
		Some(selector) => doc.resolve_transform(selector).ok_or_else(|| UnityError::ParentNotFound {
			selector: selector.to_string(),
		})?,
		None => 0,
	};

	let mut visited = HashSet::new();
	let mut current = new_father;
	while current != 0 && visited.insert(current) {
		if current == transform {
			return Err(UnityError::HierarchyCycle {
				child: transform,
				target: new_father,
			});
		}
		current = doc.get(current).map_or(0, Block::father_id);
	}

	let old_father = doc.require(transform)?.father_id();
	if old_father != new_father {
		check_attachable(doc, new_father)?;
		detach(doc, old_father, transform);
		doc.require_mut(transform)?.set_field_ref("m_Father", new_father);
		attach(doc, new_father, transform, None)?;
	}

	info!("reparented {transform}: {old_father} -> {new_father}");
	Ok(ReparentOutcome {
		transform,
		old_father,
		new_father,
	})
}

#[cfg(test)]
mod tests;
