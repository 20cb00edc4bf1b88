use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::{debug, info};

use crate::unity::hierarchy::null_references;
use crate::unity::templates::{self, builtin_by_class};
use crate::unity::{Block, Document, GuidResolver, IdAllocator, Result, Selector, UnityError, builtin_component, class, is_valid_guid, remap};

/// Result of [`add_component`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddComponentOutcome {
	/// Owning GameObject.
	pub game_object: i64,
	/// New component id.
	pub component: i64,
	/// Unity class id of the new block.
	pub class_id: u32,
	/// Type name of the new block.
	pub type_name: String,
	/// Script GUID for MonoBehaviours.
	pub script_guid: Option<String>,
}

/// Result of [`remove_component`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveComponentOutcome {
	/// Removed component id.
	pub component: i64,
	/// Former owner.
	pub game_object: i64,
	/// Type name of the removed block.
	pub type_name: String,
}

/// Result of [`copy_component`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyComponentOutcome {
	/// Copied component id.
	pub source: i64,
	/// New component id.
	pub component: i64,
	/// GameObject receiving the copy.
	pub game_object: i64,
	/// Type name of the copy.
	pub type_name: String,
}

fn has_component(doc: &Document, game_object: i64, class_id: u32) -> bool {
	doc.get(game_object).is_some_and(|owner| {
		owner
			.component_ids()
			.into_iter()
			.filter_map(|id| doc.get(id))
			.any(|block| block.class_id == class_id)
	})
}

/// Component blocks that component operations may touch.
fn require_component(doc: &Document, file_id: i64) -> Result<&Block> {
	let block = doc.require(file_id)?;
	if block.is_game_object() || block.is_transform() || block.stripped || block.class_id == class::PREFAB_INSTANCE {
		return Err(UnityError::ProtectedComponent {
			file_id,
			type_name: block.type_name.clone(),
		});
	}
	Ok(block)
}

/// Script GUID for a GUID, a `.cs` path, or a class name.
fn resolve_script(name: &str, resolver: Option<&dyn GuidResolver>) -> Result<String> {
	let resolver = resolver.ok_or(UnityError::GuidCacheMissing)?;
	if is_valid_guid(name) {
		return match resolver.resolve(name) {
			Some(path) => {
				debug!("script {name} resolves to {path}");
				Ok(name.to_owned())
			}
			None => Err(UnityError::GuidNotFound { guid: name.to_owned() }),
		};
	}
	let stem = Path::new(name).file_stem().and_then(|stem| stem.to_str()).unwrap_or(name);
	resolver
		.find_script(stem)
		.map(str::to_owned)
		.ok_or_else(|| UnityError::ScriptNotFound { name: name.to_owned() })
}

/// Attach a built-in component or a MonoBehaviour script to a GameObject.
pub fn add_component(doc: &mut Document, selector: &Selector, name: &str, resolver: Option<&dyn GuidResolver>) -> Result<AddComponentOutcome> {
	let game_object = doc.resolve_game_object(selector)?.file_id;
	let component = IdAllocator::for_document(doc).next();

	let (text, class_id, type_name, script_guid) = match builtin_component(name) {
		Some(builtin) => {
			if builtin.single && has_component(doc, game_object, builtin.class_id) {
				return Err(UnityError::ComponentExists {
					game_object,
					component: builtin.name.to_owned(),
				});
			}
			(builtin.render(component, game_object), builtin.class_id, builtin.name.to_owned(), None)
		}
		None => {
			let guid = resolve_script(name, resolver)?;
			(
				templates::mono_behaviour(component, game_object, &guid),
				class::MONO_BEHAVIOUR,
				"MonoBehaviour".to_owned(),
				Some(guid),
			)
		}
	};

	doc.push(Block::parse(text)?);
	doc.require_mut(game_object)?.add_component(component);

	info!("added {type_name} {component} to {game_object}");
	Ok(AddComponentOutcome {
		game_object,
		component,
		class_id,
		type_name,
		script_guid,
	})
}

/// Delete one component and clear references to it.
pub fn remove_component(doc: &mut Document, component: i64) -> Result<RemoveComponentOutcome> {
	let block = require_component(doc, component)?;
	let game_object = block.game_object_id();
	let type_name = block.type_name.clone();

	if let Some(owner) = doc.get_mut(game_object) {
		owner.remove_component(component);
	}
	doc.remove(component);
	null_references(doc, &HashSet::from([component]))?;

	info!("removed {type_name} {component} from {game_object}");
	Ok(RemoveComponentOutcome {
		component,
		game_object,
		type_name,
	})
}

/// Clone a component onto another (or the same) GameObject.
pub fn copy_component(doc: &mut Document, component: i64, target: &Selector) -> Result<CopyComponentOutcome> {
	let block = require_component(doc, component)?;
	let owner = block.game_object_id();
	let class_id = block.class_id;
	let type_name = block.type_name.clone();
	let source_text = block.text().to_owned();

	let game_object = doc.resolve_game_object(target)?.file_id;
	if builtin_by_class(class_id).is_some_and(|builtin| builtin.single) && has_component(doc, game_object, class_id) {
		return Err(UnityError::ComponentExists {
			game_object,
			component: type_name,
		});
	}

	let copy = IdAllocator::for_document(doc).next();
	let mut map = HashMap::from([(component, copy)]);
	if owner != 0 {
		map.insert(owner, game_object);
	}
	doc.push(Block::parse(remap(&source_text, &map))?);
	doc.require_mut(game_object)?.add_component(copy);

	info!("copied {type_name} {component} to {game_object} as {copy}");
	Ok(CopyComponentOutcome {
		source: component,
		component: copy,
		game_object,
		type_name,
	})
}

#[cfg(test)]
mod tests;
