use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::unity::hierarchy::attach;
use crate::unity::refs::first_ref;
use crate::unity::text::{LineBuf, continuation_end, fold_lines, key_value, unquote};
use crate::unity::{
	Block, CommitOptions, Document, FileRef, GuidCache, GuidResolver, IdAllocator, PropertyPath, Result, Selector, UnityError, UnityFile,
	apply_modification, class, collect, generate_guid, meta_path, normalize_property, prefab_meta, read_meta_guid, read_unity_file, remap,
	templates, write_atomic,
};

/// Fields linking an instantiated object back to its prefab.
const PREFAB_LINKS: [&str; 3] = ["m_CorrespondingSourceObject", "m_PrefabInstance", "m_PrefabAsset"];

/// Result of [`create_variant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOutcome {
	/// Written variant.
	pub file_path: PathBuf,
	/// Written `.meta` sidecar.
	pub meta_path: PathBuf,
	/// GUID assigned to the variant.
	pub guid: String,
	/// GUID of the source prefab.
	pub source_guid: String,
	/// Root name recorded in the rename modification.
	pub name: String,
	/// PrefabInstance id inside the variant.
	pub prefab_instance: i64,
}

/// A recorded override that could not be replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedModification {
	/// Modification target as recorded.
	pub target: FileRef,
	/// Property path as recorded.
	pub property_path: String,
	/// Why it was skipped.
	pub reason: String,
}

/// Result of [`unpack_prefab`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackOutcome {
	/// Removed PrefabInstance id.
	pub prefab_instance: i64,
	/// Source prefab path as listed in the GUID cache.
	pub source_prefab: String,
	/// Source prefab GUID.
	pub source_guid: String,
	/// Cloned root GameObject.
	pub root_game_object: i64,
	/// Cloned root Transform.
	pub root_transform: i64,
	/// Father the root was attached to.
	pub parent: i64,
	/// New block ids in document order.
	pub created: Vec<i64>,
	/// Removed PrefabInstance and placeholder ids.
	pub removed: Vec<i64>,
	/// Modifications written into clones.
	pub applied_modifications: usize,
	/// Modifications that could not be applied.
	pub skipped: Vec<SkippedModification>,
}

#[derive(Debug, Clone)]
struct Modification {
	target: FileRef,
	property_path: String,
	value: String,
	object_reference: Option<FileRef>,
}

/// Parsed `m_Modification` section of a PrefabInstance block.
#[derive(Debug, Clone, Default)]
struct InstanceData {
	transform_parent: i64,
	source: Option<FileRef>,
	modifications: Vec<Modification>,
	removed_components: Vec<FileRef>,
	removed_game_objects: Vec<FileRef>,
}

impl InstanceData {
	fn parse(block: &Block) -> Self {
		let buf = LineBuf::new(block.text());
		Self {
			transform_parent: block.field_id("m_TransformParent"),
			source: block.field_ref("m_SourcePrefab"),
			modifications: parse_modifications(&buf),
			removed_components: sequence_refs(&buf, "m_RemovedComponents"),
			removed_game_objects: sequence_refs(&buf, "m_RemovedGameObjects"),
		}
	}

	/// Value of the root rename override, when present.
	fn renamed_to(&self) -> Option<String> {
		self.modifications
			.iter()
			.find(|item| item.property_path == "m_Name")
			.map(|item| unquote(&item.value))
	}
}

fn sequence_refs(buf: &LineBuf, key: &str) -> Vec<FileRef> {
	let Some(line) = buf.find_field(key) else {
		return Vec::new();
	};
	buf.sequence(line)
		.items
		.iter()
		.filter_map(|range| first_ref(&fold_lines(&buf.lines[range.start], buf.lines[range.start + 1..range.end].iter().map(String::as_str))))
		.collect()
}

fn parse_modifications(buf: &LineBuf) -> Vec<Modification> {
	let Some(line) = buf.find_field("m_Modifications") else {
		return Vec::new();
	};
	let mut out = Vec::new();
	for range in buf.sequence(line).items {
		let mut target = None;
		let mut property_path = None;
		let mut value = String::new();
		let mut object_reference = None;
		let mut idx = range.start;
		while idx < range.end {
			let raw = &buf.lines[idx];
			let content = if idx == range.start { raw.trim_start().trim_start_matches('-').trim_start() } else { raw.trim_start() };
			let end = continuation_end(&buf.lines, idx).min(range.end);
			let folded = |first: &str| fold_lines(first, buf.lines[idx + 1..end].iter().map(String::as_str));
			if let Some(found) = key_value(content, "target") {
				target = first_ref(&folded(found));
			} else if let Some(found) = key_value(content, "propertyPath") {
				property_path = Some(folded(found));
			} else if let Some(found) = key_value(content, "value") {
				value = folded(found);
			} else if let Some(found) = key_value(content, "objectReference") {
				object_reference = first_ref(&folded(found));
			}
			idx = end;
		}
		match (target, property_path) {
			(Some(target), Some(property_path)) => out.push(Modification {
				target,
				property_path,
				value,
				object_reference,
			}),
			_ => debug!("modification at line {} is incomplete; ignored", range.start),
		}
	}
	out
}

fn source_unreadable(path: &Path, reason: impl ToString) -> UnityError {
	UnityError::SourceUnreadable {
		path: path.display().to_string(),
		reason: reason.to_string(),
	}
}

fn load_source(path: &Path) -> Result<Document> {
	let text = read_unity_file(path).map_err(|err| source_unreadable(path, err))?;
	Document::parse(&text).map_err(|err| source_unreadable(path, err))
}

/// Non-stripped Transform at the top of a prefab.
fn root_transform(doc: &Document) -> Option<&Block> {
	doc.blocks()
		.iter()
		.find(|block| block.is_transform() && !block.stripped && block.field_ref("m_Father").is_some_and(|father| father.is_null()))
}

/// Write a prefab variant of `source` to `output`, plus its `.meta`.
pub fn create_variant(source: &Path, output: &Path, name: Option<&str>, options: &CommitOptions) -> Result<VariantOutcome> {
	if output.exists() {
		return Err(UnityError::FileExists {
			path: output.display().to_string(),
		});
	}
	if !source.exists() {
		return Err(UnityError::FileNotFound {
			path: source.display().to_string(),
		});
	}
	let source_doc = load_source(source)?;
	let source_guid = read_meta_guid(source)?;
	let root = root_transform(&source_doc).ok_or_else(|| source_unreadable(source, "no root Transform"))?;
	let root_game_object = root.game_object_id();

	let name = match name {
		Some(name) if name.trim().is_empty() => return Err(UnityError::EmptyName),
		Some(name) => name.to_owned(),
		None => output
			.file_stem()
			.and_then(|stem| stem.to_str())
			.map(str::to_owned)
			.ok_or_else(|| UnityError::InvalidArgument {
				message: format!("cannot derive a name from {}", output.display()),
			})?,
	};

	let mut ids = IdAllocator::default();
	let prefab_instance = ids.next();
	let game_object = ids.next();
	let transform = ids.next();

	let mut doc = Document::empty();
	doc.push(Block::parse(templates::stripped(
		class::GAME_OBJECT,
		"GameObject",
		game_object,
		FileRef::external(root_game_object, source_guid.as_str(), 3),
		prefab_instance,
	))?);
	doc.push(Block::parse(templates::stripped(
		root.class_id,
		&root.type_name,
		transform,
		FileRef::external(root.file_id, source_guid.as_str(), 3),
		prefab_instance,
	))?);
	doc.push(Block::parse(templates::variant_instance(
		prefab_instance,
		&source_guid,
		root_game_object,
		&name,
	))?);

	UnityFile::create(output, doc).commit(options)?;
	let guid = generate_guid();
	let meta = meta_path(output);
	write_atomic(&meta, &prefab_meta(&guid), options)?;

	info!("created variant {} of {}", output.display(), source.display());
	Ok(VariantOutcome {
		file_path: output.to_path_buf(),
		meta_path: meta,
		guid,
		source_guid,
		name,
		prefab_instance,
	})
}

fn find_instance(doc: &Document, selector: &Selector) -> Result<i64> {
	let found = match selector {
		Selector::Id(id) => doc.find(class::PREFAB_INSTANCE, *id),
		Selector::Name(name) => doc
			.blocks()
			.iter()
			.filter(|block| block.class_id == class::PREFAB_INSTANCE)
			.find(|block| InstanceData::parse(block).renamed_to().as_deref() == Some(name.as_str())),
	};
	found.map(|block| block.file_id).ok_or_else(|| UnityError::PrefabInstanceNotFound {
		selector: selector.to_string(),
	})
}

/// Value to write for an override; clearing a reference field writes the null reference.
fn replay_value(block: &Block, modification: &Modification, object_reference: Option<&FileRef>) -> String {
	let clears_reference = modification.value.trim().is_empty()
		&& object_reference.is_some_and(FileRef::is_null)
		&& matches!(PropertyPath::parse(&modification.property_path), Ok(PropertyPath::Scalar(_)))
		&& block
			.field(&normalize_property(block.text(), &modification.property_path))
			.is_some_and(|current| current.starts_with("{fileID:"));
	if clears_reference { FileRef::NULL.to_string() } else { modification.value.clone() }
}

/// Replace a PrefabInstance with editable copies of its source prefab's objects.
///
/// Overrides are replayed onto the copies; ones that cannot be applied are
/// reported in the outcome instead of failing the whole operation.
pub fn unpack_prefab(doc: &mut Document, selector: &Selector, cache: Option<&GuidCache>) -> Result<UnpackOutcome> {
	let prefab_instance = find_instance(doc, selector)?;
	let data = InstanceData::parse(doc.require(prefab_instance)?);
	let source_guid = data
		.source
		.as_ref()
		.and_then(|found| found.guid.clone())
		.ok_or_else(|| UnityError::InvalidArgument {
			message: format!("PrefabInstance {prefab_instance} has no m_SourcePrefab guid"),
		})?;

	let cache = cache.ok_or(UnityError::GuidCacheMissing)?;
	let source_prefab = cache
		.resolve(&source_guid)
		.map(str::to_owned)
		.ok_or_else(|| UnityError::GuidNotFound { guid: source_guid.clone() })?;
	let source = load_source(&cache.absolute(&source_prefab))?;

	let from_source = |found: &FileRef| found.guid.as_deref() == Some(source_guid.as_str());

	// Source ids excluded from the copy.
	let mut excluded: HashSet<i64> = data.removed_components.iter().filter(|found| from_source(found)).map(|found| found.file_id).collect();
	for removed in data.removed_game_objects.iter().filter(|found| from_source(found)) {
		match collect(&source, removed.file_id) {
			Ok(subtree) => excluded.extend(subtree.ids),
			Err(err) => debug!("removed GameObject {} not in source: {err}", removed.file_id),
		}
	}

	let root = root_transform(&source).ok_or_else(|| source_unreadable(Path::new(&source_prefab), "no root Transform"))?;
	let (source_root_transform, source_root_game_object) = (root.file_id, root.game_object_id());

	let mut ids = IdAllocator::for_document(doc);
	let mut map: HashMap<i64, i64> = HashMap::new();
	for block in source.blocks().iter().filter(|block| !excluded.contains(&block.file_id)) {
		map.insert(block.file_id, ids.next());
	}
	let mut rewrite = map.clone();
	rewrite.extend(excluded.iter().map(|id| (*id, 0)));

	let mut clones: Vec<Block> = Vec::with_capacity(map.len());
	for block in source.blocks().iter().filter(|block| map.contains_key(&block.file_id)) {
		let mut clone = Block::parse(remap(block.text(), &rewrite))?;
		if !clone.stripped && clone.class_id != class::PREFAB_INSTANCE {
			for link in PREFAB_LINKS {
				clone.set_field(link, &FileRef::NULL.to_string());
			}
		}
		if clone.is_transform() {
			clone.remove_child(0);
		}
		if clone.is_game_object() {
			clone.remove_component(0);
		}
		clones.push(clone);
	}

	let mut applied_modifications = 0;
	let mut skipped = Vec::new();
	for modification in &data.modifications {
		let skip = |reason: String| SkippedModification {
			target: modification.target.clone(),
			property_path: modification.property_path.clone(),
			reason,
		};
		if !from_source(&modification.target) {
			skipped.push(skip("target belongs to another asset".to_owned()));
			continue;
		}
		if excluded.contains(&modification.target.file_id) {
			skipped.push(skip("target was removed from the instance".to_owned()));
			continue;
		}
		let Some(clone) = map.get(&modification.target.file_id).and_then(|id| clones.iter_mut().find(|block| block.file_id == *id)) else {
			skipped.push(skip("target not found in source prefab".to_owned()));
			continue;
		};

		let object_reference = modification.object_reference.as_ref().map(|found| match map.get(&found.file_id) {
			Some(local) if from_source(found) => FileRef::local(*local),
			_ => found.clone(),
		});
		let value = replay_value(clone, modification, object_reference.as_ref());
		let applied = apply_modification(clone.text(), &modification.property_path, &value, object_reference.as_ref())
			.and_then(|text| clone.set_text(text));
		match applied {
			Ok(()) => applied_modifications += 1,
			Err(err) => skipped.push(skip(err.to_string())),
		}
	}
	for item in &skipped {
		warn!("skipped modification {} on {}: {}", item.property_path, item.target, item.reason);
	}

	let root_transform_id = map.get(&source_root_transform).copied().ok_or_else(|| UnityError::InvalidArgument {
		message: format!("PrefabInstance {prefab_instance} removes the prefab root"),
	})?;
	let root_game_object = map.get(&source_root_game_object).copied().unwrap_or(0);
	let parent = data.transform_parent;
	if let Some(clone) = clones.iter_mut().find(|block| block.file_id == root_transform_id) {
		clone.set_field_ref("m_Father", parent);
	}

	// Host placeholders give way to their clones.
	let placeholders: Vec<i64> = doc
		.blocks()
		.iter()
		.filter(|block| block.stripped && block.prefab_instance_id() == prefab_instance)
		.map(|block| block.file_id)
		.collect();
	let mut host_map: HashMap<i64, i64> = HashMap::from([(prefab_instance, root_transform_id)]);
	for id in &placeholders {
		let target = doc
			.get(*id)
			.and_then(|block| block.field_ref("m_CorrespondingSourceObject"))
			.filter(|found| from_source(found))
			.and_then(|found| map.get(&found.file_id).copied())
			.unwrap_or(0);
		host_map.insert(*id, target);
	}

	let mut added_components = Vec::new();
	let mut added_children = Vec::new();
	for block in doc.blocks().iter().filter(|block| !block.stripped) {
		if block.is_transform() && placeholders.contains(&block.father_id()) {
			added_children.push((host_map.get(&block.father_id()).copied().unwrap_or(0), block.file_id));
		}
		if !block.is_game_object() && placeholders.contains(&block.game_object_id()) {
			added_components.push((host_map.get(&block.game_object_id()).copied().unwrap_or(0), block.file_id));
		}
	}

	let mut removed = vec![prefab_instance];
	removed.extend(&placeholders);
	let removed_set: HashSet<i64> = removed.iter().copied().collect();
	let position = doc.position(prefab_instance).unwrap_or(doc.len());
	let at = doc.blocks()[..position].iter().filter(|block| !removed_set.contains(&block.file_id)).count();
	doc.remove_all(&removed_set);

	let created: Vec<i64> = clones.iter().map(|block| block.file_id).collect();
	for (offset, clone) in clones.into_iter().enumerate() {
		doc.insert(at + offset, clone);
	}
	doc.rewrite_blocks(|block| Some(remap(block.text(), &host_map)))?;

	for (owner, component) in added_components.into_iter().filter(|(owner, _)| *owner != 0) {
		doc.require_mut(owner)?.add_component(component);
	}
	for (father, child) in added_children.into_iter().filter(|(father, _)| *father != 0) {
		doc.require_mut(father)?.add_child(child, None);
	}

	// A stripped parent belongs to another instance and has no m_Children to update.
	let listed = if parent == 0 {
		doc.scene_roots_id()
			.and_then(|id| doc.get(id))
			.is_none_or(|roots| roots.sequence_ids("m_Roots").contains(&root_transform_id))
	} else {
		let father = doc.require(parent)?;
		father.stripped || father.children_ids().contains(&root_transform_id)
	};
	if !listed {
		attach(doc, parent, root_transform_id, None)?;
	}

	info!(
		"unpacked {prefab_instance} from {source_prefab}: {} blocks, {applied_modifications} overrides, {} skipped",
		created.len(),
		skipped.len()
	);
	Ok(UnpackOutcome {
		prefab_instance,
		source_prefab,
		source_guid,
		root_game_object,
		root_transform: root_transform_id,
		parent,
		created,
		removed,
		applied_modifications,
		skipped,
	})
}
