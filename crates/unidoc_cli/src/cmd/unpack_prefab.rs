use std::path::PathBuf;

use unidoc::unity::{Result, SkippedModification, UnityFile, unpack_prefab};

use crate::cmd::Context;
use crate::cmd::util::{fields, selector};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// PrefabInstance fileID or the instance's root name.
	pub instance: String,
}

#[derive(serde::Serialize)]
struct UnpackJson {
	prefab_instance_id: i64,
	source_prefab: String,
	source_guid: String,
	root_game_object_id: i64,
	root_transform_id: i64,
	parent_transform_id: i64,
	created_count: usize,
	created_ids: Vec<i64>,
	removed_ids: Vec<i64>,
	applied_modifications: usize,
	skipped_modifications: Vec<SkippedJson>,
}

#[derive(serde::Serialize)]
struct SkippedJson {
	target: String,
	property_path: String,
	reason: String,
}

impl From<SkippedModification> for SkippedJson {
	fn from(item: SkippedModification) -> Self {
		Self {
			target: item.target.to_string(),
			property_path: item.property_path,
			reason: item.reason,
		}
	}
}

/// Unpack a prefab instance and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args { file, instance } = args;

	let mut unity = UnityFile::open(&file)?;
	let cache = ctx.guid_cache_for(&file)?;
	let out = unpack_prefab(unity.document_mut(), &selector(&instance), cache.as_ref())?;
	unity.commit(&ctx.commit)?;

	fields(&UnpackJson {
		prefab_instance_id: out.prefab_instance,
		source_prefab: out.source_prefab,
		source_guid: out.source_guid,
		root_game_object_id: out.root_game_object,
		root_transform_id: out.root_transform,
		parent_transform_id: out.parent,
		created_count: out.created.len(),
		created_ids: out.created,
		removed_ids: out.removed,
		applied_modifications: out.applied_modifications,
		skipped_modifications: out.skipped.into_iter().map(SkippedJson::from).collect(),
	})
}
