use std::path::PathBuf;

use unidoc::unity::{GuidResolver, Result, UnityFile, add_component, builtin_component};

use crate::cmd::Context;
use crate::cmd::util::{fields, selector};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// GameObject name or fileID.
	pub object: String,
	/// Built-in component name, script class name, script path or script GUID.
	pub component: String,
}

#[derive(serde::Serialize)]
struct AddComponentJson {
	game_object_id: i64,
	component_id: i64,
	class_id: u32,
	type_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	script_guid: Option<String>,
}

/// Attach a component and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args { file, object, component } = args;

	let mut unity = UnityFile::open(&file)?;
	// Built-ins never need the cache.
	let cache = if builtin_component(&component).is_some() { None } else { ctx.guid_cache_for(&file)? };
	let resolver = cache.as_ref().map(|item| item as &dyn GuidResolver);
	let out = add_component(unity.document_mut(), &selector(&object), &component, resolver)?;
	unity.commit(&ctx.commit)?;

	fields(&AddComponentJson {
		game_object_id: out.game_object,
		component_id: out.component,
		class_id: out.class_id,
		type_name: out.type_name,
		script_guid: out.script_guid,
	})
}
