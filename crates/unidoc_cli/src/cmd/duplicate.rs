use std::path::PathBuf;

use unidoc::unity::{Result, UnityFile, duplicate_game_object};

use crate::cmd::Context;
use crate::cmd::util::{fields, selector};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// GameObject name or fileID.
	pub object: String,
	/// Name for the copy (default: `<name> (n)`).
	#[arg(long)]
	pub name: Option<String>,
}

#[derive(serde::Serialize)]
struct DuplicateJson {
	source_id: i64,
	game_object_id: i64,
	transform_id: Option<i64>,
	name: String,
	parent_transform_id: i64,
	created_ids: Vec<i64>,
}

/// Clone a GameObject subtree and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args { file, object, name } = args;

	let mut unity = UnityFile::open(&file)?;
	let out = duplicate_game_object(unity.document_mut(), &selector(&object), name.as_deref())?;
	unity.commit(&ctx.commit)?;

	fields(&DuplicateJson {
		source_id: out.source,
		game_object_id: out.game_object,
		transform_id: out.transform,
		name: out.name,
		parent_transform_id: out.father,
		created_ids: out.created,
	})
}
