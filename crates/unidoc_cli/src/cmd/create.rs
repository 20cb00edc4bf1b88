use std::path::PathBuf;

use unidoc::unity::{Result, UnityFile, create_game_object};

use crate::cmd::Context;
use crate::cmd::util::{fields, parent_selector};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	pub name: String,
	/// Parent GameObject name, Transform fileID, or `root`.
	#[arg(long)]
	pub parent: Option<String>,
}

#[derive(serde::Serialize)]
struct CreateJson {
	name: String,
	game_object_id: i64,
	transform_id: i64,
	parent_transform_id: i64,
}

/// Add a GameObject and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args { file, name, parent } = args;

	let mut unity = UnityFile::open(&file)?;
	let parent = parent_selector(parent.as_deref());
	let out = create_game_object(unity.document_mut(), &name, parent.as_ref())?;
	unity.commit(&ctx.commit)?;

	fields(&CreateJson {
		name,
		game_object_id: out.game_object,
		transform_id: out.transform,
		parent_transform_id: out.father,
	})
}
