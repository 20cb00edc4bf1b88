use std::path::PathBuf;

use unidoc::unity::{Result, UnityFile, delete_game_object};

use crate::cmd::Context;
use crate::cmd::util::{fields, selector};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// GameObject name or fileID.
	pub object: String,
}

#[derive(serde::Serialize)]
struct DeleteJson {
	game_object_id: i64,
	removed_count: usize,
	removed_ids: Vec<i64>,
}

/// Delete a GameObject subtree and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args { file, object } = args;

	let mut unity = UnityFile::open(&file)?;
	let out = delete_game_object(unity.document_mut(), &selector(&object))?;
	unity.commit(&ctx.commit)?;

	fields(&DeleteJson {
		game_object_id: out.game_object,
		removed_count: out.removed.len(),
		removed_ids: out.removed,
	})
}
