use std::path::PathBuf;

use unidoc::unity::{Result, UnityFile, reparent};

use crate::cmd::Context;
use crate::cmd::util::{fields, parent_selector, selector};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// GameObject name or Transform fileID to move.
	pub object: String,
	/// New parent name, Transform fileID, or `root`.
	pub parent: String,
}

#[derive(serde::Serialize)]
struct ReparentJson {
	transform_id: i64,
	old_parent_transform_id: i64,
	new_parent_transform_id: i64,
}

/// Move a Transform and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args { file, object, parent } = args;

	let mut unity = UnityFile::open(&file)?;
	let target = parent_selector(Some(&parent));
	let out = reparent(unity.document_mut(), &selector(&object), target.as_ref())?;
	unity.commit(&ctx.commit)?;

	fields(&ReparentJson {
		transform_id: out.transform,
		old_parent_transform_id: out.old_father,
		new_parent_transform_id: out.new_father,
	})
}
