use std::path::PathBuf;

use unidoc::unity::{Result, UnityFile, copy_component};

use crate::cmd::Context;
use crate::cmd::util::{fields, parse_file_id, selector};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Component fileID to copy.
	pub component: String,
	/// Receiving GameObject name or fileID.
	pub target: String,
}

#[derive(serde::Serialize)]
struct CopyComponentJson {
	source_component_id: i64,
	component_id: i64,
	game_object_id: i64,
	type_name: String,
}

/// Copy a component and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args { file, component, target } = args;

	let component = parse_file_id(&component)?;
	let mut unity = UnityFile::open(&file)?;
	let out = copy_component(unity.document_mut(), component, &selector(&target))?;
	unity.commit(&ctx.commit)?;

	fields(&CopyComponentJson {
		source_component_id: out.source,
		component_id: out.component,
		game_object_id: out.game_object,
		type_name: out.type_name,
	})
}
