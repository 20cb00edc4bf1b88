use std::path::PathBuf;

use unidoc::unity::{Result, UnityFile, remove_component};

use crate::cmd::Context;
use crate::cmd::util::{fields, parse_file_id};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Component fileID.
	pub component: String,
}

#[derive(serde::Serialize)]
struct RemoveComponentJson {
	component_id: i64,
	game_object_id: i64,
	type_name: String,
}

/// Remove a component and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args { file, component } = args;

	let component = parse_file_id(&component)?;
	let mut unity = UnityFile::open(&file)?;
	let out = remove_component(unity.document_mut(), component)?;
	unity.commit(&ctx.commit)?;

	fields(&RemoveComponentJson {
		component_id: out.component,
		game_object_id: out.game_object,
		type_name: out.type_name,
	})
}
