use std::path::PathBuf;

use unidoc::unity::{Result, UnityFile, edit_game_object};

use crate::cmd::Context;
use crate::cmd::util::{fields, selector};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// GameObject name or fileID.
	pub object: String,
	/// Property such as `name`, `tag`, `layer` or `active`.
	pub property: String,
	pub value: String,
}

#[derive(serde::Serialize)]
struct EditJson {
	game_object_id: i64,
	property: String,
	value: String,
}

/// Friendly aliases for GameObject fields.
fn property_alias(property: &str) -> &str {
	match property {
		"name" => "m_Name",
		"tag" => "m_TagString",
		"layer" => "m_Layer",
		"active" => "m_IsActive",
		other => other,
	}
}

/// Set one GameObject property and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args {
		file,
		object,
		property,
		value,
	} = args;

	let mut unity = UnityFile::open(&file)?;
	let out = edit_game_object(unity.document_mut(), &selector(&object), property_alias(&property), &value)?;
	unity.commit(&ctx.commit)?;

	fields(&EditJson {
		game_object_id: out.file_id,
		property: out.property,
		value: out.value,
	})
}
