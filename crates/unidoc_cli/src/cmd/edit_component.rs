use std::path::PathBuf;

use unidoc::unity::{Result, UnityFile, edit_component};

use crate::cmd::Context;
use crate::cmd::util::{fields, parse_file_id, parse_file_ref};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Component fileID.
	pub component: String,
	/// Property path: `field`, `field.sub`, `list.Array.data[N]` or `list.Array.size`.
	pub property: String,
	/// New value; may be omitted when `--ref` is given.
	#[arg(default_value = "", allow_hyphen_values = true)]
	pub value: String,
	/// Object reference to write instead of the value (`fileID` or `{fileID: N, guid: G, type: T}`).
	#[arg(long = "ref")]
	pub reference: Option<String>,
}

#[derive(serde::Serialize)]
struct EditComponentJson {
	component_id: i64,
	property: String,
	value: String,
}

/// Set a component property and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args {
		file,
		component,
		property,
		value,
		reference,
	} = args;

	let component = parse_file_id(&component)?;
	let reference = reference.as_deref().map(parse_file_ref).transpose()?;
	let mut unity = UnityFile::open(&file)?;
	let out = edit_component(unity.document_mut(), component, &property, &value, reference.as_ref())?;
	unity.commit(&ctx.commit)?;

	fields(&EditComponentJson {
		component_id: out.file_id,
		property: out.property,
		value: out.value,
	})
}
