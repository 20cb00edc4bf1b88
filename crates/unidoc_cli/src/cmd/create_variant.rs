use std::path::PathBuf;

use unidoc::unity::{Result, create_variant};

use crate::cmd::Context;
use crate::cmd::util::fields;

#[derive(clap::Args)]
pub struct Args {
	/// Source `.prefab` with its `.meta` next to it.
	pub source: PathBuf,
	/// Variant file to write.
	pub output: PathBuf,
	/// Root name of the variant (default: output file stem).
	#[arg(long)]
	pub name: Option<String>,
}

#[derive(serde::Serialize)]
struct VariantJson {
	source_path: String,
	source_guid: String,
	guid: String,
	meta_path: String,
	name: String,
	prefab_instance_id: i64,
}

/// Write a prefab variant and its `.meta`.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args { source, output, name } = args;

	let out = create_variant(&source, &output, name.as_deref(), &ctx.commit)?;

	fields(&VariantJson {
		source_path: source.display().to_string(),
		source_guid: out.source_guid,
		guid: out.guid,
		meta_path: out.meta_path.display().to_string(),
		name: out.name,
		prefab_instance_id: out.prefab_instance,
	})
}
