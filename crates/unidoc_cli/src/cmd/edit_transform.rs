use std::path::PathBuf;

use unidoc::unity::{Result, TransformEdit, UnityFile, edit_transform, parse_vector};

use crate::cmd::Context;
use crate::cmd::util::{fields, selector};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// GameObject name or Transform fileID.
	pub object: String,
	/// Local position as `x,y,z`.
	#[arg(long, allow_hyphen_values = true)]
	pub position: Option<String>,
	/// Local Euler rotation in degrees as `x,y,z`.
	#[arg(long, allow_hyphen_values = true)]
	pub rotation: Option<String>,
	/// Local scale as `x,y,z`.
	#[arg(long, allow_hyphen_values = true)]
	pub scale: Option<String>,
}

#[derive(serde::Serialize)]
struct TransformJson {
	transform_id: i64,
	position: Option<[f64; 3]>,
	rotation: Option<[f64; 4]>,
	scale: Option<[f64; 3]>,
}

/// Overwrite local transform values and commit.
pub fn run(args: Args, ctx: &Context) -> Result<serde_json::Value> {
	let Args {
		file,
		object,
		position,
		rotation,
		scale,
	} = args;

	let edit = TransformEdit {
		position: position.as_deref().map(parse_vector).transpose()?,
		rotation: rotation.as_deref().map(parse_vector).transpose()?,
		scale: scale.as_deref().map(parse_vector).transpose()?,
	};

	let mut unity = UnityFile::open(&file)?;
	let out = edit_transform(unity.document_mut(), &selector(&object), &edit)?;
	unity.commit(&ctx.commit)?;

	fields(&TransformJson {
		transform_id: out.transform,
		position: out.position,
		rotation: out.rotation,
		scale: out.scale,
	})
}
