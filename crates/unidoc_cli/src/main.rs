#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use unidoc::unity::CommitOptions;

mod cmd;

use cmd::Context;

#[derive(Parser)]
#[command(name = "unidoc", about = "Edit Unity scene and prefab files without the editor")]
struct Cli {
	/// Project root used to resolve GUID cache paths.
	#[arg(long, global = true)]
	project: Option<PathBuf>,
	/// GUID cache file (default: <project>/.unidoc/guid-cache.json).
	#[arg(long = "guid-cache", global = true)]
	guid_cache: Option<PathBuf>,
	/// Leave `<file>.bak` next to the edited file.
	#[arg(long = "keep-backup", global = true)]
	keep_backup: bool,
	/// Log engine decisions to stderr.
	#[arg(long, short, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Add a GameObject with an identity Transform.
	Create(cmd::create::Args),
	/// Delete a GameObject and its descendants.
	Delete(cmd::delete::Args),
	/// Clone a GameObject subtree next to the original.
	Duplicate(cmd::duplicate::Args),
	/// Move a GameObject under another Transform or to the scene root.
	Reparent(cmd::reparent::Args),
	/// Set a GameObject property.
	Edit(cmd::edit::Args),
	/// Set local position, rotation or scale.
	EditTransform(cmd::edit_transform::Args),
	/// Attach a built-in component or a script.
	AddComponent(cmd::add_component::Args),
	/// Remove one component by fileID.
	RemoveComponent(cmd::remove_component::Args),
	/// Copy a component onto another GameObject.
	CopyComponent(cmd::copy_component::Args),
	/// Set a component property by path.
	EditComponent(cmd::edit_component::Args),
	/// Write a prefab variant of a source prefab.
	CreateVariant(cmd::create_variant::Args),
	/// Replace a prefab instance with editable objects.
	UnpackPrefab(cmd::unpack_prefab::Args),
}

impl Commands {
	/// File reported in the result envelope.
	fn file_path(&self) -> &PathBuf {
		match self {
			Self::Create(args) => &args.file,
			Self::Delete(args) => &args.file,
			Self::Duplicate(args) => &args.file,
			Self::Reparent(args) => &args.file,
			Self::Edit(args) => &args.file,
			Self::EditTransform(args) => &args.file,
			Self::AddComponent(args) => &args.file,
			Self::RemoveComponent(args) => &args.file,
			Self::CopyComponent(args) => &args.file,
			Self::EditComponent(args) => &args.file,
			Self::CreateVariant(args) => &args.output,
			Self::UnpackPrefab(args) => &args.file,
		}
	}
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	let ctx = Context {
		project: cli.project,
		guid_cache: cli.guid_cache,
		commit: CommitOptions {
			keep_backup: cli.keep_backup,
		},
	};
	let file_path = cli.command.file_path().clone();
	let result = run(cli.command, &ctx);
	let ok = cmd::util::emit_result(&file_path, result);
	std::process::exit(if ok { 0 } else { 1 });
}

fn init_logging(verbose: bool) {
	let default = if verbose { "debug" } else { "warn" };
	env_logger::Builder::from_env(env_logger::Env::new().filter_or("UNIDOC_LOG", default))
		.format_timestamp(None)
		.target(env_logger::Target::Stderr)
		.init();
}

fn run(command: Commands, ctx: &Context) -> unidoc::unity::Result<serde_json::Value> {
	match command {
		Commands::Create(args) => cmd::create::run(args, ctx),
		Commands::Delete(args) => cmd::delete::run(args, ctx),
		Commands::Duplicate(args) => cmd::duplicate::run(args, ctx),
		Commands::Reparent(args) => cmd::reparent::run(args, ctx),
		Commands::Edit(args) => cmd::edit::run(args, ctx),
		Commands::EditTransform(args) => cmd::edit_transform::run(args, ctx),
		Commands::AddComponent(args) => cmd::add_component::run(args, ctx),
		Commands::RemoveComponent(args) => cmd::remove_component::run(args, ctx),
		Commands::CopyComponent(args) => cmd::copy_component::run(args, ctx),
		Commands::EditComponent(args) => cmd::edit_component::run(args, ctx),
		Commands::CreateVariant(args) => cmd::create_variant::run(args, ctx),
		Commands::UnpackPrefab(args) => cmd::unpack_prefab::run(args, ctx),
	}
}
