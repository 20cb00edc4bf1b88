use std::path::PathBuf;

use unidoc::unity::{CommitOptions, GuidCache, Result};

/// Component attach command.
pub mod add_component;
/// Component copy command.
pub mod copy_component;
/// GameObject creation command.
pub mod create;
/// Prefab variant command.
pub mod create_variant;
/// GameObject deletion command.
pub mod delete;
/// GameObject duplication command.
pub mod duplicate;
/// GameObject property command.
pub mod edit;
/// Component property command.
pub mod edit_component;
/// Transform property command.
pub mod edit_transform;
/// Component removal command.
pub mod remove_component;
/// Hierarchy move command.
pub mod reparent;
/// Prefab unpack command.
pub mod unpack_prefab;
/// Shared argument parsing and output helpers.
pub mod util;

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Context {
	/// Explicit project root.
	pub project: Option<PathBuf>,
	/// Explicit GUID cache file.
	pub guid_cache: Option<PathBuf>,
	/// Commit switches.
	pub commit: CommitOptions,
}

impl Context {
	/// GUID cache for operations that resolve scripts or prefabs near `target`.
	pub fn guid_cache_for(&self, target: &std::path::Path) -> Result<Option<GuidCache>> {
		util::load_guid_cache(self.project.as_deref(), self.guid_cache.as_deref(), target)
	}
}
