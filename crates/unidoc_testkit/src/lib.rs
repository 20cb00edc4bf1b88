//! Shared test helpers for workspace crates.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a fixture as text.
pub fn fixture_text(name: &str) -> String {
	let path = fixture_path(name);
	fs::read_to_string(&path).unwrap_or_else(|err| panic!("fixture {} unreadable: {err}", path.display()))
}

/// Fresh temp directory holding copies of the named fixtures.
pub fn scratch_with(names: &[&str]) -> TempDir {
	let dir = tempfile::tempdir().expect("temp dir");
	for name in names {
		fs::copy(fixture_path(name), dir.path().join(name)).unwrap_or_else(|err| panic!("copy fixture {name}: {err}"));
	}
	dir
}

/// Parse a command's stdout as one JSON document.
pub fn parse_json(stdout: &[u8]) -> serde_json::Value {
	serde_json::from_slice(stdout).unwrap_or_else(|err| panic!("stdout is not JSON ({err}): {}", String::from_utf8_lossy(stdout)))
}
