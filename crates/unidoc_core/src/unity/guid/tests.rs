use std::collections::HashMap;
use std::fs;
use std::path::Path;

use unidoc_testkit::fixture_path;

use crate::unity::{GuidCache, GuidResolver, UnityError, generate_guid, is_valid_guid, meta_path, prefab_meta, read_meta_guid};

fn cache() -> GuidCache {
	GuidCache::new(
		"/project",
		HashMap::from([
			("0a1b2c3d4e5f60718293a4b5c6d7e8f9".to_owned(), "Assets/Scripts/PlayerController.cs".to_owned()),
			("4c5d6e7f8091a2b3c4d5e6f708192a3b".to_owned(), "Assets/Scripts/EnemyBrain.cs".to_owned()),
			("9e8d7c6b5a4938271605f4e3d2c1b0a9".to_owned(), "Assets/Prefabs/EnemyBrain.prefab".to_owned()),
		]),
	)
}

#[test]
fn resolves_guids_and_script_stems() {
	let cache = cache();
	assert_eq!(cache.len(), 3);
	assert_eq!(cache.resolve("0a1b2c3d4e5f60718293a4b5c6d7e8f9"), Some("Assets/Scripts/PlayerController.cs"));
	assert_eq!(cache.resolve("ffffffffffffffffffffffffffffffff"), None);
	assert_eq!(cache.find_script("EnemyBrain"), Some("4c5d6e7f8091a2b3c4d5e6f708192a3b"));
	assert_eq!(cache.find_script("Missing"), None);
}

#[test]
fn relative_paths_join_the_project_root() {
	let cache = cache();
	assert_eq!(cache.absolute("Assets/a.prefab"), Path::new("/project/Assets/a.prefab"));
	assert_eq!(cache.absolute("/elsewhere/b.prefab"), Path::new("/elsewhere/b.prefab"));
}

#[test]
fn generated_guids_are_valid_and_distinct() {
	let first = generate_guid();
	let second = generate_guid();
	assert!(is_valid_guid(&first));
	assert_ne!(first, second);
}

#[test]
fn meta_guid_is_read_from_sidecar() {
	let source = fixture_path("enemy.prefab");
	assert_eq!(meta_path(&source), fixture_path("enemy.prefab.meta"));
	assert_eq!(read_meta_guid(&source).expect("meta guid"), "5f1e2d3c4b5a69788796a5b4c3d2e1f0");
}

#[test]
fn missing_or_broken_meta_is_unresolved() {
	let dir = tempfile::tempdir().expect("temp dir");
	let asset = dir.path().join("lonely.prefab");
	let err = read_meta_guid(&asset).expect_err("no meta");
	assert!(matches!(err, UnityError::SourceUnreadable { .. }));

	fs::write(meta_path(&asset), "fileFormatVersion: 2\nguid: nope\n").expect("write meta");
	assert!(read_meta_guid(&asset).is_err());
}

#[test]
fn prefab_meta_round_trips_its_guid() {
	let dir = tempfile::tempdir().expect("temp dir");
	let asset = dir.path().join("variant.prefab");
	let guid = generate_guid();
	fs::write(meta_path(&asset), prefab_meta(&guid)).expect("write meta");
	assert_eq!(read_meta_guid(&asset).expect("meta guid"), guid);
	assert!(prefab_meta(&guid).contains("PrefabImporter:"));
}
