use std::fs;
use std::io;
use std::path::Path;

use unidoc_testkit::{fixture_text, scratch_with};

use crate::unity::{CommitFs, CommitOptions, Selector, StdFs, UnityError, UnityFile, backup_path, create_game_object, write_atomic};

/// Real filesystem whose rename always fails.
struct FailingRename;

impl CommitFs for FailingRename {
	fn exists(&self, path: &Path) -> bool {
		StdFs.exists(path)
	}

	fn copy(&mut self, from: &Path, to: &Path) -> io::Result<()> {
		StdFs.copy(from, to)
	}

	fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
		StdFs.write(path, bytes)
	}

	fn rename(&mut self, _from: &Path, _to: &Path) -> io::Result<()> {
		Err(io::Error::other("simulated rename failure"))
	}

	fn remove(&mut self, path: &Path) -> io::Result<()> {
		StdFs.remove(path)
	}
}

/// Rename that half-writes the target before failing.
struct TornRename;

impl CommitFs for TornRename {
	fn exists(&self, path: &Path) -> bool {
		StdFs.exists(path)
	}

	fn copy(&mut self, from: &Path, to: &Path) -> io::Result<()> {
		StdFs.copy(from, to)
	}

	fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
		StdFs.write(path, bytes)
	}

	fn rename(&mut self, _from: &Path, to: &Path) -> io::Result<()> {
		fs::write(to, "%YAML 1.1\n--- !u!1 &")?;
		Err(io::Error::other("disk full"))
	}

	fn remove(&mut self, path: &Path) -> io::Result<()> {
		StdFs.remove(path)
	}
}

#[test]
fn commit_writes_and_cleans_up() {
	let dir = scratch_with(&["basic.unity"]);
	let path = dir.path().join("basic.unity");
	let mut file = UnityFile::open(&path).expect("opens");
	create_game_object(file.document_mut(), "Lamp", None).expect("create");
	file.commit(&CommitOptions::default()).expect("commit");

	let written = fs::read_to_string(&path).expect("read back");
	assert!(written.contains("m_Name: Lamp"));
	assert!(!backup_path(&path).exists());
	assert!(!dir.path().join("basic.unity.tmp").exists());
}

#[test]
fn keep_backup_leaves_previous_content() {
	let dir = scratch_with(&["basic.unity"]);
	let path = dir.path().join("basic.unity");
	let mut file = UnityFile::open(&path).expect("opens");
	create_game_object(file.document_mut(), "Lamp", Some(&Selector::parse("World"))).expect("create");
	file.commit(&CommitOptions { keep_backup: true }).expect("commit");

	let backup = fs::read_to_string(backup_path(&path)).expect("backup kept");
	assert_eq!(backup, fixture_text("basic.unity"));
}

#[test]
fn failed_rename_leaves_original_byte_identical() {
	let dir = scratch_with(&["basic.unity"]);
	let path = dir.path().join("basic.unity");
	let before = fs::read(&path).expect("read");

	let mut file = UnityFile::open(&path).expect("opens");
	create_game_object(file.document_mut(), "Lamp", None).expect("create");
	let err = file.commit_with(&mut FailingRename, &CommitOptions::default()).expect_err("rename fails");
	assert!(matches!(err, UnityError::Io(_)));

	assert_eq!(fs::read(&path).expect("read"), before);
	assert!(!backup_path(&path).exists());
	assert!(!dir.path().join("basic.unity.tmp").exists());
}

#[test]
fn torn_write_is_rolled_back_from_backup() {
	let dir = scratch_with(&["basic.unity"]);
	let path = dir.path().join("basic.unity");
	let before = fs::read(&path).expect("read");

	let mut file = UnityFile::open(&path).expect("opens");
	create_game_object(file.document_mut(), "Lamp", None).expect("create");
	file.commit_with(&mut TornRename, &CommitOptions::default()).expect_err("rename fails");

	assert_eq!(fs::read(&path).expect("read"), before);
}

#[test]
fn validation_failure_blocks_the_write() {
	let dir = scratch_with(&["basic.unity"]);
	let path = dir.path().join("basic.unity");
	let before = fs::read(&path).expect("read");

	let mut file = UnityFile::open(&path).expect("opens");
	let script = file.document_mut().get_mut(203).expect("player script");
	let broken = script.text().replace("weapon: {fileID: 502}", "weapon: {fileID: 123456}");
	script.set_text(broken).expect("header intact");

	let err = file.commit(&CommitOptions::default()).expect_err("dangling reference");
	assert!(matches!(err, UnityError::Validation { .. }));
	assert_eq!(fs::read(&path).expect("read"), before);
}

#[test]
fn write_atomic_creates_new_files() {
	let dir = tempfile::tempdir().expect("temp dir");
	let path = dir.path().join("fresh.asset");
	write_atomic(&path, "content\n", &CommitOptions::default()).expect("write");
	assert_eq!(fs::read_to_string(&path).expect("read"), "content\n");
	assert!(!backup_path(&path).exists());
}
