use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::unity::validate::validate;
use crate::unity::{Document, IntegrityIssue, Result, UnityError, read_unity_file};

/// Filesystem primitives used by the commit protocol.
pub trait CommitFs {
	/// Whether `path` exists.
	fn exists(&self, path: &Path) -> bool;
	/// Copy `from` to `to`, replacing `to`.
	fn copy(&mut self, from: &Path, to: &Path) -> io::Result<()>;
	/// Create or truncate `path` with `bytes`.
	fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()>;
	/// Atomically move `from` over `to`.
	fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()>;
	/// Delete `path`.
	fn remove(&mut self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl CommitFs for StdFs {
	fn exists(&self, path: &Path) -> bool {
		path.exists()
	}

	fn copy(&mut self, from: &Path, to: &Path) -> io::Result<()> {
		fs::copy(from, to).map(|_| ())
	}

	fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
		fs::write(path, bytes)
	}

	fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()> {
		fs::rename(from, to)
	}

	fn remove(&mut self, path: &Path) -> io::Result<()> {
		fs::remove_file(path)
	}
}

/// Commit behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitOptions {
	/// Leave `<file>.bak` next to the target after a successful write.
	pub keep_backup: bool,
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
	let mut name = path.file_name().map(|item| item.to_os_string()).unwrap_or_default();
	name.push(suffix);
	path.with_file_name(name)
}

/// Backup path used while committing `path`.
pub fn backup_path(path: &Path) -> PathBuf {
	sibling(path, ".bak")
}

/// Write `content` to `path` through a temp file and rename, restoring the `.bak` copy on failure.
pub fn write_atomic(path: &Path, content: &str, options: &CommitOptions) -> Result<()> {
	write_atomic_with(&mut StdFs, path, content, options)
}

/// [`write_atomic`] over an arbitrary [`CommitFs`].
pub fn write_atomic_with(fs: &mut dyn CommitFs, path: &Path, content: &str, options: &CommitOptions) -> Result<()> {
	let backup = backup_path(path);
	let temp = sibling(path, ".tmp");
	let had_original = fs.exists(path);

	if had_original {
		fs.copy(path, &backup)?;
	}

	let written = fs.write(&temp, content.as_bytes()).and_then(|()| fs.rename(&temp, path));
	if let Err(err) = written {
		warn!("write of {} failed ({err}); rolling back", path.display());
		let _ = fs.remove(&temp);
		if had_original {
			fs.copy(&backup, path)?;
			let _ = fs.remove(&backup);
		} else if fs.exists(path) {
			let _ = fs.remove(path);
		}
		return Err(UnityError::Io(err));
	}

	if had_original && !options.keep_backup {
		if let Err(err) = fs.remove(&backup) {
			debug!("could not remove backup {}: {err}", backup.display());
		}
	}
	Ok(())
}

/// One loaded scene/prefab/asset file being edited.
#[derive(Debug, Clone)]
pub struct UnityFile {
	path: PathBuf,
	doc: Document,
	baseline: HashSet<IntegrityIssue>,
}

impl UnityFile {
	/// Load and index `path`, recording its pre-existing integrity issues.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let text = read_unity_file(&path)?;
		let doc = Document::parse(&text)?;
		let baseline = doc.integrity_issues().into_iter().collect();
		Ok(Self { path, doc, baseline })
	}

	/// Start a brand-new file; nothing is written until [`UnityFile::commit`].
	pub fn create(path: impl AsRef<Path>, doc: Document) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			doc,
			baseline: HashSet::new(),
		}
	}

	/// Target path.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Loaded document.
	pub fn document(&self) -> &Document {
		&self.doc
	}

	/// Mutable document.
	pub fn document_mut(&mut self) -> &mut Document {
		&mut self.doc
	}

	/// Validate and atomically persist the document.
	pub fn commit(&self, options: &CommitOptions) -> Result<()> {
		self.commit_with(&mut StdFs, options)
	}

	/// [`UnityFile::commit`] over an arbitrary [`CommitFs`].
	pub fn commit_with(&self, fs: &mut dyn CommitFs, options: &CommitOptions) -> Result<()> {
		validate(&self.doc, &self.baseline)?;
		write_atomic_with(fs, &self.path, &self.doc.render(), options)?;
		info!("wrote {} ({} blocks)", self.path.display(), self.doc.len());
		Ok(())
	}
}

#[cfg(test)]
mod tests;
