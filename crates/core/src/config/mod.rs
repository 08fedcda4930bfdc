//! Persistent key/value configuration (`config.env`).
//!
//! Every mutation is written through to disk before it returns, so a value
//! set here is visible to any other process that opens the same file.
//! Comments, blank lines and unrecognised lines survive a rewrite.

mod format;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use self::format::{Line, is_valid_key, parse_line};
use crate::error::ConfigError;

/// Configuration file opened from disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
	path: PathBuf,
	lines: Vec<Line>,
}

impl ConfigStore {
	/// Opens the file at `path`, creating an empty one if it does not exist.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
		let path = path.into();
		let lines = match fs::read_to_string(&path) {
			Ok(content) => parse(&path, &content),
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				debug!(target = "rocket", path = %path.display(), "creating empty configuration file");
				write_file(&path, "")?;
				Vec::new()
			}
			Err(source) => return Err(ConfigError::Read { path, source }),
		};
		Ok(Self { path, lines })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Value stored under `key`. When a key appears more than once the last
	/// occurrence wins.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.lines.iter().rev().find_map(|line| match line {
			Line::Entry { key: k, value, .. } if k == key => Some(value.as_str()),
			_ => None,
		})
	}

	/// Stored keys in file order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.lines.iter().filter_map(Line::key)
	}

	/// Stores `value` under `key` and writes the file.
	///
	/// An existing entry is replaced in place; a new key is appended. On a
	/// write failure the in-memory state is left unchanged.
	pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
		if !is_valid_key(key) {
			return Err(ConfigError::InvalidKey(key.to_string()));
		}

		let mut lines = self.lines.clone();
		match lines.iter().rposition(|line| line.key() == Some(key)) {
			Some(last) => {
				lines[last] = Line::entry(key, value);
				let mut index = 0;
				lines.retain(|line| {
					let keep = index >= last || line.key() != Some(key);
					index += 1;
					keep
				});
			}
			None => lines.push(Line::entry(key, value)),
		}

		self.commit(lines)?;
		debug!(target = "rocket", key, path = %self.path.display(), "configuration value saved");
		Ok(())
	}

	/// Removes every entry for `key`. Returns whether anything was removed.
	pub fn remove(&mut self, key: &str) -> Result<bool, ConfigError> {
		let mut lines = self.lines.clone();
		let before = lines.len();
		lines.retain(|line| line.key() != Some(key));
		if lines.len() == before {
			return Ok(false);
		}

		self.commit(lines)?;
		debug!(target = "rocket", key, path = %self.path.display(), "configuration value removed");
		Ok(true)
	}

	fn commit(&mut self, lines: Vec<Line>) -> Result<(), ConfigError> {
		let mut content = String::new();
		for line in &lines {
			content.push_str(&line.render());
			content.push('\n');
		}
		write_file(&self.path, &content)?;
		self.lines = lines;
		Ok(())
	}
}

fn parse(path: &Path, content: &str) -> Vec<Line> {
	content
		.lines()
		.enumerate()
		.map(|(index, text)| {
			parse_line(text).unwrap_or_else(|text| {
				warn!(
					target = "rocket",
					path = %path.display(),
					line = index + 1,
					"ignoring malformed configuration line"
				);
				Line::Verbatim(text)
			})
		})
		.collect()
}

/// Replaces `path` with `content` by writing a sibling temp file and
/// renaming it into place. On Unix the file is created as 0600.
fn write_file(path: &Path, content: &str) -> Result<(), ConfigError> {
	let tmp = temp_path(path);
	let result = write_new(&tmp, content).and_then(|()| fs::rename(&tmp, path));
	if result.is_err() {
		let _ = fs::remove_file(&tmp);
	}
	result.map_err(|source| ConfigError::Write {
		path: path.to_path_buf(),
		source,
	})
}

fn temp_path(path: &Path) -> PathBuf {
	let name = path
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|| "config".to_string());
	path.with_file_name(format!(".{name}.tmp.{}", std::process::id()))
}

fn write_new(path: &Path, content: &str) -> io::Result<()> {
	match fs::remove_file(path) {
		Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(err),
		_ => {}
	}

	let mut options = fs::OpenOptions::new();
	options.write(true).create_new(true);
	#[cfg(unix)]
	{
		use std::os::unix::fs::OpenOptionsExt;
		options.mode(0o600);
	}

	let mut file = options.open(path)?;
	file.write_all(content.as_bytes())?;
	file.sync_all()
}
