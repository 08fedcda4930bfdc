//! ZIP extraction for downloaded browser archives.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;

#[cfg(unix)]
const S_IFMT: u32 = 0o170000;
#[cfg(unix)]
const S_IFLNK: u32 = 0o120000;

/// Extracts a ZIP archive held in memory into `dest`.
///
/// The first `strip_components` path components of every entry are dropped,
/// so `chrome-linux64/chrome` lands at `dest/chrome` with a strip of 1.
/// Entries whose names would escape `dest`, entries reached through a symlink
/// leading out of `dest`, and symlinks pointing out of `dest` are skipped. On
/// Unix, permission bits and symlinks recorded in the archive are restored.
///
/// Returns the number of files written.
pub fn extract_zip(data: &[u8], dest: &Path, strip_components: usize) -> Result<usize> {
	fs::create_dir_all(dest)?;
	let root = fs::canonicalize(dest)?;

	let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
	let mut written = 0;

	for i in 0..archive.len() {
		let mut entry = archive.by_index(i)?;

		let Some(enclosed) = entry.enclosed_name() else {
			warn!(target = "rocket", entry = entry.name(), "skipping archive entry outside destination");
			continue;
		};

		let stripped: PathBuf = enclosed.components().skip(strip_components).collect();
		if stripped.as_os_str().is_empty() {
			continue;
		}

		let outpath = dest.join(stripped);
		let parent = outpath.parent().unwrap_or(dest);
		if !resolves_within(&root, parent) {
			warn!(target = "rocket", entry = entry.name(), "skipping archive entry behind a symlink");
			continue;
		}

		if entry.is_dir() {
			fs::create_dir_all(&outpath)?;
			continue;
		}

		fs::create_dir_all(parent)?;
		remove_existing(&outpath)?;

		#[cfg(unix)]
		if let Some(mode) = entry.unix_mode() {
			if mode & S_IFMT == S_IFLNK {
				let mut target = String::new();
				io::Read::read_to_string(&mut entry, &mut target)?;
				let resolved = normalize(&fs::canonicalize(parent)?.join(&target));
				if !resolved.starts_with(&root) {
					warn!(target = "rocket", entry = entry.name(), link = %target, "skipping symlink outside destination");
					continue;
				}
				std::os::unix::fs::symlink(&target, &outpath)?;
				written += 1;
				continue;
			}
		}

		let mut outfile = fs::File::create(&outpath)?;
		io::copy(&mut entry, &mut outfile)?;
		written += 1;

		#[cfg(unix)]
		if let Some(mode) = entry.unix_mode() {
			use std::os::unix::fs::PermissionsExt;

			fs::set_permissions(&outpath, fs::Permissions::from_mode(mode & 0o7777))?;
		}
	}

	debug!(target = "rocket", files = written, dest = %dest.display(), "archive extracted");
	Ok(written)
}

/// Whether the deepest existing ancestor of `path` resolves inside `root`.
fn resolves_within(root: &Path, path: &Path) -> bool {
	let existing = path.ancestors().find(|candidate| fs::symlink_metadata(candidate).is_ok());
	match existing.map(fs::canonicalize) {
		Some(Ok(resolved)) => resolved.starts_with(root),
		_ => false,
	}
}

/// Folds `.` and `..` without touching the filesystem.
#[cfg(unix)]
fn normalize(path: &Path) -> PathBuf {
	use std::path::Component;

	let mut out = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				out.pop();
			}
			other => out.push(other),
		}
	}
	out
}

fn remove_existing(path: &Path) -> io::Result<()> {
	match fs::symlink_metadata(path) {
		Ok(meta) if meta.is_dir() => Ok(()),
		Ok(_) => fs::remove_file(path),
		Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
		Err(err) => Err(err),
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use tempfile::TempDir;
	use zip::write::SimpleFileOptions;

	use super::*;

	fn build_zip(entries: &[(&str, &[u8], u32)]) -> Vec<u8> {
		let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
		for (name, body, mode) in entries {
			let options = SimpleFileOptions::default().unix_permissions(*mode);
			if name.ends_with('/') {
				writer.add_directory(*name, options).unwrap();
			} else {
				writer.start_file(*name, options).unwrap();
				writer.write_all(body).unwrap();
			}
		}
		writer.finish().unwrap().into_inner()
	}

	#[test]
	fn strips_top_level_directory() {
		let tmp = TempDir::new().unwrap();
		let data = build_zip(&[
			("chrome-linux64/", b"", 0o755),
			("chrome-linux64/chrome", b"binary", 0o755),
			("chrome-linux64/locales/en-US.pak", b"pak", 0o644),
		]);

		let written = extract_zip(&data, tmp.path(), 1).unwrap();

		assert_eq!(written, 2);
		assert_eq!(fs::read(tmp.path().join("chrome")).unwrap(), b"binary");
		assert!(tmp.path().join("locales/en-US.pak").is_file());
		assert!(!tmp.path().join("chrome-linux64").exists());
	}

	#[test]
	fn overwrites_previous_files() {
		let tmp = TempDir::new().unwrap();
		fs::write(tmp.path().join("chromedriver"), "old").unwrap();
		let data = build_zip(&[("chromedriver-linux64/chromedriver", b"new", 0o755)]);

		extract_zip(&data, tmp.path(), 1).unwrap();

		assert_eq!(fs::read_to_string(tmp.path().join("chromedriver")).unwrap(), "new");
	}

	#[test]
	fn skips_entries_outside_destination() {
		let tmp = TempDir::new().unwrap();
		let dest = tmp.path().join("dest");
		let data = build_zip(&[("../escape.txt", b"nope", 0o644), ("pkg/ok.txt", b"ok", 0o644)]);

		let written = extract_zip(&data, &dest, 1).unwrap();

		assert_eq!(written, 1);
		assert!(dest.join("ok.txt").is_file());
		assert!(!tmp.path().join("escape.txt").exists());
	}

	#[cfg(unix)]
	#[test]
	fn symlinks_cannot_lead_out_of_destination() {
		let tmp = TempDir::new().unwrap();
		let dest = tmp.path().join("dest");
		let outside = tmp.path().join("outside");
		fs::create_dir(&outside).unwrap();

		let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
		let options = SimpleFileOptions::default;
		writer.add_symlink("pkg/absolute", outside.to_str().unwrap(), options()).unwrap();
		writer.add_symlink("pkg/relative", "../outside", options()).unwrap();
		writer.add_symlink("pkg/Current", "Versions/A", options()).unwrap();
		writer.start_file("pkg/Versions/A/lib", options()).unwrap();
		writer.write_all(b"lib").unwrap();
		writer.start_file("pkg/absolute/pwned.txt", options()).unwrap();
		writer.write_all(b"nope").unwrap();
		let data = writer.finish().unwrap().into_inner();

		let written = extract_zip(&data, &dest, 1).unwrap();

		assert_eq!(written, 3);
		assert_eq!(fs::read_dir(&outside).unwrap().count(), 0);
		assert!(fs::symlink_metadata(dest.join("relative")).is_err());
		assert_eq!(fs::read(dest.join("Current/lib")).unwrap(), b"lib");
		assert!(!fs::symlink_metadata(dest.join("absolute")).unwrap().file_type().is_symlink());
	}

	#[cfg(unix)]
	#[test]
	fn skips_entries_behind_existing_symlink() {
		let tmp = TempDir::new().unwrap();
		let dest = tmp.path().join("dest");
		let outside = tmp.path().join("outside");
		fs::create_dir_all(&dest).unwrap();
		fs::create_dir(&outside).unwrap();
		std::os::unix::fs::symlink(&outside, dest.join("link")).unwrap();

		let data = build_zip(&[("pkg/link/pwned.txt", b"nope", 0o644), ("pkg/ok.txt", b"ok", 0o644)]);

		let written = extract_zip(&data, &dest, 1).unwrap();

		assert_eq!(written, 1);
		assert!(!outside.join("pwned.txt").exists());
		assert!(dest.join("ok.txt").is_file());
	}

	#[cfg(unix)]
	#[test]
	fn restores_executable_bits() {
		use std::os::unix::fs::PermissionsExt;

		let tmp = TempDir::new().unwrap();
		let data = build_zip(&[("pkg/chromedriver", b"#!/bin/sh\n", 0o755)]);

		extract_zip(&data, tmp.path(), 1).unwrap();

		let mode = fs::metadata(tmp.path().join("chromedriver")).unwrap().permissions().mode();
		assert_eq!(mode & 0o111, 0o111);
	}
}
