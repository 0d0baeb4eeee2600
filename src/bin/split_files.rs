//! Move a random half of a directory's files into another directory.
//!
//! Usage: split_files <source-dir> <dest-dir>
//!
//! Entries that fail to move are skipped with a warning; the rest proceed.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use rand::seq::SliceRandom;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 2 {
        bail!("usage: split_files <source-dir> <dest-dir>");
    }

    let moved = split_move(Path::new(&args[0]), Path::new(&args[1]))?;
    println!("moved {} files", moved);
    Ok(())
}

/// Shuffle the source directory's files and move half of them into `dest`.
///
/// Returns the number of files actually moved.
fn split_move(source: &Path, dest: &Path) -> anyhow::Result<usize> {
    fs::create_dir_all(dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;

    let mut files: Vec<PathBuf> = fs::read_dir(source)
        .with_context(|| format!("failed to read {}", source.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    files.shuffle(&mut rand::rng());

    let half = files.len() / 2;
    let mut moved = 0;
    for path in files.iter().take(half) {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = dest.join(name);
        match move_file(path, &target) {
            Ok(()) => moved += 1,
            Err(err) => eprintln!("skipping {}: {}", path.display(), err),
        }
    }

    Ok(moved)
}

/// Rename, falling back to copy-and-delete across filesystems.
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}
