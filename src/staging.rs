use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;
use flate2::{write::GzEncoder, Compression};

use crate::assignment::Assignment;
use crate::config::Layout;
use crate::error::{Error, Result};

/// Copies a candidate source into `rendu/<assignment>/`, keeping the
/// original filename. A same-named file already staged is overwritten;
/// last write wins.
pub fn stage(layout: &Layout, assignment: Assignment, source: &Path) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(Error::SourceNotFound(source.to_owned()));
    }
    let dir = layout.staging_dir(assignment);
    fs::create_dir_all(&dir)?;
    let name = source
        .file_name()
        .ok_or_else(|| Error::SourceNotFound(source.to_owned()))?;
    let dest = dir.join(name);
    fs::copy(source, &dest)?;
    println!("Copied to {}", dest.display());
    Ok(dest)
}

/// The single staged source for an assignment. Zero staged files is
/// `EmptyStaging`; more than one is `AmbiguousStaging` rather than a silent
/// pick of the first match.
pub fn staged_source(layout: &Layout, assignment: Assignment) -> Result<PathBuf> {
    let dir = layout.staging_dir(assignment);
    let mut files = if dir.is_dir() {
        staged_files(&dir)?
    } else {
        Vec::new()
    };
    match files.len() {
        0 => Err(Error::EmptyStaging(assignment)),
        1 => Ok(files.remove(0)),
        count => Err(Error::AmbiguousStaging { assignment, count }),
    }
}

/// Assignments with exactly one staged source, in registry order.
/// Ambiguous staging dirs are reported and skipped.
pub fn find_staged(layout: &Layout) -> Vec<(Assignment, PathBuf)> {
    let mut found = Vec::new();
    for assignment in Assignment::ALL {
        match staged_source(layout, assignment) {
            Ok(path) => found.push((assignment, path)),
            Err(Error::EmptyStaging(_)) => {}
            Err(e) => eprintln!("{} {}", "Skipping:".yellow(), e),
        }
    }
    found
}

/// Bundles the full contents of `rendu/<assignment>/` into
/// `submissions/<assignment>_<timestamp>.tar.gz`. Requires at least one
/// staged source in the dir; nothing is written otherwise. A fresh timestamp per call
/// means archives are never overwritten.
pub fn archive(layout: &Layout, assignment: Assignment) -> Result<PathBuf> {
    let staging = layout.staging_dir(assignment);
    if !staging.is_dir() || staged_files(&staging)?.is_empty() {
        return Err(Error::EmptyStaging(assignment));
    }

    fs::create_dir_all(layout.archive_dir())?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = layout
        .archive_dir()
        .join(format!("{assignment}_{timestamp}.tar.gz"));

    let encoder = GzEncoder::new(File::create(&path)?, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append_dir_all(".", &staging)?;
    builder.into_inner()?.finish()?;

    println!("Submission archived: {}", path.display());
    Ok(path)
}

/// The `.c` files in a staging directory. Other siblings (editor backups,
/// notes) are not submissions and never count towards ambiguity.
fn staged_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "c") {
            files.push(path);
        }
    }
    // read_dir order is arbitrary; sort for deterministic reporting.
    files.sort();
    Ok(files)
}
