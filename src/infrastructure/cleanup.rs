use crate::utils::{CrunchError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What happened to a directory offered for pruning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneOutcome {
    Removed,
    NotEmpty,
    Missing,
}

/// Delete every file, stopping at the first one that cannot be deleted
pub fn delete_files<'a, I>(files: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut deleted = 0;
    for file in files {
        fs::remove_file(file).map_err(|e| CrunchError::cleanup_file(file, e))?;
        deleted += 1;
    }
    Ok(deleted)
}

/// `Ok(None)` when the directory is gone, otherwise whether it has no entries
pub fn is_empty_dir(dir: &Path) -> io::Result<Option<bool>> {
    match fs::read_dir(dir) {
        Ok(mut entries) => Ok(Some(entries.next().is_none())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Remove `dir` only if it is empty
pub fn prune_dir(dir: &Path) -> Result<PruneOutcome> {
    match is_empty_dir(dir).map_err(|e| CrunchError::cleanup_dir(dir, e))? {
        None => Ok(PruneOutcome::Missing),
        Some(false) => Ok(PruneOutcome::NotEmpty),
        Some(true) => {
            fs::remove_dir(dir).map_err(|e| CrunchError::cleanup_dir(dir, e))?;
            Ok(PruneOutcome::Removed)
        }
    }
}

/// Deepest directories first, so children are emptied before their parents
/// are looked at. Same-depth ties fall back to reverse path order.
pub fn pruning_order(dirs: &[PathBuf]) -> Vec<&Path> {
    let mut ordered: Vec<&Path> = dirs.iter().map(PathBuf::as_path).collect();
    ordered.sort_by(|a, b| {
        b.components()
            .count()
            .cmp(&a.components().count())
            .then_with(|| b.cmp(a))
    });
    ordered.dedup();
    ordered
}

/// Delete each visited directory that the run left empty. Returns how many went.
pub fn prune_empty_dirs(dirs: &[PathBuf]) -> Result<usize> {
    let mut removed = 0;
    for dir in pruning_order(dirs) {
        if prune_dir(dir)? == PruneOutcome::Removed {
            removed += 1;
        }
    }
    Ok(removed)
}
