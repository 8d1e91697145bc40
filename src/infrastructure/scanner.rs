use crate::core::{interfaces::BuildLogger, models::ScanResult};
use crate::utils::{CrunchError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Marker inserted before the suffix of a minified file name
pub const MINIFIED_MARKER: &str = ".min";

/// Case-insensitive `name.ends_with(suffix)`
pub fn has_suffix(name: &str, suffix: &str) -> bool {
    if name.len() < suffix.len() {
        return false;
    }
    let start = name.len() - suffix.len();
    name.is_char_boundary(start) && name[start..].eq_ignore_ascii_case(suffix)
}

/// True for names like `app.min.js` / `APP.MIN.JS` when `suffix` is `.js`
pub fn is_minified_name(name: &str, suffix: &str) -> bool {
    has_suffix(name, &format!("{}{}", MINIFIED_MARKER, suffix))
}

/// `dir/app.JS` -> `dir/app.min.js`
pub fn minified_sibling(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = if has_suffix(&name, suffix) {
        &name[..name.len() - suffix.len()]
    } else {
        name.as_str()
    };
    path.with_file_name(format!("{}{}{}", stem, MINIFIED_MARKER, suffix))
}

/// Recursive depth-first walk of one input tree
pub struct DirectoryScanner<'a> {
    excludes: &'a [String],
    suffix: &'a str,
    logger: &'a dyn BuildLogger,
    bundle: Option<PathBuf>,
}

impl<'a> DirectoryScanner<'a> {
    pub fn new(excludes: &'a [String], suffix: &'a str, logger: &'a dyn BuildLogger) -> Self {
        Self {
            excludes,
            suffix,
            logger,
            bundle: None,
        }
    }

    /// Leave the job's own bundle alone when it lives inside the scanned tree
    pub fn with_bundle(mut self, bundle: Option<&Path>) -> Self {
        self.bundle = bundle.and_then(|path| std::path::absolute(path).ok());
        self
    }

    /// Walk `root`, collecting sources and visited directories.
    ///
    /// Stale minified files are deleted on the way. Entries named in the
    /// exclude list are skipped whole, directories included.
    pub fn scan(&self, root: &Path) -> Result<ScanResult> {
        let root = std::path::absolute(root).map_err(|e| CrunchError::scan(root, e))?;
        let mut result = ScanResult::default();
        self.visit(&root, &mut result)?;
        Ok(result)
    }

    fn visit(&self, dir: &Path, result: &mut ScanResult) -> Result<()> {
        result.dirs.push(dir.to_path_buf());

        let mut entries = fs::read_dir(dir)
            .map_err(|e| CrunchError::scan(dir, e))?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| CrunchError::scan(dir, e))?;
        // read_dir order is platform dependent
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.excludes.iter().any(|excluded| *excluded == name) {
                self.logger.debug(&format!("Excluded: {}", entry.path().display()));
                continue;
            }

            let path = entry.path();
            if self.bundle.as_deref() == Some(path.as_path()) {
                self.logger.debug(&format!("Skipping bundle: {}", path.display()));
                continue;
            }

            if path.is_dir() {
                self.visit(&path, result)?;
            } else if is_minified_name(&name, self.suffix) {
                fs::remove_file(&path).map_err(|e| CrunchError::cleanup_file(&path, e))?;
                self.logger.debug(&format!("Deleted stale: {}", path.display()));
            } else if has_suffix(&name, self.suffix) {
                result.files.push(path);
            }
        }

        Ok(())
    }
}
