use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The two categories of source file the pipeline knows how to bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Script,
    Stylesheet,
}

impl AssetKind {
    /// Suffix identifying source files of this kind
    pub fn suffix(&self) -> &'static str {
        match self {
            AssetKind::Script => ".js",
            AssetKind::Stylesheet => ".css",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Script => "JS",
            AssetKind::Stylesheet => "CSS",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Configuration of one asset type for one pipeline run.
///
/// Built once through the consuming `with_*` methods and only ever read
/// afterwards; the pipeline borrows it immutably for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetJob {
    kind: AssetKind,
    input_dir: Option<PathBuf>,
    output_file: Option<PathBuf>,
    excludes: Vec<String>,
    files: Vec<PathBuf>,
}

impl AssetJob {
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            input_dir: None,
            output_file: None,
            excludes: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = Some(dir.into());
        self
    }

    pub fn with_output_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.output_file = Some(file.into());
        self
    }

    pub fn with_excludes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.excludes.contains(&name) {
                self.excludes.push(name);
            }
        }
        self
    }

    /// Add excludes from a `;`-separated list such as `"vendor; legacy.js"`
    pub fn with_exclude_list(self, raw: &str) -> Self {
        self.with_excludes(parse_exclude_list(raw))
    }

    /// Pre-populate the input files, for callers that supply an explicit
    /// list instead of (or on top of) a scanned directory
    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn suffix(&self) -> &'static str {
        self.kind.suffix()
    }

    pub fn input_dir(&self) -> Option<&Path> {
        self.input_dir.as_deref()
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

/// Split a `;`-separated exclusion list. Entries are trimmed and empty ones dropped.
pub fn parse_exclude_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Files and directories found while walking one input tree
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Matched sources, in traversal order
    pub files: Vec<PathBuf>,
    /// Every directory visited, root first
    pub dirs: Vec<PathBuf>,
}

/// A minified sibling written next to its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedArtifact {
    pub source: PathBuf,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedOutput {
    pub path: PathBuf,
    pub size: u64,
}

/// Outcome of one asset type's run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub kind: AssetKind,
    /// True when the staleness check found nothing to do
    pub skipped: bool,
    pub compressed: usize,
    pub merged: Option<MergedOutput>,
    pub deleted_inputs: usize,
    pub pruned_dirs: usize,
}

impl AssetReport {
    pub fn skipped(kind: AssetKind) -> Self {
        Self {
            kind,
            skipped: true,
            compressed: 0,
            merged: None,
            deleted_inputs: 0,
            pruned_dirs: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub assets: Vec<AssetReport>,
    pub build_time: Duration,
}

impl BuildReport {
    pub fn asset(&self, kind: AssetKind) -> Option<&AssetReport> {
        self.assets.iter().find(|report| report.kind == kind)
    }
}
