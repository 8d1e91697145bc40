use std::error::Error as StdError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single file could not be turned into its minified sibling
#[derive(Error, Debug)]
pub enum TransformFailure {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{message}")]
    Syntax {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
}

impl TransformFailure {
    pub fn syntax(message: impl Into<String>, location: Option<(usize, usize)>) -> Self {
        Self::Syntax {
            message: message.into(),
            line: location.map(|(line, _)| line),
            column: location.map(|(_, column)| column),
        }
    }
}

/// What kind of filesystem entry a cleanup step failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Dir => write!(f, "dir"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CrunchError {
    #[error("Unable to scan directory {}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("An error occurred while compressing {}", path.display())]
    Transform {
        path: PathBuf,
        #[source]
        source: TransformFailure,
    },

    #[error("{message} {}", path.display())]
    Merge {
        path: PathBuf,
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("Unable to delete {kind} {}", path.display())]
    Cleanup {
        path: PathBuf,
        kind: EntryKind,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CrunchError {
    pub fn scan(path: &Path, source: io::Error) -> Self {
        Self::Scan {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn transform(path: &Path, source: impl Into<TransformFailure>) -> Self {
        Self::Transform {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub fn merge(path: &Path, message: &str, source: io::Error) -> Self {
        Self::Merge {
            path: path.to_path_buf(),
            message: message.to_string(),
            source,
        }
    }

    pub fn cleanup_file(path: &Path, source: io::Error) -> Self {
        Self::Cleanup {
            path: path.to_path_buf(),
            kind: EntryKind::File,
            source,
        }
    }

    pub fn cleanup_dir(path: &Path, source: io::Error) -> Self {
        Self::Cleanup {
            path: path.to_path_buf(),
            kind: EntryKind::Dir,
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: String) -> Self {
        Self::Config(message)
    }

    /// The path the failure is about, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            CrunchError::Scan { path, .. }
            | CrunchError::Transform { path, .. }
            | CrunchError::Merge { path, .. }
            | CrunchError::Cleanup { path, .. } => Some(path),
            CrunchError::Config(_) | CrunchError::Io(_) => None,
        }
    }

    /// Format error with its full cause chain and, for syntax errors, the location
    pub fn format_detailed(&self) -> String {
        let mut output = format!("❌ {}", self);

        if let CrunchError::Transform {
            source: TransformFailure::Syntax {
                line: Some(line),
                column: Some(column),
                ..
            },
            ..
        } = self
        {
            output.push_str(&format!("\n📍 Location: line {}, column {}", line, column));
        }

        let mut cause = self.source();
        while let Some(err) = cause {
            output.push_str(&format!("\n   caused by: {}", err));
            cause = err.source();
        }

        output
    }
}

pub type Result<T> = std::result::Result<T, CrunchError>;
