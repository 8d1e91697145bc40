//! Crunch - build-time asset pipeline
//!
//! Scans script and stylesheet directories, minifies every source (oxc for
//! JavaScript, lightningcss for CSS), concatenates the results in file-name
//! order into one bundle per asset type, then deletes the sources and any
//! directory the run left empty.

pub mod utils;
pub mod core;
pub mod infrastructure;
pub mod cli;

pub use crate::core::{
    compress_directories, AssetJob, AssetKind, AssetPipeline, AssetReport, BuildLogger,
    BuildReport, CompressorService, Diagnostic, DiagnosticSink, Severity, Transformer,
};
pub use crate::utils::{CrunchError, Result, TransformFailure};
