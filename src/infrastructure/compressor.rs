use crate::core::interfaces::{BuildLogger, Diagnostic, DiagnosticSink, Severity, Transformer};
use crate::core::models::CompressedArtifact;
use crate::infrastructure::scanner::minified_sibling;
use crate::utils::{CrunchError, Result, TransformFailure};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Routes one file's diagnostics to the build logger
struct FileDiagnostics<'a> {
    file: &'a Path,
    logger: &'a dyn BuildLogger,
}

impl DiagnosticSink for FileDiagnostics<'_> {
    fn report(&self, diagnostic: Diagnostic) {
        let line = format!("{}: {}", self.file.display(), diagnostic);
        match diagnostic.severity {
            Severity::Error => self.logger.error(&line),
            Severity::Warning => self.logger.warn(&line),
        }
    }
}

/// Writes a minified sibling for each source file through a `Transformer`
pub struct FileCompressor<'a> {
    transformer: &'a dyn Transformer,
    logger: &'a dyn BuildLogger,
    suffix: &'a str,
}

impl<'a> FileCompressor<'a> {
    pub fn new(transformer: &'a dyn Transformer, logger: &'a dyn BuildLogger, suffix: &'a str) -> Self {
        Self {
            transformer,
            logger,
            suffix,
        }
    }

    /// Compress every input in order; the first failure aborts the lot.
    ///
    /// Sources whose names differ only in suffix case share a minified
    /// sibling, so the second one is rejected before it overwrites anything.
    pub fn compress_all(&self, inputs: &[PathBuf]) -> Result<Vec<CompressedArtifact>> {
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut artifacts = Vec::with_capacity(inputs.len());

        for input in inputs {
            let (source_path, target) = self.target_for(input)?;
            if let Some(first) = claimed.get(&target) {
                let clash = io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!(
                        "{} is also minified to {}",
                        first.display(),
                        target.display()
                    ),
                );
                return Err(CrunchError::transform(&source_path, clash));
            }
            claimed.insert(target, source_path);
            artifacts.push(self.compress_one(input)?);
        }

        Ok(artifacts)
    }

    fn target_for(&self, input: &Path) -> Result<(PathBuf, PathBuf)> {
        let source_path =
            std::path::absolute(input).map_err(|e| CrunchError::transform(input, e))?;
        let target = minified_sibling(&source_path, self.suffix);
        Ok((source_path, target))
    }

    pub fn compress_one(&self, input: &Path) -> Result<CompressedArtifact> {
        let (source_path, target) = self.target_for(input)?;

        // Both handles are dropped on every return path below
        let mut reader = BufReader::new(
            File::open(&source_path).map_err(|e| CrunchError::transform(&source_path, e))?,
        );
        let mut writer = BufWriter::new(
            File::create(&target).map_err(|e| CrunchError::transform(&source_path, e))?,
        );

        self.logger.debug(&format!(
            "Processing {} with {}",
            source_path.display(),
            self.transformer.name()
        ));

        let mut source = String::new();
        reader
            .read_to_string(&mut source)
            .map_err(|e| CrunchError::transform(&source_path, e))?;

        let sink = FileDiagnostics {
            file: &source_path,
            logger: self.logger,
        };
        let minified = self
            .transformer
            .compress(&source, &sink)
            .map_err(|e| CrunchError::transform(&source_path, e))?;

        writer
            .write_all(minified.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| CrunchError::transform(&source_path, TransformFailure::Io(e)))?;

        self.logger.info(&format!("Compressed: {}", target.display()));

        Ok(CompressedArtifact {
            source: source_path,
            path: target,
        })
    }
}
