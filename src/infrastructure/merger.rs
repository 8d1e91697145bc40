use crate::core::interfaces::BuildLogger;
use crate::core::models::{CompressedArtifact, MergedOutput};
use crate::infrastructure::cleanup::delete_files;
use crate::utils::{CrunchError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Merge order: file name, then full path so equal names stay deterministic
pub fn merge_order(artifacts: &[CompressedArtifact]) -> Vec<&Path> {
    let mut ordered: Vec<&Path> = artifacts.iter().map(|a| a.path.as_path()).collect();
    ordered.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
    ordered
}

/// Concatenates minified files into the bundle, replacing any previous one
pub struct BundleMerger<'a> {
    logger: &'a dyn BuildLogger,
}

impl<'a> BundleMerger<'a> {
    pub fn new(logger: &'a dyn BuildLogger) -> Self {
        Self { logger }
    }

    /// Returns `None` without touching anything when there is no output path.
    ///
    /// On success the intermediates are deleted. A failure while copying
    /// leaves the partially written bundle behind.
    pub fn merge(
        &self,
        artifacts: &[CompressedArtifact],
        output: Option<&Path>,
    ) -> Result<Option<MergedOutput>> {
        let Some(output) = output else {
            return Ok(None);
        };

        match fs::remove_file(output) {
            Ok(()) => self.logger.debug(&format!("Removed previous bundle {}", output.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(CrunchError::merge(output, "Unable to delete file", e)),
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| CrunchError::merge(output, "Unable to create parent of", e))?;
        }

        let ordered = merge_order(artifacts);
        self.append_all(&ordered, output)?;

        let size = fs::metadata(output)
            .map(|metadata| metadata.len())
            .map_err(|e| CrunchError::merge(output, "Unable to stat", e))?;
        self.logger.info(&format!("Merged: {}", output.display()));

        delete_files(ordered)?;

        Ok(Some(MergedOutput {
            path: PathBuf::from(output),
            size,
        }))
    }

    fn append_all(&self, ordered: &[&Path], output: &Path) -> Result<()> {
        let failed = |e| CrunchError::merge(output, "An error occurred while merging files into", e);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(output)
            .map_err(failed)?;
        let mut writer = BufWriter::new(file);

        for input in ordered {
            // One input handle open at a time
            let mut reader = File::open(input).map_err(failed)?;
            io::copy(&mut reader, &mut writer).map_err(failed)?;
        }

        writer.flush().map_err(failed)
    }
}
