use crate::core::{interfaces::*, models::*};
use crate::infrastructure::{
    delete_files, needs_rebuild, prune_empty_dirs, transformer_for, BundleMerger,
    DirectoryScanner, FileCompressor,
};
use crate::utils::{Result, Timer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Runs the scan → staleness → compress → merge → cleanup pipeline for one job
pub struct AssetPipeline<'a> {
    transformer: &'a dyn Transformer,
    logger: &'a dyn BuildLogger,
}

impl<'a> AssetPipeline<'a> {
    pub fn new(transformer: &'a dyn Transformer, logger: &'a dyn BuildLogger) -> Self {
        Self {
            transformer,
            logger,
        }
    }

    pub fn run_asset_type(&self, job: &AssetJob) -> Result<AssetReport> {
        let _timer = Timer::start(&format!("{} pipeline", job.kind()), self.logger);

        let mut inputs: Vec<PathBuf> = job.files().to_vec();
        let mut dirs = Vec::new();

        if let Some(root) = job.input_dir().filter(|dir| dir.exists()) {
            let scan = DirectoryScanner::new(job.excludes(), job.suffix(), self.logger)
                .with_bundle(job.output_file())
                .scan(root)?;
            self.logger.debug(&format!(
                "Found {} {} files under {}",
                scan.files.len(),
                job.kind(),
                root.display()
            ));
            inputs.extend(scan.files);
            dirs = scan.dirs;
        }

        if !needs_rebuild(&inputs, job.output_file()) {
            self.logger
                .debug(&format!("{} bundle is up to date, nothing to do", job.kind()));
            return Ok(AssetReport::skipped(job.kind()));
        }

        let artifacts = FileCompressor::new(self.transformer, self.logger, job.suffix())
            .compress_all(&inputs)?;
        let merged = BundleMerger::new(self.logger).merge(&artifacts, job.output_file())?;
        let deleted_inputs = delete_files(inputs.iter().map(PathBuf::as_path))?;
        let pruned_dirs = prune_empty_dirs(&dirs)?;

        Ok(AssetReport {
            kind: job.kind(),
            skipped: false,
            compressed: artifacts.len(),
            merged,
            deleted_inputs,
            pruned_dirs,
        })
    }
}

/// Script and stylesheet pipelines behind one entry point
pub struct CompressorService {
    js_job: AssetJob,
    css_job: AssetJob,
    js_transformer: Arc<dyn Transformer>,
    css_transformer: Arc<dyn Transformer>,
    logger: Arc<dyn BuildLogger>,
}

impl CompressorService {
    pub fn new(js_job: AssetJob, css_job: AssetJob, logger: Arc<dyn BuildLogger>) -> Self {
        Self {
            js_transformer: transformer_for(js_job.kind()),
            css_transformer: transformer_for(css_job.kind()),
            js_job,
            css_job,
            logger,
        }
    }

    pub fn with_js_transformer(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.js_transformer = transformer;
        self
    }

    pub fn with_css_transformer(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.css_transformer = transformer;
        self
    }

    pub fn js_job(&self) -> &AssetJob {
        &self.js_job
    }

    pub fn css_job(&self) -> &AssetJob {
        &self.css_job
    }

    /// Scripts, then stylesheets. The first failure is returned and the
    /// remaining type is not attempted; call `compress_js` / `compress_css`
    /// separately when partial completion is wanted.
    pub fn compress_all(&self) -> Result<BuildReport> {
        let start = Instant::now();
        let assets = vec![self.compress_js()?, self.compress_css()?];

        Ok(BuildReport {
            assets,
            build_time: start.elapsed(),
        })
    }

    pub fn compress_js(&self) -> Result<AssetReport> {
        self.run(&self.js_job, self.js_transformer.as_ref())
    }

    pub fn compress_css(&self) -> Result<AssetReport> {
        self.run(&self.css_job, self.css_transformer.as_ref())
    }

    fn run(&self, job: &AssetJob, transformer: &dyn Transformer) -> Result<AssetReport> {
        if let Some(dir) = job.input_dir().filter(|dir| !dir.exists()) {
            self.logger.debug(&format!(
                "{} input directory {} does not exist, skipping scan",
                job.kind(),
                dir.display()
            ));
        }
        AssetPipeline::new(transformer, self.logger.as_ref()).run_asset_type(job)
    }
}

/// Shorthand for embedding hosts: run both kinds with the default transformers
pub fn compress_directories(
    js_input_dir: impl AsRef<Path>,
    js_output_file: impl AsRef<Path>,
    css_input_dir: impl AsRef<Path>,
    css_output_file: impl AsRef<Path>,
    logger: Arc<dyn BuildLogger>,
) -> Result<BuildReport> {
    let js_job = AssetJob::new(AssetKind::Script)
        .with_input_dir(js_input_dir.as_ref())
        .with_output_file(js_output_file.as_ref());
    let css_job = AssetJob::new(AssetKind::Stylesheet)
        .with_input_dir(css_input_dir.as_ref())
        .with_output_file(css_output_file.as_ref());

    CompressorService::new(js_job, css_job, logger).compress_all()
}
