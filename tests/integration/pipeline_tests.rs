use crunch::infrastructure::{LightningCssTransformer, OxcJsTransformer};
use crunch::utils::{LogLevel, RecordingLogger};
use crunch::{
    compress_directories, AssetJob, AssetKind, AssetPipeline, CompressorService, Diagnostic,
    DiagnosticSink, Transformer,
};
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

struct IgnoreDiagnostics;

impl DiagnosticSink for IgnoreDiagnostics {
    fn report(&self, _diagnostic: Diagnostic) {}
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn minify(transformer: &dyn Transformer, source: &str) -> String {
    transformer.compress(source, &IgnoreDiagnostics).unwrap()
}

fn js_job(input: &Path, output: &Path) -> AssetJob {
    AssetJob::new(AssetKind::Script)
        .with_input_dir(input)
        .with_output_file(output)
}

#[test]
fn test_two_scripts_are_bundled_in_name_order() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("js");
    let output = temp_dir.path().join("bundle.js");
    write(&input.join("b.js"), "var y = 2;");
    write(&input.join("a.js"), "var x = 1;");

    let transformer = OxcJsTransformer::new();
    let logger = RecordingLogger::new();
    let report = AssetPipeline::new(&transformer, &logger)
        .run_asset_type(&js_job(&input, &output))
        .unwrap();

    let expected = format!(
        "{}{}",
        minify(&transformer, "var x = 1;"),
        minify(&transformer, "var y = 2;")
    );
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
    assert!(!input.exists(), "input directory is pruned");
    assert_eq!(report.compressed, 2);

    let info = logger.messages(LogLevel::Info);
    assert_eq!(
        info.iter().filter(|line| line.starts_with("Compressed: ")).count(),
        2
    );
    assert_eq!(info.last().unwrap(), &format!("Merged: {}", output.display()));
}

#[test]
fn test_excluded_script_stays_behind() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("js");
    let output = temp_dir.path().join("bundle.js");
    write(&input.join("a.js"), "var x = 1;");
    write(&input.join("b.js"), "var y = 2;");

    let transformer = OxcJsTransformer::new();
    let logger = RecordingLogger::new();
    AssetPipeline::new(&transformer, &logger)
        .run_asset_type(&js_job(&input, &output).with_exclude_list("a.js"))
        .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        minify(&transformer, "var y = 2;")
    );
    assert!(input.exists());
    assert_eq!(fs::read_to_string(input.join("a.js")).unwrap(), "var x = 1;");
    assert!(!input.join("b.js").exists());
}

#[test]
fn test_stale_minified_file_removed_even_when_source_excluded() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("js");
    let output = temp_dir.path().join("bundle.js");
    write(&input.join("a.js"), "var x = 1;");
    write(&input.join("a.min.js"), "stale");

    let transformer = OxcJsTransformer::new();
    let logger = RecordingLogger::new();
    let report = AssetPipeline::new(&transformer, &logger)
        .run_asset_type(&js_job(&input, &output).with_exclude_list("a.js"))
        .unwrap();

    assert!(report.skipped, "no sources left to build");
    assert!(!input.join("a.min.js").exists());
    assert!(input.join("a.js").exists());
    assert!(!output.exists());
}

#[test]
fn test_second_run_is_a_noop() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("css");
    let output = temp_dir.path().join("all.css");
    write(&input.join("base.css"), "body { margin: 0; }");
    write(&input.join("print.css"), "@media print { nav { display: none } }");
    let job = AssetJob::new(AssetKind::Stylesheet)
        .with_input_dir(&input)
        .with_output_file(&output)
        .with_exclude_list("print.css");

    let transformer = LightningCssTransformer::default();
    let logger = RecordingLogger::new();
    let pipeline = AssetPipeline::new(&transformer, &logger);

    let first = pipeline.run_asset_type(&job).unwrap();
    assert!(!first.skipped);
    let bundle = fs::read(&output).unwrap();
    let modified = fs::metadata(&output).unwrap().modified().unwrap();

    let second = pipeline.run_asset_type(&job).unwrap();
    assert!(second.skipped);
    assert_eq!(fs::read(&output).unwrap(), bundle);
    assert_eq!(fs::metadata(&output).unwrap().modified().unwrap(), modified);
    assert!(input.join("print.css").exists());
}

#[test]
fn test_fresh_bundle_skips_work_and_keeps_sources() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("js");
    let output = temp_dir.path().join("bundle.js");
    write(&input.join("a.js"), "var x = 1;");
    write(&output, "already built");
    File::options()
        .write(true)
        .open(&output)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(3600))
        .unwrap();

    let transformer = OxcJsTransformer::new();
    let logger = RecordingLogger::new();
    let report = AssetPipeline::new(&transformer, &logger)
        .run_asset_type(&js_job(&input, &output))
        .unwrap();

    assert!(report.skipped);
    assert_eq!(fs::read_to_string(&output).unwrap(), "already built");
    assert!(input.join("a.js").exists());
}

#[test]
fn test_excluded_file_keeps_its_directory_only() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("js");
    let output = temp_dir.path().join("bundle.js");
    write(&input.join("keep/legacy.js"), "var legacy = 1;");
    write(&input.join("keep/app.js"), "var app = 1;");
    write(&input.join("widgets/menu.js"), "var menu = 1;");
    write(&input.join("widgets/deep/tabs.js"), "var tabs = 1;");

    let transformer = OxcJsTransformer::new();
    let logger = RecordingLogger::new();
    let report = AssetPipeline::new(&transformer, &logger)
        .run_asset_type(&js_job(&input, &output).with_exclude_list("legacy.js"))
        .unwrap();

    assert_eq!(report.compressed, 3);
    assert_eq!(report.pruned_dirs, 2);
    assert!(input.join("keep/legacy.js").exists());
    assert!(!input.join("keep/app.js").exists());
    assert!(!input.join("widgets").exists());
}

#[test]
fn test_compress_all_with_and_without_excludes() {
    for with_excludes in [true, false] {
        let temp_dir = tempdir().unwrap();
        let js_dir = temp_dir.path().join("js");
        let css_dir = temp_dir.path().join("css");
        write(&js_dir.join("1-exclude.js"), "var one = 1;");
        write(&js_dir.join("2.js"), "var two = 2;");
        write(&js_dir.join("sub/3-exclude.js"), "var three = 3;");
        write(&js_dir.join("sub/4.js"), "function four() { return 4; }");
        write(&css_dir.join("1-exclude.css"), ".one { color: red; }");
        write(&css_dir.join("2.css"), ".two { margin: 0 auto; }");
        write(&css_dir.join("sub/3-exclude.css"), ".three { padding: 0; }");
        let js_output = temp_dir.path().join("out/all.js");
        let css_output = temp_dir.path().join("out/all.css");

        let mut js_job = js_job(&js_dir, &js_output);
        let mut css_job = AssetJob::new(AssetKind::Stylesheet)
            .with_input_dir(&css_dir)
            .with_output_file(&css_output);
        if with_excludes {
            js_job = js_job.with_exclude_list("1-exclude.js; 3-exclude.js");
            css_job = css_job.with_exclude_list("1-exclude.css; 3-exclude.css");
        }

        let logger = Arc::new(RecordingLogger::new());
        let report = CompressorService::new(js_job, css_job, logger.clone())
            .compress_all()
            .unwrap();

        let js = report.asset(AssetKind::Script).unwrap();
        let css = report.asset(AssetKind::Stylesheet).unwrap();
        assert_eq!(js.compressed, if with_excludes { 2 } else { 4 });
        assert_eq!(css.compressed, if with_excludes { 1 } else { 3 });
        assert!(js_output.exists());
        assert!(css_output.exists());
        assert_eq!(js_dir.exists(), with_excludes);
        assert_eq!(css_dir.exists(), with_excludes);
        assert!(logger.messages(LogLevel::Error).is_empty());
    }
}

#[test]
fn test_compress_directories_shorthand() {
    let temp_dir = tempdir().unwrap();
    let js_dir = temp_dir.path().join("js");
    let css_dir = temp_dir.path().join("css");
    write(&css_dir.join("b.css"), "p { color: red; }");
    write(&css_dir.join("a.css"), "h1 { font-weight: bold; }");
    let js_output = temp_dir.path().join("all.js");
    let css_output = temp_dir.path().join("all.css");

    let report = compress_directories(
        &js_dir,
        &js_output,
        &css_dir,
        &css_output,
        Arc::new(RecordingLogger::new()),
    )
    .unwrap();

    let css = LightningCssTransformer::default();
    let expected = format!(
        "{}{}",
        minify(&css, "h1 { font-weight: bold; }"),
        minify(&css, "p { color: red; }")
    );
    assert!(report.asset(AssetKind::Script).unwrap().skipped);
    assert!(!js_output.exists());
    assert_eq!(fs::read_to_string(&css_output).unwrap(), expected);
    assert!(!css_dir.exists());
}

#[test]
fn test_syntax_error_is_fatal_and_logged() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("js");
    let output = temp_dir.path().join("bundle.js");
    write(&input.join("broken.js"), "function (");

    let transformer = OxcJsTransformer::new();
    let logger = RecordingLogger::new();
    let err = AssetPipeline::new(&transformer, &logger)
        .run_asset_type(&js_job(&input, &output))
        .unwrap_err();

    assert!(err.to_string().contains("broken.js"));
    assert!(!logger.messages(LogLevel::Error).is_empty());
    assert!(input.join("broken.js").exists());
    assert!(!output.exists());
}
