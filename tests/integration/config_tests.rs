use crunch::utils::{AssetSection, ConfigLoader, RecordingLogger, PROPERTIES_CONFIG_FILE};
use crunch::{AssetKind, CompressorService};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_properties_file_drives_a_full_run() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write(
        &root.join(PROPERTIES_CONFIG_FILE),
        "\
js.inputDir=web/js
js.outputFile=web/all.js
js.excludes=vendor
css.inputDir=web/css
css.outputFile=web/all.css
",
    );
    write(&root.join("web/js/app.js"), "var app = 1;");
    write(&root.join("web/js/vendor/lib.js"), "var lib = 1;");
    write(&root.join("web/css/site.css"), "body { margin: 0; }");

    let file_config = ConfigLoader::load_from_file(root).unwrap();
    let config = ConfigLoader::merge_with_cli(
        file_config,
        root,
        &AssetSection::default(),
        &AssetSection::default(),
    );
    assert!(config.enabled);
    assert_eq!(config.js.output_file(), Some(root.join("web/all.js").as_path()));

    let report = CompressorService::new(config.js, config.css, Arc::new(RecordingLogger::new()))
        .compress_all()
        .unwrap();

    assert_eq!(report.asset(AssetKind::Script).unwrap().compressed, 1);
    assert_eq!(report.asset(AssetKind::Stylesheet).unwrap().compressed, 1);
    assert!(root.join("web/all.js").exists());
    assert!(root.join("web/all.css").exists());
    assert!(root.join("web/js/vendor/lib.js").exists());
    assert!(!root.join("web/css").exists());
}

#[test]
fn test_cli_values_override_file_values() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("crunch.config.json"),
        r#"{ "enabled": false, "css": { "inputDir": "css", "outputFile": "all.css", "excludes": "a.css" } }"#,
    );

    let file_config = ConfigLoader::load_from_file(root).unwrap();
    let config = ConfigLoader::merge_with_cli(
        file_config,
        root,
        &AssetSection::default(),
        &AssetSection {
            excludes: Some("b.css; c.css".to_string()),
            ..Default::default()
        },
    );

    assert!(!config.enabled);
    assert_eq!(config.css.input_dir(), Some(root.join("css").as_path()));
    assert_eq!(config.css.excludes(), ["b.css".to_string(), "c.css".to_string()]);
    assert_eq!(config.js.input_dir(), None);
}
