use crate::core::models::{AssetJob, AssetKind};
use crate::utils::{CrunchError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const JSON_CONFIG_FILE: &str = "crunch.config.json";
pub const PROPERTIES_CONFIG_FILE: &str = "crunch.properties";

// `key = value` or `key: value`; comment lines start with # or !
static PROPERTY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^=:\s]+)\s*[=:]\s*(.*?)\s*$").unwrap()
});

/// Settings for one asset type as they appear in a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSection {
    /// Directory scanned for sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_dir: Option<String>,

    /// Bundle written by the merge step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    /// File or directory names to leave alone, separated by ";"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excludes: Option<String>,
}

/// Configuration file format (crunch.config.json or crunch.properties)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrunchConfig {
    /// Set to false to turn every run into a no-op (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default)]
    pub js: AssetSection,

    #[serde(default)]
    pub css: AssetSection,
}

/// Fully resolved settings for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub enabled: bool,
    pub js: AssetJob,
    pub css: AssetJob,
}

/// Config loader that supports config files with CLI override
pub struct ConfigLoader;

impl ConfigLoader {
    /// Look for crunch.config.json, then crunch.properties, in `root`
    pub fn load_from_file(root: &Path) -> Result<Option<CrunchConfig>> {
        let json_path = root.join(JSON_CONFIG_FILE);
        if json_path.exists() {
            debug!("Loading config from {}", json_path.display());
            let content = std::fs::read_to_string(&json_path)?;
            let config: CrunchConfig = serde_json::from_str(&content).map_err(|e| {
                CrunchError::config(format!("Failed to parse {}: {}", JSON_CONFIG_FILE, e))
            })?;
            return Ok(Some(config));
        }

        let properties_path = root.join(PROPERTIES_CONFIG_FILE);
        if properties_path.exists() {
            debug!("Loading config from {}", properties_path.display());
            let content = std::fs::read_to_string(&properties_path)?;
            return Self::parse_properties(&content).map(Some);
        }

        debug!("No config file found, using defaults");
        Ok(None)
    }

    /// Parse the key-value form: `enabled`, `js.inputDir`, `js.outputFile`,
    /// `js.excludes` and the same three keys under `css.`
    pub fn parse_properties(content: &str) -> Result<CrunchConfig> {
        let mut config = CrunchConfig::default();

        for (number, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let captures = PROPERTY_LINE.captures(line).ok_or_else(|| {
                CrunchError::config(format!(
                    "{} line {}: expected `key=value`",
                    PROPERTIES_CONFIG_FILE,
                    number + 1
                ))
            })?;
            let key = &captures[1];
            let value = captures[2].to_string();

            let (section, field) = match key.split_once('.') {
                Some(("js", field)) => (Some(&mut config.js), field),
                Some(("css", field)) => (Some(&mut config.css), field),
                _ => (None, key),
            };

            match (section, field) {
                (None, "enabled") => {
                    let enabled = value.parse::<bool>().map_err(|_| {
                        CrunchError::config(format!("`enabled` must be true or false, got `{}`", value))
                    })?;
                    config.enabled = Some(enabled);
                }
                (Some(section), "inputDir") => section.input_dir = Some(value),
                (Some(section), "outputFile") => section.output_file = Some(value),
                (Some(section), "excludes") => section.excludes = Some(value),
                _ => warn!("Ignoring unknown config key `{}`", key),
            }
        }

        Ok(config)
    }

    /// Merge file config with CLI arguments (CLI takes precedence).
    /// Relative paths are resolved against `root`.
    pub fn merge_with_cli(
        file_config: Option<CrunchConfig>,
        root: &Path,
        js_overrides: &AssetSection,
        css_overrides: &AssetSection,
    ) -> ResolvedConfig {
        let base = file_config.unwrap_or_default();

        ResolvedConfig {
            enabled: base.enabled.unwrap_or(true),
            js: Self::build_job(AssetKind::Script, &base.js, js_overrides, root),
            css: Self::build_job(AssetKind::Stylesheet, &base.css, css_overrides, root),
        }
    }

    fn build_job(
        kind: AssetKind,
        file: &AssetSection,
        cli: &AssetSection,
        root: &Path,
    ) -> AssetJob {
        let mut job = AssetJob::new(kind);

        if let Some(dir) = cli.input_dir.as_deref().or(file.input_dir.as_deref()) {
            job = job.with_input_dir(resolve(root, dir));
        }
        if let Some(output) = cli.output_file.as_deref().or(file.output_file.as_deref()) {
            job = job.with_output_file(resolve(root, output));
        }
        if let Some(excludes) = cli.excludes.as_deref().or(file.excludes.as_deref()) {
            job = job.with_exclude_list(excludes);
        }

        job
    }

    /// Generate example config file
    pub fn generate_example() -> String {
        let example = CrunchConfig {
            enabled: Some(true),
            js: AssetSection {
                input_dir: Some("web/js".to_string()),
                output_file: Some("web/all.js".to_string()),
                excludes: Some("vendor;debug.js".to_string()),
            },
            css: AssetSection {
                input_dir: Some("web/css".to_string()),
                output_file: Some("web/all.css".to_string()),
                excludes: Some("print.css".to_string()),
            },
        };

        serde_json::to_string_pretty(&example).unwrap_or_else(|_| {
            r#"{
  "enabled": true,
  "js": { "inputDir": "web/js", "outputFile": "web/all.js", "excludes": "vendor;debug.js" },
  "css": { "inputDir": "web/css", "outputFile": "web/all.css", "excludes": "print.css" }
}"#
            .to_string()
        })
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
