use crate::core::models::{AssetReport, BuildReport};
use colored::*;
use std::time::Instant;

/// Vite-style terminal summary of a run
pub struct ReportUI {
    start_time: Instant,
}

impl ReportUI {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn show_banner(&self) {
        println!("\n  {} {}", "CRUNCH".bright_cyan().bold(), env!("CARGO_PKG_VERSION").bright_white());
        println!();
    }

    pub fn show_disabled(&self) {
        println!("  {} compression disabled by configuration", "○".bright_black());
    }

    pub fn show_completion(&self, report: &BuildReport) {
        self.show_assets(&report.assets);
    }

    pub fn show_assets(&self, assets: &[AssetReport]) {
        for asset in assets {
            println!("  {}", Self::asset_line(asset));
        }

        println!();
        println!(
            "  {} done in {}",
            "✓".bright_green(),
            format!("{:.0}ms", self.start_time.elapsed().as_secs_f64() * 1000.0)
                .bright_white()
                .bold()
        );
    }

    fn asset_line(asset: &AssetReport) -> String {
        let label = format!("{:<3}", asset.kind.label()).bright_cyan();

        if asset.skipped {
            return format!("{} {}", label, "up to date".bright_black());
        }

        let target = match &asset.merged {
            Some(merged) => format!(
                "{} {}",
                merged.path.display().to_string().bright_white(),
                format!("({})", format_size(merged.size)).bright_black()
            ),
            None => "no output file, minified files left in place".bright_black().to_string(),
        };

        format!(
            "{} {} files → {}  {}",
            label,
            asset.compressed,
            target,
            format!("{} dirs pruned", asset.pruned_dirs).bright_black()
        )
    }
}

impl Default for ReportUI {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_size(bytes: u64) -> String {
    let size_kb = bytes as f64 / 1024.0;
    if size_kb < 1.0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} kB", size_kb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{AssetKind, MergedOutput};
    use std::path::PathBuf;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 kB");
    }

    #[test]
    fn test_asset_line() {
        colored::control::set_override(false);

        let skipped = ReportUI::asset_line(&AssetReport::skipped(AssetKind::Stylesheet));
        assert_eq!(skipped, "CSS up to date");

        let built = ReportUI::asset_line(&AssetReport {
            kind: AssetKind::Script,
            skipped: false,
            compressed: 4,
            merged: Some(MergedOutput {
                path: PathBuf::from("web/all.js"),
                size: 100,
            }),
            deleted_inputs: 4,
            pruned_dirs: 2,
        });
        assert_eq!(built, "JS  4 files → web/all.js (100 B)  2 dirs pruned");
    }
}
