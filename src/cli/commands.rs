use crate::core::{interfaces::BuildLogger, services::CompressorService};
use crate::utils::{
    AssetSection, ConfigLoader, Logger, ReportUI, ResolvedConfig, Result, TracingLogger,
};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "crunch")]
#[command(about = "Crunch - minify and merge JS and CSS sources into one bundle per type")]
pub struct Cli {
    /// Project root; config files are looked up and relative paths resolved here
    #[arg(short, long, default_value = ".", global = true)]
    pub root: String,

    /// Log every file and timing
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress and merge scripts, then stylesheets
    All {
        #[command(flatten)]
        js: JsArgs,
        #[command(flatten)]
        css: CssArgs,
    },
    /// Compress and merge scripts only
    Js {
        #[command(flatten)]
        js: JsArgs,
    },
    /// Compress and merge stylesheets only
    Css {
        #[command(flatten)]
        css: CssArgs,
    },
    /// Print an example crunch.config.json
    Init,
}

#[derive(Args, Debug, Default)]
pub struct JsArgs {
    /// Directory containing the JS files to compress and merge
    #[arg(long)]
    pub js_input_dir: Option<String>,
    /// File that will contain the merged JS
    #[arg(long)]
    pub js_output_file: Option<String>,
    /// JS file or directory names to exclude, separated by ";"
    #[arg(long)]
    pub js_excludes: Option<String>,
}

impl From<JsArgs> for AssetSection {
    fn from(args: JsArgs) -> Self {
        AssetSection {
            input_dir: args.js_input_dir,
            output_file: args.js_output_file,
            excludes: args.js_excludes,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct CssArgs {
    /// Directory containing the CSS files to compress and merge
    #[arg(long)]
    pub css_input_dir: Option<String>,
    /// File that will contain the merged CSS
    #[arg(long)]
    pub css_output_file: Option<String>,
    /// CSS file or directory names to exclude, separated by ";"
    #[arg(long)]
    pub css_excludes: Option<String>,
}

impl From<CssArgs> for AssetSection {
    fn from(args: CssArgs) -> Self {
        AssetSection {
            input_dir: args.css_input_dir,
            output_file: args.css_output_file,
            excludes: args.css_excludes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    All,
    Js,
    Css,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self) -> Result<()> {
        let cli = Cli::parse();

        // Initialize logging
        Logger::init(cli.verbose);

        let root = PathBuf::from(&cli.root);
        match cli.command {
            Commands::All { js, css } => self.handle_compress(&root, Target::All, js, css),
            Commands::Js { js } => self.handle_compress(&root, Target::Js, js, CssArgs::default()),
            Commands::Css { css } => self.handle_compress(&root, Target::Css, JsArgs::default(), css),
            Commands::Init => {
                println!("{}", ConfigLoader::generate_example());
                Ok(())
            }
        }
    }

    fn resolve_config(&self, root: &Path, js: JsArgs, css: CssArgs) -> Result<ResolvedConfig> {
        let file_config = ConfigLoader::load_from_file(root)?;
        Ok(ConfigLoader::merge_with_cli(
            file_config,
            root,
            &AssetSection::from(js),
            &AssetSection::from(css),
        ))
    }

    fn handle_compress(&self, root: &Path, target: Target, js: JsArgs, css: CssArgs) -> Result<()> {
        let ui = ReportUI::new();
        ui.show_banner();

        let config = self.resolve_config(root, js, css)?;
        if !config.enabled {
            ui.show_disabled();
            return Ok(());
        }

        let logger: Arc<dyn BuildLogger> = Arc::new(TracingLogger);
        let service = CompressorService::new(config.js, config.css, logger);

        match target {
            Target::All => {
                let report = service.compress_all()?;
                ui.show_completion(&report);
            }
            Target::Js => ui.show_assets(&[service.compress_js()?]),
            Target::Css => ui.show_assets(&[service.compress_css()?]),
        }

        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
