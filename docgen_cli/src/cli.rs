use clap::Parser;
use docgen::config::runtime::{LogLevel, RuntimeConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docgen")]
#[command(about = "HTML page generator for MW XML documentation exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// XML documentation export produced by the C# compiler
    #[arg(required_unless_present = "info")]
    pub input: Option<PathBuf>,

    /// Directory the HTML pages are written into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Root namespace skipped at the start of every identifier
    #[arg(long)]
    pub root: Option<String>,

    /// Site title appended to every page title
    #[arg(long)]
    pub title: Option<String>,

    /// Stylesheet linked from every page
    #[arg(long)]
    pub stylesheet: Option<String>,

    /// TOML file with extra [translations] entries
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Also write the assembled members as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Render pages without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every stage, including debug events
    #[arg(short, long)]
    pub verbose: bool,

    /// Fail when the input does not have the .xml extension
    #[arg(long)]
    pub strict_extension: bool,

    /// Print pipeline capabilities and exit
    #[arg(long)]
    pub info: bool,
}

impl Cli {
    /// Apply command line overrides on top of environment-derived preferences
    pub fn apply_to(&self, config: &mut RuntimeConfig) {
        if let Some(output) = &self.output {
            config.render.output_dir = output.clone();
        }
        if let Some(root) = &self.root {
            config.decoder.root_namespace = root.clone();
        }
        if let Some(title) = &self.title {
            config.render.site_title = title.clone();
        }
        if let Some(stylesheet) = &self.stylesheet {
            config.render.stylesheet = stylesheet.clone();
        }
        if let Some(translations) = &self.translations {
            config.decoder.translations_file = Some(translations.clone());
        }
        if self.strict_extension {
            config.file_processor.require_xml_extension = true;
        }
        if self.quiet {
            config.logging.min_log_level = LogLevel::Error;
            config.logging.log_performance_events = false;
        } else if self.verbose {
            config.logging.min_log_level = LogLevel::Debug;
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        self.apply_to(&mut config);
        config
    }
}
