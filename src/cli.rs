//! CLI argument parsing with clap

use crate::config::{ItemConfig, WidgetConfig};
use clap::Parser;
use std::path::PathBuf;

/// Multi-select - Interactive multi-select control in the terminal
///
/// Renders a multi-select dropdown described by a TOML file or by
/// command line options, and prints the final selection as JSON.
#[derive(Parser, Debug, Default)]
#[command(name = "multi-select")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to widget configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments will override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Menu option; use `text=value` to give it a distinct value
    #[arg(short, long = "item")]
    pub items: Vec<String>,

    /// Floating label text
    #[arg(short, long)]
    pub label: Option<String>,

    /// Require at least one selected item with a non-empty value
    #[arg(short, long)]
    pub required: bool,

    /// Use the outlined style instead of the filled one
    #[arg(short, long)]
    pub outlined: bool,

    /// Start disabled
    #[arg(short, long)]
    pub disabled: bool,

    /// Verbose output
    #[arg(short, long, env = "MULTI_SELECT_VERBOSE")]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,

    /// Log file path (default: timestamped file in ./Log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub sample_config: bool,
}

impl Cli {
    /// Get config file name (without extension) for log naming
    pub fn config_name(&self) -> Option<String> {
        self.config.as_ref().and_then(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
    }

    /// Menu options given on the command line
    pub fn parsed_items(&self) -> Vec<ItemConfig> {
        self.items
            .iter()
            .map(|raw| match raw.split_once('=') {
                Some((text, value)) => ItemConfig::with_value(text.trim(), value.trim()),
                None => ItemConfig::new(raw.trim()),
            })
            .collect()
    }

    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: WidgetConfig) -> WidgetConfig {
        if !self.items.is_empty() {
            config.items = self.parsed_items();
        }
        if let Some(ref label) = self.label {
            config.label = Some(label.clone());
        }
        if self.required {
            config.required = true;
        }
        if self.outlined {
            config.outlined = true;
        }
        if self.disabled {
            config.disabled = true;
        }

        config
    }

    /// Convert CLI arguments to WidgetConfig (when no config file is used)
    pub fn to_config(&self) -> WidgetConfig {
        WidgetConfig {
            label: self.label.clone(),
            outlined: self.outlined,
            required: self.required,
            disabled: self.disabled,
            items: self.parsed_items(),
            ..Default::default()
        }
    }
}
