//! # storefront-cms-cli
//!
//! Command-line back office for the storefront's CMS settings.
//!
//! ## Commands
//!
//! - `storefront-cms show <document>` - Print a settings document
//! - `storefront-cms keys` - List stored settings keys
//! - `storefront-cms list <list>` - List records of one list in display order
//! - `storefront-cms fields <list>` - Field names of a list's records
//! - `storefront-cms add <list>` - Append a record
//! - `storefront-cms set <list> <id> <field> <value>` - Edit one field
//! - `storefront-cms delete <list> <id>` - Delete a record (asks for confirmation)
//! - `storefront-cms move <list> <id> <up|down>` - Reorder a record
//! - `storefront-cms toggle <section> <on|off>` - Show or hide a page section
//!
//! Lists are addressed as `homepage.steps`, `homepage.testimonials`, `homepage.stats`,
//! `homepage.logos`, `faq.items` or `gallery:<productId>`.

// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use storefront_cms_app::{AppConfig, StorageBackend};

/// Storefront CMS - settings back office.
#[derive(Debug, Parser)]
#[command(name = "storefront-cms")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, env = "STOREFRONT_CMS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the settings store.
    #[arg(long, env = "STOREFRONT_CMS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend: memory, json or sqlite.
    #[arg(long)]
    pub backend: Option<StorageBackend>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Config file contents with command-line overrides applied.
    pub fn app_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => AppConfig::load_default().context("Failed to load default config")?,
        };

        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        Ok(config)
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a settings document (`homepage`, `faq` or `gallery:<productId>`).
    Show { document: DocumentTarget },
    /// List stored settings keys.
    Keys,
    /// List records in display order.
    List { list: ListTarget },
    /// Field names accepted by `set` for a list.
    Fields { list: ListTarget },
    /// Append a record with default values.
    Add {
        list: ListTarget,
        /// Initial field values, `field=value` (repeatable).
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// Edit one field of a record.
    Set {
        list: ListTarget,
        id: String,
        field: String,
        /// `true`/`false` for flag fields.
        value: String,
    },
    /// Delete a record.
    Delete {
        list: ListTarget,
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Move a record one position up or down.
    Move {
        list: ListTarget,
        id: String,
        direction: storefront_cms_core::MoveDirection,
    },
    /// Show or hide a page section.
    Toggle { section: String, state: Switch },
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn enabled(self) -> bool {
        self == Self::On
    }
}

/// A settings document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTarget {
    Homepage,
    Faq,
    Gallery(String),
}

impl FromStr for DocumentTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "homepage" => Ok(Self::Homepage),
            "faq" => Ok(Self::Faq),
            other => match gallery_id(other)? {
                Some(id) => Ok(Self::Gallery(id)),
                None => bail!("Unknown document '{other}' (expected homepage, faq or gallery:<productId>)"),
            },
        }
    }
}

/// A record list inside a settings document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTarget {
    Steps,
    Testimonials,
    Stats,
    Logos,
    FaqItems,
    Gallery(String),
}

impl FromStr for ListTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "homepage.steps" => Ok(Self::Steps),
            "homepage.testimonials" => Ok(Self::Testimonials),
            "homepage.stats" => Ok(Self::Stats),
            "homepage.logos" => Ok(Self::Logos),
            "faq.items" => Ok(Self::FaqItems),
            other => match gallery_id(other)? {
                Some(id) => Ok(Self::Gallery(id)),
                None => bail!(
                    "Unknown list '{other}' (expected homepage.steps, homepage.testimonials, \
                     homepage.stats, homepage.logos, faq.items or gallery:<productId>)"
                ),
            },
        }
    }
}

impl fmt::Display for ListTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Steps => f.write_str("homepage.steps"),
            Self::Testimonials => f.write_str("homepage.testimonials"),
            Self::Stats => f.write_str("homepage.stats"),
            Self::Logos => f.write_str("homepage.logos"),
            Self::FaqItems => f.write_str("faq.items"),
            Self::Gallery(id) => write!(f, "gallery:{id}"),
        }
    }
}

fn gallery_id(s: &str) -> anyhow::Result<Option<String>> {
    let Some(id) = s.strip_prefix("gallery:") else {
        return Ok(None);
    };
    if id.is_empty() {
        bail!("Missing product id in '{s}'");
    }
    Ok(Some(id.to_string()))
}
