use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::error::NavResult;
use crate::nav::history::DEFAULT_HISTORY_LIMIT;
use crate::nav::node::NavigationNode;
use crate::nav::tree::default_tree;

#[derive(Parser, Debug)]
#[command(name = "consolenav", about = "Resolve logical navigation for a multi-tenant console")]
pub struct Cli {
    /// Tenant (account) id used when building tenant-prefixed URLs
    #[arg(long, env = "CONSOLENAV_TENANT")]
    pub tenant: Option<String>,

    /// Page the browser starts on (defaults to the requested URL, or `/` for replay)
    #[arg(long)]
    pub location: Option<String>,

    /// Navigation tree file (TOML); the built-in console tree is used otherwise
    #[arg(long, env = "CONSOLENAV_TREE")]
    pub tree: Option<PathBuf>,

    /// Number of visited paths to remember
    #[arg(long)]
    pub history_limit: Option<usize>,

    /// Log file path
    #[arg(long, env = "CONSOLENAV_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the navigation context of a URL
    Context { url: String },
    /// Print the breadcrumb trail of a URL
    Breadcrumbs {
        url: String,
        /// Leave out the leading hub item
        #[arg(long)]
        no_home: bool,
    },
    /// Print the indexed route patterns in match order
    Tree,
    /// Read navigation commands from stdin
    Replay,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub tenant: Option<String>,
    pub tree: Option<PathBuf>,
    pub history_limit: Option<usize>,
}

impl ConfigFile {
    pub fn load() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let config_path = config_dir.join("consolenav").join("config.toml");
        let content = std::fs::read_to_string(config_path).ok()?;
        toml::from_str(&content).ok()
    }
}

/// Effective settings: command line first, then the config file, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tenant: String,
    pub tree: Option<PathBuf>,
    pub history_limit: usize,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: ConfigFile) -> Self {
        Self {
            tenant: cli
                .tenant
                .clone()
                .or(file.tenant)
                .unwrap_or_else(|| String::from("default")),
            tree: cli.tree.clone().or(file.tree),
            history_limit: cli
                .history_limit
                .or(file.history_limit)
                .unwrap_or(DEFAULT_HISTORY_LIMIT),
        }
    }

    pub fn load_tree(&self) -> NavResult<NavigationNode> {
        match &self.tree {
            Some(path) => NavigationNode::from_toml_file(path),
            None => Ok(default_tree()),
        }
    }
}
