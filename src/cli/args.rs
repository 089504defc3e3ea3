//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};
use crate::utils::expand_home;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "dojo")]
#[command(about = "Menu launcher for Purple Team training agents", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Config file (default: ~/.config/dojo/config.toml, then ~/.dojo.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Directory for session transcripts
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) logs_dir: Option<PathBuf>,

    /// Agents directory, probed after the working directory
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) agents_dir: Option<PathBuf>,

    /// Lab root directory, probed last
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) root_dir: Option<PathBuf>,

    /// Program used to run agents that don't name their own (empty runs them directly)
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub(crate) interpreter: Option<String>,

    /// Environment variable that must be set before the menu opens
    #[arg(long, global = true, value_name = "VAR")]
    pub(crate) require_env: Option<String>,

    /// Skip the startup banner
    #[arg(long, global = true)]
    pub(crate) no_banner: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug diagnostics on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Keep rendered banner and menus out of the transcript
    #[arg(long, global = true)]
    pub(crate) no_log_screens: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_banner && config.no_banner {
            self.no_banner = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if let Some(color) = config.color
            && matches!(self.color, ColorMode::Auto)
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        if !self.no_log_screens && config.log_screens == Some(false) {
            self.no_log_screens = true;
        }

        // Path and string options: only apply if CLI didn't set them
        if self.logs_dir.is_none() {
            self.logs_dir = config.logs_dir.as_deref().map(expand_home);
        }
        if self.agents_dir.is_none() {
            self.agents_dir = config.agents_dir.as_deref().map(expand_home);
        }
        if self.root_dir.is_none() {
            self.root_dir = config.root_dir.as_deref().map(expand_home);
        }
        if self.interpreter.is_none() {
            self.interpreter = config.interpreter.clone();
        }
        if self.require_env.is_none() {
            self.require_env = config.required_env.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
