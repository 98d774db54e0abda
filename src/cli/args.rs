//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Collect translation keys from source files into the assets
//! - `inline`: Inline translated values into compiled chunks, one copy per locale
//! - `init`: Write a default `.tolkrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::{Config, Locale};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(args)) => args.common.verbose,
            Some(Command::Inline(args)) => args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Arguments shared by `extract` and `inline`.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root; the config file is searched from here upwards
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Supported locales (overrides config file), e.g. --locale en-US,it-IT
    #[arg(long = "locale", value_delimiter = ',')]
    pub locales: Vec<String>,

    /// Default locale (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Assets directory, relative to the base path (overrides config file)
    #[arg(long)]
    pub assets_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Apply command-line values over `config`.
    pub fn apply(&self, config: &mut Config) {
        if !self.locales.is_empty() {
            config.supported_locales = self.locales.iter().map(Locale::new).collect();
        }
        if let Some(lang) = &self.default_locale {
            config.default_locale = Some(lang.clone());
        }
        if let Some(path) = &self.assets_path {
            config.assets_path = path.clone();
        }
    }
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InlineArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Build output directory, relative to the base path (overrides config file)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Exit with status 1 when any translation value is missing
    #[arg(long)]
    pub deny_missing: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation keys from source files and update the asset files
    Extract(ExtractArgs),
    /// Inline translations into compiled chunks, one output directory per locale
    Inline(InlineArgs),
    /// Initialize a new .tolkrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_inline_args() {
        let args = Arguments::parse_from([
            "tolk",
            "inline",
            "--locale",
            "en-US,it-IT",
            "--locale",
            "de-DE",
            "--out-dir",
            "public",
            "--deny-missing",
            "-v",
        ]);
        assert!(args.verbose());
        let Some(Command::Inline(inline)) = args.command else {
            panic!("expected inline command");
        };
        assert_eq!(inline.common.locales, vec!["en-US", "it-IT", "de-DE"]);
        assert_eq!(inline.out_dir.as_deref(), Some("public"));
        assert!(inline.deny_missing);
    }

    #[test]
    fn test_common_args_override_config() {
        let args = CommonArgs {
            locales: vec!["it-IT".to_string(), "en-US".to_string()],
            default_locale: Some("en-US".to_string()),
            assets_path: Some("locales".to_string()),
            ..Default::default()
        };
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.langs(), vec!["it-IT", "en-US"]);
        assert_eq!(config.default_lang(), "en-US");
        assert_eq!(config.assets_path, "locales");
    }

    #[test]
    fn test_empty_args_keep_config() {
        let mut config = Config::default();
        CommonArgs::default().apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Arguments::command().debug_assert();
    }
}
