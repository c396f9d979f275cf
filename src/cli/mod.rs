//! Command-line interface for beamsh
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Application initialization and startup

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

pub mod completion;

/// Beamer slide-deck shell
#[derive(Parser, Debug)]
#[command(
    name = "beamsh",
    version,
    about = "Interactive shell for building Beamer slide decks",
    long_about = "An interactive LaTeX Beamer editing shell with command completion,
frame-by-frame deck editing, and an inline frame composer."
)]
pub struct CliArgs {
    /// Deck file to open at startup
    #[arg(value_name = "DECK")]
    pub deck: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Extra completion commands file (JSON)
    #[arg(long = "user-commands", value_name = "FILE")]
    pub user_commands: Option<PathBuf>,

    /// Reopen the most recently edited deck
    #[arg(long)]
    pub resume: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for beamsh
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// A broken configuration file degrades to the defaults with a
    /// warning rather than refusing to start.
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = match &args.config_file {
            Some(path) => Config::from_file(path),
            None => Config::load(),
        }
        .unwrap_or_else(|e| {
            eprintln!("Warning: failed to load configuration: {}", e);
            eprintln!("Using default configuration instead.");
            Config::default()
        });

        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        use crate::config::LogLevel;

        if args.no_color {
            config.editor.color_output = false;
        }

        if let Some(path) = &args.user_commands {
            config.completion.user_commands_file = Some(path.clone());
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("beamsh version {}", env!("CARGO_PKG_VERSION"));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file()?;
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) -> Result<()> {
        let path = self.config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist; defaults apply");
            return Ok(());
        }

        match Config::from_file(&path) {
            Ok(_) => println!("Configuration is valid"),
            Err(e) => println!("Configuration validation failed: {}", e),
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.config_path();
        println!("Configuration file: {}", path.display());
        println!();

        match toml::to_string_pretty(&self.config) {
            Ok(toml_str) => println!("{}", toml_str),
            Err(e) => {
                eprintln!("Error formatting configuration: {}", e);
                println!("{:#?}", self.config);
            }
        }

        Ok(())
    }

    /// Get configuration file path (from args or default)
    pub fn config_path(&self) -> PathBuf {
        self.args
            .config_file
            .as_ref()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Config::default_path)
    }

    /// Print banner with version info
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("beamsh {} - Beamer deck shell", env!("CARGO_PKG_VERSION"));
            println!("Type 'help' for commands, '\\' starts completion, 'exit' to quit.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(vec!["beamsh"]).unwrap();
        assert!(args.deck.is_none());
        assert!(!args.resume);
    }

    #[test]
    fn test_cli_args_with_deck() {
        let args = CliArgs::try_parse_from(vec!["beamsh", "talk.tex"]).unwrap();
        assert_eq!(args.deck, Some(PathBuf::from("talk.tex")));
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from(vec!["beamsh", "--no-color", "--quiet"]).unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
    }

    #[test]
    fn test_no_color_overrides_config() {
        let args = CliArgs::try_parse_from(vec!["beamsh", "--no-color"]).unwrap();
        let mut config = Config::default();
        assert!(config.editor.color_output);
        CliInterface::apply_args_to_config(&mut config, &args);
        assert!(!config.editor.color_output);
    }

    #[test]
    fn test_verbosity_flags_set_log_level() {
        use crate::config::LogLevel;

        let args = CliArgs::try_parse_from(vec!["beamsh", "-q"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Error);

        let args = CliArgs::try_parse_from(vec!["beamsh", "-v"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Debug);

        let args = CliArgs::try_parse_from(vec!["beamsh", "--vv"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Trace);
    }

    #[test]
    fn test_user_commands_flag_lands_in_config() {
        let args =
            CliArgs::try_parse_from(vec!["beamsh", "--user-commands", "extra.json"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(
            config.completion.user_commands_file,
            Some(PathBuf::from("extra.json"))
        );
    }

    #[test]
    fn test_subcommand_parsing() {
        let args = CliArgs::try_parse_from(vec!["beamsh", "completion", "zsh"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Completion { ref shell }) if shell == "zsh"
        ));

        let args = CliArgs::try_parse_from(vec!["beamsh", "config", "--show"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Config { show: true, validate: false })
        ));
    }
}
