//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::Parser;

use crate::domain::config::AppConfig;
use crate::domain::translation::{BatchSize, TranslationConfig};
use crate::infrastructure::DispatchMode;

/// virsh-ss - type a string into a libvirt domain
#[derive(Parser, Debug)]
#[command(name = "virsh-ss")]
#[command(version)]
#[command(about = "Send a string to a libvirt domain as keyboard input via virsh send-key")]
#[command(long_about = None)]
pub struct Cli {
    /// Libvirt domain (name, id or uuid)
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// String to type
    #[arg(
        value_name = "STRING",
        required_unless_present = "prompt",
        conflicts_with = "prompt"
    )]
    pub string: Option<String>,

    /// Ask for the string interactively
    #[arg(short = 'p', long)]
    pub prompt: bool,

    /// Do not echo the string while typing it (with --prompt)
    #[arg(short = 's', long, conflicts_with = "string")]
    pub secret: bool,

    /// Press enter after the string
    #[arg(short = 'n', long)]
    pub newline: bool,

    /// Maximum keys per send-key call (1-15)
    #[arg(short = 'l', long, value_name = "N")]
    pub speed: Option<BatchSize>,

    /// Refuse to send strings containing unsupported characters
    #[arg(long)]
    pub strict: bool,

    /// Print the virsh commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// virsh executable to run
    #[arg(long, value_name = "BIN")]
    pub virsh: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log every dispatched command
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Config layer holding only what was given on the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            virsh_bin: self.virsh.clone(),
            speed: self.speed.map(|s| s.get() as i64),
            newline: if self.newline { Some(true) } else { None },
            strict: if self.strict { Some(true) } else { None },
        }
    }

    /// Where the string comes from
    pub fn input_source(&self) -> InputSource {
        match &self.string {
            Some(text) if !self.prompt => InputSource::Argument(text.clone()),
            _ => InputSource::Prompt {
                secret: self.secret,
            },
        }
    }
}

/// Source of the string to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Given on the command line
    Argument(String),
    /// Read from the terminal
    Prompt { secret: bool },
}

/// Parsed send options
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub domain: String,
    pub input: InputSource,
    pub translation: TranslationConfig,
    pub newline: bool,
    pub dispatch_mode: DispatchMode,
    pub virsh_bin: String,
}

impl RunOptions {
    /// Resolve options from parsed arguments and the merged config
    pub fn new(cli: &Cli, config: &AppConfig, translation: TranslationConfig) -> Self {
        Self {
            domain: cli.domain.clone(),
            input: cli.input_source(),
            translation,
            newline: config.newline_or_default(),
            dispatch_mode: DispatchMode::from_dry_run(cli.dry_run),
            virsh_bin: config.virsh_bin_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_domain_and_string() {
        let cli = Cli::parse_from(["virsh-ss", "vm1", "hello"]);
        assert_eq!(cli.domain, "vm1");
        assert_eq!(cli.string.as_deref(), Some("hello"));
        assert!(!cli.prompt);
        assert!(!cli.newline);
        assert!(cli.speed.is_none());
        assert_eq!(cli.input_source(), InputSource::Argument("hello".into()));
    }

    #[test]
    fn cli_requires_string_without_prompt() {
        assert!(Cli::try_parse_from(["virsh-ss", "vm1"]).is_err());
    }

    #[test]
    fn cli_prompt_conflicts_with_string() {
        assert!(Cli::try_parse_from(["virsh-ss", "-p", "vm1", "hello"]).is_err());
    }

    #[test]
    fn cli_prompt_mode() {
        let cli = Cli::parse_from(["virsh-ss", "-p", "-s", "vm1"]);
        assert_eq!(cli.input_source(), InputSource::Prompt { secret: true });
    }

    #[test]
    fn cli_secret_requires_prompt() {
        let err = Cli::try_parse_from(["virsh-ss", "-s", "vm1", "hello"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let err = Cli::try_parse_from(["virsh-ss", "--secret", "--dry-run", "vm1", "hi"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        assert!(Cli::try_parse_from(["virsh-ss", "-s", "vm1"]).is_err());
    }

    #[test]
    fn cli_parses_speed() {
        let cli = Cli::parse_from(["virsh-ss", "-l", "15", "vm1", "x"]);
        assert_eq!(cli.speed.map(|s| s.get()), Some(15));
    }

    #[test]
    fn cli_rejects_invalid_speed() {
        for value in ["0", "16", "fast"] {
            let err = Cli::try_parse_from(["virsh-ss", "-l", value, "vm1", "x"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn to_config_only_sets_given_flags() {
        let cli = Cli::parse_from(["virsh-ss", "vm1", "x"]);
        assert_eq!(cli.to_config(), AppConfig::empty());

        let cli = Cli::parse_from([
            "virsh-ss", "-n", "--strict", "-l", "4", "--virsh", "/bin/virsh", "vm1", "x",
        ]);
        let config = cli.to_config();
        assert_eq!(config.newline, Some(true));
        assert_eq!(config.strict, Some(true));
        assert_eq!(config.speed, Some(4));
        assert_eq!(config.virsh_bin.as_deref(), Some("/bin/virsh"));
    }

    #[test]
    fn run_options_from_merged_config() {
        let cli = Cli::parse_from(["virsh-ss", "--dry-run", "vm1", "x"]);
        let config = AppConfig::defaults().merge(AppConfig {
            newline: Some(true),
            ..Default::default()
        });
        let translation = config.translation_config().unwrap();

        let options = RunOptions::new(&cli, &config, translation);
        assert_eq!(options.domain, "vm1");
        assert!(options.newline);
        assert_eq!(options.dispatch_mode, DispatchMode::DryRun);
        assert_eq!(options.virsh_bin, "virsh");
        assert_eq!(options.translation.batch_size.get(), 1);
    }
}
