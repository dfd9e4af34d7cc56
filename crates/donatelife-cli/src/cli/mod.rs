//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums for the process command line. The grammar of
//! the interactive shell lives in [`crate::shell::command`].

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "donatelife",
    bin_name = "donatelife",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Blood donor registry",
    long_about = "DonateLife keeps a registry of blood donors, validates their \
                  details and tells you who is eligible to donate.",
    after_help = "EXAMPLES:\n\
        \x20 donatelife shell\n\
        \x20 donatelife validate --first Ana --last Silva --blood O+ --phone 1234567890 --city Porto\n\
        \x20 donatelife config list\n\
        \x20 donatelife completions bash > /usr/share/bash-completion/completions/donatelife",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive registry session.
    #[command(
        visible_alias = "sh",
        about = "Start an interactive registry session",
        after_help = "Commands are read line by line from standard input, so a \
            session can be scripted:\n\n\
            \x20 printf 'add --first Ana --last Silva --blood O+ --phone 1234567890 --city Porto\\nlist\\n' | donatelife shell"
    )]
    Shell(ShellArgs),

    /// Check donor details without registering anyone.
    #[command(
        about = "Validate donor details",
        after_help = "EXAMPLES:\n\
            \x20 donatelife validate --first Ana --last Silva --blood O+ --phone 1234567890 --city Porto\n\
            \x20 donatelife validate --first Ana --last Silva --blood X --phone 123 --city Porto --email ana"
    )]
    Validate(DonorFields),

    /// Initialise a DonateLife configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 donatelife init          # default location\n\
            \x20 donatelife init --force  # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 donatelife completions bash > ~/.local/share/bash-completion/completions/donatelife\n\
            \x20 donatelife completions zsh  > ~/.zfunc/_donatelife\n\
            \x20 donatelife completions fish > ~/.config/fish/completions/donatelife.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the DonateLife configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 donatelife config get shell.prompt\n\
            \x20 donatelife config list\n\
            \x20 donatelife config path"
    )]
    Config(ConfigCommands),
}

// ── shell ─────────────────────────────────────────────────────────────────────

/// Arguments for `donatelife shell`.
#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Override the prompt from the configuration file.
    #[arg(long = "prompt", value_name = "TEXT", help = "Prompt to display")]
    pub prompt: Option<String>,
}

// ── donor fields ──────────────────────────────────────────────────────────────

/// The donor form, shared by `validate` and the shell's `add`.
///
/// Every text field defaults to empty so that missing values are reported
/// by donor validation rather than rejected by the argument parser.
#[derive(Debug, Clone, Default, Args)]
pub struct DonorFields {
    /// First name.
    #[arg(long = "first", value_name = "NAME", default_value = "")]
    pub first_name: String,

    /// Last name.
    #[arg(long = "last", value_name = "NAME", default_value = "")]
    pub last_name: String,

    /// Blood type (A+, A-, B+, B-, AB+, AB-, O+, O-).
    #[arg(long = "blood", value_name = "TYPE", default_value = "")]
    pub blood_type: String,

    /// Email address.
    #[arg(long = "email", value_name = "EMAIL")]
    pub email: Option<String>,

    /// 10-digit phone number.
    #[arg(long = "phone", value_name = "DIGITS", default_value = "")]
    pub phone: String,

    /// City of residence.
    #[arg(long = "city", value_name = "CITY", default_value = "")]
    pub city: String,

    /// Register the donor as inactive.
    #[arg(long = "inactive")]
    pub inactive: bool,

    /// Date of the last donation.
    #[arg(long = "last-donation", value_name = "YYYY-MM-DD")]
    pub last_donation: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `donatelife init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `donatelife completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `donatelife config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `shell.prompt`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_validate_command() {
        let cli = Cli::parse_from([
            "donatelife",
            "validate",
            "--first",
            "Ana",
            "--blood",
            "o+",
            "--inactive",
        ]);
        let Commands::Validate(fields) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(fields.first_name, "Ana");
        assert_eq!(fields.blood_type, "o+");
        assert_eq!(fields.last_name, "");
        assert!(fields.inactive);
        assert_eq!(fields.email, None);
    }

    #[test]
    fn shell_alias() {
        let cli = Cli::parse_from(["donatelife", "sh", "--prompt", "> "]);
        assert!(matches!(
            cli.command,
            Commands::Shell(ShellArgs { prompt: Some(_) })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["donatelife", "--quiet", "--verbose", "shell"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_file_flag_is_global() {
        let cli = Cli::parse_from(["donatelife", "config", "list", "-c", "alt.toml"]);
        assert_eq!(
            cli.global.config.as_deref(),
            Some(std::path::Path::new("alt.toml"))
        );
    }
}
