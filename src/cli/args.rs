//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `PLAYBOOK` / `--playbook <path>`: Playbook to validate (the flag wins)
//! - `--roles <path>`: Roles directory (default `roles`)
//! - `--verbose` / `-v`: Diagnostic trace and summary
//! - `--format <text|json>`: Report format
//! - `--config <path>`: Project config file
//! - `--completions <shell>`: Print a completion script and exit

use clap::Parser;
use std::path::PathBuf;

use crate::ui::output::OutputFormat;

/// roledep - Check that every role a playbook needs exists
#[derive(Parser, Debug)]
#[command(name = "roledep")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Validate site.yml against ./roles
    roledep site.yml

    # Explicit roles directory, with a trace of what was found
    roledep --playbook site.yml --roles ansible/roles --verbose

    # Machine-readable report
    roledep site.yml --format json

EXIT STATUS:
    0   every required role is present
    1   roles are missing, or the playbook/roles directory could not be read")]
pub struct Cli {
    /// Path to the playbook YAML file
    #[arg(value_name = "PLAYBOOK")]
    pub playbook_arg: Option<PathBuf>,

    /// Path to the playbook YAML file (overrides the positional argument)
    #[arg(short, long, value_name = "PATH")]
    pub playbook: Option<PathBuf>,

    /// Path to the roles directory [default: roles]
    #[arg(short, long, value_name = "PATH")]
    pub roles: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Project config file (default: roledep.toml in the working directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// The playbook to validate: `--playbook` if given, else the positional.
    pub fn playbook_path(&self) -> Option<&PathBuf> {
        self.playbook.as_ref().or(self.playbook_arg.as_ref())
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
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
    fn positional_playbook() {
        let cli = Cli::try_parse_from(["roledep", "site.yml"]).unwrap();
        assert_eq!(cli.playbook_path(), Some(&PathBuf::from("site.yml")));
        assert!(cli.roles.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn flag_wins_over_positional() {
        let cli = Cli::try_parse_from(["roledep", "--playbook", "a.yml", "b.yml"]).unwrap();
        assert_eq!(cli.playbook_path(), Some(&PathBuf::from("a.yml")));
    }

    #[test]
    fn all_flags() {
        let cli = Cli::try_parse_from([
            "roledep",
            "-p",
            "site.yml",
            "-r",
            "ansible/roles",
            "-v",
            "--format",
            "json",
            "--config",
            "ci.toml",
        ])
        .unwrap();

        assert_eq!(cli.roles, Some(PathBuf::from("ansible/roles")));
        assert!(cli.verbose);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
    }

    #[test]
    fn no_playbook_parses() {
        let cli = Cli::try_parse_from(["roledep"]).unwrap();
        assert!(cli.playbook_path().is_none());
    }

    #[test]
    fn completions_flag() {
        let cli = Cli::try_parse_from(["roledep", "--completions", "zsh"]).unwrap();
        assert!(matches!(cli.completions, Some(Shell::Zsh)));
    }
}
