//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// BlackRoad CLI: product catalog, deploy and status
#[derive(Parser, Debug)]
#[command(name = "blackroad")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Debug logging to stderr (-d info, -d -d debug, -d -d -d trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Project directory holding .blackroad.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Reject products missing from the catalog and fail on missing arguments
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all products
    #[command(visible_alias = "ls")]
    List {
        /// Only show products of this wave
        #[arg(short, long)]
        wave: Option<u8>,
        /// Ignored
        #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        rest: Vec<String>,
    },

    /// Show CLI version
    Version {
        /// Ignored
        #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        rest: Vec<String>,
    },

    /// Deploy a product
    #[command(visible_alias = "d")]
    Deploy {
        /// Product to deploy; anything after it is ignored
        #[arg(
            value_name = "PRODUCT",
            num_args = 0..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
        /// Deploy every catalog product
        #[arg(short, long)]
        all: bool,
    },

    /// Check product status
    #[command(visible_alias = "s")]
    Status {
        /// Product to check; anything after it is ignored
        #[arg(
            value_name = "PRODUCT",
            num_args = 0..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Anything else prints the help banner
    #[command(external_subcommand)]
    Other(Vec<String>),
}

impl Commands {
    /// Product named by `deploy` or `status`: the first value after the command.
    pub fn product(&self) -> Option<&str> {
        match self {
            Commands::Deploy { args, .. } | Commands::Status { args } => {
                args.first().map(String::as_str)
            }
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config instead of the project-local one
        #[arg(short, long)]
        global: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_no_args_when_parsing_then_no_command() {
        let cli = Cli::try_parse_from(["blackroad"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.debug, 0);
    }

    #[test]
    fn given_unknown_command_when_parsing_then_other() {
        let cli = Cli::try_parse_from(["blackroad", "frobnicate", "x"]).unwrap();
        match cli.command {
            Some(Commands::Other(args)) => assert_eq!(args, vec!["frobnicate", "x"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn given_deploy_without_product_when_parsing_then_product_is_none() {
        let cli = Cli::try_parse_from(["blackroad", "deploy"]).unwrap();
        let command = cli.command.unwrap();
        assert!(matches!(command, Commands::Deploy { all: false, .. }));
        assert_eq!(command.product(), None);
    }

    #[test]
    fn given_aliases_when_parsing_then_resolve_to_commands() {
        let cli = Cli::try_parse_from(["blackroad", "s", "vllm"]).unwrap();
        let command = cli.command.unwrap();
        assert!(matches!(command, Commands::Status { .. }));
        assert_eq!(command.product(), Some("vllm"));
        let cli = Cli::try_parse_from(["blackroad", "ls", "--wave", "3"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { wave: Some(3), .. })));
    }

    #[test]
    fn given_global_flags_before_product_when_parsing_then_applied() {
        let cli = Cli::try_parse_from(["blackroad", "deploy", "--strict", "-dd", "vllm"]).unwrap();
        assert!(cli.strict);
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.command.unwrap().product(), Some("vllm"));
    }

    #[test]
    fn given_values_after_product_when_parsing_then_ignored() {
        let cli = Cli::try_parse_from(["blackroad", "deploy", "a", "b", "--strict"]).unwrap();
        assert!(!cli.strict);
        assert_eq!(cli.command.unwrap().product(), Some("a"));
    }

    #[test]
    fn given_hyphen_leading_product_when_parsing_then_taken_verbatim() {
        let cli = Cli::try_parse_from(["blackroad", "status", "-x"]).unwrap();
        assert_eq!(cli.command.unwrap().product(), Some("-x"));
    }

    #[test]
    fn given_extra_args_for_list_and_version_when_parsing_then_accepted() {
        let cli = Cli::try_parse_from(["blackroad", "list", "extra", "-y"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { wave: None, .. })));
        let cli = Cli::try_parse_from(["blackroad", "version", "x"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Version { .. })));
    }

    #[test]
    fn given_help_keyword_when_parsing_then_other() {
        let cli = Cli::try_parse_from(["blackroad", "help"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Other(ref a)) if a == &["help"]));
    }
}
