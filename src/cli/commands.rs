use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::ServiceContainer;
use crate::VERSION;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => cmd_help(cli),
        Some(Commands::Other(args)) => {
            debug!("unrecognized command: {:?}", args);
            cmd_help(cli)
        }
        Some(Commands::List { wave, rest }) => {
            ignore_extra(rest);
            cmd_list(cli, *wave)
        }
        Some(Commands::Version { rest }) => {
            ignore_extra(rest);
            cmd_version()
        }
        Some(command @ Commands::Deploy { args, all }) => {
            ignore_extra(args.get(1..).unwrap_or_default());
            cmd_deploy(cli, command.product(), *all)
        }
        Some(command @ Commands::Status { args }) => {
            ignore_extra(args.get(1..).unwrap_or_default());
            cmd_status(cli, command.product())
        }
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

/// Arguments past the ones a command uses are accepted and dropped.
fn ignore_extra(extra: &[String]) {
    if !extra.is_empty() {
        debug!("ignoring extra arguments: {:?}", extra);
    }
}

fn project_dir(cli: &Cli) -> PathBuf {
    cli.project_dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = project_dir(cli);
    Ok(Settings::load(Some(&dir))?)
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    let settings = load_settings(cli)?;
    Ok(ServiceContainer::new(settings)?.with_strict(cli.strict))
}

/// Usage line for commands that need a product.
///
/// Lenient mode prints it and succeeds; strict mode turns it into an error.
fn missing_product(container: &ServiceContainer, command: &str) -> CliResult<()> {
    let usage = format!("Usage: blackroad {command} <product>");
    if container.is_strict() {
        return Err(CliError::Usage(usage));
    }
    output::info(&usage);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_help(cli: &Cli) -> CliResult<()> {
    let container = container(cli)?;
    output::block(&container.catalog_service().help(VERSION));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_list(cli: &Cli, wave: Option<u8>) -> CliResult<()> {
    let container = container(cli)?;
    let listing = container.catalog_service().listing(wave)?;
    output::block(&listing);
    Ok(())
}

#[instrument]
fn cmd_version() -> CliResult<()> {
    output::info(&format!("BlackRoad CLI v{VERSION}"));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_deploy(cli: &Cli, product: Option<&str>, all: bool) -> CliResult<()> {
    let container = container(cli)?;
    let service = container.deployment_service();

    if all {
        for receipt in service.deploy_all() {
            output::block(&receipt);
        }
        return Ok(());
    }

    match product {
        Some(product) => {
            let receipt = service.deploy(product)?;
            output::block(&receipt);
            Ok(())
        }
        None => missing_product(&container, "deploy"),
    }
}

#[instrument(skip(cli))]
fn cmd_status(cli: &Cli, product: Option<&str>) -> CliResult<()> {
    let container = container(cli)?;
    match product {
        Some(product) => {
            let report = container.deployment_service().status(product)?;
            output::block(&report);
            Ok(())
        }
        None => missing_product(&container, "status"),
    }
}

#[instrument(skip(cli))]
fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::block(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("Global", &path.display()),
                None => output::warning("cannot determine global config directory"),
            }
            output::action("Local", &local_config_path(&project_dir(cli)).display());
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(&project_dir(cli))
            };
            Settings::write_template(&path)?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

#[instrument]
fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
