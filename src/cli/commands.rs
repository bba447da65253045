//! Command dispatch: wires settings, the network and reporting together

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{SimulationOutcome, SimulationService};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, RunArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings, LOCAL_CONFIG_FILE};
use crate::domain::{build_strategy, Network};
use crate::infrastructure::TextReporter;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Run(args)) => cmd_run(cli, args),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(cli),
            ConfigCommands::Init { global, force } => cmd_config_init(*global, *force),
            ConfigCommands::Path => cmd_config_path(),
        },
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => cmd_run(cli, &RunArgs::default()),
    }
}

/// Layered settings with the run's command line overrides on top.
pub fn resolve_settings(cli: &Cli, args: &RunArgs) -> CliResult<Settings> {
    let settings = Settings::load(cli.config.as_deref())?;
    Ok(apply_run_args(settings, args))
}

/// Apply flags that were given; everything else keeps the configured value.
pub fn apply_run_args(mut settings: Settings, args: &RunArgs) -> Settings {
    if let Some(months) = args.months {
        settings.months = months;
    }
    if let Some(target) = args.front_line_target {
        settings.front_line_target = target;
    }
    if let Some(kind) = args.strategy {
        settings.strategy.kind = kind;
    }
    if let Some(size) = args.batch_size {
        settings.strategy.batch_size = size;
    }
    if let Some(probability) = args.probability {
        settings.strategy.probability = probability;
    }
    if let Some(seed) = args.seed {
        settings.strategy.seed = Some(seed);
    }
    if let Some(format) = args.format {
        settings.output = format;
    }
    settings
}

/// Run a whole simulation, writing the report to `out`.
#[instrument(level = "debug", skip(out))]
pub fn run_simulation<W: Write>(settings: &Settings, out: W) -> CliResult<SimulationOutcome> {
    let strategy = build_strategy(&settings.strategy.to_spec()).map_err(ApplicationError::from)?;
    let network = Network::new(strategy, settings.front_line_target);
    let reporter = TextReporter::new(out, settings.output);
    let mut service = SimulationService::new(network, reporter);
    Ok(service.run(settings.months)?)
}

#[instrument(level = "debug", skip(cli))]
fn cmd_run(cli: &Cli, args: &RunArgs) -> CliResult<()> {
    let settings = resolve_settings(cli, args)?;
    debug!("settings: {:?}", settings);
    let outcome = run_simulation(&settings, io::stdout().lock())?;
    debug!("outcome: {:?}", outcome);
    Ok(())
}

fn cmd_config_show(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    output::info(&settings.to_toml()?);
    Ok(())
}

fn cmd_config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::action("global", &path.display()),
        None => output::warning("no global config directory on this platform"),
    }
    output::action("local", LOCAL_CONFIG_FILE);
    Ok(())
}

fn cmd_config_init(global: bool, force: bool) -> CliResult<()> {
    let path = if global {
        global_config_path().ok_or_else(|| {
            CliError::InvalidArgs("no global config directory on this platform".into())
        })?
    } else {
        PathBuf::from(LOCAL_CONFIG_FILE)
    };

    if path.exists() && !force {
        return Err(CliError::InvalidArgs(format!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::io(format!("create {}", parent.display()), e))?;
    }
    let template = Settings::default().to_toml()?;
    fs::write(&path, template).map_err(|e| CliError::io(format!("write {}", path.display()), e))?;

    output::success(&format!("Created {}", path.display()));
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyKind;
    use crate::infrastructure::OutputFormat;

    #[test]
    fn given_run_flags_when_applied_then_override_only_given_fields() {
        let args = RunArgs {
            months: Some(7),
            strategy: Some(StrategyKind::Batch),
            format: Some(OutputFormat::Tree),
            ..RunArgs::default()
        };
        let settings = apply_run_args(Settings::default(), &args);

        assert_eq!(settings.months, 7);
        assert_eq!(settings.strategy.kind, StrategyKind::Batch);
        assert_eq!(settings.output, OutputFormat::Tree);
        assert_eq!(settings.front_line_target, 5);
        assert_eq!(settings.strategy.batch_size, 2);
    }

    #[test]
    fn given_invalid_probability_when_run_simulation_then_config_exit_code() {
        let mut settings = Settings::default();
        settings.strategy.kind = StrategyKind::Probabilistic;
        settings.strategy.probability = 2.0;

        let err = run_simulation(&settings, Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::CONFIG);
    }
}
