//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::output_report;
use ferry_app::config::Config;
use ferry_app::simulation::run_simulation;
use ferry_types::{OutputFormat, Port, Result};
use std::path::{Path, PathBuf};

/// Overrides for a single run; anything unset falls back to the config file
#[derive(Debug, Default)]
pub struct RunOptions {
    pub cars: Option<u32>,
    pub minibuses: Option<u32>,
    pub trucks: Option<u32>,
    pub capacity: Option<u32>,
    pub seed: Option<u64>,
    pub start_port: Option<u8>,
    pub time_scale: Option<f64>,
    pub drain: bool,
}

impl RunOptions {
    fn apply(self, config: &mut Config) {
        if let Some(cars) = self.cars {
            config.cars = cars;
        }
        if let Some(minibuses) = self.minibuses {
            config.minibuses = minibuses;
        }
        if let Some(trucks) = self.trucks {
            config.trucks = trucks;
        }
        if let Some(capacity) = self.capacity {
            config.ferry_capacity = capacity;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(port) = self.start_port.and_then(Port::from_index) {
            config.start_port = Some(port);
        }
        if let Some(scale) = self.time_scale {
            config.time_scale = scale;
        }
        if self.drain {
            config.drain = true;
        }
    }
}

pub async fn execute(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Run {
            cars,
            minibuses,
            trucks,
            capacity,
            seed,
            start_port,
            time_scale,
            drain,
            events,
        } => {
            let options = RunOptions {
                cars,
                minibuses,
                trucks,
                capacity,
                seed,
                start_port,
                time_scale,
                drain,
            };
            cmd_run(config, options, output_format, events).await
        }

        Commands::Config {
            show,
            set_capacity,
            set_time_scale,
            set_output,
            set_seed,
            reset,
        } => cmd_config(
            config,
            cli.config,
            show,
            set_capacity,
            set_time_scale,
            set_output,
            set_seed,
            reset,
        ),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn cmd_run(
    mut config: Config,
    options: RunOptions,
    output_format: OutputFormat,
    with_events: bool,
) -> Result<()> {
    options.apply(&mut config);
    let outcome = run_simulation(&config).await?;
    output_report(output_format, &outcome, with_events)
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    mut config: Config,
    path: Option<PathBuf>,
    show: bool,
    set_capacity: Option<u32>,
    set_time_scale: Option<f64>,
    set_output: Option<OutputFormat>,
    set_seed: Option<u64>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        save_config(&config, path.as_deref())?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut modified = false;

    if let Some(capacity) = set_capacity {
        config.ferry_capacity = capacity;
        modified = true;
    }

    if let Some(scale) = set_time_scale {
        config.time_scale = scale;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(seed) = set_seed {
        config.seed = Some(seed);
        modified = true;
    }

    if modified {
        config.validate()?;
        let saved = save_config(&config, path.as_deref())?;
        println!("Configuration updated ({})", saved.display());
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

fn save_config(config: &Config, path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => {
            config.save_to(path)?;
            Ok(path.to_path_buf())
        }
        None => config.save(),
    }
}
