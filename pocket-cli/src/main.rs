use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use pocket_cli::{Config, DisplayOptions, app, checklist::Checklist, logging, script};

/// Pocket calculator and checklist for the terminal.
#[derive(Debug, Parser)]
#[command(name = "pocket", version, about, long_about = None)]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (e.g. `debug`, `pocket_core=trace`). Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Suppress log output on stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,

    /// Never color the display.
    #[arg(long, global = true, default_value_t = false)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Press the given keys and print the display. Without keys, read
    /// whitespace-separated keys from stdin line by line.
    Calc {
        /// Print every frame, not just the last.
        #[arg(long, default_value_t = false)]
        trace: bool,

        /// Key names: 0-9 . + - * / = % Enter Escape Backspace sign ...
        #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
        keys: Vec<String>,
    },

    /// Run a key-script file and print the display.
    Run {
        /// Script with key names; `#` starts a comment.
        file: PathBuf,

        /// Print every frame, not just the last.
        #[arg(long, default_value_t = false)]
        trace: bool,
    },

    /// Interactive checklist on stdin.
    Todo,
}

fn apply_logging(
    cli: &Cli,
    config: &Config,
) -> Result<()> {
    if let Some(level) = cli.log_level.as_deref().or(config.logging.level.as_deref()) {
        logging::set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_ref().or(config.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }
    if cli.quiet {
        logging::set_stderr_enabled(false)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();
    let config = Config::load_optional(cli.config.as_deref()).context("failed to load config")?;
    apply_logging(&cli, &config)?;
    debug!(?config, "configuration loaded");

    let color = config.display.color && !cli.no_color && io::stdout().is_terminal();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Calc { trace, ref keys } => {
            let options = DisplayOptions {
                color,
                trace: trace || config.display.trace,
            };
            if keys.is_empty() {
                app::calc_prompt(io::stdin().lock(), &mut out, options)?;
            } else {
                app::run_keys(keys.as_slice(), options, &mut out)?;
            }
        }
        Command::Run { ref file, trace } => {
            let options = DisplayOptions {
                color,
                trace: trace || config.display.trace,
            };
            let actions = script::load_from_file(file)
                .with_context(|| format!("failed to load key script: {}", file.display()))?;
            app::run_actions(&actions, options, &mut out)?;
        }
        Command::Todo => {
            Checklist::new()
                .run(io::stdin().lock(), &mut out)
                .context("checklist I/O failed")?;
        }
    }

    Ok(())
}
