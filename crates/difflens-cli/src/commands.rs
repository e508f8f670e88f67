use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use tracing::debug;

use difflens_types::DiffResult;
use difflens_worker::{DiffConfig, CONFIG_FILE_NAME};

use crate::cli::*;
use crate::render::{render_stats, render_text};

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, config, cli.format),
        Command::Stats(args) => cmd_stats(args, config, cli.format),
        Command::Worker(args) => cmd_worker(args, config),
        Command::Config(args) => cmd_config(args, config, cli.format),
    }
}

/// Load `path`, or `./difflens.toml` if it exists, or the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<DiffConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if !local.is_file() {
                return Ok(DiffConfig::default());
            }
            local
        }
    };
    debug!(path = %path.display(), "loading configuration");
    DiffConfig::load(&path).with_context(|| format!("failed to load {}", path.display()))
}

/// Overlay command-line flags onto the loaded configuration.
pub fn apply_flags(config: &mut DiffConfig, flags: &OptionFlags) {
    if let Some(granularity) = flags.granularity {
        config.options.granularity = granularity;
    }
    config.options.ignore_whitespace |= flags.ignore_whitespace;
    config.options.ignore_case |= flags.ignore_case;
    config.options.trim_trailing_whitespace |= flags.trim_trailing_whitespace;
    config.options.ignore_blank_lines |= flags.ignore_blank_lines;
    if flags.max_edit_distance.is_some() {
        config.limits.max_edit_distance = flags.max_edit_distance;
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn compute(args: &DiffArgs, mut config: DiffConfig) -> anyhow::Result<DiffResult> {
    if args.left == Path::new("-") && args.right == Path::new("-") {
        anyhow::bail!("only one side can be read from stdin");
    }
    apply_flags(&mut config, &args.flags);
    let left = read_input(&args.left)?;
    let right = read_input(&args.right)?;
    let result = config.engine().compute(&left, &right, &config.options)?;
    Ok(result)
}

fn status(result: &DiffResult, exit_code: bool) -> ExitCode {
    if exit_code && !result.is_identical() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn cmd_diff(args: DiffArgs, config: DiffConfig, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let result = compute(&args, config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text if result.is_identical() => {
            println!("{} Files are identical.", "✓".green().bold());
        }
        OutputFormat::Text => print!(
            "{}",
            render_text(
                &result,
                &args.left.display().to_string(),
                &args.right.display().to_string()
            )
        ),
    }
    Ok(status(&result, args.exit_code))
}

fn cmd_stats(args: DiffArgs, config: DiffConfig, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let result = compute(&args, config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result.stats)?),
        OutputFormat::Text => println!("{}", render_stats(&result.stats)),
    }
    Ok(status(&result, args.exit_code))
}

fn cmd_worker(args: WorkerArgs, mut config: DiffConfig) -> anyhow::Result<ExitCode> {
    if args.no_progress {
        config.worker.emit_progress = false;
    }
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(difflens_worker::serve(
        tokio::io::stdin(),
        tokio::io::stdout(),
        config.engine(),
        &config.worker,
    ))?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_config(args: ConfigArgs, config: DiffConfig, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let config = if args.defaults { DiffConfig::default() } else { config };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => print!("{}", config.to_toml_string()?),
    }
    Ok(ExitCode::SUCCESS)
}
