mod backend;
mod cli;
mod logging;
#[cfg(windows)]
mod native;

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use winimectl_core::command::{self, Command};
use winimectl_core::config::{Config, ConfigError};
use winimectl_core::{ImeControl, ImeError};

use cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    let config_path = args.config.clone().or_else(Config::config_path);
    let (config, config_error) = load_config(config_path.as_deref());

    logging::init(log_level(args.verbose, &config));
    if let Some(err) = &config_error {
        log::warn!("using default config: {err}");
    }

    let backend = args.backend.unwrap_or(config.native.backend);
    let control = ImeControl::init(
        backend::load(backend, config.window.follow_focus),
        args.target(),
    );

    let command = Command::from(&args.command);
    let result = command.run(&control);

    if let Some(line) = command.render(&result) {
        if let Err(err) = write_line(&line) {
            eprintln!("winimectl: failed to write result: {err}");
            return ExitCode::from(command::EXIT_FAILED);
        }
    }
    if let Err(err) = &result {
        eprintln!("{}", diagnostic(err, control.init_error()));
    }
    ExitCode::from(command::exit_code(&result))
}

fn load_config(path: Option<&Path>) -> (Config, Option<ConfigError>) {
    match path.map(Config::read) {
        Some(Ok(Some(config))) => (config, None),
        Some(Ok(None)) | None => (Config::default(), None),
        Some(Err(err)) => (Config::default(), Some(err)),
    }
}

fn log_level(verbose: bool, config: &Config) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        config.log.level.to_filter()
    }
}

fn diagnostic(err: &ImeError, init_error: Option<&ImeError>) -> String {
    match (err, init_error) {
        (ImeError::NotInitialized, Some(cause)) => format!("winimectl: {err}: {cause}"),
        _ => format!("winimectl: {err}"),
    }
}

fn write_line(line: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}
