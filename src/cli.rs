use std::path::PathBuf;

use clap::{Parser, Subcommand};

use winimectl_core::command::Command;
use winimectl_core::config::BackendKind;
use winimectl_core::{WindowHandle, WindowTarget};

#[derive(Debug, Parser)]
#[command(
    name = "winimectl",
    version,
    about = "Query or switch the IME of the focused window"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Operate on this window instead of the focused one (decimal or 0x hex)
    #[arg(long, global = true, value_parser = parse_window)]
    pub window: Option<WindowHandle>,

    /// Config file (defaults to <config dir>/winimectl/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Native backend: `ime_window` or `context`
    #[arg(long, global = true)]
    pub backend: Option<BackendKind>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print 1 if the IME is open, 0 if closed
    #[command(name = "get_status")]
    GetStatus,
    /// Open (1) or close (0) the IME
    #[command(name = "set_status")]
    SetStatus {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        value: u8,
    },
    /// Print the conversion mode bits
    #[command(name = "get_mode")]
    GetMode,
    /// Set the conversion mode bits
    #[command(name = "set_mode")]
    SetMode { mode: u32 },
}

impl Args {
    pub fn target(&self) -> WindowTarget {
        match self.window {
            Some(window) => WindowTarget::Explicit(window),
            None => WindowTarget::Focused,
        }
    }
}

impl From<&CliCommand> for Command {
    fn from(command: &CliCommand) -> Self {
        match command {
            CliCommand::GetStatus => Command::GetStatus,
            CliCommand::SetStatus { value } => Command::SetStatus(*value != 0),
            CliCommand::GetMode => Command::GetMode,
            CliCommand::SetMode { mode } => Command::SetMode(*mode),
        }
    }
}

fn parse_window(s: &str) -> Result<WindowHandle, String> {
    WindowHandle::parse(s).ok_or_else(|| format!("invalid window identifier `{s}`"))
}
