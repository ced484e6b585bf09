use crate::control::ImeControl;
use crate::error::ImeError;
use crate::native::ImeApi;

pub const UNAVAILABLE: i64 = -1;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILED: u8 = 1;
pub const EXIT_NOT_INITIALIZED: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    GetStatus,
    SetStatus(bool),
    GetMode,
    SetMode(u32),
}

impl Command {
    pub fn is_query(self) -> bool {
        matches!(self, Command::GetStatus | Command::GetMode)
    }

    pub fn run<A: ImeApi>(self, control: &ImeControl<A>) -> Result<Option<u32>, ImeError> {
        match self {
            Command::GetStatus => control.get_status().map(|open| Some(u32::from(open))),
            Command::SetStatus(open) => control.set_status(open).map(|()| None),
            Command::GetMode => control.get_mode().map(Some),
            Command::SetMode(mode) => control.set_mode(mode).map(|()| None),
        }
    }

    pub fn render(self, result: &Result<Option<u32>, ImeError>) -> Option<String> {
        match result {
            Ok(Some(value)) => Some(value.to_string()),
            Ok(None) => None,
            Err(_) if self.is_query() => Some(UNAVAILABLE.to_string()),
            Err(_) => None,
        }
    }
}

pub fn exit_code(result: &Result<Option<u32>, ImeError>) -> u8 {
    match result {
        Ok(_) => EXIT_OK,
        Err(err) if err.is_fatal() => EXIT_NOT_INITIALIZED,
        Err(_) => EXIT_FAILED,
    }
}
