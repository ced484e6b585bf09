use std::fmt;

use thiserror::Error;

use crate::handle::{ContextHandle, WindowHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    OpenStatus,
    ConversionMode,
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::OpenStatus => f.write_str("open status"),
            Setting::ConversionMode => f.write_str("conversion mode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImeError {
    #[error("no focused window")]
    NoFocusedWindow,

    #[error("window {0} has no input context")]
    NoInputContext(WindowHandle),

    #[error("the IME rejected the {0} change")]
    SetRejected(Setting),

    #[error("failed to read the IME {0}")]
    QueryFailed(Setting),

    #[error("failed to release input context {context} of window {window}")]
    ReleaseFailed {
        window: WindowHandle,
        context: ContextHandle,
    },

    #[error("native entry point unavailable: {0}")]
    NativeEntryPointUnavailable(String),

    #[error("IME control is not initialized")]
    NotInitialized,
}

impl ImeError {
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ImeError::NativeEntryPointUnavailable(_) | ImeError::NotInitialized
        )
    }
}
