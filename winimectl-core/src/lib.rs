pub mod bridge;
pub mod command;
pub mod config;
pub mod control;
pub mod error;
pub mod handle;
pub mod native;
pub mod resolver;

#[cfg(test)]
mod fake;

pub use bridge::ImeBridge;
pub use control::{ImeControl, ImeStatus};
pub use error::{ImeError, Setting};
pub use handle::{ContextHandle, WindowHandle};
pub use native::ImeApi;
pub use resolver::WindowTarget;
