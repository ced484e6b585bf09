use crate::error::ImeError;
use crate::handle::WindowHandle;
use crate::native::ImeApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowTarget {
    #[default]
    Focused,
    Explicit(WindowHandle),
}

impl WindowTarget {
    pub fn resolve<A: ImeApi + ?Sized>(self, api: &A) -> Result<WindowHandle, ImeError> {
        let window = match self {
            WindowTarget::Focused => api.focused_window(),
            WindowTarget::Explicit(window) => {
                if window.is_null() || !api.is_window(window) {
                    return Err(ImeError::NoFocusedWindow);
                }
                window
            }
        };
        if window.is_null() {
            return Err(ImeError::NoFocusedWindow);
        }
        log::debug!("resolved window {window}");
        Ok(window)
    }
}
