use crate::handle::{ContextHandle, WindowHandle};

/// The native IME surface the bridge drives. Every context handed out by
/// `acquire_context` must be passed back to `release_context` exactly once.
pub trait ImeApi {
    fn focused_window(&self) -> WindowHandle;

    fn is_window(&self, window: WindowHandle) -> bool;

    fn acquire_context(&self, window: WindowHandle) -> ContextHandle;

    fn release_context(&self, window: WindowHandle, context: ContextHandle) -> bool;

    fn open_status(&self, context: ContextHandle) -> bool;

    fn set_open_status(&self, context: ContextHandle, open: bool) -> bool;

    fn conversion_mode(&self, context: ContextHandle) -> Option<u32>;

    fn set_conversion_mode(&self, context: ContextHandle, mode: u32) -> bool;
}

impl<T: ImeApi + ?Sized> ImeApi for Box<T> {
    fn focused_window(&self) -> WindowHandle {
        (**self).focused_window()
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        (**self).is_window(window)
    }

    fn acquire_context(&self, window: WindowHandle) -> ContextHandle {
        (**self).acquire_context(window)
    }

    fn release_context(&self, window: WindowHandle, context: ContextHandle) -> bool {
        (**self).release_context(window, context)
    }

    fn open_status(&self, context: ContextHandle) -> bool {
        (**self).open_status(context)
    }

    fn set_open_status(&self, context: ContextHandle, open: bool) -> bool {
        (**self).set_open_status(context, open)
    }

    fn conversion_mode(&self, context: ContextHandle) -> Option<u32> {
        (**self).conversion_mode(context)
    }

    fn set_conversion_mode(&self, context: ContextHandle, mode: u32) -> bool {
        (**self).set_conversion_mode(context, mode)
    }
}
