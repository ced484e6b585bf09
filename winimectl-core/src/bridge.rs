use crate::error::{ImeError, Setting};
use crate::handle::{ContextHandle, WindowHandle};
use crate::native::ImeApi;

pub struct ImeBridge<'a, A: ImeApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: ImeApi + ?Sized> ImeBridge<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub fn get_status(&self, window: WindowHandle) -> Result<bool, ImeError> {
        let context = self.acquire(window)?;
        Ok(self.api.open_status(context.handle()))
    }

    pub fn set_status(&self, window: WindowHandle, open: bool) -> Result<(), ImeError> {
        let context = self.acquire(window)?;
        if !self.api.set_open_status(context.handle(), open) {
            return Err(ImeError::SetRejected(Setting::OpenStatus));
        }
        Ok(())
    }

    pub fn get_mode(&self, window: WindowHandle) -> Result<u32, ImeError> {
        let context = self.acquire(window)?;
        self.api
            .conversion_mode(context.handle())
            .ok_or(ImeError::QueryFailed(Setting::ConversionMode))
    }

    pub fn set_mode(&self, window: WindowHandle, mode: u32) -> Result<(), ImeError> {
        let context = self.acquire(window)?;
        if !self.api.set_conversion_mode(context.handle(), mode) {
            return Err(ImeError::SetRejected(Setting::ConversionMode));
        }
        Ok(())
    }

    fn acquire(&self, window: WindowHandle) -> Result<ContextGuard<'a, A>, ImeError> {
        let context = self.api.acquire_context(window);
        if context.is_null() {
            return Err(ImeError::NoInputContext(window));
        }
        log::debug!("acquired input context {context} for window {window}");
        Ok(ContextGuard {
            api: self.api,
            window,
            context,
        })
    }
}

/// Releases the acquired context on drop, so a bridge call gives the handle
/// back exactly once on every exit path, unwinding included.
struct ContextGuard<'a, A: ImeApi + ?Sized> {
    api: &'a A,
    window: WindowHandle,
    context: ContextHandle,
}

impl<A: ImeApi + ?Sized> ContextGuard<'_, A> {
    fn handle(&self) -> ContextHandle {
        self.context
    }
}

impl<A: ImeApi + ?Sized> Drop for ContextGuard<'_, A> {
    fn drop(&mut self) {
        if self.api.release_context(self.window, self.context) {
            log::debug!("released input context {}", self.context);
        } else {
            // The handle is discarded either way; the call keeps its own result.
            log::warn!(
                "{}",
                ImeError::ReleaseFailed {
                    window: self.window,
                    context: self.context,
                }
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;
    use crate::fake::{Call, FakeIme};

    const WINDOW: isize = 0x1001;
    const CONTEXT: isize = 0x2001;

    fn window() -> WindowHandle {
        WindowHandle::from_raw(WINDOW)
    }

    fn context() -> ContextHandle {
        ContextHandle::from_raw(CONTEXT)
    }

    fn ime() -> FakeIme {
        FakeIme::new().with_focus(WINDOW).with_context(WINDOW, CONTEXT)
    }

    #[test]
    fn get_status_reads_and_releases_once() {
        let api = ime().with_open(CONTEXT, true);
        let bridge = ImeBridge::new(&api);

        assert_eq!(bridge.get_status(window()), Ok(true));
        assert_eq!(api.releases(), vec![(window(), context())]);
        assert_eq!(
            api.calls(),
            vec![
                Call::Acquire(window()),
                Call::OpenStatus(context()),
                Call::Release(window(), context()),
            ]
        );
    }

    #[test]
    fn get_status_reports_off() {
        let api = ime().with_open(CONTEXT, false);
        assert_eq!(ImeBridge::new(&api).get_status(window()), Ok(false));
        assert_eq!(api.releases().len(), 1);
    }

    #[test]
    fn missing_context_is_not_off() {
        let api = FakeIme::new().with_focus(WINDOW);
        let bridge = ImeBridge::new(&api);

        assert_eq!(
            bridge.get_status(window()),
            Err(ImeError::NoInputContext(window()))
        );
        assert!(api.releases().is_empty());
        assert_eq!(api.calls(), vec![Call::Acquire(window())]);
    }

    #[test]
    fn set_then_get_round_trips() {
        let api = ime().with_open(CONTEXT, false);
        let bridge = ImeBridge::new(&api);

        bridge.set_status(window(), true).expect("set");
        assert_eq!(bridge.get_status(window()), Ok(true));
        bridge.set_status(window(), false).expect("set");
        assert_eq!(bridge.get_status(window()), Ok(false));
        assert_eq!(api.acquired(), 4);
        assert_eq!(api.releases().len(), 4);
        assert!(api.misuse().is_empty());
    }

    #[test]
    fn rejected_set_still_releases() {
        let api = ime().rejecting_sets();
        let bridge = ImeBridge::new(&api);

        assert_eq!(
            bridge.set_status(window(), false),
            Err(ImeError::SetRejected(Setting::OpenStatus))
        );
        assert_eq!(api.releases(), vec![(window(), context())]);
    }

    #[test]
    fn release_failure_does_not_mask_result() {
        let api = ime().with_open(CONTEXT, true).failing_release();
        let bridge = ImeBridge::new(&api);

        assert_eq!(bridge.get_status(window()), Ok(true));
        assert_eq!(bridge.set_status(window(), false), Ok(()));
        assert_eq!(api.releases().len(), 2);
    }

    #[test]
    fn release_failure_does_not_mask_error() {
        let api = ime().rejecting_sets().failing_release();
        assert_eq!(
            ImeBridge::new(&api).set_mode(window(), 9),
            Err(ImeError::SetRejected(Setting::ConversionMode))
        );
        assert_eq!(api.releases().len(), 1);
    }

    #[test]
    fn panicking_query_still_releases() {
        let api = ime().panicking_queries();
        let bridge = ImeBridge::new(&api);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| bridge.get_status(window())));
        assert!(outcome.is_err());
        assert_eq!(api.acquired(), 1);
        assert_eq!(api.releases(), vec![(window(), context())]);
        assert!(api.misuse().is_empty());
    }

    #[test]
    fn conversion_mode_round_trips() {
        let api = ime().with_mode(CONTEXT, 0x09);
        let bridge = ImeBridge::new(&api);

        assert_eq!(bridge.get_mode(window()), Ok(0x09));
        bridge.set_mode(window(), 0x19).expect("set mode");
        assert_eq!(bridge.get_mode(window()), Ok(0x19));
        assert_eq!(api.releases().len(), 3);
    }

    #[test]
    fn failed_mode_query_releases() {
        let api = ime().failing_queries();
        assert_eq!(
            ImeBridge::new(&api).get_mode(window()),
            Err(ImeError::QueryFailed(Setting::ConversionMode))
        );
        assert_eq!(api.releases().len(), 1);
    }

    #[test]
    fn no_use_after_release() {
        let api = ime().with_open(CONTEXT, true);
        let bridge = ImeBridge::new(&api);
        for _ in 0..3 {
            let _ = bridge.get_status(window());
            let _ = bridge.set_status(window(), true);
            let _ = bridge.get_mode(window());
        }
        assert!(api.misuse().is_empty(), "{:?}", api.misuse());
        assert_eq!(api.acquired(), api.releases().len());
    }
}
