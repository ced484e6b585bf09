use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::handle::{ContextHandle, WindowHandle};
use crate::native::ImeApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    FocusedWindow,
    IsWindow(WindowHandle),
    Acquire(WindowHandle),
    Release(WindowHandle, ContextHandle),
    OpenStatus(ContextHandle),
    SetOpenStatus(ContextHandle, bool),
    ConversionMode(ContextHandle),
    SetConversionMode(ContextHandle, u32),
}

#[derive(Default)]
pub(crate) struct FakeIme {
    focused: WindowHandle,
    windows: Vec<WindowHandle>,
    contexts: HashMap<WindowHandle, ContextHandle>,
    reject_sets: bool,
    fail_release: bool,
    fail_queries: bool,
    panic_on_query: bool,
    open: Mutex<HashMap<ContextHandle, bool>>,
    modes: Mutex<HashMap<ContextHandle, u32>>,
    live: Mutex<HashMap<ContextHandle, usize>>,
    calls: Mutex<Vec<Call>>,
    misuse: Mutex<Vec<String>>,
    handed_out: AtomicUsize,
}

impl FakeIme {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_focus(mut self, window: isize) -> Self {
        self.focused = WindowHandle::from_raw(window);
        self.with_window(window)
    }

    pub(crate) fn with_window(mut self, window: isize) -> Self {
        self.windows.push(WindowHandle::from_raw(window));
        self
    }

    pub(crate) fn with_context(mut self, window: isize, context: isize) -> Self {
        self.contexts.insert(
            WindowHandle::from_raw(window),
            ContextHandle::from_raw(context),
        );
        self.with_window(window)
    }

    pub(crate) fn with_open(self, context: isize, open: bool) -> Self {
        self.open
            .lock()
            .unwrap()
            .insert(ContextHandle::from_raw(context), open);
        self
    }

    pub(crate) fn with_mode(self, context: isize, mode: u32) -> Self {
        self.modes
            .lock()
            .unwrap()
            .insert(ContextHandle::from_raw(context), mode);
        self
    }

    pub(crate) fn rejecting_sets(mut self) -> Self {
        self.reject_sets = true;
        self
    }

    pub(crate) fn failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    pub(crate) fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub(crate) fn panicking_queries(mut self) -> Self {
        self.panic_on_query = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn acquired(&self) -> usize {
        self.handed_out.load(Ordering::SeqCst)
    }

    pub(crate) fn acquire_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Acquire(_)))
            .count()
    }

    pub(crate) fn releases(&self) -> Vec<(WindowHandle, ContextHandle)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Release(w, c) => Some((w, c)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn misuse(&self) -> Vec<String> {
        self.misuse.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_live(&self, context: ContextHandle, op: &str) {
        let live = self.live.lock().unwrap().get(&context).copied().unwrap_or(0);
        if live == 0 {
            self.misuse
                .lock()
                .unwrap()
                .push(format!("{op} on released context {context}"));
        }
    }
}

impl ImeApi for FakeIme {
    fn focused_window(&self) -> WindowHandle {
        self.record(Call::FocusedWindow);
        self.focused
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        self.record(Call::IsWindow(window));
        self.windows.contains(&window)
    }

    fn acquire_context(&self, window: WindowHandle) -> ContextHandle {
        self.record(Call::Acquire(window));
        let context = self.contexts.get(&window).copied().unwrap_or_default();
        if !context.is_null() {
            *self.live.lock().unwrap().entry(context).or_insert(0) += 1;
            self.handed_out.fetch_add(1, Ordering::SeqCst);
        }
        context
    }

    fn release_context(&self, window: WindowHandle, context: ContextHandle) -> bool {
        self.record(Call::Release(window, context));
        let released = {
            let mut live = self.live.lock().unwrap();
            match live.get_mut(&context) {
                Some(n) if *n > 0 => {
                    *n -= 1;
                    true
                }
                _ => false,
            }
        };
        if !released {
            self.misuse
                .lock()
                .unwrap()
                .push(format!("double release of context {context}"));
        }
        !self.fail_release
    }

    fn open_status(&self, context: ContextHandle) -> bool {
        self.record(Call::OpenStatus(context));
        self.check_live(context, "open status query");
        if self.panic_on_query {
            panic!("open status query blew up");
        }
        self.open
            .lock()
            .unwrap()
            .get(&context)
            .copied()
            .unwrap_or(false)
    }

    fn set_open_status(&self, context: ContextHandle, open: bool) -> bool {
        self.record(Call::SetOpenStatus(context, open));
        self.check_live(context, "open status change");
        if self.reject_sets {
            return false;
        }
        self.open.lock().unwrap().insert(context, open);
        true
    }

    fn conversion_mode(&self, context: ContextHandle) -> Option<u32> {
        self.record(Call::ConversionMode(context));
        self.check_live(context, "conversion mode query");
        if self.panic_on_query {
            panic!("conversion mode query blew up");
        }
        if self.fail_queries {
            return None;
        }
        Some(self.modes.lock().unwrap().get(&context).copied().unwrap_or(0))
    }

    fn set_conversion_mode(&self, context: ContextHandle, mode: u32) -> bool {
        self.record(Call::SetConversionMode(context, mode));
        self.check_live(context, "conversion mode change");
        if self.reject_sets {
            return false;
        }
        self.modes.lock().unwrap().insert(context, mode);
        true
    }
}
