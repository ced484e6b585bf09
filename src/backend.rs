use winimectl_core::config::BackendKind;
use winimectl_core::{ImeApi, ImeError};

pub type NativeApi = Box<dyn ImeApi + Send + Sync>;

#[cfg(windows)]
pub fn load(kind: BackendKind, follow_focus: bool) -> Result<NativeApi, ImeError> {
    use crate::native::{Imm32, User32};

    let user32 = User32::load()?;
    let imm32 = Imm32::load()?;
    log::debug!("using {kind:?} backend");
    Ok(match kind {
        BackendKind::Context => Box::new(imp::ContextBackend {
            user32,
            imm32,
            follow_focus,
        }),
        BackendKind::ImeWindow => Box::new(imp::ImeWindowBackend {
            user32,
            imm32,
            follow_focus,
        }),
    })
}

#[cfg(not(windows))]
pub fn load(_kind: BackendKind, _follow_focus: bool) -> Result<NativeApi, ImeError> {
    Err(ImeError::NativeEntryPointUnavailable(
        "imm32.dll is only available on Windows".to_string(),
    ))
}

#[cfg_attr(not(windows), allow(dead_code))]
fn ime_control_open(lresult: isize) -> bool {
    lresult != 0
}

// WM_IME_CONTROL set commands return 0 on success.
#[cfg_attr(not(windows), allow(dead_code))]
fn ime_control_set_ok(lresult: isize) -> bool {
    lresult == 0
}

#[cfg_attr(not(windows), allow(dead_code))]
fn merged_conversion(current: Option<(u32, u32)>, mode: u32) -> Option<(u32, u32)> {
    current.map(|(_, sentence)| (mode, sentence))
}

#[cfg(windows)]
mod imp {
    use windows::Win32::UI::Input::Ime::{
        IMC_GETCONVERSIONMODE, IMC_GETOPENSTATUS, IMC_SETCONVERSIONMODE, IMC_SETOPENSTATUS,
    };
    use windows::Win32::UI::WindowsAndMessaging::WM_IME_CONTROL;

    use winimectl_core::{ContextHandle, ImeApi, WindowHandle};

    use super::{ime_control_open, ime_control_set_ok, merged_conversion};
    use crate::native::{to_hwnd, Imm32, User32};

    pub(super) struct ContextBackend {
        pub(super) user32: User32,
        pub(super) imm32: Imm32,
        pub(super) follow_focus: bool,
    }

    impl ImeApi for ContextBackend {
        fn focused_window(&self) -> WindowHandle {
            self.user32.focused_window(self.follow_focus)
        }

        fn is_window(&self, window: WindowHandle) -> bool {
            self.user32.is_window(window)
        }

        fn acquire_context(&self, window: WindowHandle) -> ContextHandle {
            self.imm32.get_context(window)
        }

        fn release_context(&self, window: WindowHandle, context: ContextHandle) -> bool {
            self.imm32.release_context(window, context)
        }

        fn open_status(&self, context: ContextHandle) -> bool {
            self.imm32.get_open_status(context)
        }

        fn set_open_status(&self, context: ContextHandle, open: bool) -> bool {
            self.imm32.set_open_status(context, open)
        }

        fn conversion_mode(&self, context: ContextHandle) -> Option<u32> {
            self.imm32
                .get_conversion_status(context)
                .map(|(conversion, _)| conversion)
        }

        fn set_conversion_mode(&self, context: ContextHandle, mode: u32) -> bool {
            match merged_conversion(self.imm32.get_conversion_status(context), mode) {
                Some((conversion, sentence)) => {
                    self.imm32.set_conversion_status(context, conversion, sentence)
                }
                None => false,
            }
        }
    }

    /// Drives the IME through `WM_IME_CONTROL` on the window's default IME
    /// window, which also works for windows owned by other processes.
    ///
    /// The "context" handed to the bridge is the IME window itself. It is
    /// borrowed, so releasing it is a no-op.
    pub(super) struct ImeWindowBackend {
        pub(super) user32: User32,
        pub(super) imm32: Imm32,
        pub(super) follow_focus: bool,
    }

    impl ImeWindowBackend {
        fn control(&self, context: ContextHandle, command: u32, value: isize) -> isize {
            let ime_window = to_hwnd(WindowHandle::from_raw(context.raw()));
            self.user32
                .send_message(ime_window, WM_IME_CONTROL, command as usize, value)
        }
    }

    impl ImeApi for ImeWindowBackend {
        fn focused_window(&self) -> WindowHandle {
            self.user32.focused_window(self.follow_focus)
        }

        fn is_window(&self, window: WindowHandle) -> bool {
            self.user32.is_window(window)
        }

        fn acquire_context(&self, window: WindowHandle) -> ContextHandle {
            ContextHandle::from_raw(self.imm32.get_default_ime_window(window).raw())
        }

        fn release_context(&self, _window: WindowHandle, _context: ContextHandle) -> bool {
            true
        }

        fn open_status(&self, context: ContextHandle) -> bool {
            ime_control_open(self.control(context, IMC_GETOPENSTATUS, 0))
        }

        fn set_open_status(&self, context: ContextHandle, open: bool) -> bool {
            ime_control_set_ok(self.control(context, IMC_SETOPENSTATUS, isize::from(open)))
        }

        fn conversion_mode(&self, context: ContextHandle) -> Option<u32> {
            Some(self.control(context, IMC_GETCONVERSIONMODE, 0) as u32)
        }

        fn set_conversion_mode(&self, context: ContextHandle, mode: u32) -> bool {
            ime_control_set_ok(self.control(context, IMC_SETCONVERSIONMODE, mode as isize))
        }
    }
}
