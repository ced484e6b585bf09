use std::ffi::{c_void, CStr};
use std::mem;

use windows::core::{HSTRING, PCSTR};
use windows::Win32::Foundation::{HMODULE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};
use windows::Win32::UI::WindowsAndMessaging::GUITHREADINFO;

use winimectl_core::{ContextHandle, ImeError, WindowHandle};

const USER32: &str = "user32.dll";
const IMM32: &str = "imm32.dll";

type RawProc = unsafe extern "system" fn() -> isize;
type Himc = *mut c_void;
type Bool = i32;

type GetForegroundWindowFn = unsafe extern "system" fn() -> HWND;
type GetWindowThreadProcessIdFn = unsafe extern "system" fn(HWND, *mut u32) -> u32;
type GetGuiThreadInfoFn = unsafe extern "system" fn(u32, *mut GUITHREADINFO) -> Bool;
type IsWindowFn = unsafe extern "system" fn(HWND) -> Bool;
type SendMessageWFn = unsafe extern "system" fn(HWND, u32, WPARAM, LPARAM) -> LRESULT;

type ImmGetContextFn = unsafe extern "system" fn(HWND) -> Himc;
type ImmReleaseContextFn = unsafe extern "system" fn(HWND, Himc) -> Bool;
type ImmGetOpenStatusFn = unsafe extern "system" fn(Himc) -> Bool;
type ImmSetOpenStatusFn = unsafe extern "system" fn(Himc, Bool) -> Bool;
type ImmGetConversionStatusFn = unsafe extern "system" fn(Himc, *mut u32, *mut u32) -> Bool;
type ImmSetConversionStatusFn = unsafe extern "system" fn(Himc, u32, u32) -> Bool;
type ImmGetDefaultImeWndFn = unsafe extern "system" fn(HWND) -> HWND;

#[derive(Clone, Copy)]
pub struct User32 {
    get_foreground_window: GetForegroundWindowFn,
    get_window_thread_process_id: GetWindowThreadProcessIdFn,
    get_gui_thread_info: GetGuiThreadInfoFn,
    is_window: IsWindowFn,
    send_message: SendMessageWFn,
}

impl User32 {
    pub fn load() -> Result<Self, ImeError> {
        let module = load_library(USER32)?;
        unsafe {
            Ok(Self {
                get_foreground_window: mem::transmute::<RawProc, GetForegroundWindowFn>(
                    symbol(module, USER32, c"GetForegroundWindow")?,
                ),
                get_window_thread_process_id: mem::transmute::<
                    RawProc,
                    GetWindowThreadProcessIdFn,
                >(symbol(
                    module,
                    USER32,
                    c"GetWindowThreadProcessId",
                )?),
                get_gui_thread_info: mem::transmute::<RawProc, GetGuiThreadInfoFn>(symbol(
                    module,
                    USER32,
                    c"GetGUIThreadInfo",
                )?),
                is_window: mem::transmute::<RawProc, IsWindowFn>(symbol(
                    module,
                    USER32,
                    c"IsWindow",
                )?),
                send_message: mem::transmute::<RawProc, SendMessageWFn>(symbol(
                    module,
                    USER32,
                    c"SendMessageW",
                )?),
            })
        }
    }

    pub fn focused_window(&self, follow_focus: bool) -> WindowHandle {
        unsafe {
            let foreground = (self.get_foreground_window)();
            if foreground.0.is_null() {
                return WindowHandle::NULL;
            }
            if follow_focus {
                let thread =
                    (self.get_window_thread_process_id)(foreground, std::ptr::null_mut());
                let mut info = GUITHREADINFO {
                    cbSize: mem::size_of::<GUITHREADINFO>() as u32,
                    ..Default::default()
                };
                if thread != 0
                    && (self.get_gui_thread_info)(thread, &mut info) != 0
                    && !info.hwndFocus.0.is_null()
                {
                    return to_window(info.hwndFocus);
                }
            }
            to_window(foreground)
        }
    }

    pub fn is_window(&self, window: WindowHandle) -> bool {
        unsafe { (self.is_window)(to_hwnd(window)) != 0 }
    }

    pub fn send_message(&self, target: HWND, msg: u32, wparam: usize, lparam: isize) -> isize {
        unsafe { (self.send_message)(target, msg, WPARAM(wparam), LPARAM(lparam)).0 }
    }
}

#[derive(Clone, Copy)]
pub struct Imm32 {
    get_context: ImmGetContextFn,
    release_context: ImmReleaseContextFn,
    get_open_status: ImmGetOpenStatusFn,
    set_open_status: ImmSetOpenStatusFn,
    get_conversion_status: ImmGetConversionStatusFn,
    set_conversion_status: ImmSetConversionStatusFn,
    get_default_ime_wnd: ImmGetDefaultImeWndFn,
}

impl Imm32 {
    pub fn load() -> Result<Self, ImeError> {
        let module = load_library(IMM32)?;
        unsafe {
            Ok(Self {
                get_context: mem::transmute::<RawProc, ImmGetContextFn>(symbol(
                    module,
                    IMM32,
                    c"ImmGetContext",
                )?),
                release_context: mem::transmute::<RawProc, ImmReleaseContextFn>(symbol(
                    module,
                    IMM32,
                    c"ImmReleaseContext",
                )?),
                get_open_status: mem::transmute::<RawProc, ImmGetOpenStatusFn>(symbol(
                    module,
                    IMM32,
                    c"ImmGetOpenStatus",
                )?),
                set_open_status: mem::transmute::<RawProc, ImmSetOpenStatusFn>(symbol(
                    module,
                    IMM32,
                    c"ImmSetOpenStatus",
                )?),
                get_conversion_status: mem::transmute::<RawProc, ImmGetConversionStatusFn>(
                    symbol(module, IMM32, c"ImmGetConversionStatus")?,
                ),
                set_conversion_status: mem::transmute::<RawProc, ImmSetConversionStatusFn>(
                    symbol(module, IMM32, c"ImmSetConversionStatus")?,
                ),
                get_default_ime_wnd: mem::transmute::<RawProc, ImmGetDefaultImeWndFn>(symbol(
                    module,
                    IMM32,
                    c"ImmGetDefaultIMEWnd",
                )?),
            })
        }
    }

    pub fn get_context(&self, window: WindowHandle) -> ContextHandle {
        let himc = unsafe { (self.get_context)(to_hwnd(window)) };
        ContextHandle::from_raw(himc as isize)
    }

    pub fn release_context(&self, window: WindowHandle, context: ContextHandle) -> bool {
        unsafe { (self.release_context)(to_hwnd(window), to_himc(context)) != 0 }
    }

    pub fn get_open_status(&self, context: ContextHandle) -> bool {
        unsafe { (self.get_open_status)(to_himc(context)) != 0 }
    }

    pub fn set_open_status(&self, context: ContextHandle, open: bool) -> bool {
        unsafe { (self.set_open_status)(to_himc(context), Bool::from(open)) != 0 }
    }

    pub fn get_conversion_status(&self, context: ContextHandle) -> Option<(u32, u32)> {
        let mut conversion = 0u32;
        let mut sentence = 0u32;
        let ok = unsafe {
            (self.get_conversion_status)(to_himc(context), &mut conversion, &mut sentence)
        };
        (ok != 0).then_some((conversion, sentence))
    }

    pub fn set_conversion_status(
        &self,
        context: ContextHandle,
        conversion: u32,
        sentence: u32,
    ) -> bool {
        unsafe { (self.set_conversion_status)(to_himc(context), conversion, sentence) != 0 }
    }

    pub fn get_default_ime_window(&self, window: WindowHandle) -> WindowHandle {
        let hwnd = unsafe { (self.get_default_ime_wnd)(to_hwnd(window)) };
        to_window(hwnd)
    }
}

pub fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw() as *mut c_void)
}

fn to_window(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0 as isize)
}

fn to_himc(context: ContextHandle) -> Himc {
    context.raw() as Himc
}

fn load_library(name: &str) -> Result<HMODULE, ImeError> {
    let module = unsafe { LoadLibraryW(&HSTRING::from(name)) }
        .map_err(|err| ImeError::NativeEntryPointUnavailable(format!("{name}: {err}")))?;
    log::debug!("loaded {name}");
    Ok(module)
}

fn symbol(module: HMODULE, library: &str, name: &CStr) -> Result<RawProc, ImeError> {
    unsafe { GetProcAddress(module, PCSTR::from_raw(name.as_ptr().cast())) }.ok_or_else(|| {
        ImeError::NativeEntryPointUnavailable(format!(
            "{library}!{}",
            name.to_string_lossy()
        ))
    })
}
