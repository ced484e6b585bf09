use crate::bridge::ImeBridge;
use crate::error::ImeError;
use crate::handle::WindowHandle;
use crate::native::ImeApi;
use crate::resolver::WindowTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImeStatus {
    On,
    Off,
    Unavailable,
}

impl ImeStatus {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ImeStatus::On => Some(true),
            ImeStatus::Off => Some(false),
            ImeStatus::Unavailable => None,
        }
    }
}

impl From<Result<bool, ImeError>> for ImeStatus {
    fn from(result: Result<bool, ImeError>) -> Self {
        match result {
            Ok(true) => ImeStatus::On,
            Ok(false) => ImeStatus::Off,
            Err(_) => ImeStatus::Unavailable,
        }
    }
}

pub struct ImeControl<A> {
    api: Option<A>,
    init_error: Option<ImeError>,
    target: WindowTarget,
}

impl<A: ImeApi> ImeControl<A> {
    pub fn new(api: A, target: WindowTarget) -> Self {
        Self {
            api: Some(api),
            init_error: None,
            target,
        }
    }

    pub fn init(loaded: Result<A, ImeError>, target: WindowTarget) -> Self {
        match loaded {
            Ok(api) => Self::new(api, target),
            Err(err) => {
                log::error!("{err}");
                Self {
                    api: None,
                    init_error: Some(err),
                    target,
                }
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.api.is_some()
    }

    pub fn init_error(&self) -> Option<&ImeError> {
        self.init_error.as_ref()
    }

    pub fn api(&self) -> Option<&A> {
        self.api.as_ref()
    }

    pub fn get_status(&self) -> Result<bool, ImeError> {
        self.with_window(|bridge, window| bridge.get_status(window))
    }

    pub fn status(&self) -> ImeStatus {
        let result = self.get_status();
        if let Err(err) = &result {
            log::debug!("status unavailable: {err}");
        }
        result.into()
    }

    pub fn set_status(&self, open: bool) -> Result<(), ImeError> {
        self.with_window(|bridge, window| bridge.set_status(window, open))
    }

    pub fn get_mode(&self) -> Result<u32, ImeError> {
        self.with_window(|bridge, window| bridge.get_mode(window))
    }

    pub fn set_mode(&self, mode: u32) -> Result<(), ImeError> {
        self.with_window(|bridge, window| bridge.set_mode(window, mode))
    }

    fn with_window<T>(
        &self,
        op: impl FnOnce(&ImeBridge<'_, A>, WindowHandle) -> Result<T, ImeError>,
    ) -> Result<T, ImeError> {
        let api = self.api.as_ref().ok_or(ImeError::NotInitialized)?;
        let window = self.target.resolve(api)?;
        op(&ImeBridge::new(api), window)
    }
}
