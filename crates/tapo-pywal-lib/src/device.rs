//! Bulb communication — trait + Tapo L530 backend.
//!
//! The wire protocol lives in the `tapo` crate. [`TapoBulb`] owns a
//! current-thread tokio runtime and blocks on each request, so callers stay
//! synchronous.

use std::fmt;

use serde::Serialize;
use tapo::{ApiClient, ColorLightHandler};

use crate::color::Hsv;
use crate::config::Config;

// ── Error type ──

/// Bulb communication errors.
///
/// String payloads carry the client library's message unchanged.
#[derive(Debug)]
pub enum DeviceError {
    /// Authentication or handshake with the bulb failed.
    ConnectFailed(String),
    /// A command was sent but the bulb (or the network) rejected it.
    RequestFailed(String),
    /// The async runtime driving the client could not be started.
    Runtime(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::ConnectFailed(e) => write!(f, "Failed to connect to bulb: {e}"),
            DeviceError::RequestFailed(e) => write!(f, "Bulb request failed: {e}"),
            DeviceError::Runtime(e) => write!(f, "Async runtime error: {e}"),
        }
    }
}

impl std::error::Error for DeviceError {}

pub type Result<T> = std::result::Result<T, DeviceError>;

// ── Status ──

/// Bulb state as reported by the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulbStatus {
    pub nickname: String,
    pub model: String,
    pub device_on: bool,
    /// Percent, `1..=100`.
    pub brightness: u8,
    /// Absent while the bulb is in color-temperature mode.
    pub hue: Option<u16>,
    pub saturation: Option<u16>,
}

// ── Trait ──

/// The handful of commands this tool sends to a bulb.
pub trait SmartBulb {
    /// Set hue, saturation and brightness in one request.
    ///
    /// Saturation must already be at least [`MIN_SATURATION`](crate::color::MIN_SATURATION)
    /// (see [`Hsv::for_device`]).
    fn set_color_hsv(&self, hsv: Hsv) -> Result<()>;
    fn set_brightness(&self, brightness: u8) -> Result<()>;
    fn on(&self) -> Result<()>;
    fn off(&self) -> Result<()>;
    fn status(&self) -> Result<BulbStatus>;
}

impl<T: SmartBulb + ?Sized> SmartBulb for &T {
    fn set_color_hsv(&self, hsv: Hsv) -> Result<()> {
        (**self).set_color_hsv(hsv)
    }

    fn set_brightness(&self, brightness: u8) -> Result<()> {
        (**self).set_brightness(brightness)
    }

    fn on(&self) -> Result<()> {
        (**self).on()
    }

    fn off(&self) -> Result<()> {
        (**self).off()
    }

    fn status(&self) -> Result<BulbStatus> {
        (**self).status()
    }
}

// ── Tapo backend ──

/// Tapo L530 color bulb, reached over the LAN.
pub struct TapoBulb {
    runtime: tokio::runtime::Runtime,
    handler: ColorLightHandler,
}

impl TapoBulb {
    /// Authenticate with the config's credentials and open the bulb.
    pub fn connect(config: &Config) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DeviceError::Runtime(e.to_string()))?;

        let ip = config.device_ip.trim().to_string();
        log::info!("connecting to Tapo L530 at {ip}");
        let client = ApiClient::new(config.email.clone(), config.password.clone());
        let handler = runtime
            .block_on(client.l530(ip))
            .map_err(|e| DeviceError::ConnectFailed(e.to_string()))?;

        Ok(TapoBulb { runtime, handler })
    }

    fn request<T>(
        &self,
        what: &str,
        fut: impl std::future::Future<Output = std::result::Result<T, tapo::Error>>,
    ) -> Result<T> {
        log::debug!("sending {what}");
        self.runtime
            .block_on(fut)
            .map_err(|e| DeviceError::RequestFailed(format!("{what}: {e}")))
    }
}

impl SmartBulb for TapoBulb {
    fn set_color_hsv(&self, hsv: Hsv) -> Result<()> {
        self.request(
            "set_device_info(hue, saturation, brightness)",
            self.handler
                .set()
                .hue_saturation(hsv.hue, hsv.saturation)
                .brightness(hsv.value)
                .send(&self.handler),
        )
    }

    fn set_brightness(&self, brightness: u8) -> Result<()> {
        self.request("set_brightness", self.handler.set_brightness(brightness))
    }

    fn on(&self) -> Result<()> {
        self.request("on", self.handler.on())
    }

    fn off(&self) -> Result<()> {
        self.request("off", self.handler.off())
    }

    fn status(&self) -> Result<BulbStatus> {
        let info = self.request("get_device_info", self.handler.get_device_info())?;
        Ok(BulbStatus {
            nickname: info.nickname,
            model: info.model,
            device_on: info.device_on,
            brightness: info.brightness,
            hue: info.hue,
            saturation: info.saturation,
        })
    }
}

// ── Mock bulb for testing ──

/// In-memory mock bulb for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// One recorded call on [`MockBulb`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum BulbCall {
        SetColorHsv(Hsv),
        SetBrightness(u8),
        On,
        Off,
        Status,
    }

    /// Records every call and keeps a [`BulbStatus`] that the setters update.
    pub struct MockBulb {
        pub calls: RefCell<Vec<BulbCall>>,
        pub state: RefCell<BulbStatus>,
        /// If true, every call returns `RequestFailed`.
        pub fail_requests: Cell<bool>,
    }

    impl Default for MockBulb {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockBulb {
        pub fn new() -> Self {
            MockBulb {
                calls: RefCell::new(Vec::new()),
                state: RefCell::new(BulbStatus {
                    nickname: "Desk Lamp".into(),
                    model: "L530".into(),
                    device_on: false,
                    brightness: 100,
                    hue: Some(0),
                    saturation: Some(0),
                }),
                fail_requests: Cell::new(false),
            }
        }

        /// Snapshot of recorded calls.
        pub fn recorded(&self) -> Vec<BulbCall> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: BulbCall) -> Result<()> {
            self.calls.borrow_mut().push(call);
            if self.fail_requests.get() {
                return Err(DeviceError::RequestFailed(
                    "mock: request failure injected".into(),
                ));
            }
            Ok(())
        }
    }

    impl SmartBulb for MockBulb {
        fn set_color_hsv(&self, hsv: Hsv) -> Result<()> {
            self.record(BulbCall::SetColorHsv(hsv))?;
            let mut state = self.state.borrow_mut();
            state.device_on = true;
            state.hue = Some(hsv.hue);
            state.saturation = Some(u16::from(hsv.saturation));
            state.brightness = hsv.value;
            Ok(())
        }

        fn set_brightness(&self, brightness: u8) -> Result<()> {
            self.record(BulbCall::SetBrightness(brightness))?;
            let mut state = self.state.borrow_mut();
            state.device_on = true;
            state.brightness = brightness;
            Ok(())
        }

        fn on(&self) -> Result<()> {
            self.record(BulbCall::On)?;
            self.state.borrow_mut().device_on = true;
            Ok(())
        }

        fn off(&self) -> Result<()> {
            self.record(BulbCall::Off)?;
            self.state.borrow_mut().device_on = false;
            Ok(())
        }

        fn status(&self) -> Result<BulbStatus> {
            self.record(BulbCall::Status)?;
            Ok(self.state.borrow().clone())
        }
    }
}
