//! Unified error type for the tapo-pywal-lib crate.
//!
//! [`TapoPywalError`] covers every way a single invocation can fail: bad
//! config, missing palette, malformed color, out-of-range values, conflicting
//! flags, device communication, and rendering the result. [`DeviceError`]
//! converts with `?`.

use std::fmt;

use crate::device::DeviceError;

/// Unified error type for tapo-pywal-lib operations.
#[derive(Debug)]
pub enum TapoPywalError {
    /// Config file missing, unreadable, or incomplete.
    Config(String),
    /// Palette file missing or index out of range.
    Palette(String),
    /// Color string could not be parsed.
    ColorFormat(String),
    /// Brightness (or another numeric flag) out of range.
    Validation(String),
    /// Conflicting or missing action flags.
    Usage(String),
    /// Result could not be rendered (e.g. JSON serialization failed).
    Output(String),
    /// Authentication or network failure from the bulb client.
    Device(DeviceError),
}

impl TapoPywalError {
    /// Process exit status for this error. Usage errors follow the clap
    /// convention of 2, everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            TapoPywalError::Usage(_) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for TapoPywalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TapoPywalError::Config(e) => write!(f, "Config error: {e}"),
            TapoPywalError::Palette(e) => write!(f, "Palette error: {e}"),
            TapoPywalError::ColorFormat(e) => write!(f, "Color error: {e}"),
            TapoPywalError::Validation(e) => write!(f, "Invalid value: {e}"),
            TapoPywalError::Usage(e) => write!(f, "Usage error: {e}"),
            TapoPywalError::Output(e) => write!(f, "Output error: {e}"),
            TapoPywalError::Device(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TapoPywalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TapoPywalError::Device(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DeviceError> for TapoPywalError {
    fn from(e: DeviceError) -> Self {
        TapoPywalError::Device(e)
    }
}

/// Crate-level Result alias using [`TapoPywalError`].
pub type Result<T> = std::result::Result<T, TapoPywalError>;
