//! tapo-pywal — sync a Tapo smart bulb with your pywal color scheme.

pub mod color;
pub mod config;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod palette;

pub use error::TapoPywalError;
