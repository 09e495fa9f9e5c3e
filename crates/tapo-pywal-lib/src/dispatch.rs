//! Command dispatch — one action per invocation.
//!
//! Three stages, so that every local failure surfaces before the bulb is
//! contacted:
//!
//! 1. [`Action::from_flags`] validates the flag combination and numeric ranges.
//! 2. [`Action::resolve`] reads the palette and converts colors, producing a
//!    [`Command`] that needs nothing but the network.
//! 3. [`Command::send`] talks to a [`SmartBulb`] and reports an [`Outcome`].
//!
//! [`run`] strings the stages together with config loading and connection.

use std::path::{Path, PathBuf};

use crate::color::{Hsv, Rgb};
use crate::config::Config;
use crate::device::{BulbStatus, SmartBulb};
use crate::error::{Result, TapoPywalError};
use crate::palette::{self, ACCENT_INDEX, Palette};

/// Lowest brightness the bulb accepts while on.
pub const MIN_BRIGHTNESS: u8 = 1;
/// Highest brightness percentage.
pub const MAX_BRIGHTNESS: u8 = 100;

/// Raw flag values, before any validation.
///
/// Numbers are kept wide so out-of-range input reaches validation instead of
/// failing inside the argument parser.
#[derive(Debug, Clone, Default)]
pub struct ActionFlags {
    pub pywal: bool,
    pub index: Option<i64>,
    pub color: Option<String>,
    pub brightness: Option<i64>,
    pub on: bool,
    pub off: bool,
    pub status: bool,
}

/// Where a SetColor action takes its color from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSource {
    /// Entry of the pywal palette, `0..16`.
    Palette { index: usize },
    /// User-supplied `#RRGGBB` or `R,G,B`.
    Explicit(String),
}

/// The single thing this invocation will do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetColor {
        source: ColorSource,
        brightness: Option<u8>,
    },
    SetBrightness(u8),
    PowerOn,
    PowerOff,
    Status,
}

/// An [`Action`] with every local input resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetColor {
        rgb: Rgb,
        hsv: Hsv,
        /// Sent as a second request after the color.
        brightness: Option<u8>,
    },
    SetBrightness(u8),
    PowerOn,
    PowerOff,
    Status,
}

/// What the bulb ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    ColorApplied {
        rgb: Rgb,
        /// As sent to the bulb.
        hsv: Hsv,
        /// Brightness the bulb was left at.
        brightness: u8,
    },
    BrightnessSet(u8),
    PoweredOn,
    PoweredOff,
    Status(BulbStatus),
}

/// Check a brightness flag against `1..=100`.
pub fn validate_brightness(value: i64) -> Result<u8> {
    match u8::try_from(value) {
        Ok(b) if (MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&b) => Ok(b),
        _ => Err(TapoPywalError::Validation(format!(
            "brightness must be between {MIN_BRIGHTNESS} and {MAX_BRIGHTNESS}, got {value}"
        ))),
    }
}

impl Action {
    /// Pick exactly one action from the flags.
    ///
    /// `--brightness` on its own selects [`Action::SetBrightness`]; together
    /// with `--pywal` or `--color` it overrides the color's brightness.
    pub fn from_flags(flags: &ActionFlags) -> Result<Self> {
        let mut selected: Vec<&str> = Vec::new();
        if flags.pywal {
            selected.push("--pywal");
        }
        if flags.color.is_some() {
            selected.push("--color");
        }
        if flags.on {
            selected.push("--on");
        }
        if flags.off {
            selected.push("--off");
        }
        if flags.status {
            selected.push("--status");
        }

        if selected.len() > 1 {
            return Err(TapoPywalError::Usage(format!(
                "{} cannot be used together (choose one)",
                selected.join(", ")
            )));
        }
        if flags.index.is_some() && !flags.pywal {
            return Err(TapoPywalError::Usage(
                "--index can only be used with --pywal".into(),
            ));
        }

        let brightness = flags.brightness.map(validate_brightness).transpose()?;

        if flags.pywal {
            let index = match flags.index {
                Some(i) => palette::check_index(i)?,
                None => ACCENT_INDEX,
            };
            return Ok(Action::SetColor {
                source: ColorSource::Palette { index },
                brightness,
            });
        }
        if let Some(ref color) = flags.color {
            return Ok(Action::SetColor {
                source: ColorSource::Explicit(color.clone()),
                brightness,
            });
        }

        let power_or_status = if flags.on {
            Some(("--on", Action::PowerOn))
        } else if flags.off {
            Some(("--off", Action::PowerOff))
        } else if flags.status {
            Some(("--status", Action::Status))
        } else {
            None
        };

        match (power_or_status, brightness) {
            (Some((flag, _)), Some(_)) => Err(TapoPywalError::Usage(format!(
                "--brightness cannot be combined with {flag}"
            ))),
            (Some((_, action)), None) => Ok(action),
            (None, Some(b)) => Ok(Action::SetBrightness(b)),
            (None, None) => Err(TapoPywalError::Usage(
                "no action given (use one of --pywal, --color, --on, --off, --status, or --brightness)"
                    .into(),
            )),
        }
    }

    /// Read the palette (if needed) and convert colors.
    pub fn resolve(&self, palette_path: Option<&Path>) -> Result<Command> {
        Ok(match self {
            Action::SetColor { source, brightness } => {
                let rgb = match source {
                    ColorSource::Palette { index } => {
                        let path = palette_path.ok_or_else(|| {
                            TapoPywalError::Palette(
                                "cannot locate the pywal cache (no home directory)".into(),
                            )
                        })?;
                        let palette = Palette::load_from(path)?;
                        let entry = palette.get(*index)?;
                        let rgb = Rgb::parse(entry)?;
                        log::info!("using pywal color {index}: {rgb}");
                        rgb
                    }
                    ColorSource::Explicit(s) => Rgb::parse(s)?,
                };
                let hsv = rgb.to_hsv();
                log::debug!("{rgb} -> {hsv}");
                Command::SetColor {
                    rgb,
                    hsv,
                    brightness: *brightness,
                }
            }
            Action::SetBrightness(b) => Command::SetBrightness(*b),
            Action::PowerOn => Command::PowerOn,
            Action::PowerOff => Command::PowerOff,
            Action::Status => Command::Status,
        })
    }
}

impl Command {
    /// Send the command: one request, or two for a color with a brightness override.
    pub fn send(&self, bulb: &impl SmartBulb) -> Result<Outcome> {
        Ok(match self {
            Command::SetColor {
                rgb,
                hsv,
                brightness,
            } => {
                let hsv = hsv.for_device();
                bulb.set_color_hsv(hsv)?;
                if let Some(b) = brightness {
                    bulb.set_brightness(*b)?;
                }
                Outcome::ColorApplied {
                    rgb: *rgb,
                    hsv,
                    brightness: brightness.unwrap_or(hsv.value),
                }
            }
            Command::SetBrightness(b) => {
                bulb.set_brightness(*b)?;
                Outcome::BrightnessSet(*b)
            }
            Command::PowerOn => {
                bulb.on()?;
                Outcome::PoweredOn
            }
            Command::PowerOff => {
                bulb.off()?;
                Outcome::PoweredOff
            }
            Command::Status => Outcome::Status(bulb.status()?),
        })
    }
}

/// File locations for one invocation.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config: PathBuf,
    /// `None` when the home directory is unknown and no override was given.
    pub palette: Option<PathBuf>,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            config: Config::path(),
            palette: Palette::path(),
        }
    }
}

/// Validate, load, resolve, connect, send.
///
/// `connect` is only called once everything local has succeeded.
pub fn run<B, F>(flags: &ActionFlags, paths: &Paths, connect: F) -> Result<Outcome>
where
    B: SmartBulb,
    F: FnOnce(&Config) -> Result<B>,
{
    let action = Action::from_flags(flags)?;
    log::debug!("action: {action:?}");
    let config = Config::load_from(&paths.config)?;
    let command = action.resolve(paths.palette.as_deref())?;
    let bulb = connect(&config)?;
    command.send(&bulb)
}
