//! CLI plumbing — run one action, report the outcome as text or JSON.

mod apply;
mod status;

use serde::Serialize;

pub(super) use tapo_pywal_lib::color::{Hsv, Rgb};
pub(super) use tapo_pywal_lib::device::{BulbStatus, TapoBulb};
pub(super) use tapo_pywal_lib::dispatch::{self, ActionFlags, Outcome, Paths};
pub(super) use tapo_pywal_lib::error::{Result, TapoPywalError};

const PADDING: usize = 2;

/// Compute alignment width for key-value output.
/// Ensures at least PADDING spaces after the longest key.
pub(super) fn kv_width(keys: &[&str]) -> usize {
    keys.iter().map(|k| k.len()).max().map_or(0, |m| m + PADDING)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn to_json(value: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| TapoPywalError::Output(format!("JSON serialization failed: {e}")))
}

/// Everything one invocation needs, already separated from clap.
pub struct Options {
    pub flags: ActionFlags,
    pub paths: Paths,
    pub json: bool,
}

// ── JSON output ──

/// Machine-readable outcome, tagged by action.
#[derive(Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(super) enum OutcomeJson {
    SetColor {
        color: String,
        rgb: [u8; 3],
        hue: u16,
        saturation: u8,
        brightness: u8,
    },
    SetBrightness {
        brightness: u8,
    },
    PowerOn,
    PowerOff,
    Status(BulbStatus),
}

impl From<&Outcome> for OutcomeJson {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::ColorApplied {
                rgb,
                hsv,
                brightness,
            } => OutcomeJson::SetColor {
                color: rgb.to_string(),
                rgb: [rgb.r, rgb.g, rgb.b],
                hue: hsv.hue,
                saturation: hsv.saturation,
                brightness: *brightness,
            },
            Outcome::BrightnessSet(b) => OutcomeJson::SetBrightness { brightness: *b },
            Outcome::PoweredOn => OutcomeJson::PowerOn,
            Outcome::PoweredOff => OutcomeJson::PowerOff,
            Outcome::Status(s) => OutcomeJson::Status(s.clone()),
        }
    }
}

/// Render an outcome in the requested format, one entry per output line.
pub(super) fn render(outcome: &Outcome, json: bool) -> Result<Vec<String>> {
    if json {
        return Ok(vec![to_json(&OutcomeJson::from(outcome))?]);
    }
    Ok(match outcome {
        Outcome::ColorApplied {
            rgb,
            hsv,
            brightness,
        } => apply::format_color(*rgb, *hsv, *brightness),
        Outcome::BrightnessSet(b) => apply::format_brightness(*b),
        Outcome::PoweredOn => apply::format_power(true),
        Outcome::PoweredOff => apply::format_power(false),
        Outcome::Status(s) => status::format_status(s),
    })
}

pub(super) fn report(outcome: &Outcome, json: bool) -> Result<()> {
    for line in render(outcome, json)? {
        println!("{line}");
    }
    Ok(())
}

pub fn run(opts: Options) -> Result<()> {
    let json = opts.json;
    let outcome = dispatch::run(&opts.flags, &opts.paths, |config| {
        if !json {
            println!("Connecting to Tapo L530 at {}...", config.device_ip.trim());
        }
        TapoBulb::connect(config).map_err(Into::into)
    })?;
    log::debug!("outcome: {outcome:?}");
    report(&outcome, json)
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn kv_width_pads_longest_key() {
        let w = kv_width(&["Power:", "Brightness:"]);
        // "Brightness:" = 11 + PADDING = 13
        assert_eq!(w, 13);
    }

    #[test]
    fn kv_width_empty() {
        assert_eq!(kv_width(&[]), 0);
    }

    #[test]
    fn format_kv_basic() {
        let result = format_kv("Key:", "value", 10);
        assert_eq!(result, "Key:      value");
    }

    #[test]
    fn format_kv_exceeds_width() {
        // Key longer than width: no padding added
        assert_eq!(format_kv("ExactWidth:", "val", 10), "ExactWidth:val");
    }
}

#[cfg(test)]
mod json_output_tests {
    use super::*;

    fn sample_status() -> BulbStatus {
        BulbStatus {
            nickname: "Desk Lamp".into(),
            model: "L530".into(),
            device_on: true,
            brightness: 64,
            hue: Some(210),
            saturation: Some(80),
        }
    }

    #[test]
    fn color_outcome_json() {
        let rgb = Rgb::new(255, 102, 0);
        let outcome = Outcome::ColorApplied {
            rgb,
            hsv: rgb.to_hsv(),
            brightness: 40,
        };
        let json = serde_json::to_value(OutcomeJson::from(&outcome)).unwrap();
        assert_eq!(json["action"], "set_color");
        assert_eq!(json["color"], "#FF6600");
        assert_eq!(json["rgb"], serde_json::json!([255, 102, 0]));
        assert_eq!(json["hue"], 24);
        assert_eq!(json["saturation"], 100);
        assert_eq!(json["brightness"], 40);
    }

    #[test]
    fn power_outcome_json_is_just_the_tag() {
        let json = serde_json::to_value(OutcomeJson::from(&Outcome::PoweredOff)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(json["action"], "power_off");
    }

    #[test]
    fn brightness_outcome_json() {
        let json = serde_json::to_value(OutcomeJson::from(&Outcome::BrightnessSet(55))).unwrap();
        assert_eq!(json["action"], "set_brightness");
        assert_eq!(json["brightness"], 55);
    }

    #[test]
    fn status_outcome_json_is_flat() {
        let outcome = Outcome::Status(sample_status());
        let json = serde_json::to_value(OutcomeJson::from(&outcome)).unwrap();
        assert_eq!(json["action"], "status");
        assert_eq!(json["nickname"], "Desk Lamp");
        assert_eq!(json["device_on"], true);
        assert_eq!(json["brightness"], 64);
        assert_eq!(json["hue"], 210);
    }

    #[test]
    fn status_json_in_white_mode_has_null_hue() {
        let mut status = sample_status();
        status.hue = None;
        status.saturation = None;
        let json = serde_json::to_value(OutcomeJson::from(&Outcome::Status(status))).unwrap();
        assert!(json["hue"].is_null());
        assert!(json["saturation"].is_null());
    }
}
