//! Color parsing and RGB → HSV conversion for the bulb's native color model.
//!
//! The bulb takes hue in degrees `[0, 360)`, saturation in percent `[0, 100]`
//! and brightness in percent `[1, 100]`. It refuses a zero brightness while
//! on, so [`Hsv::value`] never drops below 1. The client also refuses a zero
//! saturation; [`Hsv::for_device`] gives the values that actually go out.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TapoPywalError};

/// Lowest saturation the bulb client accepts.
pub const MIN_SATURATION: u8 = 1;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue/saturation/value as the bulb expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    /// Degrees, `0..360`.
    pub hue: u16,
    /// Percent, `0..=100`.
    pub saturation: u8,
    /// Percent, `1..=100`.
    pub value: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse a color string.
    ///
    /// Accepts:
    /// - Hex: `"#FF6600"`, `"FF6600"`, `"#ff6600"`
    /// - Decimal: `"255,102,0"`, `"255, 102, 0"`
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains(',') {
            parse_decimal(s)
        } else {
            parse_hex(s)
        }
    }

    /// Standard RGB → HSV, rounded to whole degrees and percent.
    pub fn to_hsv(self) -> Hsv {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta)
        } else if max == g {
            60.0 * ((b - r) / delta) + 120.0
        } else {
            60.0 * ((r - g) / delta) + 240.0
        };
        // Round first so 359.6 wraps to 0 rather than becoming 360.
        let hue = (hue.rem_euclid(360.0).round() as u16) % 360;

        let saturation = if max == 0.0 {
            0
        } else {
            percent(delta / max).min(100)
        };
        let value = percent(max).clamp(1, 100);

        Hsv {
            hue,
            saturation,
            value,
        }
    }
}

fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 255.0) as u8
}

fn parse_hex(s: &str) -> Result<Rgb> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        return Err(TapoPywalError::ColorFormat(format!(
            "Invalid color: {s} (use #RRGGBB or R,G,B)"
        )));
    }
    if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(TapoPywalError::ColorFormat(format!("Invalid hex color: {s}")));
    }
    let val = u32::from_str_radix(hex, 16)
        .map_err(|_| TapoPywalError::ColorFormat(format!("Invalid hex color: {s}")))?;
    Ok(Rgb::new((val >> 16) as u8, (val >> 8) as u8, val as u8))
}

fn parse_decimal(s: &str) -> Result<Rgb> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(TapoPywalError::ColorFormat(format!(
            "Invalid color: {s} (expected three components, R,G,B)"
        )));
    };
    let component = |name: &str, part: &str| -> Result<u8> {
        part.parse::<u8>().map_err(|_| {
            TapoPywalError::ColorFormat(format!(
                "Invalid {name} component \"{part}\" in {s} (must be 0-255)"
            ))
        })
    };
    Ok(Rgb::new(
        component("red", *r)?,
        component("green", *g)?,
        component("blue", *b)?,
    ))
}

impl FromStr for Rgb {
    type Err = TapoPywalError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::parse(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Hsv {
    /// The values sent on the wire: greys go out with [`MIN_SATURATION`].
    pub fn for_device(self) -> Hsv {
        Hsv {
            saturation: self.saturation.max(MIN_SATURATION),
            ..self
        }
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hue {}°, saturation {}%, value {}%",
            self.hue, self.saturation, self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsv(hue: u16, saturation: u8, value: u8) -> Hsv {
        Hsv {
            hue,
            saturation,
            value,
        }
    }

    // ── parse ──

    #[test]
    fn parse_hex_with_hash() {
        assert_eq!(Rgb::parse("#FF6600").unwrap(), Rgb::new(255, 102, 0));
    }

    #[test]
    fn parse_hex_without_hash() {
        assert_eq!(Rgb::parse("FF6600").unwrap(), Rgb::new(255, 102, 0));
    }

    #[test]
    fn parse_hex_lowercase() {
        assert_eq!(Rgb::parse("#abcdef").unwrap(), Rgb::new(0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn parse_decimal_triplet() {
        assert_eq!(Rgb::parse("255,102,0").unwrap(), Rgb::new(255, 102, 0));
        assert_eq!(Rgb::parse(" 255, 102 , 0 ").unwrap(), Rgb::new(255, 102, 0));
    }

    #[test]
    fn all_input_forms_agree() {
        let a = Rgb::parse("#FF6600").unwrap();
        let b = Rgb::parse("FF6600").unwrap();
        let c = Rgb::parse("255,102,0").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn parse_invalid_hex_chars() {
        let err = Rgb::parse("#ZZZZZZ").unwrap_err();
        assert!(matches!(err, TapoPywalError::ColorFormat(_)));
    }

    #[test]
    fn parse_rejects_signed_hex() {
        // from_str_radix alone would accept a leading '+'
        assert!(Rgb::parse("+12345").is_err());
    }

    #[test]
    fn parse_invalid_length() {
        assert!(Rgb::parse("#FFF").is_err());
        assert!(Rgb::parse("#FF000000").is_err());
        assert!(Rgb::parse("").is_err());
    }

    #[test]
    fn parse_decimal_out_of_range() {
        let err = Rgb::parse("300,0,0").unwrap_err();
        assert!(matches!(err, TapoPywalError::ColorFormat(_)));
        assert!(err.to_string().contains("red"));
    }

    #[test]
    fn parse_decimal_negative_or_non_numeric() {
        assert!(Rgb::parse("-1,0,0").is_err());
        assert!(Rgb::parse("10,abc,0").is_err());
    }

    #[test]
    fn parse_decimal_wrong_arity() {
        assert!(Rgb::parse("1,2").is_err());
        assert!(Rgb::parse("1,2,3,4").is_err());
    }

    #[test]
    fn from_str_matches_parse() {
        let rgb: Rgb = "#102030".parse().unwrap();
        assert_eq!(rgb, Rgb::new(0x10, 0x20, 0x30));
    }

    #[test]
    fn display_is_uppercase_hex() {
        assert_eq!(Rgb::new(0xAB, 0x12, 0xCD).to_string(), "#AB12CD");
        assert_eq!(Rgb::new(0, 0, 0).to_string(), "#000000");
    }

    // ── to_hsv ──

    #[test]
    fn pure_red() {
        assert_eq!(Rgb::new(255, 0, 0).to_hsv(), hsv(0, 100, 100));
    }

    #[test]
    fn pure_green_and_blue() {
        assert_eq!(Rgb::new(0, 255, 0).to_hsv(), hsv(120, 100, 100));
        assert_eq!(Rgb::new(0, 0, 255).to_hsv(), hsv(240, 100, 100));
    }

    #[test]
    fn cyan_takes_green_sector() {
        assert_eq!(Rgb::new(0, 255, 255).to_hsv(), hsv(180, 100, 100));
    }

    #[test]
    fn orange() {
        assert_eq!(Rgb::new(255, 102, 0).to_hsv(), hsv(24, 100, 100));
    }

    #[test]
    fn white_has_no_saturation() {
        assert_eq!(Rgb::new(255, 255, 255).to_hsv(), hsv(0, 0, 100));
    }

    #[test]
    fn black_value_promoted_to_one() {
        assert_eq!(Rgb::new(0, 0, 0).to_hsv(), hsv(0, 0, 1));
    }

    #[test]
    fn dim_gray_rounds_value() {
        // 128/255 = 50.196%
        assert_eq!(Rgb::new(128, 128, 128).to_hsv(), hsv(0, 0, 50));
    }

    #[test]
    fn very_dark_color_keeps_minimum_value() {
        // 1/255 = 0.39% rounds to 0, promoted to 1
        assert_eq!(Rgb::new(1, 0, 0).to_hsv().value, 1);
    }

    #[test]
    fn hue_wraps_below_360() {
        // -0.235° → 359.76° rounds to 360 → 0
        assert_eq!(Rgb::new(255, 0, 1).to_hsv().hue, 0);
        // -0.706° → 359.29° rounds to 359
        assert_eq!(Rgb::new(255, 0, 3).to_hsv().hue, 359);
    }

    #[test]
    fn magenta_in_red_sector() {
        assert_eq!(Rgb::new(255, 0, 255).to_hsv().hue, 300);
    }

    #[test]
    fn outputs_stay_in_range() {
        for r in (0..=255u8).step_by(17) {
            for g in (0..=255u8).step_by(17) {
                for b in (0..=255u8).step_by(17) {
                    let out = Rgb::new(r, g, b).to_hsv();
                    assert!(out.hue < 360, "hue {} for {r},{g},{b}", out.hue);
                    assert!(out.saturation <= 100);
                    assert!((1..=100).contains(&out.value));
                }
            }
        }
    }

    #[test]
    fn conversion_is_deterministic() {
        let c = Rgb::new(37, 199, 88);
        assert_eq!(c.to_hsv(), c.to_hsv());
    }

    // ── for_device ──

    #[test]
    fn for_device_raises_zero_saturation() {
        assert_eq!(hsv(0, 0, 100).for_device(), hsv(0, MIN_SATURATION, 100));
        assert_eq!(Rgb::new(0, 0, 0).to_hsv().for_device(), hsv(0, 1, 1));
    }

    #[test]
    fn for_device_keeps_nonzero_saturation() {
        assert_eq!(hsv(210, 1, 40).for_device(), hsv(210, 1, 40));
        assert_eq!(hsv(24, 100, 100).for_device(), hsv(24, 100, 100));
    }
}
