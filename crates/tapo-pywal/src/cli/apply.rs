//! Text output for color, brightness and power changes.

use super::{Hsv, Rgb, format_kv, kv_width};

const KEYS: &[&str] = &["Color:", "HSV:", "Brightness:", "Bulb:"];

pub(super) fn format_color(rgb: Rgb, hsv: Hsv, brightness: u8) -> Vec<String> {
    let w = kv_width(KEYS);
    vec![
        format_kv(
            "Color:",
            format_args!("{rgb} (RGB {},{},{})", rgb.r, rgb.g, rgb.b),
            w,
        ),
        format_kv(
            "HSV:",
            format_args!("hue {}, saturation {}%", hsv.hue, hsv.saturation),
            w,
        ),
        format_kv("Brightness:", format_args!("{brightness}%"), w),
        "Color applied!".to_string(),
    ]
}

pub(super) fn format_brightness(brightness: u8) -> Vec<String> {
    vec![format_kv(
        "Brightness:",
        format_args!("{brightness}%"),
        kv_width(KEYS),
    )]
}

pub(super) fn format_power(on: bool) -> Vec<String> {
    vec![format_kv(
        "Bulb:",
        if on { "ON" } else { "OFF" },
        kv_width(KEYS),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_lines() {
        let rgb = Rgb::new(255, 102, 0);
        let lines = format_color(rgb, rgb.to_hsv(), 100);
        assert_eq!(
            lines,
            [
                "Color:       #FF6600 (RGB 255,102,0)",
                "HSV:         hue 24, saturation 100%",
                "Brightness:  100%",
                "Color applied!",
            ]
        );
    }

    #[test]
    fn color_lines_show_override_brightness() {
        let rgb = Rgb::new(0, 0, 255);
        let lines = format_color(rgb, rgb.to_hsv(), 35);
        assert_eq!(lines[2], "Brightness:  35%");
    }

    #[test]
    fn brightness_line() {
        assert_eq!(format_brightness(1), ["Brightness:  1%"]);
    }

    #[test]
    fn power_lines() {
        assert_eq!(format_power(true), ["Bulb:        ON"]);
        assert_eq!(format_power(false), ["Bulb:        OFF"]);
    }
}
