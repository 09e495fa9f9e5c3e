//! Text output for `--status`.

use super::{BulbStatus, format_kv, kv_width};

/// Render the status block, one line per field.
pub(super) fn format_status(status: &BulbStatus) -> Vec<String> {
    let w = kv_width(&[
        "Device:",
        "Model:",
        "Power:",
        "Brightness:",
        "Hue:",
        "Saturation:",
    ]);
    let mut lines = vec![
        format_kv("Device:", &status.nickname, w),
        format_kv("Model:", &status.model, w),
        format_kv("Power:", if status.device_on { "ON" } else { "OFF" }, w),
        format_kv("Brightness:", format_args!("{}%", status.brightness), w),
    ];
    match (status.hue, status.saturation) {
        (Some(hue), Some(sat)) => {
            lines.push(format_kv("Hue:", hue, w));
            lines.push(format_kv("Saturation:", format_args!("{sat}%"), w));
        }
        _ => lines.push(format_kv("Color:", "white (color temperature mode)", w)),
    }
    lines
}
