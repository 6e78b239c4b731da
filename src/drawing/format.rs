//! Line-level grammar of the drawing file.
//!
//! ```text
//! DRAWING_INFO_START
//! name = <text>
//! width = <float>
//! height = <float>
//! pointsCount = <int>
//! DRAWING_INFO_END
//! SETTINGS_START
//! followAngularVelocityScale = <float>
//! followVelocity = <float>
//! curveTightness = <float>
//! SETTINGS_END
//! DRAWING_START
//! <x> <y> <colorName> <true|false>
//! ```

use crate::color::catalog::PenColor;
use crate::drawing::model::{DrawingMetadata, DrawingSettings, Waypoint};
use crate::foundation::error::DecodeWarning;

pub(crate) const INFO_START_TAG: &str = "DRAWING_INFO_START";
pub(crate) const INFO_END_TAG: &str = "DRAWING_INFO_END";
pub(crate) const SETTINGS_START_TAG: &str = "SETTINGS_START";
pub(crate) const SETTINGS_END_TAG: &str = "SETTINGS_END";
pub(crate) const DRAWING_START_TAG: &str = "DRAWING_START";

/// Value part of a `key = value` line: everything after `=`, minus one leading space.
pub(crate) fn value_of(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once('=')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Apply one info-section line. Keys match by literal prefix; unknown keys are ignored.
pub(crate) fn apply_info_line(line: &str, info: &mut DrawingMetadata) {
    let Some(value) = value_of(line) else {
        return;
    };

    if line.starts_with("name") {
        info.set_name(value);
    } else if line.starts_with("width") {
        info.width = lenient_f64(value).0;
    } else if line.starts_with("height") {
        info.height = lenient_f64(value).0;
    } else if line.starts_with("pointsCount") {
        info.point_count = usize::try_from(lenient_i64(value)).unwrap_or(0);
    }
}

/// Apply one settings-section line. Keys match by literal prefix; unknown keys are ignored.
pub(crate) fn apply_settings_line(line: &str, settings: &mut DrawingSettings) {
    let Some(value) = value_of(line) else {
        return;
    };

    if line.starts_with("followAngularVelocityScale") {
        settings.follow_angular_velocity_scale = lenient_f64(value).0;
    } else if line.starts_with("followVelocity") {
        settings.follow_velocity = lenient_f64(value).0;
    } else if line.starts_with("curveTightness") {
        settings.curve_tightness = lenient_f64(value).0;
    }
}

/// Decode a point line on top of `prior`.
///
/// Tokens are separated by spaces (runs collapse). Present tokens overwrite fields in order;
/// missing ones keep `prior`'s values. Tokens past the fourth are ignored.
pub(crate) fn decode_point(
    line: &str,
    line_no: usize,
    prior: &Waypoint,
    warnings: &mut Vec<DecodeWarning>,
) -> Waypoint {
    let tokens: Vec<&str> = line.split(' ').filter(|t| !t.is_empty()).collect();
    let mut point = *prior;

    if tokens.len() < 4 {
        warnings.push(DecodeWarning::MissingFields {
            line: line_no,
            found: tokens.len(),
        });
    }

    if let Some(t) = tokens.first() {
        point.position.x = coordinate(t, line_no, warnings);
    }
    if let Some(t) = tokens.get(1) {
        point.position.y = coordinate(t, line_no, warnings);
    }
    if let Some(t) = tokens.get(2) {
        point.color = PenColor::from_name(t);
    }
    if let Some(t) = tokens.get(3) {
        point.is_boundary = *t == "true";
    }

    point
}

fn coordinate(token: &str, line_no: usize, warnings: &mut Vec<DecodeWarning>) -> f64 {
    let (value, parsed) = lenient_f64(token);
    if !parsed {
        warnings.push(DecodeWarning::BadNumber {
            line: line_no,
            text: token.to_string(),
            value,
        });
    }
    value
}

/// Parse the longest numeric prefix of `text`, like C's `atof`.
///
/// Returns `(value, true)` when a numeric prefix exists and `(0.0, false)` otherwise.
pub(crate) fn lenient_f64(text: &str) -> (f64, bool) {
    let s = text.trim_start();
    let end = numeric_prefix_len(s);
    match s[..end].parse::<f64>() {
        Ok(v) => (v, true),
        Err(_) => (0.0, false),
    }
}

/// Parse the longest integer prefix of `text`, like C's `atoi`. No digits gives 0.
pub(crate) fn lenient_i64(text: &str) -> i64 {
    let s = text.trim_start();
    let b = s.as_bytes();
    let mut end = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    while b.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    s[..end].parse().unwrap_or(0)
}

fn numeric_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let mut i = usize::from(matches!(b.first(), Some(b'+' | b'-')));

    let int_start = i;
    while b.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;

    if b.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while b.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while b.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[cfg(test)]
#[path = "../../tests/unit/drawing/format.rs"]
mod tests;
