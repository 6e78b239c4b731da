use crate::color::catalog::PenColor;
use crate::foundation::core::Point;

/// Longest drawing name kept from the header, in characters.
pub const MAX_NAME_LEN: usize = 19;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Header block between `DRAWING_INFO_START` and `DRAWING_INFO_END`.
pub struct DrawingMetadata {
    /// Display name, at most [`MAX_NAME_LEN`] characters.
    pub name: String,
    /// Physical width of the drawing.
    pub width: f64,
    /// Physical height of the drawing.
    pub height: f64,
    /// Total waypoints in the stream, boundary markers included.
    pub point_count: usize,
}

impl DrawingMetadata {
    /// Store `name`, truncated to [`MAX_NAME_LEN`] characters.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.chars().take(MAX_NAME_LEN).collect();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Motion tuning from the `SETTINGS_START` block.
///
/// Values are opaque to the engine and forwarded verbatim; a missing key stays `NaN`.
pub struct DrawingSettings {
    /// Scale applied to angular velocity while following a target.
    pub follow_angular_velocity_scale: f64,
    /// Linear velocity while following a target.
    pub follow_velocity: f64,
    /// How tightly curves are taken.
    pub curve_tightness: f64,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            follow_angular_velocity_scale: f64::NAN,
            follow_velocity: f64::NAN,
            curve_tightness: f64::NAN,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// One decoded point line.
pub struct Waypoint {
    /// Target coordinates.
    pub position: Point,
    /// Pen color to draw with on the way to this point.
    pub color: PenColor,
    /// Marks a switch between pen-up travel and pen-down drawing.
    pub is_boundary: bool,
}

impl Waypoint {
    /// Build a waypoint from raw coordinates.
    pub fn new(x: f64, y: f64, color: PenColor, is_boundary: bool) -> Self {
        Self {
            position: Point::new(x, y),
            color,
            is_boundary,
        }
    }
}
