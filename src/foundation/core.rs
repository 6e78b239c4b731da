pub use kurbo::Point;

/// Output channel on the servo board.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ServoChannel(pub u8);

impl std::fmt::Display for ServoChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "servo{}", self.0)
    }
}

/// Euclidean distance between two points, the proximity metric used for waypoint arrival.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}
