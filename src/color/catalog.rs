use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Pen colors available on the carousel.
///
/// `None` doubles as the fallback for any name the catalog does not know.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PenColor {
    /// Black pen.
    Black,
    /// Red pen.
    Red,
    /// Green pen.
    Green,
    /// Blue pen.
    Blue,
    /// No pen selected.
    #[default]
    None,
}

impl PenColor {
    /// Every catalog entry, in wire order.
    pub const ALL: [PenColor; 5] = [
        PenColor::Black,
        PenColor::Red,
        PenColor::Green,
        PenColor::Blue,
        PenColor::None,
    ];

    /// Color carousel angle in degrees.
    ///
    /// Black and blue share a slot, so switching between them moves nothing.
    pub fn actuator_angle(self) -> i32 {
        match self {
            PenColor::Black => 90,
            PenColor::Red => 50,
            PenColor::Green => 130,
            PenColor::Blue => 90,
            PenColor::None => 0,
        }
    }

    /// Upper-case name used in drawing files.
    pub fn name(self) -> &'static str {
        match self {
            PenColor::Black => "BLACK",
            PenColor::Red => "RED",
            PenColor::Green => "GREEN",
            PenColor::Blue => "BLUE",
            PenColor::None => "NONE",
        }
    }

    /// Exact, case-sensitive lookup. Unknown names map to [`PenColor::None`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .unwrap_or(PenColor::None)
    }

    /// Whole carousel steps between the slots of `self` and `other`.
    pub fn steps_to(self, other: PenColor, degrees_per_step: f64) -> u64 {
        carousel_steps(self.actuator_angle(), other.actuator_angle(), degrees_per_step)
    }
}

/// Whole carousel steps between two angles, truncated.
pub(crate) fn carousel_steps(from_deg: i32, to_deg: i32, degrees_per_step: f64) -> u64 {
    let delta = (to_deg - from_deg).unsigned_abs();
    (f64::from(delta) / degrees_per_step) as u64
}

impl fmt::Display for PenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PenColor {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/catalog.rs"]
mod tests;
