//! Plotbot plays streamed drawings back on a pen-carrying mobile robot.
//!
//! A drawing is a text file with a header (name, size, point count, motion tuning) followed by
//! one waypoint per line. The engine keeps a single waypoint resident, steering the robot at it
//! and pulling the next line from storage once the robot is close enough. Pen lift and color
//! carousel are servo driven; a color change arms a settling window during which the robot
//! holds still.
//!
//! - Load and inspect drawings with [`DrawingReader`]
//! - Drive playback with [`DrawingEngine`], ticking [`DrawingEngine::update`] once per cycle
//! - Plug in hardware through the [`hardware`] traits, or use the simulated implementations
//!
//! See [`guide`] for a walkthrough.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod color;
mod drawing;
mod foundation;
mod pencil;
mod playback;

/// Architecture walkthrough.
pub mod guide;
pub mod hardware;
pub mod storage;

pub use crate::color::catalog::PenColor;
pub use crate::drawing::model::{DrawingMetadata, DrawingSettings, MAX_NAME_LEN, Waypoint};
pub use crate::drawing::reader::{DrawingReader, PointRead};
pub use crate::foundation::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::foundation::core::{Point, ServoChannel, distance};
pub use crate::foundation::error::{DecodeWarning, PlotError, PlotResult};
pub use crate::pencil::coordinator::{ActuatorTimeout, PencilCoordinator};
pub use crate::playback::config::{EngineConfig, PencilConfig};
pub use crate::playback::engine::{DrawingEngine, PlaybackDiagnostics, PlaybackState};
