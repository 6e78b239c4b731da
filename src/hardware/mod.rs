//! Collaborator interfaces the engine drives, plus simulated implementations.
//!
//! The engine never talks to hardware directly. It is handed a [`MotionSystem`] for position
//! following, a [`ServoDriver`] for the pen mechanism and a [`MediaPresence`] signal telling it
//! whether the card backing the drawing is still inserted.

/// Storage media presence tracking.
pub mod media;
/// Position-following subsystem contract.
pub mod motion;
/// Servo output contract.
pub mod servo;
/// Simulated robot and servo board.
pub mod sim;

pub use media::{CardState, DirectoryProbe, FixedProbe, MediaMonitor, MediaPresence, MediaProbe, MediaSignal};
pub use motion::MotionSystem;
pub use servo::ServoDriver;
pub use sim::{RecordingServo, SimulatedMotion};
