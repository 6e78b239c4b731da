//! # Plotbot guide
//!
//! A standalone walkthrough of how a drawing gets from a file on the card to ink on paper.
//! For command-line usage see the repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`DrawingMetadata`](crate::DrawingMetadata): name, physical size and waypoint count
//! - [`DrawingSettings`](crate::DrawingSettings): motion tuning forwarded to the robot as-is
//! - [`Waypoint`](crate::Waypoint): a target position, a pen color and a boundary flag
//! - [`DrawingReader`](crate::DrawingReader): parses the header, then yields waypoints lazily
//! - [`PencilCoordinator`](crate::PencilCoordinator): pen lift and color carousel with settling
//! - [`DrawingEngine`](crate::DrawingEngine): the tick-driven playback state machine
//!
//! ---
//!
//! ## File format
//!
//! ```text
//! DRAWING_INFO_START
//! name = Star
//! width = 210
//! height = 297
//! pointsCount = 3
//! DRAWING_INFO_END
//! SETTINGS_START
//! followAngularVelocityScale = 3
//! followVelocity = 25
//! curveTightness = 50
//! SETTINGS_END
//! DRAWING_START
//! 0 0 BLACK false
//! 10 0 BLACK true
//! 10 10 RED true
//! ```
//!
//! Header sections may come in either order. Lines outside them are skipped. Keys are matched
//! by prefix and the value is whatever follows `=`, minus one leading space. Numbers are read
//! leniently: the longest numeric prefix wins and garbage reads as `0`.
//!
//! Point lines are `x y color boundary`, space separated. A short or garbled line does not
//! abort playback: missing fields keep the previous waypoint's values and a
//! [`DecodeWarning`](crate::DecodeWarning) is recorded instead.
//!
//! ---
//!
//! ## Streaming
//!
//! Drawings can be far larger than the memory of the controller that plays them, so only one
//! waypoint is ever resident. Loading decodes the header and the first point line; every
//! arrival pulls exactly one more line. `point_index` counts positions in the stream, and a
//! drawing of `N` points is finished once the index reaches `N - 1`.
//!
//! ---
//!
//! ## Lines and boundaries
//!
//! The pen is not told per point whether it draws. Instead the engine keeps an `in_line` flag
//! and flips it each time it leaves a waypoint marked as a boundary. Two consecutive
//! boundaries therefore cancel out.
//!
//! ---
//!
//! ## Color changes
//!
//! The carousel takes time to rotate. When the next waypoint needs a different color the
//! coordinator commands the carousel and arms an [`ActuatorTimeout`](crate::ActuatorTimeout)
//! sized by the number of carousel steps between the two angles. Until the deadline passes
//! the engine halts the robot and keeps re-issuing the posture recorded with the timeout. No
//! call ever blocks; the deadline is checked against the engine's [`Clock`](crate::Clock).
//!
//! Every load returns the carousel to the configured rest color. If it was last sent
//! elsewhere it is turned back, with the same settling window, before the first segment of
//! the new run is drawn.
//!
//! ---
//!
//! ## Lifecycle
//!
//! ```text
//! load ──► start ──► running ──► finished
//!            ▲         │  ▲
//!            │   pause ▼  │ resume
//!            └──────  paused
//! ```
//!
//! - `stop` tears down from any state
//! - `restart` reopens the same path, and is refused while paused
//! - `start` on a drawing that already advanced reopens the stream first
//!
//! A loaded drawing also depends on the storage media. When the card is pulled the engine
//! reports itself unloaded (and therefore neither running nor paused) while
//! [`PlaybackDiagnostics`](crate::PlaybackDiagnostics) still shows the parsed state.
//!
//! ---
//!
//! ## Hardware seams
//!
//! The engine owns no hardware. It is generic over a
//! [`MotionSystem`](crate::hardware::MotionSystem) and a
//! [`ServoDriver`](crate::hardware::ServoDriver), and reads files through
//! [`Storage`](crate::storage::Storage). Simulated implementations
//! ([`SimulatedMotion`](crate::hardware::SimulatedMotion),
//! [`RecordingServo`](crate::hardware::RecordingServo),
//! [`MemoryStorage`](crate::storage::memory::MemoryStorage)) make whole drawings playable in
//! tests and from the `plotbot simulate` command.
