use std::time::Duration;

use crate::{
    color::catalog::PenColor,
    drawing::model::{DrawingMetadata, DrawingSettings, Waypoint},
    drawing::reader::{DrawingReader, PointRead},
    foundation::clock::{Clock, MonotonicClock},
    foundation::core::distance,
    foundation::error::{DecodeWarning, PlotError, PlotResult},
    hardware::{MediaPresence, MediaSignal, MotionSystem, ServoDriver},
    pencil::coordinator::{ActuatorTimeout, PencilCoordinator},
    playback::config::EngineConfig,
    storage::Storage,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Raw playback flags, before media presence is folded in.
pub struct PlaybackState {
    /// A drawing header was parsed and its stream is open.
    pub loaded: bool,
    /// Stream index of the current target.
    pub point_index: usize,
    /// Pen is down between boundary markers.
    pub in_line: bool,
    /// Playback advances on tick.
    pub running: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Snapshot of engine internals for operators and logs.
///
/// `parsed` and `media_present` are reported separately; [`DrawingEngine::is_loaded`] is their
/// conjunction, so a pulled card shows up as `parsed && !media_present`.
pub struct PlaybackDiagnostics {
    /// Path of the open drawing.
    pub path: Option<String>,
    /// Header parsed successfully and not stopped since.
    pub parsed: bool,
    /// Storage media currently present.
    pub media_present: bool,
    /// Flags as seen through the public predicates.
    pub running: bool,
    /// See [`DrawingEngine::is_paused`].
    pub paused: bool,
    /// See [`DrawingEngine::is_finished`].
    pub finished: bool,
    /// Stream index of the current target.
    pub point_index: usize,
    /// Pen is down between boundary markers.
    pub in_line: bool,
    /// Logical pen color.
    pub color: PenColor,
    /// Last armed settling window.
    pub timeout: Option<ActuatorTimeout>,
    /// Whether that window is still open.
    pub in_timeout: bool,
    /// Decode warnings since the last load.
    pub decode_warnings: usize,
    /// Most recent decode warning.
    pub last_warning: Option<DecodeWarning>,
}

/// Plays a streamed drawing back on the robot, one tick at a time.
///
/// The engine owns the open drawing stream, the resident target waypoint and the pen
/// mechanism. The outer loop calls [`update`](Self::update) once per cycle; every other
/// operation is a lifecycle command that returns immediately.
///
/// Lifecycle: `load` → `start` → (`pause` ⇄ `resume`) → finished, with `stop` tearing down
/// from anywhere and `restart` reopening the same path.
pub struct DrawingEngine<M, S> {
    config: EngineConfig,
    motion: M,
    pencil: PencilCoordinator<S>,
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    media: Box<dyn MediaPresence>,
    reader: Option<DrawingReader>,
    path: Option<String>,
    metadata: DrawingMetadata,
    settings: DrawingSettings,
    state: PlaybackState,
    current: Option<Waypoint>,
    warning_count: usize,
    last_warning: Option<DecodeWarning>,
}

impl<M: MotionSystem, S: ServoDriver> DrawingEngine<M, S> {
    /// Build an engine with a wall clock and media that is always present.
    ///
    /// The pen is raised immediately.
    pub fn new(
        config: EngineConfig,
        motion: M,
        servo: S,
        storage: impl Storage + 'static,
    ) -> Self {
        let mut pencil = PencilCoordinator::new(servo, config.pencil.clone());
        pencil.set_pen_down(false);

        Self {
            config,
            motion,
            pencil,
            storage: Box::new(storage),
            clock: Box::new(MonotonicClock::new()),
            media: Box::new(MediaSignal::always_present()),
            reader: None,
            path: None,
            metadata: DrawingMetadata::default(),
            settings: DrawingSettings::default(),
            state: PlaybackState::default(),
            current: None,
            warning_count: 0,
            last_warning: None,
        }
    }

    /// Replace the time source used for settling deadlines.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the media presence signal.
    pub fn with_media(mut self, media: impl MediaPresence + 'static) -> Self {
        self.media = Box::new(media);
        self
    }

    /// Load `path`, reporting success only. Failures are logged.
    pub fn load(&mut self, path: &str) -> bool {
        match self.try_load(path) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(path, error = %err, "drawing load failed");
                false
            }
        }
    }

    /// Load `path`, returning the reason on failure.
    ///
    /// Any open drawing is closed and all playback state reset first; on failure the engine
    /// is left unloaded with empty metadata and settings. On success the first waypoint is
    /// decoded and becomes the current target at index 0, and the drawing's settings are
    /// forwarded to the motion system. The carousel is sent back to the rest color, settling
    /// like any other color change.
    #[tracing::instrument(skip(self))]
    pub fn try_load(&mut self, path: &str) -> PlotResult<()> {
        self.close_stream();
        self.state = PlaybackState::default();
        self.metadata = DrawingMetadata::default();
        self.settings = DrawingSettings::default();
        self.current = None;
        self.path = None;
        self.warning_count = 0;
        self.last_warning = None;
        self.pencil.reset(self.clock.now());

        if !self.media.is_present() {
            return Err(PlotError::not_found("storage media not present"));
        }

        let mut reader = DrawingReader::open(self.storage.as_ref(), path)?;
        self.metadata = reader.metadata().clone();
        self.settings = *reader.settings();
        self.motion.apply_settings(&self.settings);

        match reader.next_point() {
            Some(first) => self.accept(first),
            None if self.metadata.point_count > 0 => {
                self.note_warning(DecodeWarning::StreamEnded {
                    read: 0,
                    expected: self.metadata.point_count,
                });
            }
            None => {}
        }

        self.reader = Some(reader);
        self.path = Some(path.to_string());
        self.state.loaded = true;

        tracing::info!(
            name = %self.metadata.name,
            points = self.metadata.point_count,
            width = self.metadata.width,
            height = self.metadata.height,
            "drawing loaded"
        );
        Ok(())
    }

    /// Begin playback from the first waypoint.
    ///
    /// Only acts when loaded, not running and not finished. A drawing that already advanced
    /// is reopened so the stream matches the reset cursor.
    pub fn start(&mut self) {
        if !self.is_loaded() || self.is_finished() || self.is_running() {
            return;
        }

        if self.state.point_index > 0 {
            let Some(path) = self.path.clone() else {
                return;
            };
            if !self.load(&path) {
                return;
            }
        }

        self.state.running = true;
        self.state.in_line = false;
        self.state.point_index = 0;
        self.pencil.set_pen_down(false);

        let first = self.current.unwrap_or_default();
        let now = self.clock.now();
        self.pencil.set_color(first.color, now);
        self.motion.set_target(first.position);

        tracing::info!(x = first.position.x, y = first.position.y, "drawing started");
    }

    /// Reopen the current drawing and start it again.
    ///
    /// Accepted only while loaded and not paused.
    #[tracing::instrument(skip(self))]
    pub fn restart(&mut self) {
        if !self.is_loaded() || self.is_paused() {
            tracing::debug!("restart ignored");
            return;
        }
        let Some(path) = self.path.clone() else {
            return;
        };

        self.close_stream();
        self.load(&path);
        self.start();
    }

    /// Pause a running, unfinished drawing.
    pub fn pause(&mut self) {
        if self.is_running() && !self.is_finished() {
            self.state.running = false;
            tracing::info!(point = self.state.point_index, "drawing paused");
        }
    }

    /// Resume a paused drawing.
    pub fn resume(&mut self) {
        if self.is_paused() {
            self.state.running = true;
            tracing::info!(point = self.state.point_index, "drawing resumed");
        }
    }

    /// Close the drawing and clear playback state. Always succeeds.
    pub fn stop(&mut self) {
        self.state.loaded = false;
        self.state.in_line = false;
        self.state.running = false;
        self.state.point_index = 0;
        self.close_stream();
        tracing::info!("drawing stopped");
    }

    /// One control cycle.
    ///
    /// While drawable, follows the current target and, once within precision of it, pulls the
    /// next waypoint from the stream. While not drawable (or while a color change settles) the
    /// robot is halted. The motion system's own update runs every tick regardless.
    pub fn update(&mut self) {
        let now = self.clock.now();
        let settling = self.pencil.is_in_timeout(now);

        if self.is_drawable() && !settling {
            self.motion.start_following();

            let target = self.current.unwrap_or_default();
            if distance(target.position, self.motion.position()) < self.config.precision {
                self.advance(now);
                let next = self.current.unwrap_or_default();
                self.motion.set_target(next.position);
            }

            if self.pencil.is_in_timeout(now) {
                // The advance just started a color change.
                self.hold_still(now);
            } else {
                self.pencil.set_pen_down(self.state.in_line);
            }
        } else {
            self.motion.stop_following();
            self.motion.halt();
            if settling {
                self.pencil.hold(now);
            }
        }

        self.motion.update();
    }

    fn is_drawable(&self) -> bool {
        self.is_loaded() && self.is_running() && !self.is_finished()
    }

    fn hold_still(&mut self, now: Duration) {
        self.motion.stop_following();
        self.motion.halt();
        self.pencil.hold(now);
    }

    fn advance(&mut self, now: Duration) {
        if !self.state.loaded || self.state.point_index >= self.metadata.point_count {
            return;
        }

        if self.current.is_some_and(|w| w.is_boundary) {
            self.state.in_line = !self.state.in_line;
        }

        match self.reader.as_mut().and_then(DrawingReader::next_point) {
            Some(read) => self.accept(read),
            None => {
                let read = self.reader.as_ref().map_or(0, DrawingReader::yielded);
                self.note_warning(DecodeWarning::StreamEnded {
                    read,
                    expected: self.metadata.point_count,
                });
            }
        }
        self.state.point_index += 1;

        let point = self.current.unwrap_or_default();
        self.pencil.set_color(point.color, now);

        tracing::debug!(
            index = self.state.point_index,
            x = point.position.x,
            y = point.position.y,
            color = %point.color,
            boundary = point.is_boundary,
            in_line = self.state.in_line,
            "advanced to waypoint"
        );
        if self.is_finished() {
            tracing::info!(points = self.metadata.point_count, "drawing finished");
        }
    }

    fn accept(&mut self, read: PointRead) {
        for warning in read.warnings {
            self.note_warning(warning);
        }
        self.current = Some(read.waypoint);
    }

    fn note_warning(&mut self, warning: DecodeWarning) {
        tracing::warn!(%warning, "drawing decode warning");
        self.warning_count += 1;
        self.last_warning = Some(warning);
    }

    fn close_stream(&mut self) {
        if let Some(mut reader) = self.reader.take() {
            reader.close();
        }
    }

    /// Parsed and the storage media is present.
    pub fn is_loaded(&self) -> bool {
        self.state.loaded && self.media.is_present()
    }

    /// Loaded and advancing on tick.
    pub fn is_running(&self) -> bool {
        self.state.running && self.is_loaded()
    }

    /// Loaded, not running and not finished.
    pub fn is_paused(&self) -> bool {
        !self.is_running() && !self.is_finished() && self.is_loaded()
    }

    /// Loaded and the cursor has reached the last waypoint.
    pub fn is_finished(&self) -> bool {
        self.state.point_index >= self.metadata.point_count.saturating_sub(1) && self.is_loaded()
    }

    /// Fraction of the drawing completed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if !self.state.loaded {
            return 0.0;
        }
        let last = self.metadata.point_count.saturating_sub(1);
        if last == 0 {
            return 1.0;
        }
        (self.state.point_index as f64 / last as f64).clamp(0.0, 1.0)
    }

    /// Header of the last successfully loaded drawing.
    pub fn metadata(&self) -> &DrawingMetadata {
        &self.metadata
    }

    /// Motion settings of the last successfully loaded drawing.
    pub fn settings(&self) -> &DrawingSettings {
        &self.settings
    }

    /// Arrival distance threshold.
    pub fn precision(&self) -> f64 {
        self.config.precision
    }

    /// Change the arrival distance threshold.
    pub fn set_precision(&mut self, precision: f64) {
        self.config.precision = precision;
    }

    /// Raw playback flags.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Stream index of the current target.
    pub fn point_index(&self) -> usize {
        self.state.point_index
    }

    /// Pen is down between boundary markers.
    pub fn in_line(&self) -> bool {
        self.state.in_line
    }

    /// Current target, once a waypoint has been decoded.
    pub fn current_waypoint(&self) -> Option<Waypoint> {
        self.current
    }

    /// Logical pen color.
    pub fn current_color(&self) -> PenColor {
        self.pencil.color()
    }

    /// Whether a color change is still settling.
    pub fn is_settling(&self) -> bool {
        self.pencil.is_in_timeout(self.clock.now())
    }

    /// Snapshot for operators and logs.
    pub fn diagnostics(&self) -> PlaybackDiagnostics {
        let now = self.clock.now();
        PlaybackDiagnostics {
            path: self.path.clone(),
            parsed: self.state.loaded,
            media_present: self.media.is_present(),
            running: self.is_running(),
            paused: self.is_paused(),
            finished: self.is_finished(),
            point_index: self.state.point_index,
            in_line: self.state.in_line,
            color: self.pencil.color(),
            timeout: self.pencil.timeout(),
            in_timeout: self.pencil.is_in_timeout(now),
            decode_warnings: self.warning_count,
            last_warning: self.last_warning.clone(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The motion system.
    pub fn motion(&self) -> &M {
        &self.motion
    }

    /// Mutable access to the motion system.
    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    /// The servo driver.
    pub fn servo(&self) -> &S {
        self.pencil.servo()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/engine.rs"]
mod tests;
