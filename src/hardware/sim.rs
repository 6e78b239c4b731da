use std::collections::BTreeMap;

use crate::drawing::model::DrawingSettings;
use crate::foundation::core::{Point, ServoChannel};
use crate::hardware::{MotionSystem, ServoDriver};

/// Kinematic stand-in for the robot: moves straight at the target by a fixed step per tick.
#[derive(Debug, Clone)]
pub struct SimulatedMotion {
    position: Point,
    target: Point,
    following: bool,
    step: f64,
    settings: DrawingSettings,
    halts: usize,
}

impl SimulatedMotion {
    /// Robot at `start`, covering at most `step` units per update while following.
    pub fn new(start: Point, step: f64) -> Self {
        Self {
            position: start,
            target: start,
            following: false,
            step,
            settings: DrawingSettings::default(),
            halts: 0,
        }
    }

    /// Move the robot without simulation, e.g. to script arrival in tests.
    pub fn teleport(&mut self, to: Point) {
        self.position = to;
    }

    /// Last target set by the engine.
    pub fn target(&self) -> Point {
        self.target
    }

    /// Whether the robot is currently chasing its target.
    pub fn is_following(&self) -> bool {
        self.following
    }

    /// Tuning last applied.
    pub fn settings(&self) -> &DrawingSettings {
        &self.settings
    }

    /// Number of `halt` calls received.
    pub fn halts(&self) -> usize {
        self.halts
    }
}

impl MotionSystem for SimulatedMotion {
    fn start_following(&mut self) {
        self.following = true;
    }

    fn stop_following(&mut self) {
        self.following = false;
    }

    fn set_target(&mut self, target: Point) {
        self.target = target;
    }

    fn position(&self) -> Point {
        self.position
    }

    fn apply_settings(&mut self, settings: &DrawingSettings) {
        self.settings = *settings;
        // The drawing's velocity overrides the step only when it is specified.
        if settings.follow_velocity.is_finite() && settings.follow_velocity > 0.0 {
            self.step = settings.follow_velocity;
        }
    }

    fn halt(&mut self) {
        self.halts += 1;
    }

    fn update(&mut self) {
        if !self.following {
            return;
        }
        let delta = self.target - self.position;
        let remaining = delta.hypot();
        if remaining <= self.step {
            self.position = self.target;
        } else {
            self.position += delta * (self.step / remaining);
        }
    }
}

/// Servo board that records every command.
#[derive(Debug, Clone, Default)]
pub struct RecordingServo {
    commands: Vec<(ServoChannel, f64)>,
    latest: BTreeMap<ServoChannel, f64>,
}

impl RecordingServo {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands in issue order.
    pub fn commands(&self) -> &[(ServoChannel, f64)] {
        &self.commands
    }

    /// Most recent angle commanded on `channel`.
    pub fn angle(&self, channel: ServoChannel) -> Option<f64> {
        self.latest.get(&channel).copied()
    }

    /// Commands sent to `channel`, in order.
    pub fn history(&self, channel: ServoChannel) -> Vec<f64> {
        self.commands
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, a)| *a)
            .collect()
    }
}

impl ServoDriver for RecordingServo {
    fn set_angle(&mut self, channel: ServoChannel, angle_deg: f64) {
        self.commands.push((channel, angle_deg));
        self.latest.insert(channel, angle_deg);
    }
}
