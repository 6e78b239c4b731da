use std::time::Duration;

use crate::color::catalog::{PenColor, carousel_steps};
use crate::hardware::ServoDriver;
use crate::playback::config::PencilConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Settling window after a color change.
pub struct ActuatorTimeout {
    /// Absolute clock time at which the carousel is considered settled.
    pub deadline: Duration,
    /// Pen posture to hold until the deadline.
    pub hold_pen_down: bool,
}

/// Keeps the pen lift and color carousel in line with the logical pen state.
///
/// Color changes are not instantaneous. The carousel command is sent at once and an
/// [`ActuatorTimeout`] covers the time it needs to arrive; the owner polls
/// [`is_in_timeout`](Self::is_in_timeout) each tick instead of blocking.
#[derive(Debug)]
pub struct PencilCoordinator<S> {
    servo: S,
    config: PencilConfig,
    color: PenColor,
    carousel_angle: i32,
    timeout: Option<ActuatorTimeout>,
}

impl<S: ServoDriver> PencilCoordinator<S> {
    /// Wrap `servo`. The carousel is assumed to sit on `config.rest_color`.
    pub fn new(servo: S, config: PencilConfig) -> Self {
        let color = config.rest_color;
        Self {
            servo,
            config,
            color,
            carousel_angle: color.actuator_angle(),
            timeout: None,
        }
    }

    /// Lower or raise the pen. Always issues a command, never arms a timeout.
    pub fn set_pen_down(&mut self, down: bool) {
        let angle = if down {
            self.config.down_angle_deg
        } else {
            self.config.up_angle_deg
        };
        self.servo.set_angle(self.config.lift_channel, angle);
    }

    /// Switch the carousel to `color`, arming a settling timeout from `now`.
    ///
    /// Nothing happens when the target slot has the current color's angle. Switching to
    /// [`PenColor::None`] updates the logical color only.
    pub fn set_color(&mut self, color: PenColor, now: Duration) {
        let current = self.color.actuator_angle();
        let target = color.actuator_angle();
        if current == target {
            return;
        }

        if color != PenColor::None {
            let steps = self.color.steps_to(color, self.config.degrees_per_step);
            let settle = self.turn_carousel(target, steps, now);
            tracing::debug!(from = %self.color, to = %color, steps, settle_ms = settle.as_millis() as u64, "pen color change");
        }
        self.color = color;
    }

    /// Command the carousel to `angle` and arm a pen-up timeout covering `steps` steps.
    fn turn_carousel(&mut self, angle: i32, steps: u64, now: Duration) -> Duration {
        let settle = Duration::from_millis(self.config.step_time_ms)
            .saturating_mul(u32::try_from(steps).unwrap_or(u32::MAX));
        self.arm_timeout(now + settle, false);
        self.servo.set_angle(self.config.color_channel, f64::from(angle));
        self.carousel_angle = angle;
        settle
    }

    /// Arm (or replace) the settling window.
    pub fn arm_timeout(&mut self, deadline: Duration, hold_pen_down: bool) {
        self.timeout = Some(ActuatorTimeout {
            deadline,
            hold_pen_down,
        });
    }

    /// Whether `now` is still before the armed deadline.
    pub fn is_in_timeout(&self, now: Duration) -> bool {
        self.timeout.is_some_and(|t| now < t.deadline)
    }

    /// Re-issue the posture recorded with the timeout, if one is in flight.
    pub fn hold(&mut self, now: Duration) {
        if let Some(t) = self.timeout.filter(|t| now < t.deadline) {
            self.set_pen_down(t.hold_pen_down);
        }
    }

    /// Latest armed timeout, elapsed or not.
    pub fn timeout(&self) -> Option<ActuatorTimeout> {
        self.timeout
    }

    /// Logical current color.
    pub fn color(&self) -> PenColor {
        self.color
    }

    /// Return to the rest color, logically and physically.
    ///
    /// Any pending timeout is dropped. When the carousel was last commanded elsewhere it is
    /// turned back to the rest slot and a settling timeout is armed from `now`.
    pub fn reset(&mut self, now: Duration) {
        let rest = self.config.rest_color;
        self.color = rest;
        self.timeout = None;

        let (from, target) = (self.carousel_angle, rest.actuator_angle());
        if from != target {
            let steps = carousel_steps(from, target, self.config.degrees_per_step);
            let settle = self.turn_carousel(target, steps, now);
            tracing::debug!(from_deg = from, to = %rest, steps, settle_ms = settle.as_millis() as u64, "carousel back to rest");
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &PencilConfig {
        &self.config
    }

    /// Underlying servo driver.
    pub fn servo(&self) -> &S {
        &self.servo
    }

    /// Angle the carousel was last commanded to.
    pub fn carousel_angle(&self) -> i32 {
        self.carousel_angle
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pencil/coordinator.rs"]
mod tests;
