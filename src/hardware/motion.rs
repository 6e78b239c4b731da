use crate::drawing::model::DrawingSettings;
use crate::foundation::core::Point;

/// Position-following subsystem of the robot.
///
/// The engine sets a target and toggles following; the subsystem owns odometry and the
/// control loop that chases the target.
///
/// # Implementation Notes
///
/// - `update()` is called exactly once per engine tick, whatever the drawing state, so
///   position tracking keeps running while playback is paused or settling.
/// - `apply_settings()` receives drawing tuning verbatim. Any field may be `NaN` when the
///   drawing did not specify it; implementations keep their own value in that case.
/// - `halt()` stops the wheels immediately, independent of following.
pub trait MotionSystem {
    /// Start chasing the current target.
    fn start_following(&mut self);

    /// Stop chasing the target. The target itself is kept.
    fn stop_following(&mut self);

    /// Replace the target coordinate.
    fn set_target(&mut self, target: Point);

    /// Current estimated position.
    fn position(&self) -> Point;

    /// Apply per-drawing tuning parameters.
    fn apply_settings(&mut self, settings: &DrawingSettings);

    /// Stop the drive motors.
    fn halt(&mut self);

    /// Per-tick refresh of odometry and control.
    fn update(&mut self);
}
