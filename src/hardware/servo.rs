use crate::foundation::core::ServoChannel;

/// Servo board output.
///
/// Commands are fire-and-forget: the call returns as soon as the command is issued, long
/// before the horn reaches the angle.
pub trait ServoDriver {
    /// Command `channel` to `angle_deg` degrees.
    fn set_angle(&mut self, channel: ServoChannel, angle_deg: f64);
}
