use super::*;
use crate::foundation::core::ServoChannel;
use crate::hardware::RecordingServo;

const LIFT: ServoChannel = ServoChannel(1);
const CAROUSEL: ServoChannel = ServoChannel(2);

fn coordinator() -> PencilCoordinator<RecordingServo> {
    PencilCoordinator::new(RecordingServo::new(), PencilConfig::default())
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn pen_posture_maps_to_fixed_angles() {
    let mut p = coordinator();
    p.set_pen_down(true);
    p.set_pen_down(false);
    p.set_pen_down(false);

    assert_eq!(p.servo().history(LIFT), vec![100.0, 83.0, 83.0]);
    assert!(p.timeout().is_none());
}

#[test]
fn color_change_arms_timeout_per_step() {
    let mut p = coordinator();
    p.set_color(PenColor::Red, ms(1_000));

    // |50 - 90| / 40 = 1 step of 20 ms.
    assert_eq!(
        p.timeout(),
        Some(ActuatorTimeout {
            deadline: ms(1_020),
            hold_pen_down: false,
        })
    );
    assert_eq!(p.servo().history(CAROUSEL), vec![50.0]);
    assert_eq!(p.color(), PenColor::Red);
}

#[test]
fn longer_moves_settle_longer() {
    let mut p = PencilCoordinator::new(
        RecordingServo::new(),
        PencilConfig {
            rest_color: PenColor::Red,
            step_time_ms: 250,
            ..PencilConfig::default()
        },
    );
    p.set_color(PenColor::Green, ms(0));
    assert_eq!(p.timeout().map(|t| t.deadline), Some(ms(500)));
}

#[test]
fn timeout_window_is_half_open() {
    let mut p = coordinator();
    p.set_color(PenColor::Green, ms(100));

    assert!(p.is_in_timeout(ms(100)));
    assert!(p.is_in_timeout(ms(119)));
    assert!(!p.is_in_timeout(ms(120)));
}

#[test]
fn same_angle_is_a_no_op() {
    let mut p = coordinator();
    p.set_color(PenColor::Black, ms(0));
    p.set_color(PenColor::Blue, ms(0));

    assert!(p.servo().commands().is_empty());
    assert!(p.timeout().is_none());
    assert_eq!(p.color(), PenColor::Black);
}

#[test]
fn repeated_requests_are_idempotent() {
    let mut p = coordinator();
    p.set_color(PenColor::Red, ms(0));
    p.set_color(PenColor::Red, ms(5));
    p.set_color(PenColor::Red, ms(10));

    assert_eq!(p.servo().history(CAROUSEL), vec![50.0]);
    assert_eq!(p.timeout().map(|t| t.deadline), Some(ms(20)));
}

#[test]
fn none_updates_color_without_moving() {
    let mut p = coordinator();
    p.set_color(PenColor::None, ms(0));

    assert_eq!(p.color(), PenColor::None);
    assert!(p.servo().commands().is_empty());
    assert!(p.timeout().is_none());

    p.set_color(PenColor::Red, ms(0));
    // From angle 0 to 50 is one whole step.
    assert_eq!(p.timeout().map(|t| t.deadline), Some(ms(20)));
}

#[test]
fn new_timeout_overwrites_previous() {
    let mut p = coordinator();
    p.set_color(PenColor::Red, ms(0));
    p.arm_timeout(ms(5), true);
    assert_eq!(
        p.timeout(),
        Some(ActuatorTimeout {
            deadline: ms(5),
            hold_pen_down: true,
        })
    );
}

#[test]
fn hold_reissues_posture_only_while_armed() {
    let mut p = coordinator();
    p.set_color(PenColor::Red, ms(0));
    p.hold(ms(10));
    p.hold(ms(25));

    assert_eq!(p.servo().history(LIFT), vec![83.0]);
}

#[test]
fn reset_turns_the_carousel_back_to_rest() {
    let mut p = coordinator();
    p.set_color(PenColor::Green, ms(0));
    p.reset(ms(50));

    assert_eq!(p.color(), PenColor::Black);
    assert_eq!(p.carousel_angle(), 90);
    assert_eq!(p.servo().history(CAROUSEL), vec![130.0, 90.0]);
    assert_eq!(
        p.timeout(),
        Some(ActuatorTimeout {
            deadline: ms(70),
            hold_pen_down: false,
        })
    );
}

#[test]
fn reset_at_rest_issues_nothing() {
    let mut p = coordinator();
    p.set_color(PenColor::Red, ms(0));
    p.set_color(PenColor::Blue, ms(0));
    p.reset(ms(100));

    // Blue shares black's slot, so the carousel is already home.
    assert_eq!(p.servo().history(CAROUSEL), vec![50.0, 90.0]);
    assert!(p.timeout().is_none());
}

#[test]
fn reset_tracks_the_commanded_angle_not_the_logical_color() {
    let mut p = coordinator();
    p.set_color(PenColor::Red, ms(0));
    p.set_color(PenColor::None, ms(0));
    assert_eq!(p.carousel_angle(), 50);

    p.reset(ms(10));
    assert_eq!(p.servo().angle(CAROUSEL), Some(90.0));
    assert_eq!(p.timeout().map(|t| t.deadline), Some(ms(30)));
}
