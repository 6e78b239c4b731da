use super::*;

#[test]
fn names_round_trip_through_lookup() {
    for color in PenColor::ALL {
        assert_eq!(PenColor::from_name(color.name()), color);
    }
}

#[test]
fn unknown_or_miscased_names_fall_back_to_none() {
    assert_eq!(PenColor::from_name("PURPLE"), PenColor::None);
    assert_eq!(PenColor::from_name("red"), PenColor::None);
    assert_eq!(PenColor::from_name(""), PenColor::None);
    assert_eq!("GREEN".parse::<PenColor>(), Ok(PenColor::Green));
}

#[test]
fn carousel_angles() {
    assert_eq!(PenColor::Black.actuator_angle(), 90);
    assert_eq!(PenColor::Red.actuator_angle(), 50);
    assert_eq!(PenColor::Green.actuator_angle(), 130);
    assert_eq!(PenColor::Blue.actuator_angle(), 90);
    assert_eq!(PenColor::None.actuator_angle(), 0);
}

#[test]
fn steps_truncate_partial_slots() {
    assert_eq!(PenColor::Black.steps_to(PenColor::Red, 40.0), 1);
    assert_eq!(PenColor::Red.steps_to(PenColor::Green, 40.0), 2);
    assert_eq!(PenColor::Black.steps_to(PenColor::Blue, 40.0), 0);
    assert_eq!(PenColor::Red.steps_to(PenColor::Black, 30.0), 1);
}

#[test]
fn serde_uses_wire_names() {
    let json = serde_json::to_string(&PenColor::Blue).unwrap();
    assert_eq!(json, "\"BLUE\"");
    let back: PenColor = serde_json::from_str("\"RED\"").unwrap();
    assert_eq!(back, PenColor::Red);
}
