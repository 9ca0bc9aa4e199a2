use super::*;

#[test]
fn pointer_starts_offscreen() {
    let p = PointerState::default();
    assert!(p.is_offscreen());
    assert_eq!(p.position(), Point::new(-1000.0, -1000.0));
}

#[test]
fn move_then_leave_resets_sentinel() {
    let mut p = PointerState::default();
    p.move_to(Point::new(12.0, 34.0));
    assert!(!p.is_offscreen());
    assert_eq!(p.position(), Point::new(12.0, 34.0));

    p.leave();
    assert!(p.is_offscreen());
}

#[test]
fn event_names_match_dom() {
    let names: Vec<_> = EventKind::ALL.iter().map(|e| e.dom_name()).collect();
    assert_eq!(names, ["resize", "mousemove", "mouseleave", "click"]);
}

#[test]
fn only_pointer_leave_targets_document() {
    for event in EventKind::ALL {
        assert_eq!(event.on_document(), event == EventKind::PointerLeave);
    }
}
