use super::*;

fn editor() -> Editor {
    Editor::new(
        CanvasBounds::sized(400.0, 200.0).unwrap(),
        EditorSettings::default(),
    )
}

#[test]
fn add_selects_and_remove_clears_selection() {
    let mut ed = editor();
    let a = ed.add(ElementKind::Logo);
    assert_eq!(ed.selected(), Some(a));
    let b = ed.add(ElementKind::Text);
    assert_eq!(ed.selected(), Some(b));

    ed.remove(b).unwrap();
    assert_eq!(ed.selected(), None);
    assert!(ed.remove(b).is_err());
    ed.select(Some(b));
    assert_eq!(ed.selected(), None);
    ed.select(Some(a));
    assert_eq!(ed.selected_element().map(|e| e.id), Some(a));
}

#[test]
fn small_movement_only_selects() {
    let mut ed = editor();
    let id = ed.add(ElementKind::Logo);
    ed.select(None);

    assert_eq!(
        ed.pointer_down(PointerTarget::Body(id), Point::new(200.0, 100.0)),
        GestureOutcome::Started
    );
    assert_eq!(ed.selected(), Some(id));
    assert_eq!(
        ed.pointer_move(Point::new(202.0, 101.0)),
        GestureOutcome::Ignored
    );
    assert_eq!(ed.pointer_up(), GestureOutcome::Ended);
    let el = ed.layout().get(id).unwrap();
    assert_eq!((el.x, el.y), (50.0, 50.0));
}

#[test]
fn removing_the_target_ends_the_gesture() {
    let mut ed = editor();
    let id = ed.add(ElementKind::Logo);
    ed.pointer_down(PointerTarget::ResizeHandle(id), Point::new(0.0, 0.0));
    ed.remove(id).unwrap();
    assert!(!ed.gesture().is_active());
    assert_eq!(ed.pointer_move(Point::new(10.0, 0.0)), GestureOutcome::Ignored);
    assert_eq!(ed.pointer_up(), GestureOutcome::Ignored);
}

#[test]
fn unknown_target_starts_nothing() {
    let mut ed = editor();
    assert_eq!(
        ed.pointer_down(PointerTarget::Body(ElementId(7)), Point::new(0.0, 0.0)),
        GestureOutcome::Ignored
    );
    assert!(!ed.gesture().is_active());
}
