use super::*;

fn ids(layout: &Layout) -> Vec<u64> {
    layout.iter().map(|e| e.id.as_u64()).collect()
}

#[test]
fn add_appends_with_fresh_ids() {
    let mut layout = Layout::new();
    let a = layout.add(ElementKind::Logo).id;
    let b = layout.add(ElementKind::Text).id;
    let c = layout.add(ElementKind::Text).id;
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_eq!(layout.index_of(a), Some(0));
    assert_eq!(layout.index_of(c), Some(2));
    assert!(layout.has_logo());

    layout.remove(c).unwrap();
    let d = layout.add(ElementKind::Logo).id;
    assert_ne!(d, c, "ids are never reused within a layout");
}

#[test]
fn update_merges_and_clamps() {
    let mut layout = Layout::new();
    let id = layout.add(ElementKind::Text).id;
    let el = layout
        .update(
            id,
            &ElementPatch {
                x: Some(-15.0),
                opacity: Some(55.0),
                ..ElementPatch::default()
            },
        )
        .unwrap();
    assert_eq!(el.x, 0.0);
    assert_eq!(el.y, 50.0);
    assert_eq!(el.opacity, 55.0);
}

#[test]
fn unknown_ids_are_not_found() {
    let mut layout = Layout::new();
    layout.add(ElementKind::Logo);
    let ghost = ElementId(99);
    assert!(matches!(
        layout.update(ghost, &ElementPatch::scale(10.0)),
        Err(BannerError::NotFound(_))
    ));
    assert!(matches!(layout.remove(ghost), Err(BannerError::NotFound(_))));
    assert!(matches!(layout.reorder(ghost, 0), Err(BannerError::NotFound(_))));
    assert_eq!(layout.len(), 1);
}

#[test]
fn reorder_moves_one_entry_and_clamps_index() {
    let mut layout = Layout::new();
    let a = layout.add(ElementKind::Logo).id;
    layout.add(ElementKind::Text);
    layout.add(ElementKind::Text);
    assert_eq!(ids(&layout), vec![0, 1, 2]);

    layout.reorder(a, 2).unwrap();
    assert_eq!(ids(&layout), vec![1, 2, 0]);

    layout.reorder(a, 0).unwrap();
    assert_eq!(ids(&layout), vec![0, 1, 2]);

    layout.reorder(ElementId(1), 50).unwrap();
    assert_eq!(ids(&layout), vec![0, 2, 1]);
}

#[test]
fn json_round_trip_and_normalization() {
    let json = r##"{
        "elements": [
            {"id": 4, "x": 120, "y": 10, "scale": 500, "rotation": 0, "opacity": 100, "kind": "logo"},
            {"id": 9, "x": 50, "y": 50, "scale": 30, "rotation": -90, "opacity": 80,
             "kind": "text", "template": "Hi {{shopName}}", "color": "#ff0000",
             "fontWeight": 350, "fontFamily": "Roboto", "letterSpacing": 1.5}
        ]
    }"##;
    let mut layout = Layout::from_json_str(json).unwrap();
    assert_eq!(layout.len(), 2);
    let logo = &layout.elements()[0];
    assert_eq!(logo.x, 100.0);
    assert_eq!(logo.scale, 200.0);
    assert_eq!(layout.elements()[1].text().unwrap().font_weight, 400);

    let fresh = layout.add(ElementKind::Text).id;
    assert_eq!(fresh.as_u64(), 10);

    let back = Layout::from_json_str(&layout.to_json_string().unwrap()).unwrap();
    assert_eq!(back.elements(), layout.elements());
}

#[test]
fn duplicate_ids_are_rejected() {
    let json = r#"{"elements": [
        {"id": 1, "x": 0, "y": 0, "scale": 10, "rotation": 0, "opacity": 100, "kind": "logo"},
        {"id": 1, "x": 0, "y": 0, "scale": 10, "rotation": 0, "opacity": 100, "kind": "logo"}
    ]}"#;
    let err = Layout::from_json_str(json).unwrap_err();
    assert!(err.to_string().contains("duplicate element id"));
}
