use super::*;

fn text_element() -> Element {
    Element::with_defaults(ElementId(1), ElementKind::Text)
}

#[test]
fn defaults_match_editor_expectations() {
    let logo = Element::with_defaults(ElementId(0), ElementKind::Logo);
    assert_eq!((logo.x, logo.y), (50.0, 50.0));
    assert_eq!(logo.scale, 15.0);
    assert_eq!(logo.rotation, 0.0);
    assert_eq!(logo.opacity, 100.0);
    assert_eq!(logo.kind(), ElementKind::Logo);
    assert!(logo.text().is_none());

    let text = text_element();
    assert_eq!(text.scale, 30.0);
    let style = text.text().unwrap();
    assert_eq!(style.template, "{{shopName}}");
    assert_eq!(style.color, Rgba8::WHITE);
    assert_eq!(style.font_weight, 400);
    assert_eq!(style.font_family, "Roboto");
    assert!(text.is_normalized());
}

#[test]
fn apply_clamps_every_numeric_field() {
    let mut el = text_element();
    el.apply(&ElementPatch {
        x: Some(-15.0),
        y: Some(130.0),
        scale: Some(0.0),
        rotation: Some(400.0),
        opacity: Some(150.0),
        font_weight: Some(1234),
        ..ElementPatch::default()
    });
    assert_eq!(el.x, 0.0);
    assert_eq!(el.y, 100.0);
    assert_eq!(el.scale, SCALE_MIN);
    assert_eq!(el.rotation, 180.0);
    assert_eq!(el.opacity, 100.0);
    assert_eq!(el.text().unwrap().font_weight, 900);
    assert!(el.is_normalized());

    el.apply(&ElementPatch {
        scale: Some(999.0),
        rotation: Some(-999.0),
        opacity: Some(-1.0),
        font_weight: Some(0),
        ..ElementPatch::default()
    });
    assert_eq!(el.scale, 200.0);
    assert_eq!(el.rotation, -180.0);
    assert_eq!(el.opacity, 0.0);
    assert_eq!(el.text().unwrap().font_weight, 100);
}

#[test]
fn apply_ignores_non_finite_numbers() {
    let mut el = text_element();
    el.apply(&ElementPatch {
        x: Some(f64::NAN),
        scale: Some(f64::INFINITY),
        letter_spacing: Some(f64::NAN),
        ..ElementPatch::default()
    });
    assert_eq!(el.x, 50.0);
    assert_eq!(el.scale, 30.0);
    assert_eq!(el.text().unwrap().letter_spacing, 0.0);
}

#[test]
fn font_weight_snaps_to_hundreds() {
    let mut el = text_element();
    el.apply(&ElementPatch {
        font_weight: Some(449),
        ..ElementPatch::default()
    });
    assert_eq!(el.text().unwrap().font_weight, 400);
    el.apply(&ElementPatch {
        font_weight: Some(650),
        ..ElementPatch::default()
    });
    assert_eq!(el.text().unwrap().font_weight, 700);
}

#[test]
fn text_fields_are_ignored_for_logos() {
    let mut logo = Element::with_defaults(ElementId(0), ElementKind::Logo);
    logo.apply(&ElementPatch {
        template: Some("hello".to_string()),
        color: Some(Rgba8::BLACK),
        opacity: Some(40.0),
        ..ElementPatch::default()
    });
    assert_eq!(logo.content, ElementContent::Logo);
    assert_eq!(logo.opacity, 40.0);
}

#[test]
fn normalize_repairs_loaded_values() {
    let mut el = text_element();
    el.x = 250.0;
    el.scale = -3.0;
    el.rotation = f64::NAN;
    if let ElementContent::Text(t) = &mut el.content {
        t.font_weight = 333;
    }
    assert!(!el.is_normalized());
    el.normalize();
    assert!(el.is_normalized());
    assert_eq!(el.x, 100.0);
    assert_eq!(el.scale, SCALE_MIN);
    assert_eq!(el.rotation, 0.0);
    assert_eq!(el.text().unwrap().font_weight, 300);
}

#[test]
fn json_shape_is_flat_with_kind_tag() {
    let el = text_element();
    let v = serde_json::to_value(&el).unwrap();
    assert_eq!(v["kind"], "text");
    assert_eq!(v["template"], "{{shopName}}");
    assert_eq!(v["fontWeight"], 400);
    assert_eq!(v["color"], "#ffffff");

    let back: Element = serde_json::from_value(v).unwrap();
    assert_eq!(back, el);

    let logo: Element = serde_json::from_str(
        r#"{"id":7,"x":10,"y":20,"scale":15,"rotation":0,"opacity":100,"kind":"logo"}"#,
    )
    .unwrap();
    assert_eq!(logo.kind(), ElementKind::Logo);
    assert_eq!(logo.id.to_string(), "el-7");
}
