use super::*;

fn request(text: &str) -> TextRequest<'_> {
    TextRequest {
        text,
        family: "Roboto",
        weight: 400,
        size_px: 24.0,
        letter_spacing: 0.0,
        brush: Rgba8::WHITE.into(),
    }
}

#[test]
fn brush_from_color() {
    let b = TextBrushRgba8::from(Rgba8 {
        r: 1,
        g: 2,
        b: 3,
        a: 4,
    });
    assert_eq!((b.r, b.g, b.b, b.a), (1, 2, 3, 4));
}

#[test]
fn no_faces_is_a_font_error() {
    let mut engine = TextLayoutEngine::new(Arc::new(FontBook::empty()));
    assert!(matches!(
        engine.shape(&request("Acme")),
        Err(BannerError::Font(_))
    ));
}

#[test]
fn invalid_size_is_rejected() {
    let mut engine = TextLayoutEngine::new(Arc::new(FontBook::empty()));
    let mut req = request("Acme");
    req.size_px = 0.0;
    assert!(matches!(engine.shape(&req), Err(BannerError::Validation(_))));
}

#[test]
fn letter_spacing_widens_layout() {
    let book = FontBook::new(&crate::assets::fonts::FontSettings::default());
    if book.is_empty() {
        return;
    }
    let mut engine = TextLayoutEngine::new(Arc::new(book));
    let tight = engine.shape(&request("Acme Shop")).unwrap();
    let mut req = request("Acme Shop");
    req.letter_spacing = 4.0;
    let loose = engine.shape(&req).unwrap();
    assert!(tight.width() > 0.0 && tight.height() > 0.0);
    assert!(loose.width() > tight.width());
}

#[test]
fn repeated_shaping_registers_a_face_once() {
    let book = FontBook::new(&crate::assets::fonts::FontSettings::default());
    if book.is_empty() {
        return;
    }
    let mut engine = TextLayoutEngine::new(Arc::new(book));
    for name in ["Acme", "Beta Market", "Zebra"] {
        engine.shape(&request(name)).unwrap();
    }
    assert_eq!(engine.registered.len(), 1);
}
