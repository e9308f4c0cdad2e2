use super::*;

#[test]
fn empty_book_resolves_nothing() {
    let book = FontBook::empty();
    assert!(book.is_empty());
    assert!(book.resolve("Roboto", 400).is_none());
    assert_eq!(book.svg_options().fontdb.len(), 0);
}

#[test]
fn missing_dirs_are_skipped() {
    let book = FontBook::new(&FontSettings {
        system_fonts: false,
        dirs: vec![PathBuf::from("/nonexistent/bannerforge/fonts")],
    });
    assert_eq!(book.face_count(), 0);
}

#[test]
fn unknown_family_falls_back_to_any_face() {
    let book = FontBook::new(&FontSettings::default());
    if book.is_empty() {
        return;
    }
    let face = book
        .resolve("No Such Family 1f3a9", 700)
        .expect("fallback face");
    assert!(!face.data.is_empty());
}

#[test]
fn settings_parse_with_defaults() {
    let s: FontSettings = serde_json::from_str(r#"{"dirs": ["fonts"]}"#).unwrap();
    assert!(s.system_fonts);
    assert_eq!(s.dirs, vec![PathBuf::from("fonts")]);
}

#[test]
fn resolve_id_matches_resolved_face() {
    let book = FontBook::new(&FontSettings::default());
    if book.is_empty() {
        assert!(book.resolve_id("Roboto", 400).is_none());
        return;
    }
    let id = book.resolve_id("Roboto", 400).expect("some face");
    assert_eq!(book.resolve("Roboto", 400).map(|f| f.id), Some(id));
    assert_eq!(book.face(id).map(|f| f.id), Some(id));
}
