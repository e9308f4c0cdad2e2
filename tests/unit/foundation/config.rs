use super::*;
use crate::render::compositor::MissingLogoPolicy;

#[test]
fn defaults() {
    let c = BannerConfig::default();
    assert_eq!(c.batch.threads, 16);
    assert_eq!(c.render.font_divisor, 15.0);
    assert_eq!(c.render.missing_logo, MissingLogoPolicy::SkipRecipient);
    assert_eq!(c.editor.drag_threshold_px, 3.0);
    assert!(c.fonts.system_fonts);
    assert_eq!(c.logging.level, "info");
    assert!(c.validate().is_ok());
}

#[test]
fn partial_file_parses() {
    let path = std::env::temp_dir().join(format!(
        "bannerforge_config_{}_{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::write(
        &path,
        r#"{"batch": {"threads": 4}, "render": {"missing_logo": "omit_element"}}"#,
    )
    .unwrap();
    let c = BannerConfig::load(Some(&path)).unwrap();
    assert_eq!(c.batch.threads, 4);
    assert_eq!(c.render.missing_logo, MissingLogoPolicy::OmitElement);
    assert_eq!(c.render.font_divisor, 15.0);

    std::fs::write(&path, r#"{"batch": {"threads": 0}}"#).unwrap();
    assert!(matches!(
        BannerConfig::load(Some(&path)),
        Err(BannerError::Validation(_))
    ));
    std::fs::write(&path, "{not json").unwrap();
    assert!(BannerConfig::load(Some(&path)).is_err());
    let _ = std::fs::remove_file(&path);

    assert!(BannerConfig::load(Some(Path::new("/nonexistent/bannerforge.json"))).is_err());
}

#[test]
fn overrides_apply_and_validate() {
    let mut c = BannerConfig::default();
    c.apply_overrides(Some(" 8 "), Some(PathBuf::from("/opt/fonts")))
        .unwrap();
    assert_eq!(c.batch.threads, 8);
    assert_eq!(c.fonts.dirs, vec![PathBuf::from("/opt/fonts")]);

    assert!(c.apply_overrides(Some("many"), None).is_err());
    assert!(c.apply_overrides(Some("0"), None).is_err());
}
