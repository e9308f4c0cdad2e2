use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BannerError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BannerError::not_found("x").to_string().contains("not found:"));
    assert!(
        BannerError::missing_logo("x")
            .to_string()
            .contains("missing logo:")
    );
    assert!(
        BannerError::asset_decode("x")
            .to_string()
            .contains("asset decode error:")
    );
    assert!(BannerError::font("x").to_string().contains("font error:"));
    assert!(BannerError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BannerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
