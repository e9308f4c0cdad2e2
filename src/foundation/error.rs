/// Convenience result type used across bannerforge.
pub type BannerResult<T> = Result<T, BannerError>;

/// Top-level error taxonomy used by the layout, renderer and batch APIs.
#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    /// Invalid user-provided layout, config or recipient data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An element id (or other keyed entity) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The layout needs a recipient logo but the recipient has none.
    #[error("missing logo: {0}")]
    MissingLogo(String),

    /// Base image or logo bytes could not be decoded.
    #[error("asset decode error: {0}")]
    AssetDecode(String),

    /// No usable font face, or text shaping failed.
    #[error("font error: {0}")]
    Font(String),

    /// Encoding the composed raster failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BannerError {
    /// Build a [`BannerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BannerError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`BannerError::MissingLogo`] value.
    pub fn missing_logo(msg: impl Into<String>) -> Self {
        Self::MissingLogo(msg.into())
    }

    /// Build a [`BannerError::AssetDecode`] value.
    pub fn asset_decode(msg: impl Into<String>) -> Self {
        Self::AssetDecode(msg.into())
    }

    /// Build a [`BannerError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`BannerError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
