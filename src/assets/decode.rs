use std::sync::Arc;

use crate::foundation::error::{BannerError, BannerResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Largest raster side accepted from decoders and SVG rasterization.
pub const MAX_IMAGE_SIDE: u32 = u16::MAX as u32;

/// Decoded raster with premultiplied RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// A decoded recipient logo.
#[derive(Clone, Debug)]
pub enum LogoImage {
    /// Bitmap logo (PNG, JPEG, ...).
    Raster(PreparedImage),
    /// Vector logo, rasterized at draw size.
    Svg(Arc<usvg::Tree>),
}

impl LogoImage {
    /// Intrinsic width over height.
    pub fn aspect_ratio(&self) -> f64 {
        match self {
            Self::Raster(img) => img.aspect_ratio(),
            Self::Svg(tree) => {
                let size = tree.size();
                f64::from(size.width()) / f64::from(size.height())
            }
        }
    }
}

/// Decode raster bytes (any format `image` recognizes) into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BannerResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| BannerError::asset_decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 || width > MAX_IMAGE_SIDE || height > MAX_IMAGE_SIDE {
        return Err(BannerError::asset_decode(format!(
            "unsupported image size {width}x{height}"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Cheap content sniff: does this look like SVG markup rather than a bitmap?
pub fn is_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// Parse SVG bytes with the given options (font database, resource dir).
pub fn parse_svg(bytes: &[u8], opts: &usvg::Options<'_>) -> BannerResult<usvg::Tree> {
    let tree = usvg::Tree::from_data(bytes, opts)
        .map_err(|e| BannerError::asset_decode(format!("parse svg tree: {e}")))?;
    let size = tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(BannerError::asset_decode("svg has invalid width/height"));
    }
    Ok(tree)
}

/// Decode a logo, picking SVG or raster by content.
pub fn decode_logo(bytes: &[u8], svg_opts: &usvg::Options<'_>) -> BannerResult<LogoImage> {
    if is_svg(bytes) {
        parse_svg(bytes, svg_opts).map(|t| LogoImage::Svg(Arc::new(t)))
    } else {
        decode_image(bytes).map(LogoImage::Raster)
    }
}

/// Rasterize `tree` to exactly `width`x`height` premultiplied pixels.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> BannerResult<PreparedImage> {
    if width > MAX_IMAGE_SIDE || height > MAX_IMAGE_SIDE {
        return Err(BannerError::asset_decode(format!(
            "svg raster size too large: {width}x{height}"
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BannerError::asset_decode("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
