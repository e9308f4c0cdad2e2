//! Deterministic CPU compositor: base image plus ordered, transformed overlays.
//!
//! For every element, in layout order:
//!
//! 1. center in pixels: `px = x/100 * W`, `py = y/100 * H`
//! 2. local transform `translate(px, py) * rotate(rotation)`, alpha `opacity/100`
//! 3. logo: width `scale/100 * W`, height from the logo's own aspect ratio, centered
//! 4. text: placeholders substituted, size `scale/100 * H / font_divisor`, centered
//!
//! Each element sets its own transform, so nothing leaks from one element to the next.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assets::decode::{LogoImage, PreparedImage, decode_image, decode_logo, rasterize_svg};
use crate::assets::fonts::FontBook;
use crate::assets::source::AssetSource;
use crate::assets::text::{TextLayoutEngine, TextRequest};
use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{BannerError, BannerResult};
use crate::layout::element::{Element, ElementContent, TextStyle};
use crate::layout::model::Layout;
use crate::personalize::recipient::Recipient;
use crate::personalize::template::personalize;
use crate::render::frame::FrameRGBA;

/// Text size is `scale/100 * canvas_height / DEFAULT_FONT_DIVISOR` pixels unless configured.
pub const DEFAULT_FONT_DIVISOR: f64 = 15.0;

/// Longest side an SVG logo is rasterized at; larger on-canvas sizes are reached by scaling.
pub const MAX_SVG_RASTER_SIDE: u32 = 2048;

/// What to do when the layout has a logo slot but the recipient has no logo.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingLogoPolicy {
    /// Fail the whole render with [`BannerError::MissingLogo`].
    #[default]
    SkipRecipient,
    /// Leave the logo slot empty and draw everything else.
    OmitElement,
}

/// Compositor tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Divisor in the text size formula.
    pub font_divisor: f64,
    /// Missing-logo handling.
    pub missing_logo: MissingLogoPolicy,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            font_divisor: DEFAULT_FONT_DIVISOR,
            missing_logo: MissingLogoPolicy::SkipRecipient,
        }
    }
}

struct BaseCache {
    pixels: Arc<Vec<u8>>,
    image: vello_cpu::Image,
}

/// One compositor instance. Owns its drawing context and text engine, so each worker thread
/// gets its own; shared inputs (layout, base image, fonts, assets) are only read.
pub struct Renderer {
    settings: RenderSettings,
    svg_opts: usvg::Options<'static>,
    text: TextLayoutEngine,
    ctx: Option<(Canvas, vello_cpu::RenderContext)>,
    base: Option<BaseCache>,
}

impl Renderer {
    /// New renderer over a shared font book.
    pub fn new(fonts: Arc<FontBook>, settings: RenderSettings) -> Self {
        Self {
            svg_opts: fonts.svg_options(),
            text: TextLayoutEngine::new(fonts),
            settings,
            ctx: None,
            base: None,
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Decode base image bytes, render, and encode to PNG.
    ///
    /// An undecodable base image is reported as [`BannerError::AssetDecode`] for this call.
    pub fn render_encoded(
        &mut self,
        layout: &Layout,
        base_bytes: &[u8],
        recipient: &Recipient,
        assets: &dyn AssetSource,
    ) -> BannerResult<Vec<u8>> {
        let base = decode_image(base_bytes)?;
        self.render_frame(layout, &base, recipient, assets)?
            .encode_png()
    }

    /// Composite `layout` over `base` for one recipient. Output has the base image's size and
    /// premultiplied pixels.
    #[tracing::instrument(level = "debug", skip_all, fields(recipient = %recipient.id))]
    pub fn render_frame(
        &mut self,
        layout: &Layout,
        base: &PreparedImage,
        recipient: &Recipient,
        assets: &dyn AssetSource,
    ) -> BannerResult<FrameRGBA> {
        let canvas = Canvas::new(base.width, base.height)?;
        let logo = if layout.has_logo() {
            self.load_logo(recipient, assets)?
        } else {
            None
        };
        let base_paint = self.base_paint(base)?;

        let w = canvas.width as u16;
        let h = canvas.height as u16;
        let mut ctx = match self.ctx.take() {
            Some((size, ctx)) if size == canvas => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        let drawn = self.draw_all(&mut ctx, canvas, base_paint, layout, recipient, logo.as_ref());
        let out = drawn.map(|()| {
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.render_to_pixmap(&mut pixmap);
            FrameRGBA {
                width: canvas.width,
                height: canvas.height,
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            }
        });
        self.ctx = Some((canvas, ctx));
        out
    }

    fn draw_all(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        canvas: Canvas,
        base_paint: vello_cpu::Image,
        layout: &Layout,
        recipient: &Recipient,
        logo: Option<&LogoImage>,
    ) -> BannerResult<()> {
        let cw = f64::from(canvas.width);
        let ch = f64::from(canvas.height);

        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(base_paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, cw, ch));

        for el in layout {
            debug_assert!(el.is_normalized(), "element {} escaped clamping", el.id);

            let local = Affine::translate((el.x / 100.0 * cw, el.y / 100.0 * ch))
                * Affine::rotate(el.rotation.to_radians());
            let opacity = (el.opacity / 100.0) as f32;

            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

            match &el.content {
                ElementContent::Logo => {
                    let Some(logo) = logo else {
                        tracing::debug!(element = %el.id, "no logo, slot left empty");
                        continue;
                    };
                    draw_logo(ctx, el, logo, local, opacity, cw)?;
                }
                ElementContent::Text(style) => {
                    self.draw_text(ctx, el, style, recipient, local, opacity, ch)?;
                }
            }
            tracing::debug!(element = %el.id, kind = ?el.kind(), "element drawn");
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        el: &Element,
        style: &TextStyle,
        recipient: &Recipient,
        local: Affine,
        opacity: f32,
        ch: f64,
    ) -> BannerResult<()> {
        let text = personalize(&style.template, recipient);
        if text.trim().is_empty() {
            return Ok(());
        }
        let size_px = el.scale / 100.0 * ch / self.settings.font_divisor;
        let shaped = self.text.shape(&TextRequest {
            text: &text,
            family: &style.font_family,
            weight: style.font_weight,
            size_px: size_px as f32,
            letter_spacing: style.letter_spacing as f32,
            brush: style.color.into(),
        })?;

        let tr = local * Affine::translate((-shaped.width() / 2.0, -shaped.height() / 2.0));
        ctx.set_transform(affine_to_cpu(tr));
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        for line in shaped.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&shaped.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn load_logo(
        &self,
        recipient: &Recipient,
        assets: &dyn AssetSource,
    ) -> BannerResult<Option<LogoImage>> {
        let missing = |why: &str| match self.settings.missing_logo {
            MissingLogoPolicy::SkipRecipient => Err(BannerError::missing_logo(format!(
                "recipient {} {why}",
                recipient.id
            ))),
            MissingLogoPolicy::OmitElement => Ok(None),
        };

        let Some(reference) = recipient.logo_ref() else {
            return missing("has no logo");
        };
        let bytes = match assets.load(reference) {
            Ok(bytes) => bytes,
            Err(BannerError::NotFound(_)) => {
                return missing(&format!("logo '{reference}' does not exist"));
            }
            Err(e) => return Err(e),
        };
        decode_logo(&bytes, &self.svg_opts).map(Some)
    }

    fn base_paint(&mut self, base: &PreparedImage) -> BannerResult<vello_cpu::Image> {
        if let Some(cache) = &self.base
            && Arc::ptr_eq(&cache.pixels, &base.rgba8_premul)
        {
            return Ok(cache.image.clone());
        }
        let image = image_paint(base)?;
        self.base = Some(BaseCache {
            pixels: Arc::clone(&base.rgba8_premul),
            image: image.clone(),
        });
        Ok(image)
    }
}

fn draw_logo(
    ctx: &mut vello_cpu::RenderContext,
    el: &Element,
    logo: &LogoImage,
    local: Affine,
    opacity: f32,
    cw: f64,
) -> BannerResult<()> {
    let w = el.scale / 100.0 * cw;
    let h = w / logo.aspect_ratio();
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return Ok(());
    }

    let prepared = match logo {
        LogoImage::Raster(img) => img.clone(),
        LogoImage::Svg(tree) => {
            let (rw, rh) = svg_raster_size(w, h);
            rasterize_svg(tree, rw, rh)?
        }
    };
    let iw = f64::from(prepared.width);
    let ih = f64::from(prepared.height);
    let tr = local
        * Affine::translate((-w / 2.0, -h / 2.0))
        * Affine::scale_non_uniform(w / iw, h / ih);

    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint(image_paint(&prepared)?);
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
    if opacity < 1.0 {
        ctx.pop_layer();
    }
    Ok(())
}

/// Pixel size to rasterize an SVG drawn at `w`x`h`, keeping the aspect ratio and the longest
/// side within [`MAX_SVG_RASTER_SIDE`].
fn svg_raster_size(w: f64, h: f64) -> (u32, u32) {
    let cap = f64::from(MAX_SVG_RASTER_SIDE);
    let shrink = (cap / w.max(h)).min(1.0);
    let side = |v: f64| ((v * shrink).ceil() as u32).clamp(1, MAX_SVG_RASTER_SIDE);
    (side(w), side(h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_paint(img: &PreparedImage) -> BannerResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BannerResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BannerError::asset_decode("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BannerError::asset_decode("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BannerError::asset_decode("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
