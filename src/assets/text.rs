use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::fonts::FontBook;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{BannerError, BannerResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// What to shape.
#[derive(Clone, Debug)]
pub struct TextRequest<'a> {
    /// Final (already personalized) string.
    pub text: &'a str,
    /// Requested family name.
    pub family: &'a str,
    /// CSS weight.
    pub weight: u16,
    /// Font size in pixels.
    pub size_px: f32,
    /// Extra advance between glyphs in pixels.
    pub letter_spacing: f32,
    /// Fill color.
    pub brush: TextBrushRgba8,
}

/// A shaped single-paragraph layout plus the font its glyphs index into.
pub struct ShapedText {
    /// Parley layout, lines already broken.
    pub layout: parley::Layout<TextBrushRgba8>,
    /// Font used by every glyph run.
    pub font: vello_cpu::peniko::FontData,
}

impl ShapedText {
    /// Layout width in pixels.
    pub fn width(&self) -> f64 {
        f64::from(self.layout.width())
    }

    /// Layout height in pixels.
    pub fn height(&self) -> f64 {
        f64::from(self.layout.height())
    }
}

impl std::fmt::Debug for ShapedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapedText")
            .field("width", &self.layout.width())
            .field("height", &self.layout.height())
            .finish()
    }
}

struct RegisteredFace {
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

/// Stateful helper that shapes text with faces from a shared [`FontBook`].
///
/// Holds Parley contexts, so one engine lives per render worker.
pub struct TextLayoutEngine {
    fonts: Arc<FontBook>,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: HashMap<usvg::fontdb::ID, RegisteredFace>,
}

impl TextLayoutEngine {
    /// Fresh Parley contexts over `fonts`.
    pub fn new(fonts: Arc<FontBook>) -> Self {
        Self {
            fonts,
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    /// Shape `req` into an unwrapped single-paragraph layout.
    pub fn shape(&mut self, req: &TextRequest<'_>) -> BannerResult<ShapedText> {
        if !req.size_px.is_finite() || req.size_px <= 0.0 {
            return Err(BannerError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let id = self.fonts.resolve_id(req.family, req.weight).ok_or_else(|| {
            BannerError::font(format!("no font face available for \"{}\"", req.family))
        })?;

        if !self.registered.contains_key(&id) {
            let face = self
                .fonts
                .face(id)
                .ok_or_else(|| BannerError::font("resolved font face has no data"))?;
            let families = self.font_ctx.collection.register_fonts(
                parley::fontique::Blob::from(face.data.as_ref().clone()),
                None,
            );
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                BannerError::font("no font families registered from font bytes")
            })?;
            let family_name = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| BannerError::font("registered font family has no name"))?
                .to_string();
            tracing::debug!(family = %family_name, requested = req.family, "font registered");
            let font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(face.data.as_ref().clone()),
                face.index,
            );
            self.registered
                .insert(id, RegisteredFace { family_name, font });
        }
        let reg = self
            .registered
            .get(&id)
            .ok_or_else(|| BannerError::font("font registration lost"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, req.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(reg.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(req.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(req.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            req.letter_spacing,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(req.brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(req.text);
        layout.break_all_lines(None);

        Ok(ShapedText {
            layout,
            font: reg.font.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
