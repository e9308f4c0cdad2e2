use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::math::clamp_finite;
use crate::personalize::template::Placeholder;

/// Smallest stored `x`/`y` (percent of canvas).
pub const POSITION_MIN: f64 = 0.0;
/// Largest stored `x`/`y` (percent of canvas).
pub const POSITION_MAX: f64 = 100.0;
/// Smallest stored scale; the `(0, 200]` range is realised as `[1, 200]`.
pub const SCALE_MIN: f64 = 1.0;
/// Largest stored scale.
pub const SCALE_MAX: f64 = 200.0;
/// Rotation bound in degrees (symmetric).
pub const ROTATION_LIMIT: f64 = 180.0;
/// Largest stored opacity (percent).
pub const OPACITY_MAX: f64 = 100.0;
/// Font weight bounds; stored weights are multiples of 100.
pub const FONT_WEIGHT_MIN: u16 = 100;
/// Upper font weight bound.
pub const FONT_WEIGHT_MAX: u16 = 900;

/// Opaque element identifier, unique within one [`Layout`](crate::Layout).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub(crate) u64);

impl ElementId {
    /// Access the raw identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el-{}", self.0)
    }
}

/// The closed set of overlay kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Recipient logo slot.
    Logo,
    /// Templated text line.
    Text,
}

/// Styling and template for a text element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Template with zero or more `{{field}}` placeholders.
    pub template: String,
    /// Fill color.
    pub color: Rgba8,
    /// CSS-style weight, 100..=900 in steps of 100.
    pub font_weight: u16,
    /// Requested font family name.
    pub font_family: String,
    /// Extra advance between glyphs in pixels (may be negative).
    pub letter_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            template: Placeholder::ShopName.token().to_string(),
            color: Rgba8::WHITE,
            font_weight: 400,
            font_family: "Roboto".to_string(),
            letter_spacing: 0.0,
        }
    }
}

/// Kind-specific payload of an [`Element`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementContent {
    /// Logo slot; size comes from `scale` and the logo's own aspect ratio.
    Logo,
    /// Text slot.
    Text(TextStyle),
}

/// A positionable overlay. All numeric fields are kept inside their documented ranges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Identifier within the owning layout.
    pub id: ElementId,
    /// Center x in percent of canvas width, `[0, 100]`.
    pub x: f64,
    /// Center y in percent of canvas height, `[0, 100]`.
    pub y: f64,
    /// Percent; logo width as a fraction of canvas width, or text size driver. `[1, 200]`.
    pub scale: f64,
    /// Degrees clockwise about the element center, `[-180, 180]`.
    pub rotation: f64,
    /// Percent alpha, `[0, 100]`.
    pub opacity: f64,
    /// Kind-specific data.
    #[serde(flatten)]
    pub content: ElementContent,
}

impl Element {
    pub(crate) fn with_defaults(id: ElementId, kind: ElementKind) -> Self {
        let (scale, content) = match kind {
            ElementKind::Logo => (15.0, ElementContent::Logo),
            ElementKind::Text => (30.0, ElementContent::Text(TextStyle::default())),
        };
        Self {
            id,
            x: 50.0,
            y: 50.0,
            scale,
            rotation: 0.0,
            opacity: 100.0,
            content,
        }
    }

    /// Kind tag of this element.
    pub fn kind(&self) -> ElementKind {
        match self.content {
            ElementContent::Logo => ElementKind::Logo,
            ElementContent::Text(_) => ElementKind::Text,
        }
    }

    /// Text styling, when this is a text element.
    pub fn text(&self) -> Option<&TextStyle> {
        match &self.content {
            ElementContent::Text(t) => Some(t),
            ElementContent::Logo => None,
        }
    }

    /// Merge `patch` into this element and re-clamp every field.
    ///
    /// Text-only fields are ignored for logo elements. Non-finite numbers keep the old value.
    pub fn apply(&mut self, patch: &ElementPatch) {
        if let Some(x) = patch.x {
            self.x = clamp_finite(x, POSITION_MIN, POSITION_MAX, self.x);
        }
        if let Some(y) = patch.y {
            self.y = clamp_finite(y, POSITION_MIN, POSITION_MAX, self.y);
        }
        if let Some(scale) = patch.scale {
            self.scale = clamp_finite(scale, SCALE_MIN, SCALE_MAX, self.scale);
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = clamp_finite(rotation, -ROTATION_LIMIT, ROTATION_LIMIT, self.rotation);
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = clamp_finite(opacity, 0.0, OPACITY_MAX, self.opacity);
        }

        if let ElementContent::Text(t) = &mut self.content {
            if let Some(template) = &patch.template {
                t.template.clone_from(template);
            }
            if let Some(color) = patch.color {
                t.color = color;
            }
            if let Some(weight) = patch.font_weight {
                t.font_weight = snap_font_weight(weight);
            }
            if let Some(family) = &patch.font_family {
                t.font_family.clone_from(family);
            }
            if let Some(spacing) = patch.letter_spacing
                && spacing.is_finite()
            {
                t.letter_spacing = spacing;
            }
        }
    }

    /// Force every field into range (used for elements loaded from outside the model).
    ///
    /// Non-finite values fall back to the `add` defaults.
    pub fn normalize(&mut self) {
        self.x = clamp_finite(self.x, POSITION_MIN, POSITION_MAX, 50.0);
        self.y = clamp_finite(self.y, POSITION_MIN, POSITION_MAX, 50.0);
        self.scale = clamp_finite(self.scale, SCALE_MIN, SCALE_MAX, SCALE_MIN);
        self.rotation = clamp_finite(self.rotation, -ROTATION_LIMIT, ROTATION_LIMIT, 0.0);
        self.opacity = clamp_finite(self.opacity, 0.0, OPACITY_MAX, OPACITY_MAX);
        if let ElementContent::Text(t) = &mut self.content {
            t.font_weight = snap_font_weight(t.font_weight);
            if !t.letter_spacing.is_finite() {
                t.letter_spacing = 0.0;
            }
        }
    }

    /// `true` when every numeric field is inside its range.
    pub fn is_normalized(&self) -> bool {
        let in_range = |v: f64, lo: f64, hi: f64| v.is_finite() && v >= lo && v <= hi;
        let text_ok = self.text().is_none_or(|t| {
            t.letter_spacing.is_finite()
                && (FONT_WEIGHT_MIN..=FONT_WEIGHT_MAX).contains(&t.font_weight)
                && t.font_weight % 100 == 0
        });
        in_range(self.x, POSITION_MIN, POSITION_MAX)
            && in_range(self.y, POSITION_MIN, POSITION_MAX)
            && in_range(self.scale, SCALE_MIN, SCALE_MAX)
            && in_range(self.rotation, -ROTATION_LIMIT, ROTATION_LIMIT)
            && in_range(self.opacity, 0.0, OPACITY_MAX)
            && text_ok
    }
}

fn snap_font_weight(weight: u16) -> u16 {
    let snapped = ((u32::from(weight) + 50) / 100 * 100) as u16;
    snapped.clamp(FONT_WEIGHT_MIN, FONT_WEIGHT_MAX)
}

/// Partial update for [`Layout::update`](crate::Layout::update). `None` leaves a field as is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementPatch {
    /// New center x (percent).
    pub x: Option<f64>,
    /// New center y (percent).
    pub y: Option<f64>,
    /// New scale (percent).
    pub scale: Option<f64>,
    /// New rotation (degrees).
    pub rotation: Option<f64>,
    /// New opacity (percent).
    pub opacity: Option<f64>,
    /// New text template.
    pub template: Option<String>,
    /// New text color.
    pub color: Option<Rgba8>,
    /// New font weight.
    pub font_weight: Option<u16>,
    /// New font family.
    pub font_family: Option<String>,
    /// New letter spacing.
    pub letter_spacing: Option<f64>,
}

impl ElementPatch {
    /// Patch that moves the element center.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that sets only the rotation.
    pub fn rotation(deg: f64) -> Self {
        Self {
            rotation: Some(deg),
            ..Self::default()
        }
    }

    /// Patch that sets only the scale.
    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/element.rs"]
mod tests;
