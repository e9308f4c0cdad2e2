//! Gesture state and the pure geometry that turns pointer positions into element fields.
//!
//! All pointer positions are screen pixels in the same space as [`CanvasBounds`].

use serde::{Deserialize, Serialize};

use crate::foundation::core::Point;
use crate::foundation::error::{BannerError, BannerResult};
use crate::foundation::math::wrap_degrees;
use crate::layout::element::{Element, ElementId, POSITION_MAX, POSITION_MIN, SCALE_MAX, SCALE_MIN};

/// On-screen bounding box of the canvas the operator is editing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    /// Left edge in screen pixels.
    pub left: f64,
    /// Top edge in screen pixels.
    pub top: f64,
    /// Width in screen pixels (> 0).
    pub width: f64,
    /// Height in screen pixels (> 0).
    pub height: f64,
}

impl CanvasBounds {
    /// Validated bounds; width and height must be finite and positive.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> BannerResult<Self> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !(left.is_finite() && top.is_finite() && ok(width) && ok(height)) {
            return Err(BannerError::validation(format!(
                "canvas bounds must be finite with positive size, got {width}x{height} at ({left}, {top})"
            )));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// Bounds anchored at the screen origin.
    pub fn sized(width: f64, height: f64) -> BannerResult<Self> {
        Self::new(0.0, 0.0, width, height)
    }

    /// Screen position of an element center.
    pub fn center_of(&self, el: &Element) -> Point {
        Point::new(
            self.left + el.x / 100.0 * self.width,
            self.top + el.y / 100.0 * self.height,
        )
    }
}

/// What the pointer went down on. Hit testing against handles is the caller's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// Element body.
    Body(ElementId),
    /// The rotate handle of an element.
    RotateHandle(ElementId),
    /// The resize handle of an element.
    ResizeHandle(ElementId),
    /// Empty canvas.
    Canvas,
}

/// The single active gesture, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No gesture.
    #[default]
    Idle,
    /// Pointer went down on a body. Movement applies once `moving` is set.
    Dragging {
        /// Element being moved.
        id: ElementId,
        /// Pointer position at pointer-down.
        start: Point,
        /// Element `x` at pointer-down.
        origin_x: f64,
        /// Element `y` at pointer-down.
        origin_y: f64,
        /// Pointer travelled beyond the drag threshold.
        moving: bool,
    },
    /// Rotate handle held.
    Rotating {
        /// Element being rotated.
        id: ElementId,
    },
    /// Resize handle held.
    Resizing {
        /// Element being scaled.
        id: ElementId,
        /// Pointer position at pointer-down.
        start: Point,
        /// Element scale at pointer-down.
        start_scale: f64,
    },
}

impl GestureState {
    /// `true` unless [`GestureState::Idle`].
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Element targeted by the active gesture.
    pub fn target(&self) -> Option<ElementId> {
        match *self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Rotating { id } | Self::Resizing { id, .. } => {
                Some(id)
            }
        }
    }
}

/// Result of feeding one pointer event to the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// A gesture began.
    Started,
    /// The target element was mutated.
    Updated,
    /// The active gesture finished.
    Ended,
    /// The event had no effect on the layout or gesture state.
    Ignored,
}

/// Editor tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Pointer travel (screen pixels) before a body press turns into a drag.
    pub drag_threshold_px: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            drag_threshold_px: 3.0,
        }
    }
}

/// New center for a drag: start position plus total pointer delta in canvas percent.
pub(crate) fn drag_position(
    bounds: &CanvasBounds,
    origin: (f64, f64),
    start: Point,
    pointer: Point,
) -> (f64, f64) {
    let x = origin.0 + (pointer.x - start.x) / bounds.width * 100.0;
    let y = origin.1 + (pointer.y - start.y) / bounds.height * 100.0;
    (
        x.clamp(POSITION_MIN, POSITION_MAX),
        y.clamp(POSITION_MIN, POSITION_MAX),
    )
}

/// Rotation that points the handle (resting straight above the center) at the pointer.
pub(crate) fn rotation_towards(center: Point, pointer: Point) -> f64 {
    let deg = (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees() + 90.0;
    wrap_degrees(deg)
}

/// Scale from straight-line pointer travel; the sign is positive when the pointer ended right
/// of or below where it started.
pub(crate) fn resize_scale(
    bounds: &CanvasBounds,
    start_scale: f64,
    start: Point,
    pointer: Point,
) -> f64 {
    let dx = pointer.x - start.x;
    let dy = pointer.y - start.y;
    let sign = if pointer.x > start.x || pointer.y > start.y {
        1.0
    } else {
        -1.0
    };
    let scale = start_scale + dx.hypot(dy) / bounds.width * 100.0 * sign;
    scale.clamp(SCALE_MIN, SCALE_MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/editor/gesture.rs"]
mod tests;
