use crate::editor::gesture::{
    CanvasBounds, EditorSettings, GestureOutcome, GestureState, PointerTarget, drag_position,
    resize_scale, rotation_towards,
};
use crate::foundation::core::Point;
use crate::foundation::error::BannerResult;
use crate::layout::element::{Element, ElementId, ElementKind, ElementPatch};
use crate::layout::model::Layout;

/// One editing session: the layout being edited, the selection and the active gesture.
///
/// Single-threaded and event driven. Every layout write goes through the [`Layout`] CRUD
/// surface, and at most one gesture is active at a time; pointer-down while a gesture is
/// active is ignored.
#[derive(Debug)]
pub struct Editor {
    layout: Layout,
    bounds: CanvasBounds,
    settings: EditorSettings,
    gesture: GestureState,
    selected: Option<ElementId>,
}

impl Editor {
    /// Start a session with an empty layout.
    pub fn new(bounds: CanvasBounds, settings: EditorSettings) -> Self {
        Self::with_layout(Layout::new(), bounds, settings)
    }

    /// Start a session on an existing layout.
    pub fn with_layout(layout: Layout, bounds: CanvasBounds, settings: EditorSettings) -> Self {
        Self {
            layout,
            bounds,
            settings,
            gesture: GestureState::Idle,
            selected: None,
        }
    }

    /// Current layout (read-only).
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Copy of the layout, e.g. to hand to a batch while editing continues.
    pub fn snapshot(&self) -> Layout {
        self.layout.clone()
    }

    /// End the session, returning the layout.
    pub fn into_layout(self) -> Layout {
        self.layout
    }

    /// Current canvas bounds.
    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    /// Update the canvas bounds (window resize, scroll). Takes effect on the next event.
    pub fn set_bounds(&mut self, bounds: CanvasBounds) {
        self.bounds = bounds;
    }

    /// Active gesture.
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Selected element id.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Selected element.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.layout.get(id))
    }

    /// Select `id` (or clear with `None`). Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected = id.filter(|id| self.layout.get(*id).is_some());
    }

    /// Add an element on top and select it.
    pub fn add(&mut self, kind: ElementKind) -> ElementId {
        let id = self.layout.add(kind).id;
        self.selected = Some(id);
        id
    }

    /// Inspector-style field edit.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> BannerResult<&Element> {
        self.layout.update(id, patch)
    }

    /// Remove an element. Clears the selection and any gesture that referenced it.
    pub fn remove(&mut self, id: ElementId) -> BannerResult<Element> {
        let removed = self.layout.remove(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.gesture.target() == Some(id) {
            self.gesture = GestureState::Idle;
        }
        Ok(removed)
    }

    /// Move an element to a new compositing index.
    pub fn reorder(&mut self, id: ElementId, new_index: usize) -> BannerResult<()> {
        self.layout.reorder(id, new_index)
    }

    /// Pointer pressed on `target` at screen position `pos`.
    pub fn pointer_down(&mut self, target: PointerTarget, pos: Point) -> GestureOutcome {
        if self.gesture.is_active() {
            tracing::trace!(?target, "pointer-down ignored, gesture already active");
            return GestureOutcome::Ignored;
        }

        let id = match target {
            PointerTarget::Canvas => {
                self.selected = None;
                return GestureOutcome::Ignored;
            }
            PointerTarget::Body(id)
            | PointerTarget::RotateHandle(id)
            | PointerTarget::ResizeHandle(id) => id,
        };
        let Some(el) = self.layout.get(id) else {
            return GestureOutcome::Ignored;
        };

        self.gesture = match target {
            PointerTarget::Body(_) => GestureState::Dragging {
                id,
                start: pos,
                origin_x: el.x,
                origin_y: el.y,
                moving: false,
            },
            PointerTarget::RotateHandle(_) => GestureState::Rotating { id },
            PointerTarget::ResizeHandle(_) => GestureState::Resizing {
                id,
                start: pos,
                start_scale: el.scale,
            },
            PointerTarget::Canvas => GestureState::Idle,
        };
        self.selected = Some(id);
        GestureOutcome::Started
    }

    /// Pointer moved to `pos`. Mutates the gesture target in place.
    pub fn pointer_move(&mut self, pos: Point) -> GestureOutcome {
        let patch = match &mut self.gesture {
            GestureState::Idle => return GestureOutcome::Ignored,
            GestureState::Dragging {
                start,
                origin_x,
                origin_y,
                moving,
                ..
            } => {
                if !*moving {
                    let travel = (pos.x - start.x).hypot(pos.y - start.y);
                    if travel <= self.settings.drag_threshold_px {
                        return GestureOutcome::Ignored;
                    }
                    *moving = true;
                }
                let (x, y) = drag_position(&self.bounds, (*origin_x, *origin_y), *start, pos);
                ElementPatch::position(x, y)
            }
            GestureState::Rotating { id } => {
                let Some(el) = self.layout.get(*id) else {
                    return GestureOutcome::Ignored;
                };
                let center = self.bounds.center_of(el);
                ElementPatch::rotation(rotation_towards(center, pos))
            }
            GestureState::Resizing {
                start, start_scale, ..
            } => ElementPatch::scale(resize_scale(&self.bounds, *start_scale, *start, pos)),
        };

        let Some(id) = self.gesture.target() else {
            return GestureOutcome::Ignored;
        };
        match self.layout.update(id, &patch) {
            Ok(_) => GestureOutcome::Updated,
            Err(_) => GestureOutcome::Ignored,
        }
    }

    /// Pointer released. Ends the active gesture, if any.
    pub fn pointer_up(&mut self) -> GestureOutcome {
        match std::mem::replace(&mut self.gesture, GestureState::Idle) {
            GestureState::Idle => GestureOutcome::Ignored,
            _ => GestureOutcome::Ended,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
