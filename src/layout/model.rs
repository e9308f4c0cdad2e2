use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{BannerError, BannerResult};
use crate::layout::element::{Element, ElementId, ElementKind, ElementPatch};

/// Ordered overlay collection. Index 0 is drawn first (bottom-most).
///
/// Every mutation goes through [`add`](Self::add), [`update`](Self::update),
/// [`remove`](Self::remove) or [`reorder`](Self::reorder); each keeps all element fields inside
/// their documented ranges. Unknown ids are reported as [`BannerError::NotFound`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayoutDef")]
pub struct Layout {
    elements: Vec<Element>,
    #[serde(skip)]
    next_id: u64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutDef {
    #[serde(default)]
    elements: Vec<Element>,
}

impl TryFrom<LayoutDef> for Layout {
    type Error = BannerError;

    fn try_from(def: LayoutDef) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(def.elements.len());
        let mut elements = def.elements;
        for el in &mut elements {
            if !seen.insert(el.id) {
                return Err(BannerError::validation(format!(
                    "duplicate element id {}",
                    el.id
                )));
            }
            el.normalize();
        }
        let next_id = elements
            .iter()
            .map(|e| e.id.as_u64() + 1)
            .max()
            .unwrap_or(0);
        Ok(Self { elements, next_id })
    }
}

impl Layout {
    /// Empty layout, as created when an editing session starts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a layout from JSON, normalizing every element.
    pub fn from_json_str(s: &str) -> BannerResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| BannerError::validation(format!("layout json: {e}")))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> BannerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BannerError::Other(e.into()))
    }

    /// Append a new element with kind defaults; it becomes the top-most layer.
    pub fn add(&mut self, kind: ElementKind) -> &Element {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(Element::with_defaults(id, kind));
        tracing::debug!(%id, ?kind, "element added");
        &self.elements[self.elements.len() - 1]
    }

    /// Merge `patch` into element `id` and re-clamp.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> BannerResult<&Element> {
        let idx = self.require_index(id)?;
        let el = &mut self.elements[idx];
        el.apply(patch);
        Ok(el)
    }

    /// Remove element `id`, returning it.
    pub fn remove(&mut self, id: ElementId) -> BannerResult<Element> {
        let idx = self.require_index(id)?;
        tracing::debug!(%id, "element removed");
        Ok(self.elements.remove(idx))
    }

    /// Move element `id` to `new_index` (clamped to the last position). Other elements keep
    /// their relative order.
    pub fn reorder(&mut self, id: ElementId, new_index: usize) -> BannerResult<()> {
        let idx = self.require_index(id)?;
        let target = new_index.min(self.elements.len() - 1);
        if idx != target {
            let el = self.elements.remove(idx);
            self.elements.insert(target, el);
        }
        Ok(())
    }

    /// Look up an element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Compositing position of `id`.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Elements in compositing order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Iterate in compositing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true` when no element exists.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// `true` when at least one logo element exists.
    pub fn has_logo(&self) -> bool {
        self.elements.iter().any(|e| e.kind() == ElementKind::Logo)
    }

    fn require_index(&self, id: ElementId) -> BannerResult<usize> {
        self.index_of(id)
            .ok_or_else(|| BannerError::not_found(format!("element {id}")))
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
