//! Normalized, resolution-independent overlay model.

pub(crate) mod element;
pub(crate) mod model;
