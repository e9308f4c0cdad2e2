//! Pointer-gesture editing on top of the layout model.

pub(crate) mod gesture;
pub(crate) mod session;
