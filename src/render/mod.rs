//! Compositing, batch generation and output export.

pub(crate) mod batch;
pub(crate) mod compositor;
pub(crate) mod export;
pub(crate) mod frame;
