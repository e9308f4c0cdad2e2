//! Recipient data and everything that substitutes it into text.

pub(crate) mod recipient;
pub(crate) mod rules;
pub(crate) mod template;
