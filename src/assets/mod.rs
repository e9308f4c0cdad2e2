//! Asset access, decoding, fonts and text shaping.
//!
//! IO happens only through [`AssetSource`](source::AssetSource); everything else here works on
//! bytes already in memory.

pub(crate) mod decode;
pub(crate) mod fonts;
pub(crate) mod source;
pub(crate) mod text;
