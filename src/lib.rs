//! Bannerforge composes personalized banners: logo and text overlays placed on a base image,
//! rendered once per recipient.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: a [`Layout`] (ordered overlay elements, positions in canvas percent) is built
//!    through its CRUD surface or interactively through an [`Editor`], which turns pointer
//!    gestures (drag, rotate, resize) into clamped element updates.
//! 2. **Render**: a [`Renderer`] composites `Layout + base image + Recipient` into pixels
//!    ([`FrameRGBA`]) with placeholders such as `{{shopName}}` substituted.
//! 3. **Batch**: a [`BatchGenerator`] renders every recipient on a bounded worker pool and
//!    returns one [`RenderOutcome`] per recipient, in input order.
//! 4. **Export**: successful banners are written with [`write_outputs`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same layout, base image and recipient render to identical pixels.
//! - **No IO in the renderer** beyond the [`AssetSource`] passed in by the caller.
//! - **Always in range**: element fields are clamped at every write, never stored invalid.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod editor;
mod foundation;
mod layout;
mod personalize;
mod render;

pub use assets::decode::{
    LogoImage, MAX_IMAGE_SIDE, PreparedImage, decode_image, decode_logo, is_svg, parse_svg,
    rasterize_svg,
};
pub use assets::fonts::{FontBook, FontSettings, ResolvedFace};
pub use assets::source::{AssetSource, FsAssetSource, MemoryAssetSource, normalize_rel_path};
pub use assets::text::{ShapedText, TextBrushRgba8, TextLayoutEngine, TextRequest};
pub use editor::gesture::{
    CanvasBounds, EditorSettings, GestureOutcome, GestureState, PointerTarget,
};
pub use editor::session::Editor;
pub use foundation::config::{BannerConfig, ENV_FONT_DIR, ENV_THREADS, default_config_path};
pub use foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{BannerError, BannerResult};
pub use foundation::logging::{LoggingConfig, init_default_logging, init_logging};
pub use layout::element::{
    Element, ElementContent, ElementId, ElementKind, ElementPatch, FONT_WEIGHT_MAX,
    FONT_WEIGHT_MIN, OPACITY_MAX, POSITION_MAX, POSITION_MIN, ROTATION_LIMIT, SCALE_MAX,
    SCALE_MIN, TextStyle,
};
pub use layout::model::Layout;
pub use personalize::recipient::{Recipient, RecipientRecord, RecipientStatus, active_recipients};
pub use personalize::rules::{EMPTY_RULES_MESSAGE, describe_layout};
pub use personalize::template::{MessageTemplate, PersonalizedMessage, Placeholder, personalize};
pub use render::batch::{
    BatchGenerator, BatchReport, BatchSettings, CancelToken, FailureReason, OutcomeSummary,
    RenderFailure, RenderOutcome,
};
pub use render::compositor::{
    DEFAULT_FONT_DIVISOR, MAX_SVG_RASTER_SIDE, MissingLogoPolicy, RenderSettings, Renderer,
};
pub use render::export::{archive_file_name, write_outputs, write_report};
pub use render::frame::FrameRGBA;
