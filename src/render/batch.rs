use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assets::decode::{PreparedImage, decode_image};
use crate::assets::fonts::FontBook;
use crate::assets::source::AssetSource;
use crate::foundation::error::{BannerError, BannerResult};
use crate::layout::model::Layout;
use crate::personalize::recipient::Recipient;
use crate::render::compositor::{RenderSettings, Renderer};

/// Worker pool sizing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Number of render threads (>= 1).
    pub threads: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self { threads: 16 }
    }
}

/// Shared flag that stops a batch from starting further renders.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, not abandoned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop issuing renders. Renders already running still finish.
    pub fn abandon(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// `true` once [`abandon`](Self::abandon) was called.
    pub fn is_abandoned(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Why one recipient produced no banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The layout needs a logo the recipient does not have.
    MissingLogo,
    /// A logo (or the base image) could not be decoded.
    AssetDecode,
    /// The batch was abandoned before this recipient started.
    Abandoned,
    /// Anything else (fonts, IO, encoding).
    Other,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingLogo => "missing_logo",
            Self::AssetDecode => "asset_decode",
            Self::Abandoned => "abandoned",
            Self::Other => "other",
        })
    }
}

/// Per-recipient failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderFailure {
    /// Failure tag.
    pub reason: FailureReason,
    /// Human-readable detail.
    pub message: String,
}

impl From<BannerError> for RenderFailure {
    fn from(err: BannerError) -> Self {
        let reason = match &err {
            BannerError::MissingLogo(_) => FailureReason::MissingLogo,
            BannerError::AssetDecode(_) => FailureReason::AssetDecode,
            _ => FailureReason::Other,
        };
        Self {
            reason,
            message: err.to_string(),
        }
    }
}

/// Result for one recipient: PNG bytes or a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Recipient the result belongs to.
    pub recipient_id: String,
    /// Encoded banner or failure.
    pub result: Result<Vec<u8>, RenderFailure>,
}

impl RenderOutcome {
    /// `true` for a rendered banner.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Encoded PNG, when rendered.
    pub fn png(&self) -> Option<&[u8]> {
        self.result.as_ref().ok().map(Vec::as_slice)
    }

    /// Failure, when not rendered.
    pub fn failure(&self) -> Option<&RenderFailure> {
        self.result.as_ref().err()
    }
}

/// UI-facing summary row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeSummary {
    /// Recipient id.
    pub recipient_id: String,
    /// Whether a banner was produced.
    pub success: bool,
    /// Failure tag, when not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<FailureReason>,
    /// Failure detail, when not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// All outcomes of one batch, in recipient input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One entry per input recipient.
    pub outcomes: Vec<RenderOutcome>,
}

impl BatchReport {
    /// Count of rendered banners.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Count of failures (abandoned items included).
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Summary rows for reporting.
    pub fn summary(&self) -> Vec<OutcomeSummary> {
        self.outcomes
            .iter()
            .map(|o| OutcomeSummary {
                recipient_id: o.recipient_id.clone(),
                success: o.is_success(),
                error_reason: o.failure().map(|f| f.reason),
                message: o.failure().map(|f| f.message.clone()),
            })
            .collect()
    }
}

/// Renders one banner per recipient on a bounded worker pool.
///
/// The pool is created once and reused across batches. Each worker owns its own [`Renderer`];
/// the layout, base image, fonts and asset source are shared read-only.
pub struct BatchGenerator {
    fonts: Arc<FontBook>,
    render: RenderSettings,
    pool: rayon::ThreadPool,
}

impl BatchGenerator {
    /// Build the worker pool.
    pub fn new(
        fonts: Arc<FontBook>,
        render: RenderSettings,
        batch: &BatchSettings,
    ) -> BannerResult<Self> {
        Ok(Self {
            fonts,
            render,
            pool: build_thread_pool(batch.threads)?,
        })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Decode the base image, then render every recipient.
    ///
    /// An undecodable base image fails the whole batch before any recipient is processed; every
    /// other failure is captured per recipient.
    pub fn generate(
        &self,
        layout: &Layout,
        base_bytes: &[u8],
        recipients: &[Recipient],
        assets: &dyn AssetSource,
        cancel: &CancelToken,
    ) -> BannerResult<BatchReport> {
        let base = decode_image(base_bytes)?;
        Ok(self.generate_prepared(layout, &base, recipients, assets, cancel))
    }

    /// Render every recipient against an already decoded base image. Never fails as a whole.
    #[tracing::instrument(level = "info", skip_all, fields(recipients = recipients.len()))]
    pub fn generate_prepared(
        &self,
        layout: &Layout,
        base: &PreparedImage,
        recipients: &[Recipient],
        assets: &dyn AssetSource,
        cancel: &CancelToken,
    ) -> BatchReport {
        tracing::info!(
            elements = layout.len(),
            threads = self.threads(),
            "batch started"
        );

        let outcomes = self.pool.install(|| {
            recipients
                .par_iter()
                .map_init(
                    || Renderer::new(Arc::clone(&self.fonts), self.render.clone()),
                    |renderer, recipient| -> RenderOutcome {
                        let result = if cancel.is_abandoned() {
                            Err(RenderFailure {
                                reason: FailureReason::Abandoned,
                                message: "batch abandoned before render started".to_string(),
                            })
                        } else {
                            renderer
                                .render_frame(layout, base, recipient, assets)
                                .and_then(|frame| frame.encode_png())
                                .map_err(RenderFailure::from)
                        };
                        if let Err(f) = &result {
                            tracing::warn!(
                                recipient = %recipient.id,
                                reason = %f.reason,
                                "{}",
                                f.message
                            );
                        }
                        RenderOutcome {
                            recipient_id: recipient.id.clone(),
                            result,
                        }
                    },
                )
                .collect::<Vec<_>>()
        });

        let report = BatchReport { outcomes };
        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch finished"
        );
        report
    }
}

fn build_thread_pool(threads: usize) -> BannerResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(BannerError::validation("batch 'threads' must be >= 1"));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("bannerforge-render-{i}"))
        .build()
        .map_err(|e| BannerError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
