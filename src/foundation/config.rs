use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::assets::fonts::FontSettings;
use crate::editor::gesture::EditorSettings;
use crate::foundation::error::{BannerError, BannerResult};
use crate::foundation::logging::LoggingConfig;
use crate::render::batch::BatchSettings;
use crate::render::compositor::RenderSettings;

/// Env var overriding [`BatchSettings::threads`].
pub const ENV_THREADS: &str = "BANNERFORGE_THREADS";
/// Env var adding one font directory.
pub const ENV_FONT_DIR: &str = "BANNERFORGE_FONT_DIR";

/// Whole-process configuration, loaded once at startup.
///
/// Every section defaults independently, so a file may contain only the keys it changes:
///
/// ```json
/// { "batch": { "threads": 4 }, "render": { "missing_logo": "omit_element" } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    /// Compositor settings.
    pub render: RenderSettings,
    /// Worker pool settings.
    pub batch: BatchSettings,
    /// Gesture editor settings.
    pub editor: EditorSettings,
    /// Font sources.
    pub fonts: FontSettings,
    /// Logging setup.
    pub logging: LoggingConfig,
}

impl BannerConfig {
    /// Load configuration.
    ///
    /// With `path`, the file must exist and parse. Without, the standard location is tried and
    /// defaults are used when it is absent or unreadable.
    pub fn load(path: Option<&Path>) -> BannerResult<Self> {
        let config = match path {
            Some(p) => Self::from_path(p)?,
            None => match default_config_path() {
                Some(p) if p.is_file() => Self::from_path(&p).unwrap_or_else(|e| {
                    tracing::warn!(path = %p.display(), error = %e, "ignoring config file");
                    Self::default()
                }),
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse one JSON file.
    pub fn from_path(path: &Path) -> BannerResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        serde_json::from_str(&text).map_err(|e| {
            BannerError::validation(format!("config '{}': {e}", path.display()))
        })
    }

    /// Apply `BANNERFORGE_*` environment overrides.
    pub fn apply_env(&mut self) -> BannerResult<()> {
        self.apply_overrides(
            std::env::var(ENV_THREADS).ok().as_deref(),
            std::env::var_os(ENV_FONT_DIR).map(PathBuf::from),
        )
    }

    fn apply_overrides(&mut self, threads: Option<&str>, font_dir: Option<PathBuf>) -> BannerResult<()> {
        if let Some(raw) = threads {
            let n: usize = raw.trim().parse().map_err(|_| {
                BannerError::validation(format!("{ENV_THREADS} must be a positive integer, got \"{raw}\""))
            })?;
            self.batch.threads = n;
        }
        if let Some(dir) = font_dir {
            self.fonts.dirs.push(dir);
        }
        self.validate()
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> BannerResult<()> {
        if self.batch.threads == 0 {
            return Err(BannerError::validation("batch.threads must be >= 1"));
        }
        if !(self.render.font_divisor.is_finite() && self.render.font_divisor > 0.0) {
            return Err(BannerError::validation(
                "render.font_divisor must be finite and > 0",
            ));
        }
        if !(self.editor.drag_threshold_px.is_finite() && self.editor.drag_threshold_px >= 0.0) {
            return Err(BannerError::validation(
                "editor.drag_threshold_px must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/bannerforge/config.json`, falling back to `$HOME/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("bannerforge").join("config.json"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
