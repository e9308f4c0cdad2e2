use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use usvg::fontdb;

/// Where fonts come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FontSettings {
    /// Load the fonts installed on the host.
    pub system_fonts: bool,
    /// Extra directories scanned (non-recursively) for `.ttf`, `.otf` and `.ttc` files.
    pub dirs: Vec<PathBuf>,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            system_fonts: true,
            dirs: Vec::new(),
        }
    }
}

/// A face picked by [`FontBook::resolve`].
#[derive(Clone, Debug)]
pub struct ResolvedFace {
    /// Database id, stable for the lifetime of the book.
    pub id: fontdb::ID,
    /// Primary family name of the face.
    pub family: String,
    /// Raw font file bytes.
    pub data: Arc<Vec<u8>>,
    /// Face index inside `data` (non-zero for collections).
    pub index: u32,
}

/// Font database built once at startup and shared across render workers.
#[derive(Clone, Debug)]
pub struct FontBook {
    db: Arc<fontdb::Database>,
}

impl FontBook {
    /// Build from settings.
    pub fn new(settings: &FontSettings) -> Self {
        let mut db = fontdb::Database::new();
        if settings.system_fonts {
            db.load_system_fonts();
        }
        for dir in &settings.dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font book ready");
        Self { db: Arc::new(db) }
    }

    /// Book without any face; text elements fail with [`BannerError::Font`](crate::BannerError).
    pub fn empty() -> Self {
        Self {
            db: Arc::new(fontdb::Database::new()),
        }
    }

    /// Book over in-memory font files.
    pub fn from_fonts(fonts: impl IntoIterator<Item = Vec<u8>>) -> Self {
        let mut db = fontdb::Database::new();
        for data in fonts {
            db.load_font_data(data);
        }
        Self { db: Arc::new(db) }
    }

    /// Number of loaded faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// `true` when no face is loaded.
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Best face id for `family` at `weight`: the requested family, then the generic
    /// sans-serif family, then any face at all. Does not touch font bytes.
    pub fn resolve_id(&self, family: &str, weight: u16) -> Option<fontdb::ID> {
        let families = [fontdb::Family::Name(family), fontdb::Family::SansSerif];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight(weight),
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        self.db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|f| f.id))
    }

    /// Load the face behind `id`, copying its font file bytes.
    pub fn face(&self, id: fontdb::ID) -> Option<ResolvedFace> {
        let face = self.db.face(id)?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))?;
        Some(ResolvedFace {
            id,
            family,
            data: Arc::new(data),
            index,
        })
    }

    /// [`resolve_id`](Self::resolve_id) followed by [`face`](Self::face).
    pub fn resolve(&self, family: &str, weight: u16) -> Option<ResolvedFace> {
        self.face(self.resolve_id(family, weight)?)
    }

    /// `usvg` options sharing this book, for parsing SVG logos that contain text.
    pub fn svg_options(&self) -> usvg::Options<'static> {
        usvg::Options {
            fontdb: Arc::clone(&self.db),
            font_resolver: make_svg_font_resolver(),
            ..Default::default()
        }
    }
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping font file");
        }
    }
}

fn make_svg_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, db| {
            let mut families = Vec::<fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => fontdb::Family::Name(s),
                });
            }
            families.push(fontdb::Family::SansSerif);

            let query = fontdb::Query {
                families: &families,
                weight: fontdb::Weight(font.weight()),
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            };
            db.query(&query).or_else(|| db.faces().next().map(|f| f.id))
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
