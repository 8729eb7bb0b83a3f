//! Font lookup by family name or file path with a fallback chain that cannot fail.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use usvg::fontdb;

/// Raw bytes of one font face.
#[derive(Clone, Debug)]
pub struct FontFace {
    /// Family name reported by the font, or the file name when loaded from a path.
    pub family: String,
    /// Complete font file bytes.
    pub data: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
}

/// Result of a font lookup.
#[derive(Clone, Debug)]
pub enum ResolvedFont {
    /// A real outline font.
    Face(Arc<FontFace>),
    /// Built-in block glyphs, used when no font file is available at all.
    Builtin,
}

/// How a lookup was satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontMatch {
    /// The requested family or file.
    Exact,
    /// The generic sans-serif family.
    SansSerif,
    /// Whatever face the database had first.
    AnyFace,
    /// No face available.
    Builtin,
}

/// A font database with system fonts, shared across text rasterization.
///
/// System fonts are scanned once on construction. Lookups are cached per `(name, bold)`.
pub struct FontBook {
    db: fontdb::Database,
    cache: Mutex<HashMap<(String, bool), (ResolvedFont, FontMatch)>>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::with_system_fonts()
    }
}

impl FontBook {
    /// Database populated with the system's installed fonts.
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self::from_database(db)
    }

    /// Database without any fonts. Every family lookup falls through to the built-in face.
    pub fn empty() -> Self {
        Self::from_database(fontdb::Database::new())
    }

    fn from_database(db: fontdb::Database) -> Self {
        Self {
            db,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Add a font file to the database.
    pub fn load_font_file(&mut self, path: &Path) -> std::io::Result<()> {
        self.db.load_font_file(path)
    }

    /// Number of faces in the database.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Resolve `name` to a font. Never fails.
    ///
    /// `name` may be a family name or a path to a font file. Misses fall back to sans-serif, then
    /// to any face, then to [`ResolvedFont::Builtin`], logging a warning at each step.
    pub fn resolve(&self, name: &str, bold: bool) -> (ResolvedFont, FontMatch) {
        let key = (name.to_owned(), bold);
        if let Ok(cache) = self.cache.lock()
            && let Some(hit) = cache.get(&key)
        {
            return hit.clone();
        }
        let resolved = self.resolve_uncached(name, bold);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, resolved.clone());
        }
        resolved
    }

    fn resolve_uncached(&self, name: &str, bold: bool) -> (ResolvedFont, FontMatch) {
        let as_path = Path::new(name);
        if as_path.is_file() {
            match std::fs::read(as_path) {
                Ok(bytes) => {
                    let family = as_path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or(name)
                        .to_owned();
                    return (
                        ResolvedFont::Face(Arc::new(FontFace {
                            family,
                            data: Arc::new(bytes),
                            index: 0,
                        })),
                        FontMatch::Exact,
                    );
                }
                Err(e) => tracing::warn!(font = name, error = %e, "font file unreadable"),
            }
        }

        if let Some(face) = self.query(fontdb::Family::Name(name), bold) {
            return (ResolvedFont::Face(face), FontMatch::Exact);
        }
        if let Some(face) = self.query(fontdb::Family::SansSerif, bold) {
            tracing::warn!(font = name, fallback = %face.family, "font not found, using sans-serif");
            return (ResolvedFont::Face(face), FontMatch::SansSerif);
        }
        if let Some(face) = self.db.faces().next().and_then(|f| self.load(f.id)) {
            tracing::warn!(font = name, fallback = %face.family, "font not found, using first available face");
            return (ResolvedFont::Face(face), FontMatch::AnyFace);
        }
        tracing::warn!(font = name, "no fonts available, using built-in block glyphs");
        (ResolvedFont::Builtin, FontMatch::Builtin)
    }

    fn query(&self, family: fontdb::Family<'_>, bold: bool) -> Option<Arc<FontFace>> {
        let families = [family];
        let query = fontdb::Query {
            families: &families,
            weight: if bold {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            ..fontdb::Query::default()
        };
        let id = self.db.query(&query)?;
        self.load(id)
    }

    fn load(&self, id: fontdb::ID) -> Option<Arc<FontFace>> {
        let family = self
            .db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_default();
        self.db
            .with_face_data(id, |data, index| {
                Arc::new(FontFace {
                    family: family.clone(),
                    data: Arc::new(data.to_vec()),
                    index,
                })
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
