use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Serif,
    Sans,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub family: FontFamily,
    pub face: FontFace,
    pub size: f32,
    pub letter_spacing: f32,
}

impl FontSpec {
    pub fn new(family: FontFamily, face: FontFace, size: f32) -> Self {
        Self {
            family,
            face,
            size,
            letter_spacing: 0.0,
        }
    }

    pub fn with_letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// Rendered width of a string in a given font.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// Font file locations for each family and face.
#[derive(Debug, Clone, Default)]
pub struct FontPaths {
    pub serif_regular: Option<PathBuf>,
    pub serif_bold: Option<PathBuf>,
    pub serif_italic: Option<PathBuf>,
    pub sans_regular: Option<PathBuf>,
    pub sans_bold: Option<PathBuf>,
}

const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/Library/Fonts",
    "C:\\Windows\\Fonts",
];

impl FontPaths {
    /// Fill unset slots with DejaVu fonts found in common system locations.
    pub fn with_system_fallbacks(mut self) -> Self {
        let probe = |name: &str| -> Option<PathBuf> {
            SYSTEM_FONT_DIRS
                .iter()
                .map(|dir| Path::new(dir).join(name))
                .find(|path| path.is_file())
        };
        self.serif_regular = self.serif_regular.or_else(|| probe("DejaVuSerif.ttf"));
        self.serif_bold = self.serif_bold.or_else(|| probe("DejaVuSerif-Bold.ttf"));
        self.serif_italic = self
            .serif_italic
            .or_else(|| probe("DejaVuSerif-Italic.ttf"));
        self.sans_regular = self.sans_regular.or_else(|| probe("DejaVuSans.ttf"));
        self.sans_bold = self.sans_bold.or_else(|| probe("DejaVuSans-Bold.ttf"));
        self
    }
}

struct LoadedFace {
    family: FontFamily,
    face: FontFace,
    font: fontdue::Font,
}

/// Loaded fonts used by the card renderer, with face fallback: a missing
/// bold or italic face falls back to the regular face of the same family,
/// and a missing family falls back to whatever loaded first.
pub struct FontBook {
    faces: Vec<LoadedFace>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.faces.len())
            .finish()
    }
}

impl FontBook {
    pub fn load(paths: &FontPaths) -> Result<Self, RenderError> {
        let slots = [
            (FontFamily::Serif, FontFace::Regular, &paths.serif_regular),
            (FontFamily::Serif, FontFace::Bold, &paths.serif_bold),
            (FontFamily::Serif, FontFace::Italic, &paths.serif_italic),
            (FontFamily::Sans, FontFace::Regular, &paths.sans_regular),
            (FontFamily::Sans, FontFace::Bold, &paths.sans_bold),
        ];

        let mut faces = Vec::new();
        for (family, face, path) in slots {
            let Some(path) = path else { continue };
            match load_font(path) {
                Ok(font) => {
                    debug!(path = %path.display(), ?family, ?face, "font loaded");
                    faces.push(LoadedFace { family, face, font });
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping font"),
            }
        }

        if faces.is_empty() {
            return Err(RenderError::FontUnavailable(
                "no usable font file found".into(),
            ));
        }
        Ok(Self { faces })
    }

    pub fn font(&self, spec: &FontSpec) -> &fontdue::Font {
        let exact = self
            .faces
            .iter()
            .find(|f| f.family == spec.family && f.face == spec.face);
        let same_family = || {
            self.faces
                .iter()
                .find(|f| f.family == spec.family && f.face == FontFace::Regular)
                .or_else(|| self.faces.iter().find(|f| f.family == spec.family))
        };
        &exact.or_else(same_family).unwrap_or(&self.faces[0]).font
    }
}

fn load_font(path: &Path) -> Result<fontdue::Font, RenderError> {
    let bytes = std::fs::read(path)
        .map_err(|e| RenderError::FontUnavailable(format!("{}: {}", path.display(), e)))?;
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| RenderError::FontUnavailable(format!("{}: {}", path.display(), e)))
}

impl TextMeasurer for FontBook {
    fn measure(&self, text: &str, spec: &FontSpec) -> f32 {
        let font = self.font(spec);
        let mut width = 0.0;
        let mut previous: Option<char> = None;
        for ch in text.chars() {
            if let Some(prev) = previous {
                width += font.horizontal_kern(prev, ch, spec.size).unwrap_or(0.0);
            }
            width += font.metrics(ch, spec.size).advance_width + spec.letter_spacing;
            previous = Some(ch);
        }
        width
    }
}

/// Deterministic measurer: every char advances `size * ratio + letter_spacing`.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedAdvance {
    pub ratio: f32,
}

#[cfg(test)]
impl Default for FixedAdvance {
    fn default() -> Self {
        Self { ratio: 0.5 }
    }
}

#[cfg(test)]
impl TextMeasurer for FixedAdvance {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * (font.size * self.ratio + font.letter_spacing)
    }
}
