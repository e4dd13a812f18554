//! Shareable result card: a 1080x1920 PNG composed from the final score.
//!
//! Composition is expressed against the [`Canvas`] trait and a
//! [`TextMeasurer`], so the layering order and text layout can be checked
//! without a font rasterizer.

pub mod canvas;
pub mod layout;
pub mod measure;
pub mod share;

use tracing::debug;

use crate::content;
use crate::error::{QuizError, RenderError};
use crate::models::QuizResult;
use crate::tier::{self, ResultTier};
use canvas::{Bounds, Canvas, Rgba, SkiaCanvas};
use layout::{FitRule, fit_font_size, place_lines, wrap_words};
use measure::{FontBook, FontFace, FontFamily, FontSpec, TextMeasurer};

pub use share::{ExportOutcome, ResultExporter, ShareGate, ShareTicket};

pub const CARD_WIDTH: u32 = 1080;
pub const CARD_HEIGHT: u32 = 1920;
const CENTER_X: f32 = 540.0;

const NAVY: Rgba = Rgba::rgb(0x0B, 0x23, 0x41);
const DARK_NAVY: Rgba = Rgba::rgb(0x05, 0x11, 0x21);
const GOLD: Rgba = Rgba::rgb(0xC5, 0xA5, 0x72);
const LIGHT_GOLD: Rgba = Rgba::rgb(0xE5, 0xC5, 0x92);
const WHITE: Rgba = Rgba::rgb(0xFF, 0xFF, 0xFF);
const BODY_GREY: Rgba = Rgba::rgb(0xDD, 0xDD, 0xDD);

const BORDER: Bounds = Bounds::new(40.0, 40.0, 1000.0, 1840.0);
const BORDER_WIDTH: f32 = 20.0;

const BADGE_CENTER: (f32, f32) = (540.0, 600.0);
const BADGE_RADIUS: f32 = 200.0;
const BADGE_STROKE: f32 = 10.0;

pub const TITLE_FIT: FitRule = FitRule {
    start_size: 90.0,
    step: 5.0,
    floor: 30.0,
    max_width: 900.0,
};
const TITLE_BASELINE: f32 = 1000.0;

pub const BODY_MAX_WIDTH: f32 = 800.0;
const BODY_FIRST_BASELINE: f32 = 1150.0;
const BODY_LINE_HEIGHT: f32 = 60.0;

const CTA_BOX: Bounds = Bounds::new(140.0, 1550.0, 800.0, 250.0);
const CTA_RADIUS: f32 = 20.0;

fn serif(face: FontFace, size: f32) -> FontSpec {
    FontSpec::new(FontFamily::Serif, face, size)
}

fn sans(face: FontFace, size: f32) -> FontSpec {
    FontSpec::new(FontFamily::Sans, face, size)
}

pub fn title_font(size: f32) -> FontSpec {
    serif(FontFace::Bold, size)
}

pub fn body_font() -> FontSpec {
    serif(FontFace::Italic, 40.0)
}

/// What goes on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultCard {
    pub score: usize,
    pub total: usize,
    pub tier: ResultTier,
}

impl ResultCard {
    pub fn from_result(result: &QuizResult) -> Result<Self, QuizError> {
        Ok(Self {
            score: result.score,
            total: result.total,
            tier: tier::tier(result.score, result.total)?,
        })
    }

    pub fn share_caption(&self) -> String {
        content::share_caption(self.score, self.total)
    }
}

/// Draw the card onto `canvas`. Later steps paint over earlier ones.
pub fn compose_card(
    canvas: &mut dyn Canvas,
    measurer: &dyn TextMeasurer,
    card: &ResultCard,
) -> Result<(), RenderError> {
    canvas.fill_gradient(
        (0.0, 0.0),
        (CARD_WIDTH as f32, CARD_HEIGHT as f32),
        NAVY,
        DARK_NAVY,
    )?;

    canvas.stroke_rect(BORDER, GOLD, BORDER_WIDTH)?;

    canvas.fill_text(
        content::BRAND_NAME,
        &serif(FontFace::Bold, 50.0),
        GOLD,
        CENTER_X,
        200.0,
    )?;
    canvas.fill_text(
        content::BRAND_TAGLINE,
        &sans(FontFace::Regular, 30.0).with_letter_spacing(10.0),
        LIGHT_GOLD,
        CENTER_X,
        250.0,
    )?;

    canvas.stroke_circle(BADGE_CENTER, BADGE_RADIUS, GOLD, BADGE_STROKE)?;
    canvas.fill_circle(BADGE_CENTER, BADGE_RADIUS, GOLD.with_alpha(0.1))?;

    canvas.fill_text(
        &format!("{}/{}", card.score, card.total),
        &serif(FontFace::Bold, 180.0),
        WHITE,
        CENTER_X,
        620.0,
    )?;
    canvas.fill_text(
        content::SCORE_CAPTION,
        &sans(FontFace::Regular, 40.0),
        GOLD,
        CENTER_X,
        720.0,
    )?;

    let title = card.tier.title().to_uppercase();
    let title_size = fit_font_size(measurer, &title, title_font(TITLE_FIT.start_size), TITLE_FIT);
    debug!(title = %title, size = title_size, "title sized");
    canvas.fill_text(&title, &title_font(title_size), GOLD, CENTER_X, TITLE_BASELINE)?;

    let body = body_font();
    let lines = wrap_words(measurer, card.tier.message(), &body, BODY_MAX_WIDTH);
    for line in place_lines(lines, BODY_FIRST_BASELINE, BODY_LINE_HEIGHT) {
        canvas.fill_text(&line.text, &body, BODY_GREY, CENTER_X, line.y)?;
    }

    canvas.fill_round_rect(CTA_BOX, CTA_RADIUS, WHITE.with_alpha(0.1))?;
    canvas.fill_text(
        content::CTA_HEADLINE,
        &sans(FontFace::Bold, 35.0),
        LIGHT_GOLD,
        CENTER_X,
        1620.0,
    )?;
    canvas.fill_text(
        content::CTA_PROMPT,
        &sans(FontFace::Regular, 40.0),
        WHITE,
        CENTER_X,
        1680.0,
    )?;
    canvas.fill_text(
        content::CTA_HANDLE,
        &sans(FontFace::Bold, 50.0),
        GOLD,
        CENTER_X,
        1750.0,
    )?;

    Ok(())
}

/// Compose the card on a raster surface and encode it as PNG.
pub fn render_png(card: &ResultCard, fonts: &FontBook) -> Result<Vec<u8>, RenderError> {
    let mut canvas = SkiaCanvas::new(CARD_WIDTH, CARD_HEIGHT, fonts)?;
    compose_card(&mut canvas, fonts, card)?;
    canvas.encode_png()
}
