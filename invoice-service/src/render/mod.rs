//! Drawing an invoice onto pages.
//!
//! [`draw_invoice`] only talks to the [`Canvas`] trait, so the page layout can
//! be checked in tests without producing a PDF. [`PdfCanvas`] is the real
//! backend.

mod fonts;
mod invoice;
mod pdf;

pub use fonts::{fit_text, text_width, FontFace, ASCENT};
pub use invoice::{draw_invoice, InvoiceDocument};
pub use pdf::PdfCanvas;

use crate::layout::Rgb;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF backend error: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub fn regular(size: f32, color: Rgb) -> Self {
        TextStyle {
            face: FontFace::Regular,
            size,
            color,
        }
    }

    pub fn bold(size: f32, color: Rgb) -> Self {
        TextStyle {
            face: FontFace::Bold,
            size,
            color,
        }
    }
}

/// A page surface addressed in points from the top-left corner.
///
/// `top` for text is the top of the line box; backends place the baseline
/// [`ASCENT`] em below it.
pub trait Canvas {
    /// Finish the current page and continue on a fresh one.
    fn new_page(&mut self);

    fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Rgb);

    /// One-point horizontal line from `x1` to `x2`.
    fn rule(&mut self, x1: f32, x2: f32, y: f32, color: Rgb);

    fn text(&mut self, text: &str, x: f32, top: f32, style: TextStyle);
}
