use super::{Canvas, FontFace, RenderError, TextStyle, ASCENT};
use crate::layout::{PageGeometry, Rgb};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect,
};
use std::io::BufWriter;

const LAYER_NAME: &str = "Layer 1";

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.to_unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// [`Canvas`] backed by a printpdf document using the built-in Helvetica faces.
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    page_width: f32,
    page_height: f32,
    pages: usize,
}

impl PdfCanvas {
    pub fn new(title: &str, geometry: &PageGeometry) -> Result<Self, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            mm(geometry.page_width),
            mm(geometry.page_height),
            LAYER_NAME,
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(PdfCanvas {
            doc,
            layer,
            regular,
            bold,
            page_width: geometry.page_width,
            page_height: geometry.page_height,
            pages: 1,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut writer = BufWriter::new(Vec::<u8>::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }

    /// PDF user space grows upward from the bottom edge.
    fn y(&self, top: f32) -> Mm {
        mm(self.page_height - top)
    }
}

impl Canvas for PdfCanvas {
    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            mm(self.page_width),
            mm(self.page_height),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, rgb: Rgb) {
        self.layer.set_fill_color(color(rgb));
        let rect = Rect::new(mm(x), self.y(top + height), mm(x + width), self.y(top))
            .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
    }

    fn rule(&mut self, x1: f32, x2: f32, y: f32, rgb: Rgb) {
        self.layer.set_outline_color(color(rgb));
        self.layer.set_outline_thickness(1.0);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(mm(x1), self.y(y)), false),
                (Point::new(mm(x2), self.y(y)), false),
            ],
            is_closed: false,
        });
    }

    fn text(&mut self, text: &str, x: f32, top: f32, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let font = match style.face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
        };
        let baseline = self.y(top + style.size * ASCENT);
        self.layer.set_fill_color(color(style.color));
        self.layer.use_text(text, style.size, mm(x), baseline, font);
    }
}
