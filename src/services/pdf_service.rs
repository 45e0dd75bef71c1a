use owned_ttf_parser::Face;
use printpdf::{IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::models::plan::{ParsedPlan, PlanSection};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const SIDE_MARGIN: f32 = 10.0;
const TOP_MARGIN: f32 = 10.0;
const BOTTOM_MARGIN: f32 = 15.0;
const PRINTABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * SIDE_MARGIN;
const PT_TO_MM: f32 = 0.3528;
// Advance used for whitespace that no face maps.
const SPACE_WIDTH_EM: f32 = 0.25;

const HEADER_TEXT: &str = "Your TravelBuddy Itinerary";
const FOOTER_GLYPHS: &str = "Page 0123456789";
const HEADER_SIZE: f32 = 12.0;
const FOOTER_SIZE: f32 = 8.0;
const TITLE_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
const BODY_LINE_HEIGHT: f32 = 7.0;

#[derive(Debug)]
pub enum ExportError {
    Font(String),
    Render(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Font(msg) => write!(f, "Font error: {}", msg),
            ExportError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl Error for ExportError {}

pub fn file_name(destination: &str) -> String {
    format!("TravelBuddy_Itinerary_{}.pdf", destination)
}

/// Renders parsed plans as paginated A4 documents.
///
/// Holds one or more TrueType faces. Each character is drawn with the first
/// face that maps it; a plan containing a character no face maps is refused
/// with [`ExportError::Font`] instead of being drawn as blank boxes.
#[derive(Clone)]
pub struct ItineraryPdf {
    fonts: Vec<Vec<u8>>,
}

impl ItineraryPdf {
    pub fn new(font_data: Vec<u8>) -> Self {
        Self {
            fonts: vec![font_data],
        }
    }

    /// Faces are consulted in order for every character.
    pub fn with_fallbacks(fonts: Vec<Vec<u8>>) -> Self {
        Self { fonts }
    }

    pub fn from_file(path: &Path) -> Result<Self, ExportError> {
        Ok(Self::new(read_font(path)?))
    }

    /// Loads every readable font in `paths`, most specific first. Unreadable
    /// files are skipped; glyph coverage is checked again at render time.
    pub fn from_files(paths: &[PathBuf]) -> Result<Self, ExportError> {
        let mut fonts = Vec::new();
        for path in paths {
            match read_font(path) {
                Ok(data) => fonts.push(data),
                Err(e) => log::warn!("Skipping itinerary font: {}", e),
            }
        }
        if fonts.is_empty() {
            return Err(ExportError::Font("No itinerary font could be read".to_string()));
        }
        Ok(Self::with_fallbacks(fonts))
    }

    pub fn render(&self, plan: &ParsedPlan, destination: &str) -> Result<Vec<u8>, ExportError> {
        let faces = Typefaces::parse(&self.fonts)?;

        let mut texts = vec![HEADER_TEXT.to_string(), FOOTER_GLYPHS.to_string()];
        for section in PlanSection::ORDER {
            texts.push(section.title(destination));
            texts.push(plan.section(section).to_string());
        }
        let missing = faces.uncovered(texts.iter().map(String::as_str));
        if !missing.is_empty() {
            let listed: Vec<String> = missing.iter().map(|c| format!("'{}'", c)).collect();
            return Err(ExportError::Font(format!(
                "No configured font has glyphs for {}",
                listed.join(" ")
            )));
        }

        let (doc, page, layer) = PdfDocument::new(
            format!("TravelBuddy Itinerary - {}", destination),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Page 1",
        );
        let fonts = self
            .fonts
            .iter()
            .map(|data| {
                doc.add_external_font(Cursor::new(data.as_slice()))
                    .map_err(|e| ExportError::Font(format!("{:?}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        {
            let first_layer = doc.get_page(page).get_layer(layer);
            let mut writer = PageWriter::new(&doc, &faces, fonts, first_layer);
            for section in PlanSection::ORDER {
                writer.chapter_title(&section.title(destination));
                writer.chapter_body(plan.section(section).trim());
            }
            log::debug!("Rendered itinerary for {} on {} pages", destination, writer.page_no);
        }

        doc.save_to_bytes()
            .map_err(|e| ExportError::Render(format!("{:?}", e)))
    }
}

fn read_font(path: &Path) -> Result<Vec<u8>, ExportError> {
    fs::read(path).map_err(|e| ExportError::Font(format!("Failed to read {}: {}", path.display(), e)))
}

/// Parsed faces used for glyph lookup and measurement.
struct Typefaces<'f> {
    faces: Vec<Face<'f>>,
}

impl<'f> Typefaces<'f> {
    fn parse(fonts: &'f [Vec<u8>]) -> Result<Self, ExportError> {
        let faces = fonts
            .iter()
            .map(|data| {
                Face::parse(data, 0).map_err(|e| ExportError::Font(format!("Unreadable font: {}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { faces })
    }

    fn face_for(&self, c: char) -> Option<usize> {
        self.faces.iter().position(|face| face.glyph_index(c).is_some())
    }

    /// Characters in `texts` that no face maps. Whitespace and invisible
    /// formatting characters are not required.
    fn uncovered<'t>(&self, texts: impl Iterator<Item = &'t str>) -> BTreeSet<char> {
        texts
            .flat_map(str::chars)
            .filter(|c| !c.is_whitespace() && !is_invisible(*c) && self.face_for(*c).is_none())
            .collect()
    }

    fn char_width(&self, c: char, size: f32) -> f32 {
        let em = match self.face_for(c) {
            Some(index) => {
                let face = &self.faces[index];
                face.glyph_index(c)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map(|advance| advance as f32 / face.units_per_em() as f32)
                    .unwrap_or(0.0)
            }
            None if c.is_whitespace() => SPACE_WIDTH_EM,
            None => 0.0,
        };
        em * size * PT_TO_MM
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.char_width(c, size)).sum()
    }

    /// Splits `text` into runs drawn with a single face. Unmapped whitespace
    /// joins the surrounding run; other unmapped characters are dropped.
    fn runs(&self, text: &str) -> Vec<(usize, String)> {
        let mut runs: Vec<(usize, String)> = Vec::new();
        for c in text.chars() {
            let index = match (self.face_for(c), runs.last()) {
                (Some(index), _) => index,
                (None, Some((current, _))) if c.is_whitespace() => *current,
                (None, None) if c.is_whitespace() => 0,
                (None, _) => continue,
            };
            match runs.last_mut() {
                Some((current, run)) if *current == index => run.push(c),
                _ => runs.push((index, c.to_string())),
            }
        }
        runs
    }
}

fn is_invisible(c: char) -> bool {
    c.is_control() || matches!(c, '\u{200b}'..='\u{200f}' | '\u{feff}')
}

enum Align {
    Left,
    Center,
}

struct PageWriter<'a, 'f> {
    doc: &'a PdfDocumentReference,
    faces: &'a Typefaces<'f>,
    fonts: Vec<IndirectFontRef>,
    layer: PdfLayerReference,
    page_no: u32,
    /// Distance from the top edge of the page, in mm.
    cursor: f32,
}

impl<'a, 'f> PageWriter<'a, 'f> {
    fn new(
        doc: &'a PdfDocumentReference,
        faces: &'a Typefaces<'f>,
        fonts: Vec<IndirectFontRef>,
        layer: PdfLayerReference,
    ) -> Self {
        let mut writer = Self {
            doc,
            faces,
            fonts,
            layer,
            page_no: 1,
            cursor: TOP_MARGIN,
        };
        writer.decorate();
        writer
    }

    fn decorate(&mut self) {
        self.cursor = TOP_MARGIN;
        self.cell(HEADER_TEXT, HEADER_SIZE, 10.0, Align::Center);
        self.cursor += 10.0;

        let footer = format!("Page {}", self.page_no);
        let saved = self.cursor;
        self.cursor = PAGE_HEIGHT - BOTTOM_MARGIN;
        self.cell(&footer, FOOTER_SIZE, 10.0, Align::Center);
        self.cursor = saved;
    }

    fn add_page(&mut self) {
        self.page_no += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Page {}", self.page_no),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.decorate();
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor + height > PAGE_HEIGHT - BOTTOM_MARGIN {
            self.add_page();
        }
    }

    /// Writes one line in a box of `height` starting at the cursor. Does not
    /// move the cursor.
    fn cell(&self, text: &str, size: f32, height: f32, align: Align) {
        if text.is_empty() {
            return;
        }
        let mut x = match align {
            Align::Left => SIDE_MARGIN,
            Align::Center => {
                let width = self.faces.text_width(text, size).min(PRINTABLE_WIDTH);
                (PAGE_WIDTH - width) / 2.0
            }
        };
        // Baseline sits roughly where fpdf-style cells put it.
        let baseline = self.cursor + height / 2.0 + size * PT_TO_MM * 0.35;
        for (index, run) in self.faces.runs(text) {
            let width = self.faces.text_width(&run, size);
            self.layer.use_text(
                run,
                size,
                Mm(x),
                Mm(PAGE_HEIGHT - baseline),
                &self.fonts[index],
            );
            x += width;
        }
    }

    fn chapter_title(&mut self, title: &str) {
        self.ensure_room(10.0 + BODY_LINE_HEIGHT);
        self.cell(title, TITLE_SIZE, 10.0, Align::Left);
        self.cursor += 10.0 + 4.0;
    }

    fn chapter_body(&mut self, body: &str) {
        let faces = self.faces;
        let lines = wrap_text(body, PRINTABLE_WIDTH, |text| faces.text_width(text, BODY_SIZE));
        for line in lines {
            self.ensure_room(BODY_LINE_HEIGHT);
            self.cell(&line, BODY_SIZE, BODY_LINE_HEIGHT, Align::Left);
            self.cursor += BODY_LINE_HEIGHT;
        }
        self.cursor += BODY_LINE_HEIGHT;
    }
}

/// Word-wraps `text` so no line measures wider than `max_width`. Blank lines
/// are kept; words wider than a whole line are broken between characters,
/// never before a zero-width mark.
fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            for c in word.chars() {
                current.push(c);
                if measure(&current) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::replace(&mut current, c.to_string()));
                }
            }
        }
        lines.push(current);
    }

    lines
}
