//! PDF rendering engine.
//!
//! Lays a block sequence out on fixed-size pages and writes the result with
//! `lopdf`. Text uses the standard Helvetica faces in WinAnsiEncoding, so
//! no font files are read or embedded.

use chrono::NaiveDateTime;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::blocks::{Block, BlockStyle};
use super::common::sanitize_filename;
use super::{GeneratedDocument, GeneratorError};

const POINTS_PER_CM: f32 = 28.3465;
const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";
const SIGNATURE_RULE: &str = "______________________________";
const SIGNATURE_SIZE: f32 = 10.0;
const SIGNATURE_LEADING: f32 = 14.0;
/// Helvetica-Bold runs roughly this much wider than the regular face.
const BOLD_WIDTH_FACTOR: f32 = 1.06;
/// Longest party name carried into a download filename, in characters.
const MAX_FILENAME_SUBJECT_CHARS: usize = 60;

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
}

impl PageConfig {
    /// A4 with 1.5 cm margins and a 2 cm bottom margin.
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin_top: 1.5 * POINTS_PER_CM,
            margin_right: 1.5 * POINTS_PER_CM,
            margin_bottom: 2.0 * POINTS_PER_CM,
            margin_left: 1.5 * POINTS_PER_CM,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    fn top(&self) -> f32 {
        self.height - self.margin_top
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy)]
struct StyleMetrics {
    bold: bool,
    size: f32,
    leading: f32,
    space_before: f32,
    space_after: f32,
    indent: f32,
    align: Align,
}

impl StyleMetrics {
    fn for_style(style: BlockStyle) -> Self {
        let (bold, size, leading, space_before, space_after, indent, align) = match style {
            BlockStyle::Title => (true, 16.0, 20.0, 10.0, 20.0, 0.0, Align::Center),
            BlockStyle::Subtitle => (false, 12.0, 15.0, 0.0, 20.0, 0.0, Align::Center),
            BlockStyle::Section => (true, 12.0, 15.0, 12.0, 8.0, 0.0, Align::Left),
            BlockStyle::Clause => (true, 11.0, 14.0, 10.0, 6.0, 0.0, Align::Left),
            BlockStyle::Body => (false, 10.0, 12.0, 0.0, 8.0, 0.0, Align::Left),
            BlockStyle::Indented => (false, 10.0, 12.0, 0.0, 6.0, 20.0, Align::Left),
            BlockStyle::Centered => (false, 10.0, 12.0, 6.0, 6.0, 0.0, Align::Center),
        };

        Self {
            bold,
            size,
            leading,
            space_before,
            space_after,
            indent,
            align,
        }
    }
}

/// Stateless-per-call engine that turns blocks into PDF bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderEngine {
    page: PageConfig,
}

impl PdfRenderEngine {
    pub fn new(page: PageConfig) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// Render blocks into a named document.
    ///
    /// # Arguments
    /// * `title` - Document title stored in the PDF metadata.
    /// * `blocks` - The ordered block sequence.
    /// * `file_stem` - Prefix of the download filename (e.g. "contrato-automovel").
    /// * `subject_name` - Party name appended to the filename when present.
    /// * `created` - Timestamp for the filename and the PDF creation date.
    pub fn render(
        &self,
        title: &str,
        blocks: &[Block],
        file_stem: &str,
        subject_name: Option<&str>,
        created: NaiveDateTime,
    ) -> Result<GeneratedDocument, GeneratorError> {
        let (pdf, pages) = self.render_pdf(title, blocks, created)?;

        let timestamp = created.format("%Y%m%d_%H%M%S");
        let safe_name: String = subject_name
            .map(|name| sanitize_filename(name, ""))
            .unwrap_or_default()
            .chars()
            .take(MAX_FILENAME_SUBJECT_CHARS)
            .collect();
        let safe_name = safe_name.trim_end_matches('-');
        let filename = if safe_name.is_empty() {
            format!("{file_stem}-{timestamp}.pdf")
        } else {
            format!("{file_stem}-{safe_name}-{timestamp}.pdf")
        };

        Ok(GeneratedDocument {
            filename,
            pdf,
            pages,
        })
    }

    /// Render blocks to PDF bytes, returning the bytes and the page count.
    pub fn render_pdf(
        &self,
        title: &str,
        blocks: &[Block],
        created: NaiveDateTime,
    ) -> Result<(Vec<u8>, usize), GeneratorError> {
        if blocks.is_empty() {
            return Err(GeneratorError::EmptyDocument);
        }

        let pages = self.layout(blocks);
        let page_count = pages.len();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT => regular_id,
                BOLD_FONT => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for operations in pages {
            let content = Content { operations }
                .encode()
                .map_err(|e| GeneratorError::EncodeContent(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            self.page.width.into(),
            self.page.height.into(),
        ];
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(encode_win_ansi(title)),
            "Producer" => Object::string_literal("contrato-server"),
            "CreationDate" => Object::string_literal(created.format("D:%Y%m%d%H%M%S").to_string()),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| GeneratorError::WritePdf(e.to_string()))?;

        Ok((buffer, page_count))
    }

    /// Content operations for each page, in order.
    fn layout(&self, blocks: &[Block]) -> Vec<Vec<Operation>> {
        let mut layout = Layout::new(&self.page);

        for block in blocks {
            match block {
                Block::Text { style, text } => layout.text(StyleMetrics::for_style(*style), text),
                Block::Spacer(height) => layout.spacer(*height),
                Block::Signatures { left, right } => layout.signatures(left, right),
                Block::PageBreak => layout.page_break(),
            }
        }

        layout.finish()
    }
}

/// Cursor state while flowing blocks down the pages.
struct Layout<'a> {
    page: &'a PageConfig,
    pages: Vec<Vec<Operation>>,
    operations: Vec<Operation>,
    cursor: f32,
}

impl<'a> Layout<'a> {
    fn new(page: &'a PageConfig) -> Self {
        Self {
            page,
            pages: Vec::new(),
            operations: Vec::new(),
            cursor: page.top(),
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= self.page.top()
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.operations));
        self.cursor = self.page.top();
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height < self.page.margin_bottom && !self.at_page_top() {
            self.new_page();
        }
    }

    fn text(&mut self, metrics: StyleMetrics, text: &str) {
        if !self.at_page_top() {
            self.cursor -= metrics.space_before;
        }

        let available = self.page.content_width() - metrics.indent;
        for line in wrap_lines(text, available, metrics.size, metrics.bold) {
            self.ensure_room(metrics.leading);
            let baseline = self.cursor - metrics.size;

            if !line.is_empty() {
                let x = match metrics.align {
                    Align::Left => self.page.margin_left + metrics.indent,
                    Align::Center => {
                        let width = text_width(&line, metrics.size, metrics.bold);
                        self.page.margin_left
                            + ((self.page.content_width() - width) / 2.0).max(0.0)
                    }
                };
                self.write(&line, x, baseline, metrics.bold, metrics.size);
            }

            self.cursor -= metrics.leading;
        }

        self.cursor -= metrics.space_after;
    }

    fn spacer(&mut self, height: f32) {
        if self.at_page_top() {
            return;
        }
        if self.cursor - height < self.page.margin_bottom {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    fn signatures(&mut self, left: &str, right: &str) {
        self.ensure_room(SIGNATURE_LEADING * 2.0);

        let column = self.page.content_width() / 2.0;
        let baseline = self.cursor - SIGNATURE_SIZE;
        let rule_width = text_width(SIGNATURE_RULE, SIGNATURE_SIZE, false);

        for (index, label) in [left, right].into_iter().enumerate() {
            let column_left = self.page.margin_left + column * index as f32;
            let rule_x = column_left + ((column - rule_width) / 2.0).max(0.0);
            self.write(SIGNATURE_RULE, rule_x, baseline, false, SIGNATURE_SIZE);

            let label_width = text_width(label, SIGNATURE_SIZE, false);
            let label_x = column_left + ((column - label_width) / 2.0).max(0.0);
            self.write(
                label,
                label_x,
                baseline - SIGNATURE_LEADING,
                false,
                SIGNATURE_SIZE,
            );
        }

        self.cursor -= SIGNATURE_LEADING * 2.0 + 8.0;
    }

    fn page_break(&mut self) {
        if !self.operations.is_empty() {
            self.new_page();
        }
    }

    fn write(&mut self, text: &str, x: f32, y: f32, bold: bool, size: f32) {
        let font = if bold { BOLD_FONT } else { REGULAR_FONT };
        self.operations.push(Operation::new("BT", vec![]));
        self.operations
            .push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.operations
            .push(Operation::new("Td", vec![x.into(), y.into()]));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(text))],
        ));
        self.operations.push(Operation::new("ET", vec![]));
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.operations.is_empty() || self.pages.is_empty() {
            self.pages.push(self.operations);
        }
        self.pages
    }
}

fn glyph_width(ch: char) -> u32 {
    match ch {
        ' '..='~' => HELVETICA_WIDTHS[(ch as usize) - 32] as u32,
        'º' | 'ª' => 365,
        '•' => 350,
        '–' => 556,
        '—' => 1000,
        _ => 556,
    }
}

/// Width of `text` in points.
fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(glyph_width).sum();
    let width = units as f32 * size / 1000.0;
    if bold {
        width * BOLD_WIDTH_FACTOR
    } else {
        width
    }
}

/// Greedy word wrap. Each `\n` starts a new line; words wider than the line
/// are split by character.
fn wrap_lines(text: &str, width: f32, size: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if !current.is_empty() {
                let candidate = format!("{current} {word}");
                if text_width(&candidate, size, bold) <= width {
                    current = candidate;
                    continue;
                }
                lines.push(std::mem::take(&mut current));
            }

            let mut pieces = split_long_word(word, width, size, bold);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }

        lines.push(current);
    }

    lines
}

fn split_long_word(word: &str, width: f32, size: f32, bold: bool) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for ch in word.chars() {
        piece.push(ch);
        if piece.chars().count() > 1 && text_width(&piece, size, bold) > width {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }

    pieces.push(piece);
    pieces
}

/// Encode text for a WinAnsiEncoding font; unmapped characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}
