use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use marketbrief_types::{Error, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::markdown::{Block, parse_blocks};

// US letter, 1 inch margins
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 25.4;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const PT_TO_MM: f32 = 0.352_778;
const BODY_SIZE: f32 = 11.0;
const CODE_SIZE: f32 = 9.5;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
}

/// Render the final markdown text to a paginated PDF at `path`.
///
/// Fails with a render error when the input cannot be processed and a
/// filesystem error when the artifact cannot be written. No fallback
/// output is produced.
pub fn render_report_pdf(markdown: &str, path: &Path) -> Result<()> {
    let blocks = parse_blocks(markdown)?;

    let (doc, page, layer) = PdfDocument::new(
        "Research Report",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: builtin(&doc, BuiltinFont::Helvetica)?,
        bold: builtin(&doc, BuiltinFont::HelveticaBold)?,
        mono: builtin(&doc, BuiltinFont::Courier)?,
    };

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT - MARGIN,
    };

    for block in &blocks {
        writer.write_block(&fonts, block);
    }
    drop(writer);

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| Error::Render(e.to_string()))
}

fn builtin(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef> {
    doc.add_builtin_font(font)
        .map_err(|e| Error::Render(e.to_string()))
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn write_block(&mut self, fonts: &Fonts, block: &Block) {
        match block {
            Block::Heading { level, text } => {
                let size = match level {
                    1 => 20.0,
                    2 => 16.0,
                    3 => 13.0,
                    _ => 12.0,
                };
                self.gap(4.0);
                for line in wrap(text, proportional_columns(size)) {
                    self.line(&line, size, 0.0, &fonts.bold);
                }
                self.gap(1.5);
            }

            Block::Paragraph(text) => {
                for line in wrap(text, proportional_columns(BODY_SIZE)) {
                    self.line(&line, BODY_SIZE, 0.0, &fonts.regular);
                }
                self.gap(2.0);
            }

            Block::CodeBlock(code) => {
                self.gap(1.5);
                let columns = mono_columns(CODE_SIZE);
                for source_line in code.lines() {
                    for line in hard_wrap(source_line, columns) {
                        self.line(&line, CODE_SIZE, 2.0, &fonts.mono);
                    }
                }
                self.gap(2.0);
            }

            Block::ListItem { depth, text } => {
                let indent = 4.0 + 5.0 * (*depth as f32);
                let columns = proportional_columns(BODY_SIZE).saturating_sub(4 * (depth + 1));
                let mut first = true;
                for line in wrap(text, columns) {
                    let rendered = if first {
                        format!("- {}", line)
                    } else {
                        format!("  {}", line)
                    };
                    self.line(&rendered, BODY_SIZE, indent, &fonts.regular);
                    first = false;
                }
            }

            Block::Table { header, rows } => {
                let columns = header.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
                if columns == 0 {
                    return;
                }
                let cell_width = (mono_columns(CODE_SIZE) / columns).max(4);

                self.gap(1.5);
                self.line(&table_row(header, columns, cell_width), CODE_SIZE, 0.0, &fonts.mono);
                self.line(
                    &"-".repeat(cell_width * columns),
                    CODE_SIZE,
                    0.0,
                    &fonts.mono,
                );
                for row in rows {
                    self.line(&table_row(row, columns, cell_width), CODE_SIZE, 0.0, &fonts.mono);
                }
                self.gap(2.0);
            }

            Block::Rule => {
                self.gap(1.5);
                self.line(&"-".repeat(mono_columns(CODE_SIZE)), CODE_SIZE, 0.0, &fonts.mono);
                self.gap(1.5);
            }
        }
    }

    fn line(&mut self, text: &str, size: f32, indent: f32, font: &IndirectFontRef) {
        let line_height = size * PT_TO_MM * 1.5;
        if self.y - line_height < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
        self.y -= line_height;
        self.layer
            .use_text(text, size, Mm(MARGIN + indent), Mm(self.y), font);
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }
}

/// Usable columns for the proportional body font, from its average
/// glyph width. An estimate is fine; lines only need to stay inside
/// the margins.
fn proportional_columns(size: f32) -> usize {
    (CONTENT_WIDTH / (size * 0.5 * PT_TO_MM)) as usize
}

fn mono_columns(size: f32) -> usize {
    (CONTENT_WIDTH / (size * 0.6 * PT_TO_MM)) as usize
}

fn wrap(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(8);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        if word.chars().count() > columns {
            for piece in hard_wrap(word, columns) {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current = piece;
            }
        } else {
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn hard_wrap(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(8);
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(columns)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn table_row(cells: &[String], columns: usize, cell_width: usize) -> String {
    let mut row = String::new();
    for i in 0..columns {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let mut rendered: String = cell.chars().take(cell_width.saturating_sub(2)).collect();
        while rendered.chars().count() < cell_width {
            rendered.push(' ');
        }
        row.push_str(&rendered);
    }
    row.trim_end().to_string()
}
