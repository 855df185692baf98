use marketbrief_types::{Error, Result};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Flat block model of the final report text. Inline styling is
/// dropped; the PDF layout only needs block boundaries and raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    CodeBlock(String),
    ListItem { depth: usize, text: String },
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
    Rule,
}

/// Parse the final markdown text into blocks, tables enabled.
///
/// Empty input is a render failure: the flow promises a styled report
/// or nothing, never a blank artifact.
pub fn parse_blocks(markdown: &str) -> Result<Vec<Block>> {
    if markdown.trim().is_empty() {
        return Err(Error::Render("final text is empty".to_string()));
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);

    let mut collector = Collector::default();
    for event in Parser::new_ext(markdown, options) {
        collector.push(event);
    }

    Ok(collector.blocks)
}

#[derive(Default)]
struct TableBuilder {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
    in_head: bool,
}

#[derive(Default)]
struct Collector {
    blocks: Vec<Block>,
    text: String,
    heading: Option<u8>,
    in_code: bool,
    list_depth: usize,
    table: Option<TableBuilder>,
}

impl Collector {
    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),

            Event::Text(t) => self.append(&t),
            Event::Code(t) => self.append(&t),

            Event::SoftBreak => self.append(" "),
            Event::HardBreak => self.append(if self.in_code { "\n" } else { " " }),

            Event::Rule => self.blocks.push(Block::Rule),

            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.text.clear();
                self.heading = Some(heading_level(level));
            }
            Tag::Paragraph => {
                if self.list_depth == 0 && self.table.is_none() {
                    self.text.clear();
                } else if !self.text.is_empty() {
                    self.text.push(' ');
                }
            }
            // Fence info strings are dropped
            Tag::CodeBlock(_) => {
                self.text.clear();
                self.in_code = true;
            }
            Tag::List(_) => {
                // A nested list closes the text of the item that owns it
                if self.list_depth > 0 {
                    self.flush_list_item();
                }
                self.list_depth += 1;
            }
            Tag::Item => self.text.clear(),
            Tag::Table(_) => self.table = Some(TableBuilder::default()),
            Tag::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.in_head = true;
                }
            }
            Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.current_row.clear();
                }
            }
            Tag::TableCell => self.text.clear(),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                let level = self.heading.take().unwrap_or(1);
                let text = self.take_text();
                self.blocks.push(Block::Heading { level, text });
            }
            TagEnd::Paragraph => {
                if self.list_depth == 0 && self.table.is_none() {
                    let text = self.take_text();
                    if !text.is_empty() {
                        self.blocks.push(Block::Paragraph(text));
                    }
                }
            }
            TagEnd::CodeBlock => {
                self.in_code = false;
                let code = std::mem::take(&mut self.text);
                self.blocks.push(Block::CodeBlock(
                    code.trim_end_matches('\n').to_string(),
                ));
            }
            TagEnd::Item => self.flush_list_item(),
            TagEnd::List(_) => self.list_depth = self.list_depth.saturating_sub(1),
            TagEnd::TableCell => {
                let text = self.take_text();
                if let Some(table) = self.table.as_mut() {
                    if table.in_head {
                        table.header.push(text);
                    } else {
                        table.current_row.push(text);
                    }
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.in_head = false;
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    if !table.in_head {
                        table.rows.push(std::mem::take(&mut table.current_row));
                    }
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.blocks.push(Block::Table {
                        header: table.header,
                        rows: table.rows,
                    });
                }
            }
            _ => {}
        }
    }

    fn flush_list_item(&mut self) {
        let text = self.take_text();
        if !text.is_empty() {
            self.blocks.push(Block::ListItem {
                depth: self.list_depth.saturating_sub(1),
                text,
            });
        }
    }

    fn append(&mut self, piece: &str) {
        self.text.push_str(piece);
    }

    fn take_text(&mut self) -> String {
        std::mem::take(&mut self.text).trim().to_string()
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_a_render_error() {
        assert!(parse_blocks("   \n").is_err());
    }

    #[test]
    fn headings_and_paragraphs() {
        let blocks = parse_blocks("# Title\n\nBody text\nwraps.\n").unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                Block::Paragraph("Body text wraps.".to_string()),
            ]
        );
    }

    #[test]
    fn fenced_code_is_kept_verbatim() {
        let blocks = parse_blocks("```\nlet x = 1;\nlet y = 2;\n```\n").unwrap();
        assert_eq!(
            blocks,
            vec![Block::CodeBlock("let x = 1;\nlet y = 2;".to_string())]
        );
    }

    #[test]
    fn list_items_track_depth() {
        let blocks = parse_blocks("- outer\n  - inner\n").unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::ListItem {
                    depth: 0,
                    text: "outer".to_string()
                },
                Block::ListItem {
                    depth: 1,
                    text: "inner".to_string()
                },
            ]
        );
    }

    #[test]
    fn tables_split_header_and_rows() {
        let md = "| Metric | Value |\n| --- | --- |\n| Revenue | 8.1B |\n| EPS | 1.91 |\n";
        let blocks = parse_blocks(md).unwrap();
        assert_eq!(
            blocks,
            vec![Block::Table {
                header: vec!["Metric".to_string(), "Value".to_string()],
                rows: vec![
                    vec!["Revenue".to_string(), "8.1B".to_string()],
                    vec!["EPS".to_string(), "1.91".to_string()],
                ],
            }]
        );
    }

    #[test]
    fn inline_markup_collapses_to_text() {
        let blocks = parse_blocks("Some **bold** and `code` here.\n").unwrap();
        assert_eq!(
            blocks,
            vec![Block::Paragraph("Some bold and code here.".to_string())]
        );
    }
}
