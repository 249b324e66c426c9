//! Terminal rendering of parsed Markdown documents.
//!
//! Maps document blocks and inline spans to ANSI-styled text. Kept dumb on
//! purpose: no wrapping, no width probing. Terminals wrap long lines
//! themselves and mentor answers are short.

use cpx_markdown::{Block, Document, Inline, QuoteVariant};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const ITALIC: &str = "\x1b[3m";
const UNDERLINE: &str = "\x1b[4m";
const STRIKE: &str = "\x1b[9m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const MAGENTA: &str = "\x1b[35m";

/// Renders `doc` as ANSI text, one trailing newline per block.
pub fn to_ansi(doc: &Document) -> String {
    let mut out = String::new();

    for block in &doc.blocks {
        match block {
            Block::Heading { content, .. } => {
                out.push_str(BOLD);
                out.push_str(&spans(content));
                out.push_str(RESET);
                out.push('\n');
            }
            Block::Paragraph(content) => {
                out.push_str(&spans(content));
                out.push('\n');
            }
            Block::Rule => {
                out.push_str(DIM);
                out.push_str(&"─".repeat(40));
                out.push_str(RESET);
                out.push('\n');
            }
            Block::Quote { variant, content } => {
                let color = match variant {
                    QuoteVariant::Info => CYAN,
                    QuoteVariant::Warning => YELLOW,
                    QuoteVariant::Success => GREEN,
                    QuoteVariant::Neutral => DIM,
                };
                out.push_str(color);
                out.push_str("│ ");
                out.push_str(&spans(content));
                out.push_str(RESET);
                out.push('\n');
            }
            Block::BulletList(items) => {
                for item in items {
                    out.push_str("  • ");
                    out.push_str(&spans(item));
                    out.push('\n');
                }
            }
            Block::NumberedList(items) => {
                for (index, item) in items.iter().enumerate() {
                    out.push_str(&format!("  {}. ", index + 1));
                    out.push_str(&spans(item));
                    out.push('\n');
                }
            }
            Block::TaskItem { checked, content } => {
                out.push_str(if *checked { "  [x] " } else { "  [ ] " });
                out.push_str(&spans(content));
                out.push('\n');
            }
            Block::CodeBlock { language, code } => {
                out.push_str(DIM);
                out.push_str("```");
                if let Some(language) = language {
                    out.push_str(language);
                }
                out.push_str(RESET);
                out.push('\n');
                for line in code.lines() {
                    out.push_str("  ");
                    out.push_str(line);
                    out.push('\n');
                }
                out.push_str(DIM);
                out.push_str("```");
                out.push_str(RESET);
                out.push('\n');
            }
            Block::Table { header, rows } => {
                out.push_str(BOLD);
                out.push_str(&row_text(header));
                out.push_str(RESET);
                out.push('\n');
                for row in rows {
                    out.push_str(&row_text(row));
                    out.push('\n');
                }
            }
            Block::Spacer => out.push('\n'),
        }
    }

    out
}

fn row_text(cells: &[Vec<Inline>]) -> String {
    cells
        .iter()
        .map(|cell| spans(cell))
        .collect::<Vec<_>>()
        .join("  |  ")
}

fn spans(content: &[Inline]) -> String {
    let mut out = String::new();
    for span in content {
        match span {
            Inline::Text(text) => out.push_str(text),
            Inline::Bold(text) => {
                out.push_str(BOLD);
                out.push_str(text);
                out.push_str(RESET);
            }
            Inline::Italic(text) => {
                out.push_str(ITALIC);
                out.push_str(text);
                out.push_str(RESET);
            }
            Inline::Strikethrough(text) => {
                out.push_str(STRIKE);
                out.push_str(text);
                out.push_str(RESET);
            }
            Inline::Code(text) => {
                out.push_str(MAGENTA);
                out.push_str(text);
                out.push_str(RESET);
            }
            Inline::Highlight(text) => {
                out.push_str(YELLOW);
                out.push_str(text);
                out.push_str(RESET);
            }
            Inline::Link { text, url, .. } => {
                out.push_str(UNDERLINE);
                out.push_str(text);
                out.push_str(RESET);
                out.push_str(DIM);
                out.push_str(" (");
                out.push_str(url);
                out.push(')');
                out.push_str(RESET);
            }
            Inline::Autolink(url) => {
                out.push_str(UNDERLINE);
                out.push_str(url);
                out.push_str(RESET);
            }
        }
    }
    out
}
