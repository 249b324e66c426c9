//! Document node model produced by the renderer.

/// Visual treatment for a blockquote.
///
/// Selected by keyword/emoji sniffing on the quoted text (advanced profile
/// only; the basic profile always yields `Neutral`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteVariant {
    /// Tips and callouts (`tip`, 💡).
    Info,
    /// Warnings (`warning`, ⚠️).
    Warning,
    /// Success notes (`success`, ✅).
    Success,
    /// Everything else.
    Neutral,
}

/// One styled text run within a block.
///
/// Spans do not nest: the engine emits a flat sequence, and the text inside
/// a styled span is literal. Concatenating the literal text of all inline
/// nodes reconstructs the source line minus marker characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Unstyled text.
    Text(String),
    /// `**bold**` or `__bold__`.
    Bold(String),
    /// `*italic*` or `_italic_`.
    Italic(String),
    /// `~~strikethrough~~`.
    Strikethrough(String),
    /// `` `inline code` ``.
    Code(String),
    /// `==highlight==`.
    Highlight(String),
    /// `[text](url)` with an optional `"title"` inside the parens.
    Link {
        text: String,
        url: String,
        title: Option<String>,
    },
    /// A bare `http://` / `https://` URL.
    Autolink(String),
}

impl Inline {
    /// The literal text content of this span, markers excluded.
    ///
    /// For links this is the link text; for autolinks, the URL itself.
    pub fn literal(&self) -> &str {
        match self {
            Inline::Text(s)
            | Inline::Bold(s)
            | Inline::Italic(s)
            | Inline::Strikethrough(s)
            | Inline::Code(s)
            | Inline::Highlight(s) => s,
            Inline::Link { text, .. } => text,
            Inline::Autolink(url) => url,
        }
    }
}

/// One structural unit of rendered output.
///
/// Blocks appear in the output in source-line order; multi-line constructs
/// (lists, fenced code, tables) collapse their contiguous run of lines into
/// a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#` through `####` heading. Level is 1–4.
    Heading { level: u8, content: Vec<Inline> },
    /// Any line no other rule claimed.
    Paragraph(Vec<Inline>),
    /// A `---` line.
    Rule,
    /// A `> ` line.
    Quote {
        variant: QuoteVariant,
        content: Vec<Inline>,
    },
    /// A run of `-` / `*` / `+` bullet lines, one entry per line.
    BulletList(Vec<Vec<Inline>>),
    /// A run of `1.`-style lines, one entry per line.
    NumberedList(Vec<Vec<Inline>>),
    /// A `- [ ]` / `- [x]` line.
    TaskItem { checked: bool, content: Vec<Inline> },
    /// A fenced code block. Contents are verbatim, never inline-parsed.
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    /// A pipe table. Separator rows are consumed but contribute nothing.
    Table {
        header: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    /// A blank source line.
    Spacer,
}

/// An ordered sequence of blocks. Fresh per render call and immutable;
/// rendering is a pure function of the input text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
