//! Render profiles.
//!
//! Two renditions of the same engine: a basic one for short status text and
//! an advanced one for mentor answers. Both run the identical block and
//! inline passes; the options only gate which constructs are recognized.

/// Feature switches for one render pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Deepest recognized heading level. Hash runs longer than this fall
    /// through to paragraphs.
    pub max_heading: u8,
    /// Pick a [`QuoteVariant`](crate::QuoteVariant) from keywords/emoji
    /// instead of always `Neutral`.
    pub quote_variants: bool,
    /// Recognize `- [ ]` / `- [x]` lines as task items.
    pub task_items: bool,
    /// Recognize pipe tables.
    pub tables: bool,
    /// Capture the language token after an opening fence.
    pub fence_language: bool,
    /// `~~strikethrough~~` spans.
    pub strikethrough: bool,
    /// `==highlight==` spans.
    pub highlight: bool,
    /// Bare `http(s)://` URLs become autolinks.
    pub autolink: bool,
    /// Accept an optional `"title"` inside link parens.
    pub link_titles: bool,
    /// Accept `__bold__` and `_italic_` in addition to the asterisk forms.
    pub underscore_markers: bool,
}

impl RenderOptions {
    /// Bold/italic/code/links only; headings 1–3, neutral quotes, plain
    /// fences. No tables, task items, strikethrough, highlight or autolinks.
    pub fn basic() -> Self {
        Self {
            max_heading: 3,
            quote_variants: false,
            task_items: false,
            tables: false,
            fence_language: false,
            strikethrough: false,
            highlight: false,
            autolink: false,
            link_titles: false,
            underscore_markers: false,
        }
    }

    /// The full dialect.
    pub fn advanced() -> Self {
        Self {
            max_heading: 4,
            quote_variants: true,
            task_items: true,
            tables: true,
            fence_language: true,
            strikethrough: true,
            highlight: true,
            autolink: true,
            link_titles: true,
            underscore_markers: true,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::advanced()
    }
}
