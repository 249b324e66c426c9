//! Constrained Markdown-to-document engine.
//!
//! Converts the restricted Markdown dialect produced by text-generation
//! models into a structured [`Document`]: a flat sequence of block nodes,
//! each owning a flat sequence of styled inline spans. Rendering is a pure
//! function of the input: no I/O, no shared state, and no error channel
//! (this sits on the display path; malformed input degrades to plain
//! paragraphs instead of failing).
//!
//! Two profiles of the same engine exist: [`RenderOptions::basic`] for
//! terse status text and [`RenderOptions::advanced`] for full mentor-style
//! answers. See [`RenderOptions`] for the exact feature split.
//!
//! This is intentionally not a CommonMark parser. Formatting does not nest,
//! pattern priority beats source position, and a handful of documented
//! misfires (a pipe character in prose starts a table candidate) are part
//! of the dialect's contract.

mod block;
mod doc;
mod inline;
mod options;

pub use doc::{Block, Document, Inline, QuoteVariant};
pub use options::RenderOptions;

/// Renders `text` into a [`Document`].
///
/// Total function: never panics and never rejects input.
pub fn render(text: &str, options: &RenderOptions) -> Document {
    block::parse(text, options)
}
