//! Block-level line pass.
//!
//! A single forward scan over the source lines. Each iteration tries the
//! block rules in a fixed order and the first hit consumes the line (or,
//! for lists, fences and tables, the whole contiguous run). Task items must
//! be probed before generic bullets: both start with `- `.

use crate::doc::{Block, Document, Inline, QuoteVariant};
use crate::inline::parse_inline;
use crate::options::RenderOptions;

/// Parses `text` into a document. Total: any line no rule claims becomes a
/// paragraph.
pub(crate) fn parse(text: &str, opts: &RenderOptions) -> Document {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            blocks.push(Block::Spacer);
            i += 1;
            continue;
        }

        if let Some((level, rest)) = match_heading(line, opts.max_heading) {
            blocks.push(Block::Heading {
                level,
                content: parse_inline(rest, opts),
            });
            i += 1;
            continue;
        }

        if line.trim() == "---" {
            blocks.push(Block::Rule);
            i += 1;
            continue;
        }

        if let Some(quoted) = line.strip_prefix("> ") {
            let variant = if opts.quote_variants {
                classify_quote(quoted)
            } else {
                QuoteVariant::Neutral
            };
            blocks.push(Block::Quote {
                variant,
                content: parse_inline(quoted, opts),
            });
            i += 1;
            continue;
        }

        if opts.task_items
            && let Some((checked, rest)) = match_task_item(line)
        {
            blocks.push(Block::TaskItem {
                checked,
                content: parse_inline(rest, opts),
            });
            i += 1;
            continue;
        }

        if strip_bullet(line).is_some() {
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(item) = strip_bullet(lines[i]) else {
                    break;
                };
                items.push(parse_inline(item, opts));
                i += 1;
            }
            blocks.push(Block::BulletList(items));
            continue;
        }

        if strip_number(line).is_some() {
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(item) = strip_number(lines[i]) else {
                    break;
                };
                items.push(parse_inline(item, opts));
                i += 1;
            }
            blocks.push(Block::NumberedList(items));
            continue;
        }

        if let Some(after_fence) = line.strip_prefix("```") {
            let language = if opts.fence_language {
                let tag = after_fence.trim();
                (!tag.is_empty()).then(|| tag.to_string())
            } else {
                None
            };
            let mut close = i + 1;
            while close < lines.len() && !lines[close].starts_with("```") {
                close += 1;
            }
            blocks.push(Block::CodeBlock {
                language,
                code: lines[i + 1..close].join("\n"),
            });
            // Skip past the closing fence when there is one.
            i = if close < lines.len() { close + 1 } else { close };
            continue;
        }

        if opts.tables && line.contains('|') {
            let start = i;
            while i < lines.len() && lines[i].contains('|') {
                i += 1;
            }
            // A run with zero well-formed rows emits nothing at all; the
            // lines are dropped. Documented behavior, not an accident.
            if let Some(table) = build_table(&lines[start..i], opts) {
                blocks.push(table);
            }
            continue;
        }

        blocks.push(Block::Paragraph(parse_inline(line, opts)));
        i += 1;
    }

    Document { blocks }
}

/// `#{1,max}` followed by one whitespace char. Longer hash runs are not a
/// heading and fall through to the paragraph rule.
fn match_heading(line: &str, max_heading: u8) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > usize::from(max_heading) {
        return None;
    }
    let rest = &line[hashes..];
    let first = rest.chars().next()?;
    first
        .is_whitespace()
        .then(|| (hashes as u8, &rest[first.len_utf8()..]))
}

/// `- [ ] ` / `- [x] ` with optional leading whitespace.
fn match_task_item(line: &str) -> Option<(bool, &str)> {
    let rest = line.trim_start().strip_prefix('-')?;
    let ws = rest.chars().next()?;
    if !ws.is_whitespace() {
        return None;
    }
    let rest = &rest[ws.len_utf8()..];
    let (checked, rest) = if let Some(rest) = rest.strip_prefix("[ ]") {
        (false, rest)
    } else if let Some(rest) = rest.strip_prefix("[x]") {
        (true, rest)
    } else {
        return None;
    };
    let ws = rest.chars().next()?;
    ws.is_whitespace().then(|| (checked, &rest[ws.len_utf8()..]))
}

/// `-` / `*` / `+` bullet marker followed by one whitespace char, with
/// optional leading whitespace.
fn strip_bullet(line: &str) -> Option<&str> {
    let rest = line
        .trim_start()
        .strip_prefix(|c| matches!(c, '-' | '*' | '+'))?;
    let ws = rest.chars().next()?;
    ws.is_whitespace().then(|| &rest[ws.len_utf8()..])
}

/// `<digits>.` followed by one whitespace char.
fn strip_number(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if digits == 0 {
        return None;
    }
    let rest = trimmed[digits..].strip_prefix('.')?;
    let ws = rest.chars().next()?;
    ws.is_whitespace().then(|| &rest[ws.len_utf8()..])
}

/// Keyword/emoji sniffing for quote styling. First hit wins.
fn classify_quote(text: &str) -> QuoteVariant {
    let lower = text.to_lowercase();
    if text.contains("💡") || lower.contains("tip") {
        QuoteVariant::Info
    } else if text.contains("⚠️") || lower.contains("warning") {
        QuoteVariant::Warning
    } else if text.contains("✅") || lower.contains("success") {
        QuoteVariant::Success
    } else {
        QuoteVariant::Neutral
    }
}

/// Builds a table from a run of pipe-bearing lines.
///
/// Only rows with both a leading and a trailing `|` count; others in the
/// run are dropped. The first counted row is the header. Separator rows
/// (every cell `:?-+:?`) are consumed without producing output.
fn build_table(run: &[&str], opts: &RenderOptions) -> Option<Block> {
    let mut header: Option<Vec<Vec<Inline>>> = None;
    let mut rows = Vec::new();

    for line in run {
        let row = line.trim();
        if !(row.starts_with('|') && row.ends_with('|')) {
            continue;
        }
        let inner = if row.len() >= 2 { &row[1..row.len() - 1] } else { "" };
        let cells: Vec<&str> = inner.split('|').map(str::trim).collect();

        if header.is_none() {
            header = Some(cells.iter().map(|c| parse_inline(c, opts)).collect());
        } else if !cells.iter().all(|c| is_separator_cell(c)) {
            rows.push(cells.iter().map(|c| parse_inline(c, opts)).collect());
        }
    }

    header.map(|header| Block::Table { header, rows })
}

/// `:?-+:?`: at least one dash, optional alignment colons.
fn is_separator_cell(cell: &str) -> bool {
    let dashes = cell.strip_prefix(':').unwrap_or(cell);
    let dashes = dashes.strip_suffix(':').unwrap_or(dashes);
    !dashes.is_empty() && dashes.bytes().all(|b| b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advanced(text: &str) -> Document {
        parse(text, &RenderOptions::advanced())
    }

    fn basic(text: &str) -> Document {
        parse(text, &RenderOptions::basic())
    }

    fn text(s: &str) -> Vec<Inline> {
        vec![Inline::Text(s.to_string())]
    }

    #[test]
    fn rendering_is_deterministic() {
        let source = "# Hi\n\n- a\n- b\n\n```rs\nlet x;\n```\n|A|\n|1|";
        assert_eq!(advanced(source), advanced(source));
    }

    #[test]
    fn plain_lines_become_one_paragraph_each() {
        let doc = advanced("first line\nsecond line");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph(text("first line")),
                Block::Paragraph(text("second line")),
            ]
        );
    }

    #[test]
    fn heading_levels_one_through_four() {
        let doc = advanced("# A\n## B\n### C\n#### D");
        let expect: Vec<Block> = (1..=4u8)
            .zip(["A", "B", "C", "D"])
            .map(|(level, label)| Block::Heading {
                level,
                content: text(label),
            })
            .collect();
        assert_eq!(doc.blocks, expect);
    }

    #[test]
    fn five_hashes_are_not_a_heading() {
        let doc = advanced("##### E");
        assert_eq!(doc.blocks, vec![Block::Paragraph(text("##### E"))]);
    }

    #[test]
    fn basic_profile_caps_headings_at_three() {
        let doc = basic("#### D");
        assert_eq!(doc.blocks, vec![Block::Paragraph(text("#### D"))]);
    }

    #[test]
    fn blank_line_splits_list_runs() {
        let doc = advanced("- a\n- b\n\n- c");
        assert_eq!(
            doc.blocks,
            vec![
                Block::BulletList(vec![text("a"), text("b")]),
                Block::Spacer,
                Block::BulletList(vec![text("c")]),
            ]
        );
    }

    #[test]
    fn mixed_bullet_markers_share_a_run() {
        let doc = advanced("- a\n* b\n+ c");
        assert_eq!(
            doc.blocks,
            vec![Block::BulletList(vec![text("a"), text("b"), text("c")])]
        );
    }

    #[test]
    fn numbered_list_consumes_contiguous_lines() {
        let doc = advanced("1. one\n2. two\nplain");
        assert_eq!(
            doc.blocks,
            vec![
                Block::NumberedList(vec![text("one"), text("two")]),
                Block::Paragraph(text("plain")),
            ]
        );
    }

    #[test]
    fn code_fence_passes_contents_through_verbatim() {
        let doc = advanced("```js\nlet x = a * b * c;\n```");
        assert_eq!(
            doc.blocks,
            vec![Block::CodeBlock {
                language: Some("js".to_string()),
                code: "let x = a * b * c;".to_string(),
            }]
        );
    }

    #[test]
    fn unterminated_fence_runs_to_end_of_input() {
        let doc = advanced("```\nline one\nline two");
        assert_eq!(
            doc.blocks,
            vec![Block::CodeBlock {
                language: None,
                code: "line one\nline two".to_string(),
            }]
        );
    }

    #[test]
    fn basic_profile_ignores_fence_language() {
        let doc = basic("```cpp\nint x;\n```");
        assert_eq!(
            doc.blocks,
            vec![Block::CodeBlock {
                language: None,
                code: "int x;".to_string(),
            }]
        );
    }

    #[test]
    fn table_separator_row_contributes_nothing() {
        let doc = advanced("|A|B|\n|---|---|\n|1|2|");
        assert_eq!(
            doc.blocks,
            vec![Block::Table {
                header: vec![text("A"), text("B")],
                rows: vec![vec![text("1"), text("2")]],
            }]
        );
    }

    #[test]
    fn pipe_run_without_boundary_pipes_is_dropped() {
        let doc = advanced("a | b");
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn basic_profile_treats_pipes_as_prose() {
        let doc = basic("a | b");
        assert_eq!(doc.blocks, vec![Block::Paragraph(text("a | b"))]);
    }

    #[test]
    fn task_items_win_over_bullets() {
        let doc = advanced("- [x] done\n- [ ] todo");
        assert_eq!(
            doc.blocks,
            vec![
                Block::TaskItem {
                    checked: true,
                    content: text("done"),
                },
                Block::TaskItem {
                    checked: false,
                    content: text("todo"),
                },
            ]
        );
    }

    #[test]
    fn task_line_inside_a_bullet_run_is_consumed_as_a_bullet() {
        // The bullet run claims every bullet-shaped line, including task
        // syntax that did not start the run.
        let doc = advanced("- plain\n- [ ] task");
        assert_eq!(
            doc.blocks,
            vec![Block::BulletList(vec![text("plain"), text("[ ] task")])]
        );
    }

    #[test]
    fn basic_profile_reads_task_syntax_as_a_bullet() {
        let doc = basic("- [x] done");
        assert_eq!(doc.blocks, vec![Block::BulletList(vec![text("[x] done")])]);
    }

    #[test]
    fn quote_variants_from_keywords_and_emoji() {
        let cases = [
            ("> tip: prefer vectors", QuoteVariant::Info),
            ("> 💡 idea", QuoteVariant::Info),
            ("> Warning: slow", QuoteVariant::Warning),
            ("> ✅ accepted", QuoteVariant::Success),
            ("> just a quote", QuoteVariant::Neutral),
        ];
        for (source, variant) in cases {
            let doc = advanced(source);
            assert_eq!(
                doc.blocks,
                vec![Block::Quote {
                    variant,
                    content: text(&source[2..]),
                }],
                "source: {source}"
            );
        }
    }

    #[test]
    fn basic_profile_quotes_are_always_neutral() {
        let doc = basic("> warning: careful");
        assert_eq!(
            doc.blocks,
            vec![Block::Quote {
                variant: QuoteVariant::Neutral,
                content: text("warning: careful"),
            }]
        );
    }

    #[test]
    fn rule_requires_exact_dashes() {
        assert_eq!(advanced("---").blocks, vec![Block::Rule]);
        assert_eq!(
            advanced("----").blocks,
            vec![Block::Paragraph(text("----"))]
        );
    }

    #[test]
    fn blank_lines_become_spacers() {
        let doc = advanced("a\n\n   \nb");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph(text("a")),
                Block::Spacer,
                Block::Spacer,
                Block::Paragraph(text("b")),
            ]
        );
    }
}
