//! Markdown processing utilities.
//!
//! Uses pulldown-cmark for CommonMark parsing. Two views are offered: a flat
//! prose string for whole-text scoring, and offset-preserving prose blocks for
//! annotation.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::document::{Block, BlockKind};

/// Strip markdown formatting, returning plain prose text.
///
/// Removes code blocks, inline code, HTML, YAML frontmatter, headings and
/// table structure. Keeps link text, blockquote text, list item text and
/// emphasised text (without markers).
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let text = &text[frontmatter_len(text)..];

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut result = String::with_capacity(text.len() / 2);
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Heading { .. }) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_)) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Text(t) if skip_depth == 0 => {
                result.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => {
                result.push(' ');
            }
            Event::End(TagEnd::Paragraph) if skip_depth == 0 => {
                result.push(' ');
            }
            _ => {}
        }
    }

    result
}

/// Collect paragraph, heading and list-item blocks with source offsets.
///
/// A block's text covers the source from its first text event to its last,
/// so inline markers between them (`**`, link targets) stay in the text and
/// offsets remain exact positions in `source`. Container syntax at the start
/// of a continuation line (the `>` of a blockquote, list indentation) is
/// blanked to spaces of the same byte length, so it is never counted as a
/// word. Code blocks, tables and raw HTML produce no blocks.
#[tracing::instrument(skip_all, fields(input_len = source.len()))]
pub fn prose_blocks(source: &str) -> Vec<Block> {
    let base = frontmatter_len(source);
    let body = &source[base..];
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;

    let mut blocks = Vec::new();
    let mut open: Option<OpenBlock> = None;
    let mut code_depth: usize = 0;

    let mut flush = |open: &mut Option<OpenBlock>| {
        if let Some(block) = open.take()
            && let Some(span) = block.span()
        {
            let text = block.text(body);
            if !text.trim().is_empty() {
                blocks.push(Block::new(block.kind, text, base + span.start));
            }
        }
    };

    for (event, range) in Parser::new_ext(body, options).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                flush(&mut open);
                open = Some(OpenBlock::new(BlockKind::Heading));
            }
            Event::Start(Tag::Item) => {
                flush(&mut open);
                open = Some(OpenBlock::new(BlockKind::ListItem));
            }
            Event::Start(Tag::Paragraph) => {
                // a loose list item wraps its text in a paragraph
                let in_fresh_item = open
                    .as_ref()
                    .is_some_and(|b| b.kind == BlockKind::ListItem && b.pieces.is_empty());
                if !in_fresh_item {
                    flush(&mut open);
                    open = Some(OpenBlock::new(BlockKind::Paragraph));
                }
            }
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut open);
                code_depth += 1;
            }
            Event::End(TagEnd::CodeBlock) => {
                code_depth = code_depth.saturating_sub(1);
            }
            Event::Start(Tag::List(_) | Tag::Table(_) | Tag::BlockQuote(_) | Tag::HtmlBlock) => {
                flush(&mut open);
            }
            Event::End(TagEnd::Heading(_) | TagEnd::Paragraph | TagEnd::Item) => {
                flush(&mut open);
            }
            Event::Text(_) | Event::Code(_) if code_depth == 0 => {
                if let Some(block) = open.as_mut() {
                    block.pieces.push(range);
                }
            }
            _ => {}
        }
    }
    flush(&mut open);

    blocks
}

/// A block being collected: its kind and the source ranges of its text events.
struct OpenBlock {
    kind: BlockKind,
    pieces: Vec<Range<usize>>,
}

impl OpenBlock {
    const fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            pieces: Vec::new(),
        }
    }

    fn span(&self) -> Option<Range<usize>> {
        Some(self.pieces.first()?.start..self.pieces.last()?.end)
    }

    /// Source text of the span with line-leading container syntax blanked.
    fn text(&self, body: &str) -> String {
        let Some(span) = self.span() else {
            return String::new();
        };
        let mut text = String::with_capacity(span.len());
        let mut cursor = span.start;
        for piece in &self.pieces {
            if piece.start > cursor {
                push_gap(&mut text, &body[cursor..piece.start]);
            }
            let from = piece.start.max(cursor);
            if piece.end > from {
                text.push_str(&body[from..piece.end]);
                cursor = piece.end;
            }
        }
        text
    }
}

/// Copy a gap between text events, blanking ASCII after its last newline.
fn push_gap(out: &mut String, gap: &str) {
    let Some(newline) = gap.rfind('\n') else {
        out.push_str(gap);
        return;
    };
    let (head, prefix) = gap.split_at(newline + 1);
    out.push_str(head);
    out.extend(prefix.chars().map(|c| if c.is_ascii() { ' ' } else { c }));
}

/// Length in bytes of a leading YAML frontmatter block delimited by `---` lines.
fn frontmatter_len(text: &str) -> usize {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("---") {
        return 0;
    }
    let lead = text.len() - trimmed.len();

    let after_opening = &trimmed[3..];
    let Some(close_pos) = after_opening.find("\n---") else {
        return 0;
    };

    let remainder = &after_opening[close_pos + 4..];
    let remainder = remainder.strip_prefix('\n').unwrap_or(remainder);
    lead + trimmed.len() - remainder.len()
}
