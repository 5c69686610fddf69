//! Read-only view of an editing surface's document.
//!
//! The editing surface owns the real node tree; the engine only needs each
//! block's flattened text and where that text starts in the document's
//! coordinate space. Offsets are UTF-8 byte offsets.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, DocumentResult};
use crate::markdown;

/// Blank lines separating plain-text paragraphs.
static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*(?:\r?\n)+").expect("valid regex"));

/// Kind of block-level node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Body paragraph.
    #[default]
    Paragraph,
    /// Section heading.
    Heading,
    /// Item of a bulleted or numbered list.
    ListItem,
}

/// One block-level node: its flattened text and absolute start offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Block {
    /// Node kind.
    #[serde(default)]
    pub kind: BlockKind,
    /// Flattened text content.
    pub text: String,
    /// Absolute offset of the first byte of `text`.
    pub offset: usize,
}

impl Block {
    /// Create a block.
    pub fn new(kind: BlockKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// Absolute offset one past the last byte of the block's text.
    ///
    /// Saturates for a block that ends past `usize::MAX`; [`Document::new`]
    /// rejects such blocks.
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.text.len())
    }
}

/// An immutable document snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DocumentRepr")]
pub struct Document {
    revision: u64,
    blocks: Vec<Block>,
}

#[derive(Deserialize)]
struct DocumentRepr {
    #[serde(default)]
    revision: u64,
    blocks: Vec<Block>,
}

impl TryFrom<DocumentRepr> for Document {
    type Error = DocumentError;

    fn try_from(repr: DocumentRepr) -> Result<Self, Self::Error> {
        Ok(Self::new(repr.blocks)?.with_revision(repr.revision))
    }
}

impl Document {
    /// Build a document from blocks, rejecting overlapping or unordered offsets.
    ///
    /// Every block's end offset must fit in a `usize`, so offset arithmetic
    /// inside the document cannot overflow.
    pub fn new(blocks: Vec<Block>) -> DocumentResult<Self> {
        let mut previous_end = 0;
        for (index, block) in blocks.iter().enumerate() {
            if block.offset < previous_end {
                return Err(DocumentError::OverlappingBlocks {
                    index,
                    offset: block.offset,
                    previous_end,
                });
            }
            previous_end = block
                .offset
                .checked_add(block.text.len())
                .ok_or(DocumentError::OffsetOverflow {
                    index,
                    offset: block.offset,
                })?;
        }
        Ok(Self {
            revision: 0,
            blocks,
        })
    }

    /// Split plain text into paragraphs at blank lines.
    ///
    /// Each paragraph is trimmed and its offset points into `source`, so
    /// annotation ranges can be used to slice `source` directly.
    pub fn from_plain_text(source: &str) -> Self {
        let mut blocks = Vec::new();
        let mut start = 0;
        let mut push = |from: usize, to: usize| {
            let raw = &source[from..to];
            let text = raw.trim();
            if !text.is_empty() {
                let lead = raw.len() - raw.trim_start().len();
                blocks.push(Block::new(BlockKind::Paragraph, text, from + lead));
            }
        };
        for sep in BLANK_LINE.find_iter(source) {
            push(start, sep.start());
            start = sep.end();
        }
        push(start, source.len());
        Self {
            revision: 0,
            blocks,
        }
    }

    /// Extract paragraphs, headings and list items from Markdown.
    ///
    /// Block offsets point into `source`. Code blocks, tables and raw HTML
    /// are not prose and produce no blocks.
    pub fn from_markdown(source: &str) -> Self {
        Self {
            revision: 0,
            blocks: markdown::prose_blocks(source),
        }
    }

    /// Decode a document sent by an editing surface.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Stamp the snapshot with the editing surface's revision counter.
    #[must_use]
    pub const fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    /// Revision counter of this snapshot.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether the document has no text at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.text.trim().is_empty())
    }

    /// All block texts joined by blank lines, for whole-document statistics.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Text between two absolute offsets, if both fall inside one block.
    pub fn slice(&self, from: usize, to: usize) -> Option<&str> {
        if from > to {
            return None;
        }
        let block = self
            .blocks
            .iter()
            .find(|b| b.offset <= from && to <= b.end())?;
        block.text.get(from - block.offset..to - block.offset)
    }
}
