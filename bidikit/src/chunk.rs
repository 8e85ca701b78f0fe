//! # Chunking - Maximal Same-Type Character Runs
//!
//! The initial classification pass over a string. Consecutive characters
//! sharing one bidirectional type are merged into a [`TypedChunk`], the
//! atomic unit the resolution rules operate on.
//!
//! Data layout example: `"Hello عالم 123"`
//! ```text
//! Characters: [H][e][l][l][o][ ][ع][ا][ل][م][ ][1][2][3]
//! Chunks:     [----L-------][WS][---AL------][WS][--EN---]
//! ```
//!
//! Invariant: concatenating every chunk's text in order reproduces the
//! input exactly — no characters are dropped, reordered or duplicated.

use crate::classify::{BidiType, classify};

/// A maximal run of consecutive characters sharing one original type.
///
/// `original` is fixed at classification time and never changes. `resolved`
/// starts equal to `original` and is rewritten in place by the resolution
/// rules; once chunks have been grouped into segments it is read-only for
/// downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedChunk {
    /// The concatenated characters of the run (never empty)
    pub text: String,
    /// The type assigned by the classifier
    pub original: BidiType,
    /// The type after rule resolution
    pub resolved: BidiType,
}

impl TypedChunk {
    fn new(text: String, bidi_type: BidiType) -> Self {
        Self {
            text,
            original: bidi_type,
            resolved: bidi_type,
        }
    }

    /// Number of characters (not bytes) in the chunk.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True if resolution rewrote this chunk's effective type.
    pub fn was_rewritten(&self) -> bool {
        self.original != self.resolved
    }
}

/// Split `text` into maximal runs of same-typed characters.
///
/// A single left-to-right scan; every chunk's `resolved` type starts out
/// equal to its `original` type. Returns an empty vector for empty input.
pub(crate) fn chunk_text(text: &str) -> Vec<TypedChunk> {
    let mut chunks: Vec<TypedChunk> = Vec::new();
    let mut current: Option<(String, BidiType)> = None;

    for ch in text.chars() {
        let bidi_type = classify(ch);

        match &mut current {
            Some((run, run_type)) if *run_type == bidi_type => run.push(ch),
            _ => {
                if let Some((run, run_type)) = current.take() {
                    chunks.push(TypedChunk::new(run, run_type));
                }
                current = Some((ch.to_string(), bidi_type));
            }
        }
    }

    if let Some((run, run_type)) = current {
        chunks.push(TypedChunk::new(run, run_type));
    }

    chunks
}
