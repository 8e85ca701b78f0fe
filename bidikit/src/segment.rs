//! # Segment Resolver - Direction-Coherent Run Grouping
//!
//! The main entry point of the crate. Runs the full resolution pipeline
//! over a string and returns its direction-coherent segments in logical
//! (input) order.
//!
//! ## Pipeline
//!
#![doc = simple_mermaid::mermaid!("../diagrams/resolution_pipeline.mmd")]
//!
//! Recomputation is idempotent and total: the same `(text, direction)`
//! always yields structurally identical output, and no state is shared
//! between calls.

use crate::chunk::{TypedChunk, chunk_text};
use crate::classify::BidiType;
use crate::direction::{BaseDirection, Direction};
use crate::rules::{resolve_neutral_types, resolve_weak_types};

/// A maximal run of consecutive chunks sharing one visual direction.
///
/// Segments never overlap, never contain zero chunks, and concatenating
/// their texts in order reproduces the input string exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Concatenation of the chunks' text, for convenience
    pub text: String,
    /// The shared visual direction of the chunks
    pub direction: Direction,
    /// The contributing chunks with their original and resolved types
    pub chunks: Vec<TypedChunk>,
}

impl Segment {
    /// Number of characters (not bytes) in the segment.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Map a chunk's final resolved type to a visual direction.
///
/// Anything left over after neutral resolution (`B` chunks, or the weak
/// types the simplified rules never touch) takes the paragraph direction.
const fn map_direction(resolved: BidiType, paragraph: Direction) -> Direction {
    match resolved {
        BidiType::L => Direction::Ltr,
        BidiType::R | BidiType::AL | BidiType::AN => Direction::Rtl,
        _ => paragraph,
    }
}

/// Resolve `text` into direction-coherent segments.
///
/// Pure function of `text` and `direction`; `locale` is accepted for
/// call-site compatibility but does not affect resolution. Returns an
/// empty vector for empty input.
///
/// # Examples
///
/// ```rust
/// use bidikit::{BaseDirection, Direction, resolve_segments};
///
/// // Digits flanked by Latin words resolve into one LTR run
/// let segments = resolve_segments("Hello 123 World", BaseDirection::Ltr, "en");
/// assert_eq!(segments.len(), 1);
/// assert_eq!(segments[0].direction, Direction::Ltr);
///
/// // Mixed text alternates
/// let segments = resolve_segments("مرحبا LTR text 123 !؟", BaseDirection::Auto, "ar");
/// let directions: Vec<_> = segments.iter().map(|s| s.direction).collect();
/// assert_eq!(directions, vec![Direction::Rtl, Direction::Ltr, Direction::Rtl]);
/// ```
pub fn resolve_segments(text: &str, direction: BaseDirection, locale: &str) -> Vec<Segment> {
    // Reserved for locale-aware resolution; currently a no-op.
    let _ = locale;

    if text.is_empty() {
        return Vec::new();
    }

    let paragraph = direction.paragraph(text);

    let mut chunks = chunk_text(text);
    resolve_weak_types(&mut chunks);
    resolve_neutral_types(&mut chunks, paragraph);

    group_segments(chunks, paragraph)
}

/// Accumulate consecutive chunks with identical mapped direction into
/// segments, starting a new segment on every direction change.
fn group_segments(chunks: Vec<TypedChunk>, paragraph: Direction) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();

    for chunk in chunks {
        let direction = map_direction(chunk.resolved, paragraph);

        match segments.last_mut() {
            Some(segment) if segment.direction == direction => {
                segment.text.push_str(&chunk.text);
                segment.chunks.push(chunk);
            }
            _ => segments.push(Segment {
                text: chunk.text.clone(),
                direction,
                chunks: vec![chunk],
            }),
        }
    }

    segments
}
