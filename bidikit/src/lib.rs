//! Simplified bidirectional text analysis.
//!
//! `bidikit` implements a deliberately reduced subset of the Unicode
//! Bidirectional Algorithm: per-character classification, weak- and
//! neutral-type resolution over maximal same-type chunks, grouping into
//! direction-coherent segments, and a playhead-driven reveal state machine
//! for visualizing the resolution character by character.
//!
//! Full UBA conformance (explicit embeddings, overrides, isolates, bracket
//! pairing, reordering for display) is intentionally out of scope.

pub mod chunk;
pub mod classify;
pub mod direction;
pub mod playback;
pub mod segment;

mod rules;

pub use chunk::TypedChunk;
pub use classify::{BidiType, classify, classify_basic};
pub use direction::{BaseDirection, Direction, FirstStrong, detect_first_strong};
pub use playback::{CharFrame, Playback, Speed};
pub use segment::{Segment, resolve_segments};
