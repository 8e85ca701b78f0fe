//! # Playback - Incremental Reveal of a Resolution
//!
//! A per-character state machine for play/pause/step/seek visualization of
//! a resolved text. The playhead marks how many characters have been
//! "processed"; every playhead move re-projects the static segments onto
//! the character frames, so the view can never drift out of sync with the
//! resolver's output.
//!
//! ## Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/playback_lifecycle.mmd")]
//!
//! Timing is cooperative: the host calls [`Playback::poll`] from its event
//! loop and the playhead advances whenever the active speed interval has
//! elapsed. Pausing or resetting clears the clock synchronously, so no
//! further mutation can happen after the call returns. Changing the input
//! text means constructing a fresh `Playback` — generations are never
//! mixed.
//!
//! ## Usage
//!
//! ```rust
//! use bidikit::{BaseDirection, Playback, resolve_segments};
//!
//! let text = "Hello عالم";
//! let segments = resolve_segments(text, BaseDirection::Auto, "en");
//! let mut playback = Playback::new(text, segments);
//!
//! playback.seek_to_percent(50.0);
//! assert_eq!(playback.progress(), 5);
//! assert!(playback.frames()[..5].iter().all(|frame| frame.processed));
//! assert!(playback.frames()[5..].iter().all(|frame| !frame.processed));
//!
//! playback.reset();
//! assert_eq!(playback.progress(), 0);
//! ```

use web_time::{Duration, Instant};

use crate::classify::{BidiType, char_direction, classify_basic};
use crate::direction::Direction;
use crate::segment::Segment;

/// Playback speed preset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    /// One character every 200 ms
    #[default]
    Fast,
    /// One character every 500 ms
    Slow,
}

impl Speed {
    /// Interval between playhead advances.
    pub const fn interval(self) -> Duration {
        match self {
            Self::Fast => Duration::from_millis(200),
            Self::Slow => Duration::from_millis(500),
        }
    }

    /// The other preset.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Fast => Self::Slow,
            Self::Slow => Self::Fast,
        }
    }
}

/// Per-character animation state.
///
/// `bidi_type` and `direction` come from the reduced playback classifier
/// and are fixed at construction. `processed`, `group_index` and
/// `resolved` are rewritten on every playhead move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharFrame {
    /// The character itself
    pub char: char,
    /// Type from the reduced playback classifier
    pub bidi_type: BidiType,
    /// Direction implied by that type alone
    pub direction: Direction,
    /// True once the playhead has passed this character
    pub processed: bool,
    /// Index of the containing segment, set while processed
    pub group_index: Option<usize>,
    /// The containing chunk's resolved type, set while processed
    pub resolved: Option<BidiType>,
}

/// Playhead-driven reveal over a resolved text.
///
/// The only stateful piece of the crate. Owns one frame per input
/// character plus the segments it projects from; construct a new instance
/// whenever the input text (and therefore the segmentation) changes.
#[derive(Debug, Clone)]
pub struct Playback {
    frames: Vec<CharFrame>,
    segments: Vec<Segment>,
    progress: usize,
    speed: Speed,
    /// Instant of the last advance while playing, `None` while paused.
    /// Cleared (not merely ignored) on pause/reset so a stale tick can
    /// never mutate state afterwards.
    clock: Option<Instant>,
}

impl Playback {
    /// Build playback state for `text` and its resolved segments.
    ///
    /// The segments must come from resolving the same `text`; the caller
    /// recomputes them (and constructs a fresh `Playback`) on any text or
    /// base-direction change.
    pub fn new(text: &str, segments: Vec<Segment>) -> Self {
        let frames = text
            .chars()
            .map(|char| {
                let bidi_type = classify_basic(char);
                CharFrame {
                    char,
                    bidi_type,
                    direction: char_direction(bidi_type),
                    processed: false,
                    group_index: None,
                    resolved: None,
                }
            })
            .collect();

        Self {
            frames,
            segments,
            progress: 0,
            speed: Speed::default(),
            clock: None,
        }
    }

    /// Number of characters under playback.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when there is nothing to reveal.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Current playhead position, in `0..=len`.
    pub const fn progress(&self) -> usize {
        self.progress
    }

    /// Playhead position as a percentage of the text length.
    pub fn percent(&self) -> f64 {
        if self.frames.is_empty() {
            return 0.0;
        }
        (self.progress as f64 / self.frames.len() as f64) * 100.0
    }

    /// True while the poll-driven ticker is running.
    pub const fn is_playing(&self) -> bool {
        self.clock.is_some()
    }

    /// True once the playhead has passed the last character.
    pub fn is_finished(&self) -> bool {
        self.progress >= self.frames.len()
    }

    /// The active speed preset.
    pub const fn speed(&self) -> Speed {
        self.speed
    }

    /// Switch between the fast and slow presets without disturbing the
    /// playhead.
    pub const fn toggle_speed(&mut self) {
        self.speed = self.speed.toggled();
    }

    /// The per-character frames, in logical order.
    pub fn frames(&self) -> &[CharFrame] {
        &self.frames
    }

    /// The segments this playback projects from.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The frame at the playhead, if any remains.
    pub fn current(&self) -> Option<&CharFrame> {
        self.frames.get(self.progress)
    }

    /// Cumulative end positions (in characters) of each segment, for
    /// rendering boundary markers on a scrubber.
    pub fn markers(&self) -> Vec<usize> {
        let mut cursor = 0;
        self.segments
            .iter()
            .map(|segment| {
                cursor += segment.char_len();
                cursor
            })
            .collect()
    }

    /// Clear all processed state, rewind to the start and stop playback.
    pub fn reset(&mut self) {
        self.clock = None;
        self.progress = 0;
        self.project();
    }

    /// Start the poll-driven ticker. Restarts from the beginning when the
    /// playhead already sits at the end.
    pub fn play(&mut self) {
        if self.frames.is_empty() {
            return;
        }
        if self.is_finished() {
            self.progress = 0;
            self.project();
        }
        self.clock = Some(Instant::now());
    }

    /// Stop the ticker, leaving the playhead where it is.
    pub const fn pause(&mut self) {
        self.clock = None;
    }

    /// Toggle between playing and paused.
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance the playhead if the speed interval has elapsed.
    ///
    /// Call this from the host event loop. Returns true when the state
    /// changed and a redraw is worthwhile. Stops automatically on reaching
    /// the end of the text.
    pub fn poll(&mut self) -> bool {
        let Some(last_tick) = self.clock else {
            return false;
        };

        if last_tick.elapsed() < self.speed.interval() {
            return false;
        }

        self.progress += 1;
        self.project();

        if self.is_finished() {
            self.clock = None;
        } else {
            self.clock = Some(Instant::now());
        }

        true
    }

    /// Move the playhead forward one character, pausing playback.
    /// Saturates at the completion state.
    pub fn step_forward(&mut self) {
        self.pause();
        if self.progress < self.frames.len() {
            self.progress += 1;
            self.project();
        }
    }

    /// Move the playhead back one character, pausing playback.
    pub fn step_backward(&mut self) {
        self.pause();
        if self.progress > 0 {
            self.progress -= 1;
            self.project();
        }
    }

    /// Jump the playhead to a character position, clamped to the text
    /// length. Works before any `play` call.
    pub fn seek_to(&mut self, position: usize) {
        self.pause();
        self.progress = position.min(self.frames.len());
        self.project();
    }

    /// Jump the playhead to a percentage of the text, clamped to 0–100.
    pub fn seek_to_percent(&mut self, percent: f64) {
        let clamped = percent.clamp(0.0, 100.0);
        let position = (self.frames.len() as f64 * clamped / 100.0).round() as usize;
        self.seek_to(position);
    }

    /// Re-derive every frame's processed state from the playhead and the
    /// segments.
    ///
    /// Character positions are implicit in the cumulative chunk lengths,
    /// walked fresh on every call — the frames never cache positions
    /// independently of the segmentation.
    fn project(&mut self) {
        let mut mapping = Vec::with_capacity(self.frames.len());
        for (group_index, segment) in self.segments.iter().enumerate() {
            for chunk in &segment.chunks {
                for _ in chunk.text.chars() {
                    mapping.push((group_index, chunk.resolved));
                }
            }
        }

        for (index, frame) in self.frames.iter_mut().enumerate() {
            if index < self.progress {
                frame.processed = true;
                if let Some(&(group_index, resolved)) = mapping.get(index) {
                    frame.group_index = Some(group_index);
                    frame.resolved = Some(resolved);
                }
            } else {
                frame.processed = false;
                frame.group_index = None;
                frame.resolved = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::BaseDirection;
    use crate::segment::resolve_segments;

    fn playback(text: &str) -> Playback {
        let segments = resolve_segments(text, BaseDirection::Auto, "en");
        Playback::new(text, segments)
    }

    #[test]
    fn test_new_starts_unprocessed() {
        let playback = playback("Hello عالم");
        assert_eq!(playback.len(), 10);
        assert_eq!(playback.progress(), 0);
        assert!(!playback.is_playing());
        assert!(playback.frames().iter().all(|frame| {
            !frame.processed && frame.group_index.is_none() && frame.resolved.is_none()
        }));
    }

    #[test]
    fn test_frame_types_use_basic_classifier() {
        let playback = playback("aع1 é");
        let frames = playback.frames();
        assert_eq!(frames[0].bidi_type, BidiType::L);
        assert_eq!(frames[0].direction, Direction::Ltr);
        assert_eq!(frames[1].bidi_type, BidiType::AL);
        assert_eq!(frames[1].direction, Direction::Rtl);
        assert_eq!(frames[2].bidi_type, BidiType::EN);
        assert_eq!(frames[2].direction, Direction::Neutral);
        // The reduced classifier does not know Latin-1 letters or whitespace
        assert_eq!(frames[3].bidi_type, BidiType::ON);
        assert_eq!(frames[4].bidi_type, BidiType::ON);
    }

    #[test]
    fn test_seek_to_percent_marks_prefix() {
        let mut playback = playback("Hello عالم");

        playback.seek_to_percent(50.0);
        assert_eq!(playback.progress(), 5);
        assert!(playback.frames()[..5].iter().all(|frame| frame.processed));
        assert!(playback.frames()[5..].iter().all(|frame| !frame.processed));

        // Processed frames carry their segment's group index and the
        // containing chunk's resolved type
        for frame in &playback.frames()[..5] {
            assert!(frame.group_index.is_some());
            assert!(frame.resolved.is_some());
        }

        playback.reset();
        assert_eq!(playback.progress(), 0);
        assert!(playback.frames().iter().all(|frame| !frame.processed));
    }

    #[test]
    fn test_seek_clamps() {
        let mut playback = playback("abc");
        playback.seek_to(100);
        assert_eq!(playback.progress(), 3);
        assert!(playback.is_finished());

        playback.seek_to_percent(250.0);
        assert_eq!(playback.progress(), 3);
        playback.seek_to_percent(-10.0);
        assert_eq!(playback.progress(), 0);
    }

    #[test]
    fn test_stepping() {
        let mut playback = playback("abc");

        playback.step_forward();
        assert_eq!(playback.progress(), 1);
        playback.step_forward();
        playback.step_forward();
        assert_eq!(playback.progress(), 3);

        // Saturates at the completion state
        playback.step_forward();
        assert_eq!(playback.progress(), 3);

        playback.step_backward();
        assert_eq!(playback.progress(), 2);
        playback.step_backward();
        playback.step_backward();
        playback.step_backward();
        assert_eq!(playback.progress(), 0);
    }

    #[test]
    fn test_group_index_follows_segments() {
        // "مرحبا LTR text 123 !؟" resolves to rtl/ltr/rtl segments; frames
        // projected at full progress must pick up all three group indices
        let mut playback = playback("مرحبا LTR text 123 !؟");
        playback.seek_to(playback.len());

        let groups: Vec<usize> = playback
            .frames()
            .iter()
            .map(|frame| frame.group_index.unwrap())
            .collect();

        assert_eq!(groups.first(), Some(&0));
        assert_eq!(groups.last(), Some(&2));
        // Group indices are non-decreasing in logical order
        assert!(groups.windows(2).all(|pair| pair[0] <= pair[1]));

        // Marker positions partition the text at the segment boundaries
        assert_eq!(playback.markers(), vec![6, 18, 21]);
    }

    #[test]
    fn test_play_pause_and_poll() {
        let mut playback = playback("ab");

        // Polling while paused never mutates
        assert!(!playback.poll());
        assert_eq!(playback.progress(), 0);

        playback.play();
        assert!(playback.is_playing());

        // The interval has not elapsed yet, so the playhead stays put
        assert!(!playback.poll());
        assert_eq!(playback.progress(), 0);

        playback.pause();
        assert!(!playback.is_playing());
        assert!(!playback.poll());
    }

    #[test]
    fn test_play_at_end_restarts() {
        let mut playback = playback("ab");
        playback.seek_to(2);
        assert!(playback.is_finished());

        playback.play();
        assert_eq!(playback.progress(), 0);
        assert!(playback.is_playing());
    }

    #[test]
    fn test_speed_presets() {
        assert_eq!(Speed::Fast.interval(), Duration::from_millis(200));
        assert_eq!(Speed::Slow.interval(), Duration::from_millis(500));

        let mut playback = playback("abc");
        assert_eq!(playback.speed(), Speed::Fast);
        playback.toggle_speed();
        assert_eq!(playback.speed(), Speed::Slow);
        playback.toggle_speed();
        assert_eq!(playback.speed(), Speed::Fast);
    }

    #[test]
    fn test_empty_text() {
        let mut playback = playback("");
        assert!(playback.is_empty());
        assert_eq!(playback.percent(), 0.0);
        playback.play();
        assert!(!playback.is_playing());
        playback.seek_to_percent(50.0);
        assert_eq!(playback.progress(), 0);
    }

    #[test]
    fn test_percent() {
        let mut playback = playback("abcd");
        assert_eq!(playback.percent(), 0.0);
        playback.seek_to(1);
        assert_eq!(playback.percent(), 25.0);
        playback.seek_to(4);
        assert_eq!(playback.percent(), 100.0);
    }
}
