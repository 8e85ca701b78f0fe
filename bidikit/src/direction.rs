//! Paragraph direction detection.
//!
//! The "first strong character" scan used both standalone (to label a text)
//! and as the fallback for the `auto` base-direction policy.

use std::fmt;

use crate::classify::{BidiType, classify};

/// Visual direction of a character, chunk or segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right
    Ltr,
    /// Right to left
    Rtl,
    /// No inherent direction
    Neutral,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
            Self::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Caller-chosen paragraph base direction policy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BaseDirection {
    /// Force a left-to-right paragraph
    Ltr,
    /// Force a right-to-left paragraph
    Rtl,
    /// Detect from the first strong character, defaulting to left-to-right
    #[default]
    Auto,
}

impl BaseDirection {
    /// Resolve the policy into a concrete paragraph direction for `text`.
    ///
    /// `Auto` runs [`detect_first_strong`] and falls back to `Ltr` when the
    /// text has no strong character at all.
    pub fn paragraph(self, text: &str) -> Direction {
        match self {
            Self::Ltr => Direction::Ltr,
            Self::Rtl => Direction::Rtl,
            Self::Auto => match detect_first_strong(text).direction {
                Direction::Rtl => Direction::Rtl,
                Direction::Ltr | Direction::Neutral => Direction::Ltr,
            },
        }
    }
}

/// Result of the first-strong-character scan.
///
/// `char` and `index` are `None` (and `direction` is neutral) when no
/// character in the text classifies as `L`, `R` or `AL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstStrong {
    /// The first strong character found
    pub char: Option<char>,
    /// Its character index (not byte index) in the text
    pub index: Option<usize>,
    /// The direction it implies
    pub direction: Direction,
}

/// Find the first strong character in `text` and the direction it implies.
///
/// A single left-to-right scan, independent of segmentation.
///
/// # Examples
///
/// ```rust
/// use bidikit::{Direction, detect_first_strong};
///
/// let strong = detect_first_strong("Hello عالم 123 !مرحبا");
/// assert_eq!(strong.char, Some('H'));
/// assert_eq!(strong.index, Some(0));
/// assert_eq!(strong.direction, Direction::Ltr);
///
/// assert_eq!(detect_first_strong("123").direction, Direction::Neutral);
/// ```
pub fn detect_first_strong(text: &str) -> FirstStrong {
    for (index, ch) in text.chars().enumerate() {
        match classify(ch) {
            BidiType::L => {
                return FirstStrong {
                    char: Some(ch),
                    index: Some(index),
                    direction: Direction::Ltr,
                };
            }
            BidiType::R | BidiType::AL => {
                return FirstStrong {
                    char: Some(ch),
                    index: Some(index),
                    direction: Direction::Rtl,
                };
            }
            _ => {}
        }
    }

    FirstStrong {
        char: None,
        index: None,
        direction: Direction::Neutral,
    }
}
