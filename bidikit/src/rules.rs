//! # Resolution Rules - Weak and Neutral Type Rewriting
//!
//! The ordered rule pipeline that rewrites each chunk's `resolved` type.
//! All passes mutate a working buffer scoped to one resolve call; nothing
//! here touches `original` types and no state survives between calls.
//!
//! Rule order is fixed:
//!
//! 1. **W2** — European numbers after an Arabic letter become Arabic numbers
//! 2. **W4** — a separator between (or trailing) same-typed numbers joins them
//! 3. **ET propagation** — terminators adjacent to European numbers become EN,
//!    forward pass (`EN ET` → `EN EN`) then backward pass (`ET EN` → `EN EN`)
//! 4. **W7** — European numbers after an L context become L, including through
//!    one intervening neutral chunk
//! 5. **W7 bridge** — an other-neutral flanked by L on both sides becomes L,
//!    so isolated punctuation can't split a left-to-right run
//! 6. **N-rule** — remaining neutrals take the shared flanking strong type,
//!    or the paragraph direction when the flanks disagree or are missing
//!
//! The W-rules skip whitespace chunks when looking for context; the N-rule
//! does a full scan with no whitespace skip. That asymmetry is intentional
//! and must not be simplified away.

use crate::chunk::TypedChunk;
use crate::classify::BidiType;
use crate::direction::Direction;

/// Index of the nearest non-whitespace chunk before `from`, judged by
/// resolved type.
fn prev_skipping_ws(chunks: &[TypedChunk], from: usize) -> Option<usize> {
    chunks[..from]
        .iter()
        .rposition(|chunk| chunk.resolved != BidiType::WS)
}

/// Index of the nearest non-whitespace chunk after `from`, judged by
/// resolved type.
fn next_skipping_ws(chunks: &[TypedChunk], from: usize) -> Option<usize> {
    chunks[from + 1..]
        .iter()
        .position(|chunk| chunk.resolved != BidiType::WS)
        .map(|offset| from + 1 + offset)
}

/// Apply the weak-type rules, in order, over the chunk buffer.
pub(crate) fn resolve_weak_types(chunks: &mut [TypedChunk]) {
    rewrite_en_after_al(chunks);
    absorb_number_separators(chunks);
    propagate_terminators(chunks);
    rewrite_en_after_l(chunks);
    bridge_neutral_between_l(chunks);
}

/// W2: `AL ... EN` → `AL ... AN`.
fn rewrite_en_after_al(chunks: &mut [TypedChunk]) {
    for index in 0..chunks.len() {
        if chunks[index].resolved != BidiType::EN {
            continue;
        }
        if let Some(prev) = prev_skipping_ws(chunks, index)
            && chunks[prev].resolved == BidiType::AL
        {
            chunks[index].resolved = BidiType::AN;
        }
    }
}

/// W4: a separator (`ES`/`CS`) preceded by a number takes the number's type
/// when the following number matches, or when the separator is the final
/// chunk (which absorbs a lone trailing separator, e.g. `"123,"`).
fn absorb_number_separators(chunks: &mut [TypedChunk]) {
    for index in 0..chunks.len() {
        if !matches!(chunks[index].resolved, BidiType::ES | BidiType::CS) {
            continue;
        }

        let Some(prev) = prev_skipping_ws(chunks, index) else {
            continue;
        };
        let number_type = chunks[prev].resolved;
        if !matches!(number_type, BidiType::EN | BidiType::AN) {
            continue;
        }

        let next_matches = next_skipping_ws(chunks, index)
            .is_some_and(|next| chunks[next].resolved == number_type);

        if next_matches || index == chunks.len() - 1 {
            chunks[index].resolved = number_type;
        }
    }
}

/// ET propagation: terminators touching a European number become EN.
///
/// Two passes so terminators on either side convert, and chains of
/// terminators convert transitively (`EN ET ET` and `ET ET EN` both
/// collapse fully).
fn propagate_terminators(chunks: &mut [TypedChunk]) {
    // Forward: EN before ET
    for index in 0..chunks.len() {
        if chunks[index].resolved == BidiType::ET
            && let Some(prev) = prev_skipping_ws(chunks, index)
            && chunks[prev].resolved == BidiType::EN
        {
            chunks[index].resolved = BidiType::EN;
        }
    }

    // Backward: ET before EN
    for index in (0..chunks.len()).rev() {
        if chunks[index].resolved == BidiType::ET
            && let Some(next) = next_skipping_ws(chunks, index)
            && chunks[next].resolved == BidiType::EN
        {
            chunks[index].resolved = BidiType::EN;
        }
    }
}

/// W7: `L ... EN` → `L ... L`, also reaching through a single neutral
/// chunk (`L , 123` resolves both the separator and the number to L).
fn rewrite_en_after_l(chunks: &mut [TypedChunk]) {
    for index in 0..chunks.len() {
        if chunks[index].resolved != BidiType::EN {
            continue;
        }

        let Some(prev) = prev_skipping_ws(chunks, index) else {
            continue;
        };

        if chunks[prev].resolved == BidiType::L {
            chunks[index].resolved = BidiType::L;
            continue;
        }

        // One intervening neutral is allowed when an L sits behind it
        if matches!(
            chunks[prev].resolved,
            BidiType::CS | BidiType::ES | BidiType::ET | BidiType::ON
        ) && let Some(before) = prev_skipping_ws(chunks, prev)
            && chunks[before].resolved == BidiType::L
        {
            chunks[prev].resolved = BidiType::L;
            chunks[index].resolved = BidiType::L;
        }
    }
}

/// W7 bridge (extension beyond strict UBA): an `ON` chunk with L on both
/// sides becomes L, keeping isolated punctuation from breaking an LTR run.
fn bridge_neutral_between_l(chunks: &mut [TypedChunk]) {
    for index in 0..chunks.len() {
        if chunks[index].resolved != BidiType::ON {
            continue;
        }

        let prev_is_l = prev_skipping_ws(chunks, index)
            .is_some_and(|prev| chunks[prev].resolved == BidiType::L);
        let next_is_l = next_skipping_ws(chunks, index)
            .is_some_and(|next| chunks[next].resolved == BidiType::L);

        if prev_is_l && next_is_l {
            chunks[index].resolved = BidiType::L;
        }
    }
}

/// Simplified N-rule: every chunk still resolved to a resolvable neutral
/// takes the flanking strong type when both flanks agree, otherwise the
/// paragraph direction's strong type.
///
/// The scan runs left to right and mutates in place, so a neutral already
/// rewritten to a strong type becomes valid context for the neutrals after
/// it. Unlike the W-rules there is no whitespace skip here: the nearest
/// chunk with a strong resolved type decides, whatever lies between.
pub(crate) fn resolve_neutral_types(chunks: &mut [TypedChunk], paragraph: Direction) {
    let fallback = match paragraph {
        Direction::Rtl => BidiType::R,
        Direction::Ltr | Direction::Neutral => BidiType::L,
    };

    for index in 0..chunks.len() {
        if !chunks[index].resolved.is_resolvable_neutral() {
            continue;
        }

        let preceding = chunks[..index]
            .iter()
            .rev()
            .map(|chunk| chunk.resolved)
            .find(|resolved| resolved.is_strong());
        let following = chunks[index + 1..]
            .iter()
            .map(|chunk| chunk.resolved)
            .find(|resolved| resolved.is_strong());

        chunks[index].resolved = match (preceding, following) {
            (Some(before), Some(after)) if before == after => before,
            _ => fallback,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::chunk_text;

    fn resolved(text: &str, paragraph: Direction) -> Vec<BidiType> {
        let mut chunks = chunk_text(text);
        resolve_weak_types(&mut chunks);
        resolve_neutral_types(&mut chunks, paragraph);
        chunks.into_iter().map(|chunk| chunk.resolved).collect()
    }

    #[test]
    fn test_w2_en_after_al_becomes_an() {
        let mut chunks = chunk_text("مرحبا 123");
        resolve_weak_types(&mut chunks);
        // [AL][WS][EN→AN]
        assert_eq!(chunks[0].resolved, BidiType::AL);
        assert_eq!(chunks[2].resolved, BidiType::AN);
        // The original type is untouched
        assert_eq!(chunks[2].original, BidiType::EN);
    }

    #[test]
    fn test_w2_does_not_fire_after_hebrew() {
        // R is not AL; the number stays European
        let mut chunks = chunk_text("שלום 123");
        resolve_weak_types(&mut chunks);
        assert_eq!(chunks[2].resolved, BidiType::EN);
    }

    #[test]
    fn test_w4_separator_between_numbers() {
        let mut chunks = chunk_text("123,456");
        resolve_weak_types(&mut chunks);
        // [EN][CS→EN][EN] — then W7 is a no-op without an L context
        assert_eq!(chunks[1].resolved, BidiType::EN);
    }

    #[test]
    fn test_w4_trailing_separator_absorbed() {
        let mut chunks = chunk_text("123,");
        resolve_weak_types(&mut chunks);
        assert_eq!(chunks[1].resolved, BidiType::EN);

        // After W2 turned the number Arabic, the separator follows it there
        let mut chunks = chunk_text("مرحبا 123.");
        resolve_weak_types(&mut chunks);
        assert_eq!(chunks[2].resolved, BidiType::AN);
        assert_eq!(chunks[3].resolved, BidiType::AN);
    }

    #[test]
    fn test_w4_mismatched_numbers_leave_separator() {
        // EN , AN: flanks disagree and the separator is not last
        let mut chunks = chunk_text("123,٤٥٦");
        resolve_weak_types(&mut chunks);
        assert_eq!(chunks[0].resolved, BidiType::EN);
        assert_eq!(chunks[1].resolved, BidiType::CS);
        assert_eq!(chunks[2].resolved, BidiType::AN);
    }

    #[test]
    fn test_et_propagation_both_sides() {
        // Terminator after the number
        let mut chunks = chunk_text("100%");
        resolve_weak_types(&mut chunks);
        assert_eq!(chunks[1].resolved, BidiType::EN);

        // Terminator before the number
        let mut chunks = chunk_text("$100");
        resolve_weak_types(&mut chunks);
        assert_eq!(chunks[0].resolved, BidiType::EN);

        // Chains collapse transitively: "$#100" is [ET][EN] after chunking
        // merges the terminators, and the backward pass converts the run
        let mut chunks = chunk_text("$#100");
        resolve_weak_types(&mut chunks);
        assert!(chunks.iter().all(|c| c.resolved == BidiType::EN));
    }

    #[test]
    fn test_w7_en_after_l() {
        let mut chunks = chunk_text("page 42");
        resolve_weak_types(&mut chunks);
        assert_eq!(chunks[2].resolved, BidiType::L);
    }

    #[test]
    fn test_w7_reaches_through_one_neutral() {
        // [L][WS][CS][WS][EN]: the separator and the number both become L
        let mut chunks = chunk_text("abc , 123");
        resolve_weak_types(&mut chunks);
        assert_eq!(chunks[2].resolved, BidiType::L);
        assert_eq!(chunks[4].resolved, BidiType::L);
    }

    #[test]
    fn test_w7_bridge_between_latin() {
        // '(' is ON and sits between two L chunks across whitespace
        let mut chunks = chunk_text("foo ( bar");
        resolve_weak_types(&mut chunks);
        assert_eq!(chunks[2].resolved, BidiType::L);

        // No bridge when one side is Arabic
        let mut chunks = chunk_text("foo ( مرحبا");
        resolve_weak_types(&mut chunks);
        assert_eq!(chunks[2].resolved, BidiType::ON);
    }

    #[test]
    fn test_neutrals_take_shared_strong_context() {
        // Whitespace between two Arabic words resolves to AL
        let types = resolved("مرحبا بكم", Direction::Ltr);
        assert_eq!(types, vec![BidiType::AL, BidiType::AL, BidiType::AL]);
    }

    #[test]
    fn test_neutrals_fall_back_to_paragraph() {
        // Between L and AL the flanks disagree; the paragraph decides
        let types = resolved("abc مرحبا", Direction::Ltr);
        assert_eq!(types[1], BidiType::L);

        let types = resolved("abc مرحبا", Direction::Rtl);
        assert_eq!(types[1], BidiType::R);

        // No strong context at all
        let types = resolved("!?", Direction::Rtl);
        assert_eq!(types, vec![BidiType::R]);
    }

    #[test]
    fn test_neutral_scan_does_not_skip_whitespace() {
        // In "abc ! מ" the ON chunk sees L before and R after (full scan,
        // both exist, unequal) so it falls back to the paragraph, and each
        // WS chunk resolves independently the same way.
        let types = resolved("abc ! מ", Direction::Ltr);
        assert_eq!(
            types,
            vec![
                BidiType::L, // abc
                BidiType::L, // ws
                BidiType::L, // !
                BidiType::L, // ws
                BidiType::R, // מ
            ]
        );
    }

    #[test]
    fn test_sequential_neutral_resolution_feeds_forward() {
        // Once the first WS resolves to L (paragraph fallback), it becomes
        // the nearest preceding strong type for the chunks after it. With
        // an RTL paragraph everything between L and R leans R instead.
        let types = resolved("abc ! מ", Direction::Rtl);
        assert_eq!(
            types,
            vec![
                BidiType::L,
                BidiType::R,
                BidiType::R,
                BidiType::R,
                BidiType::R,
            ]
        );
    }
}
