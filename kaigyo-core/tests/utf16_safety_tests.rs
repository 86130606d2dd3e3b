//! Surrogate-pair safety across the public API

use kaigyo_core::{BreakType, LineBreaker};

#[test]
fn test_surrogate_interior_is_always_forbidden() {
    let mut breaker = LineBreaker::new();
    let text = "a\u{1F600}b\u{1F1EB}\u{1F1F7}";
    breaker.set_text(text);

    let units: Vec<u16> = text.encode_utf16().collect();
    for position in 1..units.len() {
        let interior =
            (0xD800..0xDC00).contains(&units[position - 1]) && (0xDC00..0xE000).contains(&units[position]);
        if interior {
            assert_eq!(
                breaker.break_at(position).unwrap(),
                BreakType::FORBIDDEN,
                "position {position} splits a surrogate pair"
            );
        }
    }
}

#[test]
fn test_positions_after_supplementary_characters_stay_aligned() {
    // An off-by-one in the surrogate offsets would corrupt every verdict
    // past the first supplementary character.
    let mut breaker = LineBreaker::new();
    breaker.set_text("\u{1F600} a b");
    // code units: surrogate pair, space, a, space, b
    assert_eq!(breaker.break_at(2).unwrap(), BreakType::FORBIDDEN);
    assert_eq!(breaker.break_at(3).unwrap(), BreakType::ALLOWED);
    assert_eq!(breaker.break_at(4).unwrap(), BreakType::FORBIDDEN);
    assert_eq!(breaker.break_at(5).unwrap(), BreakType::ALLOWED);
    assert_eq!(breaker.break_at(6).unwrap(), BreakType::MANDATORY);
}

#[test]
fn test_supplementary_only_text() {
    let mut breaker = LineBreaker::new();
    breaker.set_text("\u{1F600}\u{1F601}");
    assert_eq!(breaker.break_at(0).unwrap(), BreakType::FORBIDDEN);
    assert_eq!(breaker.break_at(1).unwrap(), BreakType::FORBIDDEN);
    assert_eq!(breaker.break_at(2).unwrap(), BreakType::ALLOWED);
    assert_eq!(breaker.break_at(3).unwrap(), BreakType::FORBIDDEN);
    assert_eq!(breaker.break_at(4).unwrap(), BreakType::MANDATORY);
}

#[test]
fn test_segments_never_split_pairs() {
    let mut breaker = LineBreaker::new();
    let text = "\u{1F600}\u{1F601} \u{2F800}x";
    breaker.set_text(text);
    for segment in breaker.segments() {
        // Every yielded piece must be a well-formed string slice
        assert!(!segment.text.is_empty());
        assert!(segment.text.chars().count() > 0);
    }
}
