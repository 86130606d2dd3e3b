//! Class-assignment criterion override

use kaigyo_core::{resolve_class, BreakType, LineBreaker};

fn verdicts(breaker: &mut LineBreaker, text: &str) -> Vec<BreakType> {
    breaker.set_text(text);
    let len = text.encode_utf16().count();
    (0..=len).map(|p| breaker.break_at(p).unwrap()).collect()
}

#[test]
fn test_criterion_matching_standard_resolution_changes_nothing() {
    let mut standard = LineBreaker::new();
    let mut custom = LineBreaker::builder()
        .criterion(|raw, gc| resolve_class(raw, gc))
        .build()
        .unwrap();

    for text in [
        "Hello, breaker",
        "a\u{0301}b",
        "あゃ 12.3",
        "ก\u{0E31}ข",
        "\u{1F1EB}\u{1F1F7}\u{1F1EB}\u{1F1F7}",
    ] {
        assert_eq!(
            verdicts(&mut standard, text),
            verdicts(&mut custom, text),
            "text {text:?}"
        );
    }
}

#[test]
fn test_identity_criterion_leaves_raw_classes_visible() {
    // Small kana stay CJ instead of resolving to NS, so no rule holds
    // them to the preceding character any more.
    let mut standard = LineBreaker::new();
    standard.set_text("あゃ");
    assert_eq!(standard.break_at(1).unwrap(), BreakType::FORBIDDEN);

    let mut identity = LineBreaker::builder().criterion(|raw, _| raw).build().unwrap();
    identity.set_text("あゃ");
    assert_eq!(identity.break_at(1).unwrap(), BreakType::ALLOWED);
}

#[test]
fn test_identity_criterion_keeps_thai_marks_unresolved() {
    // Default resolution turns the Thai vowel sign (SA, Mn) into CM and
    // absorbs it into its base.
    let mut standard = LineBreaker::new();
    standard.set_text("ก\u{0E31}ข");
    assert_eq!(standard.break_at(1).unwrap(), BreakType::FORBIDDEN);

    let mut identity = LineBreaker::builder().criterion(|raw, _| raw).build().unwrap();
    identity.set_text("ก\u{0E31}ข");
    assert_eq!(identity.break_at(1).unwrap(), BreakType::ALLOWED);
}

#[test]
fn test_criterion_can_force_a_single_class() {
    use kaigyo_core::LineBreakClass;

    // Everything glued: only the mandatory end break remains
    let mut glued = LineBreaker::builder()
        .criterion(|_, _| LineBreakClass::GL)
        .build()
        .unwrap();
    glued.set_text("a b c");
    let breaks: Vec<_> = glued.segments().collect();
    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].index, 5);
    assert_eq!(breaks[0].text, "a b c");
}
