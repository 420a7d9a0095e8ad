//! Round-trip properties
//!
//! Messages are generated from the supported subset: plain runs without markup
//! characters, single-word styled spans and single-word links, concatenated in
//! any order. Arbitrary markup is only checked for panics and bounds.

use proptest::prelude::*;
use tlmd_babel::utf16;
use tlmd_babel::{parse, unparse, Entity, EntityKind};

const MARKERS: &[&str] = &["**", "__", "~~", "`", "```"];

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9éß😀🎉]{1,6}"
}

fn plain() -> impl Strategy<Value = String> {
    "[a-z😀 ]{0,6}"
}

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        plain(),
        (prop::sample::select(MARKERS), word())
            .prop_map(|(marker, word)| format!("{marker}{word}{marker}")),
        (word(), "[a-z]{1,8}").prop_map(|(label, host)| format!("[{label}](https://{host}.x)")),
    ]
}

fn message() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 0..8).prop_map(|segments| segments.concat())
}

fn kind() -> impl Strategy<Value = EntityKind> {
    prop_oneof![
        Just(EntityKind::Bold),
        Just(EntityKind::Italic),
        Just(EntityKind::Spoiler),
        Just(EntityKind::Code),
        Just(EntityKind::Pre {
            language: String::new()
        }),
        "[a-z:/.]{0,8}".prop_map(|url| EntityKind::TextUrl { url }),
        any::<i64>().prop_map(|user_id| EntityKind::MentionName { user_id }),
    ]
}

fn entity() -> impl Strategy<Value = Entity> {
    (kind(), 0usize..24, 0usize..24).prop_map(|(kind, offset, length)| {
        Entity::new(kind, offset, length)
    })
}

proptest! {
    #[test]
    fn parse_after_unparse_is_stable(md in message()) {
        let (text, entities) = parse(&md);
        let rendered = unparse(&text, &entities);
        prop_assert_eq!(parse(&rendered), (text, entities));
    }

    #[test]
    fn every_styled_segment_yields_an_entity(md in message()) {
        let expected = MARKERS
            .iter()
            .filter(|m| m.len() == 2)
            .map(|m| md.matches(m).count() / 2)
            .sum::<usize>()
            + md.matches('[').count();
        let (_, entities) = parse(&md);
        let styled_or_linked = entities
            .iter()
            .filter(|e| !matches!(e.kind, EntityKind::Code | EntityKind::Pre { .. }))
            .count();
        prop_assert_eq!(styled_or_linked, expected);
    }

    #[test]
    fn parse_keeps_entities_in_bounds(md in "[*_~`\\[\\]()ab 😀]{0,40}") {
        let (text, entities) = parse(&md);
        let len = utf16::len16(&text);
        prop_assert_eq!(text.trim(), text.as_str());
        for entity in &entities {
            prop_assert!(entity.length > 0);
            prop_assert!(entity.end() <= len, "{:?} exceeds {}", entity, len);
        }
        let _ = unparse(&text, &entities);
    }

    #[test]
    fn unparse_never_splits_surrogates(
        text in "[a😀 ]{0,12}",
        entities in prop::collection::vec(entity(), 0..6),
    ) {
        let rendered = unparse(&text, &entities);
        prop_assert!(!rendered.contains(char::REPLACEMENT_CHARACTER));
        if entities.is_empty() {
            prop_assert_eq!(rendered, text);
        }
    }
}
