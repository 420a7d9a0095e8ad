//! Parse tests (markdown → text + entities)

use tlmd_babel::format::Format;
use tlmd_babel::{parse, Delimiters, Entity, EntityKind, MarkdownFormat, Style, UrlPattern};

fn text_of(message: &str) -> String {
    parse(message).0
}

#[test]
fn test_empty_message() {
    assert_eq!(parse(""), (String::new(), vec![]));
}

#[test]
fn test_plain_message_is_untouched() {
    assert_eq!(parse("hello world"), ("hello world".to_string(), vec![]));
}

#[test]
fn test_bold() {
    assert_eq!(
        parse("**bold**"),
        ("bold".to_string(), vec![Entity::bold(0, 4)])
    );
}

#[test]
fn test_every_default_marker() {
    let (text, entities) = parse("**b** __i__ ~~s~~ `c` ```p```");
    assert_eq!(text, "b i s c p");
    assert_eq!(
        entities,
        vec![
            Entity::bold(0, 1),
            Entity::italic(2, 1),
            Entity::strikethrough(4, 1),
            Entity::code(6, 1),
            Entity::pre(8, 1, ""),
        ]
    );
}

#[test]
fn test_code_between_words() {
    assert_eq!(
        parse("a `code` b"),
        ("a code b".to_string(), vec![Entity::code(2, 4)])
    );
}

#[test]
fn test_unterminated_delimiter() {
    assert_eq!(parse("**bold"), ("**bold".to_string(), vec![]));
    assert_eq!(parse("a ` b"), ("a ` b".to_string(), vec![]));
}

#[test]
fn test_adjacent_entities() {
    assert_eq!(
        parse("**a** **b**"),
        (
            "a b".to_string(),
            vec![Entity::bold(0, 1), Entity::bold(2, 1)]
        )
    );
}

#[test]
fn test_link() {
    assert_eq!(
        parse("[x](http://y)"),
        ("x".to_string(), vec![Entity::text_url(0, 1, "http://y")])
    );
}

#[test]
fn test_link_after_bold() {
    assert_eq!(
        parse("**hi** [there](https://e.x)!"),
        (
            "hi there!".to_string(),
            vec![Entity::bold(0, 2), Entity::text_url(3, 5, "https://e.x")]
        )
    );
}

#[test]
fn test_mention_link_parses_as_text_url() {
    assert_eq!(
        parse("[bob](tg://user?id=7)"),
        ("bob".to_string(), vec![Entity::text_url(0, 3, "tg://user?id=7")])
    );
}

#[test]
fn test_unclosed_link_is_literal() {
    assert_eq!(text_of("[x](http://y"), "[x](http://y");
    assert_eq!(text_of("[x] (y)"), "[x] (y)");
}

#[test]
fn test_pre_spans_lines() {
    let (text, entities) = parse("look:\n```\nfn main() {}\n```");
    // The trailing newline inside the block is trimmed away with the text.
    assert_eq!(text, "look:\n\nfn main() {}");
    assert_eq!(entities, vec![Entity::pre(6, 13, "")]);
}

#[test]
fn test_code_protects_its_content() {
    assert_eq!(
        parse("`[x](y) **z**`"),
        ("[x](y) **z**".to_string(), vec![Entity::code(0, 12)])
    );
}

#[test]
fn test_bold_content_is_scanned() {
    assert_eq!(
        parse("**a `b` c**"),
        (
            "a b c".to_string(),
            vec![Entity::bold(0, 5), Entity::code(2, 1)]
        )
    );
}

#[test]
fn test_zero_length_pair_is_literal() {
    assert_eq!(parse("****"), ("****".to_string(), vec![]));
    assert_eq!(parse("``"), ("``".to_string(), vec![]));
}

#[test]
fn test_emoji_offsets_count_two_units() {
    assert_eq!(
        parse("🎉🎉 **ok** 🎉"),
        ("🎉🎉 ok 🎉".to_string(), vec![Entity::bold(5, 2)])
    );
}

#[test]
fn test_styled_emoji() {
    assert_eq!(
        parse("__😀__"),
        ("😀".to_string(), vec![Entity::italic(0, 2)])
    );
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    assert_eq!(
        parse("\n  ` x `  \n"),
        ("x".to_string(), vec![Entity::code(0, 1)])
    );
}

#[test]
fn test_entity_on_whitespace_only_is_dropped() {
    assert_eq!(parse("** ** a"), ("a".to_string(), vec![]));
}

#[test]
fn test_explicit_empty_table_returns_message_unchanged() {
    let format = MarkdownFormat::new().without_delimiters();
    assert_eq!(
        format.parse(" **a** "),
        (" **a** ".to_string(), vec![])
    );
}

#[test]
fn test_custom_markers() {
    let table = Delimiters::new([
        ("||", Style::Spoiler),
        ("++", Style::Underline),
        ("**", Style::Bold),
    ])
    .unwrap();
    let format = MarkdownFormat::new().with_delimiters(table);
    assert_eq!(
        format.parse("||s|| ++u++ __i__"),
        (
            "s u __i__".to_string(),
            vec![
                Entity::new(EntityKind::Spoiler, 0, 1),
                Entity::new(EntityKind::Underline, 2, 1),
            ]
        )
    );
}

#[test]
fn test_custom_url_pattern() {
    let pattern = UrlPattern::new(r"\{([^}]*)\}<([^>]*)>").unwrap();
    let format = MarkdownFormat::new().with_url_pattern(pattern);
    assert_eq!(
        format.parse("see {docs}<https://d.x> and [no](link)"),
        (
            "see docs and [no](link)".to_string(),
            vec![Entity::text_url(4, 4, "https://d.x")]
        )
    );
}

#[test]
fn test_long_plain_message_scans_in_linear_time() {
    // Every position is tried for a link; the text must not be re-decoded each time.
    let mut message = "a".repeat(200_000);
    message.push_str(" [end](https://e.x)");
    let started = std::time::Instant::now();
    let (text, entities) = parse(&message);
    let elapsed = started.elapsed();

    assert_eq!(text.len(), 200_004);
    assert_eq!(entities, vec![Entity::text_url(200_001, 3, "https://e.x")]);
    assert!(
        elapsed < std::time::Duration::from_secs(5),
        "parsing took {elapsed:?}"
    );
}

#[test]
fn test_caret_in_custom_pattern_anchors_to_message_start() {
    let pattern = UrlPattern::new(r"^<([^>]*)>\(([^)]*)\)").unwrap();
    let format = MarkdownFormat::new().with_url_pattern(pattern);
    assert_eq!(
        format.parse("<a>(u) <b>(v)"),
        (
            "a <b>(v)".to_string(),
            vec![Entity::text_url(0, 1, "u")]
        )
    );
}
