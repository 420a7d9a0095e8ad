//! Markdown parsing (markdown → plain text + entities)
//!
//! A single left-to-right scan over the UTF-16 units of the message. Whenever a
//! delimiter pair or a link is found, its markup is spliced out of the text and
//! every entity recorded so far is shrunk to stay consistent with the shorter
//! text. Nothing nests: a pair is closed by the next occurrence of the same
//! marker, whatever lies in between.

use super::syntax::{default_delimiters, Delimiters, LinkScanner, UrlPattern};
use crate::entity::{Entity, EntityKind};
use crate::utf16;

/// Parse `message` into its plain text and the entities found in it.
///
/// `delimiters` selects the marker table: `None` uses the built-in table, and
/// an empty table disables parsing altogether (the message is returned as is).
/// Unterminated markers are kept as literal text.
pub fn parse_markdown(
    message: &str,
    delimiters: Option<&Delimiters>,
    url_pattern: &UrlPattern,
) -> (String, Vec<Entity>) {
    if message.is_empty() {
        return (String::new(), Vec::new());
    }
    let delimiters = match delimiters {
        Some(table) if table.is_empty() => return (message.to_string(), Vec::new()),
        Some(table) => table,
        None => default_delimiters(),
    };

    let mut text = utf16::encode(message);
    let mut entities: Vec<Entity> = Vec::new();
    // Rebuilt lazily after every splice.
    let mut links: Option<LinkScanner<'_>> = None;
    let mut i = 0;

    while i < text.len() {
        if let Some(delimiter) = delimiters.match_at(&text, i) {
            let marker = delimiter.units();
            let len = marker.len();
            match utf16::find(&text, marker, i + len + 1) {
                Some(end) => {
                    text.drain(end..end + len);
                    text.drain(i..i + len);
                    links = None;
                    shrink_for_pair(&mut entities, i, end, len);
                    entities.push(Entity::new(
                        delimiter.style().to_kind(),
                        i,
                        end - i - len,
                    ));
                    if delimiter.style().is_verbatim() {
                        i = end - len;
                    }
                    continue;
                }
                None => {
                    log::trace!(
                        "unterminated delimiter {:?} at {i}, kept as text",
                        delimiter.marker()
                    );
                }
            }
        } else if let Some(link) = links
            .get_or_insert_with(|| url_pattern.scanner(&text))
            .match_at(i)
        {
            let removed = link.len - link.label.len();
            let label_len = link.label.len();
            text.splice(i..i + link.len, link.label);
            links = None;
            shrink_for_link(&mut entities, i, removed);
            log::trace!("link at {i} with {label_len} label units");
            entities.push(Entity::new(
                EntityKind::TextUrl { url: link.url },
                i,
                label_len,
            ));
            i += label_len;
            continue;
        }
        i += 1;
    }

    utf16::strip_text(&mut text, &mut entities);
    log::debug!(
        "parsed {} units into {} entities",
        text.len(),
        entities.len()
    );
    (utf16::decode(&text), entities)
}

/// Account for a delimiter pair removed at `start` and `end` (pre-splice
/// positions). Entities enclosing both markers lose both; entities that only
/// reach past the opening marker lose one.
fn shrink_for_pair(entities: &mut [Entity], start: usize, end: usize, len: usize) {
    for entity in entities.iter_mut() {
        if entity.end() > start {
            let removed = if entity.offset <= start && entity.end() >= end + len {
                len * 2
            } else {
                len
            };
            entity.length = entity.length.saturating_sub(removed);
        }
    }
}

fn shrink_for_link(entities: &mut [Entity], start: usize, removed: usize) {
    for entity in entities.iter_mut() {
        if entity.end() > start {
            entity.length = entity.length.saturating_sub(removed);
        }
    }
}
