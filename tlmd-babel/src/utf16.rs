//! UTF-16 helpers shared by the markdown parser and serializer.
//!
//! Entity offsets count UTF-16 code units, so both directions work on a
//! `Vec<u16>` view of the text and decode back to a `String` at the end.

use crate::entity::Entity;

/// Expand a string into UTF-16 code units.
pub fn encode(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Collapse UTF-16 code units back into a string.
///
/// Unpaired surrogates cannot appear in text produced by [`encode`] and
/// spliced on character boundaries; if one does, it becomes U+FFFD.
pub fn decode(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Length of a string in UTF-16 code units.
pub fn len16(text: &str) -> usize {
    text.encode_utf16().count()
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_surrogate(unit: u16) -> bool {
    (0xD800..=0xDFFF).contains(&unit)
}

/// Whether `index` falls between the two halves of a surrogate pair.
pub fn within_surrogate(units: &[u16], index: usize) -> bool {
    0 < index
        && index < units.len()
        && is_high_surrogate(units[index - 1])
        && is_surrogate(units[index])
}

/// First occurrence of `needle` in `haystack` starting at or after `from`.
pub fn find(haystack: &[u16], needle: &[u16], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}

/// Unicode `White_Space` plus the information separators U+001C..=U+001F.
fn is_whitespace(unit: u16) -> bool {
    char::from_u32(u32::from(unit))
        .is_some_and(|c| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

/// Trim surrounding whitespace and keep `entities` consistent with the result.
///
/// Entities of zero length, or lying entirely inside the trimmed whitespace,
/// are dropped. Entities reaching into the trimmed regions are clipped, and
/// every offset is shifted by the amount of leading whitespace removed.
pub fn strip_text(units: &mut Vec<u16>, entities: &mut Vec<Entity>) {
    let leading = units.iter().take_while(|u| is_whitespace(**u)).count();
    units.drain(..leading);
    let trailing = units.iter().rev().take_while(|u| is_whitespace(**u)).count();
    units.truncate(units.len() - trailing);
    let len = units.len();

    entities.retain_mut(|entity| {
        if entity.length == 0 || entity.end() <= leading {
            return false;
        }
        if entity.offset >= leading {
            entity.offset -= leading;
        } else {
            entity.length = entity.end() - leading;
            entity.offset = 0;
        }
        if entity.end() <= len {
            return true;
        }
        if entity.offset >= len {
            return false;
        }
        entity.length = len - entity.offset;
        true
    });
}
