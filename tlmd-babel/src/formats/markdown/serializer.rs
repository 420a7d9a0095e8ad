//! Markdown serialization (plain text + entities → markdown)
//!
//! Every entity contributes an opening and a closing insertion. Insertions are
//! ordered by position, then by a tag derived from the entity's index (`+i` to
//! open, `-i` to close), and applied from the end of the text backwards so that
//! positions computed against the plain text stay valid.

use super::syntax::{default_delimiters, Delimiters};
use crate::entity::Entity;
use crate::utf16;

struct Insertion {
    at: usize,
    tag: isize,
    what: String,
}

/// Write `text` back as markdown, re-inserting the markup for `entities`.
///
/// `delimiters` follows the same convention as the parser: `None` uses the
/// built-in table and an empty table leaves the text untouched. Entities whose
/// kind has no marker are written as `[label](url)` when they carry a link and
/// skipped otherwise. Overlapping or out-of-range entities are not rejected;
/// out-of-range positions clamp to the end of the text.
pub fn unparse_markdown(
    text: &str,
    entities: &[Entity],
    delimiters: Option<&Delimiters>,
) -> String {
    if text.is_empty() || entities.is_empty() {
        return text.to_string();
    }
    let delimiters = match delimiters {
        Some(table) if table.is_empty() => return text.to_string(),
        Some(table) => table,
        None => default_delimiters(),
    };

    let mut insertions = Vec::with_capacity(entities.len() * 2);
    for (index, entity) in entities.iter().enumerate() {
        let tag = index as isize;
        let start = entity.offset;
        let end = entity.end();
        let marker = entity
            .kind
            .style()
            .and_then(|style| delimiters.marker_for(style));
        if let Some(marker) = marker {
            insertions.push(Insertion {
                at: start,
                tag,
                what: marker.to_string(),
            });
            insertions.push(Insertion {
                at: end,
                tag: -tag,
                what: marker.to_string(),
            });
        } else if let Some(url) = entity.kind.link_url() {
            insertions.push(Insertion {
                at: start,
                tag,
                what: "[".to_string(),
            });
            insertions.push(Insertion {
                at: end,
                tag: -tag,
                what: format!("]({url})"),
            });
        }
    }

    insertions.sort_by_key(|insertion| (insertion.at, insertion.tag));

    let mut units = utf16::encode(text);
    while let Some(Insertion { at, what, .. }) = insertions.pop() {
        let mut at = at.min(units.len());
        while utf16::within_surrogate(&units, at) {
            at += 1;
        }
        units.splice(at..at, what.encode_utf16());
    }

    log::debug!("unparsed {} entities", entities.len());
    utf16::decode(&units)
}
