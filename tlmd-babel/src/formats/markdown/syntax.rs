//! The two knobs of the markdown format: the delimiter table and the link pattern.

use crate::entity::Style;
use crate::error::FormatError;
use crate::utf16;
use once_cell::sync::Lazy;
use regex::Regex;

/// Link pattern used when none is given. Group 1 is the label, group 2 the url.
pub const DEFAULT_URL_PATTERN: &str = r"\[([^\]]*?)\]\(([\s\S]*?)\)";

static DEFAULT_DELIMITERS: Lazy<Delimiters> = Lazy::new(|| {
    let mut delimiters = Delimiters::empty();
    for (marker, style) in [
        ("**", Style::Bold),
        ("__", Style::Italic),
        ("~~", Style::Strikethrough),
        ("`", Style::Code),
        ("```", Style::Pre),
    ] {
        delimiters.insert_unchecked(marker.to_string(), style);
    }
    delimiters
});

static DEFAULT_URL_REGEX: Lazy<UrlPattern> = Lazy::new(|| {
    UrlPattern::new(DEFAULT_URL_PATTERN).expect("default url pattern must compile")
});

/// The built-in delimiter table.
pub fn default_delimiters() -> &'static Delimiters {
    &DEFAULT_DELIMITERS
}

/// The built-in link pattern.
pub fn default_url_pattern() -> &'static UrlPattern {
    &DEFAULT_URL_REGEX
}

/// A marker string and the style it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiter {
    marker: String,
    units: Vec<u16>,
    style: Style,
}

impl Delimiter {
    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// The marker as UTF-16 code units.
    pub fn units(&self) -> &[u16] {
        &self.units
    }
}

/// Mapping from marker strings to styles.
///
/// Entries are kept ordered by descending UTF-16 length so that a marker is
/// always tried before any shorter marker it starts with (```` ``` ```` before
/// `` ` ``). Markers of equal length keep their insertion order.
///
/// An empty table is meaningful: handing one to the parser disables delimiter
/// parsing entirely, which is different from passing no table at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    entries: Vec<Delimiter>,
}

impl Delimiters {
    /// A table with no markers.
    pub fn empty() -> Self {
        Delimiters {
            entries: Vec::new(),
        }
    }

    /// Build a table from `(marker, style)` pairs. Later pairs replace earlier
    /// ones with the same marker.
    pub fn new<I, S>(pairs: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = (S, Style)>,
        S: Into<String>,
    {
        let mut delimiters = Self::empty();
        for (marker, style) in pairs {
            delimiters.insert(marker, style)?;
        }
        Ok(delimiters)
    }

    /// Add a marker, or change the style of an existing one.
    pub fn insert(&mut self, marker: impl Into<String>, style: Style) -> Result<(), FormatError> {
        let marker = marker.into();
        if marker.is_empty() {
            return Err(FormatError::InvalidDelimiter(
                "marker must not be empty".to_string(),
            ));
        }
        self.insert_unchecked(marker, style);
        Ok(())
    }

    fn insert_unchecked(&mut self, marker: String, style: Style) {
        if let Some(existing) = self.entries.iter_mut().find(|d| d.marker == marker) {
            existing.style = style;
            return;
        }
        let units = utf16::encode(&marker);
        self.entries.push(Delimiter {
            marker,
            units,
            style,
        });
        self.entries
            .sort_by(|a, b| b.units.len().cmp(&a.units.len()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in lookup order (longest marker first).
    pub fn iter(&self) -> impl Iterator<Item = &Delimiter> {
        self.entries.iter()
    }

    /// The first delimiter whose marker starts at `at`.
    pub fn match_at(&self, units: &[u16], at: usize) -> Option<&Delimiter> {
        let rest = units.get(at..)?;
        self.entries.iter().find(|d| rest.starts_with(&d.units))
    }

    /// The marker used to write `style`, if any.
    pub fn marker_for(&self, style: Style) -> Option<&str> {
        self.entries
            .iter()
            .find(|d| d.style == style)
            .map(|d| d.marker.as_str())
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        default_delimiters().clone()
    }
}

/// A `[label](url)` link found by [`UrlPattern::match_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Length of the whole match in UTF-16 units.
    pub len: usize,
    pub label: Vec<u16>,
    pub url: String,
}

/// Inline link pattern with a label group and a url group.
///
/// The pattern is matched against the whole message, so `^`, `\A` and `\b`
/// see the real surroundings of the scan position: `^` only matches at the
/// start of the message.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    source: String,
    regex: Regex,
}

impl UrlPattern {
    /// Compile `pattern`. It must have at least two capture groups; the first
    /// is the visible label and the second the link target.
    pub fn new(pattern: &str) -> Result<Self, FormatError> {
        let regex =
            Regex::new(pattern).map_err(|e| FormatError::InvalidUrlPattern(e.to_string()))?;
        // captures_len counts the implicit whole-match group
        let groups = regex.captures_len() - 1;
        if groups < 2 {
            return Err(FormatError::InvalidUrlPattern(format!(
                "expected at least 2 capture groups, found {groups}"
            )));
        }
        Ok(UrlPattern {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a link starting exactly at `at`.
    ///
    /// Decodes the whole of `units`; use [`UrlPattern::scanner`] when probing
    /// many positions of the same text.
    pub fn match_at(&self, units: &[u16], at: usize) -> Option<LinkMatch> {
        self.scanner(units).match_at(at)
    }

    /// Prepare `units` for matching at increasing positions.
    pub fn scanner(&self, units: &[u16]) -> LinkScanner<'_> {
        LinkScanner::new(self, units)
    }
}

/// Link matcher over one decoded snapshot of the message.
///
/// Each search looks for the leftmost link at or after the requested
/// position. When that link starts further on, no link can start in between,
/// so positions up to it are answered without searching again. The snapshot
/// goes stale once the units it was built from change.
#[derive(Debug)]
pub struct LinkScanner<'p> {
    pattern: &'p UrlPattern,
    text: String,
    /// UTF-16 offset and byte offset of every char of `text`.
    char_units: Vec<usize>,
    char_bytes: Vec<usize>,
    last: Option<Search>,
}

#[derive(Debug)]
struct Search {
    from: usize,
    /// Start of the leftmost match found from `from`, `usize::MAX` if none.
    start: usize,
    /// The link at `start`; `None` for an empty match.
    link: Option<LinkMatch>,
}

impl<'p> LinkScanner<'p> {
    fn new(pattern: &'p UrlPattern, units: &[u16]) -> Self {
        let text = utf16::decode(units);
        let mut char_units = Vec::with_capacity(units.len());
        let mut char_bytes = Vec::with_capacity(units.len());
        let mut unit = 0;
        for (byte, c) in text.char_indices() {
            char_units.push(unit);
            char_bytes.push(byte);
            unit += c.len_utf16();
        }
        LinkScanner {
            pattern,
            text,
            char_units,
            char_bytes,
            last: None,
        }
    }

    /// Match a link starting exactly at `at`.
    ///
    /// Positions past the end or inside a surrogate pair never match. Empty
    /// matches are rejected since they would never advance the scan.
    pub fn match_at(&mut self, at: usize) -> Option<LinkMatch> {
        let index = self.char_units.binary_search(&at).ok()?;
        if let Some(last) = &self.last {
            if last.from <= at && at < last.start {
                return None;
            }
            if at == last.start {
                return last.link.clone();
            }
        }

        let found = self
            .pattern
            .regex
            .captures_at(&self.text, self.char_bytes[index])
            .and_then(|caps| {
                let whole = caps.get(0)?;
                let start = self.char_bytes.binary_search(&whole.start()).ok()?;
                let link = (!whole.as_str().is_empty()).then(|| LinkMatch {
                    len: utf16::len16(whole.as_str()),
                    label: utf16::encode(caps.get(1).map_or("", |m| m.as_str())),
                    url: caps.get(2).map_or("", |m| m.as_str()).to_string(),
                });
                Some((self.char_units[start], link))
            });
        let (start, link) = found.unwrap_or((usize::MAX, None));
        let result = if start == at { link.clone() } else { None };
        self.last = Some(Search {
            from: at,
            start,
            link,
        });
        result
    }
}

impl Default for UrlPattern {
    fn default() -> Self {
        default_url_pattern().clone()
    }
}

impl PartialEq for UrlPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
