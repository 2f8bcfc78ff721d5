//! Heading classification.
//!
//! The same visual heading level is reused for unrelated roles on these
//! pages, so a heading's role is decided from local tree shape (child spans,
//! nearby siblings), never from heading text alone. Each heading is
//! classified exactly once into a tagged kind that the walker matches on.

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use super::cursor::{descendants, next_element, text_of, Cursor};

static ETYMOLOGY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Etymology.*").unwrap());

/// Semantic role of a heading within a language section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Pronunciation,
    Etymology,
    PartOfSpeech,
    Other,
}

pub fn classify(el: ElementRef<'_>) -> HeaderKind {
    if is_pronunciation(el) {
        HeaderKind::Pronunciation
    } else if is_etymology(el) {
        HeaderKind::Etymology
    } else if is_part_of_speech(el) {
        HeaderKind::PartOfSpeech
    } else {
        HeaderKind::Other
    }
}

/// Any heading that opens a new semantic section; used as the stopping
/// predicate when scanning for relation lists after a meaning.
pub fn is_section_switcher(el: ElementRef<'_>) -> bool {
    classify(el) != HeaderKind::Other
}

/// Contains a descendant span whose text is exactly "Pronunciation".
pub fn is_pronunciation(el: ElementRef<'_>) -> bool {
    spans(el).any(|s| text_of(s) == "Pronunciation")
}

/// Contains a descendant span whose text matches `Etymology.*`
/// ("Etymology", "Etymology 1", ...).
pub fn is_etymology(el: ElementRef<'_>) -> bool {
    spans(el).any(|s| ETYMOLOGY_RE.is_match(&text_of(s)))
}

/// Structural, not textual: after skipping any immediately following table
/// siblings (inflection tables), a part-of-speech heading is followed by a
/// headword paragraph and then an ordered definition list. A heading trailed
/// only by a table (e.g. "Declension") does not qualify.
pub fn is_part_of_speech(el: ElementRef<'_>) -> bool {
    let mut cur = Cursor::after(el);
    cur.skip_while(|s| s.value().name() == "table");
    let Some(p) = cur.get() else {
        return false;
    };
    if p.value().name() != "p" {
        return false;
    }
    matches!(next_element(p), Some(next) if next.value().name() == "ol")
}

fn spans(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    descendants(el).filter(|d| d.value().name() == "span")
}
