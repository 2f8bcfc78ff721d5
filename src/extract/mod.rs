//! Per-source entry extraction.
//!
//! Each supported dictionary source gets its own extractor with a
//! source-specific section grammar; all of them share the cursor and
//! produce the same `Entry` shape. Dispatch is by source identifier; an
//! unknown identifier yields an empty entry ("no data available here").

pub mod cursor;
pub mod headers;
pub mod wiktionary;

use scraper::Html;

use crate::entry::Entry;

pub const WIKTIONARY_TR_EN: &str = "wiktionary-tr-en";

pub fn extract_entry(source: &str, html: &str, language: &str) -> Entry {
    let mut doc = Html::parse_document(html);
    match source {
        WIKTIONARY_TR_EN => wiktionary::extract(&mut doc, language),
        other => {
            tracing::warn!(source = other, "no extractor registered for source");
            Entry::default()
        }
    }
}
