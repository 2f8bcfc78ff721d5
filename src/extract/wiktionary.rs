//! Wiktionary (Turkish→English) entry extractor.
//!
//! A page here has no schema: one flat sibling stream under the language
//! heading, where h3/h4 levels are reused for pronunciation, etymology,
//! part-of-speech and relation sections alike. The walker iterates the h3
//! siblings of the language anchor, classifies each once, and dispatches to
//! the matching builder. A per-call set of already-consumed headings (keyed
//! by rendered HTML) stops a part-of-speech h3 that was absorbed during
//! etymology parsing from being dispatched again by the outer walk.
//!
//! Structural absence is never an error: a missing anchor, list, or span
//! degrades to a partially empty `Entry`.

use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::{ElementRef, Html};

use super::cursor::{descendants, element_at, find_by_id, has_class, next_element, text_of, Cursor};
use super::headers::{self, HeaderKind};
use crate::entry::{DefinitionValue, Entry, Example, Meaning, PronunciationGroup};

/// Pronunciation notation label → span class carrying its values.
const NOTATIONS: &[(&str, &str)] = &[("IPA", "IPA"), ("Hyphenation", "hyphenation")];

/// Relation-list id prefixes; the lower-cased prefix names the output field.
const RELATION_KINDS: &[&str] =
    &["See_also", "Derived_terms", "Related_terms", "Synonyms", "Antonyms"];

/// Extract the entry for `language` (the anchor id, e.g. "Turkish").
///
/// Takes the document mutably: consumed usage-example sublists are detached
/// in place so they are not re-read as definition text. Only the sublist
/// currently being consumed is ever touched.
pub fn extract(doc: &mut Html, language: &str) -> Entry {
    let mut entry = Entry::default();

    let headings: Vec<NodeId> = {
        let Some(anchor) = find_by_id(doc, language) else {
            tracing::debug!(language, "language anchor not found");
            return entry;
        };
        let Some(section) = anchor.parent().and_then(ElementRef::wrap) else {
            return entry;
        };
        section
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|el| matches!(el.value().name(), "h3" | "hr"))
            .map(|el| el.id())
            .collect()
    };
    tracing::debug!(language, headings = headings.len(), "walking language section");

    let mut processed: HashSet<String> = HashSet::new();
    for id in headings {
        let (end_of_section, rendered, kind) = match element_at(doc, id) {
            Some(el) if el.value().name() == "hr" => (true, String::new(), HeaderKind::Other),
            Some(el) => (false, el.html(), headers::classify(el)),
            None => continue,
        };
        if end_of_section {
            break;
        }
        if !processed.contains(&rendered) {
            match kind {
                HeaderKind::Pronunciation => {
                    entry.pronunciation.extend(pronunciation_groups(doc, id));
                }
                HeaderKind::Etymology => {
                    entry.meanings.push(meaning_with_etymology(doc, id, &mut processed));
                }
                HeaderKind::PartOfSpeech => {
                    entry.meanings.push(meaning_without_etymology(doc, id));
                }
                HeaderKind::Other => {}
            }
        }
        processed.insert(rendered);
    }

    entry
}

/// One group per notation whose spans appear in the unordered list following
/// the pronunciation heading.
fn pronunciation_groups(doc: &Html, header: NodeId) -> Vec<PronunciationGroup> {
    let Some(header) = element_at(doc, header) else {
        return Vec::new();
    };
    let Some(list) = next_element(header).filter(|el| el.value().name() == "ul") else {
        return Vec::new();
    };
    NOTATIONS
        .iter()
        .filter_map(|&(label, class)| {
            let values: Vec<String> = descendants(list)
                .filter(|el| el.value().name() == "span" && has_class(*el, class))
                .map(text_of)
                .collect();
            (!values.is_empty()).then(|| PronunciationGroup {
                kind: label.to_string(),
                values,
            })
        })
        .collect()
}

fn meaning_with_etymology(
    doc: &mut Html,
    header: NodeId,
    processed: &mut HashSet<String>,
) -> Meaning {
    let mut meaning = Meaning::default();

    let definitions_start: Option<NodeId> = {
        let Some(header) = element_at(doc, header) else {
            return meaning;
        };
        let mut cur = Cursor::after(header);

        let mut paragraphs: Vec<String> = Vec::new();
        while let Some(el) = cur.get() {
            if el.value().name() != "p" {
                break;
            }
            paragraphs.push(text_of(el).trim().to_string());
            cur.advance();
        }
        if !paragraphs.is_empty() {
            meaning.etymology = Some(paragraphs.join("\n"));
        }

        // per-etymology pronunciation notes may sit between the etymology
        // paragraphs and the part-of-speech heading
        cur.skip_while(|el| headers::is_pronunciation(el) || el.value().name() == "ul");

        match cur.get() {
            Some(el) if headers::is_part_of_speech(el) => {
                meaning.part_of_speech = part_of_speech_label(el);
                if el.value().name() == "h3" {
                    // h3 is also in the outer walker's sibling stream; record
                    // it so the walker does not dispatch it a second time
                    processed.insert(el.html());
                }
                next_element(el).map(|el| el.id())
            }
            _ => None,
        }
    };

    if let Some(start) = definitions_start {
        process_definitions(doc, start, &mut meaning);
    }
    meaning
}

fn meaning_without_etymology(doc: &mut Html, header: NodeId) -> Meaning {
    let mut meaning = Meaning::default();

    let definitions_start: Option<NodeId> = {
        let Some(header) = element_at(doc, header) else {
            return meaning;
        };
        match part_of_speech_label(header) {
            Some(label) => {
                meaning.part_of_speech = Some(label);
                let mut cur = Cursor::after(header);
                cur.skip_while(|el| el.value().name() == "table");
                cur.get().map(|el| el.id())
            }
            None => None,
        }
    };

    if let Some(start) = definitions_start {
        process_definitions(doc, start, &mut meaning);
    }
    meaning
}

/// Label from the heading's first descendant span, lower-cased.
fn part_of_speech_label(header: ElementRef<'_>) -> Option<String> {
    descendants(header)
        .find(|el| el.value().name() == "span")
        .map(|el| text_of(el).trim().to_lowercase())
}

/// From a cursor at or before the definitions: skip descriptive paragraphs,
/// require an ordered list, build one value per item, then scan for trailing
/// relation lists.
fn process_definitions(doc: &mut Html, start: NodeId, meaning: &mut Meaning) {
    let Some((list_id, item_ids)) = locate_definition_list(doc, start) else {
        return;
    };

    for item in item_ids {
        let (sublist, examples) = item_usage_examples(doc, item);
        if let Some(sublist) = sublist {
            if let Some(mut node) = doc.tree.get_mut(sublist) {
                node.detach();
            }
        }
        let Some(text) = element_at(doc, item).map(|el| text_of(el).trim().to_string()) else {
            continue;
        };
        meaning.values.push(DefinitionValue { text, examples });
    }

    // A section with a missing list keeps trailing relation data out of
    // reach: scanning past it could attach the next section's lists to this
    // meaning.
    if !meaning.values.is_empty() {
        collect_relation_lists(doc, list_id, meaning);
    }
}

fn locate_definition_list(doc: &Html, start: NodeId) -> Option<(NodeId, Vec<NodeId>)> {
    let mut cur = Cursor::from(element_at(doc, start)?);
    cur.skip_while(|el| el.value().name() == "p");
    if !cur.is_at("ol") {
        return None;
    }
    let list = cur.get()?;
    let items = descendants(list)
        .filter(|el| el.value().name() == "li")
        .map(|el| el.id())
        .collect();
    Some((list.id(), items))
}

/// Usage examples live in a definition sublist nested under the item. The
/// caller detaches the sublist before reading the item text so example
/// markup does not leak into the definition.
fn item_usage_examples(doc: &Html, item: NodeId) -> (Option<NodeId>, Vec<Example>) {
    let Some(item) = element_at(doc, item) else {
        return (None, Vec::new());
    };
    let Some(sublist) = descendants(item).find(|el| el.value().name() == "dl") else {
        return (None, Vec::new());
    };
    let examples = descendants(sublist)
        .filter(|el| has_class(*el, "h-usage-example"))
        .filter_map(|block| {
            let example = descendants(block).find(|el| has_class(*el, "e-example"))?;
            let translation = descendants(block)
                .find(|el| has_class(*el, "e-translation"))
                .map(text_of);
            Some(Example { example: text_of(example), translation })
        })
        .collect();
    (Some(sublist.id()), examples)
}

/// Scan forward from the definition list, stopping at the next section
/// switcher, and pick up any relation lists along the way.
fn collect_relation_lists(doc: &Html, list: NodeId, meaning: &mut Meaning) {
    let Some(list) = element_at(doc, list) else {
        return;
    };
    let mut cur = Cursor::from(list);
    while let Some(el) = cur.get() {
        if headers::is_section_switcher(el) {
            break;
        }
        for &kind in RELATION_KINDS {
            if let Some(items) = relation_items(el, kind) {
                let slot = match kind {
                    "See_also" => &mut meaning.see_also,
                    "Derived_terms" => &mut meaning.derived_terms,
                    "Related_terms" => &mut meaning.related_terms,
                    "Synonyms" => &mut meaning.synonyms,
                    _ => &mut meaning.antonyms,
                };
                *slot = Some(items);
            }
        }
        cur.advance();
    }
}

/// A relation heading is h3–h5, contains a descendant whose id starts with
/// the kind's prefix, and is immediately followed by an unordered list.
fn relation_items(el: ElementRef<'_>, prefix: &str) -> Option<Vec<String>> {
    if !matches!(el.value().name(), "h3" | "h4" | "h5") {
        return None;
    }
    descendants(el).find(|d| d.value().id().is_some_and(|id| id.starts_with(prefix)))?;
    let list = next_element(el).filter(|el| el.value().name() == "ul")?;
    let items: Vec<String> = descendants(list)
        .filter(|el| el.value().name() == "li")
        .map(text_of)
        .collect();
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_str(html: &str) -> Entry {
        let mut doc = Html::parse_document(html);
        extract(&mut doc, "Turkish")
    }

    fn extract_fixture(name: &str) -> Entry {
        let html = std::fs::read_to_string(format!("tests/fixtures/{name}.html")).unwrap();
        extract_str(&html)
    }

    #[test]
    fn gibi_full_entry() {
        let entry = extract_fixture("gibi");
        assert_eq!(
            entry.pronunciation,
            vec![PronunciationGroup { kind: "IPA".into(), values: vec!["/ɡibi/".into()] }]
        );
        assert_eq!(
            entry.meanings,
            vec![Meaning {
                etymology: Some(
                    "From Proto-Turkic *käpä (compare Hungarian kép (“picture”), a Turkic \
                     borrowing)."
                        .into()
                ),
                part_of_speech: Some("postposition".into()),
                values: vec![DefinitionValue {
                    text: "like (similar to)".into(),
                    examples: vec![Example {
                        example: "Tupac bir kahraman gibi öldü.".into(),
                        translation: Some("Tupac died like a hero.".into()),
                    }],
                }],
                ..Default::default()
            }]
        );
    }

    #[test]
    fn el_three_meanings_mixed_etymologies() {
        let entry = extract_fixture("el");
        assert_eq!(
            entry.pronunciation,
            vec![PronunciationGroup {
                kind: "IPA".into(),
                values: vec!["/el/".into(), "/əl/".into()],
            }]
        );
        assert_eq!(entry.meanings.len(), 3);

        assert_eq!(entry.meanings[0].part_of_speech.as_deref(), Some("noun"));
        assert!(entry.meanings[0].etymology.as_deref().unwrap().starts_with("From Old Turkic élig"));
        assert_eq!(entry.meanings[0].values[0].text, "hand");
        assert_eq!(entry.meanings[0].values[0].examples, vec![]);

        // second noun section has no etymology heading of its own
        assert_eq!(entry.meanings[1].etymology, None);
        assert_eq!(entry.meanings[1].part_of_speech.as_deref(), Some("noun"));
        assert_eq!(entry.meanings[1].values[0].text, "a foreign person");

        assert_eq!(
            entry.meanings[2].etymology.as_deref(),
            Some("From Old Turkic él, from Proto-Turkic.")
        );
        assert_eq!(entry.meanings[2].values[0].text, "country, homeland, province");
    }

    #[test]
    fn el_ignores_sections_after_horizontal_rule() {
        // the fixture has another part-of-speech section below the <hr>
        let entry = extract_fixture("el");
        assert_eq!(entry.meanings.len(), 3);
    }

    #[test]
    fn araba_hyphenation_and_plain_definitions() {
        let entry = extract_fixture("araba");
        assert_eq!(
            entry.pronunciation,
            vec![
                PronunciationGroup { kind: "IPA".into(), values: vec!["/aɾaˈba/".into()] },
                PronunciationGroup {
                    kind: "Hyphenation".into(),
                    values: vec!["a‧ra‧ba".into()],
                },
            ]
        );
        assert_eq!(entry.meanings.len(), 1);
        let texts: Vec<&str> =
            entry.meanings[0].values.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(texts, vec!["car", "cart", "carriage"]);
        assert!(entry.meanings[0].values.iter().all(|v| v.examples.is_empty()));
    }

    #[test]
    fn missing_anchor_gives_empty_entry() {
        let entry = extract_str(
            "<body><h2><span class=\"mw-headline\" id=\"English\">English</span></h2>\
             <h3><span class=\"mw-headline\" id=\"Noun\">Noun</span></h3>\
             <p>el</p><ol><li>hand</li></ol></body>",
        );
        assert_eq!(entry, Entry::default());
    }

    #[test]
    fn table_between_heading_and_definitions_is_skipped() {
        let entry = extract_str(
            "<body><h2><span class=\"mw-headline\" id=\"Turkish\">Turkish</span></h2>\
             <h3><span class=\"mw-headline\" id=\"Noun\">Noun</span></h3>\
             <table><tbody><tr><td>declension</td></tr></tbody></table>\
             <p>su</p><ol><li>water</li></ol><hr></body>",
        );
        assert_eq!(entry.meanings.len(), 1);
        assert_eq!(entry.meanings[0].part_of_speech.as_deref(), Some("noun"));
        assert_eq!(entry.meanings[0].values[0].text, "water");
    }

    #[test]
    fn derived_terms_list_attached_to_meaning() {
        let entry = extract_str(
            "<body><h2><span class=\"mw-headline\" id=\"Turkish\">Turkish</span></h2>\
             <h3><span class=\"mw-headline\" id=\"Noun\">Noun</span></h3>\
             <p>el</p><ol><li>hand</li></ol>\
             <h4><span class=\"mw-headline\" id=\"Derived_terms\">Derived terms</span></h4>\
             <ul><li>elçi</li><li>el birliği</li></ul><hr></body>",
        );
        assert_eq!(
            entry.meanings[0].derived_terms,
            Some(vec!["elçi".to_string(), "el birliği".to_string()])
        );
        assert_eq!(entry.meanings[0].synonyms, None);
    }

    #[test]
    fn relation_heading_without_list_is_ignored() {
        let entry = extract_str(
            "<body><h2><span class=\"mw-headline\" id=\"Turkish\">Turkish</span></h2>\
             <h3><span class=\"mw-headline\" id=\"Noun\">Noun</span></h3>\
             <p>el</p><ol><li>hand</li></ol>\
             <h4><span class=\"mw-headline\" id=\"Derived_terms\">Derived terms</span></h4>\
             <p>see the appendix</p><hr></body>",
        );
        assert_eq!(entry.meanings[0].derived_terms, None);
    }

    #[test]
    fn relation_scan_skipped_when_definition_list_missing() {
        // the part-of-speech heading never classifies (no ordered list), so
        // the meaning keeps empty values and the trailing synonyms are lost
        let entry = extract_str(
            "<body><h2><span class=\"mw-headline\" id=\"Turkish\">Turkish</span></h2>\
             <h3><span class=\"mw-headline\" id=\"Etymology\">Etymology</span></h3>\
             <p>Origin unknown.</p>\
             <h4><span class=\"mw-headline\" id=\"Noun\">Noun</span></h4>\
             <p>el</p>\
             <h4><span class=\"mw-headline\" id=\"Synonyms\">Synonyms</span></h4>\
             <ul><li>kol</li></ul><hr></body>",
        );
        assert_eq!(entry.meanings.len(), 1);
        assert_eq!(entry.meanings[0].etymology.as_deref(), Some("Origin unknown."));
        assert_eq!(entry.meanings[0].part_of_speech, None);
        assert!(entry.meanings[0].values.is_empty());
        assert_eq!(entry.meanings[0].synonyms, None);
    }

    #[test]
    fn h3_part_of_speech_not_dispatched_twice() {
        // the part-of-speech heading under the etymology is itself an h3, so
        // the walker sees it again in its own sibling stream
        let entry = extract_str(
            "<body><h2><span class=\"mw-headline\" id=\"Turkish\">Turkish</span></h2>\
             <h3><span class=\"mw-headline\" id=\"Etymology\">Etymology</span></h3>\
             <p>From Old Turkic.</p>\
             <h3><span class=\"mw-headline\" id=\"Noun\">Noun</span></h3>\
             <p>el</p><ol><li>hand</li></ol><hr></body>",
        );
        assert_eq!(entry.meanings.len(), 1);
        assert_eq!(entry.meanings[0].part_of_speech.as_deref(), Some("noun"));
        assert_eq!(entry.meanings[0].values.len(), 1);
    }

    #[test]
    fn etymology_paragraphs_joined_with_newlines() {
        let entry = extract_str(
            "<body><h2><span class=\"mw-headline\" id=\"Turkish\">Turkish</span></h2>\
             <h3><span class=\"mw-headline\" id=\"Etymology\">Etymology</span></h3>\
             <p>First note.</p><p>Second note.</p>\
             <h4><span class=\"mw-headline\" id=\"Noun\">Noun</span></h4>\
             <p>el</p><ol><li>hand</li></ol><hr></body>",
        );
        assert_eq!(
            entry.meanings[0].etymology.as_deref(),
            Some("First note.\nSecond note.")
        );
    }

    #[test]
    fn per_etymology_pronunciation_note_skipped() {
        let entry = extract_str(
            "<body><h2><span class=\"mw-headline\" id=\"Turkish\">Turkish</span></h2>\
             <h3><span class=\"mw-headline\" id=\"Etymology_1\">Etymology 1</span></h3>\
             <p>From Old Turkic.</p>\
             <h4><span class=\"mw-headline\" id=\"Pronunciation_2\">Pronunciation</span></h4>\
             <ul><li><span class=\"IPA\">/el/</span></li></ul>\
             <h4><span class=\"mw-headline\" id=\"Noun\">Noun</span></h4>\
             <p>el</p><ol><li>hand</li></ol><hr></body>",
        );
        assert_eq!(entry.meanings[0].part_of_speech.as_deref(), Some("noun"));
        assert_eq!(entry.meanings[0].values[0].text, "hand");
    }

    #[test]
    fn extraction_is_idempotent_without_example_sublists() {
        let html = std::fs::read_to_string("tests/fixtures/el.html").unwrap();
        let mut doc = Html::parse_document(&html);
        let first = extract(&mut doc, "Turkish");
        let second = extract(&mut doc, "Turkish");
        assert_eq!(first, second);
    }
}
