use ego_tree::NodeId;
use scraper::{ElementRef, Html};

/// Forward-sibling cursor over element nodes, skipping text and comment
/// nodes the way a "next sibling tag" lookup does.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    current: Option<ElementRef<'a>>,
}

impl<'a> Cursor<'a> {
    /// Cursor positioned at `el` itself.
    pub fn from(el: ElementRef<'a>) -> Self {
        Self { current: Some(el) }
    }

    /// Cursor positioned at the element sibling following `el`.
    pub fn after(el: ElementRef<'a>) -> Self {
        Self { current: next_element(el) }
    }

    pub fn get(&self) -> Option<ElementRef<'a>> {
        self.current
    }

    /// Move to the next element sibling, returning the new position.
    pub fn advance(&mut self) -> Option<ElementRef<'a>> {
        self.current = self.current.and_then(next_element);
        self.current
    }

    /// Advance past every consecutive element matching `pred`.
    pub fn skip_while(&mut self, pred: impl Fn(ElementRef<'a>) -> bool) {
        while let Some(el) = self.current {
            if !pred(el) {
                break;
            }
            self.advance();
        }
    }

    /// True when positioned at an element with the given tag name.
    pub fn is_at(&self, name: &str) -> bool {
        self.current.is_some_and(|el| el.value().name() == name)
    }
}

/// Next sibling that is an element, if any.
pub fn next_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Re-derive an element from a stable node id.
pub fn element_at(doc: &Html, id: NodeId) -> Option<ElementRef<'_>> {
    doc.tree.get(id).and_then(ElementRef::wrap)
}

/// First element anywhere in the document whose id attribute equals `id`.
pub fn find_by_id<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    descendants(doc.root_element()).find(|el| el.value().id() == Some(id))
}

/// Descendant elements of `el`, excluding `el` itself.
pub fn descendants(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Concatenated text of `el` and its descendants (the `get_text` of the tree).
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}
