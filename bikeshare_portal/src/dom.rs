//! Minimal DOM lookups over `scraper`, matched by `class` attribute.
//!
//! The portal templates key every data node by its full class string, not
//! by ids, so lookups here come in two modes mirroring how the templates
//! are addressed:
//!
//! - *exact*: the node's whitespace-split class list equals the wanted
//!   string's class list, in order. A node carrying extra classes does NOT
//!   match. The positional field groups on the profile page rely on this:
//!   the lifetime-stats node has one class more than its siblings and must
//!   stay out of the indexed sibling list.
//! - *contains*: the node's class list contains the single wanted class
//!   anywhere. Used where a template addresses a node by one token only.

use scraper::{ElementRef, Html, Selector};

/// A parsed page plus the lookup helpers the extractors run on.
pub struct Page {
    doc: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    /// First element of `tag` whose class attribute exactly matches `class`.
    pub fn first_exact(&self, tag: &str, class: &str) -> Option<ElementRef<'_>> {
        let sel = Selector::parse(tag).ok()?;
        self.doc.select(&sel).find(|el| has_exact_class(el, class))
    }

    /// Trimmed text of the first exact-class match, or `None`.
    pub fn text_exact(&self, tag: &str, class: &str) -> Option<String> {
        self.first_exact(tag, class).map(|el| element_text(&el))
    }

    /// Trimmed texts of every exact-class match, in document order.
    pub fn texts_exact(&self, tag: &str, class: &str) -> Vec<String> {
        let Ok(sel) = Selector::parse(tag) else {
            return Vec::new();
        };
        self.doc
            .select(&sel)
            .filter(|el| has_exact_class(el, class))
            .map(|el| element_text(&el))
            .collect()
    }

    /// Trimmed text of the first element whose class list contains `class`.
    pub fn text_with_class(&self, tag: &str, class: &str) -> Option<String> {
        let sel = Selector::parse(tag).ok()?;
        self.doc
            .select(&sel)
            .find(|el| class_list_contains(el, class))
            .map(|el| element_text(&el))
    }

    /// Attribute value of the first exact-class match, or `None`.
    pub fn attr_exact(&self, tag: &str, class: &str, attr: &str) -> Option<String> {
        self.first_exact(tag, class)?
            .value()
            .attr(attr)
            .map(str::to_string)
    }
}

/// Concatenated descendant text, trimmed.
pub fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Whether the element's class list equals `class`'s token list, in order.
pub fn has_exact_class(el: &ElementRef, class: &str) -> bool {
    let Some(attr) = el.value().attr("class") else {
        return false;
    };
    attr.split_whitespace().eq(class.split_whitespace())
}

/// Whether the element's class list contains the single token `class`.
pub fn class_list_contains(el: &ElementRef, class: &str) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|attr| attr.split_whitespace().any(|token| token == class))
}
