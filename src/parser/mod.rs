//! HTML document parsing and structural queries
//!
//! Pages are parsed with `scraper` into a [`Document`]; the stage modules query it
//! with the precompiled selectors in [`selectors`]. A [`Document`] is not `Send`,
//! so stages fetch first and parse in a synchronous step that returns owned data.

pub(crate) mod selectors;

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML page
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw response bytes (invalid UTF-8 is replaced)
    pub fn parse(bytes: &[u8]) -> Self {
        Self::from_html(&String::from_utf8_lossy(bytes))
    }

    /// Parse an HTML string
    pub fn from_html(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching `selector`, in document order
    pub fn query<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(selector)
    }

    /// First element matching `selector`
    pub fn first<'a>(&'a self, selector: &'a Selector) -> Option<ElementRef<'a>> {
        self.html.select(selector).next()
    }
}

/// Concatenated text of `element` and its descendants, trimmed
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Attribute value of `element`
pub fn attribute<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Direct element children of `element` with tag `tag`
pub fn children<'a>(element: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == tag)
}

/// First direct child with tag `tag` whose class list contains `class`
pub fn child_with_class<'a>(element: ElementRef<'a>, tag: &'a str, class: &str) -> Option<ElementRef<'a>> {
    children(element, tag).find(|child| child.value().classes().any(|c| c.contains(class)))
}

/// Nearest ancestor element with tag `tag`
pub fn ancestor<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|node| node.value().name() == tag)
}
