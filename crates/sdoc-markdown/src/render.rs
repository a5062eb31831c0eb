//! Markdown to HTML with heading anchors.

use pulldown_cmark::{CowStr, Event, Parser, Tag, html};

use crate::headings::{HeadingOptions, HeadingRecord, extract_headings_with};
use crate::source::{MarkdownSource, markdown_options};

/// Result of rendering a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Rendered HTML content.
    pub html: String,
    /// Title taken from the first H1 heading.
    pub title: Option<String>,
    /// Heading records, in document order.
    pub headings: Vec<HeadingRecord>,
}

/// Render markdown to HTML, giving every heading the ID of its record.
#[must_use]
pub fn render_markdown(markdown: &str, options: HeadingOptions) -> RenderedDocument {
    let headings = extract_headings_with(&MarkdownSource::new(markdown), options);

    let mut ids = headings.iter().map(|h| h.id.as_str());
    let events = Parser::new_ext(markdown, markdown_options()).map(|event| match event {
        Event::Start(Tag::Heading {
            level,
            id: None,
            classes,
            attrs,
        }) => Event::Start(Tag::Heading {
            level,
            id: ids.next().map(|id| CowStr::from(id.to_owned())),
            classes,
            attrs,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);

    let title = headings
        .iter()
        .find(|h| h.depth == 1)
        .map(|h| h.text.trim().to_owned());

    RenderedDocument {
        html: out,
        title,
        headings,
    }
}
