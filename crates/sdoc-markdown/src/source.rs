//! Heading source over raw markdown using `pulldown-cmark`.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::headings::{HeadingChild, HeadingNode, HeadingSource, heading_level_to_num};

/// Parser options shared by heading extraction and HTML rendering.
///
/// Both passes must agree on options, otherwise heading IDs assigned during
/// rendering would not line up with the extracted records.
#[must_use]
pub fn markdown_options() -> Options {
    Options::ENABLE_GFM
        | Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Markdown text viewed as a [`HeadingSource`].
#[derive(Clone, Copy, Debug)]
pub struct MarkdownSource<'a> {
    text: &'a str,
}

impl<'a> MarkdownSource<'a> {
    /// Wrap markdown text.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl HeadingSource for MarkdownSource<'_> {
    fn headings(&self) -> impl Iterator<Item = HeadingNode> + '_ {
        MarkdownHeadings {
            parser: Parser::new_ext(self.text, markdown_options()),
        }
    }
}

struct MarkdownHeadings<'a> {
    parser: Parser<'a>,
}

impl MarkdownHeadings<'_> {
    /// Collect direct children until the heading closes.
    fn collect_heading(&mut self, depth: u8) -> HeadingNode {
        let mut children = Vec::new();
        // Nesting inside the heading; only depth-0 events are direct children.
        let mut nesting = 0usize;

        for event in self.parser.by_ref() {
            match event {
                Event::End(TagEnd::Heading(_)) if nesting == 0 => break,
                Event::Start(_) => {
                    if nesting == 0 {
                        children.push(HeadingChild::Other);
                    }
                    nesting += 1;
                }
                Event::End(_) => nesting = nesting.saturating_sub(1),
                Event::Text(text) if nesting == 0 => {
                    children.push(HeadingChild::Text(text.into_string()));
                }
                Event::Code(code) if nesting == 0 => {
                    children.push(HeadingChild::InlineCode(code.into_string()));
                }
                Event::SoftBreak if nesting == 0 => {
                    children.push(HeadingChild::Text("\n".to_owned()));
                }
                _ if nesting == 0 => children.push(HeadingChild::Other),
                _ => {}
            }
        }

        HeadingNode { depth, children }
    }
}

impl Iterator for MarkdownHeadings<'_> {
    type Item = HeadingNode;

    #[allow(clippy::while_let_on_iterator)]
    fn next(&mut self) -> Option<HeadingNode> {
        while let Some(event) = self.parser.next() {
            if let Event::Start(Tag::Heading { level, .. }) = event {
                return Some(self.collect_heading(heading_level_to_num(level)));
            }
        }
        None
    }
}
