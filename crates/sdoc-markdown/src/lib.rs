//! Markdown plumbing for sdoc.
//!
//! This crate provides:
//! - [`normalize`]: heading text to URL-safe anchor IDs
//! - [`extract_headings`]: ordered [`HeadingRecord`]s for tables of contents
//! - [`render_markdown`]: HTML output whose heading IDs match the records
//!
//! Heading extraction works over any [`HeadingSource`]. Two are provided:
//! [`MarkdownSource`] parses raw markdown with `pulldown-cmark`, and
//! [`MdastNode`] walks an mdast-shaped tree (for example one exported as JSON
//! by an MDX toolchain).
//!
//! # Example
//!
//! ```
//! use sdoc_markdown::{MarkdownSource, extract_headings};
//!
//! let headings = extract_headings(&MarkdownSource::new("# Hello\n\n## Next steps\n"));
//! assert_eq!(headings[1].id, "next-steps");
//! ```

mod headings;
mod mdast;
mod render;
mod slug;
mod source;

pub use headings::{
    HeadingChild, HeadingNode, HeadingOptions, HeadingRecord, HeadingSource, extract_headings,
    extract_headings_with,
};
pub use mdast::MdastNode;
pub use render::{RenderedDocument, render_markdown};
pub use slug::{SlugError, normalize, require_id};
pub use source::{MarkdownSource, markdown_options};
