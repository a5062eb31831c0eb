//! Heading extraction for tables of contents.
//!
//! The extractor only needs heading nodes in document order, so parsers plug
//! in through the [`HeadingSource`] trait rather than handing over a full tree.

use std::collections::{HashMap, HashSet};

use pulldown_cmark::HeadingLevel;
use serde::{Deserialize, Serialize};

use crate::slug::{SlugError, require_id};

/// One heading of a rendered document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// Anchor ID for linking.
    pub id: String,
    /// Display text.
    pub text: String,
    /// Heading level (1-6).
    pub depth: u8,
}

/// Direct child of a heading node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadingChild {
    /// Literal text.
    Text(String),
    /// Inline code span.
    InlineCode(String),
    /// Any other inline node (emphasis, link, image, html). Its content is dropped.
    Other,
}

/// A heading node as yielded by a [`HeadingSource`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingNode {
    /// Declared heading level.
    pub depth: u8,
    /// Direct children in source order.
    pub children: Vec<HeadingChild>,
}

impl HeadingNode {
    /// Concatenate the literal text of direct text and inline-code children.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                HeadingChild::Text(value) | HeadingChild::InlineCode(value) => {
                    text.push_str(value);
                }
                HeadingChild::Other => {}
            }
        }
        text
    }
}

/// Anything that can yield heading nodes in document order.
pub trait HeadingSource {
    /// Iterate over heading nodes in document order.
    fn headings(&self) -> impl Iterator<Item = HeadingNode> + '_;
}

impl HeadingSource for [HeadingNode] {
    fn headings(&self) -> impl Iterator<Item = HeadingNode> + '_ {
        self.iter().cloned()
    }
}

impl HeadingSource for Vec<HeadingNode> {
    fn headings(&self) -> impl Iterator<Item = HeadingNode> + '_ {
        self.iter().cloned()
    }
}

/// Options for [`extract_headings_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeadingOptions {
    /// Append `-1`, `-2`, ... to repeated IDs.
    pub dedupe_ids: bool,
}

/// Extract heading records with default options (no ID de-duplication).
pub fn extract_headings<S: HeadingSource + ?Sized>(source: &S) -> Vec<HeadingRecord> {
    extract_headings_with(source, HeadingOptions::default())
}

/// Extract heading records from a source in document order.
///
/// Headings whose text normalises to an empty ID get the positional ID
/// `heading-<n>`, where `n` is the 1-based position in the output. A
/// positional ID never repeats an ID used elsewhere in the document; it takes
/// a `-1`, `-2`, ... suffix instead.
///
/// With `dedupe_ids`, every ID in the result is unique. Suffixed IDs skip
/// values that another heading produces on its own, so `FAQ`, `FAQ`, `FAQ 1`
/// become `faq`, `faq-2`, `faq-1`.
pub fn extract_headings_with<S: HeadingSource + ?Sized>(
    source: &S,
    options: HeadingOptions,
) -> Vec<HeadingRecord> {
    let nodes: Vec<(String, u8, Option<String>)> = source
        .headings()
        .map(|node| {
            let text = node.text();
            let slug = match require_id(&text) {
                Ok(id) => Some(id),
                Err(SlugError::EmptyNormalizedId(_)) => None,
            };
            (text, node.depth.clamp(1, 6), slug)
        })
        .collect();

    let mut ids = HeadingIds::new(
        options.dedupe_ids,
        nodes.iter().filter_map(|(_, _, slug)| slug.clone()),
    );

    nodes
        .into_iter()
        .enumerate()
        .map(|(index, (text, depth, slug))| {
            let id = match slug {
                Some(slug) => ids.for_text(slug),
                None => {
                    let position = index + 1;
                    tracing::debug!(text = %text, position, "Heading has no usable ID, using position");
                    ids.synthesized(&format!("heading-{position}"))
                }
            };
            HeadingRecord { id, text, depth }
        })
        .collect()
}

/// ID allocator for one document.
struct HeadingIds {
    dedupe: bool,
    /// IDs headings produce from their own text.
    natural: HashSet<String>,
    /// IDs already handed out.
    taken: HashSet<String>,
    /// Next suffix to try per base ID.
    suffixes: HashMap<String, usize>,
}

impl HeadingIds {
    fn new(dedupe: bool, natural: impl IntoIterator<Item = String>) -> Self {
        Self {
            dedupe,
            natural: natural.into_iter().collect(),
            taken: HashSet::new(),
            suffixes: HashMap::new(),
        }
    }

    /// ID for a heading with usable text.
    fn for_text(&mut self, slug: String) -> String {
        if !self.dedupe || !self.taken.contains(&slug) {
            self.taken.insert(slug.clone());
            return slug;
        }
        self.suffixed(&slug)
    }

    /// Positional ID, kept clear of every other ID in the document.
    fn synthesized(&mut self, base: &str) -> String {
        if self.natural.contains(base) || self.taken.contains(base) {
            return self.suffixed(base);
        }
        self.taken.insert(base.to_owned());
        base.to_owned()
    }

    fn suffixed(&mut self, base: &str) -> String {
        let next = self.suffixes.entry(base.to_owned()).or_insert(1);
        loop {
            let candidate = format!("{base}-{next}");
            *next += 1;
            if !self.natural.contains(&candidate) && !self.taken.contains(&candidate) {
                self.taken.insert(candidate.clone());
                return candidate;
            }
        }
    }
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
