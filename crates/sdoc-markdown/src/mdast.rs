//! Generic markdown syntax tree (mdast shape).
//!
//! Trees produced by external markdown/MDX toolchains can be loaded from JSON
//! and fed to the heading extractor. Only the fields the extractor needs are
//! modelled: `type`, `children`, `depth` and `value`. Everything else (e.g.
//! `position`, `data`) is ignored on deserialisation.

use serde::{Deserialize, Serialize};

use crate::headings::{HeadingChild, HeadingNode, HeadingSource};

/// Node type for headings.
const HEADING: &str = "heading";

/// A node in an mdast-shaped tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdastNode {
    /// Node type discriminator (`root`, `heading`, `text`, `inlineCode`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MdastNode>,
    /// Heading level, present on `heading` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,
    /// Literal value, present on `text` and `inlineCode` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl MdastNode {
    /// Parse a tree from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the input is not a valid node.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create a container node of the given type.
    #[must_use]
    pub fn node(kind: &str, children: Vec<MdastNode>) -> Self {
        Self {
            kind: kind.to_owned(),
            children,
            ..Self::default()
        }
    }

    /// Create a `root` node.
    #[must_use]
    pub fn root(children: Vec<MdastNode>) -> Self {
        Self::node("root", children)
    }

    /// Create a `heading` node.
    #[must_use]
    pub fn heading(depth: u8, children: Vec<MdastNode>) -> Self {
        Self {
            depth: Some(depth),
            ..Self::node(HEADING, children)
        }
    }

    /// Create a `text` leaf.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::leaf("text", value)
    }

    /// Create an `inlineCode` leaf.
    #[must_use]
    pub fn inline_code(value: &str) -> Self {
        Self::leaf("inlineCode", value)
    }

    fn leaf(kind: &str, value: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            value: Some(value.to_owned()),
            ..Self::default()
        }
    }

    fn to_heading_node(&self) -> HeadingNode {
        let children = self
            .children
            .iter()
            .map(|child| match (child.kind.as_str(), &child.value) {
                ("text", Some(value)) => HeadingChild::Text(value.clone()),
                ("inlineCode", Some(value)) => HeadingChild::InlineCode(value.clone()),
                _ => HeadingChild::Other,
            })
            .collect();

        HeadingNode {
            depth: self.depth.unwrap_or(1),
            children,
        }
    }
}

impl HeadingSource for MdastNode {
    fn headings(&self) -> impl Iterator<Item = HeadingNode> + '_ {
        MdastHeadings { stack: vec![self] }
    }
}

/// Depth-first, pre-order walk yielding heading nodes lazily.
struct MdastHeadings<'a> {
    stack: Vec<&'a MdastNode>,
}

impl Iterator for MdastHeadings<'_> {
    type Item = HeadingNode;

    fn next(&mut self) -> Option<HeadingNode> {
        while let Some(node) = self.stack.pop() {
            if node.kind == HEADING {
                return Some(node.to_heading_node());
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::headings::{HeadingRecord, extract_headings};

    #[test]
    fn test_walks_nested_containers_in_order() {
        let tree = MdastNode::root(vec![
            MdastNode::heading(1, vec![MdastNode::text("Intro")]),
            MdastNode::node(
                "blockquote",
                vec![MdastNode::heading(2, vec![MdastNode::text("Quoted")])],
            ),
            MdastNode::heading(2, vec![MdastNode::text("After")]),
        ]);

        let texts: Vec<String> = tree.headings().map(|h| h.text()).collect();

        assert_eq!(texts, vec!["Intro", "Quoted", "After"]);
    }

    #[test]
    fn test_emphasis_text_is_dropped() {
        let tree = MdastNode::root(vec![MdastNode::heading(
            2,
            vec![
                MdastNode::text("Hello "),
                MdastNode::node("emphasis", vec![MdastNode::text("World")]),
                MdastNode::inline_code("fn"),
            ],
        )]);

        let records = extract_headings(&tree);

        assert_eq!(
            records,
            vec![HeadingRecord {
                id: "hello-fn".to_owned(),
                text: "Hello fn".to_owned(),
                depth: 2,
            }]
        );
    }

    #[test]
    fn test_from_json_ignores_unknown_fields() {
        let json = r#"{
            "type": "root",
            "children": [
                {
                    "type": "heading",
                    "depth": 3,
                    "position": {"start": {"line": 1}},
                    "children": [{"type": "text", "value": "Data types"}]
                },
                {"type": "paragraph", "children": [{"type": "text", "value": "body"}]},
                {
                    "type": "heading",
                    "depth": 2,
                    "children": [
                        {"type": "link", "url": "/x", "children": [{"type": "text", "value": "x"}]},
                        {"type": "inlineCode", "value": "LET"}
                    ]
                }
            ]
        }"#;

        let tree = MdastNode::from_json(json).unwrap();
        let records = extract_headings(&tree);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "data-types");
        assert_eq!(records[0].depth, 3);
        assert_eq!(records[1].text, "LET");
    }

    #[test]
    fn test_from_json_rejects_missing_type() {
        assert!(MdastNode::from_json(r#"{"children": []}"#).is_err());
    }

    #[test]
    fn test_root_without_headings() {
        let tree = MdastNode::root(vec![MdastNode::node(
            "paragraph",
            vec![MdastNode::text("plain")],
        )]);

        assert!(extract_headings(&tree).is_empty());
    }
}
