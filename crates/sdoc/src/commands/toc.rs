//! `sdoc toc` command implementation.

use std::path::PathBuf;

use clap::Args;
use sdoc_markdown::{
    HeadingOptions, HeadingRecord, MarkdownSource, MdastNode, extract_headings_with,
};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Markdown file, or mdast JSON with `--mdast`.
    file: PathBuf,

    /// Append `-1`, `-2`, ... to repeated heading IDs.
    #[arg(long)]
    dedupe: bool,

    /// Read the file as an mdast JSON tree instead of markdown.
    #[arg(long)]
    mdast: bool,
}

impl TocArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let text = std::fs::read_to_string(&self.file)?;
        let headings = self.headings(&text)?;
        Output::new().data(&serde_json::to_string_pretty(&headings)?);
        Ok(())
    }

    fn headings(&self, text: &str) -> Result<Vec<HeadingRecord>, CliError> {
        let options = HeadingOptions {
            dedupe_ids: self.dedupe,
        };
        if self.mdast {
            let tree = MdastNode::from_json(text)?;
            Ok(extract_headings_with(&tree, options))
        } else {
            Ok(extract_headings_with(&MarkdownSource::new(text), options))
        }
    }
}
