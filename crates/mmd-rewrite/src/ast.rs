//! Minimal markdown document tree.
//!
//! The tree distinguishes only what the rewriter needs: fenced code blocks
//! (with their info-line metadata) and embed nodes produced by rewriting.
//! Everything else is kept as opaque markdown runs, byte-for-byte.

use std::fmt::Write;
use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// A parsed markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// Top-level nodes in document order.
    pub children: Vec<Node>,
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An opaque run of markdown source, preserved verbatim.
    Markdown(String),
    /// A top-level fenced code block.
    Code(CodeBlock),
    /// A component embed produced by rewriting.
    Embed(DiagramEmbed),
}

/// A fenced code block with its info-line metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeBlock {
    /// Language tag (first token of the fence info line).
    pub lang: Option<String>,
    /// Remainder of the info line after the language tag.
    pub meta: Option<String>,
    /// Block body.
    pub value: String,
}

/// A component-invocation node carrying a diagram.
///
/// Attribute order is preserved as inserted; values are plain strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEmbed {
    /// Component name, e.g. `Mermaid`.
    pub name: String,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
}

impl DiagramEmbed {
    /// Look up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Render the embed as a self-closing tag.
    #[must_use]
    pub fn to_tag(&self) -> String {
        let mut tag = format!("<{}", self.name);
        for (name, value) in &self.attributes {
            write!(tag, r#" {name}="{}""#, escape_attr(value)).unwrap();
        }
        tag.push_str(" />");
        tag
    }
}

impl Document {
    /// Build a document tree from markdown text.
    ///
    /// Top-level fenced code blocks become [`Node::Code`]; every other byte
    /// range (including indented and nested code blocks) is preserved
    /// verbatim as [`Node::Markdown`] runs.
    #[must_use]
    pub fn parse(markdown: &str) -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;

        let mut children = Vec::new();
        let mut cursor = 0usize;
        let mut depth = 0usize;
        // (block byte range, lang, meta, accumulated body)
        let mut fence: Option<(Range<usize>, Option<String>, Option<String>, String)> = None;

        for (event, range) in Parser::new_ext(markdown, options).into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref info)))
                    if depth == 0 && fence.is_none() =>
                {
                    if range.start > cursor {
                        children.push(Node::Markdown(markdown[cursor..range.start].to_owned()));
                    }
                    let (lang, meta) = split_fence_info(info);
                    fence = Some((range, lang, meta, String::new()));
                }
                Event::Text(ref text) if fence.is_some() => {
                    if let Some((_, _, _, body)) = fence.as_mut() {
                        body.push_str(text);
                    }
                }
                Event::End(TagEnd::CodeBlock) if fence.is_some() => {
                    if let Some((block, lang, meta, value)) = fence.take() {
                        children.push(Node::Code(CodeBlock { lang, meta, value }));
                        cursor = block.end;
                    }
                }
                Event::Start(_) => depth += 1,
                Event::End(_) => depth = depth.saturating_sub(1),
                _ => {}
            }
        }

        if cursor < markdown.len() {
            children.push(Node::Markdown(markdown[cursor..].to_owned()));
        }

        Self { children }
    }

    /// Write the tree back out as markdown.
    ///
    /// Code blocks are emitted with canonical backtick fences; embed nodes
    /// are emitted as self-closing tags on their own line.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Markdown(text) => out.push_str(text),
                Node::Code(block) => {
                    out.push_str("```");
                    if let Some(lang) = &block.lang {
                        out.push_str(lang);
                        if let Some(meta) = &block.meta {
                            out.push(' ');
                            out.push_str(meta);
                        }
                    }
                    out.push('\n');
                    out.push_str(&block.value);
                    if !block.value.is_empty() && !block.value.ends_with('\n') {
                        out.push('\n');
                    }
                    out.push_str("```\n");
                }
                Node::Embed(embed) => {
                    out.push_str(&embed.to_tag());
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Split a fence info line into language tag and trailing metadata.
fn split_fence_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    if info.is_empty() {
        return (None, None);
    }
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => {
            let meta = meta.trim();
            (
                Some(lang.to_owned()),
                if meta.is_empty() {
                    None
                } else {
                    Some(meta.to_owned())
                },
            )
        }
        None => (Some(info.to_owned()), None),
    }
}

/// Escape a string for use inside a double-quoted attribute value.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}
