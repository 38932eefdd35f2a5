//! Markdown tree rewriting for diagram code blocks.
//!
//! This crate finds fenced code blocks tagged with a diagram language in a
//! markdown document tree and replaces them with embeddable component nodes:
//!
//! - [`Document`]: a minimal document tree built from markdown text
//! - [`parse_meta`]: best-effort attribute parser for fence info lines
//! - [`BlockRewriter`]: replaces matching code blocks with [`DiagramEmbed`] nodes
//!
//! # Example
//!
//! ```
//! use mmd_rewrite::{BlockRewriter, Document, Node};
//!
//! let markdown = "# Title\n\n```mermaid theme=\"forest\"\ngraph TD\n  A --> B\n```\n";
//! let mut document = Document::parse(markdown);
//!
//! let rewriter = BlockRewriter::new();
//! assert_eq!(rewriter.rewrite(&mut document), 1);
//!
//! let Node::Embed(embed) = &document.children[1] else {
//!     panic!("expected embed node");
//! };
//! assert_eq!(embed.attribute("chart"), Some("graph TD\n  A --> B"));
//! ```

mod ast;
mod meta;
mod rewrite;

pub use ast::{CodeBlock, DiagramEmbed, Document, Node};
pub use meta::{AttributeBag, parse_meta};
pub use rewrite::BlockRewriter;
