//! Replaces fenced diagram blocks with embed nodes.

use crate::ast::{CodeBlock, DiagramEmbed, Document, Node};
use crate::meta::parse_meta;

/// Default fence language recognized as a diagram block.
const DEFAULT_LANGUAGE: &str = "mermaid";

/// Default component name for rewritten blocks.
const DEFAULT_COMPONENT: &str = "Mermaid";

/// Rewrites fenced diagram code blocks into component embeds.
///
/// A code block is rewritten when its language tag matches the configured
/// target and its body is non-empty. The embed carries the trimmed body as
/// `chart` and, when the info line held attributes, their JSON encoding as
/// `config`. All other nodes are left untouched.
///
/// # Example
///
/// ```
/// use mmd_rewrite::{BlockRewriter, CodeBlock};
///
/// let rewriter = BlockRewriter::new();
/// let block = CodeBlock {
///     lang: Some("mermaid".to_owned()),
///     meta: Some("theme=\"forest\"".to_owned()),
///     value: "graph TD\n".to_owned(),
/// };
///
/// let embed = rewriter.rewrite_block(&block).unwrap();
/// assert_eq!(embed.attribute("chart"), Some("graph TD"));
/// assert_eq!(embed.attribute("config"), Some(r#"{"theme":"forest"}"#));
/// ```
#[derive(Debug, Clone)]
pub struct BlockRewriter {
    language: String,
    component: String,
}

impl Default for BlockRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRewriter {
    /// Create a rewriter targeting ```` ```mermaid ```` blocks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_owned(),
            component: DEFAULT_COMPONENT.to_owned(),
        }
    }

    /// Set the fence language to rewrite.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the component name used for embed nodes.
    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Rewrite a single code block, if it qualifies.
    ///
    /// Returns `None` for a non-matching language or an empty body; the
    /// caller keeps the original node in that case.
    #[must_use]
    pub fn rewrite_block(&self, block: &CodeBlock) -> Option<DiagramEmbed> {
        if block.lang.as_deref() != Some(self.language.as_str()) {
            return None;
        }
        let chart = block.value.trim();
        if chart.is_empty() {
            return None;
        }

        let (attrs, _residual) = parse_meta(block.meta.as_deref().unwrap_or(""));

        let mut attributes = vec![("chart".to_owned(), chart.to_owned())];
        if !attrs.is_empty() {
            attributes.push(("config".to_owned(), attrs.to_json()));
        }

        Some(DiagramEmbed {
            name: self.component.clone(),
            attributes,
        })
    }

    /// Rewrite every qualifying code block in the document.
    ///
    /// Visits each node exactly once in document order; replacements are
    /// local and independent. Returns the number of blocks rewritten.
    pub fn rewrite(&self, document: &mut Document) -> usize {
        let mut replaced = 0usize;
        for node in &mut document.children {
            if let Node::Code(block) = node
                && let Some(embed) = self.rewrite_block(block)
            {
                *node = Node::Embed(embed);
                replaced += 1;
            }
        }
        if replaced > 0 {
            tracing::debug!(count = replaced, "rewrote diagram code blocks");
        }
        replaced
    }
}
