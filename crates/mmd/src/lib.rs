//! Mermaid diagram bridge for markdown content pipelines.
//!
//! Two independent halves, sharing nothing but a render cache:
//!
//! 1. **Rewrite**: [`BlockRewriter`] scans a parsed [`Document`] tree,
//!    parses attributes from each matching fence's info line and replaces
//!    the block with an embeddable component node.
//! 2. **Render**: [`DiagramView`] resolves an effective configuration
//!    ([`resolve`]), renders through a memoized [`RenderCache`] backed by
//!    an opaque [`DiagramEngine`], and mounts the markup into a
//!    [`Container`]. Views flagged exportable get [`copy_png`] /
//!    [`save_svg`] affordances over the mounted markup.
//!
//! # Example
//!
//! ```
//! use mmd::{BlockRewriter, Node, rewrite_markdown};
//!
//! let document = rewrite_markdown(
//!     "```mermaid theme=\"forest\"\ngraph TD\n  A --> B\n```\n",
//!     &BlockRewriter::new(),
//! );
//!
//! let Node::Embed(embed) = &document.children[0] else {
//!     panic!("expected embed node");
//! };
//! assert_eq!(embed.attribute("chart"), Some("graph TD\n  A --> B"));
//! assert_eq!(embed.attribute("config"), Some(r#"{"theme":"forest"}"#));
//! ```

pub use mmd_config::{
    ColorMode, ColorScheme, EffectiveConfig, FlowchartConfig, PacketConfig, SequenceConfig, Theme,
    resolve,
};
pub use mmd_export::{
    DEFAULT_SVG_FILENAME, EXPORT_SCALE, ExportError, Raster, copy_png, extract_svg, rasterize,
    save_svg, svg_to_png,
};
pub use mmd_render::{
    BindFn, Container, DEFAULT_THEME_CSS, DiagramEngine, DiagramView, EngineLoader, EngineOptions,
    InMemoryContainer, RenderCache, RenderError, RenderKey, RenderRequest, RenderedDiagram,
    SecurityLevel, StaticEngineLoader, ViewState, compose_source, sanitize_element_id,
};
pub use mmd_rewrite::{
    AttributeBag, BlockRewriter, CodeBlock, DiagramEmbed, Document, Node, parse_meta,
};

/// Parse markdown text and rewrite every matching diagram block.
#[must_use]
pub fn rewrite_markdown(markdown: &str, rewriter: &BlockRewriter) -> Document {
    let mut document = Document::parse(markdown);
    rewriter.rewrite(&mut document);
    document
}
