//! Diagram engine collaborator contracts.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::container::Container;
use crate::error::RenderError;

/// Callback binding interactive elements inside rendered markup to a
/// mounted container.
pub type BindFn = Arc<dyn Fn(&mut dyn Container) + Send + Sync>;

/// Result of one engine render call.
pub struct RenderedDiagram {
    /// Vector markup for the diagram.
    pub svg: String,
    /// Optional DOM-binding callback, invoked once after mounting.
    pub bind: Option<BindFn>,
}

impl fmt::Debug for RenderedDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedDiagram")
            .field("svg", &self.svg)
            .field("bind", &self.bind.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Script execution policy of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityLevel {
    Strict,
    Loose,
    Antiscript,
    Sandbox,
}

/// Engine initialization options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Whether the engine scans and renders on its own at startup.
    pub start_on_load: bool,
    pub security_level: SecurityLevel,
    pub font_family: String,
}

impl EngineOptions {
    /// Baseline options applied before every render call.
    ///
    /// Rendering is driven explicitly through the cache, so auto-start is
    /// off; fonts are inherited from the surrounding document.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            start_on_load: false,
            security_level: SecurityLevel::Loose,
            font_family: "inherit".to_owned(),
        }
    }
}

/// The diagram engine, treated as opaque.
///
/// This crate neither validates nor reimplements the engine's diagram
/// grammar; it only initializes the engine and submits composed sources.
pub trait DiagramEngine: Send + Sync {
    /// Apply initialization options. Idempotent and cheap; called before
    /// every render submission.
    fn initialize(&self, options: &EngineOptions);

    /// Render a diagram source to markup.
    ///
    /// `id` is the element id the markup should carry; it must be unique
    /// within the mounted document.
    fn render(&self, id: &str, source: &str)
    -> BoxFuture<'static, Result<RenderedDiagram, RenderError>>;
}

/// Deferred engine acquisition.
///
/// The load runs at most once per [`RenderCache`](crate::RenderCache);
/// implementations do not need their own memoization.
pub trait EngineLoader: Send + Sync {
    fn load(&self) -> BoxFuture<'static, Result<Arc<dyn DiagramEngine>, RenderError>>;
}

/// Loader wrapping an engine that is already constructed.
pub struct StaticEngineLoader {
    engine: Arc<dyn DiagramEngine>,
}

impl StaticEngineLoader {
    #[must_use]
    pub fn new(engine: Arc<dyn DiagramEngine>) -> Self {
        Self { engine }
    }
}

impl EngineLoader for StaticEngineLoader {
    fn load(&self) -> BoxFuture<'static, Result<Arc<dyn DiagramEngine>, RenderError>> {
        let engine = Arc::clone(&self.engine);
        async move { Ok(engine) }.boxed()
    }
}
