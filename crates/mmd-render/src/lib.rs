//! Memoized diagram rendering and mount lifecycle.
//!
//! The diagram engine is an opaque collaborator: given an element id and a
//! source string it returns markup and an optional binding callback. This
//! crate layers on top of it:
//!
//! - [`DiagramEngine`] / [`EngineLoader`]: the collaborator contracts
//! - [`RenderCache`]: lazy engine acquisition plus per-diagram render
//!   memoization with a single-computation guarantee per key
//! - [`DiagramView`]: the per-instance mount lifecycle
//!   (`Unmounted → WaitingForEngine → WaitingForRender → Rendered`)
//! - [`Container`]: the mount-point seam, with [`InMemoryContainer`] for
//!   tests and headless embedders
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mmd_render::{DiagramView, InMemoryContainer, RenderCache, StaticEngineLoader};
//!
//! let cache = RenderCache::new(Arc::new(StaticEngineLoader::new(engine)));
//! let mut container = InMemoryContainer::default();
//! let mut view = DiagramView::new("graph TD\n  A --> B").exportable(true);
//! futures::executor::block_on(view.mount(&cache, &mut container))?;
//! assert!(container.markup().contains("<svg"));
//! ```

mod cache;
mod compose;
mod container;
mod engine;
mod error;
mod key;
mod view;

pub use cache::{RenderCache, RenderRequest, SharedEngine, SharedRender};
pub use compose::compose_source;
pub use container::{Container, InMemoryContainer};
pub use engine::{
    BindFn, DiagramEngine, EngineLoader, EngineOptions, RenderedDiagram, SecurityLevel,
    StaticEngineLoader,
};
pub use error::RenderError;
pub use key::{RenderKey, sanitize_element_id};
pub use view::{DEFAULT_THEME_CSS, DiagramView, ViewState};
