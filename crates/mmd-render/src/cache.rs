//! Render cache: engine acquisition plus per-diagram memoization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use mmd_config::{Theme, resolve};

use crate::compose::compose_source;
use crate::engine::{DiagramEngine, EngineLoader, EngineOptions, RenderedDiagram};
use crate::error::RenderError;
use crate::key::RenderKey;

/// Shared engine acquisition future.
pub type SharedEngine = Shared<BoxFuture<'static, Result<Arc<dyn DiagramEngine>, RenderError>>>;

/// Shared per-diagram render future.
pub type SharedRender = Shared<BoxFuture<'static, Result<Arc<RenderedDiagram>, RenderError>>>;

/// One render attempt's inputs.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Diagram source.
    pub chart: String,
    /// Resolved theme (explicit prop or ambient default).
    pub theme: Option<Theme>,
    /// Raw serialized config attribute from the rewritten block.
    pub config: Option<String>,
    /// Free-form CSS attached to the effective configuration.
    pub theme_css: Option<String>,
    /// Explicit element id; derived from the key when absent.
    pub id: Option<String>,
}

impl RenderRequest {
    #[must_use]
    pub fn new(chart: impl Into<String>) -> Self {
        Self {
            chart: chart.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    #[must_use]
    pub fn config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    #[must_use]
    pub fn theme_css(mut self, theme_css: impl Into<String>) -> Self {
        self.theme_css = Some(theme_css.into());
        self
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Composite cache key for this request.
    ///
    /// The free-form CSS and the element id are presentation concerns and
    /// deliberately not part of the key.
    #[must_use]
    pub fn key(&self) -> RenderKey {
        RenderKey {
            chart: self.chart.clone(),
            theme: self.theme,
            config: self.config.clone(),
        }
    }
}

/// Process-lifetime render cache.
///
/// Holds both key families: the singleton engine slot and the per-diagram
/// map. For a fixed key the computation runs at most once; concurrent
/// requesters clone the same in-flight future and observe the same result,
/// success or failure. Entries are never evicted.
///
/// The cache is an explicit object rather than process-global state, so
/// embedders control its scope and lifetime.
pub struct RenderCache {
    loader: Arc<dyn EngineLoader>,
    engine: Mutex<Option<SharedEngine>>,
    renders: Mutex<HashMap<RenderKey, SharedRender>>,
}

impl RenderCache {
    #[must_use]
    pub fn new(loader: Arc<dyn EngineLoader>) -> Self {
        Self {
            loader,
            engine: Mutex::new(None),
            renders: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached per-diagram entries.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.renders).len()
    }

    /// Whether no diagram has been rendered through this cache yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.renders).is_empty()
    }

    /// Acquire the engine, starting the load on first use.
    ///
    /// Every call observes the same load: the returned future is a clone
    /// of the singleton entry.
    pub fn engine(&self) -> SharedEngine {
        let mut slot = lock(&self.engine);
        if let Some(shared) = slot.as_ref() {
            return shared.clone();
        }
        tracing::debug!("loading diagram engine");
        let shared = self.loader.load().shared();
        *slot = Some(shared.clone());
        shared
    }

    /// Render a diagram, memoized by (chart, theme, config).
    ///
    /// On a miss this resolves the effective configuration, composes the
    /// submitted source and queues the engine call; the engine is
    /// re-initialized with baseline options before each call. On a hit the
    /// existing future is cloned, whether pending, ready or failed.
    pub fn render(&self, request: &RenderRequest) -> SharedRender {
        let key = request.key();
        let mut renders = lock(&self.renders);
        if let Some(shared) = renders.get(&key) {
            tracing::debug!(id = %key.element_id(), "render cache hit");
            return shared.clone();
        }

        let mut config = resolve(request.config.as_deref(), request.theme);
        if request.theme_css.is_some() {
            config.theme_css = request.theme_css.clone();
        }
        let source = compose_source(&request.chart, &config);
        let id = request.id.clone().unwrap_or_else(|| key.element_id());
        tracing::debug!(id = %id, "render cache miss");

        let engine = self.engine();
        let shared = async move {
            let engine = engine.await?;
            engine.initialize(&EngineOptions::baseline());
            let rendered = engine.render(&id, &source).await?;
            Ok(Arc::new(rendered))
        }
        .boxed()
        .shared();
        renders.insert(key, shared.clone());
        shared
    }
}

/// Poison-tolerant lock: a panicked holder cannot have left the map in a
/// partially-updated state because every write is a single insert.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
