//! Per-instance diagram view and mount lifecycle.

use std::fmt;
use std::sync::Arc;

use mmd_config::{ColorMode, ColorScheme, Theme};

use crate::cache::{RenderCache, RenderRequest};
use crate::container::Container;
use crate::error::RenderError;
use crate::key::sanitize_element_id;

/// Default styling applied to a mounted diagram.
pub const DEFAULT_THEME_CSS: &str = "margin: 1.5rem auto 0;";

/// Lifecycle of a view instance.
///
/// A view suspends while waiting for the engine and again while waiting
/// for the render; the host shows its own fallback during those waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Unmounted,
    WaitingForEngine,
    WaitingForRender,
    Rendered,
}

/// One embedded diagram instance.
///
/// Carries the attributes a rewritten block hands to the component:
/// the diagram source, an optional explicit theme, free-form CSS, the
/// serialized config attribute and the export flag. Rendering is shared
/// through a [`RenderCache`]; tearing a view down mid-wait leaves the
/// cache entry in place for the next instance.
///
/// # Example
///
/// ```ignore
/// let mut view = DiagramView::new("graph TD\n  A --> B")
///     .theme(Theme::Forest)
///     .exportable(true);
/// block_on(view.mount(&cache, &mut container))?;
/// assert_eq!(view.state(), ViewState::Rendered);
/// ```
pub struct DiagramView {
    chart: String,
    theme: Option<Theme>,
    theme_css: String,
    config: Option<String>,
    exportable: bool,
    id: Option<String>,
    color_scheme: Option<Arc<dyn ColorScheme>>,
    state: ViewState,
    bound: bool,
}

impl fmt::Debug for DiagramView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramView")
            .field("chart", &self.chart)
            .field("theme", &self.theme)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl DiagramView {
    /// Create a view for the given diagram source.
    #[must_use]
    pub fn new(chart: impl Into<String>) -> Self {
        Self {
            chart: chart.into(),
            theme: None,
            theme_css: DEFAULT_THEME_CSS.to_owned(),
            config: None,
            exportable: false,
            id: None,
            color_scheme: None,
            state: ViewState::Unmounted,
            bound: false,
        }
    }

    /// Set an explicit theme, bypassing the ambient color mode.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Replace the default free-form CSS.
    #[must_use]
    pub fn theme_css(mut self, theme_css: impl Into<String>) -> Self {
        self.theme_css = theme_css.into();
        self
    }

    /// Attach the serialized config attribute from the rewritten block.
    #[must_use]
    pub fn config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Enable the export affordances for this view.
    #[must_use]
    pub fn exportable(mut self, exportable: bool) -> Self {
        self.exportable = exportable;
        self
    }

    /// Set an explicit element id (sanitized to a safe token).
    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(sanitize_element_id(id));
        self
    }

    /// Attach the ambient color-mode provider.
    #[must_use]
    pub fn color_scheme(mut self, scheme: Arc<dyn ColorScheme>) -> Self {
        self.color_scheme = Some(scheme);
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Whether export affordances should be offered for this view.
    #[must_use]
    pub fn is_exportable(&self) -> bool {
        self.exportable
    }

    /// Theme for the next render attempt.
    ///
    /// The explicit theme wins; otherwise the ambient color mode (read
    /// once per attempt, defaulting to light when no provider is
    /// attached) picks the theme.
    #[must_use]
    pub fn resolved_theme(&self) -> Theme {
        self.theme.unwrap_or_else(|| {
            self.color_scheme
                .as_ref()
                .map_or(ColorMode::Light, |scheme| scheme.resolved_mode())
                .default_theme()
        })
    }

    /// Render through the cache and mount the markup into the container.
    ///
    /// Suspends first on engine acquisition, then on the render itself.
    /// Once markup is mounted, the engine's binding callback (if any) runs
    /// exactly once per view, and only against an attached container.
    pub async fn mount(
        &mut self,
        cache: &RenderCache,
        container: &mut dyn Container,
    ) -> Result<(), RenderError> {
        let mut request = RenderRequest::new(self.chart.clone())
            .theme(self.resolved_theme())
            .theme_css(self.theme_css.clone());
        if let Some(config) = &self.config {
            request = request.config(config.clone());
        }
        if let Some(id) = &self.id {
            request = request.id(id.clone());
        }

        self.state = ViewState::WaitingForEngine;
        cache.engine().await?;

        self.state = ViewState::WaitingForRender;
        let rendered = cache.render(&request).await?;

        container.set_markup(&rendered.svg);
        if let Some(bind) = &rendered.bind
            && container.is_attached()
            && !self.bound
        {
            bind(container);
            self.bound = true;
        }
        self.state = ViewState::Rendered;
        Ok(())
    }
}
