//! Composite render cache key.

use mmd_config::Theme;
use sha2::{Digest, Sha256};

/// Parameters that determine a rendered diagram.
///
/// Identical keys share one cached computation; any difference, including
/// in the raw serialized config string, is a separate cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderKey {
    /// Diagram source as given by the caller (before composition).
    pub chart: String,
    /// Resolved theme.
    pub theme: Option<Theme>,
    /// Raw serialized config attribute, not the resolved form.
    pub config: Option<String>,
}

impl RenderKey {
    /// Derive a stable element id for this key.
    ///
    /// Identical requests agree on the id, so the memoized markup is
    /// consistent no matter which requester triggered the render.
    ///
    /// # Id Format
    ///
    /// `mmd-` followed by the first 12 hex characters of
    /// SHA-256 of `"{chart}:{theme}:{config}"`.
    #[must_use]
    pub fn element_id(&self) -> String {
        let content = format!(
            "{}:{}:{}",
            self.chart,
            self.theme.map_or("", Theme::as_str),
            self.config.as_deref().unwrap_or(""),
        );
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        let digest = hex::encode(hasher.finalize());
        format!("mmd-{}", &digest[..12])
    }
}

/// Convert an arbitrary string into a conservative element id token.
///
/// The markup's root id seeds internal ids inside the rendered vector
/// output, so ids must be safe to embed several times in one document:
/// unsupported characters become `-` and the id always starts with an
/// ASCII letter.
#[must_use]
pub fn sanitize_element_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "mmd-diagram".to_owned();
    }

    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        out.push(if ok { ch } else { '-' });
    }

    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() {
        return "mmd-diagram".to_owned();
    }

    let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if starts_ok {
        out.to_owned()
    } else {
        format!("mmd-{out}")
    }
}
