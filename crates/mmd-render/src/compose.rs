//! Source composition for engine submission.

use mmd_config::EffectiveConfig;

/// Compose the source string submitted to the engine.
///
/// The effective configuration is embedded as an inline init directive in
/// front of the diagram source, giving each diagram an isolated
/// configuration scope instead of mutating engine-global state. Escaped
/// newline sequences in the source are normalized to literal newlines.
#[must_use]
pub fn compose_source(chart: &str, config: &EffectiveConfig) -> String {
    let normalized = chart.replace("\\n", "\n");
    format!("%%{{init: {}}}%%\n{normalized}", config.to_json())
}

#[cfg(test)]
mod tests {
    use mmd_config::resolve;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_directive_prefixes_source() {
        let config = resolve(None, Some(mmd_config::Theme::Dark));

        assert_eq!(
            compose_source("graph TD\n  A --> B", &config),
            "%%{init: {\"theme\":\"dark\"}}%%\ngraph TD\n  A --> B"
        );
    }

    #[test]
    fn test_empty_config_still_scopes() {
        let config = EffectiveConfig::default();

        assert_eq!(compose_source("pie", &config), "%%{init: {}}%%\npie");
    }

    #[test]
    fn test_escaped_newlines_normalized() {
        let config = EffectiveConfig::default();

        assert_eq!(
            compose_source("graph TD\\n  A --> B", &config),
            "%%{init: {}}%%\ngraph TD\n  A --> B"
        );
    }
}
