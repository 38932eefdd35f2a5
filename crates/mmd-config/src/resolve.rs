//! Builds an [`EffectiveConfig`] from serialized block attributes.

use serde_json::{Map, Value};

use crate::effective::{EffectiveConfig, FlowchartConfig, PacketConfig, SequenceConfig};
use crate::theme::Theme;

/// Resolve the effective configuration for one render attempt.
///
/// `serialized` is the JSON attribute bag a rewritten block carries (if
/// any); `theme_override` is the theme the caller already resolved from its
/// explicit prop or the ambient color mode. Resolution never fails:
///
/// - absent or malformed JSON yields a config holding only the override;
/// - a `config` attribute that itself parses as JSON is taken as a
///   pre-resolved nested configuration, with top-level theme and override
///   shallow-overlaid on top;
/// - otherwise the attributes are treated as flat fields and mapped into
///   the recognized family groups, dropping anything unrecognized.
#[must_use]
pub fn resolve(serialized: Option<&str>, theme_override: Option<Theme>) -> EffectiveConfig {
    let Some(raw) = serialized else {
        return override_only(theme_override);
    };
    let Ok(Value::Object(attrs)) = serde_json::from_str::<Value>(raw) else {
        tracing::debug!("diagram config attribute is not a JSON object, using defaults");
        return override_only(theme_override);
    };

    // A nested configuration resolved by an earlier pass is handed through
    // as-is; only theme overlays apply on top.
    if let Some(Value::String(nested)) = attrs.get("config")
        && let Ok(mut config) = serde_json::from_str::<EffectiveConfig>(nested)
    {
        if let Some(Value::String(theme)) = attrs.get("theme") {
            config.theme = Some(theme.clone());
        }
        if let Some(theme) = theme_override {
            config.theme = Some(theme.as_str().to_owned());
        }
        return config;
    }

    EffectiveConfig {
        theme: match attrs.get("theme") {
            Some(Value::String(theme)) => Some(theme.clone()),
            _ => theme_override.map(|t| t.as_str().to_owned()),
        },
        theme_css: None,
        packet: group(PacketConfig {
            row_height: int_attr(&attrs, "rowHeight"),
            bits_per_row: int_attr(&attrs, "bitsPerRow"),
            show_bits: bool_attr(&attrs, "showBits"),
        }),
        flowchart: group(FlowchartConfig {
            node_spacing: int_attr(&attrs, "nodeSpacing"),
            rank_spacing: int_attr(&attrs, "rankSpacing"),
            curve: str_attr(&attrs, "curve"),
        }),
        sequence: group(SequenceConfig {
            mirror_actors: bool_attr(&attrs, "mirrorActors"),
            message_align: str_attr(&attrs, "messageAlign"),
        }),
    }
}

fn override_only(theme_override: Option<Theme>) -> EffectiveConfig {
    EffectiveConfig {
        theme: theme_override.map(|t| t.as_str().to_owned()),
        ..EffectiveConfig::default()
    }
}

/// Attach a family group only when at least one field is set.
fn group<T: Default + PartialEq>(config: T) -> Option<T> {
    (config != T::default()).then_some(config)
}

fn str_attr(attrs: &Map<String, Value>, key: &str) -> Option<String> {
    match attrs.get(key) {
        Some(Value::String(value)) => Some(value.clone()),
        _ => None,
    }
}

fn int_attr(attrs: &Map<String, Value>, key: &str) -> Option<u32> {
    let value = str_attr(attrs, key)?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(field = key, value = %value, "ignoring non-numeric diagram option");
            None
        }
    }
}

/// Boolean-ish attribute: `"true"` is true, anything else present is false.
fn bool_attr(attrs: &Map<String, Value>, key: &str) -> Option<bool> {
    match attrs.get(key) {
        Some(Value::String(value)) => Some(value == "true"),
        Some(Value::Null) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_override_only() {
        let config = resolve(None, Some(Theme::Dark));

        assert_eq!(config.theme.as_deref(), Some("dark"));
        assert_eq!(config.to_json(), r#"{"theme":"dark"}"#);
    }

    #[test]
    fn test_no_input_yields_empty_config() {
        assert_eq!(resolve(None, None), EffectiveConfig::default());
    }

    #[test]
    fn test_malformed_json_falls_back_to_override() {
        let config = resolve(Some("not json"), Some(Theme::Forest));

        assert_eq!(config.theme.as_deref(), Some("forest"));
        assert_eq!(config.packet, None);
    }

    #[test]
    fn test_non_object_json_falls_back() {
        let config = resolve(Some("[1,2,3]"), None);

        assert_eq!(config, EffectiveConfig::default());
    }

    #[test]
    fn test_flat_theme_and_packet_field() {
        let config = resolve(Some(r#"{"theme":"dark","rowHeight":"40"}"#), None);

        assert_eq!(config.theme.as_deref(), Some("dark"));
        assert_eq!(
            config.packet,
            Some(PacketConfig {
                row_height: Some(40),
                bits_per_row: None,
                show_bits: None,
            })
        );
        assert_eq!(config.to_json(), r#"{"theme":"dark","packet":{"rowHeight":40}}"#);
    }

    #[test]
    fn test_flat_theme_beats_override() {
        let config = resolve(Some(r#"{"theme":"neutral"}"#), Some(Theme::Dark));

        assert_eq!(config.theme.as_deref(), Some("neutral"));
    }

    #[test]
    fn test_nested_config_with_override() {
        let config = resolve(
            Some(r#"{"config":"{\"theme\":\"forest\"}"}"#),
            Some(Theme::Dark),
        );

        assert_eq!(config.theme.as_deref(), Some("dark"));
        assert_eq!(config.to_json(), r#"{"theme":"dark"}"#);
    }

    #[test]
    fn test_nested_config_keeps_groups() {
        let config = resolve(
            Some(r#"{"config":"{\"flowchart\":{\"curve\":\"basis\"}}"}"#),
            None,
        );

        assert_eq!(
            config.flowchart,
            Some(FlowchartConfig {
                node_spacing: None,
                rank_spacing: None,
                curve: Some("basis".to_owned()),
            })
        );
    }

    #[test]
    fn test_nested_config_outer_theme_overlay() {
        let config = resolve(
            Some(r#"{"theme":"neutral","config":"{\"theme\":\"forest\"}"}"#),
            None,
        );

        assert_eq!(config.theme.as_deref(), Some("neutral"));
    }

    #[test]
    fn test_unparseable_nested_config_treated_as_flat() {
        let config = resolve(Some(r#"{"config":"not json","theme":"dark"}"#), None);

        assert_eq!(config.theme.as_deref(), Some("dark"));
    }

    #[test]
    fn test_flowchart_and_sequence_groups() {
        let config = resolve(
            Some(
                r#"{"nodeSpacing":"50","rankSpacing":"70","curve":"basis","mirrorActors":"true","messageAlign":"left"}"#,
            ),
            None,
        );

        assert_eq!(
            config.flowchart,
            Some(FlowchartConfig {
                node_spacing: Some(50),
                rank_spacing: Some(70),
                curve: Some("basis".to_owned()),
            })
        );
        assert_eq!(
            config.sequence,
            Some(SequenceConfig {
                mirror_actors: Some(true),
                message_align: Some("left".to_owned()),
            })
        );
        assert_eq!(config.packet, None);
    }

    #[test]
    fn test_boolean_ish_values() {
        let config = resolve(Some(r#"{"mirrorActors":"yes"}"#), None);

        // Anything other than the literal "true" is false.
        assert_eq!(
            config.sequence,
            Some(SequenceConfig {
                mirror_actors: Some(false),
                message_align: None,
            })
        );
    }

    #[test]
    fn test_valueless_flag_is_false() {
        let config = resolve(Some(r#"{"showBits":null}"#), None);

        assert_eq!(
            config.packet,
            Some(PacketConfig {
                row_height: None,
                bits_per_row: None,
                show_bits: Some(false),
            })
        );
    }

    #[test]
    fn test_non_numeric_field_dropped() {
        let config = resolve(Some(r#"{"rowHeight":"abc"}"#), None);

        assert_eq!(config.packet, None);
    }

    #[test]
    fn test_unrecognized_keys_dropped() {
        let config = resolve(Some(r#"{"zoom":"2","padding":"10"}"#), None);

        assert_eq!(config, EffectiveConfig::default());
    }
}
