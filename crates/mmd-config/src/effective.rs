//! Engine-facing configuration object.

use serde::{Deserialize, Serialize};

/// Effective per-diagram configuration.
///
/// Serializes to the engine's wire shape: camelCase field names, absent
/// fields omitted. Family groups are attached only when at least one of
/// their fields is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectiveConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Free-form CSS applied to the rendered diagram.
    #[serde(rename = "themeCSS", skip_serializing_if = "Option::is_none")]
    pub theme_css: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packet: Option<PacketConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flowchart: Option<FlowchartConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<SequenceConfig>,
}

impl EffectiveConfig {
    /// Serialize to the engine's JSON wire form.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize effective config")
    }
}

/// Packet diagram options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PacketConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits_per_row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_bits: Option<bool>,
}

/// Flowchart options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowchartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_spacing: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_spacing: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

/// Sequence diagram options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SequenceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_actors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_align: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_config_serializes_to_empty_object() {
        assert_eq!(EffectiveConfig::default().to_json(), "{}");
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let config = EffectiveConfig {
            theme: Some("dark".to_owned()),
            theme_css: Some("margin: 0;".to_owned()),
            packet: Some(PacketConfig {
                row_height: Some(40),
                bits_per_row: Some(32),
                show_bits: Some(true),
            }),
            flowchart: Some(FlowchartConfig {
                node_spacing: Some(50),
                rank_spacing: None,
                curve: Some("basis".to_owned()),
            }),
            sequence: Some(SequenceConfig {
                mirror_actors: Some(false),
                message_align: None,
            }),
        };

        assert_eq!(
            config.to_json(),
            r#"{"theme":"dark","themeCSS":"margin: 0;","packet":{"rowHeight":40,"bitsPerRow":32,"showBits":true},"flowchart":{"nodeSpacing":50,"curve":"basis"},"sequence":{"mirrorActors":false}}"#
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let config: EffectiveConfig =
            serde_json::from_str(r#"{"theme":"forest","gantt":{"barHeight":20}}"#).unwrap();

        assert_eq!(config.theme.as_deref(), Some("forest"));
        assert_eq!(config.packet, None);
    }

    #[test]
    fn test_deserialize_partial_group() {
        let config: EffectiveConfig =
            serde_json::from_str(r#"{"packet":{"rowHeight":24}}"#).unwrap();

        assert_eq!(
            config.packet,
            Some(PacketConfig {
                row_height: Some(24),
                bits_per_row: None,
                show_bits: None,
            })
        );
    }
}
