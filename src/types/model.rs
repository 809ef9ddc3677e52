use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the model the completion endpoint should use.
///
/// This can be a known model or a custom string for models the endpoint adds
/// later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model identifiers.
    Known(KnownModel),

    /// Custom model identifier.
    Custom(String),
}

/// Known chat models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnownModel {
    /// General purpose chat model.
    DeepseekChat,

    /// Reasoning model.
    DeepseekReasoner,
}

impl KnownModel {
    /// Looks up a known model by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "deepseek-chat" => Some(KnownModel::DeepseekChat),
            "deepseek-reasoner" => Some(KnownModel::DeepseekReasoner),
            _ => None,
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::Known(KnownModel::DeepseekChat)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownModel::DeepseekChat => write!(f, "deepseek-chat"),
            KnownModel::DeepseekReasoner => write!(f, "deepseek-reasoner"),
        }
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        KnownModel::from_name(model)
            .map(Model::Known)
            .unwrap_or_else(|| Model::Custom(model.to_string()))
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        Model::from(model.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_model_serialization() {
        let model = Model::Known(KnownModel::DeepseekChat);
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""deepseek-chat""#);
    }

    #[test]
    fn custom_model_serialization() {
        let model = Model::Custom("local-llama".to_string());
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""local-llama""#);
    }

    #[test]
    fn model_deserialization() {
        let model: Model = serde_json::from_str(r#""deepseek-reasoner""#).unwrap();
        assert_eq!(model, Model::Known(KnownModel::DeepseekReasoner));

        let model: Model = serde_json::from_str(r#""local-llama""#).unwrap();
        assert_eq!(model, Model::Custom("local-llama".to_string()));
    }

    #[test]
    fn from_str_prefers_known_models() {
        assert_eq!(Model::from("deepseek-chat"), Model::default());
        assert_eq!(
            Model::from("gpt-4o-mini".to_string()),
            Model::Custom("gpt-4o-mini".to_string())
        );
    }

    #[test]
    fn display() {
        assert_eq!(Model::default().to_string(), "deepseek-chat");
        assert_eq!(Model::Custom("x".to_string()).to_string(), "x");
    }
}
