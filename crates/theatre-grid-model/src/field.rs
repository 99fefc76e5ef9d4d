//! Field tokens: `{{name}}` placeholders substituted with bound data when a
//! template is rendered or printed.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A template-local field definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldDef {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
}

impl CustomFieldDef {
    pub fn new(key: &str, label: &str) -> CustomFieldDef {
        CustomFieldDef {
            key: key.to_string(),
            label: label.to_string(),
            sample: None,
        }
    }
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}").unwrap())
}

/// Token names referenced by `content`, in order of appearance.
pub fn field_tokens(content: &str) -> Vec<String> {
    token_regex()
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// The placeholder text for a token name.
pub fn placeholder(key: &str) -> String {
    format!("{{{{{}}}}}", key)
}
