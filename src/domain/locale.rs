use serde::{Deserialize, Serialize};

/// A site language as configured in the CMS.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub iso_code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
}

/// A hostname assigned to one language, with or without a scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDomain {
    pub name: String,
    pub culture: String,
}

/// One dictionary entry with its per-culture translations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryItem {
    pub key: String,
    #[serde(default)]
    pub translations: Vec<DictionaryValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryValue {
    pub culture: String,
    pub value: String,
}
