use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value::{Property, PropertyValue};

/// Per-culture variant of a node: display name, resolved relative URL and
/// navigation visibility. The order of `ContentNode::cultures` is the
/// publication order; the first entry is the node's default variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureVariant {
    pub culture: String,
    pub name: String,
    pub url: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// A published content node projected out of the CMS cache. Nodes are
/// immutable for the lifetime of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    pub id: i64,
    pub key: Uuid,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Depth in the tree, roots at 1. Derived from the parent chain when a
    /// snapshot is loaded.
    #[serde(default)]
    pub level: i32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
    #[serde(default)]
    pub cultures: Vec<CultureVariant>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl ContentNode {
    pub fn culture_variant(&self, culture: &str) -> Option<&CultureVariant> {
        self.cultures
            .iter()
            .find(|variant| variant.culture.eq_ignore_ascii_case(culture))
    }

    /// Whether the node is published in the culture at all.
    pub fn has_culture(&self, culture: &str) -> bool {
        self.culture_variant(culture).is_some()
    }

    pub fn first_culture(&self) -> Option<&str> {
        self.cultures.first().map(|variant| variant.culture.as_str())
    }

    /// Display name for a culture, falling back to the first variant when
    /// the node does not vary by that culture.
    pub fn name(&self, culture: Option<&str>) -> Option<&str> {
        let variant = match culture {
            Some(code) => self.culture_variant(code).or_else(|| self.cultures.first()),
            None => self.cultures.first(),
        };
        variant.map(|v| v.name.as_str())
    }

    pub fn url(&self, culture: &str) -> Option<&str> {
        self.culture_variant(culture).map(|variant| variant.url.as_str())
    }

    pub fn property(&self, alias: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.alias == alias)
    }

    pub fn value(&self, alias: &str, culture: Option<&str>) -> Option<&PropertyValue> {
        self.property(alias).and_then(|p| p.value_for(culture))
    }

    /// Plain-text property value, covering both text and rich-text editors.
    pub fn text_value(&self, alias: &str, culture: Option<&str>) -> Option<&str> {
        self.value(alias, culture).and_then(|v| v.as_text())
    }
}
