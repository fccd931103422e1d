use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named property on a content node or block element. The invariant
/// `value` applies to every culture; entries in `cultures` override it for
/// specific ISO codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub cultures: HashMap<String, PropertyValue>,
}

impl Property {
    /// Value for a culture: the per-culture override wins, otherwise the
    /// invariant value. Culture codes compare case-insensitively.
    pub fn value_for(&self, culture: Option<&str>) -> Option<&PropertyValue> {
        if let Some(culture) = culture {
            let hit = self
                .cultures
                .iter()
                .find(|(code, _)| code.eq_ignore_ascii_case(culture))
                .map(|(_, value)| value);
            if hit.is_some() {
                return hit;
            }
        }
        self.value.as_ref()
    }
}

/// Typed property value as projected out of the CMS. `Other` keeps values
/// from unknown editors around as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PropertyValue {
    Text(String),
    RichText(String),
    Strings(Vec<String>),
    Links(Vec<LinkRef>),
    Media(MediaRef),
    BlockList(Vec<BlockItem>),
    BlockGrid(Vec<GridItem>),
    Other(serde_json::Value),
}

impl PropertyValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyValue::Text(_) => "text",
            PropertyValue::RichText(_) => "richText",
            PropertyValue::Strings(_) => "strings",
            PropertyValue::Links(_) => "links",
            PropertyValue::Media(_) => "media",
            PropertyValue::BlockList(_) => "blockList",
            PropertyValue::BlockGrid(_) => "blockGrid",
            PropertyValue::Other(_) => "other",
        }
    }

    /// Plain string when the value is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) | PropertyValue::RichText(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// One entry of a multi-URL picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A media item (image, file) with its resolved URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub name: String,
    pub url: String,
}

/// The element behind a block: a document-typed bag of properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockElement {
    pub content_type: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl BlockElement {
    pub fn property(&self, alias: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.alias == alias)
    }
}

/// One block of a block-list property: authored content plus optional
/// per-block settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockItem {
    pub content: BlockElement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<BlockElement>,
}

/// One block of a block-grid property. Grid blocks nest further blocks
/// inside named areas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    pub content: BlockElement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<BlockElement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub areas: Vec<GridArea>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridArea {
    pub alias: String,
    #[serde(default)]
    pub items: Vec<GridItem>,
}
