use crate::domain::content::node::ContentNode;
use crate::domain::content::value::{BlockElement, BlockItem, GridItem, PropertyValue};

use super::text::strip_html;

/// True when `query` (already lowercased) occurs in any block-capable
/// property of the node. Plain text properties are covered by the named
/// field checks of the text filter, not here.
pub fn node_blocks_contain(node: &ContentNode, query: &str, culture: Option<&str>) -> bool {
    node.properties
        .iter()
        .filter_map(|property| property.value_for(culture))
        .any(|value| match value {
            PropertyValue::RichText(_)
            | PropertyValue::BlockList(_)
            | PropertyValue::BlockGrid(_) => value_contains(value, query, culture),
            _ => false,
        })
}

/// Substring-match one property value, recursing through nested blocks.
pub fn value_contains(value: &PropertyValue, query: &str, culture: Option<&str>) -> bool {
    match value {
        PropertyValue::Text(text) => text.to_lowercase().contains(query),
        PropertyValue::RichText(html) => strip_html(html).to_lowercase().contains(query),
        PropertyValue::Strings(items) => {
            items.iter().any(|item| item.to_lowercase().contains(query))
        }
        PropertyValue::Links(links) => links.iter().any(|link| {
            link.name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(query))
                || link
                    .url
                    .as_deref()
                    .is_some_and(|url| url.to_lowercase().contains(query))
        }),
        PropertyValue::Media(media) => media.name.to_lowercase().contains(query),
        PropertyValue::BlockList(items) => items
            .iter()
            .any(|item| block_item_contains(item, query, culture)),
        PropertyValue::BlockGrid(items) => items
            .iter()
            .any(|item| grid_item_contains(item, query, culture)),
        PropertyValue::Other(raw) => coerce_text(raw).to_lowercase().contains(query),
    }
}

fn element_contains(element: &BlockElement, query: &str, culture: Option<&str>) -> bool {
    element
        .properties
        .iter()
        .filter_map(|property| property.value_for(culture))
        .any(|value| value_contains(value, query, culture))
}

fn block_item_contains(item: &BlockItem, query: &str, culture: Option<&str>) -> bool {
    element_contains(&item.content, query, culture)
        || item
            .settings
            .as_ref()
            .is_some_and(|settings| element_contains(settings, query, culture))
}

fn grid_item_contains(item: &GridItem, query: &str, culture: Option<&str>) -> bool {
    element_contains(&item.content, query, culture)
        || item
            .settings
            .as_ref()
            .is_some_and(|settings| element_contains(settings, query, culture))
        || item.areas.iter().any(|area| {
            area.items
                .iter()
                .any(|nested| grid_item_contains(nested, query, culture))
        })
}

fn coerce_text(raw: &serde_json::Value) -> String {
    match raw {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
