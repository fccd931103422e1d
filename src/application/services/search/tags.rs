use tracing::debug;

use crate::domain::content::node::ContentNode;
use crate::domain::content::value::PropertyValue;

use super::TAGS_ALIAS;

/// Tags assigned to a node, in stored order and original casing. Handles
/// both native string lists and legacy text storage (JSON array or comma
/// list).
pub fn tags_for(node: &ContentNode, culture: Option<&str>) -> Vec<String> {
    match node.value(TAGS_ALIAS, culture) {
        Some(PropertyValue::Strings(values)) => values
            .iter()
            .filter(|tag| !tag.is_empty())
            .cloned()
            .collect(),
        Some(PropertyValue::Text(raw)) => parse_tag_text(raw),
        Some(other) => {
            debug!(
                node_id = node.id,
                kind = other.kind_name(),
                "unexpected tags property kind"
            );
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn parse_tag_text(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(parsed) = serde_json::from_str::<Vec<String>>(trimmed) {
            return parsed.into_iter().filter(|tag| !tag.is_empty()).collect();
        }
    }
    trimmed
        .split(',')
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// AND-of-ORs tag match: every group must contain at least one of the
/// page's tags. Comparison is case-insensitive and exact (no substrings).
pub fn matches_tag_groups(page_tags: &[String], groups: &[Vec<String>]) -> bool {
    let lowered: Vec<String> = page_tags.iter().map(|tag| tag.to_lowercase()).collect();
    groups.iter().all(|group| {
        group
            .iter()
            .any(|wanted| lowered.iter().any(|have| *have == wanted.to_lowercase()))
    })
}
