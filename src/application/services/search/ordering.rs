use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::content::node::ContentNode;

use super::PAGE_TITLE_ALIAS;

/// Sort key recognized by the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKey {
    Name,
    CreateDate,
    UpdateDate,
    Level,
    PageTitle,
}

/// Sort matches in place. Recognized keys honor the direction parameter,
/// where anything other than `asc` means descending. Unknown or absent
/// keys always fall back to newest-first by creation date.
pub fn order_pages(
    pages: &mut [Arc<ContentNode>],
    order_by: Option<&str>,
    direction: Option<&str>,
    culture: Option<&str>,
) {
    let requested = order_by
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_lowercase);
    let (key, descending) = match requested.as_deref() {
        Some("name") => (SortKey::Name, is_descending(direction)),
        Some("createdate") => (SortKey::CreateDate, is_descending(direction)),
        Some("updatedate") => (SortKey::UpdateDate, is_descending(direction)),
        Some("level") => (SortKey::Level, is_descending(direction)),
        Some("pagetitle") => (SortKey::PageTitle, is_descending(direction)),
        _ => (SortKey::CreateDate, true),
    };
    pages.sort_by(|a, b| {
        let ordering = compare(a, b, key, culture);
        if descending { ordering.reverse() } else { ordering }
    });
}

fn is_descending(direction: Option<&str>) -> bool {
    !direction.is_some_and(|d| d.trim().eq_ignore_ascii_case("asc"))
}

fn compare(a: &ContentNode, b: &ContentNode, key: SortKey, culture: Option<&str>) -> Ordering {
    match key {
        SortKey::Name => display_name(a, culture).cmp(display_name(b, culture)),
        SortKey::CreateDate => a.create_date.cmp(&b.create_date),
        SortKey::UpdateDate => a.update_date.cmp(&b.update_date),
        SortKey::Level => a.level.cmp(&b.level),
        SortKey::PageTitle => title_or_name(a, culture).cmp(title_or_name(b, culture)),
    }
}

fn display_name<'a>(node: &'a ContentNode, culture: Option<&str>) -> &'a str {
    node.name(culture).unwrap_or_default()
}

fn title_or_name<'a>(node: &'a ContentNode, culture: Option<&str>) -> &'a str {
    node.text_value(PAGE_TITLE_ALIAS, culture)
        .unwrap_or_else(|| display_name(node, culture))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::domain::content::node::CultureVariant;
    use crate::domain::content::value::{Property, PropertyValue};

    use super::*;

    fn page(id: i64, name: &str, day: u32, level: i32, title: Option<&str>) -> Arc<ContentNode> {
        let mut properties = Vec::new();
        if let Some(title) = title {
            properties.push(Property {
                alias: PAGE_TITLE_ALIAS.into(),
                value: Some(PropertyValue::Text(title.into())),
                cultures: HashMap::new(),
            });
        }
        Arc::new(ContentNode {
            id,
            key: Uuid::new_v4(),
            content_type: "contentPage".into(),
            parent_id: None,
            level,
            visible: true,
            create_date: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            update_date: Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).unwrap(),
            cultures: vec![CultureVariant {
                culture: "en-US".into(),
                name: name.into(),
                url: format!("/{id}/"),
                visible: true,
            }],
            properties,
        })
    }

    fn ids(pages: &[Arc<ContentNode>]) -> Vec<i64> {
        pages.iter().map(|p| p.id).collect()
    }

    #[test]
    fn name_ascending_and_descending() {
        let mut pages = vec![
            page(1, "cherry", 1, 1, None),
            page(2, "apple", 2, 1, None),
            page(3, "banana", 3, 1, None),
        ];
        order_pages(&mut pages, Some("name"), Some("asc"), None);
        assert_eq!(ids(&pages), vec![2, 3, 1]);
        order_pages(&mut pages, Some("name"), Some("desc"), None);
        assert_eq!(ids(&pages), vec![1, 3, 2]);
    }

    #[test]
    fn recognized_key_without_direction_sorts_descending() {
        let mut pages = vec![page(1, "a", 1, 1, None), page(2, "b", 3, 1, None)];
        order_pages(&mut pages, Some("updateDate"), None, None);
        assert_eq!(ids(&pages), vec![2, 1]);
    }

    #[test]
    fn direction_is_case_insensitive() {
        let mut pages = vec![page(1, "a", 3, 1, None), page(2, "b", 1, 1, None)];
        order_pages(&mut pages, Some("createDate"), Some("ASC"), None);
        assert_eq!(ids(&pages), vec![2, 1]);
    }

    #[test]
    fn unknown_key_falls_back_to_newest_created_first() {
        let mut pages = vec![
            page(1, "a", 1, 1, None),
            page(2, "b", 3, 1, None),
            page(3, "c", 2, 1, None),
        ];
        order_pages(&mut pages, Some("popularity"), Some("asc"), None);
        assert_eq!(ids(&pages), vec![2, 3, 1]);
    }

    #[test]
    fn absent_key_falls_back_to_newest_created_first() {
        let mut pages = vec![page(1, "a", 2, 1, None), page(2, "b", 1, 1, None)];
        order_pages(&mut pages, None, None, None);
        assert_eq!(ids(&pages), vec![1, 2]);
    }

    #[test]
    fn level_orders_numerically() {
        let mut pages = vec![
            page(1, "a", 1, 3, None),
            page(2, "b", 1, 1, None),
            page(3, "c", 1, 2, None),
        ];
        order_pages(&mut pages, Some("level"), Some("asc"), None);
        assert_eq!(ids(&pages), vec![2, 3, 1]);
    }

    #[test]
    fn page_title_falls_back_to_name() {
        let mut pages = vec![
            page(1, "zebra", 1, 1, None),
            page(2, "a", 1, 1, Some("mango")),
        ];
        order_pages(&mut pages, Some("pageTitle"), Some("asc"), None);
        assert_eq!(ids(&pages), vec![2, 1]);
    }
}
