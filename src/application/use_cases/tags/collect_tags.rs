use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::application::dto::tags::TagUsageDto;
use crate::application::ports::content_cache::ContentCache;
use crate::application::ports::navigation::NavigationQuery;
use crate::application::services::search::tags;
use crate::domain::content::node::ContentNode;

/// Walks content subtrees and aggregates the tags found on the way. The
/// scope is either one node (inclusive) or every root tree.
pub struct CollectTags<'a, C: ContentCache + ?Sized, N: NavigationQuery + ?Sized> {
    pub cache: &'a C,
    pub navigation: &'a N,
}

impl<'a, C: ContentCache + ?Sized, N: NavigationQuery + ?Sized> CollectTags<'a, C, N> {
    /// Unique tags in the scope, sorted alphabetically. Duplicates collapse
    /// exactly; differently cased tags stay distinct.
    pub async fn unique(
        &self,
        scope: Option<Uuid>,
        culture: Option<&str>,
    ) -> anyhow::Result<Vec<String>> {
        let mut collected = self.gather(scope, culture).await?;
        collected.sort();
        collected.dedup();
        Ok(collected)
    }

    /// Tag usage counts in the scope, most used first, ties alphabetical.
    pub async fn usage(
        &self,
        scope: Option<Uuid>,
        culture: Option<&str>,
    ) -> anyhow::Result<Vec<TagUsageDto>> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for tag in self.gather(scope, culture).await? {
            *counts.entry(tag).or_insert(0) += 1;
        }
        let mut usage: Vec<TagUsageDto> = counts
            .into_iter()
            .map(|(tag, count)| TagUsageDto { tag, count })
            .collect();
        usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        Ok(usage)
    }

    async fn gather(
        &self,
        scope: Option<Uuid>,
        culture: Option<&str>,
    ) -> anyhow::Result<Vec<String>> {
        let mut collected = Vec::new();
        match scope {
            Some(key) => {
                if let Some(node) = self.cache.by_key(key).await? {
                    self.collect_subtree(node, culture, &mut collected).await?;
                }
            }
            None => {
                for key in self.navigation.root_keys().await? {
                    if let Some(root) = self.cache.by_key(key).await? {
                        self.collect_subtree(root, culture, &mut collected).await?;
                    }
                }
            }
        }
        Ok(collected)
    }

    async fn collect_subtree(
        &self,
        node: Arc<ContentNode>,
        culture: Option<&str>,
        collected: &mut Vec<String>,
    ) -> anyhow::Result<()> {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            collected.extend(tags::tags_for(&current, culture));
            let children = self.cache.children(current.id, culture).await?;
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap as PropMap;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use crate::domain::content::node::CultureVariant;
    use crate::domain::content::value::{Property, PropertyValue};

    use super::*;

    struct TreeCache {
        nodes: Vec<Arc<ContentNode>>,
    }

    #[async_trait]
    impl ContentCache for TreeCache {
        async fn by_id(&self, id: i64) -> anyhow::Result<Option<Arc<ContentNode>>> {
            Ok(self.nodes.iter().find(|n| n.id == id).cloned())
        }

        async fn by_key(&self, key: Uuid) -> anyhow::Result<Option<Arc<ContentNode>>> {
            Ok(self.nodes.iter().find(|n| n.key == key).cloned())
        }

        async fn children(
            &self,
            id: i64,
            culture: Option<&str>,
        ) -> anyhow::Result<Vec<Arc<ContentNode>>> {
            Ok(self
                .nodes
                .iter()
                .filter(|n| {
                    n.parent_id == Some(id)
                        && culture.map(|code| n.has_culture(code)).unwrap_or(true)
                })
                .cloned()
                .collect())
        }

        async fn descendants(
            &self,
            _id: i64,
            _culture: Option<&str>,
        ) -> anyhow::Result<Vec<Arc<ContentNode>>> {
            anyhow::bail!("not used by tag collection")
        }
    }

    #[async_trait]
    impl NavigationQuery for TreeCache {
        async fn root_keys(&self) -> anyhow::Result<Vec<Uuid>> {
            Ok(self
                .nodes
                .iter()
                .filter(|n| n.parent_id.is_none())
                .map(|n| n.key)
                .collect())
        }
    }

    fn node(id: i64, parent: Option<i64>, cultures: &[&str], tags: &[&str]) -> ContentNode {
        let properties = if tags.is_empty() {
            Vec::new()
        } else {
            vec![Property {
                alias: "tags".into(),
                value: Some(PropertyValue::Strings(
                    tags.iter().map(|t| t.to_string()).collect(),
                )),
                cultures: PropMap::new(),
            }]
        };
        ContentNode {
            id,
            key: Uuid::from_u128(id as u128),
            content_type: "contentPage".into(),
            parent_id: parent,
            level: 1,
            visible: true,
            create_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            update_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            cultures: cultures
                .iter()
                .map(|c| CultureVariant {
                    culture: c.to_string(),
                    name: format!("Node {id}"),
                    url: format!("/{id}/"),
                    visible: true,
                })
                .collect(),
            properties,
        }
    }

    fn tree() -> TreeCache {
        TreeCache {
            nodes: vec![
                Arc::new(node(1, None, &["en-US"], &["news"])),
                Arc::new(node(2, Some(1), &["en-US"], &["sport", "outdoor"])),
                Arc::new(node(3, Some(1), &["en-US", "da-DK"], &["sport"])),
                Arc::new(node(4, Some(3), &["da-DK"], &["vinter"])),
                Arc::new(node(5, None, &["en-US"], &["archive"])),
            ],
        }
    }

    fn collect<'a>(cache: &'a TreeCache) -> CollectTags<'a, TreeCache, TreeCache> {
        CollectTags {
            cache,
            navigation: cache,
        }
    }

    #[tokio::test]
    async fn unique_spans_all_roots_and_sorts() {
        let cache = tree();
        let tags = collect(&cache).unique(None, None).await.unwrap();
        assert_eq!(
            tags,
            vec!["archive", "news", "outdoor", "sport", "vinter"]
        );
    }

    #[tokio::test]
    async fn unique_can_scope_to_a_subtree() {
        let cache = tree();
        let tags = collect(&cache)
            .unique(Some(Uuid::from_u128(3)), None)
            .await
            .unwrap();
        assert_eq!(tags, vec!["sport", "vinter"]);
    }

    #[tokio::test]
    async fn unknown_scope_yields_no_tags() {
        let cache = tree();
        let tags = collect(&cache)
            .unique(Some(Uuid::from_u128(99)), None)
            .await
            .unwrap();
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn culture_prunes_the_walk() {
        let cache = tree();
        let tags = collect(&cache).unique(None, Some("da-DK")).await.unwrap();
        // roots without the culture still seed the walk, but only children
        // published in it are followed
        assert_eq!(tags, vec!["archive", "news", "sport", "vinter"]);
    }

    #[tokio::test]
    async fn usage_counts_and_orders() {
        let cache = tree();
        let usage = collect(&cache).usage(None, None).await.unwrap();
        let shaped: Vec<(&str, i64)> = usage
            .iter()
            .map(|u| (u.tag.as_str(), u.count))
            .collect();
        assert_eq!(
            shaped,
            vec![
                ("sport", 2),
                ("archive", 1),
                ("news", 1),
                ("outdoor", 1),
                ("vinter", 1),
            ]
        );
    }
}
