use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ports::content_cache::{CacheUnavailable, ContentCache};
use crate::application::ports::navigation::NavigationQuery;
use crate::application::services::search::{
    BODY_TEXT_ALIAS, PAGE_CONTENT_TYPE, PAGE_IMAGE_ALIAS, PAGE_TITLE_ALIAS, SUB_TITLE_ALIAS,
    blocks, ordering, tag_expr, tags, text,
};
use crate::domain::content::node::ContentNode;
use crate::domain::content::value::PropertyValue;
use crate::domain::search::{SearchCriteria, SearchResultItem, SearchResultPage};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Content cache not available")]
    CacheUnavailable,
    #[error("Start node with ID {0} not found")]
    StartNodeNotFound(i64),
    #[error("No root content found")]
    NoRootContent,
    #[error("Skip must be zero or greater")]
    NegativeSkip,
    #[error("Take must be between 1 and 100")]
    TakeOutOfRange,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct SearchPages<'a, C: ContentCache + ?Sized, N: NavigationQuery + ?Sized> {
    pub cache: &'a C,
    pub navigation: &'a N,
    pub default_culture: &'a str,
}

impl<'a, C: ContentCache + ?Sized, N: NavigationQuery + ?Sized> SearchPages<'a, C, N> {
    pub async fn execute(&self, criteria: &SearchCriteria) -> Result<SearchResultPage, SearchError> {
        if criteria.skip < 0 {
            return Err(SearchError::NegativeSkip);
        }
        if !(1..=100).contains(&criteria.take) {
            return Err(SearchError::TakeOutOfRange);
        }

        let culture = criteria.lang.as_deref().filter(|lang| !lang.is_empty());
        let start = self.resolve_start_node(criteria).await?;

        let pages = if criteria.include_children {
            self.collect_pages(start.as_ref(), culture).await?
        } else {
            Vec::new()
        };

        let mut matches = apply_filters(pages, criteria, culture);
        if let Some(excluded) = criteria.exclude_node {
            matches.retain(|page| page.id != excluded);
        }
        ordering::order_pages(
            &mut matches,
            criteria.order_by.as_deref(),
            criteria.order_direction.as_deref(),
            culture,
        );

        let total = matches.len();
        debug!(total, skip = criteria.skip, take = criteria.take, "search matched");

        let items = matches
            .into_iter()
            .skip(criteria.skip as usize)
            .take(criteria.take as usize)
            .filter_map(|page| shape_item(page.as_ref(), culture, self.default_culture))
            .collect();

        Ok(SearchResultPage {
            total,
            skip: criteria.skip,
            take: criteria.take,
            items,
        })
    }

    async fn resolve_start_node(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Arc<ContentNode>, SearchError> {
        if let Some(id) = criteria.start_node_id {
            return self
                .cache
                .by_id(id)
                .await
                .map_err(classify)?
                .ok_or(SearchError::StartNodeNotFound(id));
        }
        let roots = self.navigation.root_keys().await.map_err(classify)?;
        let Some(first) = roots.first() else {
            return Err(SearchError::NoRootContent);
        };
        self.cache
            .by_key(*first)
            .await
            .map_err(classify)?
            .ok_or(SearchError::NoRootContent)
    }

    async fn collect_pages(
        &self,
        start: &ContentNode,
        culture: Option<&str>,
    ) -> Result<Vec<Arc<ContentNode>>, SearchError> {
        let descendants = match self.cache.descendants(start.id, culture).await {
            Ok(nodes) => nodes,
            Err(err) => {
                if err.is::<CacheUnavailable>() {
                    return Err(SearchError::CacheUnavailable);
                }
                debug!(start_id = start.id, error = ?err, "bulk descendant enumeration failed, walking children");
                self.walk_children(start.id, culture).await.map_err(classify)?
            }
        };

        let mut seen = HashSet::new();
        Ok(descendants
            .into_iter()
            .filter(|node| node.id != start.id && is_content_page(node, culture))
            .filter(|node| seen.insert(node.id))
            .collect())
    }

    /// Depth-first walk over `children`. Misses pages under ancestors that
    /// are unpublished in the culture, which is why the bulk enumeration is
    /// tried first.
    async fn walk_children(
        &self,
        start_id: i64,
        culture: Option<&str>,
    ) -> anyhow::Result<Vec<Arc<ContentNode>>> {
        let mut collected = Vec::new();
        let mut stack = vec![start_id];
        while let Some(id) = stack.pop() {
            let children = self.cache.children(id, culture).await?;
            for child in children.iter().rev() {
                stack.push(child.id);
            }
            collected.extend(children);
        }
        Ok(collected)
    }
}

fn classify(err: anyhow::Error) -> SearchError {
    if err.is::<CacheUnavailable>() {
        SearchError::CacheUnavailable
    } else {
        SearchError::Other(err)
    }
}

fn is_content_page(node: &ContentNode, culture: Option<&str>) -> bool {
    if node.content_type != PAGE_CONTENT_TYPE || !node.visible {
        return false;
    }
    match culture {
        Some(code) => node
            .culture_variant(code)
            .map(|variant| variant.visible)
            .unwrap_or(false),
        None => true,
    }
}

fn apply_filters(
    pages: Vec<Arc<ContentNode>>,
    criteria: &SearchCriteria,
    culture: Option<&str>,
) -> Vec<Arc<ContentNode>> {
    let mut pages = pages;

    if let Some(code) = culture {
        pages.retain(|page| page.has_culture(code));
    }

    let expression = criteria
        .tag_groups
        .as_deref()
        .filter(|expr| !expr.is_empty())
        .or_else(|| criteria.tags.as_deref().filter(|expr| !expr.is_empty()));
    if let Some(expression) = expression {
        let groups = tag_expr::parse_tag_groups(expression);
        if groups.is_empty() {
            debug!("tag expression produced no groups, skipping tag filter");
        } else {
            pages.retain(|page| {
                let page_tags = tags::tags_for(page, culture);
                tags::matches_tag_groups(&page_tags, &groups)
            });
        }
    }

    if let Some(query) = criteria.query.as_deref().filter(|q| !q.is_empty()) {
        let query = query.to_lowercase();
        pages.retain(|page| matches_text(page, &query, culture));
    }

    pages
}

fn matches_text(page: &ContentNode, query: &str, culture: Option<&str>) -> bool {
    if page
        .text_value(PAGE_TITLE_ALIAS, culture)
        .is_some_and(|title| title.to_lowercase().contains(query))
    {
        return true;
    }
    if page
        .name(culture)
        .is_some_and(|name| name.to_lowercase().contains(query))
    {
        return true;
    }
    if page
        .text_value(SUB_TITLE_ALIAS, culture)
        .is_some_and(|sub| sub.to_lowercase().contains(query))
    {
        return true;
    }
    if page
        .text_value(BODY_TEXT_ALIAS, culture)
        .is_some_and(|body| text::strip_html(body).to_lowercase().contains(query))
    {
        return true;
    }
    blocks::node_blocks_contain(page, query, culture)
}

fn shape_item(
    page: &ContentNode,
    requested: Option<&str>,
    default_culture: &str,
) -> Option<SearchResultItem> {
    let culture = requested
        .map(str::to_string)
        .or_else(|| page.first_culture().map(str::to_string))
        .unwrap_or_else(|| default_culture.to_string());

    let Some(url) = page.url(&culture) else {
        warn!(page_id = page.id, culture = %culture, "page has no variant for culture, dropping item");
        return None;
    };

    let page_title = page
        .text_value(PAGE_TITLE_ALIAS, Some(&culture))
        .map(str::to_string);
    let name = match page_title.as_deref() {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => page.name(Some(&culture)).unwrap_or_default().to_string(),
    };
    let excerpt = page
        .text_value(BODY_TEXT_ALIAS, Some(&culture))
        .map(text::strip_html)
        .filter(|plain| !plain.is_empty())
        .map(|plain| text::truncate_text(&plain, text::EXCERPT_MAX_CHARS));
    let page_image_url = match page.value(PAGE_IMAGE_ALIAS, Some(&culture)) {
        Some(PropertyValue::Media(media)) => Some(media.url.clone()),
        _ => None,
    };

    Some(SearchResultItem {
        id: page.id,
        name,
        url: url.to_string(),
        content_type: page.content_type.clone(),
        page_title,
        sub_title: page
            .text_value(SUB_TITLE_ALIAS, Some(&culture))
            .map(str::to_string),
        excerpt,
        page_image_url,
        tags: tags::tags_for(page, Some(&culture)),
        update_date: page.update_date,
        create_date: page.create_date,
        culture,
        level: page.level,
        parent_id: page.parent_id,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::domain::content::node::CultureVariant;
    use crate::domain::content::value::Property;

    use super::*;

    struct FixtureCache {
        nodes: Vec<Arc<ContentNode>>,
        available: bool,
        fail_descendants: bool,
    }

    impl FixtureCache {
        fn new(nodes: Vec<ContentNode>) -> Self {
            Self {
                nodes: nodes.into_iter().map(Arc::new).collect(),
                available: true,
                fail_descendants: false,
            }
        }

        fn check(&self) -> anyhow::Result<()> {
            if self.available {
                Ok(())
            } else {
                Err(anyhow::Error::new(CacheUnavailable))
            }
        }

        fn culture_ok(node: &ContentNode, culture: Option<&str>) -> bool {
            culture.map(|code| node.has_culture(code)).unwrap_or(true)
        }
    }

    #[async_trait]
    impl ContentCache for FixtureCache {
        async fn by_id(&self, id: i64) -> anyhow::Result<Option<Arc<ContentNode>>> {
            self.check()?;
            Ok(self.nodes.iter().find(|n| n.id == id).cloned())
        }

        async fn by_key(&self, key: Uuid) -> anyhow::Result<Option<Arc<ContentNode>>> {
            self.check()?;
            Ok(self.nodes.iter().find(|n| n.key == key).cloned())
        }

        async fn children(
            &self,
            id: i64,
            culture: Option<&str>,
        ) -> anyhow::Result<Vec<Arc<ContentNode>>> {
            self.check()?;
            Ok(self
                .nodes
                .iter()
                .filter(|n| n.parent_id == Some(id) && Self::culture_ok(n, culture))
                .cloned()
                .collect())
        }

        async fn descendants(
            &self,
            id: i64,
            culture: Option<&str>,
        ) -> anyhow::Result<Vec<Arc<ContentNode>>> {
            self.check()?;
            if self.fail_descendants {
                anyhow::bail!("bulk enumeration not supported");
            }
            let mut out = Vec::new();
            let mut stack = vec![id];
            while let Some(current) = stack.pop() {
                for node in self.nodes.iter().filter(|n| n.parent_id == Some(current)) {
                    stack.push(node.id);
                    if Self::culture_ok(node, culture) {
                        out.push(node.clone());
                    }
                }
            }
            Ok(out)
        }
    }

    #[async_trait]
    impl NavigationQuery for FixtureCache {
        async fn root_keys(&self) -> anyhow::Result<Vec<Uuid>> {
            self.check()?;
            Ok(self
                .nodes
                .iter()
                .filter(|n| n.parent_id.is_none())
                .map(|n| n.key)
                .collect())
        }
    }

    fn text_prop(alias: &str, value: &str) -> Property {
        Property {
            alias: alias.into(),
            value: Some(PropertyValue::Text(value.into())),
            cultures: HashMap::new(),
        }
    }

    fn rich_prop(alias: &str, value: &str) -> Property {
        Property {
            alias: alias.into(),
            value: Some(PropertyValue::RichText(value.into())),
            cultures: HashMap::new(),
        }
    }

    fn tags_prop(tags: &[&str]) -> Property {
        Property {
            alias: "tags".into(),
            value: Some(PropertyValue::Strings(
                tags.iter().map(|t| t.to_string()).collect(),
            )),
            cultures: HashMap::new(),
        }
    }

    fn variant(culture: &str, name: &str, id: i64) -> CultureVariant {
        CultureVariant {
            culture: culture.into(),
            name: name.into(),
            url: format!("/{}/{}/", culture.to_lowercase(), id),
            visible: true,
        }
    }

    fn page(
        id: i64,
        parent: Option<i64>,
        content_type: &str,
        name: &str,
        day: u32,
        cultures: &[&str],
        properties: Vec<Property>,
    ) -> ContentNode {
        ContentNode {
            id,
            key: Uuid::from_u128(id as u128),
            content_type: content_type.into(),
            parent_id: parent,
            level: if parent.is_none() { 1 } else { 2 },
            visible: true,
            create_date: Utc.with_ymd_and_hms(2024, 4, day, 12, 0, 0).unwrap(),
            update_date: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
            cultures: cultures.iter().map(|c| variant(c, name, id)).collect(),
            properties,
        }
    }

    /// Six nodes: a home root, three pages matching `boots` + `outdoor`,
    /// one page with `boots` but no matching tag, one tagged section page
    /// without `boots` in its body.
    fn fixture() -> FixtureCache {
        FixtureCache::new(vec![
            page(1, None, "homePage", "Home", 1, &["en-US"], vec![]),
            page(
                2,
                Some(1),
                "contentPage",
                "Winter boots guide",
                5,
                &["en-US"],
                vec![
                    tags_prop(&["outdoor", "guide"]),
                    rich_prop("bodyText", "<p>The best winter <b>boots</b> for hiking</p>"),
                ],
            ),
            page(
                3,
                Some(1),
                "contentPage",
                "City sneakers",
                4,
                &["en-US"],
                vec![
                    tags_prop(&["city"]),
                    rich_prop("bodyText", "<p>Sneakers and boots in town</p>"),
                ],
            ),
            page(
                4,
                Some(1),
                "contentPage",
                "Trail boots sale",
                7,
                &["en-US", "da-DK"],
                vec![
                    tags_prop(&["outdoor", "sale"]),
                    rich_prop("bodyText", "<p>Rugged trail boots on sale</p>"),
                ],
            ),
            page(
                5,
                Some(1),
                "contentPage",
                "Outdoor",
                2,
                &["en-US"],
                vec![
                    tags_prop(&["outdoor"]),
                    rich_prop("bodyText", "<p>All about fresh air</p>"),
                ],
            ),
            page(
                6,
                Some(5),
                "contentPage",
                "Hiking boots care",
                6,
                &["en-US", "da-DK"],
                vec![
                    tags_prop(&["outdoor", "care"]),
                    rich_prop("bodyText", "<p>Caring for your hiking boots</p>"),
                ],
            ),
        ])
    }

    fn boots_criteria() -> SearchCriteria {
        SearchCriteria {
            query: Some("boots".into()),
            tag_groups: Some(r#"(("outdoor"))"#.into()),
            ..Default::default()
        }
    }

    fn search<'a>(cache: &'a FixtureCache) -> SearchPages<'a, FixtureCache, FixtureCache> {
        SearchPages {
            cache,
            navigation: cache,
            default_culture: "en-US",
        }
    }

    #[tokio::test]
    async fn query_and_tag_groups_narrow_to_three_pages() {
        let cache = fixture();
        let result = search(&cache).execute(&boots_criteria()).await.unwrap();
        assert_eq!(result.total, 3);
        let ids: Vec<i64> = result.items.iter().map(|item| item.id).collect();
        // createDate descending by default
        assert_eq!(ids, vec![4, 6, 2]);
        assert!(result.items.iter().all(|item| item.culture == "en-US"));
    }

    #[tokio::test]
    async fn shaped_items_carry_excerpt_url_and_tags() {
        let cache = fixture();
        let result = search(&cache).execute(&boots_criteria()).await.unwrap();
        let top = &result.items[0];
        assert_eq!(top.name, "Trail boots sale");
        assert_eq!(top.url, "/en-us/4/");
        assert_eq!(top.excerpt.as_deref(), Some("Rugged trail boots on sale"));
        assert_eq!(top.tags, vec!["outdoor", "sale"]);
        assert_eq!(top.parent_id, Some(1));
    }

    #[tokio::test]
    async fn pagination_windows_the_match_set() {
        let cache = fixture();
        for (skip, take, expected) in [(0, 2, 2), (1, 10, 2), (2, 10, 1), (5, 10, 0)] {
            let criteria = SearchCriteria {
                skip,
                take,
                ..boots_criteria()
            };
            let result = search(&cache).execute(&criteria).await.unwrap();
            assert_eq!(result.total, 3, "skip {skip} take {take}");
            assert_eq!(result.items.len(), expected, "skip {skip} take {take}");
        }
    }

    #[tokio::test]
    async fn window_bounds_are_rejected() {
        let cache = fixture();
        let bad_take = SearchCriteria { take: 0, ..Default::default() };
        assert!(matches!(
            search(&cache).execute(&bad_take).await,
            Err(SearchError::TakeOutOfRange)
        ));
        let big_take = SearchCriteria { take: 101, ..Default::default() };
        assert!(matches!(
            search(&cache).execute(&big_take).await,
            Err(SearchError::TakeOutOfRange)
        ));
        let bad_skip = SearchCriteria { skip: -1, ..Default::default() };
        assert!(matches!(
            search(&cache).execute(&bad_skip).await,
            Err(SearchError::NegativeSkip)
        ));
    }

    #[tokio::test]
    async fn unknown_start_node_is_reported() {
        let cache = fixture();
        let criteria = SearchCriteria {
            start_node_id: Some(999),
            ..Default::default()
        };
        assert!(matches!(
            search(&cache).execute(&criteria).await,
            Err(SearchError::StartNodeNotFound(999))
        ));
    }

    #[tokio::test]
    async fn empty_tree_reports_no_root_content() {
        let cache = FixtureCache::new(vec![]);
        assert!(matches!(
            search(&cache).execute(&SearchCriteria::default()).await,
            Err(SearchError::NoRootContent)
        ));
    }

    #[tokio::test]
    async fn missing_cache_is_a_distinct_error() {
        let mut cache = fixture();
        cache.available = false;
        assert!(matches!(
            search(&cache).execute(&SearchCriteria::default()).await,
            Err(SearchError::CacheUnavailable)
        ));
    }

    #[tokio::test]
    async fn exclude_node_removes_one_match() {
        let cache = fixture();
        let criteria = SearchCriteria {
            exclude_node: Some(6),
            ..boots_criteria()
        };
        let result = search(&cache).execute(&criteria).await.unwrap();
        assert_eq!(result.total, 2);
        let ids: Vec<i64> = result.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![4, 2]);
    }

    #[tokio::test]
    async fn include_children_false_searches_nothing() {
        let cache = fixture();
        let criteria = SearchCriteria {
            include_children: false,
            ..boots_criteria()
        };
        let result = search(&cache).execute(&criteria).await.unwrap();
        assert_eq!(result.total, 0);
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn start_node_itself_is_never_a_result() {
        let cache = fixture();
        let criteria = SearchCriteria {
            start_node_id: Some(2),
            ..boots_criteria()
        };
        let result = search(&cache).execute(&criteria).await.unwrap();
        assert_eq!(result.total, 0);
    }

    #[tokio::test]
    async fn culture_restricts_matches_and_shapes_items() {
        let cache = fixture();
        let criteria = SearchCriteria {
            lang: Some("da-DK".into()),
            ..boots_criteria()
        };
        let result = search(&cache).execute(&criteria).await.unwrap();
        let ids: Vec<i64> = result.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![4, 6]);
        assert!(result.items.iter().all(|item| item.culture == "da-DK"));
        assert!(result.items.iter().all(|item| item.url.starts_with("/da-dk/")));
    }

    #[tokio::test]
    async fn bulk_enumeration_failure_falls_back_to_child_walk() {
        let mut cache = fixture();
        cache.fail_descendants = true;
        let result = search(&cache).execute(&boots_criteria()).await.unwrap();
        assert_eq!(result.total, 3);
        let ids: Vec<i64> = result.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![4, 6, 2]);
    }

    #[tokio::test]
    async fn hidden_pages_are_skipped() {
        let mut nodes = vec![
            page(1, None, "homePage", "Home", 1, &["en-US"], vec![]),
            page(
                2,
                Some(1),
                "contentPage",
                "Visible boots",
                2,
                &["en-US"],
                vec![tags_prop(&["outdoor"]), rich_prop("bodyText", "boots")],
            ),
        ];
        let mut hidden = page(
            3,
            Some(1),
            "contentPage",
            "Hidden boots",
            3,
            &["en-US"],
            vec![tags_prop(&["outdoor"]), rich_prop("bodyText", "boots")],
        );
        hidden.visible = false;
        nodes.push(hidden);
        let cache = FixtureCache::new(nodes);
        let result = search(&cache).execute(&boots_criteria()).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].id, 2);
    }

    #[tokio::test]
    async fn tags_parameter_is_used_when_tag_groups_absent() {
        let cache = fixture();
        let criteria = SearchCriteria {
            query: Some("boots".into()),
            tags: Some("outdoor,care".into()),
            ..Default::default()
        };
        let result = search(&cache).execute(&criteria).await.unwrap();
        // comma list is a single OR group
        assert_eq!(result.total, 3);
    }

    #[tokio::test]
    async fn page_title_beats_name_in_shaped_items() {
        let mut nodes = vec![page(1, None, "homePage", "Home", 1, &["en-US"], vec![])];
        nodes.push(page(
            2,
            Some(1),
            "contentPage",
            "internal-node-name",
            2,
            &["en-US"],
            vec![
                text_prop("pageTitle", "Shown Title"),
                rich_prop("bodyText", "boots"),
                tags_prop(&["outdoor"]),
            ],
        ));
        let cache = FixtureCache::new(nodes);
        let result = search(&cache).execute(&boots_criteria()).await.unwrap();
        assert_eq!(result.items[0].name, "Shown Title");
        assert_eq!(result.items[0].page_title.as_deref(), Some("Shown Title"));
    }
}
