use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::domain::content::node::ContentNode;
use crate::domain::locale::{DictionaryItem, Language, SiteDomain};

/// On-disk projection of the published site: the content tree plus the
/// locale data the API serves. Exported by the CMS as one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSnapshot {
    pub nodes: Vec<ContentNode>,
    pub languages: Vec<Language>,
    pub domains: Vec<SiteDomain>,
    pub dictionary: Vec<DictionaryItem>,
}

/// A loaded snapshot, indexed for id/key lookup and tree traversal.
#[derive(Debug)]
pub struct SnapshotIndex {
    nodes: Vec<Arc<ContentNode>>,
    by_id: HashMap<i64, usize>,
    by_key: HashMap<Uuid, usize>,
    children: HashMap<i64, Vec<usize>>,
    roots: Vec<usize>,
    languages: Vec<Language>,
    domains: Vec<SiteDomain>,
    dictionary: Vec<DictionaryItem>,
}

impl SnapshotIndex {
    pub fn build(snapshot: SiteSnapshot) -> Self {
        let mut plain = snapshot.nodes;
        derive_levels(&mut plain);

        let nodes: Vec<Arc<ContentNode>> = plain.into_iter().map(Arc::new).collect();
        let mut by_id = HashMap::new();
        let mut by_key = HashMap::new();
        let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (index, node) in nodes.iter().enumerate() {
            by_id.insert(node.id, index);
            by_key.insert(node.key, index);
            match node.parent_id {
                Some(parent) => children.entry(parent).or_default().push(index),
                None => roots.push(index),
            }
        }

        Self {
            nodes,
            by_id,
            by_key,
            children,
            roots,
            languages: snapshot.languages,
            domains: snapshot.domains,
            dictionary: snapshot.dictionary,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_by_id(&self, id: i64) -> Option<Arc<ContentNode>> {
        self.by_id.get(&id).map(|&index| self.nodes[index].clone())
    }

    pub fn node_by_key(&self, key: Uuid) -> Option<Arc<ContentNode>> {
        self.by_key.get(&key).map(|&index| self.nodes[index].clone())
    }

    /// Root node keys in snapshot order.
    pub fn root_keys(&self) -> Vec<Uuid> {
        self.roots.iter().map(|&index| self.nodes[index].key).collect()
    }

    /// Direct children in snapshot order, pruned to `culture` when given.
    pub fn children_of(&self, id: i64, culture: Option<&str>) -> Vec<Arc<ContentNode>> {
        self.children
            .get(&id)
            .map(|indexes| {
                indexes
                    .iter()
                    .map(|&index| &self.nodes[index])
                    .filter(|node| culture_ok(node, culture))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every node below `id` in document order. The culture filters which
    /// nodes come back but never stops the walk, so pages under ancestors
    /// unpublished in that culture are still found.
    pub fn descendants_of(&self, id: i64, culture: Option<&str>) -> Vec<Arc<ContentNode>> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        if let Some(indexes) = self.children.get(&id) {
            stack.extend(indexes.iter().rev());
        }
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if culture_ok(node, culture) {
                out.push(node.clone());
            }
            if let Some(indexes) = self.children.get(&node.id) {
                stack.extend(indexes.iter().rev());
            }
        }
        out
    }

    pub fn languages(&self) -> Vec<Language> {
        self.languages.clone()
    }

    pub fn domains(&self) -> Vec<SiteDomain> {
        self.domains.clone()
    }

    pub fn dictionary_items(&self) -> Vec<DictionaryItem> {
        self.dictionary.clone()
    }
}

fn culture_ok(node: &ContentNode, culture: Option<&str>) -> bool {
    culture.map(|code| node.has_culture(code)).unwrap_or(true)
}

fn derive_levels(nodes: &mut [ContentNode]) {
    let parents: HashMap<i64, Option<i64>> = nodes.iter().map(|n| (n.id, n.parent_id)).collect();
    let max_hops = nodes.len();
    for node in nodes.iter_mut() {
        let mut level = 1;
        let mut hops = 0;
        let mut current = node.parent_id;
        while let Some(parent) = current {
            let Some(grandparent) = parents.get(&parent) else {
                break;
            };
            level += 1;
            hops += 1;
            // parent cycles only happen in malformed exports; cap the walk
            if hops > max_hops {
                break;
            }
            current = *grandparent;
        }
        node.level = level;
    }
}

struct Loaded {
    index: Arc<SnapshotIndex>,
    modified: Option<SystemTime>,
}

/// Process-wide handle to the currently loaded snapshot. Readers grab an
/// `Arc` and keep one consistent view for a whole request; reloads swap
/// the index atomically.
pub struct SnapshotStore {
    path: PathBuf,
    inner: RwLock<Option<Loaded>>,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> anyhow::Result<()> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading content snapshot {}", self.path.display()))?;
        let snapshot: SiteSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("parsing content snapshot {}", self.path.display()))?;
        let modified = tokio::fs::metadata(&self.path)
            .await
            .ok()
            .and_then(|meta| meta.modified().ok());

        let index = Arc::new(SnapshotIndex::build(snapshot));
        info!(path = %self.path.display(), nodes = index.node_count(), "content snapshot loaded");

        let mut guard = self.inner.write().await;
        *guard = Some(Loaded { index, modified });
        Ok(())
    }

    pub async fn current(&self) -> Option<Arc<SnapshotIndex>> {
        self.inner.read().await.as_ref().map(|loaded| loaded.index.clone())
    }

    /// Reload when the file's mtime moved since the last load. Returns
    /// whether a reload happened.
    pub async fn reload_if_changed(&self) -> anyhow::Result<bool> {
        let modified = tokio::fs::metadata(&self.path)
            .await
            .with_context(|| format!("checking content snapshot {}", self.path.display()))?
            .modified()
            .ok();
        {
            let guard = self.inner.read().await;
            if let Some(loaded) = guard.as_ref() {
                if loaded.modified.is_some() && loaded.modified == modified {
                    return Ok(false);
                }
            }
        }
        self.load().await?;
        Ok(true)
    }
}
