//! Registry of published aggregate views.
//!
//! Views are immutable once built, so the registry only ever replaces
//! whole `Arc`s: readers that resolved a view before a swap keep serving
//! from it until they drop their reference. A reload builds the
//! replacement completely before touching the registry, so a failed
//! rebuild leaves the previous view published.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use stitch_common::{StitchError, StitchResult};

use crate::child::ChildDataset;
use crate::config::AggregateConfig;
use crate::view::AggregateView;

/// A view together with its publication metadata.
#[derive(Debug)]
pub struct PublishedView {
    /// Unique id of this build (changes on every publish/reload).
    pub build_id: Uuid,
    /// When this build was swapped in.
    pub published_at: DateTime<Utc>,
    /// The view itself.
    pub view: Arc<AggregateView>,
}

/// Lookup table of live aggregate views, keyed by dataset id.
pub struct ViewRegistry {
    views: RwLock<HashMap<String, Arc<PublishedView>>>,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            views: RwLock::new(HashMap::new()),
        }
    }

    /// Publish a view, replacing any previous build with the same id.
    ///
    /// Returns the build id assigned to this publication.
    pub async fn publish(&self, view: AggregateView) -> Uuid {
        let build_id = Uuid::new_v4();
        let id = view.id().to_string();
        let published = Arc::new(PublishedView {
            build_id,
            published_at: Utc::now(),
            view: Arc::new(view),
        });

        let previous = self.views.write().await.insert(id.clone(), published);

        tracing::info!(
            aggregate = %id,
            build = %build_id,
            replaced = previous.is_some(),
            "published aggregate view"
        );
        build_id
    }

    /// Look up a published view.
    pub async fn get(&self, id: &str) -> Option<Arc<PublishedView>> {
        self.views.read().await.get(id).cloned()
    }

    /// Look up a view, erroring if it is not published.
    pub async fn require(&self, id: &str) -> StitchResult<Arc<PublishedView>> {
        self.get(id)
            .await
            .ok_or_else(|| StitchError::NotFound(id.to_string()))
    }

    /// Check whether a view is published under the given id.
    pub async fn contains(&self, id: &str) -> bool {
        self.views.read().await.contains_key(id)
    }

    /// Remove a view. Returns true if one was published.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.views.write().await.remove(id);
        if removed.is_some() {
            tracing::info!(aggregate = %id, "removed aggregate view");
        }
        removed.is_some()
    }

    /// Ids of all published views, sorted.
    pub async fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.views.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of published views.
    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }

    /// Check if the registry has no views.
    pub async fn is_empty(&self) -> bool {
        self.views.read().await.is_empty()
    }

    /// Rebuild a view from scratch and swap it in.
    ///
    /// This is the only update path: any change to a child's axis requires
    /// a full rebuild. The new view is built entirely outside the lock; on
    /// failure the registry is untouched and the error propagates.
    pub async fn reload(
        &self,
        id: &str,
        children: Vec<Arc<dyn ChildDataset>>,
        config: &AggregateConfig,
    ) -> StitchResult<Uuid> {
        let view = AggregateView::build(id, children, config).await?;
        tracing::info!(aggregate = %id, "rebuilt aggregate view for reload");
        Ok(self.publish(view).await)
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}
