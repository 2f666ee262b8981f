//! Search-backed resource resolution.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::classify::{UrlClass, documentation_kind, has_class, is_video};
use crate::model::{DETAILED_RESOURCE_CAP, OVERVIEW_RESOURCE_CAP, Resource, ResourceKind, Topic};
use crate::provider::{ProviderError, SearchHit, SearchProvider};

const VIDEO_SUFFIX: &str = "tutorial video";
const GUIDE_SUFFIX: &str = "guide tutorial";
const DOCS_SUFFIX: &str = "documentation official";
const BLOG_SUFFIX: &str = "blog post tutorial";

/// Build `"{topic} {day_topic} {suffix}"`, or the bare pair when `suffix`
/// is empty.
fn scoped_query(topic: &Topic, day_topic: &str, suffix: &str) -> String {
    let base = format!("{topic} {}", day_topic.trim());
    if suffix.is_empty() {
        base.trim_end().to_owned()
    } else {
        format!("{} {suffix}", base.trim_end())
    }
}

fn to_resource(hit: SearchHit) -> Resource {
    Resource {
        kind: ResourceKind::Web,
        title: hit.title,
        url: hit.url,
        snippet: hit.snippet,
    }
}

/// Turns topic strings into categorized resource sets via a
/// [`SearchProvider`].
///
/// Every method degrades to an empty result when the provider is
/// unconfigured or a call fails; nothing here returns an error.
#[derive(Clone)]
pub struct ResourceResolver {
    provider: Arc<dyn SearchProvider>,
}

impl std::fmt::Debug for ResourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceResolver")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl ResourceResolver {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Run one query and return at most `limit` hits tagged
    /// [`ResourceKind::Web`], in provider order.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<Resource> {
        match self.provider.query(query, limit).await {
            Ok(hits) => {
                debug!(query, hits = hits.len(), "search completed");
                hits.into_iter().take(limit).map(to_resource).collect()
            }
            Err(ProviderError::Unconfigured(name)) => {
                debug!(query, provider = name, "search provider unconfigured, no results");
                Vec::new()
            }
            Err(e) => {
                warn!(query, error = %e, "search failed, continuing without results");
                Vec::new()
            }
        }
    }

    /// Up to eight resources for a detailed day: two video hits, three
    /// guides, two documentation hits, concatenated in that order.
    ///
    /// Hits are not deduplicated across the three queries.
    pub async fn comprehensive(&self, topic: &Topic, day_topic: &str) -> Vec<Resource> {
        let mut all = Vec::with_capacity(DETAILED_RESOURCE_CAP);

        let videos = self
            .search(&scoped_query(topic, day_topic, VIDEO_SUFFIX), 2)
            .await;
        all.extend(
            videos
                .into_iter()
                .filter(|r| is_video(&r.url))
                .map(|r| r.tagged(ResourceKind::YouTube)),
        );

        let guides = self
            .search(&scoped_query(topic, day_topic, GUIDE_SUFFIX), 3)
            .await;
        all.extend(
            guides
                .into_iter()
                .filter(|r| !is_video(&r.url))
                .map(|r| r.tagged(ResourceKind::Article)),
        );

        let docs = self
            .search(&scoped_query(topic, day_topic, DOCS_SUFFIX), 2)
            .await;
        all.extend(docs.into_iter().map(|r| {
            let kind = documentation_kind(&r.url);
            r.tagged(kind)
        }));

        all.truncate(DETAILED_RESOURCE_CAP);
        all
    }

    /// At most three resources for an overview day, with unique URLs:
    /// one video, one article, one blog post, then generic backfill.
    pub async fn limited_overview(&self, topic: &Topic, day_topic: &str) -> Vec<Resource> {
        let mut selected = Selection::default();

        let videos = self
            .search(&scoped_query(topic, day_topic, VIDEO_SUFFIX), 3)
            .await;
        if let Some(video) = videos.into_iter().find(|r| is_video(&r.url)) {
            selected.push(video.tagged(ResourceKind::YouTube));
        }

        let guides = self
            .search(&scoped_query(topic, day_topic, GUIDE_SUFFIX), 5)
            .await;
        if let Some(article) = guides.into_iter().find(|r| {
            !is_video(&r.url)
                && has_class(&r.url, UrlClass::ArticleSource)
                && !selected.contains(&r.url)
        }) {
            selected.push(article.tagged(ResourceKind::Article));
        }

        let blogs = self
            .search(&scoped_query(topic, day_topic, BLOG_SUFFIX), 5)
            .await;
        if let Some(blog) = blogs
            .into_iter()
            .find(|r| !is_video(&r.url) && !selected.contains(&r.url))
        {
            selected.push(blog.tagged(ResourceKind::Blog));
        }

        if selected.len() < OVERVIEW_RESOURCE_CAP {
            let general = self.search(&scoped_query(topic, day_topic, ""), 5).await;
            for hit in general {
                if selected.len() >= OVERVIEW_RESOURCE_CAP {
                    break;
                }
                if !selected.contains(&hit.url) {
                    selected.push(hit.tagged(ResourceKind::Resource));
                }
            }
        }

        let mut resources = selected.into_inner();
        resources.truncate(OVERVIEW_RESOURCE_CAP);
        resources
    }

    /// Video tutorials for a whole topic (`"{topic} tutorial youtube"`).
    pub async fn videos(&self, topic: &Topic, limit: usize) -> Vec<Resource> {
        self.search(&format!("{topic} tutorial youtube"), limit).await
    }

    /// Articles and blog posts for a whole topic.
    pub async fn articles(&self, topic: &Topic, limit: usize) -> Vec<Resource> {
        self.search(&format!("{topic} guide article blog tutorial"), limit)
            .await
    }
}

/// Ordered resources plus the set of URLs already taken.
#[derive(Default)]
struct Selection {
    resources: Vec<Resource>,
    urls: HashSet<String>,
}

impl Selection {
    fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    fn push(&mut self, resource: Resource) {
        if self.urls.insert(resource.url.clone()) {
            self.resources.push(resource);
        }
    }

    fn len(&self) -> usize {
        self.resources.len()
    }

    fn into_inner(self) -> Vec<Resource> {
        self.resources
    }
}
