//! Resource resolution: search queries in, categorized [`Resource`] sets out.
//!
//! Two tiers are offered. [`ResourceResolver::limited_overview`] picks at
//! most three resources per overview day with unique URLs, and
//! [`ResourceResolver::comprehensive`] gathers up to eight for a detailed
//! day. URL categorization lives in [`classify`].

pub mod classify;
mod search;

use async_trait::async_trait;

use crate::model::{Resource, Topic};

pub use classify::{URL_RULES, UrlClass, UrlRule, classify_url, has_class, is_video};
pub use search::ResourceResolver;

/// The seam the curator depends on.
///
/// [`ResourceResolver`] never fails, but other implementations may; the
/// curator applies its per-day fallback when they do.
#[async_trait]
pub trait ResolveResources: Send + Sync {
    /// Up to three resources for one overview day.
    async fn limited_overview(&self, topic: &Topic, day_topic: &str)
    -> anyhow::Result<Vec<Resource>>;

    /// Up to eight resources for a detailed day.
    async fn comprehensive(&self, topic: &Topic, day_topic: &str)
    -> anyhow::Result<Vec<Resource>>;
}

// Compile-time assertion that ResolveResources is object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn ResolveResources) {}
};

#[async_trait]
impl ResolveResources for ResourceResolver {
    async fn limited_overview(
        &self,
        topic: &Topic,
        day_topic: &str,
    ) -> anyhow::Result<Vec<Resource>> {
        Ok(ResourceResolver::limited_overview(self, topic, day_topic).await)
    }

    async fn comprehensive(&self, topic: &Topic, day_topic: &str) -> anyhow::Result<Vec<Resource>> {
        Ok(ResourceResolver::comprehensive(self, topic, day_topic).await)
    }
}
