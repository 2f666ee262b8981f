//! Curation orchestrator: composes plan generation, day expansion and
//! resource resolution into the two public entry points.
//!
//! Resource lookup never fails a request. For the overview, each day is
//! resolved independently; a day whose lookup fails keeps the resources
//! the model proposed (deduplicated, at most three) and every other day is
//! unaffected. For a detailed day, a failed lookup yields no resources.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::{CurationConfig, GeminiConfig, SerperConfig};
use crate::error::CurationError;
use crate::model::{
    DETAILED_RESOURCE_CAP, DetailedDayPlan, OVERVIEW_RESOURCE_CAP, Plan, Resource, Topic,
    dedup_by_url,
};
use crate::plan::{generate_detailed_day, generate_plan};
use crate::provider::{GeminiClient, GenerationProvider, SerperClient};
use crate::resolver::{ResolveResources, ResourceResolver};

/// Builds overview plans and detailed days.
///
/// Holds no per-request state; one instance can serve concurrent requests.
#[derive(Clone)]
pub struct Curator {
    generator: Arc<dyn GenerationProvider>,
    resolver: Arc<dyn ResolveResources>,
    config: CurationConfig,
}

impl std::fmt::Debug for Curator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Curator")
            .field("generator", &self.generator.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Curator {
    pub fn new(
        generator: Arc<dyn GenerationProvider>,
        resolver: Arc<dyn ResolveResources>,
        config: CurationConfig,
    ) -> Self {
        Self {
            generator,
            resolver,
            config,
        }
    }

    /// Wire the Gemini and Serper adapters together.
    pub fn from_configs(
        gemini: GeminiConfig,
        serper: SerperConfig,
        config: CurationConfig,
    ) -> Self {
        let generator = Arc::new(GeminiClient::new(gemini));
        let resolver = Arc::new(ResourceResolver::new(Arc::new(SerperClient::new(serper))));
        Self::new(generator, resolver, config)
    }

    pub fn config(&self) -> &CurationConfig {
        &self.config
    }

    /// Generate a 7-day plan for `topic` and replace every day's resources
    /// with at most three searched ones.
    ///
    /// Only generation and validation errors propagate.
    pub async fn build_overview_plan(&self, topic: &str) -> Result<Plan, CurationError> {
        let topic = Topic::new(topic)?;
        let mut plan = generate_plan(self.generator.as_ref(), &topic).await?;

        let limit = self.config.max_concurrent_days.max(1);
        let semaphore = Arc::new(Semaphore::new(limit));
        info!(topic = %topic, max_concurrent_days = limit, "resolving overview resources");

        // Dropping the set aborts every day still in flight.
        let mut set = JoinSet::new();
        for (idx, day) in plan.days().iter().enumerate() {
            let resolver = Arc::clone(&self.resolver);
            let semaphore = Arc::clone(&semaphore);
            let topic = topic.clone();
            let day_topic = day.topic.clone();

            set.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => resolver.limited_overview(&topic, &day_topic).await,
                    Err(e) => Err(e.into()),
                };
                (idx, outcome)
            });
        }

        let mut outcomes: Vec<Option<anyhow::Result<Vec<Resource>>>> =
            (0..plan.days().len()).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((idx, outcome)) => outcomes[idx] = Some(outcome),
                Err(join_err) => warn!(error = %join_err, "resource task aborted"),
            }
        }

        for (day, outcome) in plan.days_mut().iter_mut().zip(outcomes) {
            let outcome =
                outcome.unwrap_or_else(|| Err(anyhow::anyhow!("resource task aborted")));

            day.resources = match outcome {
                Ok(mut resources) => {
                    resources.truncate(OVERVIEW_RESOURCE_CAP);
                    debug!(day = %day.day, count = resources.len(), "resources resolved");
                    resources
                }
                Err(e) => {
                    warn!(
                        day = %day.day,
                        error = %e,
                        "resource lookup failed, keeping generated resources"
                    );
                    fallback_resources(std::mem::take(&mut day.resources))
                }
            };
        }

        Ok(plan)
    }

    /// Expand one day of the plan and attach up to eight searched
    /// resources.
    ///
    /// Arguments are validated before any provider call.
    pub async fn build_detailed_plan(
        &self,
        topic: &str,
        day_topic: &str,
        day_number: u32,
    ) -> Result<DetailedDayPlan, CurationError> {
        let mut detailed =
            generate_detailed_day(self.generator.as_ref(), topic, day_topic, day_number).await?;

        // Both already validated by generate_detailed_day.
        let topic = Topic::new(topic)?;
        detailed.resources = match self
            .resolver
            .comprehensive(&topic, &detailed.topic)
            .await
        {
            Ok(mut resources) => {
                resources.truncate(DETAILED_RESOURCE_CAP);
                resources
            }
            Err(e) => {
                warn!(
                    topic = %topic,
                    day_number,
                    error = %e,
                    "resource lookup failed, returning day without resources"
                );
                Vec::new()
            }
        };

        info!(
            topic = %topic,
            day_number,
            resources = detailed.resources.len(),
            "detailed day ready"
        );
        Ok(detailed)
    }
}

/// Resources kept for a day whose lookup failed.
fn fallback_resources(generated: Vec<Resource>) -> Vec<Resource> {
    let mut resources = dedup_by_url(generated);
    resources.truncate(OVERVIEW_RESOURCE_CAP);
    resources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceKind;

    #[test]
    fn fallback_dedups_then_caps() {
        let generated = vec![
            Resource::new(ResourceKind::YouTube, "a", "https://a"),
            Resource::new(ResourceKind::Blog, "a again", "https://a"),
            Resource::new(ResourceKind::Article, "b", "https://b"),
            Resource::new(ResourceKind::Article, "c", "https://c"),
            Resource::new(ResourceKind::Article, "d", "https://d"),
        ];
        let kept = fallback_resources(generated);
        let urls: Vec<_> = kept.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, ["https://a", "https://b", "https://c"]);
        assert_eq!(kept[0].kind, ResourceKind::YouTube);
    }

    #[test]
    fn fallback_of_nothing_is_nothing() {
        assert!(fallback_resources(Vec::new()).is_empty());
    }
}
