//! Shared test utilities for skillpath integration tests.
//!
//! Provides in-memory stand-ins for both providers and for the resolver
//! seam, plus canned model payloads. Every fake records what it was asked
//! so tests can assert on prompts, queries and call counts.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use skillpath_core::model::day_label;
use skillpath_core::{
    GenerationProvider, ProviderError, ResolveResources, Resource, ResourceKind, SearchHit,
    SearchProvider, Topic,
};

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

enum Script {
    Reply(String),
    Fail(String),
    Unconfigured,
}

/// A [`GenerationProvider`] that answers every prompt the same way.
pub struct ScriptedGenerator {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Reply with `text` to every prompt.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(text.into()))
    }

    /// Fail every call with an invalid-response error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(message.into()))
    }

    /// Behave like a provider with no API key.
    pub fn unconfigured() -> Self {
        Self::with_script(Script::Unconfigured)
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationProvider for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail(message) => Err(ProviderError::InvalidResponse {
                provider: "scripted",
                message: message.clone(),
            }),
            Script::Unconfigured => Err(ProviderError::Unconfigured("scripted")),
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A [`SearchProvider`] backed by an exact-match query table.
///
/// Unknown queries return no hits. Queries registered with
/// [`FakeSearch::failing_on`] return an error.
#[derive(Default)]
pub struct FakeSearch {
    results: HashMap<String, Vec<SearchHit>>,
    failing: HashSet<String>,
    unconfigured: bool,
    queries: Mutex<Vec<(String, usize)>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every query fails with [`ProviderError::Unconfigured`].
    pub fn unconfigured() -> Self {
        Self {
            unconfigured: true,
            ..Self::default()
        }
    }

    /// Answer `query` with `(title, url)` hits, in order.
    pub fn with(mut self, query: &str, hits: &[(&str, &str)]) -> Self {
        let hits = hits
            .iter()
            .map(|(title, url)| SearchHit::new(*title, *url))
            .collect();
        self.results.insert(query.to_string(), hits);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    /// `(query, count)` pairs received so far, in order.
    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_terms(&self) -> Vec<String> {
        self.queries().into_iter().map(|(q, _)| q).collect()
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    fn name(&self) -> &str {
        "fake"
    }

    async fn query(&self, term: &str, count: usize) -> Result<Vec<SearchHit>, ProviderError> {
        self.queries.lock().unwrap().push((term.to_string(), count));
        if self.unconfigured {
            return Err(ProviderError::Unconfigured("fake"));
        }
        if self.failing.contains(term) {
            return Err(ProviderError::Status {
                provider: "fake",
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.results.get(term).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// A [`ResolveResources`] that returns one deterministic resource per day
/// topic and fails for selected day topics.
///
/// Tracks the peak number of overlapping calls so tests can check the
/// curator's concurrency bound.
#[derive(Default)]
pub struct FakeResolver {
    failing: HashSet<String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(mut self, day_topic: &str) -> Self {
        self.failing.insert(day_topic.to_string());
        self
    }

    /// Hold every call open for `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URL this resolver returns for `day_topic`.
    pub fn url_for(day_topic: &str) -> String {
        format!(
            "https://resolved.example/{}",
            day_topic.to_lowercase().replace(' ', "-")
        )
    }

    /// Highest number of calls observed running at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Day topics received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn resolve(&self, day_topic: &str, kind: ResourceKind) -> anyhow::Result<Vec<Resource>> {
        self.calls.lock().unwrap().push(day_topic.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(day_topic) {
            anyhow::bail!("search backend unavailable for {day_topic:?}");
        }
        Ok(vec![Resource::new(
            kind,
            format!("{day_topic} walkthrough"),
            Self::url_for(day_topic),
        )])
    }
}

#[async_trait]
impl ResolveResources for FakeResolver {
    async fn limited_overview(
        &self,
        _topic: &Topic,
        day_topic: &str,
    ) -> anyhow::Result<Vec<Resource>> {
        self.resolve(day_topic, ResourceKind::YouTube).await
    }

    async fn comprehensive(&self, _topic: &Topic, day_topic: &str) -> anyhow::Result<Vec<Resource>> {
        self.resolve(day_topic, ResourceKind::Documentation).await
    }
}

/// A [`ResolveResources`] whose every call fails.
pub struct FailingResolver;

#[async_trait]
impl ResolveResources for FailingResolver {
    async fn limited_overview(
        &self,
        _topic: &Topic,
        _day_topic: &str,
    ) -> anyhow::Result<Vec<Resource>> {
        anyhow::bail!("resolver offline")
    }

    async fn comprehensive(&self, _topic: &Topic, _day_topic: &str) -> anyhow::Result<Vec<Resource>> {
        anyhow::bail!("resolver offline")
    }
}

// ---------------------------------------------------------------------------
// Canned payloads
// ---------------------------------------------------------------------------

/// Day topic used by [`sample_plan_json`] for day `n`.
pub fn sample_day_topic(topic: &str, n: u32) -> String {
    format!("{topic} part {n}")
}

/// A valid 7-day plan for `topic`, as a model would return it.
///
/// Each day carries four unique generated resources plus one duplicate
/// URL, so a fallback to generated resources is visible after dedup and
/// capping.
pub fn sample_plan_json(topic: &str) -> String {
    let days: Vec<_> = (1..=7)
        .map(|n| {
            json!({
                "day": day_label(n),
                "topic": sample_day_topic(topic, n),
                "mini_challenge": format!("Complete exercise {n}"),
                "reasoning": format!("Day {n} builds on the previous day"),
                "resources": [
                    { "type": "YouTube", "title": "Video", "url": format!("https://youtube.com/watch?v=day{n}") },
                    { "type": "Blog", "title": "Same video", "url": format!("https://youtube.com/watch?v=day{n}") },
                    { "type": "Article", "title": "Article", "url": format!("https://generated.example/day{n}/article") },
                    { "type": "Article", "title": "Extra", "url": format!("https://generated.example/day{n}/extra") },
                    { "type": "Documentation", "title": "Docs", "url": format!("https://generated.example/day{n}/docs") }
                ]
            })
        })
        .collect();
    serde_json::Value::Array(days).to_string()
}

/// A valid detailed day for `day_number` focused on `day_topic`.
pub fn sample_detailed_json(day_number: u32, day_topic: &str) -> String {
    json!({
        "day": day_label(day_number),
        "topic": day_topic,
        "detailed_description": "A focused session.",
        "learning_objectives": ["Understand the basics", "Apply them"],
        "detailed_challenge": "Build a small example.",
        "step_by_step_guide": ["Read", "Practice", "Review"],
        "key_concepts": ["concept"],
        "estimated_time": "2-3 hours",
        "difficulty_level": "Beginner",
        "prerequisites": [],
        "resources": [
            { "type": "Blog", "title": "Invented", "url": "https://invented.example" }
        ],
        "next_steps": "Move on to the next day."
    })
    .to_string()
}
