//! `skillpath search`: topic-wide video or article lookup, without a plan.

use anyhow::Result;
use clap::ValueEnum;

use skillpath_core::{Resource, ResourceResolver, Topic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchKind {
    Videos,
    Articles,
}

pub async fn run_search(
    resolver: &ResourceResolver,
    topic: &str,
    kind: SearchKind,
    limit: usize,
) -> Result<()> {
    let topic = Topic::new(topic)?;
    let results = match kind {
        SearchKind::Videos => resolver.videos(&topic, limit).await,
        SearchKind::Articles => resolver.articles(&topic, limit).await,
    };

    if results.is_empty() {
        println!("No results. Is SERPER_API_KEY set?");
        return Ok(());
    }
    print!("{}", render_results(&results));
    Ok(())
}

fn render_results(results: &[Resource]) -> String {
    let mut out = String::new();
    for (i, res) in results.iter().enumerate() {
        out.push_str(&format!("{}. {}\n   {}\n", i + 1, res.title, res.url));
        if let Some(snippet) = res.snippet.as_deref().filter(|s| !s.trim().is_empty()) {
            out.push_str(&format!("   {}\n", snippet.trim()));
        }
    }
    out
}
