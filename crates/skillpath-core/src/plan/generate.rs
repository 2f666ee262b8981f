//! Plan generation: prompt construction and the single model round-trip
//! that produces a 7-day overview.

use tracing::{info, warn};

use crate::error::CurationError;
use crate::model::{PLAN_DAYS, Plan, Topic};
use crate::plan::parser::parse_plan;
use crate::provider::GenerationProvider;

// ---------------------------------------------------------------------------
// Prompt construction
// ---------------------------------------------------------------------------

/// JSON shape the model is asked to return.
const PLAN_SCHEMA: &str = r#"[
  {
    "day": "Day 1",
    "topic": "<subtopic title>",
    "mini_challenge": "<short hands-on task>",
    "reasoning": "<why this topic is on this day>",
    "resources": [
      { "type": "YouTube", "title": "<video title>", "url": "<link>" },
      { "type": "Blog", "title": "<blog title>", "url": "<link>" },
      { "type": "Article", "title": "<article title>", "url": "<link>" }
    ]
  },
  ...
]"#;

/// Build the instruction that asks for a 7-day plan on `topic`.
pub fn build_plan_prompt(topic: &Topic) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str("You are an expert learning designer.\n\n");
    prompt.push_str(&format!(
        "Generate a structured **{PLAN_DAYS}-day learning plan** for the topic: \"{topic}\".\n\n"
    ));
    prompt.push_str(&format!(
        "Return exactly {PLAN_DAYS} entries, labeled \"Day 1\" through \"Day {PLAN_DAYS}\" in order, \
         as a valid JSON array with this structure:\n"
    ));
    prompt.push_str(PLAN_SCHEMA);
    prompt.push_str("\n\n");
    prompt.push_str(
        "Every entry must include the fields day, topic, mini_challenge, reasoning and resources.\n",
    );
    prompt.push_str(
        "Only return valid JSON. Do not include explanations, markdown or text outside the JSON.\n",
    );

    prompt
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Ask the model for a plan and validate what comes back.
///
/// One provider call is made. Errors are returned as-is: provider failures
/// as [`CurationError::Generation`], a missing array as
/// [`CurationError::Extraction`], and a malformed or mis-shaped array as
/// [`CurationError::Validation`].
pub async fn generate_plan(
    provider: &dyn GenerationProvider,
    topic: &Topic,
) -> Result<Plan, CurationError> {
    info!(topic = %topic, provider = provider.name(), "generating learning plan");

    let prompt = build_plan_prompt(topic);
    let raw = provider.complete(&prompt).await?;

    parse_plan(&raw).inspect_err(|e| {
        warn!(topic = %topic, error = %e, "model output rejected");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_topic_and_fields() {
        let topic = Topic::new("Python for Data Analysis").unwrap();
        let prompt = build_plan_prompt(&topic);
        assert!(prompt.contains("\"Python for Data Analysis\""));
        assert!(prompt.contains("7-day learning plan"));
        for field in ["day", "topic", "mini_challenge", "reasoning", "resources"] {
            assert!(prompt.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn prompt_demands_json_only() {
        let prompt = build_plan_prompt(&Topic::new("Rust").unwrap());
        assert!(prompt.contains("Only return valid JSON"));
        assert!(prompt.contains("\"Day 1\" through \"Day 7\""));
    }
}
