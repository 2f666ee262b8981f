//! Day expansion: a second model round-trip that turns one overview day
//! into a detailed study guide.

use tracing::{debug, info, warn};

use crate::error::{CurationError, ValidationError};
use crate::model::{DetailedDayPlan, PLAN_DAYS, Topic, day_label};
use crate::plan::parser::parse_detailed_day;
use crate::provider::GenerationProvider;

/// Check a caller-supplied day number against `1..=7`.
pub fn checked_day_number(day_number: i64) -> Result<u32, ValidationError> {
    match u32::try_from(day_number) {
        Ok(n) if (1..=PLAN_DAYS).contains(&n) => Ok(n),
        _ => Err(ValidationError::DayOutOfRange(day_number)),
    }
}

/// Build the instruction for expanding `day_topic` (day `day_number`).
///
/// The model is told to echo `day` and `topic` verbatim so the response is
/// self-describing, and to leave `resources` empty.
pub fn build_day_prompt(topic: &Topic, day_topic: &Topic, day_number: u32) -> String {
    let day = day_label(day_number);
    format!(
        r#"You are an expert learning designer.

A learner is following a {PLAN_DAYS}-day plan on "{topic}". Expand {day}, whose focus is "{day_topic}", into a detailed study guide.

Return a single valid JSON object with exactly this structure:
{{
  "day": "{day}",
  "topic": "{day_topic}",
  "detailed_description": "<two or three paragraphs explaining the focus of the day>",
  "learning_objectives": ["<objective>", "..."],
  "detailed_challenge": "<a hands-on challenge with clear acceptance criteria>",
  "step_by_step_guide": ["<step>", "..."],
  "key_concepts": ["<concept>", "..."],
  "estimated_time": "<time range, e.g. 2-3 hours>",
  "difficulty_level": "Beginner | Intermediate | Advanced",
  "prerequisites": ["<prerequisite>", "..."],
  "resources": [],
  "next_steps": "<one short paragraph on what to study next>"
}}

Copy "day" and "topic" exactly as given above. Leave "resources" as an empty list.
Only return valid JSON. Do not include explanations, markdown or text outside the JSON.
"#
    )
}

/// Ask the model to expand one day and validate the result.
///
/// Fails with [`ValidationError`] before any provider call when `topic` or
/// `day_topic` is blank or `day_number` is outside `1..=7`.
pub async fn generate_detailed_day(
    provider: &dyn GenerationProvider,
    topic: &str,
    day_topic: &str,
    day_number: u32,
) -> Result<DetailedDayPlan, CurationError> {
    let topic = Topic::new(topic)?;
    let day_topic = Topic::named(day_topic, "day_topic")?;
    let day_number = checked_day_number(i64::from(day_number))?;

    info!(
        topic = %topic,
        day_topic = %day_topic,
        day_number,
        provider = provider.name(),
        "expanding day"
    );

    let prompt = build_day_prompt(&topic, &day_topic, day_number);
    let raw = provider.complete(&prompt).await?;

    let mut detailed = parse_detailed_day(&raw, day_number).inspect_err(|e| {
        warn!(topic = %topic, day_number, error = %e, "model output rejected");
    })?;

    // The plan is keyed by the requested day topic, not the model's echo of it.
    if detailed.topic != day_topic.as_str() {
        debug!(echoed = %detailed.topic, requested = %day_topic, "model altered day topic");
        detailed.topic = day_topic.as_str().to_owned();
    }
    if !detailed.resources.is_empty() {
        debug!(count = detailed.resources.len(), "discarding model-invented resources");
        detailed.resources.clear();
    }

    Ok(detailed)
}
