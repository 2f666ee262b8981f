//! CLI handlers for `skillpath plan` and `skillpath day`.
//!
//! Both print Markdown by default, or the raw JSON payload with `--json`.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use skillpath_core::plan::checked_day_number;
use skillpath_core::{Curator, DetailedDayPlan, Plan, Resource};

// -----------------------------------------------------------------------
// Entry points
// -----------------------------------------------------------------------

pub async fn run_plan(curator: &Curator, topic: &str, json: bool) -> Result<()> {
    let plan = curator
        .build_overview_plan(topic)
        .await
        .context("failed to generate plan")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_plan(topic, &plan));
    }
    Ok(())
}

pub async fn run_day(
    curator: &Curator,
    topic: &str,
    day_topic: &str,
    day_number: i64,
    json: bool,
) -> Result<()> {
    let day_number = checked_day_number(day_number)?;
    let detailed = curator
        .build_detailed_plan(topic, day_topic, day_number)
        .await
        .with_context(|| format!("failed to expand day {day_number}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detailed)?);
    } else {
        print!("{}", render_detailed_day(&detailed));
    }
    Ok(())
}

// -----------------------------------------------------------------------
// Rendering
// -----------------------------------------------------------------------

/// Render an overview plan as Markdown, one section per day.
pub fn render_plan(topic: &str, plan: &Plan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 7-day learning plan: {}", topic.trim());

    for day in plan.days() {
        out.push('\n');
        let _ = writeln!(out, "## {}", day.day);
        let _ = writeln!(out, "**Topic:** {}", day.topic);
        let _ = writeln!(out, "**Mini Challenge:** {}", day.mini_challenge);
        let _ = writeln!(out, "**Reasoning:** {}", day.reasoning);
        render_resources(&mut out, &day.resources);
    }
    out
}

/// Render an expanded day as Markdown.
pub fn render_detailed_day(day: &DetailedDayPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}: {}", day.day, day.topic);
    let _ = writeln!(
        out,
        "**Difficulty:** {}  |  **Estimated time:** {}",
        day.difficulty_level, day.estimated_time
    );

    out.push('\n');
    let _ = writeln!(out, "{}", day.detailed_description.trim());

    render_list(&mut out, "Learning Objectives", &day.learning_objectives, false);
    render_list(&mut out, "Prerequisites", &day.prerequisites, false);
    render_list(&mut out, "Key Concepts", &day.key_concepts, false);

    out.push('\n');
    let _ = writeln!(out, "## Challenge");
    let _ = writeln!(out, "{}", day.detailed_challenge.trim());

    render_list(&mut out, "Step-by-Step Guide", &day.step_by_step_guide, true);

    out.push('\n');
    let _ = writeln!(out, "## Next Steps");
    let _ = writeln!(out, "{}", day.next_steps.trim());

    render_resources(&mut out, &day.resources);
    out
}

fn render_list(out: &mut String, heading: &str, items: &[String], numbered: bool) {
    if items.is_empty() {
        return;
    }
    out.push('\n');
    let _ = writeln!(out, "## {heading}");
    for (i, item) in items.iter().enumerate() {
        if numbered {
            let _ = writeln!(out, "{}. {item}", i + 1);
        } else {
            let _ = writeln!(out, "- {item}");
        }
    }
}

/// Omitted entirely when there are no resources.
fn render_resources(out: &mut String, resources: &[Resource]) {
    if resources.is_empty() {
        return;
    }
    let _ = writeln!(out, "**Recommended Resources:**");
    for res in resources {
        let _ = writeln!(out, "- **{}**: [{}]({})", res.kind, res.title, res.url);
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
