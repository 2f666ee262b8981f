use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationError};

/// Number of days in an overview plan.
pub const PLAN_DAYS: u32 = 7;

/// Maximum resources attached to a day in the overview plan.
pub const OVERVIEW_RESOURCE_CAP: usize = 3;

/// Maximum resources attached to an expanded day.
pub const DETAILED_RESOURCE_CAP: usize = 8;

/// Build the canonical label for a day, e.g. `"Day 3"`.
pub fn day_label(day_number: u32) -> String {
    format!("Day {day_number}")
}

// ---------------------------------------------------------------------------
// Topic
// ---------------------------------------------------------------------------

/// A learning topic: trimmed, case-preserved, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    /// Validate and wrap a raw topic string.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        Self::named(raw, "topic")
    }

    /// Like [`Topic::new`], reporting `field` in the error (e.g. `day_topic`).
    pub fn named(raw: &str, field: &'static str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyArgument { field });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Category of an external learning resource.
///
/// Deserialization is lenient: model output sometimes invents labels such
/// as `"Video"` or `"Course"`, which are mapped onto the closest category
/// or onto [`ResourceKind::Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ResourceKind {
    YouTube,
    Article,
    Blog,
    Documentation,
    Web,
    #[default]
    Resource,
}

impl ResourceKind {
    /// Map any label onto a kind, falling back to [`ResourceKind::Resource`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "video" | "youtube video" => Self::YouTube,
            "docs" | "official docs" => Self::Documentation,
            "blog post" => Self::Blog,
            other => other.parse().unwrap_or(Self::Resource),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::YouTube => "YouTube",
            Self::Article => "Article",
            Self::Blog => "Blog",
            Self::Documentation => "Documentation",
            Self::Web => "Web",
            Self::Resource => "Resource",
        };
        f.write_str(s)
    }
}

impl FromStr for ResourceKind {
    type Err = ResourceKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "youtube" => Ok(Self::YouTube),
            "article" => Ok(Self::Article),
            "blog" => Ok(Self::Blog),
            "documentation" => Ok(Self::Documentation),
            "web" => Ok(Self::Web),
            "resource" => Ok(Self::Resource),
            _ => Err(ResourceKindParseError(s.to_owned())),
        }
    }
}

impl From<String> for ResourceKind {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

/// Error returned when parsing an invalid [`ResourceKind`] string.
#[derive(Debug, Clone)]
pub struct ResourceKindParseError(pub String);

impl fmt::Display for ResourceKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid resource kind: {:?}", self.0)
    }
}

impl std::error::Error for ResourceKindParseError {}

/// A single external learning reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Missing in some model output; defaults to [`ResourceKind::Resource`].
    #[serde(rename = "type", default)]
    pub kind: ResourceKind,
    pub title: String,
    /// Unique key within any resource set.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Resource {
    pub fn new(kind: ResourceKind, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            url: url.into(),
            snippet: None,
        }
    }

    /// Return the same resource re-tagged as `kind`.
    pub fn tagged(mut self, kind: ResourceKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Keep the first occurrence of every URL, preserving order.
pub fn dedup_by_url(resources: Vec<Resource>) -> Vec<Resource> {
    let mut seen = std::collections::HashSet::new();
    resources
        .into_iter()
        .filter(|r| seen.insert(r.url.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Day plans
// ---------------------------------------------------------------------------

/// One day of the overview plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// `"Day N"` label.
    pub day: String,
    pub topic: String,
    pub mini_challenge: String,
    pub reasoning: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Self-assessed difficulty of an expanded day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

impl FromStr for DifficultyLevel {
    type Err = DifficultyLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(DifficultyLevelParseError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for DifficultyLevel {
    type Error = DifficultyLevelParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Error returned when parsing an invalid [`DifficultyLevel`] string.
#[derive(Debug, Clone)]
pub struct DifficultyLevelParseError(pub String);

impl fmt::Display for DifficultyLevelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid difficulty level {:?} (expected Beginner, Intermediate, or Advanced)",
            self.0
        )
    }
}

impl std::error::Error for DifficultyLevelParseError {}

/// Deep-dive view of a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedDayPlan {
    pub day: String,
    pub topic: String,
    pub detailed_description: String,
    pub learning_objectives: Vec<String>,
    pub detailed_challenge: String,
    pub step_by_step_guide: Vec<String>,
    pub key_concepts: Vec<String>,
    /// Free-text range such as `"2-3 hours"`.
    pub estimated_time: String,
    pub difficulty_level: DifficultyLevel,
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    pub next_steps: String,
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// The 7-day overview: exactly [`PLAN_DAYS`] entries labeled `Day 1..Day 7`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Plan {
    days: Vec<DayPlan>,
}

impl Plan {
    /// Check the day count and labels, collecting every mismatch. Labels
    /// that only differ by surrounding whitespace are normalized.
    pub fn new(mut days: Vec<DayPlan>) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();

        if days.len() != PLAN_DAYS as usize {
            errors.push(FieldError::new(
                "$",
                format!("expected {PLAN_DAYS} entries, got {}", days.len()),
            ));
        }

        for (i, day) in days.iter_mut().enumerate() {
            let expected = day_label(i as u32 + 1);
            if day.day.trim() == expected {
                day.day = expected;
            } else {
                errors.push(FieldError::new(
                    format!("[{i}].day"),
                    format!("expected {expected:?}, got {:?}", day.day),
                ));
            }
        }

        if errors.is_empty() {
            Ok(Self { days })
        } else {
            Err(ValidationError::Shape { errors })
        }
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn into_days(self) -> Vec<DayPlan> {
        self.days
    }

    /// Resource substitution is the only mutation a plan sees after
    /// construction, and only the curator performs it.
    pub(crate) fn days_mut(&mut self) -> &mut [DayPlan] {
        &mut self.days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> DayPlan {
        DayPlan {
            day: day_label(n),
            topic: format!("Topic {n}"),
            mini_challenge: "challenge".to_string(),
            reasoning: "reasoning".to_string(),
            resources: vec![],
        }
    }

    #[test]
    fn topic_is_trimmed_and_case_preserved() {
        let topic = Topic::new("  Python for Data Analysis \n").unwrap();
        assert_eq!(topic.as_str(), "Python for Data Analysis");
    }

    #[test]
    fn topic_rejects_whitespace_only() {
        let err = Topic::new(" \t ").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyArgument { field: "topic" }));
    }

    #[test]
    fn named_topic_reports_field() {
        let err = Topic::named("", "day_topic").unwrap_err();
        assert_eq!(err.to_string(), "day_topic must not be empty");
    }

    #[test]
    fn resource_kind_display_roundtrip() {
        for kind in [
            ResourceKind::YouTube,
            ResourceKind::Article,
            ResourceKind::Blog,
            ResourceKind::Documentation,
            ResourceKind::Web,
            ResourceKind::Resource,
        ] {
            assert_eq!(kind.to_string().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn resource_kind_lenient_labels() {
        assert_eq!(ResourceKind::from_label("Video"), ResourceKind::YouTube);
        assert_eq!(ResourceKind::from_label("youtube"), ResourceKind::YouTube);
        assert_eq!(ResourceKind::from_label("Course"), ResourceKind::Resource);
        assert!("Course".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn resource_serializes_kind_as_type() {
        let mut res = Resource::new(ResourceKind::YouTube, "T1", "https://youtube.com/x");
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["type"], "YouTube");
        assert!(json.get("snippet").is_none());

        res.snippet = Some("short".to_string());
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["snippet"], "short");
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let resources = vec![
            Resource::new(ResourceKind::Blog, "a", "https://a"),
            Resource::new(ResourceKind::Article, "b", "https://b"),
            Resource::new(ResourceKind::Web, "a again", "https://a"),
        ];
        let deduped = dedup_by_url(resources);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "a");
        assert_eq!(deduped[1].url, "https://b");
    }

    #[test]
    fn difficulty_is_case_insensitive() {
        assert_eq!(
            "intermediate".parse::<DifficultyLevel>().unwrap(),
            DifficultyLevel::Intermediate
        );
        assert!("expert".parse::<DifficultyLevel>().is_err());
    }

    #[test]
    fn plan_accepts_seven_ordered_days() {
        let plan = Plan::new((1..=7).map(day).collect()).unwrap();
        assert_eq!(plan.days().len(), 7);
        assert_eq!(plan.days()[0].day, "Day 1");
        assert_eq!(plan.days()[6].day, "Day 7");
    }

    #[test]
    fn plan_trims_padded_labels() {
        let mut days: Vec<DayPlan> = (1..=7).map(day).collect();
        days[0].day = " Day 1 ".to_string();
        days[4].day = "Day 5\t".to_string();
        let plan = Plan::new(days).unwrap();
        assert_eq!(plan.days()[0].day, "Day 1");
        assert_eq!(plan.days()[4].day, "Day 5");
    }

    #[test]
    fn plan_rejects_wrong_count() {
        let err = Plan::new((1..=5).map(day).collect()).unwrap_err();
        assert!(err.to_string().contains("expected 7 entries, got 5"), "{err}");
    }

    #[test]
    fn plan_rejects_out_of_order_labels() {
        let mut days: Vec<DayPlan> = (1..=7).map(day).collect();
        days.swap(1, 2);
        let err = Plan::new(days).unwrap_err();
        match err {
            ValidationError::Shape { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].path, "[1].day");
                assert_eq!(errors[1].path, "[2].day");
            }
            other => panic!("expected Shape, got {other:?}"),
        }
    }

    #[test]
    fn plan_serializes_as_bare_array() {
        let plan = Plan::new((1..=7).map(day).collect()).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.is_array());
        assert_eq!(json[2]["day"], "Day 3");
    }
}
