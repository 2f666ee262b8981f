//! Model-output parser.
//!
//! Turns free text from a generation model into a validated payload:
//! - Leading/trailing code fences (```` ``` ```` or ```` ```json ````) are stripped.
//! - The payload is located by bracket-balance scanning. Brackets inside
//!   JSON string literals are ignored. Candidate spans are tried in order
//!   until one both parses and validates, so prose such as `[note]` or a
//!   footnote `[1]` before the payload does not mis-bound it.
//! - The payload is checked field by field; every problem is reported
//!   with its location rather than as a single parse failure.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{CurationError, FieldError, ValidationError};
use crate::model::{DayPlan, DetailedDayPlan, Plan, PLAN_DAYS, day_label};

/// How much of the raw model output is kept in error messages.
pub const RAW_PREVIEW_CHARS: usize = 1000;

/// Which top-level JSON container a parser expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Array,
    Object,
}

impl PayloadKind {
    fn open(self) -> char {
        match self {
            Self::Array => '[',
            Self::Object => '{',
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array => f.write_str("array"),
            Self::Object => f.write_str("object"),
        }
    }
}

/// First [`RAW_PREVIEW_CHARS`] characters of `raw`.
pub fn raw_preview(raw: &str) -> String {
    raw.chars().take(RAW_PREVIEW_CHARS).collect()
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Remove a leading ```` ``` ```` fence (with an optional language tag such
/// as `json` in any case) and a trailing ```` ``` ```` fence.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        text = rest[tag_len..].trim_start();
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    text
}

// ---------------------------------------------------------------------------
// Payload location
// ---------------------------------------------------------------------------

/// Outcome of scanning from one opening bracket.
#[derive(Debug, PartialEq, Eq)]
enum Scan {
    /// Balanced; byte index of the matching closer.
    Closed(usize),
    /// A closer of the wrong type appeared at this byte index.
    Mismatched(usize),
    /// Text ended before the span closed.
    Unterminated,
}

/// Walk forward from the opening bracket at `start`, tracking nesting of
/// `[]`/`{}` outside of JSON string literals.
fn scan_balanced(text: &str, start: usize) -> Scan {
    let bytes = text.as_bytes();
    let mut closers: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' => closers.push(b']'),
            b'{' => closers.push(b'}'),
            b']' | b'}' => {
                if closers.pop() != Some(b) {
                    return Scan::Mismatched(i);
                }
                if closers.is_empty() {
                    return Scan::Closed(i);
                }
            }
            _ => {}
        }
    }

    Scan::Unterminated
}

/// One balanced span found while scanning for a payload.
#[derive(Debug)]
enum Candidate {
    Parsed(Value),
    Malformed(serde_json::Error),
    /// An opener that never closed; the scan resumes just after it.
    Truncated,
}

/// Balanced spans of one kind, in text order.
struct Candidates<'a> {
    text: &'a str,
    open: char,
    cursor: usize,
}

impl Iterator for Candidates<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            let start = self.cursor + self.text.get(self.cursor..)?.find(self.open)?;
            match scan_balanced(self.text, start) {
                Scan::Closed(end) => {
                    // Spans nested inside a closed candidate are fragments of it.
                    self.cursor = end + 1;
                    return Some(match serde_json::from_str(&self.text[start..=end]) {
                        Ok(value) => Candidate::Parsed(value),
                        Err(e) => Candidate::Malformed(e),
                    });
                }
                Scan::Mismatched(_) => self.cursor = start + 1,
                Scan::Unterminated => {
                    self.cursor = start + 1;
                    return Some(Candidate::Truncated);
                }
            }
        }
    }
}

fn candidates(text: &str, kind: PayloadKind) -> Candidates<'_> {
    Candidates {
        text,
        open: kind.open(),
        cursor: 0,
    }
}

/// Why a payload could not be pulled out of the text.
#[derive(Debug)]
pub enum ExtractError {
    /// No balanced span of the requested kind exists.
    NotFound,
    /// Balanced spans exist but none is valid JSON; holds the first error.
    Malformed(serde_json::Error),
}

/// Locate and parse the first balanced span of `kind` in `text` that is
/// valid JSON.
pub fn extract_payload(text: &str, kind: PayloadKind) -> Result<Value, ExtractError> {
    let mut first_error = None;

    for candidate in candidates(text, kind) {
        match candidate {
            Candidate::Parsed(value) => return Ok(value),
            Candidate::Malformed(e) => {
                first_error.get_or_insert(e);
            }
            Candidate::Truncated => {}
        }
    }

    match first_error {
        Some(e) => Err(ExtractError::Malformed(e)),
        None => Err(ExtractError::NotFound),
    }
}

/// Normalize raw model output and return the first candidate span that
/// `validate` accepts.
///
/// When no span is accepted, the failure of the earliest span is reported:
/// an unclosed opener as [`CurationError::Extraction`], unparsable JSON as
/// [`ValidationError::Malformed`], a rejected payload as its own error.
pub fn extract<T>(
    raw: &str,
    kind: PayloadKind,
    mut validate: impl FnMut(Value) -> Result<T, ValidationError>,
) -> Result<T, CurationError> {
    let cleaned = strip_code_fences(raw);
    let mut first_failure: Option<CurationError> = None;

    for candidate in candidates(cleaned, kind) {
        let failure = match candidate {
            Candidate::Parsed(value) => match validate(value) {
                Ok(payload) => return Ok(payload),
                Err(e) => e.into(),
            },
            Candidate::Malformed(source) => ValidationError::Malformed {
                source,
                raw_preview: raw_preview(raw),
            }
            .into(),
            Candidate::Truncated => CurationError::Extraction {
                expected: kind,
                raw_preview: raw_preview(raw),
            },
        };
        first_failure.get_or_insert(failure);
    }

    Err(first_failure.unwrap_or_else(|| CurationError::Extraction {
        expected: kind,
        raw_preview: raw_preview(raw),
    }))
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

fn require_string(obj: &Map<String, Value>, field: &str, path: &str, errors: &mut Vec<FieldError>) {
    match obj.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(format!("{path}.{field}"), "missing field"));
        }
        Some(Value::String(_)) => {}
        Some(other) => errors.push(FieldError::new(
            format!("{path}.{field}"),
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

fn require_string_list(
    obj: &Map<String, Value>,
    field: &str,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    match obj.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(format!("{path}.{field}"), "missing field"));
        }
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    errors.push(FieldError::new(
                        format!("{path}.{field}[{i}]"),
                        format!("expected a string, got {}", type_name(item)),
                    ));
                }
            }
        }
        Some(other) => errors.push(FieldError::new(
            format!("{path}.{field}"),
            format!("expected a list of strings, got {}", type_name(other)),
        )),
    }
}

/// `resources` is optional, but when present every entry needs a title and URL.
fn check_resources(obj: &Map<String, Value>, path: &str, errors: &mut Vec<FieldError>) {
    let items = match obj.get("resources") {
        None | Some(Value::Null) => return,
        Some(Value::Array(items)) => items,
        Some(other) => {
            errors.push(FieldError::new(
                format!("{path}.resources"),
                format!("expected a list, got {}", type_name(other)),
            ));
            return;
        }
    };

    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{path}.resources[{i}]");
        match item.as_object() {
            Some(res) => {
                require_string(res, "title", &item_path, errors);
                require_string(res, "url", &item_path, errors);
            }
            None => errors.push(FieldError::new(
                item_path,
                format!("expected an object, got {}", type_name(item)),
            )),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Deserialize after the structural checks passed; anything serde still
/// rejects (e.g. an unknown difficulty level) is reported against `path`.
fn decode<T: serde::de::DeserializeOwned>(
    value: Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(FieldError::new(path, e.to_string()));
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Plan payloads
// ---------------------------------------------------------------------------

const DAY_STRING_FIELDS: &[&str] = &["day", "topic", "mini_challenge", "reasoning"];

/// Validate an extracted value as a 7-day plan.
pub fn validate_plan(value: Value) -> Result<Plan, ValidationError> {
    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(ValidationError::Shape {
                errors: vec![FieldError::new(
                    "$",
                    format!("expected a list, got {}", type_name(&other)),
                )],
            });
        }
    };

    let mut errors = Vec::new();
    let count = entries.len();
    let mut days = Vec::with_capacity(count);

    for (i, entry) in entries.into_iter().enumerate() {
        let path = format!("[{i}]");
        let Some(obj) = entry.as_object() else {
            errors.push(FieldError::new(
                path,
                format!("expected an object, got {}", type_name(&entry)),
            ));
            continue;
        };

        let before = errors.len();
        for field in DAY_STRING_FIELDS {
            require_string(obj, field, &path, &mut errors);
        }
        check_resources(obj, &path, &mut errors);

        if errors.len() == before {
            if let Some(day) = decode::<DayPlan>(entry, &path, &mut errors) {
                days.push(day);
            }
        }
    }

    if !errors.is_empty() {
        if count != PLAN_DAYS as usize {
            errors.insert(
                0,
                FieldError::new("$", format!("expected {PLAN_DAYS} entries, got {count}")),
            );
        }
        return Err(ValidationError::Shape { errors });
    }

    Plan::new(days)
}

/// Parse raw model output into a [`Plan`].
pub fn parse_plan(raw: &str) -> Result<Plan, CurationError> {
    extract(raw, PayloadKind::Array, validate_plan)
}

// ---------------------------------------------------------------------------
// Detailed-day payloads
// ---------------------------------------------------------------------------

const DETAIL_STRING_FIELDS: &[&str] = &[
    "day",
    "topic",
    "detailed_description",
    "detailed_challenge",
    "estimated_time",
    "difficulty_level",
    "next_steps",
];

const DETAIL_LIST_FIELDS: &[&str] = &[
    "learning_objectives",
    "step_by_step_guide",
    "key_concepts",
    "prerequisites",
];

/// Validate an extracted value as the expansion of day `day_number`.
pub fn validate_detailed_day(
    value: Value,
    day_number: u32,
) -> Result<DetailedDayPlan, ValidationError> {
    let path = "$";
    let Some(obj) = value.as_object() else {
        return Err(ValidationError::Shape {
            errors: vec![FieldError::new(
                path,
                format!("expected an object, got {}", type_name(&value)),
            )],
        });
    };

    let mut errors = Vec::new();
    for field in DETAIL_STRING_FIELDS {
        require_string(obj, field, path, &mut errors);
    }
    for field in DETAIL_LIST_FIELDS {
        require_string_list(obj, field, path, &mut errors);
    }
    check_resources(obj, path, &mut errors);

    if !errors.is_empty() {
        return Err(ValidationError::Shape { errors });
    }

    let mut detailed: DetailedDayPlan = match decode(value, path, &mut errors) {
        Some(d) => d,
        None => return Err(ValidationError::Shape { errors }),
    };

    let expected = day_label(day_number);
    if detailed.day.trim() != expected {
        return Err(ValidationError::Shape {
            errors: vec![FieldError::new(
                "$.day",
                format!("expected {expected:?}, got {:?}", detailed.day),
            )],
        });
    }
    detailed.day = expected;

    Ok(detailed)
}

/// Parse raw model output into a [`DetailedDayPlan`] for `day_number`.
pub fn parse_detailed_day(raw: &str, day_number: u32) -> Result<DetailedDayPlan, CurationError> {
    extract(raw, PayloadKind::Object, |value| {
        validate_detailed_day(value, day_number)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plan_json() -> String {
        let days: Vec<Value> = (1..=7)
            .map(|n| {
                json!({
                    "day": format!("Day {n}"),
                    "topic": format!("Topic {n}"),
                    "mini_challenge": "Build something small",
                    "reasoning": "Builds on the previous day",
                    "resources": [
                        {"type": "YouTube", "title": "Intro", "url": format!("https://youtube.com/watch?v={n}")}
                    ]
                })
            })
            .collect();
        serde_json::to_string_pretty(&days).unwrap()
    }

    fn detailed_json(day: &str) -> Value {
        json!({
            "day": day,
            "topic": "Pandas basics",
            "detailed_description": "DataFrames and Series.",
            "learning_objectives": ["Load a CSV", "Select columns"],
            "detailed_challenge": "Analyse a sales dataset.",
            "step_by_step_guide": ["Install pandas", "Read the file"],
            "key_concepts": ["DataFrame", "Series"],
            "estimated_time": "2-3 hours",
            "difficulty_level": "Beginner",
            "prerequisites": ["Basic Python"],
            "resources": [],
            "next_steps": "Move on to grouping and aggregation."
        })
    }

    fn accept_any(value: Value) -> Result<Value, ValidationError> {
        Ok(value)
    }

    // -- strip_code_fences --

    #[test]
    fn strips_json_fence() {
        assert_eq!(strip_code_fences("```json\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn strips_bare_fence_and_whitespace() {
        assert_eq!(strip_code_fences("  ```\n{\"a\": 1}\n```  \n"), "{\"a\": 1}");
    }

    #[test]
    fn strips_fence_case_insensitively() {
        assert_eq!(strip_code_fences("```JSON\n[]\n```"), "[]");
        assert_eq!(strip_code_fences("```Json [] ```"), "[]");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("Here you go: [1]"), "Here you go: [1]");
    }

    // -- scan_balanced --

    #[test]
    fn scan_ignores_brackets_in_strings() {
        let text = r#"[{"title": "Arrays [] and {maps}", "q": "say \"]\""}] trailing"#;
        let Scan::Closed(end) = scan_balanced(text, 0) else {
            panic!("expected a closed span");
        };
        assert_eq!(&text[end + 1..], " trailing");
    }

    #[test]
    fn scan_reports_mismatch_and_truncation() {
        assert_eq!(scan_balanced("[note}", 0), Scan::Mismatched(5));
        assert_eq!(scan_balanced("[{\"a\": 1}", 0), Scan::Unterminated);
    }

    // -- extract_payload --

    #[test]
    fn fenced_and_bare_arrays_extract_identically() {
        let bare = plan_json();
        let fenced = format!("```json\n{bare}\n```");
        let a = extract(&bare, PayloadKind::Array, accept_any).unwrap();
        let b = extract(&fenced, PayloadKind::Array, accept_any).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tolerates_prose_around_payload() {
        let text = format!("Sure! Here is your plan:\n{}\nGood luck!", plan_json());
        let value = extract(&text, PayloadKind::Array, accept_any).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 7);
    }

    #[test]
    fn skips_bracketed_prose_before_payload() {
        let text = "Plan [draft] follows: [1, 2, 3] and that's it [end]";
        let value = extract_payload(text, PayloadKind::Array).unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn first_of_multiple_arrays_wins() {
        let value = extract_payload("[1] then [2]", PayloadKind::Array).unwrap();
        assert_eq!(value, json!([1]));
    }

    #[test]
    fn does_not_fall_back_to_nested_fragments() {
        // The outer array is malformed; its inner `[]` must not be returned.
        let text = r#"[{"day": "Day 1", "resources": [],}]"#;
        let err = extract_payload(text, PayloadKind::Array).unwrap_err();
        assert!(matches!(err, ExtractError::Malformed(_)));
    }

    #[test]
    fn prose_refusal_is_extraction_error() {
        let err = extract("I'm sorry, I can't help with that.", PayloadKind::Array, accept_any)
            .unwrap_err();
        match err {
            CurationError::Extraction {
                expected,
                raw_preview,
            } => {
                assert_eq!(expected, PayloadKind::Array);
                assert!(raw_preview.contains("I'm sorry"));
            }
            other => panic!("expected Extraction, got {other:?}"),
        }
    }

    #[test]
    fn truncated_output_is_extraction_error() {
        // The inner `[]` is a candidate, but the unclosed outer span came first.
        let err = parse_plan(r#"[{"day": "Day 1", "resources": []"#).unwrap_err();
        assert!(matches!(err, CurationError::Extraction { .. }), "{err:?}");
    }

    #[test]
    fn unclosed_opener_does_not_hide_a_later_payload() {
        let text = format!("[draft notes, see below\n{}", plan_json());
        let plan = parse_plan(&text).unwrap();
        assert_eq!(plan.days().len(), 7);
    }

    #[test]
    fn footnote_before_plan_is_skipped() {
        let text = format!("As noted in [1], here is your plan:\n{}", plan_json());
        let plan = parse_plan(&text).unwrap();
        assert_eq!(plan.days()[6].day, "Day 7");
    }

    #[test]
    fn first_rejected_candidate_is_reported_when_none_validates() {
        let err = parse_plan("See [1] and [2, 3].").unwrap_err();
        assert!(err.to_string().contains("expected 7 entries, got 1"), "{err}");
    }

    #[test]
    fn object_example_before_detailed_day_is_skipped() {
        let text = format!(
            "Fields look like {{\"day\": \"Day N\"}}. Result:\n{}",
            detailed_json("Day 3")
        );
        let day = parse_detailed_day(&text, 3).unwrap();
        assert_eq!(day.topic, "Pandas basics");
    }

    #[test]
    fn malformed_json_is_validation_error_with_preview() {
        let raw = format!("[{{'day': 'Day 1'}}]{}", "x".repeat(2000));
        let err = extract(&raw, PayloadKind::Array, accept_any).unwrap_err();
        match err {
            CurationError::Validation(ValidationError::Malformed { raw_preview, .. }) => {
                assert_eq!(raw_preview.chars().count(), RAW_PREVIEW_CHARS);
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn object_extraction_uses_braces() {
        let text = "Result: {\"day\": \"Day 2\", \"tags\": [\"a\"]} -- done";
        let value = extract_payload(text, PayloadKind::Object).unwrap();
        assert_eq!(value["day"], "Day 2");
    }

    // -- parse_plan --

    #[test]
    fn parses_seven_day_plan() {
        let plan = parse_plan(&plan_json()).unwrap();
        let labels: Vec<&str> = plan.days().iter().map(|d| d.day.as_str()).collect();
        assert_eq!(
            labels,
            ["Day 1", "Day 2", "Day 3", "Day 4", "Day 5", "Day 6", "Day 7"]
        );
        assert_eq!(plan.days()[0].resources.len(), 1);
    }

    #[test]
    fn reports_missing_fields_per_entry() {
        let raw = r#"[
            {"day": "Day 1", "topic": "A", "mini_challenge": "x"},
            {"day": "Day 2", "topic": 5, "mini_challenge": "x", "reasoning": "y"}
        ]"#;
        let err = parse_plan(raw).unwrap_err();
        let CurationError::Validation(ValidationError::Shape { errors }) = err else {
            panic!("expected Shape error");
        };
        let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "$: expected 7 entries, got 2",
                "[0].reasoning: missing field",
                "[1].topic: expected a string, got a number",
            ]
        );
    }

    #[test]
    fn reports_bad_resource_entries() {
        let mut days: Vec<Value> = serde_json::from_str(&plan_json()).unwrap();
        days[3]["resources"] = json!([{"title": "no url"}, "just a string"]);
        let err = parse_plan(&serde_json::to_string(&days).unwrap()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("[3].resources[0].url: missing field"), "{msg}");
        assert!(msg.contains("[3].resources[1]: expected an object"), "{msg}");
    }

    #[test]
    fn missing_resources_field_is_accepted() {
        let mut days: Vec<Value> = serde_json::from_str(&plan_json()).unwrap();
        days[0].as_object_mut().unwrap().remove("resources");
        let plan = parse_plan(&serde_json::to_string(&days).unwrap()).unwrap();
        assert!(plan.days()[0].resources.is_empty());
    }

    #[test]
    fn rejects_six_day_plan() {
        let mut days: Vec<Value> = serde_json::from_str(&plan_json()).unwrap();
        days.pop();
        let err = parse_plan(&serde_json::to_string(&days).unwrap()).unwrap_err();
        assert!(err.to_string().contains("expected 7 entries, got 6"), "{err}");
    }

    #[test]
    fn rejects_top_level_object_for_plan() {
        let err = validate_plan(json!({"days": []})).unwrap_err();
        assert!(err.to_string().contains("$: expected a list, got an object"), "{err}");
    }

    // -- parse_detailed_day --

    #[test]
    fn parses_detailed_day() {
        let raw = format!("```json\n{}\n```", detailed_json("Day 3"));
        let day = parse_detailed_day(&raw, 3).unwrap();
        assert_eq!(day.day, "Day 3");
        assert_eq!(day.learning_objectives.len(), 2);
        assert_eq!(day.difficulty_level, crate::model::DifficultyLevel::Beginner);
    }

    #[test]
    fn padded_labels_are_normalized() {
        let mut days: Vec<Value> = serde_json::from_str(&plan_json()).unwrap();
        days[0]["day"] = json!(" Day 1 ");
        let plan = parse_plan(&serde_json::to_string(&days).unwrap()).unwrap();
        assert_eq!(plan.days()[0].day, "Day 1");

        let day = validate_detailed_day(detailed_json("Day 3\n"), 3).unwrap();
        assert_eq!(day.day, "Day 3");
    }

    #[test]
    fn detailed_day_label_must_match() {
        let err = validate_detailed_day(detailed_json("Day 4"), 3).unwrap_err();
        assert!(err.to_string().contains("$.day: expected \"Day 3\""), "{err}");
    }

    #[test]
    fn detailed_day_reports_list_and_enum_problems() {
        let mut value = detailed_json("Day 1");
        value["key_concepts"] = json!("DataFrame");
        value["prerequisites"] = json!(["ok", 3]);
        let err = validate_detailed_day(value, 1).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("$.key_concepts: expected a list of strings"), "{msg}");
        assert!(msg.contains("$.prerequisites[1]: expected a string"), "{msg}");

        let mut value = detailed_json("Day 1");
        value["difficulty_level"] = json!("Expert");
        let err = validate_detailed_day(value, 1).unwrap_err();
        assert!(err.to_string().contains("invalid difficulty level"), "{err}");
    }

    #[test]
    fn detailed_day_rejects_array_payload() {
        let err = parse_detailed_day("no object here, only [1, 2]", 1).unwrap_err();
        assert!(matches!(
            err,
            CurationError::Extraction {
                expected: PayloadKind::Object,
                ..
            }
        ));
    }
}
