//! Declarative field validation.
//!
//! Each entity declares a `&'static [FieldRules]` table. [`validate`] walks the
//! table against a populated record and collects every [`Violation`]. Rules
//! that need the store ([`Rule::Unique`]) are skipped here and exposed through
//! [`unique_constraints`] for the caller to check.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// A single field rule. Messages may contain `{{ limit }}` and `{{ value }}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Non-blank string, present number, non-null JSON.
    Required { message: &'static str },
    /// Character count within `min..=max`.
    Length {
        min: usize,
        max: usize,
        min_message: &'static str,
        max_message: &'static str,
    },
    /// Strictly greater than zero.
    Positive { message: &'static str },
    Email { message: &'static str },
    /// No other stored row shares this value in `column`.
    Unique {
        column: &'static str,
        message: &'static str,
    },
    /// JSON array of strings.
    StringList { message: &'static str },
}

/// Ordered rules for one field, keyed by its public (camelCase) name.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

/// The value a record exposes to the validator for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
    Json(&'a Value),
    /// Nothing new to check, e.g. a stored password hash.
    Unchanged,
}

impl FieldValue<'_> {
    fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.is_none_or(|s| s.trim().is_empty()),
            Self::Number(number) => number.is_none(),
            Self::Json(value) => value.is_null(),
            Self::Unchanged => false,
        }
    }
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub property_path: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            property_path: field.to_owned(),
            message: message.into(),
        }
    }
}

/// Evaluate every store-independent rule in `table`.
///
/// Rules other than [`Rule::Required`] skip blank values, so a blank required
/// field yields exactly one violation.
pub fn validate<'a>(
    table: &[FieldRules],
    value_of: impl Fn(&str) -> FieldValue<'a>,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for entry in table {
        let value = value_of(entry.field);
        if value == FieldValue::Unchanged {
            continue;
        }
        for rule in entry.rules {
            if let Some(message) = check(rule, &value) {
                violations.push(Violation::new(entry.field, message));
            }
        }
    }
    violations
}

/// `(field, column, message)` for every uniqueness rule in `table`.
pub fn unique_constraints(
    table: &[FieldRules],
) -> impl Iterator<Item = (&'static str, &'static str, &'static str)> + '_ {
    table.iter().flat_map(|entry| {
        entry.rules.iter().filter_map(move |rule| match rule {
            Rule::Unique { column, message } => Some((entry.field, *column, *message)),
            _ => None,
        })
    })
}

fn check(rule: &Rule, value: &FieldValue<'_>) -> Option<String> {
    if let Rule::Required { message } = rule {
        return value.is_blank().then(|| (*message).to_owned());
    }
    if value.is_blank() {
        return None;
    }
    match (rule, value) {
        (
            Rule::Length {
                min,
                max,
                min_message,
                max_message,
            },
            FieldValue::Text(Some(text)),
        ) => {
            let count = text.chars().count();
            if count < *min {
                Some(render(min_message, Some(*min), None))
            } else if count > *max {
                Some(render(max_message, Some(*max), None))
            } else {
                None
            }
        }
        (Rule::Positive { message }, FieldValue::Number(Some(number))) => {
            (*number <= 0.0).then(|| (*message).to_owned())
        }
        (Rule::Email { message }, FieldValue::Text(Some(text))) => {
            (!EMAIL_RE.is_match(text)).then(|| render(message, None, Some(*text)))
        }
        (Rule::StringList { message }, FieldValue::Json(json)) => {
            let ok = json
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string));
            (!ok).then(|| (*message).to_owned())
        }
        _ => None,
    }
}

fn render(template: &str, limit: Option<usize>, value: Option<&str>) -> String {
    let mut out = template.to_owned();
    if let Some(limit) = limit {
        out = out.replace("{{ limit }}", &limit.to_string());
    }
    if let Some(value) = value {
        out = out.replace("{{ value }}", &format!("\"{value}\""));
    }
    out
}
