//! Query filters.
//!
//! A [`Filter`] maps dotted field paths to a [`Condition`]. Paths follow the
//! document database convention: each segment descends into an object, and
//! when an array is reached the remaining path is applied to every element.
//! A condition holds when any value reached by the path satisfies it.

use indexmap::IndexMap;
use regex::RegexBuilder;
use serde::Serialize;
use serde_json::Value;

use crate::Document;
use crate::error::StorageError;

/// Match condition for a single path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Equal to the value. `Null` also matches a missing field.
    Equals(Value),
    /// Numerically equal. `NaN` never matches.
    NumberEquals(f64),
    /// String matches the regular expression.
    Regex {
        pattern: String,
        case_insensitive: bool,
    },
}

impl Condition {
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            case_insensitive: false,
        }
    }

    pub fn regex_ci(pattern: impl Into<String>) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            case_insensitive: true,
        }
    }
}

/// Ordered set of path conditions, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Filter {
    conditions: IndexMap<String, Condition>,
}

impl Filter {
    /// Empty filter, matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter with one equality condition.
    pub fn eq(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().with(path, Condition::Equals(value.into()))
    }

    /// Adds a condition, replacing any existing one on the same path.
    pub fn with(mut self, path: impl Into<String>, condition: Condition) -> Self {
        self.insert(path, condition);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, condition: Condition) {
        self.conditions.insert(path.into(), condition);
    }

    /// Folds `other` into this filter. Conditions from `other` win on
    /// shared paths.
    pub fn merge(&mut self, other: Filter) {
        for (path, condition) in other.conditions {
            self.conditions.insert(path, condition);
        }
    }

    pub fn get(&self, path: &str) -> Option<&Condition> {
        self.conditions.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.conditions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluates the filter against a document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidFilter` if a regex condition does not
    /// compile.
    pub fn matches(&self, document: &Document) -> Result<bool, StorageError> {
        for (path, condition) in &self.conditions {
            if !condition_holds(document, path, condition)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl FromIterator<(String, Condition)> for Filter {
    fn from_iter<T: IntoIterator<Item = (String, Condition)>>(iter: T) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}

fn condition_holds(
    document: &Document,
    path: &str,
    condition: &Condition,
) -> Result<bool, StorageError> {
    let reached = values_at(document, path);

    match condition {
        Condition::Equals(Value::Null) if reached.is_empty() => Ok(true),
        Condition::Equals(expected) => Ok(reached
            .iter()
            .any(|v| candidates(v).any(|c| values_equal(c, expected)))),
        Condition::NumberEquals(expected) => Ok(reached.iter().any(|v| {
            candidates(v).any(|c| c.as_f64().is_some_and(|n| n == *expected))
        })),
        Condition::Regex {
            pattern,
            case_insensitive,
        } => {
            let re = RegexBuilder::new(pattern)
                .case_insensitive(*case_insensitive)
                .build()
                .map_err(|e| StorageError::invalid_filter(format!("{path}: {e}")))?;
            Ok(reached.iter().any(|v| {
                candidates(v).any(|c| c.as_str().is_some_and(|s| re.is_match(s)))
            }))
        }
    }
}

/// The value itself, then its elements when it is an array.
fn candidates(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(std::iter::once(value).chain(items.iter())),
        other => Box::new(std::iter::once(other)),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// All values reachable from `document` along a dotted path.
pub fn values_at<'a>(document: &'a Document, path: &str) -> Vec<&'a Value> {
    let mut segments = path.split('.');
    let Some(first) = segments.next() else {
        return Vec::new();
    };
    let mut current: Vec<&Value> = document.get(first).into_iter().collect();

    for segment in segments {
        let mut next = Vec::new();
        for value in current {
            descend(value, segment, &mut next);
        }
        if next.is_empty() {
            return next;
        }
        current = next;
    }
    current
}

fn descend<'a>(value: &'a Value, segment: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            if let Some(child) = map.get(segment) {
                out.push(child);
            }
        }
        Value::Array(items) => {
            if let Some(item) = segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                out.push(item);
            }
            out.extend(
                items
                    .iter()
                    .filter_map(|item| item.as_object())
                    .filter_map(|map| map.get(segment)),
            );
        }
        _ => {}
    }
}
