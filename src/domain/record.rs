//! Input records: one named object with a parent reference and its scores.

use serde::Deserialize;
use serde_json::Value;

/// Placeholder for a missing `name` or `father`.
pub const UNKNOWN: &str = "Unknown";
/// Placeholder for a missing `definition`.
pub const NO_DEFINITION: &str = "No definition available";

/// Ordered score mapping, in document order.
///
/// A `None` value is a score key that is present but carries no number
/// (`null` in the input).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scores(Vec<(String, Option<f64>)>);

impl Scores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a score, keeping the position of the first insert.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<f64>) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// `None` if the key is absent, `Some(None)` if it is present without a number.
    pub fn get(&self, key: &str) -> Option<Option<f64>> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<f64>)> for Scores {
    fn from_iter<I: IntoIterator<Item = (String, Option<f64>)>>(iter: I) -> Self {
        let mut scores = Scores::new();
        for (k, v) in iter {
            scores.insert(k, v);
        }
        scores
    }
}

/// One object of the hierarchy as read from an input document.
///
/// Every field is optional in the input; missing (or `null`) fields fall back
/// to [`UNKNOWN`], [`NO_DEFINITION`] and zero. Mistyped fields are coerced:
/// integral floats and numeric strings count as numbers, anything else takes
/// the default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawRecord")]
pub struct ObjectRecord {
    pub name: String,
    pub father: String,
    pub definition: String,
    pub total_descendants: u64,
    pub level: u32,
    pub scores: Scores,
}

impl ObjectRecord {
    /// Record with the given name and father, all other fields defaulted.
    pub fn new(name: impl Into<String>, father: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            father: father.into(),
            definition: NO_DEFINITION.to_string(),
            total_descendants: 0,
            level: 0,
            scores: Scores::new(),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    pub fn with_total_descendants(mut self, total: u64) -> Self {
        self.total_descendants = total;
        self
    }

    pub fn with_score(mut self, key: impl Into<String>, value: Option<f64>) -> Self {
        self.scores.insert(key, value);
        self
    }
}

/// Input record with every field loosely typed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    name: Option<Value>,
    father: Option<Value>,
    definition: Option<Value>,
    total_descendants: Option<Value>,
    level: Option<Value>,
    scores: Option<Value>,
}

impl From<RawRecord> for ObjectRecord {
    fn from(raw: RawRecord) -> Self {
        let scores = match raw.scores {
            Some(Value::Object(map)) => map
                .into_iter()
                .map(|(k, v)| (k, number(&v)))
                .collect(),
            _ => Scores::new(),
        };

        Self {
            name: text(raw.name).unwrap_or_else(|| UNKNOWN.to_string()),
            father: text(raw.father).unwrap_or_else(|| UNKNOWN.to_string()),
            definition: text(raw.definition).unwrap_or_else(|| NO_DEFINITION.to_string()),
            total_descendants: count(raw.total_descendants.as_ref()).unwrap_or(0),
            level: count(raw.level.as_ref())
                .and_then(|l| u32::try_from(l).ok())
                .unwrap_or(0),
            scores,
        }
    }
}

/// Strings as-is, numbers and booleans in their JSON spelling.
fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers, and strings holding a number.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Non-negative integral value; `1.0` counts, `1.5` and `-1` do not.
fn count(value: Option<&Value>) -> Option<u64> {
    if let Some(Value::Number(n)) = value {
        if let Some(u) = n.as_u64() {
            return Some(u);
        }
    }
    let v = number(value?)?;
    (v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64).then(|| v as u64)
}

/// Parse a JSON document holding an array of records.
pub fn parse_records(content: &str) -> Result<Vec<ObjectRecord>, serde_json::Error> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_object_when_parsing_then_defaults_apply() {
        let records = parse_records("[{}]").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, UNKNOWN);
        assert_eq!(records[0].father, UNKNOWN);
        assert_eq!(records[0].definition, NO_DEFINITION);
        assert_eq!(records[0].total_descendants, 0);
        assert_eq!(records[0].level, 0);
        assert!(records[0].scores.is_empty());
    }

    #[test]
    fn given_scores_when_parsing_then_keeps_document_order_and_nulls() {
        let records =
            parse_records(r#"[{"name": "a", "scores": {"z": 0.5, "a": null, "m": 2}}]"#).unwrap();

        let keys: Vec<_> = records[0].scores.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(records[0].scores.get("z"), Some(Some(0.5)));
        assert_eq!(records[0].scores.get("a"), Some(None));
        assert_eq!(records[0].scores.get("m"), Some(Some(2.0)));
        assert_eq!(records[0].scores.get("missing"), None);
    }

    #[test]
    fn given_loosely_typed_fields_when_parsing_then_coerces_instead_of_failing() {
        let records = parse_records(
            r#"[
                {"name": "a", "level": 0},
                {"name": 7, "level": 1.0, "total_descendants": "3"},
                {"name": "c", "level": 1.5, "total_descendants": -1, "scores": [1]}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].name, "7");
        assert_eq!(records[1].level, 1);
        assert_eq!(records[1].total_descendants, 3);
        assert_eq!(records[2].level, 0);
        assert_eq!(records[2].total_descendants, 0);
        assert!(records[2].scores.is_empty());
    }

    #[test]
    fn given_string_scores_when_parsing_then_numeric_text_is_kept() {
        let records =
            parse_records(r#"[{"name": "a", "scores": {"s": "0.5", "t": "n/a", "u": true}}]"#)
                .unwrap();

        assert_eq!(records[0].scores.get("s"), Some(Some(0.5)));
        assert_eq!(records[0].scores.get("t"), Some(None));
        assert_eq!(records[0].scores.get("u"), Some(None));
    }

    #[test]
    fn given_object_instead_of_array_when_parsing_then_errors() {
        assert!(parse_records(r#"{"name": "a"}"#).is_err());
    }
}
