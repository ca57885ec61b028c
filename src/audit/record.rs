//! Audit result types.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Headers found on the audited response, in checklist order.
///
/// Serialized as a JSON object; insertion order is kept so stored history
/// reads back exactly as it was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundHeaders(Vec<(String, String)>);

impl FoundHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl Serialize for FoundHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FoundHeaders {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FoundHeadersVisitor;

        impl<'de> Visitor<'de> for FoundHeadersVisitor {
            type Value = FoundHeaders;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of header name to value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut headers = FoundHeaders::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    headers.insert(name, value);
                }
                Ok(headers)
            }
        }

        deserializer.deserialize_map(FoundHeadersVisitor)
    }
}

/// Outcome of scoring one response against the checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderReport {
    pub score: u32,
    pub headers_found: FoundHeaders,
    pub missing: Vec<String>,
}

/// One completed audit, the unit stored in a client's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub url: String,
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
    pub score: u32,
    pub headers_found: FoundHeaders,
    pub missing: Vec<String>,
    pub ai_analysis: Value,
}

impl AuditRecord {
    pub fn new(url: impl Into<String>, report: HeaderReport, ai_analysis: Value) -> Self {
        Self::at(url, Utc::now(), report, ai_analysis)
    }

    pub fn at(
        url: impl Into<String>,
        when: DateTime<Utc>,
        report: HeaderReport,
        ai_analysis: Value,
    ) -> Self {
        Self {
            url: url.into(),
            timestamp: when.to_rfc3339_opts(SecondsFormat::Millis, true),
            score: report.score,
            headers_found: report.headers_found,
            missing: report.missing,
            ai_analysis,
        }
    }
}
