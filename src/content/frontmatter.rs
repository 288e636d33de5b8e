//! Front-matter parsing
//!
//! A front-matter block is a YAML mapping fenced by `---` lines at the very
//! top of a markdown file. Keys are kept in document order. Values are kept
//! as parsed YAML until a page payload is built, at which point they are
//! converted to a JSON-safe form with date-like scalars normalized to
//! RFC 3339 strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Parsed front-matter for a single markdown file
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    fields: IndexMap<String, YamlValue>,
}

impl FrontMatter {
    /// Split front-matter from content.
    ///
    /// Returns `(front_matter, body)`. A file without an opening `---`
    /// fence, or with an unclosed one, has no front-matter and the content
    /// is returned untouched. A fenced block that is not valid YAML is a
    /// parse error.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let Some(rest) = content.strip_prefix("---") else {
            return Ok((Self::default(), content));
        };
        // The opening fence must be a whole line
        let Some(rest) = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
        else {
            return Ok((Self::default(), content));
        };

        // Closing fence: a line starting with ---, possibly the very next one
        let end = if rest.starts_with("---") {
            Some(0)
        } else {
            rest.find("\n---").map(|i| i + 1)
        };
        let Some(end) = end else {
            return Ok((Self::default(), content));
        };

        let yaml = &rest[..end];
        let body = rest[end + 3..].trim_start_matches(['\r', '\n']);

        if yaml.trim().is_empty() {
            return Ok((Self::default(), body));
        }

        let fields: IndexMap<String, YamlValue> = serde_yaml::from_str(yaml)?;
        Ok((Self { fields }, body))
    }

    /// The `title` field, when present and a string
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(YamlValue::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&YamlValue> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert to a JSON object safe for payload serialization.
    ///
    /// Date-like strings become RFC 3339 strings. The normalization is a
    /// projection: feeding its output back through produces the same value.
    pub fn to_json(&self) -> JsonValue {
        let map = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), yaml_to_json(value)))
            .collect::<serde_json::Map<String, JsonValue>>();
        JsonValue::Object(map)
    }
}

fn yaml_to_json(value: &YamlValue) -> JsonValue {
    match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(*b),
        YamlValue::Number(n) => serde_json::to_value(n).unwrap_or(JsonValue::Null),
        YamlValue::String(s) => match normalize_date(s) {
            Some(date) => JsonValue::String(date),
            None => JsonValue::String(s.clone()),
        },
        YamlValue::Sequence(seq) => JsonValue::Array(seq.iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(map) => {
            let object = map
                .iter()
                .map(|(k, v)| {
                    let key = k
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| serde_yaml::to_string(k).unwrap_or_default().trim().to_string());
                    (key, yaml_to_json(v))
                })
                .collect::<serde_json::Map<String, JsonValue>>();
            JsonValue::Object(object)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

/// Normalize a date-like scalar to an RFC 3339 string.
///
/// Returns `None` when the string is not a complete date or datetime.
/// Already-normalized strings parse on the RFC 3339 path and round-trip
/// unchanged, which keeps repeated serialization identical.
fn normalize_date(s: &str) -> Option<String> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.to_rfc3339());
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().to_rfc3339());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc).to_rfc3339());
        }
    }

    None
}
