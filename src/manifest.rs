use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::models::LicenseSource;

/// The parts of `package.json` this tool reads.
///
/// Fields of an unexpected type read as absent instead of rejecting the
/// whole manifest.
#[derive(Debug, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(default)]
    pub license: Option<LicenseField>,
    /// Deprecated `licenses: [{ type, url }]` form.
    #[serde(default, deserialize_with = "lenient")]
    pub licenses: Option<Vec<LicenseEntry>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `license` is usually an SPDX string; very old packages use `{ type, url }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LicenseField {
    Expression(String),
    Object(Map<String, Value>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LicenseEntry {
    Object(Map<String, Value>),
    Name(String),
    Other(IgnoredAny),
}

impl LicenseEntry {
    fn kind(&self) -> String {
        match self {
            LicenseEntry::Object(fields) => type_field(fields).unwrap_or_default(),
            LicenseEntry::Name(name) => name.clone(),
            LicenseEntry::Other(_) => String::new(),
        }
    }
}

/// The `type` of a `{ type, url }` license object.
fn type_field(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("type")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl PackageManifest {
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// License declared in the manifest, without looking at any files.
    ///
    /// `license` wins over `licenses`; the array form is joined into an
    /// `A OR B` expression. An empty `license` string, `false` or `0` defers
    /// to `licenses`. A `license` object (or array) without `type` declares
    /// nothing and does not consult `licenses`. A present `licenses` array always yields
    /// a candidate, even an empty one.
    pub fn declared_license(&self) -> Option<(String, LicenseSource)> {
        match &self.license {
            Some(LicenseField::Expression(s)) if !s.is_empty() => {
                return Some((s.clone(), LicenseSource::Manifest));
            }
            Some(LicenseField::Object(fields)) => {
                return type_field(fields).map(|k| (k, LicenseSource::Manifest));
            }
            // an array has no `type` either
            Some(LicenseField::Other(Value::Array(_))) => return None,
            Some(LicenseField::Other(value)) if is_truthy(value) => {
                return Some((value.to_string(), LicenseSource::Manifest));
            }
            _ => {}
        }

        let joined = self
            .licenses
            .as_ref()?
            .iter()
            .map(LicenseEntry::kind)
            .collect::<Vec<_>>()
            .join(" OR ");

        Some((joined, LicenseSource::LegacyArray))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> PackageManifest {
        PackageManifest::parse(json).unwrap()
    }

    #[test]
    fn test_license_string() {
        let m = parse(r#"{ "name": "a", "license": "MIT" }"#);
        assert_eq!(
            m.declared_license(),
            Some(("MIT".to_string(), LicenseSource::Manifest))
        );
    }

    #[test]
    fn test_license_object() {
        let m = parse(r#"{ "name": "a", "license": { "type": "ISC", "url": "https://x" } }"#);
        assert_eq!(
            m.declared_license(),
            Some(("ISC".to_string(), LicenseSource::Manifest))
        );
    }

    #[test]
    fn test_license_wins_over_array() {
        let m = parse(r#"{ "license": "MIT", "licenses": [{ "type": "GPL-3.0" }] }"#);
        assert_eq!(m.declared_license().map(|(l, _)| l), Some("MIT".to_string()));
    }

    #[test]
    fn test_legacy_array_joined() {
        let m = parse(
            r#"{ "name": "a", "licenses": [{ "type": "MIT" }, { "type": "Apache-2.0" }] }"#,
        );
        assert_eq!(
            m.declared_license(),
            Some(("MIT OR Apache-2.0".to_string(), LicenseSource::LegacyArray))
        );
    }

    #[test]
    fn test_legacy_array_of_strings() {
        let m = parse(r#"{ "licenses": ["BSD", "MIT"] }"#);
        assert_eq!(m.declared_license().map(|(l, _)| l), Some("BSD OR MIT".to_string()));
    }

    #[test]
    fn test_empty_values_are_absent() {
        assert_eq!(parse(r#"{ "license": "" }"#).declared_license(), None);
        assert_eq!(parse(r#"{ "license": {} }"#).declared_license(), None);
        assert_eq!(parse(r#"{ "license": false }"#).declared_license(), None);
        assert_eq!(parse(r#"{ "name": "bare" }"#).declared_license(), None);
    }

    #[test]
    fn test_empty_legacy_array_is_an_empty_declaration() {
        assert_eq!(
            parse(r#"{ "licenses": [] }"#).declared_license(),
            Some((String::new(), LicenseSource::LegacyArray))
        );
        assert_eq!(
            parse(r#"{ "licenses": [{ "url": "https://x" }] }"#).declared_license(),
            Some((String::new(), LicenseSource::LegacyArray))
        );
    }

    #[test]
    fn test_license_object_without_type_skips_array() {
        let m = parse(r#"{ "license": {}, "licenses": [{ "type": "MIT" }] }"#);
        assert_eq!(m.declared_license(), None);
    }

    #[test]
    fn test_license_object_with_empty_type_is_declared() {
        let m = parse(r#"{ "license": { "type": "" } }"#);
        assert_eq!(
            m.declared_license(),
            Some((String::new(), LicenseSource::Manifest))
        );
    }

    #[test]
    fn test_mistyped_fields_read_as_absent() {
        let m = parse(r#"{ "name": "y", "license": "MIT", "licenses": { "type": "MIT" } }"#);
        assert_eq!(m.name.as_deref(), Some("y"));
        assert!(m.licenses.is_none());
        assert_eq!(m.declared_license().map(|(l, _)| l), Some("MIT".to_string()));

        let m = parse(r#"{ "name": ["z"], "version": 1, "license": "MIT" }"#);
        assert_eq!(m.name, None);
        assert_eq!(m.version, None);
        assert_eq!(m.declared_license().map(|(l, _)| l), Some("MIT".to_string()));
    }

    #[test]
    fn test_license_array_is_not_an_object() {
        let m = parse(r#"{ "license": ["MIT"], "licenses": [{ "type": "ISC" }] }"#);
        assert_eq!(m.declared_license(), None);
    }

    #[test]
    fn test_non_array_licenses_defers_to_files() {
        let m = parse(r#"{ "licenses": "MIT" }"#);
        assert_eq!(m.declared_license(), None);
    }

    #[test]
    fn test_empty_license_falls_back_to_array() {
        let m = parse(r#"{ "license": "", "licenses": [{ "type": "MIT" }] }"#);
        assert_eq!(
            m.declared_license(),
            Some(("MIT".to_string(), LicenseSource::LegacyArray))
        );
    }
}
