//! Lenient deserialization helpers.
//!
//! Rows arrive from a remote store that has drifted over time: ids are
//! sometimes text and sometimes integers, names may be `null`, and enum-like
//! columns can hold values this build does not know. These helpers map such
//! input onto the most restrictive value instead of rejecting the whole row.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum OpaqueToken {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl OpaqueToken {
    fn into_string(self) -> String {
        match self {
            OpaqueToken::Text(s) => s,
            OpaqueToken::Signed(n) => n.to_string(),
            OpaqueToken::Unsigned(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseList {
    Items(Vec<Loose>),
    Other(IgnoredAny),
}

/// Deserialize an id given either as a string or an integer.
///
/// Integers keep their decimal text, so `7` and `"7"` are the same token.
pub fn deserialize_opaque_token<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    OpaqueToken::deserialize(deserializer).map(OpaqueToken::into_string)
}

/// Deserialize an optional id. `null` and `""` both mean "no id".
pub fn deserialize_optional_opaque<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let opt: Option<OpaqueToken> = Option::deserialize(deserializer)?;
    match opt.map(OpaqueToken::into_string) {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => Ok(Some(T::from(s))),
        None => Ok(None),
    }
}

/// Deserialize `null` as `T::default()`.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a string-coded value, mapping anything unparseable to `None`.
pub fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let opt: Option<Loose> = Option::deserialize(deserializer)?;
    Ok(match opt {
        Some(Loose::Text(s)) => s.parse().ok(),
        _ => None,
    })
}

/// Deserialize an optional list of string-coded values.
///
/// `null` (or a non-array) stays `None`. An array stays `Some` even when
/// every entry is dropped as unknown, so "empty list" and "no list" never
/// collapse into each other.
pub fn deserialize_lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let opt: Option<LooseList> = Option::deserialize(deserializer)?;
    Ok(match opt {
        Some(LooseList::Items(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Loose::Text(s) => s.parse().ok(),
                    Loose::Other(_) => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PermissionKey;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "deserialize_opaque_token")]
        id: String,
        #[serde(default, deserialize_with = "deserialize_optional_opaque")]
        parent: Option<String>,
        #[serde(default, deserialize_with = "deserialize_null_default")]
        name: String,
        #[serde(default, deserialize_with = "deserialize_lenient")]
        key: Option<PermissionKey>,
        #[serde(default, deserialize_with = "deserialize_lenient_list")]
        keys: Option<Vec<PermissionKey>>,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_opaque_token_accepts_text_and_integers() {
        assert_eq!(row(r#"{"id":"abc"}"#).id, "abc");
        assert_eq!(row(r#"{"id":42}"#).id, "42");
        assert_eq!(row(r#"{"id":-3}"#).id, "-3");
    }

    #[test]
    fn test_optional_opaque_treats_empty_as_none() {
        assert_eq!(row(r#"{"id":1}"#).parent, None);
        assert_eq!(row(r#"{"id":1,"parent":null}"#).parent, None);
        assert_eq!(row(r#"{"id":1,"parent":""}"#).parent, None);
        assert_eq!(row(r#"{"id":1,"parent":9}"#).parent.as_deref(), Some("9"));
    }

    #[test]
    fn test_null_default() {
        assert_eq!(row(r#"{"id":1,"name":null}"#).name, "");
        assert_eq!(row(r#"{"id":1,"name":"Ann"}"#).name, "Ann");
    }

    #[test]
    fn test_lenient_value() {
        assert_eq!(
            row(r#"{"id":1,"key":"manage_users"}"#).key,
            Some(PermissionKey::ManageUsers)
        );
        assert_eq!(row(r#"{"id":1,"key":"root"}"#).key, None);
        assert_eq!(row(r#"{"id":1,"key":17}"#).key, None);
    }

    #[test]
    fn test_lenient_list_keeps_null_and_empty_apart() {
        assert_eq!(row(r#"{"id":1}"#).keys, None);
        assert_eq!(row(r#"{"id":1,"keys":null}"#).keys, None);
        assert_eq!(row(r#"{"id":1,"keys":[]}"#).keys, Some(vec![]));
        assert_eq!(row(r#"{"id":1,"keys":["bogus",3]}"#).keys, Some(vec![]));
        assert_eq!(row(r#"{"id":1,"keys":"edit_training"}"#).keys, None);
        assert_eq!(
            row(r#"{"id":1,"keys":["edit_training","bogus"]}"#).keys,
            Some(vec![PermissionKey::EditTraining])
        );
    }
}
