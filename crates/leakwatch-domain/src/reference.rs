//! Companion foreign-key ids carried in request bodies.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Sentinel for a missing or unusable companion id. Never matches a row.
pub const UNRESOLVED: i64 = -1;

/// A lenient foreign-key id such as `userId` or `agencyId`.
///
/// Accepts a JSON integer or a numeric string. Anything else, including an
/// absent key, becomes [`UNRESOLVED`] so the relation is left unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefId(i64);

impl Default for RefId {
    fn default() -> Self {
        Self(UNRESOLVED)
    }
}

impl RefId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The id to look up, or `None` when no row can match.
    pub fn get(&self) -> Option<i32> {
        i32::try_from(self.0).ok().filter(|id| *id > 0)
    }
}

impl<'de> Deserialize<'de> for RefId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().unwrap_or(UNRESOLVED),
            Value::String(s) => s.trim().parse().unwrap_or(UNRESOLVED),
            _ => UNRESOLVED,
        };
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, rename = "userId")]
        user_id: RefId,
    }

    fn parse(json: &str) -> Option<i32> {
        serde_json::from_str::<Body>(json).unwrap().user_id.get()
    }

    #[test]
    fn should_accept_integer_and_numeric_string() {
        assert_eq!(parse(r#"{"userId":12}"#), Some(12));
        assert_eq!(parse(r#"{"userId":"12"}"#), Some(12));
    }

    #[test]
    fn should_treat_missing_as_unresolved() {
        assert_eq!(parse("{}"), None);
        assert_eq!(parse(r#"{"userId":null}"#), None);
    }

    #[test]
    fn should_treat_garbage_as_unresolved() {
        assert_eq!(parse(r#"{"userId":"abc"}"#), None);
        assert_eq!(parse(r#"{"userId":1.5}"#), None);
        assert_eq!(parse(r#"{"userId":-1}"#), None);
        assert_eq!(parse(r#"{"userId":99999999999}"#), None);
    }
}
