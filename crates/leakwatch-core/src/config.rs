//! Environment lookup helpers.
//!
//! Config structs read through a `lookup` closure instead of `std::env`
//! directly, so tests can feed a map without touching process state.

use std::fmt::Display;
use std::str::FromStr;

use anyhow::Context as _;

/// Read a variable from the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Non-empty value of `key`, if any.
pub fn optional(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Parse `key`, falling back to `default` when unset. Malformed values are errors.
pub fn parsed_or<T>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match optional(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| anyhow::anyhow!("{e}"))
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}

/// `true`/`1`/`yes`/`on` (case-insensitive); `default` when unset.
pub fn flag(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> anyhow::Result<bool> {
    match optional(lookup, key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("invalid boolean for {key}: {raw:?}"),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn should_treat_blank_as_unset() {
        let env = lookup(&[("A", "  ")]);
        assert_eq!(optional(&env, "A"), None);
        assert_eq!(optional(&env, "B"), None);
    }

    #[test]
    fn should_parse_or_default() {
        let env = lookup(&[("PORT", "8080")]);
        assert_eq!(parsed_or(&env, "PORT", 1u16).unwrap(), 8080);
        assert_eq!(parsed_or(&env, "OTHER", 1u16).unwrap(), 1);
    }

    #[test]
    fn should_reject_malformed_number() {
        let env = lookup(&[("PORT", "eighty")]);
        let err = parsed_or(&env, "PORT", 1u16).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn should_parse_flags() {
        let env = lookup(&[("ON", "Yes"), ("OFF", "0"), ("BAD", "maybe")]);
        assert!(flag(&env, "ON", false).unwrap());
        assert!(!flag(&env, "OFF", true).unwrap());
        assert!(flag(&env, "UNSET", true).unwrap());
        assert!(flag(&env, "BAD", false).is_err());
    }
}
