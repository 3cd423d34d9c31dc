//! StatDelta - sparse signed change to the player's stats.
//!
//! A delta only ever holds non-zero entries. Inserting zero removes the key, and
//! deserialized deltas drop zero entries on the way in, so "no change" is always
//! represented by absence rather than an explicit `0`.
//!
//! Keys are plain strings. The five canonical stats are reached through
//! [`StatKind`] accessors; any other key is an *unrecognized* entry that the
//! pass-through policy preserves and the clamp policy discards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::StatKind;
use crate::DomainError;

/// Signed per-stat changes produced by one conversation turn or training session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")]
pub struct StatDelta {
    changes: BTreeMap<String, i32>,
}

impl StatDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the change for `key`. A zero value removes the entry.
    pub fn insert(&mut self, key: impl Into<String>, value: i32) {
        let key = key.into();
        if value == 0 {
            self.changes.remove(&key);
        } else {
            self.changes.insert(key, value);
        }
    }

    /// Typed variant of [`StatDelta::insert`].
    pub fn insert_stat(&mut self, kind: StatKind, value: i32) {
        self.insert(kind.as_str(), value);
    }

    pub fn with_stat(mut self, kind: StatKind, value: i32) -> Self {
        self.insert_stat(kind, value);
        self
    }

    /// Raw lookup by key, canonical or not.
    pub fn get(&self, key: &str) -> Option<i32> {
        self.changes.get(key).copied()
    }

    /// Change for a canonical stat (0 when absent).
    pub fn get_stat(&self, kind: StatKind) -> i32 {
        self.get(kind.as_str()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.changes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Keys that are not one of the five canonical stats.
    pub fn unrecognized_keys(&self) -> Vec<&str> {
        self.changes
            .keys()
            .filter(|k| k.parse::<StatKind>().is_err())
            .map(String::as_str)
            .collect()
    }

    /// Sum two deltas key by key. Entries that cancel out disappear.
    pub fn merge(&self, other: &StatDelta) -> StatDelta {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            let total = merged.get(key).unwrap_or(0).saturating_add(value);
            merged.insert(key, total);
        }
        merged
    }

    /// Copy restricted to canonical stats, each clipped to its change range.
    pub fn clamped(&self) -> StatDelta {
        let mut clamped = StatDelta::new();
        for (key, value) in self.iter() {
            if let Ok(kind) = key.parse::<StatKind>() {
                clamped.insert_stat(kind, kind.clamp_change(value));
            }
        }
        clamped
    }
}

impl From<BTreeMap<String, i32>> for StatDelta {
    fn from(changes: BTreeMap<String, i32>) -> Self {
        changes.into_iter().collect()
    }
}

impl From<StatDelta> for BTreeMap<String, i32> {
    fn from(delta: StatDelta) -> Self {
        delta.changes
    }
}

impl<K: Into<String>> FromIterator<(K, i32)> for StatDelta {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        let mut delta = StatDelta::new();
        for (key, value) in iter {
            delta.insert(key, value);
        }
        delta
    }
}

impl fmt::Display for StatDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "no change");
        }
        let parts: Vec<String> = self
            .iter()
            .map(|(key, value)| format!("{} {:+}", key, value))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// How raw oracle deltas are normalized before reaching the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeltaPolicy {
    /// Keep every non-zero entry as reported, including unknown keys.
    #[default]
    PassThrough,
    /// Drop unknown keys and clip canonical stats to their change ranges.
    Clamp,
}

impl DeltaPolicy {
    pub fn apply(&self, delta: StatDelta) -> StatDelta {
        match self {
            Self::PassThrough => delta,
            Self::Clamp => delta.clamped(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PassThrough => "pass-through",
            Self::Clamp => "clamp",
        }
    }
}

impl fmt::Display for DeltaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeltaPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pass-through" | "passthrough" | "pass_through" => Ok(Self::PassThrough),
            "clamp" => Ok(Self::Clamp),
            _ => Err(DomainError::parse(format!("Unknown delta policy: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_zero_removes_entry() {
        let mut delta = StatDelta::new().with_stat(StatKind::Mental, 3);
        assert_eq!(delta.len(), 1);

        delta.insert_stat(StatKind::Mental, 0);
        assert!(delta.is_empty());

        delta.insert("speed", 0);
        assert_eq!(delta.get("speed"), None);
    }

    #[test]
    fn test_deserialize_drops_zeros() {
        let delta: StatDelta =
            serde_json::from_str(r#"{"intimacy": 5, "mental": 0, "speed": -2}"#).unwrap();
        assert_eq!(delta.len(), 2);
        assert_eq!(delta.get_stat(StatKind::Intimacy), 5);
        assert_eq!(delta.get_stat(StatKind::Speed), -2);
        assert_eq!(delta.get("mental"), None);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let delta = StatDelta::new()
            .with_stat(StatKind::Power, 5)
            .with_stat(StatKind::Stamina, -2);
        let json = serde_json::to_string(&delta).unwrap();
        assert_eq!(json, r#"{"power":5,"stamina":-2}"#);
    }

    #[test]
    fn test_merge_sums_and_drops_cancelled() {
        let a: StatDelta = [("mental", 3), ("power", 2)].into_iter().collect();
        let b: StatDelta = [("mental", -3), ("speed", 4)].into_iter().collect();

        let merged = a.merge(&b);

        assert_eq!(merged.get("mental"), None);
        assert_eq!(merged.get_stat(StatKind::Power), 2);
        assert_eq!(merged.get_stat(StatKind::Speed), 4);
    }

    #[test]
    fn test_clamped_clips_and_drops_unknown() {
        let delta: StatDelta = [("intimacy", 25), ("speed", -9), ("luck", 3)]
            .into_iter()
            .collect();

        let clamped = delta.clamped();

        assert_eq!(clamped.get_stat(StatKind::Intimacy), 10);
        assert_eq!(clamped.get_stat(StatKind::Speed), -5);
        assert_eq!(clamped.get("luck"), None);
        assert_eq!(clamped.len(), 2);
    }

    #[test]
    fn test_unrecognized_keys() {
        let delta: StatDelta = [("mental", 1), ("charisma", 2)].into_iter().collect();
        assert_eq!(delta.unrecognized_keys(), vec!["charisma"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(StatDelta::new().to_string(), "no change");
        let delta: StatDelta = [("intimacy", 5), ("stamina", -2)].into_iter().collect();
        assert_eq!(delta.to_string(), "intimacy +5, stamina -2");
    }

    #[test]
    fn test_policy_apply() {
        let delta: StatDelta = [("intimacy", 25), ("luck", 3)].into_iter().collect();

        let kept = DeltaPolicy::PassThrough.apply(delta.clone());
        assert_eq!(kept, delta);

        let clamped = DeltaPolicy::Clamp.apply(delta);
        assert_eq!(clamped.get_stat(StatKind::Intimacy), 10);
        assert_eq!(clamped.get("luck"), None);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("clamp".parse::<DeltaPolicy>(), Ok(DeltaPolicy::Clamp));
        assert_eq!(
            "Pass-Through".parse::<DeltaPolicy>(),
            Ok(DeltaPolicy::PassThrough)
        );
        assert_eq!(
            "passthrough".parse::<DeltaPolicy>(),
            Ok(DeltaPolicy::PassThrough)
        );
        assert!("strict".parse::<DeltaPolicy>().is_err());
    }
}
