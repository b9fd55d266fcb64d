use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{BasisError, Result};

/// Which of the two version encodings a schema accepts
///
/// The encodings are mutually exclusive: a configured schema rejects
/// versions written in the other one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionScheme {
    /// Non-negative integer counter starting at 0
    Counter,
    /// `MAJOR.MINOR.PATCH` string; a bump advances PATCH only
    #[default]
    Semantic,
}

impl VersionScheme {
    /// Lowest version a freshly created entity carries
    pub fn initial(&self) -> EntityVersion {
        match self {
            VersionScheme::Counter => EntityVersion::Counter(0),
            VersionScheme::Semantic => EntityVersion::Semantic(SemanticVersion::default().to_string()),
        }
    }
}

fn semver_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$").ok())
        .as_ref()
}

/// Three numeric groups parsed from a `MAJOR.MINOR.PATCH` string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// Whether the string has exactly three dot-separated digit groups
    ///
    /// This is the shape check used at validation time; it does not bound
    /// the magnitude of each group.
    pub fn is_well_formed(raw: &str) -> bool {
        semver_pattern()
            .map(|r| r.is_match(raw))
            .unwrap_or(false)
    }

    /// Parse a version string into its numeric groups
    ///
    /// # Errors
    /// `VersionParse` when the string does not match the pattern or a
    /// group does not fit in a `u64`.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| BasisError::VersionParse {
            version: raw.to_string(),
            reason: reason.to_string(),
        };
        let caps = semver_pattern()
            .and_then(|r| r.captures(raw))
            .ok_or_else(|| invalid("expected MAJOR.MINOR.PATCH"))?;
        let group = |i: usize| {
            caps[i]
                .parse::<u64>()
                .map_err(|_| invalid("version component out of range"))
        };
        Ok(Self {
            major: group(1)?,
            minor: group(2)?,
            patch: group(3)?,
        })
    }

    /// Next revision: PATCH + 1, MAJOR and MINOR unchanged
    ///
    /// # Errors
    /// `VersionParse` if PATCH is already at its maximum.
    pub fn bump_patch(self) -> Result<Self> {
        let patch = self.patch.checked_add(1).ok_or_else(|| BasisError::VersionParse {
            version: self.to_string(),
            reason: "patch component overflow".to_string(),
        })?;
        Ok(Self { patch, ..self })
    }
}

impl std::fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl std::str::FromStr for SemanticVersion {
    type Err = BasisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The `version` field of an entity in either encoding
///
/// Semantic versions keep their original string so validation is
/// non-destructive; they are only parsed when advanced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityVersion {
    Counter(u64),
    Semantic(String),
}

impl EntityVersion {
    pub fn scheme(&self) -> VersionScheme {
        match self {
            EntityVersion::Counter(_) => VersionScheme::Counter,
            EntityVersion::Semantic(_) => VersionScheme::Semantic,
        }
    }

    /// Compute the next revision in the same encoding
    ///
    /// # Errors
    /// `VersionParse` when a semantic string is malformed or a component
    /// would overflow.
    pub fn next(&self) -> Result<EntityVersion> {
        match self {
            EntityVersion::Counter(n) => n
                .checked_add(1)
                .map(EntityVersion::Counter)
                .ok_or_else(|| BasisError::VersionParse {
                    version: n.to_string(),
                    reason: "counter overflow".to_string(),
                }),
            EntityVersion::Semantic(raw) => {
                let next = SemanticVersion::parse(raw)?.bump_patch()?;
                Ok(EntityVersion::Semantic(next.to_string()))
            }
        }
    }
}

impl std::fmt::Display for EntityVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityVersion::Counter(n) => write!(f, "{}", n),
            EntityVersion::Semantic(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_patterns() {
        assert!(SemanticVersion::is_well_formed("1.0.0"));
        assert!(SemanticVersion::is_well_formed("10.20.30"));
        for bad in ["1.0", "1.0.0.0", "v1.0.0", "1.0.0-beta", "1.a.0", "", " 1.0.0", "1.0.0\n"] {
            assert!(!SemanticVersion::is_well_formed(bad), "{bad:?}");
        }
    }

    #[test]
    fn test_bump_patch_only() {
        let next = SemanticVersion::parse("2.3.4").unwrap().bump_patch().unwrap();
        assert_eq!(next.to_string(), "2.3.5");
    }

    #[test]
    fn test_parse_rejects_oversized_component() {
        let err = SemanticVersion::parse("1.0.99999999999999999999999").unwrap_err();
        assert!(matches!(err, BasisError::VersionParse { .. }));
    }

    #[test]
    fn test_counter_next() {
        assert_eq!(EntityVersion::Counter(0).next().unwrap(), EntityVersion::Counter(1));
        assert!(EntityVersion::Counter(u64::MAX).next().is_err());
    }

    #[test]
    fn test_semantic_next_rejects_malformed() {
        let err = EntityVersion::Semantic("not-a-version".to_string())
            .next()
            .unwrap_err();
        assert_eq!(
            err,
            BasisError::VersionParse {
                version: "not-a-version".to_string(),
                reason: "expected MAJOR.MINOR.PATCH".to_string(),
            }
        );
    }

    #[test]
    fn test_initial_versions() {
        assert_eq!(VersionScheme::Counter.initial(), EntityVersion::Counter(0));
        assert_eq!(
            VersionScheme::Semantic.initial(),
            EntityVersion::Semantic("0.0.0".to_string())
        );
    }

    #[test]
    fn test_untagged_serde() {
        let counter: EntityVersion = serde_json::from_str("3").unwrap();
        assert_eq!(counter, EntityVersion::Counter(3));
        let semantic: EntityVersion = serde_json::from_str("\"1.2.3\"").unwrap();
        assert_eq!(semantic.scheme(), VersionScheme::Semantic);
    }
}
