//! Domain primitives for cross-catalog identity resolution.
//!
//! Identifiers from the canonical metadata catalog and the streaming provider
//! live in unrelated namespaces, so each gets its own type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an item in the canonical metadata catalog.
///
/// Combined with [`MediaType`] it forms the lookup key of a mapping.
///
/// # Examples
///
/// ```rust
/// use anistream::domain::CatalogId;
///
/// let id = CatalogId::new(500);
/// assert_eq!(id.value(), 500);
/// assert_eq!(id.to_string(), "500");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "i32")]
pub struct CatalogId(i32);

impl CatalogId {
    /// Wraps an id that is already known to be valid, such as a stored row.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `id` is negative. Untrusted input goes
    /// through [`CatalogId::try_from`].
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "CatalogId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for CatalogId {
    type Error = String;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        if id < 0 {
            return Err(format!("catalog id must be non-negative, got {id}"));
        }
        Ok(Self(id))
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CatalogId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

/// Kind of catalog item. Part of the mapping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    #[serde(alias = "tv")]
    Series,
    Movie,
}

impl MediaType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Movie => "movie",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "series" | "tv" => Ok(Self::Series),
            "movie" => Ok(Self::Movie),
            other => Err(format!("Unknown media type: {other}")),
        }
    }
}

/// Verification state of a stored mapping.
///
/// Mappings start unverified. Only an explicit operator action moves them
/// to verified; nothing in the resolution path does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingStatus {
    #[default]
    Unverified,
    Verified,
}

impl MappingStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Verified => "verified",
        }
    }
}

impl fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unverified" => Ok(Self::Unverified),
            "verified" => Ok(Self::Verified),
            other => Err(format!("Unknown mapping status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_id_checked_conversion() {
        let id = CatalogId::try_from(42).unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(CatalogId::try_from(0).unwrap(), CatalogId::new(0));
        assert!(CatalogId::try_from(-1).is_err());
    }

    #[test]
    fn catalog_id_rejects_negative_json() {
        assert!(serde_json::from_str::<CatalogId>("-3").is_err());
        assert_eq!(serde_json::from_str::<CatalogId>("7").unwrap(), CatalogId::new(7));
    }

    #[test]
    fn media_type_accepts_tv_alias() {
        assert_eq!("tv".parse::<MediaType>().unwrap(), MediaType::Series);
        assert_eq!("Movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert!("ova".parse::<MediaType>().is_err());

        let parsed: MediaType = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(parsed, MediaType::Series);
        assert_eq!(serde_json::to_string(&MediaType::Series).unwrap(), "\"series\"");
    }

    #[test]
    fn mapping_status_defaults_to_unverified() {
        assert_eq!(MappingStatus::default(), MappingStatus::Unverified);
        assert_eq!("verified".parse::<MappingStatus>().unwrap(), MappingStatus::Verified);
        assert_eq!(MappingStatus::Verified.to_string(), "verified");
    }
}
