use crate::error::{DomainError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix marking a locally-minted identifier of a record that has not yet
/// been confirmed in the remote store.
pub const OFFLINE_PREFIX: &str = "offline_";

/// Identity of a weighing session, tagged with its sync state.
///
/// Older data carries the sync state implicitly in the id string (the
/// `offline_` prefix). That prefix is parsed exactly once, at the serde
/// boundary; everywhere else the variant is the single source of truth.
/// Serialization emits the plain id string again, so queue entries and
/// remote documents keep their original shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionId {
    /// Locally generated `offline_<millis>_<n>` id, pending first sync
    Pending(String),
    /// Opaque id assigned by the remote store
    Synced(String),
}

impl SessionId {
    /// Classify a raw id string by the offline prefix.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::InvalidSessionId(
                "session id cannot be empty".to_string(),
            ));
        }
        if raw.starts_with(OFFLINE_PREFIX) {
            Ok(Self::Pending(raw))
        } else {
            Ok(Self::Synced(raw))
        }
    }

    /// Mint a pending id from a timestamp and a small random suffix.
    pub fn pending(millis: i64, suffix: u32) -> Self {
        Self::Pending(format!("{OFFLINE_PREFIX}{millis}_{suffix}"))
    }

    /// Wrap an id handed back by the remote store.
    pub fn synced(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::InvalidSessionId(
                "remote id cannot be empty".to_string(),
            ));
        }
        if id.starts_with(OFFLINE_PREFIX) {
            return Err(DomainError::InvalidSessionId(format!(
                "remote id {id} carries the offline prefix"
            )));
        }
        Ok(Self::Synced(id))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Get the raw id string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending(s) | Self::Synced(s) => s,
        }
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for SessionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offline_prefix_as_pending() {
        let id = SessionId::parse("offline_171234_7").unwrap();
        assert!(id.is_pending());
        assert_eq!(id.as_str(), "offline_171234_7");
    }

    #[test]
    fn test_parse_plain_id_as_synced() {
        let id = SessionId::parse("abc123").unwrap();
        assert!(!id.is_pending());
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(SessionId::parse("").is_err());
    }

    #[test]
    fn test_pending_mint_shape() {
        let id = SessionId::pending(1712345678901, 42);
        assert!(id.is_pending());
        assert_eq!(id.as_str(), "offline_1712345678901_42");
    }

    #[test]
    fn test_synced_rejects_offline_prefix() {
        assert!(SessionId::synced("offline_1_2").is_err());
        assert!(SessionId::synced("abc123").is_ok());
    }

    #[test]
    fn test_serde_round_trip_keeps_plain_string() {
        let id = SessionId::parse("offline_1_2").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"offline_1_2\"");

        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert!(back.is_pending());
    }

    #[test]
    fn test_display() {
        let id = SessionId::parse("abc123").unwrap();
        assert_eq!(format!("{}", id), "abc123");
    }
}
