//! Collaborative edit locks

use serde::{Deserialize, Serialize};

/// Kind of resource a lock protects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockResourceType {
    Table,
}

/// Editor identity carried by commands and locks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorIdentity {
    pub id: String,
    /// Display name shown to other collaborators
    pub name: String,
}

impl EditorIdentity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Exclusive, time-bounded claim on a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLock {
    pub resource_type: LockResourceType,
    pub resource_id: i64,
    pub owner: EditorIdentity,
    /// Unix millis of first acquisition
    pub acquired_at: i64,
    /// Unix millis of the last renewal
    pub refreshed_at: i64,
    pub ttl_ms: i64,
}

impl ResourceLock {
    pub fn expires_at(&self) -> i64 {
        self.refreshed_at.saturating_add(self.ttl_ms)
    }

    /// An unrenewed lock past its TTL no longer blocks anybody
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at()
    }

    pub fn is_owned_by(&self, editor_id: &str) -> bool {
        self.owner.id == editor_id
    }
}

/// Lock notifications broadcast to the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LockEvent {
    LockAcquired {
        resource_type: LockResourceType,
        resource_id: i64,
        owner_id: String,
        owner_name: String,
    },
    LockDenied {
        resource_type: LockResourceType,
        resource_id: i64,
        /// Editor whose request was refused
        requester_id: String,
        /// Current holder
        owner_name: String,
    },
    LockReleased {
        resource_type: LockResourceType,
        resource_id: i64,
        owner_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lock(refreshed_at: i64) -> ResourceLock {
        ResourceLock {
            resource_type: LockResourceType::Table,
            resource_id: 3,
            owner: EditorIdentity::new("a", "Alice"),
            acquired_at: 0,
            refreshed_at,
            ttl_ms: 1_000,
        }
    }

    #[test]
    fn expiry_is_relative_to_last_refresh() {
        let l = lock(500);
        assert!(!l.is_expired(1_499));
        assert!(l.is_expired(1_500));
        assert!(l.is_owned_by("a"));
        assert!(!l.is_owned_by("b"));
    }

    #[test]
    fn lock_denied_wire_format() {
        let event = LockEvent::LockDenied {
            resource_type: LockResourceType::Table,
            resource_id: 3,
            requester_id: "b".to_string(),
            owner_name: "Alice".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "lock-denied");
        assert_eq!(json["owner_name"], "Alice");
        assert_eq!(json["resource_type"], "table");
    }
}
