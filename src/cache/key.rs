use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::ContentKind;
use crate::resolver::IdentifierVariant;

/// Composite key identifying one cached value.
///
/// The triple is the uniqueness constraint the backing store enforces: two
/// writes to the same triple target one row, last write wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKey {
    pub entity_type: String,
    pub entity_id: String,
    pub kind: ContentKind,
}

impl ContentKey {
    pub fn new(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        kind: ContentKind,
    ) -> Self {
        ContentKey {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            kind,
        }
    }

    /// Key for one resolver-produced probe candidate.
    pub fn from_variant(variant: &IdentifierVariant, kind: ContentKind) -> Self {
        ContentKey::new(variant.entity_type.clone(), variant.entity_id.clone(), kind)
    }

    /// The `type-id` rendering used when no rawer form of the id is known.
    pub fn canonical_raw(&self) -> String {
        format!("{}-{}", self.entity_type, self.entity_id)
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.entity_type, self.entity_id, self.kind)
    }
}

/// One stored row: key, opaque payload, write timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: ContentKey,
    pub content: Value,
    pub updated_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(key: ContentKey, content: Value, updated_at: DateTime<Utc>) -> Self {
        CacheEntry {
            key,
            content,
            updated_at,
        }
    }

    /// Entry age relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.updated_at
    }

    /// Whether the entry is still inside `window`; `None` never goes stale.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Option<std::time::Duration>) -> bool {
        match window {
            None => true,
            Some(window) => match chrono::Duration::from_std(window) {
                Ok(window) => self.age(now) <= window,
                // windows beyond chrono's range are effectively unbounded
                Err(_) => true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    #[test]
    fn display_joins_the_triple() {
        let key = ContentKey::new("factor", "3", ContentKind::Overview);
        assert_eq!(key.to_string(), "factor/3/overview");
        assert_eq!(key.canonical_raw(), "factor-3");
    }

    #[test]
    fn constructor_arguments_map_to_their_fields() {
        // type and id are both strings; a swap would go unnoticed by the
        // type checker, so pin the orientation here
        let key = ContentKey::new("factor", "3", ContentKind::Overview);
        assert_eq!(key.entity_type, "factor");
        assert_eq!(key.entity_id, "3");
    }

    #[test]
    fn keys_from_variants_keep_orientation() {
        let variant = IdentifierVariant::new("ai", "factor-3");
        let key = ContentKey::from_variant(&variant, ContentKind::Detail);
        assert_eq!(key.entity_type, "ai");
        assert_eq!(key.entity_id, "factor-3");
        assert_eq!(key.kind, ContentKind::Detail);
    }

    #[test]
    fn freshness_window_bounds_the_entry_age() {
        let now = Utc::now();
        let entry = CacheEntry::new(
            ContentKey::new("factor", "3", ContentKind::Overview),
            json!({}),
            now - chrono::Duration::seconds(90),
        );

        assert!(entry.is_fresh(now, None));
        assert!(entry.is_fresh(now, Some(Duration::from_secs(120))));
        assert!(!entry.is_fresh(now, Some(Duration::from_secs(60))));
    }
}
