use std::fmt;

use serde::{Deserialize, Serialize};

/// Category tag for one cached payload.
///
/// Closed set on purpose: every kind carries its own minimal schema enforced
/// when a payload enters the cache, so adding a kind is a code change with a
/// rule entry, never a free-form runtime string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Short summary shown on list and dashboard surfaces.
    Overview,
    /// Full recommendation body with step-by-step guidance.
    Detail,
    /// Supplementary insight derived from tracked history.
    Insight,
}

impl ContentKind {
    /// All kinds, in display order.
    pub const ALL: [ContentKind; 3] = [
        ContentKind::Overview,
        ContentKind::Detail,
        ContentKind::Insight,
    ];

    /// Stable wire name used in composite keys and store rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Overview => "overview",
            ContentKind::Detail => "detail",
            ContentKind::Insight => "insight",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde_representation() {
        for kind in ContentKind::ALL {
            let encoded = serde_json::to_string(&kind).unwrap();
            assert_eq!(encoded, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn display_uses_the_wire_name() {
        assert_eq!(ContentKind::Overview.to_string(), "overview");
        assert_eq!(ContentKind::Detail.to_string(), "detail");
        assert_eq!(ContentKind::Insight.to_string(), "insight");
    }
}
