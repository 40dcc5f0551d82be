use std::fmt;

use serde::{Deserialize, Serialize};

use super::parse::{normalize_separators, split_route_modifier};
use super::{AI_MARKER, AI_PREFIX, PATH_SEPARATOR};

/// One candidate `(entity_type, entity_id)` pair to probe against the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentifierVariant {
    pub entity_type: String,
    pub entity_id: String,
}

impl IdentifierVariant {
    pub fn new(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        IdentifierVariant {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
        }
    }
}

impl fmt::Display for IdentifierVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity_type, self.entity_id)
    }
}

/// Ordered, deduplicated probe candidates for a parsed pair.
///
/// The canonical pair always comes first. The tail covers every naming scheme
/// older writers used for the same content: the AI-prefixed type, the bare
/// `ai` meta-type with a composite id (hyphenated and slashed), a de-prefixed
/// form when the type already carries the prefix, and literal re-splits of
/// the raw id. Duplicates keep their first position; the list is never empty.
pub fn variant_candidates(rec_type: &str, rec_number: &str, raw_id: &str) -> Vec<IdentifierVariant> {
    let mut out = Vec::with_capacity(8);

    push_unique(&mut out, IdentifierVariant::new(rec_type, rec_number));

    if !rec_type.starts_with(AI_PREFIX) {
        push_unique(
            &mut out,
            IdentifierVariant::new(format!("{AI_PREFIX}{rec_type}"), rec_number),
        );
    }

    push_unique(
        &mut out,
        IdentifierVariant::new(AI_MARKER, format!("{rec_type}-{rec_number}")),
    );

    if let Some(bare) = rec_type.strip_prefix(AI_PREFIX) {
        if !bare.is_empty() {
            push_unique(&mut out, IdentifierVariant::new(bare, rec_number));
        }
    }

    push_unique(
        &mut out,
        IdentifierVariant::new(
            AI_MARKER,
            format!("{rec_type}{PATH_SEPARATOR}{rec_number}"),
        ),
    );

    literal_fallbacks(&mut out, raw_id);
    out
}

fn push_unique(out: &mut Vec<IdentifierVariant>, candidate: IdentifierVariant) {
    if !out.contains(&candidate) {
        out.push(candidate);
    }
}

/// Re-splits the raw id on its own separators, for rows written before
/// canonicalization existed.
fn literal_fallbacks(out: &mut Vec<IdentifierVariant>, raw_id: &str) {
    let (stripped, _) = split_route_modifier(raw_id);
    let raw = normalize_separators(stripped);

    let segments: Vec<&str> = raw
        .split(PATH_SEPARATOR)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.len() >= 2 {
        push_unique(out, IdentifierVariant::new(segments[0], segments[1]));
        push_unique(
            out,
            IdentifierVariant::new(segments[0], segments[1..].join("/")),
        );
    }

    if let Some((ty, id)) = raw.split_once('-') {
        if !ty.is_empty() && !id.is_empty() {
            push_unique(out, IdentifierVariant::new(ty, id));
        }
    }
}
