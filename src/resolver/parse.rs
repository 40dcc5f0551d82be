use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::variants::{variant_candidates, IdentifierVariant};
use super::{AI_MARKER, AI_PREFIX, ANALYSIS_NAMESPACE, DEFAULT_NUMBER, DEFAULT_TYPE, PATH_SEPARATOR};

/// Trailing marker selecting an alternate presentation mode.
///
/// Stripped before parsing and handed back to the caller as a value; it never
/// influences the parsed type or number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteModifier {
    /// The `__test` suffix used by preview and testing routes.
    Test,
}

/// Suffix literal for [`RouteModifier::Test`].
const TEST_SUFFIX: &str = "__test";

/// Canonical decomposition of a raw recommendation id.
///
/// Both fields are always non-empty: when the raw input yields nothing
/// usable, the default pair `recommendation` / `1` is substituted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedIdentifier {
    pub recommendation_type: String,
    pub recommendation_number: String,
}

impl ParsedIdentifier {
    fn new(
        recommendation_type: impl Into<String>,
        recommendation_number: impl Into<String>,
    ) -> Self {
        ParsedIdentifier {
            recommendation_type: recommendation_type.into(),
            recommendation_number: recommendation_number.into(),
        }
    }

    fn fallback() -> Self {
        ParsedIdentifier::new(DEFAULT_TYPE, DEFAULT_NUMBER)
    }

    /// The canonical `type-number` rendering of this pair.
    pub fn canonical_id(&self) -> String {
        format!("{}-{}", self.recommendation_type, self.recommendation_number)
    }

    /// Ordered cache-probe candidates for this pair, enriched with literal
    /// re-splits of `raw_id`.
    pub fn variants(&self, raw_id: &str) -> Vec<IdentifierVariant> {
        variant_candidates(
            &self.recommendation_type,
            &self.recommendation_number,
            raw_id,
        )
    }
}

/// Splits a trailing route modifier off `raw`, returning the remainder and
/// the modifier, if any.
pub fn split_route_modifier(raw: &str) -> (&str, Option<RouteModifier>) {
    match raw.strip_suffix(TEST_SUFFIX) {
        Some(rest) => (rest, Some(RouteModifier::Test)),
        None => (raw, None),
    }
}

/// Replaces URL-encoded path separators with literal ones.
pub(super) fn normalize_separators(id: &str) -> Cow<'_, str> {
    if id.contains("%2F") || id.contains("%2f") {
        Cow::Owned(id.replace("%2F", "/").replace("%2f", "/"))
    } else {
        Cow::Borrowed(id)
    }
}

/// Parses a raw recommendation id into its canonical `(type, number)` pair.
///
/// Total over all string inputs. Recognized shapes, first match wins:
///
/// 1. `..ai-analysis/<type>/<number>..` — namespaced analysis path
/// 2. `<type>/<number>` or `/<type>/<number>` — plain path (URL-encoded
///    separators accepted, empty segments skipped, missing number → `"1"`)
/// 3. `ai-<type>-<number>` / `ai-<type>` — AI-prefixed form; the number may
///    itself contain hyphens
/// 4. `<type>-<number>` — canonical form (idempotent: re-parsing a
///    [`ParsedIdentifier::canonical_id`] reproduces the pair)
/// 5. `ai` — bare marker, parsed as `("ai", "1")`
/// 6. `<type>` — the whole id, number defaults to `"1"`
///
/// A trailing route modifier is stripped first and never affects the result.
/// Anything unusable falls back to `("recommendation", "1")` with a warning.
pub fn parse_recommendation_id(raw_id: &str) -> ParsedIdentifier {
    let (stripped, _modifier) = split_route_modifier(raw_id);
    let id = normalize_separators(stripped);

    if let Some(parsed) = parse_namespaced(&id) {
        return parsed;
    }

    if id.contains(PATH_SEPARATOR) {
        return match parse_path(&id) {
            Some(parsed) => parsed,
            None => ambiguous(raw_id),
        };
    }

    if let Some(rest) = id.strip_prefix(AI_PREFIX) {
        return parse_prefixed(rest, raw_id);
    }

    if let Some((ty, number)) = id.split_once('-') {
        if ty.is_empty() {
            return ambiguous(raw_id);
        }
        let number = if number.is_empty() { DEFAULT_NUMBER } else { number };
        return ParsedIdentifier::new(ty, number);
    }

    if id == AI_MARKER {
        return ParsedIdentifier::new(AI_MARKER, DEFAULT_NUMBER);
    }

    if !id.is_empty() {
        return ParsedIdentifier::new(id, DEFAULT_NUMBER);
    }

    ambiguous(raw_id)
}

/// `..ai-analysis/<type>/<number>..` — anything before the namespace is
/// ignored; at least two non-empty segments must follow it.
fn parse_namespaced(id: &str) -> Option<ParsedIdentifier> {
    let (_, after) = id.split_once(ANALYSIS_NAMESPACE)?;
    let mut segments = after.split(PATH_SEPARATOR).filter(|s| !s.is_empty());
    let ty = segments.next()?;
    let number = segments.next()?;
    Some(ParsedIdentifier::new(ty, number))
}

/// `<type>/<number>` with empty segments skipped; a lone segment gets the
/// default number.
fn parse_path(id: &str) -> Option<ParsedIdentifier> {
    let mut segments = id.split(PATH_SEPARATOR).filter(|s| !s.is_empty());
    let ty = segments.next()?;
    let number = segments.next().unwrap_or(DEFAULT_NUMBER);
    Some(ParsedIdentifier::new(ty, number))
}

/// Remainder after the `ai-` prefix: split on the first hyphen, keeping any
/// further hyphens inside the number.
fn parse_prefixed(rest: &str, raw_id: &str) -> ParsedIdentifier {
    if rest.is_empty() {
        return ambiguous(raw_id);
    }
    match rest.split_once('-') {
        Some((ty, number)) if !ty.is_empty() && !number.is_empty() => {
            ParsedIdentifier::new(ty, number)
        }
        Some((ty, _)) if !ty.is_empty() => ParsedIdentifier::new(ty, DEFAULT_NUMBER),
        Some(_) => ambiguous(raw_id),
        None => ParsedIdentifier::new(rest, DEFAULT_NUMBER),
    }
}

fn ambiguous(raw_id: &str) -> ParsedIdentifier {
    tracing::warn!(raw_id, "unrecognized recommendation id, using default pair");
    ParsedIdentifier::fallback()
}
