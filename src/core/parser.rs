//! Parsing of reasoning-service replies into match results.
//!
//! Parsing happens in two stages so each failure mode can be tested on its own:
//! [`extract_json_span`] finds the candidate object inside free text, and
//! [`decode_matches`] strictly decodes and validates it. A single bad item
//! rejects the whole batch.

use serde::Deserialize;
use thiserror::Error;
use crate::models::{Event, MatchResult, MATCH_SCORE_THRESHOLD};

/// Errors raised when a reply cannot be trusted
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("No JSON object found in response")]
    NoJsonObject,

    #[error("Invalid match payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Score {score} for event '{event_name}' is outside 0-100")]
    ScoreOutOfRange { event_name: String, score: f64 },
}

/// One verdict as returned by the reasoning service
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmMatch {
    pub event_name: String,
    pub is_match: bool,
    pub score: f64,
    pub reasons: Vec<String>,
}

impl LlmMatch {
    /// Whether this verdict is strong enough to surface
    pub fn qualifies(&self) -> bool {
        self.is_match && self.score >= f64::from(MATCH_SCORE_THRESHOLD)
    }

    /// Score as an integer; only valid after range validation
    fn rounded_score(&self) -> u8 {
        self.score.round() as u8
    }
}

#[derive(Debug, Deserialize)]
struct MatchPayload {
    matches: Vec<LlmMatch>,
}

/// Find the first balanced top-level `{...}` block in `raw`
///
/// Braces inside JSON string literals are ignored. Returns `None` when there
/// is no opening brace or the first object never closes.
pub fn extract_json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in raw.as_bytes()[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Strictly decode a `{ "matches": [...] }` object and validate every item
pub fn decode_matches(json: &str) -> Result<Vec<LlmMatch>, ParseError> {
    let payload: MatchPayload = serde_json::from_str(json)?;

    if let Some(bad) = payload
        .matches
        .iter()
        .find(|m| !(0.0..=100.0).contains(&m.score))
    {
        return Err(ParseError::ScoreOutOfRange {
            event_name: bad.event_name.clone(),
            score: bad.score,
        });
    }

    Ok(payload.matches)
}

/// Turn a raw reply into match results joined onto the catalog
///
/// Verdicts are joined by exact event name. Every catalog event carrying a
/// name receives the first qualifying verdict for that name, so events that
/// share a name also share a verdict. Verdicts naming unknown events are
/// dropped. Output follows catalog order.
pub fn parse_matches(raw: &str, catalog: &[Event]) -> Result<Vec<MatchResult>, ParseError> {
    let span = extract_json_span(raw).ok_or(ParseError::NoJsonObject)?;
    let verdicts = decode_matches(span)?;

    let qualifying: Vec<&LlmMatch> = verdicts.iter().filter(|v| v.qualifies()).collect();

    for verdict in &qualifying {
        if !catalog.iter().any(|event| event.name == verdict.event_name) {
            tracing::debug!("Dropping verdict for unknown event: {}", verdict.event_name);
        }
    }

    let results = catalog
        .iter()
        .filter_map(|event| {
            qualifying
                .iter()
                .find(|verdict| verdict.event_name == event.name)
                .map(|verdict| {
                    MatchResult::new(event.clone(), verdict.rounded_score(), verdict.reasons.clone())
                })
        })
        .collect();

    Ok(results)
}
