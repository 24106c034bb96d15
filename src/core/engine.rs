use crate::core::{heuristic::heuristic_match, parser::{parse_matches, ParseError}, prompt::build_prompt};
use crate::models::{Event, MatchResult, MatchSource, UserProfile};
use crate::services::{CatalogError, EventCatalog, ReasoningError, ReasoningService};
use std::sync::Arc;
use thiserror::Error;

/// Failures inside the engine; none of them reach the caller
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("Event catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),

    #[error("Reasoning service failed: {0}")]
    Reasoning(#[from] ReasoningError),

    #[error("Unparsable response: {0}")]
    UnparsableResponse(#[from] ParseError),
}

/// Ranked recommendations and the path that produced them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendations {
    pub matches: Vec<MatchResult>,
    pub source: MatchSource,
}

impl Recommendations {
    fn empty() -> Self {
        Self {
            matches: Vec::new(),
            source: MatchSource::None,
        }
    }
}

/// Recommendation orchestrator
///
/// # Pipeline
/// 1. Fetch the event catalog (unavailable or empty -> no recommendations)
/// 2. Build the matching prompt
/// 3. Ask the reasoning service and parse its verdicts
/// 4. Fall back to the category/activity heuristic on any failure in 3
/// 5. Rank by score
///
/// Stateless between calls and fail-soft: every branch ends in a list.
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<dyn EventCatalog>,
    reasoner: Arc<dyn ReasoningService>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn EventCatalog>, reasoner: Arc<dyn ReasoningService>) -> Self {
        Self { catalog, reasoner }
    }

    /// Ranked recommendations for a profile, empty when nothing can be offered
    pub async fn get_recommended_events(&self, profile: &UserProfile) -> Vec<MatchResult> {
        self.recommend(profile).await.matches
    }

    /// Same as [`Self::get_recommended_events`] but also reports the source
    pub async fn recommend(&self, profile: &UserProfile) -> Recommendations {
        let events = match self.catalog.fetch_events().await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(
                    "Returning no recommendations: {}",
                    RecommendationError::CatalogUnavailable(e)
                );
                return Recommendations::empty();
            }
        };

        if events.is_empty() {
            tracing::debug!("Event catalog is empty, skipping matching");
            return Recommendations::empty();
        }

        let (mut matches, source) = match self.match_with_reasoning(profile, &events).await {
            Ok(matches) => (matches, MatchSource::Reasoning),
            Err(e) => {
                tracing::warn!("Falling back to heuristic matching: {}", e);
                (heuristic_match(profile, &events), MatchSource::Fallback)
            }
        };

        rank_matches(&mut matches);

        tracing::info!(
            "Recommended {} of {} events (source: {:?})",
            matches.len(),
            events.len(),
            source
        );

        Recommendations { matches, source }
    }

    async fn match_with_reasoning(
        &self,
        profile: &UserProfile,
        events: &[Event],
    ) -> Result<Vec<MatchResult>, RecommendationError> {
        let prompt = build_prompt(profile, events);
        let raw = self.reasoner.complete(&prompt).await?;
        Ok(parse_matches(&raw, events)?)
    }
}

/// Sort by score descending; equal scores keep their current order
pub fn rank_matches(matches: &mut [MatchResult]) {
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
}
