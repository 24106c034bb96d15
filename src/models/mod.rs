// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Event, EventPreferences, MatchResult, MatchSource, Restrictions, TeamBuildingPreferences,
    UserProfile, MATCH_SCORE_THRESHOLD,
};
pub use requests::RecommendationsRequest;
pub use responses::{ErrorResponse, HealthResponse, RecommendationsResponse};
