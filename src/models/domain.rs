use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Minimum score a verdict needs to be surfaced to the user
pub const MATCH_SCORE_THRESHOLD: u8 = 60;

/// Bookable event as served by the event catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(deserialize_with = "deserialize_event_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub music: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Parse a catalog date, accepting either a plain calendar date or an
/// RFC 3339 timestamp (the catalog stores midnight UTC timestamps).
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn deserialize_event_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_event_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid event date: {}", raw)))
}

/// Everything a user told us about themselves during onboarding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub home_location: Option<String>,
    #[serde(default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub event_preferences: EventPreferences,
    #[serde(default)]
    pub team_building: Option<TeamBuildingPreferences>,
    #[serde(default)]
    pub restrictions: Option<Restrictions>,
    /// Date -> free-text status ("free", "busy after 6pm", ...)
    #[serde(default)]
    pub calendar_availability: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPreferences {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub vibe_keywords: Vec<String>,
    #[serde(default)]
    pub ideal_time_slots: Vec<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub preferred_group_type: Option<String>,
    #[serde(default)]
    pub preferred_group_size: Option<String>,
    /// Kilometres the user is willing to travel
    #[serde(default)]
    pub max_travel_distance: Option<u32>,
    #[serde(default)]
    pub preferred_experiences: Vec<String>,
    #[serde(default)]
    pub preferred_destinations: Vec<String>,
    #[serde(default)]
    pub seasonal_preferences: Vec<String>,
    #[serde(default)]
    pub blocked_dates: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamBuildingPreferences {
    #[serde(default)]
    pub preferred_activities: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub suggestions: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restrictions {
    #[serde(default)]
    pub avoid_family_kids_events: bool,
    #[serde(default)]
    pub avoid_crowded_daytime_conferences: bool,
    #[serde(default)]
    pub avoid_overly_formal_networking: bool,
}

impl Restrictions {
    /// Human-readable list of the restrictions that are switched on
    pub fn active(&self) -> Vec<&'static str> {
        let mut active = Vec::new();
        if self.avoid_family_kids_events {
            active.push("Avoid family/kids events");
        }
        if self.avoid_crowded_daytime_conferences {
            active.push("Avoid crowded daytime conferences");
        }
        if self.avoid_overly_formal_networking {
            active.push("Avoid overly formal networking");
        }
        active
    }
}

/// Recommended event with its score and the reasons behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(flatten)]
    pub event: Event,
    pub match_score: u8,
    pub match_reasons: Vec<String>,
}

impl MatchResult {
    pub fn new(event: Event, match_score: u8, match_reasons: Vec<String>) -> Self {
        Self {
            event,
            match_score,
            match_reasons,
        }
    }
}

/// Which path produced a recommendation list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    /// Verdicts came from the reasoning service
    Reasoning,
    /// Reasoning service failed, deterministic heuristic used instead
    Fallback,
    /// Catalog unavailable or empty, nothing to rank
    None,
}
