//! Prompt construction for the reasoning service.
//!
//! Every profile field is rendered, empty ones as [`NOT_SPECIFIED`], so two
//! calls with the same input always produce the same prompt.

use crate::models::{Event, UserProfile, MATCH_SCORE_THRESHOLD};

pub const NOT_SPECIFIED: &str = "Not specified";

/// System instruction sent alongside every prompt
pub const SYSTEM_INSTRUCTION: &str = "\
You are an event matcher for a corporate travel perks platform. \
You compare a user's profile with a list of events and decide which events suit them. \
You MUST respond with a single valid JSON object only, no markdown fences and no commentary.";

const RESPONSE_CONTRACT: &str = r#"Respond with JSON in exactly this shape:
{
  "matches": [
    {
      "eventName": "exact event name from the list above",
      "isMatch": true,
      "score": 85,
      "reasons": ["short reason", "another short reason"]
    }
  ]
}"#;

/// Build the matching prompt for a profile and the candidate events
pub fn build_prompt(profile: &UserProfile, events: &[Event]) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(
        "Match the following user with the events that fit their profile and preferences."
            .to_string(),
    );
    lines.push(String::new());

    lines.push("AVAILABLE EVENTS:".to_string());
    for (index, event) in events.iter().enumerate() {
        lines.push(format!("{}. Name: {}", index + 1, event.name));
        lines.push(format!("   Location: {}", text_or_placeholder(&event.location)));
        lines.push(format!("   Date: {}", event.date.format("%Y-%m-%d")));
        lines.push(format!("   Category: {}", opt_or_placeholder(event.category.as_deref())));
        lines.push(format!("   Music: {}", list_or_placeholder(&event.music)));
        lines.push(format!("   Activities: {}", list_or_placeholder(&event.activities)));
    }
    lines.push(String::new());

    lines.push("USER PROFILE:".to_string());
    lines.push(format!("Name: {}", text_or_placeholder(&profile.name)));
    lines.push(format!("Home location: {}", opt_or_placeholder(profile.home_location.as_deref())));
    lines.push(format!(
        "Current travel location: {}",
        opt_or_placeholder(profile.current_location.as_deref())
    ));
    lines.push(format!("Languages: {}", list_or_placeholder(&profile.languages)));
    lines.push(format!("Personality traits: {}", list_or_placeholder(&profile.personality_traits)));
    lines.push(format!("Goals: {}", list_or_placeholder(&profile.goals)));
    lines.push(format!("Hobbies: {}", list_or_placeholder(&profile.hobbies)));
    lines.push(String::new());

    let prefs = &profile.event_preferences;
    lines.push("EVENT PREFERENCES:".to_string());
    lines.push(format!("Preferred categories: {}", list_or_placeholder(&prefs.categories)));
    lines.push(format!("Vibe keywords: {}", list_or_placeholder(&prefs.vibe_keywords)));
    lines.push(format!("Ideal time slots: {}", list_or_placeholder(&prefs.ideal_time_slots)));
    lines.push(format!("Budget: {}", opt_or_placeholder(prefs.budget.as_deref())));
    lines.push(format!(
        "Preferred group type: {}",
        opt_or_placeholder(prefs.preferred_group_type.as_deref())
    ));
    lines.push(format!(
        "Preferred group size: {}",
        opt_or_placeholder(prefs.preferred_group_size.as_deref())
    ));
    lines.push(format!(
        "Max travel distance: {}",
        prefs
            .max_travel_distance
            .map(|km| format!("{} km", km))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string())
    ));
    lines.push(format!(
        "Preferred experiences: {}",
        list_or_placeholder(&prefs.preferred_experiences)
    ));
    lines.push(format!(
        "Preferred destinations: {}",
        list_or_placeholder(&prefs.preferred_destinations)
    ));
    lines.push(format!(
        "Seasonal preferences: {}",
        list_or_placeholder(&prefs.seasonal_preferences)
    ));
    lines.push(format!("Blocked dates: {}", list_or_placeholder(&prefs.blocked_dates)));
    lines.push(String::new());

    lines.push("TEAM BUILDING PREFERENCES:".to_string());
    match &profile.team_building {
        Some(team) => {
            lines.push(format!(
                "Preferred activities: {}",
                list_or_placeholder(&team.preferred_activities)
            ));
            lines.push(format!("Location: {}", opt_or_placeholder(team.location.as_deref())));
            lines.push(format!("Duration: {}", opt_or_placeholder(team.duration.as_deref())));
            lines.push(format!("Suggestions: {}", opt_or_placeholder(team.suggestions.as_deref())));
        }
        None => lines.push(NOT_SPECIFIED.to_string()),
    }
    lines.push(String::new());

    lines.push("RESTRICTIONS:".to_string());
    let active = profile
        .restrictions
        .map(|r| r.active())
        .unwrap_or_default();
    if active.is_empty() {
        lines.push(NOT_SPECIFIED.to_string());
    } else {
        lines.extend(active.into_iter().map(|r| format!("- {}", r)));
    }
    lines.push(String::new());

    lines.push("CALENDAR AVAILABILITY:".to_string());
    if profile.calendar_availability.is_empty() {
        lines.push(NOT_SPECIFIED.to_string());
    } else {
        lines.extend(
            profile
                .calendar_availability
                .iter()
                .map(|(date, status)| format!("{}: {}", date, status)),
        );
    }
    lines.push(String::new());

    lines.push("INSTRUCTIONS:".to_string());
    lines.push(
        "Score every event from 0 to 100 for this user, weighing categories, vibe, budget, \
         group preferences, travel distance, restrictions, blocked dates and availability."
            .to_string(),
    );
    lines.push(format!(
        "Set isMatch to true only when the score is {} or higher.",
        MATCH_SCORE_THRESHOLD
    ));
    lines.push("Use the event name exactly as written in the list.".to_string());
    lines.push(RESPONSE_CONTRACT.to_string());

    lines.join("\n")
}

fn text_or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

fn opt_or_placeholder(value: Option<&str>) -> &str {
    value.map(text_or_placeholder).unwrap_or(NOT_SPECIFIED)
}

fn list_or_placeholder(items: &[String]) -> String {
    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Restrictions, TeamBuildingPreferences};
    use chrono::NaiveDate;

    fn create_event() -> Event {
        Event {
            id: "evt-1".to_string(),
            name: "Fado Evening".to_string(),
            location: "Lisbon".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 3).unwrap(),
            music: vec!["fado".to_string(), "acoustic".to_string()],
            activities: vec!["dinner".to_string()],
            category: Some("CULTURAL".to_string()),
        }
    }

    #[test]
    fn test_lists_every_event() {
        let mut second = create_event();
        second.name = "Surf Camp".to_string();
        second.category = None;

        let prompt = build_prompt(&UserProfile::default(), &[create_event(), second]);

        assert!(prompt.contains("1. Name: Fado Evening"));
        assert!(prompt.contains("Date: 2025-10-03"));
        assert!(prompt.contains("Music: fado, acoustic"));
        assert!(prompt.contains("2. Name: Surf Camp"));
        assert!(prompt.contains("Category: Not specified"));
    }

    #[test]
    fn test_empty_profile_uses_placeholders() {
        let prompt = build_prompt(&UserProfile::default(), &[create_event()]);

        assert!(prompt.contains("Name: Not specified"));
        assert!(prompt.contains("Languages: Not specified"));
        assert!(prompt.contains("Budget: Not specified"));
        assert!(prompt.contains("Max travel distance: Not specified"));
        assert!(prompt.contains("Blocked dates: Not specified"));
        assert!(prompt.contains("TEAM BUILDING PREFERENCES:\nNot specified"));
        assert!(prompt.contains("RESTRICTIONS:\nNot specified"));
        assert!(prompt.contains("CALENDAR AVAILABILITY:\nNot specified"));
    }

    #[test]
    fn test_populated_profile_fields() {
        let mut profile = UserProfile::default();
        profile.name = "Ana".to_string();
        profile.languages = vec!["Portuguese".to_string(), "English".to_string()];
        profile.event_preferences.max_travel_distance = Some(50);
        profile.team_building = Some(TeamBuildingPreferences {
            preferred_activities: vec!["cooking".to_string()],
            location: Some("outdoor".to_string()),
            duration: None,
            suggestions: None,
        });
        profile.restrictions = Some(Restrictions {
            avoid_family_kids_events: true,
            ..Default::default()
        });
        profile
            .calendar_availability
            .insert("2025-10-03".to_string(), "free".to_string());

        let prompt = build_prompt(&profile, &[create_event()]);

        assert!(prompt.contains("Name: Ana"));
        assert!(prompt.contains("Languages: Portuguese, English"));
        assert!(prompt.contains("Max travel distance: 50 km"));
        assert!(prompt.contains("Preferred activities: cooking"));
        assert!(prompt.contains("Duration: Not specified"));
        assert!(prompt.contains("- Avoid family/kids events"));
        assert!(prompt.contains("2025-10-03: free"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let mut profile = UserProfile::default();
        profile
            .calendar_availability
            .insert("2025-10-04".to_string(), "busy".to_string());
        profile
            .calendar_availability
            .insert("2025-10-03".to_string(), "free".to_string());

        let first = build_prompt(&profile, &[create_event()]);
        let second = build_prompt(&profile, &[create_event()]);

        assert_eq!(first, second);
        assert!(first.find("2025-10-03: free").unwrap() < first.find("2025-10-04: busy").unwrap());
    }

    #[test]
    fn test_states_response_contract() {
        let prompt = build_prompt(&UserProfile::default(), &[create_event()]);

        assert!(prompt.contains("\"matches\""));
        assert!(prompt.contains("\"eventName\""));
        assert!(prompt.contains("score is 60 or higher"));
    }
}
