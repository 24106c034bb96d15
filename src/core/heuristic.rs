use crate::models::{Event, MatchResult, UserProfile};

pub const CATEGORY_REASON: &str = "Category matches user preferences";
pub const ACTIVITY_REASON: &str = "Activities match user preferences";

const SCORE_BOTH: u8 = 80;
const SCORE_EITHER: u8 = 60;

/// Deterministic fallback used when the reasoning service cannot be used
///
/// Only looks at two signals:
/// - the event category is one of the user's preferred categories
/// - one of the event's activities is one of the user's preferred experiences
///
/// Both signals score 80, a single one scores 60, neither drops the event.
/// Budget, distance, restrictions and the rest of the profile are ignored.
/// Results keep catalog order.
pub fn heuristic_match(profile: &UserProfile, catalog: &[Event]) -> Vec<MatchResult> {
    let prefs = &profile.event_preferences;

    catalog
        .iter()
        .filter_map(|event| {
            let category_match = event
                .category
                .as_ref()
                .is_some_and(|category| prefs.categories.contains(category));

            let activity_match = event
                .activities
                .iter()
                .any(|activity| prefs.preferred_experiences.contains(activity));

            let score = match (category_match, activity_match) {
                (true, true) => SCORE_BOTH,
                (true, false) | (false, true) => SCORE_EITHER,
                (false, false) => return None,
            };

            let mut reasons = Vec::with_capacity(2);
            if category_match {
                reasons.push(CATEGORY_REASON.to_string());
            }
            if activity_match {
                reasons.push(ACTIVITY_REASON.to_string());
            }

            Some(MatchResult::new(event.clone(), score, reasons))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_event(name: &str, category: Option<&str>, activities: &[&str]) -> Event {
        Event {
            id: format!("id-{}", name),
            name: name.to_string(),
            location: "Barcelona".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            music: vec![],
            activities: activities.iter().map(|a| a.to_string()).collect(),
            category: category.map(|c| c.to_string()),
        }
    }

    fn create_profile() -> UserProfile {
        let mut profile = UserProfile::default();
        profile.event_preferences.categories = vec!["CULTURAL".to_string()];
        profile.event_preferences.preferred_experiences = vec!["hiking".to_string()];
        profile
    }

    #[test]
    fn test_category_only() {
        let catalog = vec![create_event("Museum Night", Some("CULTURAL"), &["tour"])];
        let matches = heuristic_match(&create_profile(), &catalog);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_score, 60);
        assert_eq!(matches[0].match_reasons, vec![CATEGORY_REASON]);
    }

    #[test]
    fn test_activity_only() {
        let catalog = vec![create_event("Ridge Walk", Some("OUTDOOR"), &["hiking"])];
        let matches = heuristic_match(&create_profile(), &catalog);

        assert_eq!(matches[0].match_score, 60);
        assert_eq!(matches[0].match_reasons, vec![ACTIVITY_REASON]);
    }

    #[test]
    fn test_category_and_activity() {
        let catalog = vec![create_event("Heritage Hike", Some("CULTURAL"), &["hiking"])];
        let matches = heuristic_match(&create_profile(), &catalog);

        assert_eq!(matches[0].match_score, 80);
        assert_eq!(matches[0].match_reasons, vec![CATEGORY_REASON, ACTIVITY_REASON]);
    }

    #[test]
    fn test_no_overlap_excluded() {
        let catalog = vec![
            create_event("Tech Expo", Some("BUSINESS"), &["networking"]),
            create_event("Mystery", None, &[]),
        ];

        assert!(heuristic_match(&create_profile(), &catalog).is_empty());
    }

    #[test]
    fn test_empty_preferences_match_nothing() {
        let catalog = vec![create_event("Heritage Hike", Some("CULTURAL"), &["hiking"])];
        assert!(heuristic_match(&UserProfile::default(), &catalog).is_empty());
    }
}
