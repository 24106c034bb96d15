// Shared stubs for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use perk_match::models::{Event, UserProfile};
use perk_match::services::{CatalogError, EventCatalog, ReasoningError, ReasoningService, Sleeper};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Catalog that serves a fixed list, or fails when built with `failing()`
pub struct StubCatalog {
    events: Option<Vec<Event>>,
    calls: AtomicUsize,
}

impl StubCatalog {
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Some(events),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            events: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventCatalog for StubCatalog {
    async fn fetch_events(&self) -> Result<Vec<Event>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.events
            .clone()
            .ok_or_else(|| CatalogError::ApiError(503))
    }
}

/// Reasoning service that replays a script of replies, one per call
pub struct ScriptedReasoner {
    replies: Mutex<VecDeque<Result<String, ReasoningError>>>,
    calls: AtomicUsize,
}

impl ScriptedReasoner {
    pub fn new(replies: Vec<Result<String, ReasoningError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReasoningService for ScriptedReasoner {
    async fn complete(&self, _prompt: &str) -> Result<String, ReasoningError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ReasoningError::EmptyResponse))
    }
}

/// Sleeper that records requested delays instead of waiting
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

pub fn rate_limited() -> Result<String, ReasoningError> {
    Err(ReasoningError::RateLimited("Rate limit reached".to_string()))
}

pub fn create_event(id: &str, name: &str, category: Option<&str>, activities: &[&str]) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        location: "Lisbon".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
        music: vec!["jazz".to_string()],
        activities: activities.iter().map(|a| a.to_string()).collect(),
        category: category.map(|c| c.to_string()),
    }
}

pub fn create_catalog() -> Vec<Event> {
    vec![
        create_event("evt-1", "Alfama Walking Tour", Some("CULTURAL"), &["walking"]),
        create_event("evt-2", "Sintra Hike", Some("OUTDOOR"), &["hiking"]),
        create_event("evt-3", "Fado Dinner", Some("CULTURAL"), &["hiking", "dinner"]),
        create_event("evt-4", "Startup Mixer", Some("BUSINESS"), &["networking"]),
    ]
}

pub fn create_profile() -> UserProfile {
    let mut profile = UserProfile::default();
    profile.name = "Ana".to_string();
    profile.home_location = Some("Porto".to_string());
    profile.event_preferences.categories = vec!["CULTURAL".to_string()];
    profile.event_preferences.preferred_experiences = vec!["hiking".to_string()];
    profile
}
