use crate::models::Event;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when reading the event catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Catalog returned status {0}")]
    ApiError(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Source of bookable events
#[async_trait]
pub trait EventCatalog: Send + Sync {
    /// Fetch every bookable event
    async fn fetch_events(&self) -> Result<Vec<Event>, CatalogError>;
}

/// HTTP client for the events listing endpoint
///
/// Expects `GET <events_url>` to answer `{ "events": [...] }`.
pub struct CatalogClient {
    events_url: String,
    client: Client,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(events_url: String, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { events_url, client })
    }

    pub fn events_url(&self) -> &str {
        &self.events_url
    }
}

#[async_trait]
impl EventCatalog for CatalogClient {
    /// A bad status or a body without an `events` array is an error.
    /// Individual events that fail to decode are skipped and the rest kept.
    async fn fetch_events(&self) -> Result<Vec<Event>, CatalogError> {
        tracing::debug!("Fetching event catalog from: {}", self.events_url);

        let response = self.client.get(&self.events_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch events: {} - {}", status, body);
            return Err(CatalogError::ApiError(status.as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(format!("Body is not JSON: {}", e)))?;

        let documents = json
            .get("events")
            .and_then(|events| events.as_array())
            .ok_or_else(|| CatalogError::InvalidResponse("Missing events array".into()))?;

        let events: Vec<Event> = documents
            .iter()
            .filter_map(|doc| match serde_json::from_value(doc.clone()) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!("Skipping malformed catalog event: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} events ({} listed)", events.len(), documents.len());

        Ok(events)
    }
}
