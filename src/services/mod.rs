// Service exports
pub mod catalog;
pub mod reasoning;
pub mod retry;

pub use catalog::{CatalogClient, CatalogError, EventCatalog};
pub use reasoning::{OpenAiClient, ReasoningError, ReasoningService};
pub use retry::{Retrying, RetryPolicy, Sleeper, TokioSleeper};
