// Core algorithm exports
pub mod engine;
pub mod heuristic;
pub mod parser;
pub mod prompt;

pub use engine::{rank_matches, RecommendationEngine, RecommendationError, Recommendations};
pub use heuristic::heuristic_match;
pub use parser::{decode_matches, extract_json_span, parse_matches, LlmMatch, ParseError};
pub use prompt::build_prompt;
