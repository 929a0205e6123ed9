use serde::{Deserialize, Serialize};

use crate::models::domain::{Pet, PetMatch, ScoredCandidate, Swipe};

/// Response for the discovery feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub candidates: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// A match hydrated with both pets' full detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDetail {
    pub id: i64,
    pub pet1: Pet,
    pub pet2: Pet,
    pub matched_at: chrono::DateTime<chrono::Utc>,
    pub is_active: bool,
}

impl MatchDetail {
    pub fn from_parts(record: PetMatch, pet1: Pet, pet2: Pet) -> Self {
        Self {
            id: record.id,
            pet1,
            pet2,
            matched_at: record.matched_at,
            is_active: record.is_active,
        }
    }
}

/// Response for the swipe endpoint
///
/// `match` is populated only when the swipe pair is mutually interested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    pub swipe: Swipe,
    pub is_match: bool,
    #[serde(rename = "match")]
    pub matched: Option<MatchDetail>,
}

/// Response for the matches listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<MatchDetail>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
