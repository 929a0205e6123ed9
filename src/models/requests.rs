use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{LookingFor, Personality, PetSize};

fn default_max_distance() -> i32 {
    50
}

fn default_true() -> bool {
    true
}

/// Query parameters for the discovery feed
///
/// A non-numeric `limit` is rejected by the query payload handler before this
/// struct is built; a zero or negative limit fails validation here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscoverQuery {
    #[validate(range(min = 1, message = "limit must be a positive integer"))]
    pub limit: Option<i64>,
}

/// Request body for swiping on another pet
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(range(min = 1))]
    pub swiped_pet_id: i64,
    #[validate(length(min = 1))]
    pub action: String,
}

/// Request body for creating a pet profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePetRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub breed: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub age: String,
    pub personality: Personality,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub height: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub weight: String,
    #[serde(default)]
    pub description: String,
}

/// Request body for updating a pet profile; absent fields keep their value
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePetRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub breed: Option<String>,
    #[validate(length(max = 20))]
    pub age: Option<String>,
    pub personality: Option<Personality>,
    #[validate(length(max = 20))]
    pub height: Option<String>,
    #[validate(length(max = 20))]
    pub weight: Option<String>,
    pub description: Option<String>,
}

/// Request body for explicitly persisting matching preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub looking_for: LookingFor,
    #[serde(default)]
    pub preferred_personalities: Vec<Personality>,
    #[serde(default)]
    pub min_age: Option<i32>,
    #[serde(default)]
    pub max_age: Option<i32>,
    #[serde(default)]
    pub preferred_sizes: Vec<PetSize>,
    #[serde(default = "default_max_distance")]
    pub max_distance: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}
