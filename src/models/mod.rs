// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    LookingFor, MatchingPreferences, Personality, Pet, PetMatch, PetSize, ScoredCandidate, Swipe,
    SwipeAction,
};
pub use requests::{
    CreatePetRequest, DiscoverQuery, SwipeRequest, UpdatePetRequest, UpdatePreferencesRequest,
};
pub use responses::{
    DiscoverResponse, ErrorResponse, HealthResponse, MatchDetail, MatchesResponse, SwipeResponse,
};
