//! PawMatch - pet-profile matching service
//!
//! This library implements the discovery and matching engine for the PawMatch
//! pet app: compatibility scoring, candidate filtering, swipe recording, and
//! mutual-match detection.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compatibility_score, Matcher};
pub use crate::models::{
    MatchingPreferences, Personality, Pet, PetMatch, ScoredCandidate, Swipe, SwipeAction,
};
