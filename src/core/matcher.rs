use std::collections::{HashMap, HashSet};

use crate::core::{filters::eligible_candidates, scoring::compatibility_score};
use crate::models::{MatchingPreferences, Pet, ScoredCandidate};

/// Result of a discovery run
#[derive(Debug)]
pub struct DiscoveryResult {
    pub candidates: Vec<ScoredCandidate>,
    /// Pool size before filtering and truncation
    pub total_candidates: usize,
}

/// Discovery pipeline orchestrator
///
/// # Pipeline stages
/// 1. Candidate filtering (own pets and already-swiped pets drop out)
/// 2. Compatibility scoring against the subject and its preferences
/// 3. Stable descending sort by score (ties keep filter order)
/// 4. Truncation to the requested limit
#[derive(Debug, Clone)]
pub struct Matcher {
    default_limit: usize,
    max_limit: usize,
}

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

impl Matcher {
    pub fn new(default_limit: usize, max_limit: usize) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_LIMIT, MAX_LIMIT)
    }

    /// Resolve a caller-supplied limit against the configured bounds
    ///
    /// Positivity is validated at the request boundary; here the absent case
    /// falls back to the default and everything is capped.
    pub fn resolve_limit(&self, limit: Option<usize>) -> usize {
        limit.unwrap_or(self.default_limit).min(self.max_limit)
    }

    /// Run the full discovery pipeline for a subject pet
    ///
    /// # Arguments
    /// * `subject` - the pet discovery is running for
    /// * `subject_prefs` - the subject's stored preferences, if any
    /// * `pool` - every pet not owned by the subject's owner
    /// * `candidate_prefs` - stored preferences per candidate pet id
    /// * `swiped_ids` - pets the subject has already swiped on
    /// * `owner_pet_ids` - all pets belonging to the subject's owner
    /// * `limit` - validated caller limit, or None for the default
    pub fn discover(
        &self,
        subject: &Pet,
        subject_prefs: Option<&MatchingPreferences>,
        pool: Vec<Pet>,
        candidate_prefs: &HashMap<i64, MatchingPreferences>,
        swiped_ids: &HashSet<i64>,
        owner_pet_ids: &HashSet<i64>,
        limit: Option<usize>,
    ) -> DiscoveryResult {
        let total_candidates = pool.len();
        let limit = self.resolve_limit(limit);

        let mut scored: Vec<ScoredCandidate> =
            eligible_candidates(subject, pool, swiped_ids, owner_pet_ids)
                .into_iter()
                .map(|candidate| {
                    let score = compatibility_score(
                        subject,
                        &candidate,
                        subject_prefs,
                        candidate_prefs.get(&candidate.id),
                    );
                    ScoredCandidate::from_pet(candidate, score)
                })
                .collect();

        // sort_by is stable, so equal scores retain the filter's input order
        scored.sort_by(|a, b| b.compatibility_score.cmp(&a.compatibility_score));
        scored.truncate(limit);

        DiscoveryResult {
            candidates: scored,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
