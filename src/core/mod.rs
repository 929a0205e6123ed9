// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod swipes;

pub use filters::{eligible_candidates, is_eligible};
pub use matcher::{DiscoveryResult, Matcher};
pub use scoring::compatibility_score;
pub use swipes::{canonical_pair, creates_match};
