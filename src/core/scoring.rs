use crate::models::{MatchingPreferences, Pet};

/// Every pair starts here before bonuses
pub const BASE_SCORE: i32 = 50;

/// Scores never exceed this cap regardless of stacked bonuses
pub const MAX_SCORE: i32 = 100;

const PERSONALITY_BONUS: i32 = 20;
const BREED_BONUS: i32 = 15;
const PREFERRED_PERSONALITY_BONUS: i32 = 10;
const LOOKING_FOR_BONUS: i32 = 10;

/// Calculate the compatibility score (0-100) between two pets
///
/// Scoring rules:
/// - base 50
/// - +20 if the candidate's personality is in the subject's compatible set
/// - +15 if both breeds are non-empty and equal case-insensitively
/// - +10 if the subject's preferences list the candidate's personality
/// - +10 if the candidate's own preferences share the subject's looking_for
///
/// The preference bonuses apply only when `subject_prefs` is supplied; a
/// candidate without stored preferences contributes 0 to the looking_for
/// rule rather than erroring. Pure and deterministic.
pub fn compatibility_score(
    subject: &Pet,
    candidate: &Pet,
    subject_prefs: Option<&MatchingPreferences>,
    candidate_prefs: Option<&MatchingPreferences>,
) -> u8 {
    let mut score = BASE_SCORE;

    score += personality_bonus(subject, candidate);
    score += breed_bonus(subject, candidate);
    score += preference_bonus(subject_prefs, candidate, candidate_prefs);

    // Current rules have no negative contributions, so only the cap applies
    score.min(MAX_SCORE) as u8
}

/// Personality affinity rule: +20 when the candidate falls in the subject's
/// compatible set
#[inline]
pub fn personality_bonus(subject: &Pet, candidate: &Pet) -> i32 {
    if subject.personality.compatible_with(candidate.personality) {
        PERSONALITY_BONUS
    } else {
        0
    }
}

/// Breed rule: +15 for a case-insensitive match of two non-empty breeds
#[inline]
pub fn breed_bonus(subject: &Pet, candidate: &Pet) -> i32 {
    if !subject.breed.is_empty()
        && !candidate.breed.is_empty()
        && subject.breed.eq_ignore_ascii_case(&candidate.breed)
    {
        BREED_BONUS
    } else {
        0
    }
}

/// Preference rules, applied only when the subject supplied preferences
#[inline]
pub fn preference_bonus(
    subject_prefs: Option<&MatchingPreferences>,
    candidate: &Pet,
    candidate_prefs: Option<&MatchingPreferences>,
) -> i32 {
    let Some(prefs) = subject_prefs else {
        return 0;
    };

    let mut bonus = 0;

    if prefs.preferred_personalities.contains(&candidate.personality) {
        bonus += PREFERRED_PERSONALITY_BONUS;
    }

    if let Some(candidate_prefs) = candidate_prefs {
        if candidate_prefs.looking_for == prefs.looking_for {
            bonus += LOOKING_FOR_BONUS;
        }
    }

    bonus
}
