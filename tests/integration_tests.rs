// Integration tests for the PawMatch discovery pipeline

use pawmatch::core::swipes::{canonical_pair, creates_match};
use pawmatch::core::Matcher;
use pawmatch::models::{LookingFor, MatchingPreferences, Personality, Pet, SwipeAction};
use std::collections::{HashMap, HashSet};

fn create_pet(id: i64, owner_id: &str, personality: Personality, breed: &str) -> Pet {
    Pet {
        id,
        owner_id: owner_id.to_string(),
        name: format!("Pet {}", id),
        breed: breed.to_string(),
        age: "2 yrs".to_string(),
        personality,
        height: "50 cm".to_string(),
        weight: "20 kg".to_string(),
        description: String::new(),
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn test_end_to_end_discovery() {
    let matcher = Matcher::with_defaults();
    let subject = create_pet(1, "alice", Personality::Playful, "Lab");

    let pool = vec![
        create_pet(2, "alice", Personality::Energetic, "Lab"), // same owner, excluded
        create_pet(3, "bob", Personality::Energetic, "Lab"),   // 85
        create_pet(4, "carol", Personality::Curious, "Lab"),   // 85
        create_pet(5, "dave", Personality::Calm, "Poodle"),    // 50
        create_pet(6, "erin", Personality::Playful, "lab"),    // 85 (case-insensitive breed)
        create_pet(7, "frank", Personality::Gentle, ""),       // 50, already swiped
    ];
    let swiped: HashSet<i64> = [7].into_iter().collect();
    let owned: HashSet<i64> = [1, 2].into_iter().collect();

    let result = matcher.discover(
        &subject,
        None,
        pool,
        &HashMap::new(),
        &swiped,
        &owned,
        None,
    );

    let ids: Vec<i64> = result.candidates.iter().map(|c| c.id).collect();
    // Equal scores keep pool order: 3, 4, 6 all at 85, then 5 at 50
    assert_eq!(ids, vec![3, 4, 6, 5]);
    assert_eq!(result.candidates[0].compatibility_score, 85);
    assert_eq!(result.candidates[3].compatibility_score, 50);
    assert_eq!(result.total_candidates, 6);
}

#[test]
fn test_discovery_with_preferences() {
    let matcher = Matcher::with_defaults();
    let subject = create_pet(1, "alice", Personality::Calm, "");

    let mut subject_prefs = MatchingPreferences::default_for(1);
    subject_prefs.looking_for = LookingFor::Breeding;
    subject_prefs.preferred_personalities = vec![Personality::Energetic];

    // Candidate 3 shares looking_for, candidate 2 has the preferred personality
    let mut prefs_3 = MatchingPreferences::default_for(3);
    prefs_3.looking_for = LookingFor::Breeding;
    let candidate_prefs: HashMap<i64, MatchingPreferences> = [(3, prefs_3)].into();

    let pool = vec![
        create_pet(2, "bob", Personality::Energetic, ""), // 50 + 10 preferred
        create_pet(3, "carol", Personality::Playful, ""), // 50 + 10 looking_for
        create_pet(4, "dave", Personality::Curious, ""),  // 50
    ];

    let result = matcher.discover(
        &subject,
        Some(&subject_prefs),
        pool,
        &candidate_prefs,
        &HashSet::new(),
        &HashSet::new(),
        None,
    );

    let scores: HashMap<i64, u8> = result
        .candidates
        .iter()
        .map(|c| (c.id, c.compatibility_score))
        .collect();
    assert_eq!(scores[&2], 60);
    assert_eq!(scores[&3], 60);
    assert_eq!(scores[&4], 50);
}

#[test]
fn test_default_limit_is_twenty() {
    let matcher = Matcher::with_defaults();
    let subject = create_pet(1, "alice", Personality::Calm, "");

    let pool: Vec<Pet> = (2..=60)
        .map(|id| create_pet(id, "other", Personality::Gentle, ""))
        .collect();

    let result = matcher.discover(
        &subject,
        None,
        pool,
        &HashMap::new(),
        &HashSet::new(),
        &HashSet::new(),
        None,
    );

    assert_eq!(result.candidates.len(), 20);
    assert_eq!(result.total_candidates, 59);
}

#[test]
fn test_requested_limit_is_capped() {
    let matcher = Matcher::with_defaults();
    let subject = create_pet(1, "alice", Personality::Calm, "");

    let pool: Vec<Pet> = (2..=202)
        .map(|id| create_pet(id, "other", Personality::Gentle, ""))
        .collect();

    let result = matcher.discover(
        &subject,
        None,
        pool,
        &HashMap::new(),
        &HashSet::new(),
        &HashSet::new(),
        Some(5000),
    );

    assert_eq!(result.candidates.len(), 100);
}

#[test]
fn test_mutual_super_like_flow() {
    // First swipe: X super-likes Y, no reciprocal yet
    let first = creates_match(SwipeAction::SuperLike, None);
    assert!(!first);

    // Second swipe: Y super-likes X, reciprocal now present
    let second = creates_match(SwipeAction::SuperLike, Some(SwipeAction::SuperLike));
    assert!(second);

    // Both swipe orders canonicalize to the same match pair
    let pair_xy = canonical_pair(10, 4);
    let pair_yx = canonical_pair(4, 10);
    assert_eq!(pair_xy, pair_yx);
    assert_eq!(pair_xy, (4, 10));
}

#[test]
fn test_discovery_shrinks_as_history_grows() {
    let matcher = Matcher::with_defaults();
    let subject = create_pet(1, "alice", Personality::Calm, "");

    let pool: Vec<Pet> = (2..=10)
        .map(|id| create_pet(id, "other", Personality::Gentle, ""))
        .collect();

    let mut swiped = HashSet::new();
    let mut remaining = 9;

    for id in 2..=10 {
        let result = matcher.discover(
            &subject,
            None,
            pool.clone(),
            &HashMap::new(),
            &swiped,
            &HashSet::new(),
            None,
        );
        assert_eq!(result.candidates.len(), remaining);

        swiped.insert(id);
        remaining -= 1;
    }

    // History covers the whole pool: the feed is empty
    let result = matcher.discover(
        &subject,
        None,
        pool,
        &HashMap::new(),
        &swiped,
        &HashSet::new(),
        None,
    );
    assert!(result.candidates.is_empty());
}
