// Unit tests for PawMatch core rules

use pawmatch::core::swipes::{canonical_pair, creates_match};
use pawmatch::core::{compatibility_score, eligible_candidates};
use pawmatch::models::{LookingFor, MatchingPreferences, Personality, Pet, SwipeAction};
use std::collections::HashSet;

fn create_pet(id: i64, owner_id: &str, personality: Personality, breed: &str) -> Pet {
    Pet {
        id,
        owner_id: owner_id.to_string(),
        name: format!("Pet {}", id),
        breed: breed.to_string(),
        age: "3 yrs".to_string(),
        personality,
        height: "60 cm".to_string(),
        weight: "30 kg".to_string(),
        description: String::new(),
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn test_score_never_leaves_valid_range() {
    use Personality::*;
    let personalities = [Calm, Playful, Curious, Gentle, Energetic];
    let breeds = ["", "Lab", "lab", "Corgi"];
    let looking = [
        LookingFor::Playmate,
        LookingFor::Adoption,
        LookingFor::Breeding,
        LookingFor::Any,
    ];

    for subject_personality in personalities {
        for candidate_personality in personalities {
            for subject_breed in breeds {
                for candidate_breed in breeds {
                    for looking_for in looking {
                        let subject = create_pet(1, "alice", subject_personality, subject_breed);
                        let candidate =
                            create_pet(2, "bob", candidate_personality, candidate_breed);

                        let mut subject_prefs = MatchingPreferences::default_for(1);
                        subject_prefs.looking_for = looking_for;
                        subject_prefs.preferred_personalities = personalities.to_vec();
                        let mut candidate_prefs = MatchingPreferences::default_for(2);
                        candidate_prefs.looking_for = looking_for;

                        let score = compatibility_score(
                            &subject,
                            &candidate,
                            Some(&subject_prefs),
                            Some(&candidate_prefs),
                        );

                        assert!(score >= 50, "score {} fell below base", score);
                        assert!(score <= 100, "score {} exceeded cap", score);
                    }
                }
            }
        }
    }
}

#[test]
fn test_compatible_pairs_score_exactly_twenty_over_control() {
    use Personality::*;
    let compatible_pairs = [
        (Calm, Calm),
        (Calm, Gentle),
        (Playful, Playful),
        (Playful, Energetic),
        (Playful, Curious),
        (Curious, Curious),
        (Curious, Playful),
        (Gentle, Gentle),
        (Gentle, Calm),
        (Energetic, Energetic),
        (Energetic, Playful),
    ];

    for (subject_personality, candidate_personality) in compatible_pairs {
        let subject = create_pet(1, "alice", subject_personality, "Corgi");
        let candidate = create_pet(2, "bob", candidate_personality, "Husky");
        let score = compatibility_score(&subject, &candidate, None, None);

        // calm vs energetic is the no-bonus control pair
        let control_subject = create_pet(1, "alice", Calm, "Corgi");
        let control_candidate = create_pet(2, "bob", Energetic, "Husky");
        let control = compatibility_score(&control_subject, &control_candidate, None, None);

        assert_eq!(
            score,
            control + 20,
            "{:?} -> {:?}",
            subject_personality,
            candidate_personality
        );
    }
}

#[test]
fn test_playful_lab_vs_energetic_lab_scores_85() {
    let subject = create_pet(1, "alice", Personality::Playful, "Lab");
    let candidate = create_pet(2, "bob", Personality::Energetic, "Lab");

    assert_eq!(compatibility_score(&subject, &candidate, None, None), 85);
}

#[test]
fn test_candidate_filter_excludes_owned_and_swiped_for_any_history() {
    let subject = create_pet(1, "alice", Personality::Calm, "");

    let pool: Vec<Pet> = (2..=20)
        .map(|id| {
            let owner = if id % 5 == 0 { "alice" } else { "other" };
            create_pet(id, owner, Personality::Playful, "")
        })
        .collect();

    // Arbitrary swipe history over part of the pool
    let swiped: HashSet<i64> = [2, 3, 7, 11, 13, 19].into_iter().collect();
    let owned: HashSet<i64> = pool
        .iter()
        .filter(|p| p.owner_id == "alice")
        .map(|p| p.id)
        .chain([1])
        .collect();

    let result = eligible_candidates(&subject, pool, &swiped, &owned);

    for candidate in &result {
        assert_ne!(candidate.id, subject.id);
        assert_ne!(candidate.owner_id, subject.owner_id);
        assert!(!swiped.contains(&candidate.id));
        assert!(!owned.contains(&candidate.id));
    }
    // 19 pets in pool, 4 same-owner, 6 swiped, no overlap between the two
    let expected: usize = (2..=20)
        .filter(|id| id % 5 != 0 && !swiped.contains(id))
        .count();
    assert_eq!(result.len(), expected);
}

#[test]
fn test_swipe_decision_matrix() {
    use SwipeAction::*;

    // Mutual interest forms a match
    assert!(creates_match(Like, Some(Like)));
    assert!(creates_match(SuperLike, Some(SuperLike)));
    assert!(creates_match(Like, Some(SuperLike)));

    // One-sided interest does not
    assert!(!creates_match(Like, None));
    assert!(!creates_match(SuperLike, None));

    // Dislike never evaluates a match
    assert!(!creates_match(Dislike, Some(Like)));
    assert!(!creates_match(Dislike, None));
    assert!(!creates_match(Like, Some(Dislike)));
}

#[test]
fn test_canonical_pair_is_order_independent() {
    assert_eq!(canonical_pair(8, 3), canonical_pair(3, 8));
    assert_eq!(canonical_pair(8, 3), (3, 8));
}
