use std::collections::HashSet;

use crate::models::Pet;

/// Check whether a pet is eligible to appear in the subject's discovery feed
///
/// A candidate is excluded when it is the subject itself, shares the
/// subject's owner, or has already been swiped on by the subject (any
/// action). Preference fields never affect eligibility, only the score.
#[inline]
pub fn is_eligible(
    subject: &Pet,
    candidate: &Pet,
    swiped_ids: &HashSet<i64>,
    owner_pet_ids: &HashSet<i64>,
) -> bool {
    if candidate.id == subject.id {
        return false;
    }

    // Same-owner pets are excluded even if the owned-id set is stale
    if candidate.owner_id == subject.owner_id || owner_pet_ids.contains(&candidate.id) {
        return false;
    }

    !swiped_ids.contains(&candidate.id)
}

/// Derive the discovery set for a subject pet
///
/// Output order preserves pool order; ranking happens later and relies on
/// that order being stable for equal scores.
pub fn eligible_candidates(
    subject: &Pet,
    pool: Vec<Pet>,
    swiped_ids: &HashSet<i64>,
    owner_pet_ids: &HashSet<i64>,
) -> Vec<Pet> {
    pool.into_iter()
        .filter(|candidate| is_eligible(subject, candidate, swiped_ids, owner_pet_ids))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Personality;

    fn create_pet(id: i64, owner_id: &str) -> Pet {
        Pet {
            id,
            owner_id: owner_id.to_string(),
            name: format!("Pet {}", id),
            breed: String::new(),
            age: String::new(),
            personality: Personality::Calm,
            height: String::new(),
            weight: String::new(),
            description: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_excludes_self() {
        let subject = create_pet(1, "alice");
        let pool = vec![create_pet(1, "alice"), create_pet(2, "bob")];

        let result = eligible_candidates(&subject, pool, &HashSet::new(), &HashSet::new());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn test_excludes_same_owner_pets() {
        let subject = create_pet(1, "alice");
        let pool = vec![
            create_pet(2, "alice"),
            create_pet(3, "bob"),
            create_pet(4, "alice"),
        ];
        let owned: HashSet<i64> = [1, 2, 4].into_iter().collect();

        let result = eligible_candidates(&subject, pool, &HashSet::new(), &owned);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 3);
    }

    #[test]
    fn test_excludes_swiped_pets_regardless_of_action() {
        let subject = create_pet(1, "alice");
        let pool = vec![
            create_pet(2, "bob"),
            create_pet(3, "carol"),
            create_pet(4, "dave"),
        ];
        // Swipe history mixes likes and dislikes; all are excluded alike
        let swiped: HashSet<i64> = [2, 4].into_iter().collect();

        let result = eligible_candidates(&subject, pool, &swiped, &HashSet::new());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 3);
    }

    #[test]
    fn test_same_owner_excluded_without_owned_set() {
        // Owner equality on the pet record is enough
        let subject = create_pet(1, "alice");
        let pool = vec![create_pet(2, "alice")];

        let result = eligible_candidates(&subject, pool, &HashSet::new(), &HashSet::new());

        assert!(result.is_empty());
    }

    #[test]
    fn test_preserves_pool_order() {
        let subject = create_pet(1, "alice");
        let pool = vec![
            create_pet(5, "bob"),
            create_pet(3, "carol"),
            create_pet(9, "dave"),
        ];

        let result = eligible_candidates(&subject, pool, &HashSet::new(), &HashSet::new());

        let ids: Vec<i64> = result.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }
}
