use crate::models::SwipeAction;

/// Canonical storage order for a match pair: lower pet id first
///
/// Both swipe directions collapse onto the same pair, which is what makes
/// the unique constraint on matches idempotent.
#[inline]
pub fn canonical_pair(a: i64, b: i64) -> (i64, i64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Decide whether the swipe just recorded completes a mutual match
///
/// A match forms only when the new action shows interest AND a reciprocal
/// swipe with an interested action already exists. Dislikes never trigger
/// match evaluation, even against a prior reciprocal like, and never revoke
/// an existing match.
#[inline]
pub fn creates_match(action: SwipeAction, reciprocal: Option<SwipeAction>) -> bool {
    action.shows_interest() && reciprocal.is_some_and(|r| r.shows_interest())
}
