use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::collections::HashSet;
use validator::Validate;

use crate::core::swipes::creates_match;
use crate::models::{
    DiscoverQuery, DiscoverResponse, HealthResponse, MatchDetail, MatchesResponse, SwipeAction,
    SwipeRequest, SwipeResponse,
};
use crate::routes::{
    bad_request, forbidden, not_found, store_failure, unauthorized, AppState,
};
use crate::services::CacheKey;

/// Configure discovery and matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/discover/{pet_id}", web::get().to(discover))
        .route("/matches", web::get().to(list_matches))
        .route("/{pet_id}/swipe", web::post().to(swipe));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);
    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Discovery feed endpoint
///
/// GET /api/pets/discover/{pet_id}?limit=N
///
/// Returns eligible candidates scored and sorted for the given pet. The pet
/// must belong to the caller; other users' pets read as absent.
async fn discover(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<DiscoverQuery>,
    req: HttpRequest,
) -> impl Responder {
    let identity = match state.auth.identify(&req) {
        Ok(identity) => identity,
        Err(e) => return unauthorized(e),
    };

    if let Err(errors) = query.validate() {
        tracing::info!("Rejected discovery limit: {}", errors);
        return bad_request(errors.to_string());
    }

    let pet_id = path.into_inner();

    let subject = match state.store.get_pet(pet_id).await {
        Ok(Some(pet)) if pet.owner_id == identity.user_id => pet,
        Ok(_) => return not_found(format!("pet {} not found", pet_id)),
        Err(e) => return store_failure(e),
    };

    let subject_prefs = match state.store.get_preferences(pet_id).await {
        Ok(prefs) => prefs,
        Err(e) => return store_failure(e),
    };

    let owned = match state.store.list_pets_by_owner(&identity.user_id).await {
        Ok(pets) => pets.into_iter().map(|p| p.id).collect::<HashSet<i64>>(),
        Err(e) => return store_failure(e),
    };

    let pool = match state.store.get_candidate_pool(&identity.user_id).await {
        Ok(pool) => pool,
        Err(e) => return store_failure(e),
    };

    let swiped = match state.store.get_swiped_ids(pet_id).await {
        Ok(ids) => ids.into_iter().collect::<HashSet<i64>>(),
        Err(e) => return store_failure(e),
    };

    let pool_ids: Vec<i64> = pool.iter().map(|p| p.id).collect();
    let candidate_prefs = match state.store.get_preferences_many(&pool_ids).await {
        Ok(map) => map,
        Err(e) => return store_failure(e),
    };

    let result = state.matcher.discover(
        &subject,
        subject_prefs.as_ref(),
        pool,
        &candidate_prefs,
        &swiped,
        &owned,
        query.limit.map(|l| l as usize),
    );

    tracing::info!(
        "Discovery for pet {}: {} candidates returned (pool of {})",
        pet_id,
        result.candidates.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(DiscoverResponse {
        candidates: result.candidates,
        total_candidates: result.total_candidates,
    })
}

/// Swipe endpoint
///
/// POST /api/pets/{pet_id}/swipe
///
/// Request body:
/// ```json
/// { "swiped_pet_id": 42, "action": "like|dislike|super_like" }
/// ```
///
/// Records the swipe (upsert, last action wins) and reports whether it
/// completed a mutual match.
async fn swipe(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<SwipeRequest>,
    req: HttpRequest,
) -> impl Responder {
    let identity = match state.auth.identify(&req) {
        Ok(identity) => identity,
        Err(e) => return unauthorized(e),
    };

    if let Err(errors) = body.validate() {
        return bad_request(errors.to_string());
    }

    let swiper_id = path.into_inner();

    let swiper = match state.store.get_pet(swiper_id).await {
        Ok(Some(pet)) => pet,
        Ok(None) => return not_found(format!("pet {} not found", swiper_id)),
        Err(e) => return store_failure(e),
    };

    if swiper.owner_id != identity.user_id {
        return forbidden("cannot swipe with a pet you do not own");
    }

    // The candidate filter never offers these pairs; reject them anyway
    if body.swiped_pet_id == swiper_id {
        return bad_request("a pet cannot swipe on itself");
    }

    let swiped = match state.store.get_pet(body.swiped_pet_id).await {
        Ok(Some(pet)) => pet,
        Ok(None) => return not_found(format!("pet {} not found", body.swiped_pet_id)),
        Err(e) => return store_failure(e),
    };

    if swiped.owner_id == identity.user_id {
        return bad_request("cannot swipe on your own pet");
    }

    let action = match SwipeAction::parse(&body.action) {
        Some(action) => action,
        None => {
            return bad_request("action must be one of: like, dislike, super_like");
        }
    };

    let swipe = match state.store.upsert_swipe(swiper.id, swiped.id, action).await {
        Ok(swipe) => swipe,
        Err(e) => return store_failure(e),
    };

    let mut is_match = false;
    let mut matched: Option<MatchDetail> = None;

    // Dislikes never evaluate a match, and never revoke an existing one
    if action.shows_interest() {
        let reciprocal = match state.store.get_swipe(swiped.id, swiper.id).await {
            Ok(swipe) => swipe,
            Err(e) => return store_failure(e),
        };

        if creates_match(action, reciprocal.map(|s| s.action)) {
            let (record, created) = match state.store.get_or_create_match(swiper.id, swiped.id).await
            {
                Ok(result) => result,
                Err(e) => return store_failure(e),
            };

            if created {
                tracing::info!(
                    "New match {} between pets {} and {}",
                    record.id,
                    record.pet1_id,
                    record.pet2_id
                );
                invalidate_match_caches(&state, &swiper.owner_id, &swiped.owner_id).await;
            }

            // Canonical order may differ from swipe direction
            let (pet1, pet2) = if record.pet1_id == swiper.id {
                (swiper.clone(), swiped.clone())
            } else {
                (swiped.clone(), swiper.clone())
            };

            is_match = true;
            matched = Some(MatchDetail::from_parts(record, pet1, pet2));
        }
    }

    HttpResponse::Ok().json(SwipeResponse {
        swipe,
        is_match,
        matched,
    })
}

/// Matches listing endpoint
///
/// GET /api/pets/matches
///
/// Returns every active match touching one of the caller's pets, with both
/// pets' full detail.
async fn list_matches(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let identity = match state.auth.identify(&req) {
        Ok(identity) => identity,
        Err(e) => return unauthorized(e),
    };

    let cache_key = CacheKey::matches(&identity.user_id);
    match state.cache.get::<Vec<MatchDetail>>(&cache_key).await {
        Ok(Some(matches)) => {
            let count = matches.len();
            return HttpResponse::Ok().json(MatchesResponse { matches, count });
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Match cache read failed: {}", e),
    }

    let records = match state.store.matches_for_owner(&identity.user_id).await {
        Ok(records) => records,
        Err(e) => return store_failure(e),
    };

    let pet_ids: Vec<i64> = records
        .iter()
        .flat_map(|m| [m.pet1_id, m.pet2_id])
        .collect();
    let pets = match state.store.get_pets_by_ids(&pet_ids).await {
        Ok(pets) => pets,
        Err(e) => return store_failure(e),
    };

    let matches: Vec<MatchDetail> = records
        .into_iter()
        .filter_map(|record| {
            let pet1 = pets.get(&record.pet1_id)?.clone();
            let pet2 = pets.get(&record.pet2_id)?.clone();
            Some(MatchDetail::from_parts(record, pet1, pet2))
        })
        .collect();

    if let Err(e) = state.cache.set(&cache_key, &matches).await {
        tracing::warn!("Match cache write failed: {}", e);
    }

    let count = matches.len();
    HttpResponse::Ok().json(MatchesResponse { matches, count })
}

/// Drop both owners' cached match lists after a new match forms
async fn invalidate_match_caches(state: &AppState, owner_a: &str, owner_b: &str) {
    for owner in [owner_a, owner_b] {
        if let Err(e) = state.cache.delete(&CacheKey::matches(owner)).await {
            tracing::warn!("Failed to invalidate match cache for {}: {}", owner, e);
        }
    }
}
