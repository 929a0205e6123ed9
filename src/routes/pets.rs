use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    CreatePetRequest, MatchingPreferences, UpdatePetRequest, UpdatePreferencesRequest,
};
use crate::routes::{bad_request, not_found, store_failure, unauthorized, AppState};

/// Configure pet profile CRUD and preference routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_pets))
        .route("", web::post().to(create_pet))
        .route("/{pet_id}", web::get().to(get_pet))
        .route("/{pet_id}", web::put().to(update_pet))
        .route("/{pet_id}", web::delete().to(delete_pet))
        .route("/{pet_id}/preferences", web::get().to(get_preferences))
        .route("/{pet_id}/preferences", web::put().to(put_preferences));
}

/// List the caller's pets
async fn list_pets(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let identity = match state.auth.identify(&req) {
        Ok(identity) => identity,
        Err(e) => return unauthorized(e),
    };

    match state.store.list_pets_by_owner(&identity.user_id).await {
        Ok(pets) => HttpResponse::Ok().json(pets),
        Err(e) => store_failure(e),
    }
}

/// Create a pet owned by the caller
async fn create_pet(
    state: web::Data<AppState>,
    body: web::Json<CreatePetRequest>,
    req: HttpRequest,
) -> impl Responder {
    let identity = match state.auth.identify(&req) {
        Ok(identity) => identity,
        Err(e) => return unauthorized(e),
    };

    if let Err(errors) = body.validate() {
        return bad_request(errors.to_string());
    }

    match state.store.create_pet(&identity.user_id, &body).await {
        Ok(pet) => {
            tracing::info!("Created pet {} for {}", pet.id, identity.user_id);
            HttpResponse::Created().json(pet)
        }
        Err(e) => store_failure(e),
    }
}

/// Fetch one of the caller's pets; other users' pets read as absent
async fn get_pet(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> impl Responder {
    let identity = match state.auth.identify(&req) {
        Ok(identity) => identity,
        Err(e) => return unauthorized(e),
    };

    let pet_id = path.into_inner();
    match state.store.get_pet(pet_id).await {
        Ok(Some(pet)) if pet.owner_id == identity.user_id => HttpResponse::Ok().json(pet),
        Ok(_) => not_found(format!("pet {} not found", pet_id)),
        Err(e) => store_failure(e),
    }
}

/// Update one of the caller's pets
async fn update_pet(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdatePetRequest>,
    req: HttpRequest,
) -> impl Responder {
    let identity = match state.auth.identify(&req) {
        Ok(identity) => identity,
        Err(e) => return unauthorized(e),
    };

    if let Err(errors) = body.validate() {
        return bad_request(errors.to_string());
    }

    let pet_id = path.into_inner();
    match state.store.get_pet(pet_id).await {
        Ok(Some(pet)) if pet.owner_id == identity.user_id => {}
        Ok(_) => return not_found(format!("pet {} not found", pet_id)),
        Err(e) => return store_failure(e),
    }

    match state.store.update_pet(pet_id, &body).await {
        Ok(pet) => HttpResponse::Ok().json(pet),
        Err(e) => store_failure(e),
    }
}

/// Delete one of the caller's pets; swipes and matches cascade in storage
async fn delete_pet(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> impl Responder {
    let identity = match state.auth.identify(&req) {
        Ok(identity) => identity,
        Err(e) => return unauthorized(e),
    };

    let pet_id = path.into_inner();
    match state.store.get_pet(pet_id).await {
        Ok(Some(pet)) if pet.owner_id == identity.user_id => {}
        Ok(_) => return not_found(format!("pet {} not found", pet_id)),
        Err(e) => return store_failure(e),
    }

    match state.store.delete_pet(pet_id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => not_found(format!("pet {} not found", pet_id)),
        Err(e) => store_failure(e),
    }
}

/// Read matching preferences, falling back to defaults without persisting
///
/// GET /api/pets/{pet_id}/preferences
async fn get_preferences(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> impl Responder {
    let identity = match state.auth.identify(&req) {
        Ok(identity) => identity,
        Err(e) => return unauthorized(e),
    };

    let pet_id = path.into_inner();
    match state.store.get_pet(pet_id).await {
        Ok(Some(pet)) if pet.owner_id == identity.user_id => {}
        Ok(_) => return not_found(format!("pet {} not found", pet_id)),
        Err(e) => return store_failure(e),
    }

    match state.store.get_preferences(pet_id).await {
        Ok(Some(prefs)) => HttpResponse::Ok().json(prefs),
        Ok(None) => HttpResponse::Ok().json(MatchingPreferences::default_for(pet_id)),
        Err(e) => store_failure(e),
    }
}

/// Persist matching preferences explicitly
///
/// PUT /api/pets/{pet_id}/preferences
async fn put_preferences(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdatePreferencesRequest>,
    req: HttpRequest,
) -> impl Responder {
    let identity = match state.auth.identify(&req) {
        Ok(identity) => identity,
        Err(e) => return unauthorized(e),
    };

    let pet_id = path.into_inner();
    match state.store.get_pet(pet_id).await {
        Ok(Some(pet)) if pet.owner_id == identity.user_id => {}
        Ok(_) => return not_found(format!("pet {} not found", pet_id)),
        Err(e) => return store_failure(e),
    }

    if let (Some(min), Some(max)) = (body.min_age, body.max_age) {
        if min > max {
            return bad_request("min_age cannot exceed max_age");
        }
    }

    let prefs = MatchingPreferences {
        pet_id,
        looking_for: body.looking_for,
        preferred_personalities: body.preferred_personalities.clone(),
        min_age: body.min_age,
        max_age: body.max_age,
        preferred_sizes: body.preferred_sizes.clone(),
        max_distance: body.max_distance,
        is_active: body.is_active,
    };

    match state.store.upsert_preferences(&prefs).await {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => store_failure(e),
    }
}
