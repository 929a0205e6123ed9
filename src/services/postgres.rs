use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::core::swipes::canonical_pair;
use crate::models::{
    CreatePetRequest, LookingFor, MatchingPreferences, Personality, Pet, PetMatch, PetSize, Swipe,
    SwipeAction, UpdatePetRequest,
};

/// Errors that can occur when interacting with the pet store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid stored value: {0}")]
    InvalidStoredValue(String),
}

/// PostgreSQL-backed store for pets, preferences, swipes, and matches
///
/// All match-state mutations go through `INSERT .. ON CONFLICT` so that two
/// reciprocal swipes racing to create the same canonical match cannot
/// produce duplicates or constraint errors.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new client from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    // ---- pets ----

    pub async fn create_pet(
        &self,
        owner_id: &str,
        request: &CreatePetRequest,
    ) -> Result<Pet, StoreError> {
        let query = r#"
            INSERT INTO pets (owner_id, name, breed, age, personality, height, weight, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
        "#;

        let row = sqlx::query(query)
            .bind(owner_id)
            .bind(&request.name)
            .bind(&request.breed)
            .bind(&request.age)
            .bind(request.personality.as_str())
            .bind(&request.height)
            .bind(&request.weight)
            .bind(&request.description)
            .fetch_one(&self.pool)
            .await?;

        pet_from_row(&row)
    }

    pub async fn get_pet(&self, pet_id: i64) -> Result<Option<Pet>, StoreError> {
        let row = sqlx::query("SELECT * FROM pets WHERE id = $1")
            .bind(pet_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(pet_from_row).transpose()
    }

    pub async fn list_pets_by_owner(&self, owner_id: &str) -> Result<Vec<Pet>, StoreError> {
        let rows = sqlx::query("SELECT * FROM pets WHERE owner_id = $1 ORDER BY created_at DESC")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(pet_from_row).collect()
    }

    pub async fn update_pet(
        &self,
        pet_id: i64,
        request: &UpdatePetRequest,
    ) -> Result<Pet, StoreError> {
        let query = r#"
            UPDATE pets SET
                name = COALESCE($2, name),
                breed = COALESCE($3, breed),
                age = COALESCE($4, age),
                personality = COALESCE($5, personality),
                height = COALESCE($6, height),
                weight = COALESCE($7, weight),
                description = COALESCE($8, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
        "#;

        let row = sqlx::query(query)
            .bind(pet_id)
            .bind(request.name.as_deref())
            .bind(request.breed.as_deref())
            .bind(request.age.as_deref())
            .bind(request.personality.map(|p| p.as_str()))
            .bind(request.height.as_deref())
            .bind(request.weight.as_deref())
            .bind(request.description.as_deref())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("pet {}", pet_id)))?;

        pet_from_row(&row)
    }

    pub async fn delete_pet(&self, pet_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(pet_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetch a batch of pets keyed by id, for hydrating match records
    pub async fn get_pets_by_ids(&self, pet_ids: &[i64]) -> Result<HashMap<i64, Pet>, StoreError> {
        if pet_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query("SELECT * FROM pets WHERE id = ANY($1)")
            .bind(pet_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut map = HashMap::with_capacity(rows.len());
        for row in &rows {
            let pet = pet_from_row(row)?;
            map.insert(pet.id, pet);
        }

        Ok(map)
    }

    /// Every pet not owned by the given user: the raw discovery pool
    pub async fn get_candidate_pool(&self, owner_id: &str) -> Result<Vec<Pet>, StoreError> {
        let rows = sqlx::query("SELECT * FROM pets WHERE owner_id <> $1 ORDER BY id")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(pet_from_row).collect()
    }

    // ---- matching preferences ----

    pub async fn get_preferences(
        &self,
        pet_id: i64,
    ) -> Result<Option<MatchingPreferences>, StoreError> {
        let row = sqlx::query("SELECT * FROM matching_preferences WHERE pet_id = $1")
            .bind(pet_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(preferences_from_row).transpose()
    }

    /// Stored preferences for a batch of pets, keyed by pet id
    ///
    /// Pets without a stored row are simply absent from the map.
    pub async fn get_preferences_many(
        &self,
        pet_ids: &[i64],
    ) -> Result<HashMap<i64, MatchingPreferences>, StoreError> {
        if pet_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query("SELECT * FROM matching_preferences WHERE pet_id = ANY($1)")
            .bind(pet_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut map = HashMap::with_capacity(rows.len());
        for row in &rows {
            let prefs = preferences_from_row(row)?;
            map.insert(prefs.pet_id, prefs);
        }

        Ok(map)
    }

    /// Persist preferences explicitly; the only write path for this table
    pub async fn upsert_preferences(
        &self,
        prefs: &MatchingPreferences,
    ) -> Result<MatchingPreferences, StoreError> {
        let query = r#"
            INSERT INTO matching_preferences
                (pet_id, looking_for, preferred_personalities, min_age, max_age,
                 preferred_sizes, max_distance, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (pet_id)
            DO UPDATE SET
                looking_for = EXCLUDED.looking_for,
                preferred_personalities = EXCLUDED.preferred_personalities,
                min_age = EXCLUDED.min_age,
                max_age = EXCLUDED.max_age,
                preferred_sizes = EXCLUDED.preferred_sizes,
                max_distance = EXCLUDED.max_distance,
                is_active = EXCLUDED.is_active,
                updated_at = NOW()
            RETURNING *
        "#;

        let personalities = serde_json::to_value(&prefs.preferred_personalities)
            .map_err(|e| StoreError::InvalidStoredValue(e.to_string()))?;
        let sizes = serde_json::to_value(&prefs.preferred_sizes)
            .map_err(|e| StoreError::InvalidStoredValue(e.to_string()))?;

        let row = sqlx::query(query)
            .bind(prefs.pet_id)
            .bind(prefs.looking_for.as_str())
            .bind(personalities)
            .bind(prefs.min_age)
            .bind(prefs.max_age)
            .bind(sizes)
            .bind(prefs.max_distance)
            .bind(prefs.is_active)
            .fetch_one(&self.pool)
            .await?;

        preferences_from_row(&row)
    }

    // ---- swipes ----

    /// Record a swipe; re-swiping the same pair overwrites the action
    ///
    /// `created_at` is deliberately not touched on conflict, so the row keeps
    /// the timestamp of the first swipe.
    pub async fn upsert_swipe(
        &self,
        swiper_pet_id: i64,
        swiped_pet_id: i64,
        action: SwipeAction,
    ) -> Result<Swipe, StoreError> {
        let query = r#"
            INSERT INTO swipes (swiper_pet_id, swiped_pet_id, action)
            VALUES ($1, $2, $3)
            ON CONFLICT (swiper_pet_id, swiped_pet_id)
            DO UPDATE SET action = EXCLUDED.action
            RETURNING *
        "#;

        let row = sqlx::query(query)
            .bind(swiper_pet_id)
            .bind(swiped_pet_id)
            .bind(action.as_str())
            .fetch_one(&self.pool)
            .await?;

        swipe_from_row(&row)
    }

    pub async fn get_swipe(
        &self,
        swiper_pet_id: i64,
        swiped_pet_id: i64,
    ) -> Result<Option<Swipe>, StoreError> {
        let row =
            sqlx::query("SELECT * FROM swipes WHERE swiper_pet_id = $1 AND swiped_pet_id = $2")
                .bind(swiper_pet_id)
                .bind(swiped_pet_id)
                .fetch_optional(&self.pool)
                .await?;

        row.as_ref().map(swipe_from_row).transpose()
    }

    /// Ids of every pet the given pet has already swiped on, any action
    pub async fn get_swiped_ids(&self, swiper_pet_id: i64) -> Result<Vec<i64>, StoreError> {
        let rows = sqlx::query("SELECT swiped_pet_id FROM swipes WHERE swiper_pet_id = $1")
            .bind(swiper_pet_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("swiped_pet_id")).collect())
    }

    // ---- matches ----

    /// Get-or-create the canonical match for a pet pair
    ///
    /// Returns the match and whether this call created it. The insert races
    /// safely against a concurrent reciprocal swipe: on conflict nothing is
    /// written and the existing row is read back.
    pub async fn get_or_create_match(
        &self,
        pet_a: i64,
        pet_b: i64,
    ) -> Result<(PetMatch, bool), StoreError> {
        let (pet1_id, pet2_id) = canonical_pair(pet_a, pet_b);

        let inserted = sqlx::query(
            r#"
            INSERT INTO matches (pet1_id, pet2_id)
            VALUES ($1, $2)
            ON CONFLICT (pet1_id, pet2_id) DO NOTHING
            RETURNING *
        "#,
        )
        .bind(pet1_id)
        .bind(pet2_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = inserted {
            return Ok((match_from_row(&row)?, true));
        }

        let row = sqlx::query("SELECT * FROM matches WHERE pet1_id = $1 AND pet2_id = $2")
            .bind(pet1_id)
            .bind(pet2_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((match_from_row(&row)?, false))
    }

    /// All active matches where either side belongs to the owner
    pub async fn matches_for_owner(&self, owner_id: &str) -> Result<Vec<PetMatch>, StoreError> {
        let query = r#"
            SELECT m.*
            FROM matches m
            JOIN pets p1 ON p1.id = m.pet1_id
            JOIN pets p2 ON p2.id = m.pet2_id
            WHERE m.is_active AND (p1.owner_id = $1 OR p2.owner_id = $1)
            ORDER BY m.matched_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(match_from_row).collect()
    }
}

// ---- row mapping ----

fn pet_from_row(row: &PgRow) -> Result<Pet, StoreError> {
    let personality: String = row.get("personality");
    let personality = Personality::parse(&personality)
        .ok_or_else(|| StoreError::InvalidStoredValue(format!("personality '{}'", personality)))?;

    Ok(Pet {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        name: row.get("name"),
        breed: row.get("breed"),
        age: row.get("age"),
        personality,
        height: row.get("height"),
        weight: row.get("weight"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn preferences_from_row(row: &PgRow) -> Result<MatchingPreferences, StoreError> {
    let looking_for: String = row.get("looking_for");
    let looking_for = LookingFor::parse(&looking_for)
        .ok_or_else(|| StoreError::InvalidStoredValue(format!("looking_for '{}'", looking_for)))?;

    let personalities: serde_json::Value = row.get("preferred_personalities");
    let preferred_personalities: Vec<Personality> = serde_json::from_value(personalities)
        .map_err(|e| StoreError::InvalidStoredValue(format!("preferred_personalities: {}", e)))?;

    let sizes: serde_json::Value = row.get("preferred_sizes");
    let preferred_sizes: Vec<PetSize> = serde_json::from_value(sizes)
        .map_err(|e| StoreError::InvalidStoredValue(format!("preferred_sizes: {}", e)))?;

    Ok(MatchingPreferences {
        pet_id: row.get("pet_id"),
        looking_for,
        preferred_personalities,
        min_age: row.get("min_age"),
        max_age: row.get("max_age"),
        preferred_sizes,
        max_distance: row.get("max_distance"),
        is_active: row.get("is_active"),
    })
}

fn swipe_from_row(row: &PgRow) -> Result<Swipe, StoreError> {
    let action: String = row.get("action");
    let action = SwipeAction::parse(&action)
        .ok_or_else(|| StoreError::InvalidStoredValue(format!("action '{}'", action)))?;

    Ok(Swipe {
        swiper_pet_id: row.get("swiper_pet_id"),
        swiped_pet_id: row.get("swiped_pet_id"),
        action,
        created_at: row.get("created_at"),
    })
}

fn match_from_row(row: &PgRow) -> Result<PetMatch, StoreError> {
    Ok(PetMatch {
        id: row.get("id"),
        pet1_id: row.get("pet1_id"),
        pet2_id: row.get("pet2_id"),
        matched_at: row.get("matched_at"),
        is_active: row.get("is_active"),
    })
}

#[cfg(test)]
mod tests {
    use crate::models::{Personality, SwipeAction};

    #[test]
    fn test_stored_enum_strings_round_trip() {
        assert_eq!(Personality::parse("playful"), Some(Personality::Playful));
        assert_eq!(SwipeAction::parse("super_like"), Some(SwipeAction::SuperLike));
        assert_eq!(Personality::parse("PLAYFUL"), None);
    }
}
