use serde::{Deserialize, Serialize};

/// Personality tags a pet profile can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Calm,
    Playful,
    Curious,
    Gentle,
    Energetic,
}

impl Personality {
    /// Whether `other` falls inside this personality's compatible set
    ///
    /// The table is symmetric pair-by-pair but not transitive: playful pairs
    /// with curious, curious does not pair with energetic.
    pub fn compatible_with(self, other: Personality) -> bool {
        use Personality::*;
        matches!(
            (self, other),
            (Calm, Calm | Gentle)
                | (Playful, Playful | Energetic | Curious)
                | (Curious, Curious | Playful)
                | (Gentle, Gentle | Calm)
                | (Energetic, Energetic | Playful)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Personality::Calm => "calm",
            Personality::Playful => "playful",
            Personality::Curious => "curious",
            Personality::Gentle => "gentle",
            Personality::Energetic => "energetic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "calm" => Some(Personality::Calm),
            "playful" => Some(Personality::Playful),
            "curious" => Some(Personality::Curious),
            "gentle" => Some(Personality::Gentle),
            "energetic" => Some(Personality::Energetic),
            _ => None,
        }
    }
}

/// What an owner is looking for when matching a pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookingFor {
    Playmate,
    Adoption,
    Breeding,
    Any,
}

impl LookingFor {
    pub fn as_str(self) -> &'static str {
        match self {
            LookingFor::Playmate => "playmate",
            LookingFor::Adoption => "adoption",
            LookingFor::Breeding => "breeding",
            LookingFor::Any => "any",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "playmate" => Some(LookingFor::Playmate),
            "adoption" => Some(LookingFor::Adoption),
            "breeding" => Some(LookingFor::Breeding),
            "any" => Some(LookingFor::Any),
            _ => None,
        }
    }
}

/// Size buckets for preference records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetSize {
    Small,
    Medium,
    Large,
}

/// A pet profile, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub breed: String,
    /// Free text, e.g. "3 yrs"
    #[serde(default)]
    pub age: String,
    pub personality: Personality,
    /// Free text, e.g. "60 cm"
    #[serde(default)]
    pub height: String,
    /// Free text, e.g. "30 kg"
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Matching preferences, one-to-one with a pet
///
/// Reads go through `default_for` when no row exists; nothing is persisted
/// until the owner explicitly writes preferences. The age, size, and distance
/// fields are stored but never applied in filtering or scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingPreferences {
    pub pet_id: i64,
    pub looking_for: LookingFor,
    #[serde(default)]
    pub preferred_personalities: Vec<Personality>,
    #[serde(default)]
    pub min_age: Option<i32>,
    #[serde(default)]
    pub max_age: Option<i32>,
    #[serde(default)]
    pub preferred_sizes: Vec<PetSize>,
    #[serde(default = "default_max_distance")]
    pub max_distance: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl MatchingPreferences {
    /// Default preference values for a pet with no stored row
    pub fn default_for(pet_id: i64) -> Self {
        Self {
            pet_id,
            looking_for: LookingFor::Playmate,
            preferred_personalities: Vec::new(),
            min_age: None,
            max_age: None,
            preferred_sizes: Vec::new(),
            max_distance: default_max_distance(),
            is_active: true,
        }
    }
}

fn default_max_distance() -> i32 {
    50
}

fn default_true() -> bool {
    true
}

/// Swipe actions a pet can take on another pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    Like,
    Dislike,
    SuperLike,
}

impl SwipeAction {
    /// Like and super-like express interest; dislike never does
    pub fn shows_interest(self) -> bool {
        matches!(self, SwipeAction::Like | SwipeAction::SuperLike)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwipeAction::Like => "like",
            SwipeAction::Dislike => "dislike",
            SwipeAction::SuperLike => "super_like",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "like" => Some(SwipeAction::Like),
            "dislike" => Some(SwipeAction::Dislike),
            "super_like" => Some(SwipeAction::SuperLike),
            _ => None,
        }
    }
}

/// A directional swipe, unique per (swiper, swiped) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swipe {
    pub swiper_pet_id: i64,
    pub swiped_pet_id: i64,
    pub action: SwipeAction,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A mutual match, stored canonically with the lower pet id first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetMatch {
    pub id: i64,
    pub pet1_id: i64,
    pub pet2_id: i64,
    pub matched_at: chrono::DateTime<chrono::Utc>,
    pub is_active: bool,
}

/// A discovery candidate with its compatibility score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub age: String,
    pub personality: Personality,
    pub height: String,
    pub weight: String,
    pub description: String,
    pub compatibility_score: u8,
}

impl ScoredCandidate {
    pub fn from_pet(pet: Pet, compatibility_score: u8) -> Self {
        Self {
            id: pet.id,
            name: pet.name,
            breed: pet.breed,
            age: pet.age,
            personality: pet.personality,
            height: pet.height,
            weight: pet.weight,
            description: pet.description,
            compatibility_score,
        }
    }
}
