use serde::{Deserialize, Serialize};

/// Number of audio features per item
pub const FEATURE_DIM: usize = 12;

/// Audio feature names, in vector order
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "danceability",
    "energy",
    "key",
    "loudness",
    "mode",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
    "time_signature",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub key: f64,
    pub loudness: f64,
    pub mode: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
    pub time_signature: f64,
}

impl AudioFeatures {
    /// Layout follows `FEATURE_NAMES`
    pub fn to_vector(&self) -> [f64; FEATURE_DIM] {
        [
            self.danceability,
            self.energy,
            self.key,
            self.loudness,
            self.mode,
            self.speechiness,
            self.acousticness,
            self.instrumentalness,
            self.liveness,
            self.valence,
            self.tempo,
            self.time_signature,
        ]
    }
}

/// One catalog track. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub artist: String,
    #[serde(default)]
    pub album: String,
    pub genre: String,
    pub popularity: f64,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub explicit: bool,
    pub features: AudioFeatures,
}

/// Full ordered item collection; reference for standardization and scoring statistics
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Catalog-wide popularity list, in catalog order
    pub fn popularity_reference(&self) -> Vec<f64> {
        self.items.iter().map(|item| item.popularity).collect()
    }

    /// Catalog-wide genre list, in catalog order
    pub fn genre_reference(&self) -> Vec<String> {
        self.items.iter().map(|item| item.genre.clone()).collect()
    }
}

/// A recommended item with its similarity to the user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub genre: String,
    pub popularity: f64,
    /// Cosine similarity to the profile vector, in [-1, 1]
    pub relevance_score: f64,
}

impl Candidate {
    pub fn from_item(item: &Item, relevance_score: f64) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            artist: item.artist.clone(),
            genre: item.genre.clone(),
            popularity: item.popularity,
            relevance_score,
        }
    }
}

/// Candidate plus its discovery components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub genre_rarity: f64,
    pub long_tail_bonus: f64,
    pub pop_balance_penalty: f64,
    pub discovery_score: f64,
}

impl AsRef<Candidate> for Candidate {
    fn as_ref(&self) -> &Candidate {
        self
    }
}

impl AsRef<Candidate> for ScoredCandidate {
    fn as_ref(&self) -> &Candidate {
        &self.candidate
    }
}

/// Catalog-wide statistics the discovery scorer normalizes against.
///
/// `None` on either field makes the scorer fall back to the candidate set
/// itself, which lets candidates influence their own rarity and tail bonus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceStats {
    pub popularity: Option<Vec<f64>>,
    pub genres: Option<Vec<String>>,
}

impl ReferenceStats {
    /// Candidate-set-local statistics
    pub fn candidate_local() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            popularity: Some(catalog.popularity_reference()),
            genres: Some(catalog.genre_reference()),
        }
    }

    pub fn is_candidate_local(&self) -> bool {
        self.popularity.is_none() && self.genres.is_none()
    }
}

/// Ordered, duplicate-free selection
pub type Playlist = Vec<ScoredCandidate>;
