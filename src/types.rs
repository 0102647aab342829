use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub followers: Option<i64>,
    pub popularity: Option<i64>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumKind {
    Album,
    Single,
    Compilation,
}

impl AlbumKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumKind::Album => "album",
            AlbumKind::Single => "single",
            AlbumKind::Compilation => "compilation",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbumRecord {
    pub id: String,
    pub kind: AlbumKind,
    pub name: String,
    pub total_tracks: i64,
    pub available_markets: Vec<String>,
    pub images: Vec<AlbumImage>,
}

/// Per-track numeric descriptors from the audio-analysis endpoint. All
/// fields are optional: the upstream returns null entries for tracks it has
/// not analyzed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub key: Option<i64>,
    pub loudness: Option<f64>,
    pub tempo: Option<f64>,
    pub time_signature: Option<i64>,
    pub instrumentalness: Option<f64>,
    pub acousticness: Option<f64>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub liveness: Option<f64>,
    pub speechiness: Option<f64>,
    pub valence: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackRecord {
    pub id: String,
    pub name: String,
    pub track_number: i64,
    pub duration_ms: Option<i64>,
    pub features: AudioFeatures,
}

/// Everything the ingestion pipeline accumulated for one artist, ready for
/// a single transactional write. Association pairs are (left id, right id)
/// in the column order of their tables.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogBatch {
    pub artist: Artist,
    pub albums: Vec<AlbumRecord>,
    pub tracks: Vec<TrackRecord>,
    pub artist_albums: Vec<(String, String)>,
    pub track_artists: Vec<(String, String)>,
    pub track_albums: Vec<(String, String)>,
}

/// One row of the flat analytics table handed to downstream consumers.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TrackRow {
    pub track_id: String,
    pub track_name: String,
    pub track_number: i64,
    pub album_name: String,
    pub key: Option<i64>,
    pub duration_ms: Option<i64>,
    pub loudness: Option<f64>,
    pub tempo: Option<f64>,
    pub time_signature: Option<i64>,
    pub instrumentalness: Option<f64>,
    pub acousticness: Option<f64>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub liveness: Option<f64>,
    pub speechiness: Option<f64>,
    pub valence: Option<f64>,
}

/// Mean of one normalized feature across a returned table, shaped for
/// radar-chart consumption.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureMean {
    pub feature: &'static str,
    pub value: f64,
}

// --- wire types, one set per upstream endpoint ---

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<ArtistObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    pub followers: Option<FollowersObject>,
    pub popularity: Option<i64>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowersObject {
    pub total: Option<i64>,
}

impl From<ArtistObject> for Artist {
    fn from(obj: ArtistObject) -> Self {
        Artist {
            id: obj.id,
            name: obj.name,
            followers: obj.followers.and_then(|f| f.total),
            popularity: obj.popularity,
            genres: obj.genres,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumsPage {
    pub items: Vec<AlbumObject>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumObject {
    pub id: String,
    pub name: String,
    pub album_type: AlbumKind,
    pub total_tracks: i64,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

impl From<AlbumObject> for AlbumRecord {
    fn from(obj: AlbumObject) -> Self {
        AlbumRecord {
            id: obj.id,
            kind: obj.album_type,
            name: obj.name,
            total_tracks: obj.total_tracks,
            available_markets: obj.available_markets,
            images: obj.images,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumTracksPage {
    pub items: Vec<TrackObject>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    pub track_number: i64,
    pub duration_ms: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}
