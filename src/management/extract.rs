use crate::{
    error::Result,
    store::CatalogStore,
    types::{FeatureMean, TrackRow},
};

/// The seven normalized [0,1] features averaged for the radar chart.
const NORMALIZED_FEATURES: [&str; 7] = [
    "instrumentalness",
    "acousticness",
    "danceability",
    "energy",
    "liveness",
    "speechiness",
    "valence",
];

/// Reads the flat analytics table for an already ingested artist.
///
/// One row per stored track, album name joined in, numeric columns typed
/// as numbers. Row order is unspecified; consumers sort explicitly. An
/// artist with zero tracks yields an empty table, not an error.
pub async fn extract(store: &CatalogStore, artist_id: &str) -> Result<Vec<TrackRow>> {
    store.track_rows(artist_id).await
}

/// Averages the seven normalized features across the table.
///
/// Null values are skipped per feature; a feature with no values at all is
/// omitted, and an empty table yields an empty result.
pub fn feature_means(rows: &[TrackRow]) -> Vec<FeatureMean> {
    NORMALIZED_FEATURES
        .iter()
        .filter_map(|&feature| {
            let values: Vec<f64> = rows
                .iter()
                .filter_map(|row| normalized_value(row, feature))
                .collect();

            if values.is_empty() {
                return None;
            }

            Some(FeatureMean {
                feature,
                value: values.iter().sum::<f64>() / values.len() as f64,
            })
        })
        .collect()
}

fn normalized_value(row: &TrackRow, feature: &str) -> Option<f64> {
    match feature {
        "instrumentalness" => row.instrumentalness,
        "acousticness" => row.acousticness,
        "danceability" => row.danceability,
        "energy" => row.energy,
        "liveness" => row.liveness,
        "speechiness" => row.speechiness,
        "valence" => row.valence,
        _ => None,
    }
}
