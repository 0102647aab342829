use serde::Serialize;

use crate::{
    error::Result,
    management::{extract, feature_means, ingest},
    spotify::SpotifyClient,
    store::CatalogStore,
    types::{Artist, FeatureMean, TrackRow},
};

/// Result of one search request.
#[derive(Debug, Serialize)]
pub enum SearchOutcome {
    /// The name matched nothing upstream. The store was not touched.
    NotFound,
    Report(DiscographyReport),
}

/// The tabular result plus the derived radar-chart structure handed back
/// to the caller.
#[derive(Debug, Serialize)]
pub struct DiscographyReport {
    pub artist: Artist,
    pub rows: Vec<TrackRow>,
    pub feature_means: Vec<FeatureMean>,
    /// Whether this request performed the ingestion (as opposed to reading
    /// a previously persisted catalog).
    pub freshly_ingested: bool,
}

/// Resolves an artist name and returns its analytics table, ingesting the
/// catalog first if this artist has never been seen.
///
/// The existence check is the single gate: previously ingested artists
/// perform no further discography calls. Two concurrent searches for the
/// same new artist may both pass the gate and both ingest; the store's
/// upsert semantics make that converge on a single catalog.
pub async fn search(
    client: &SpotifyClient,
    store: &CatalogStore,
    artist_name: &str,
) -> Result<SearchOutcome> {
    let Some(artist) = client.search_artist(artist_name).await? else {
        return Ok(SearchOutcome::NotFound);
    };

    let freshly_ingested = if store.artist_exists(&artist.id).await? {
        false
    } else {
        ingest(client, store, &artist).await?;
        true
    };

    let rows = extract(store, &artist.id).await?;
    let feature_means = feature_means(&rows);

    Ok(SearchOutcome::Report(DiscographyReport {
        artist,
        rows,
        feature_means,
        freshly_ingested,
    }))
}
