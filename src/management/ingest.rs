use futures::stream::{self, StreamExt};

use crate::{
    error::{Error, Result},
    spotify::SpotifyClient,
    store::CatalogStore,
    types::{AlbumRecord, Artist, AudioFeatures, CatalogBatch, TrackRecord},
    utils,
};

/// Upper bound on concurrently fetched albums. Keeps the fan-out under the
/// upstream rate limit while still overlapping network latency.
const MAX_CONCURRENT_ALBUM_FETCHES: usize = 4;

/// One album with its fully merged track records.
pub struct AlbumCatalog {
    pub album: AlbumRecord,
    pub tracks: Vec<TrackRecord>,
}

/// Fetches the complete catalog for `artist` without touching the store.
///
/// Lists the discography, then fetches each album's track listing and
/// audio features concurrently (at most [`MAX_CONCURRENT_ALBUM_FETCHES`]
/// albums in flight). All fetch tasks are joined before anything else
/// happens; if any album failed, the whole ingestion aborts with
/// [`Error::PartialIngestion`] so no partial catalog is ever written.
pub async fn fetch_catalog(client: &SpotifyClient, artist: &Artist) -> Result<CatalogBatch> {
    let albums = client.list_discography(&artist.id).await?;
    let total = albums.len();

    let results: Vec<Result<AlbumCatalog>> = stream::iter(albums)
        .map(|album| async move {
            let tracks = client.album_tracks(&album.id).await?;
            let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
            let features = client.batch_audio_features(&ids).await?;
            Ok(AlbumCatalog {
                album,
                tracks: merge_features(tracks, features),
            })
        })
        .buffer_unordered(MAX_CONCURRENT_ALBUM_FETCHES)
        .collect()
        .await;

    // join barrier: every task has finished before any outcome is inspected
    let mut catalogs = Vec::with_capacity(total);
    let mut failed = 0usize;
    let mut first_error: Option<Error> = None;

    for result in results {
        match result {
            Ok(catalog) => catalogs.push(catalog),
            Err(err) => {
                failed += 1;
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    if let Some(source) = first_error {
        return Err(Error::PartialIngestion {
            failed,
            total,
            source: Box::new(source),
        });
    }

    Ok(assemble_batch(artist.clone(), catalogs))
}

/// Fetches and persists the catalog for `artist`.
///
/// The store write happens only after every album fetch succeeded, and it
/// lands in a single transaction, so the artist either becomes fully
/// present or stays absent.
pub async fn ingest(
    client: &SpotifyClient,
    store: &CatalogStore,
    artist: &Artist,
) -> Result<()> {
    let batch = fetch_catalog(client, artist).await?;
    store.persist_catalog(&batch).await
}

/// Merges identity records with their feature sets, aligned by position.
///
/// `features` carries one entry per track in order; `None` entries (tracks
/// the upstream never analyzed) leave the record's features empty instead
/// of dropping the track.
pub fn merge_features(
    tracks: Vec<TrackRecord>,
    features: Vec<Option<AudioFeatures>>,
) -> Vec<TrackRecord> {
    tracks
        .into_iter()
        .zip(features.into_iter().chain(std::iter::repeat(None)))
        .map(|(mut track, features)| {
            track.features = features.unwrap_or_default();
            track
        })
        .collect()
}

/// Flattens per-album catalogs into one write-ready batch: entity lists
/// deduplicated by upstream id plus the three association sets.
pub fn assemble_batch(artist: Artist, catalogs: Vec<AlbumCatalog>) -> CatalogBatch {
    let mut albums = Vec::new();
    let mut tracks = Vec::new();
    let mut artist_albums = Vec::new();
    let mut track_artists = Vec::new();
    let mut track_albums = Vec::new();

    for catalog in catalogs {
        artist_albums.push((artist.id.clone(), catalog.album.id.clone()));

        for track in catalog.tracks {
            track_artists.push((track.id.clone(), artist.id.clone()));
            track_albums.push((track.id.clone(), catalog.album.id.clone()));
            tracks.push(track);
        }

        albums.push(catalog.album);
    }

    // the same track may appear on an album and a compilation
    utils::remove_duplicate_albums(&mut albums);
    utils::remove_duplicate_tracks(&mut tracks);

    CatalogBatch {
        artist,
        albums,
        tracks,
        artist_albums,
        track_artists,
        track_albums,
    }
}
