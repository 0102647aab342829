use spofacli::management::{AlbumCatalog, assemble_batch};
use spofacli::store::CatalogStore;
use spofacli::types::{
    AlbumKind, AlbumRecord, Artist, AudioFeatures, CatalogBatch, TrackRecord,
};

fn test_artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        followers: Some(1_000_000),
        popularity: Some(80),
        genres: vec!["art rock".to_string(), "alternative".to_string()],
    }
}

fn test_album(id: &str, name: &str, total_tracks: i64) -> AlbumRecord {
    AlbumRecord {
        id: id.to_string(),
        kind: AlbumKind::Album,
        name: name.to_string(),
        total_tracks,
        available_markets: vec!["US".to_string(), "DE".to_string()],
        images: vec![],
    }
}

fn test_features(base: f64) -> AudioFeatures {
    AudioFeatures {
        key: Some(5),
        loudness: Some(-7.3),
        tempo: Some(120.5),
        time_signature: Some(4),
        instrumentalness: Some(base),
        acousticness: Some(0.2),
        danceability: Some(0.7),
        energy: Some(0.8),
        liveness: Some(0.1),
        speechiness: Some(0.05),
        valence: Some(0.6),
    }
}

fn test_track(id: &str, name: &str, number: i64, features: AudioFeatures) -> TrackRecord {
    TrackRecord {
        id: id.to_string(),
        name: name.to_string(),
        track_number: number,
        duration_ms: Some(215_000),
        features,
    }
}

// Builds a two-album catalog batch with three tracks total
fn test_batch(artist_id: &str) -> CatalogBatch {
    let artist = test_artist(artist_id, "Test Artist");
    let catalogs = vec![
        AlbumCatalog {
            album: test_album("al1", "First Album", 2),
            tracks: vec![
                test_track("t1", "Opener", 1, test_features(0.1)),
                test_track("t2", "Closer", 2, test_features(0.2)),
            ],
        },
        AlbumCatalog {
            album: test_album("al2", "Second Album", 1),
            tracks: vec![test_track("t3", "Single", 1, test_features(0.3))],
        },
    ];
    assemble_batch(artist, catalogs)
}

#[tokio::test]
async fn test_persist_then_exists_and_extract() {
    let store = CatalogStore::in_memory().await.unwrap();

    // The gate starts closed
    assert!(!store.artist_exists("ar1").await.unwrap());

    store.persist_catalog(&test_batch("ar1")).await.unwrap();

    // The gate only opens after the whole catalog landed
    assert!(store.artist_exists("ar1").await.unwrap());

    let rows = store.track_rows("ar1").await.unwrap();
    assert_eq!(rows.len(), 3);

    // Every row carries its owning album's display name
    for row in &rows {
        assert!(!row.album_name.is_empty());
    }
    let single = rows.iter().find(|r| r.track_id == "t3").unwrap();
    assert_eq!(single.album_name, "Second Album");
    assert_eq!(single.track_number, 1);
}

#[tokio::test]
async fn test_double_persist_is_idempotent() {
    let store = CatalogStore::in_memory().await.unwrap();

    store.persist_catalog(&test_batch("ar1")).await.unwrap();
    store.persist_catalog(&test_batch("ar1")).await.unwrap();

    // Upsert by upstream id: no duplicate track rows
    let rows = store.track_rows("ar1").await.unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_bulk_write_chunks_beyond_batch_limit() {
    let store = CatalogStore::in_memory().await.unwrap();

    // 60 tracks exceeds the 25-row statement chunk twice over
    let artist = test_artist("ar1", "Prolific Artist");
    let tracks: Vec<TrackRecord> = (1..=60)
        .map(|i| test_track(&format!("t{i}"), &format!("Track {i}"), i, test_features(0.5)))
        .collect();
    let catalogs = vec![AlbumCatalog {
        album: test_album("al1", "Big Album", 60),
        tracks,
    }];

    store
        .persist_catalog(&assemble_batch(artist, catalogs))
        .await
        .unwrap();

    let rows = store.track_rows("ar1").await.unwrap();
    assert_eq!(rows.len(), 60);
}

#[tokio::test]
async fn test_feature_roundtrip() {
    let store = CatalogStore::in_memory().await.unwrap();

    let mut features = test_features(0.123456789);
    features.tempo = Some(173.985);
    features.loudness = Some(-11.842);

    let artist = test_artist("ar1", "Test Artist");
    let catalogs = vec![AlbumCatalog {
        album: test_album("al1", "Album", 2),
        tracks: vec![
            test_track("t1", "Analyzed", 1, features),
            // never analyzed upstream: all feature fields null
            test_track("t2", "Unanalyzed", 2, AudioFeatures::default()),
        ],
    }];
    store
        .persist_catalog(&assemble_batch(artist, catalogs))
        .await
        .unwrap();

    let rows = store.track_rows("ar1").await.unwrap();

    let analyzed = rows.iter().find(|r| r.track_id == "t1").unwrap();
    assert!((analyzed.instrumentalness.unwrap() - 0.123456789).abs() <= 1e-6);
    assert!((analyzed.tempo.unwrap() - 173.985).abs() <= 1e-6);
    assert!((analyzed.loudness.unwrap() + 11.842).abs() <= 1e-6);
    assert_eq!(analyzed.key, Some(5));
    assert_eq!(analyzed.time_signature, Some(4));

    let unanalyzed = rows.iter().find(|r| r.track_id == "t2").unwrap();
    assert_eq!(unanalyzed.instrumentalness, None);
    assert_eq!(unanalyzed.tempo, None);
    assert_eq!(unanalyzed.key, None);
}

#[tokio::test]
async fn test_extract_unknown_artist_is_empty() {
    let store = CatalogStore::in_memory().await.unwrap();

    // Empty table, not an error
    let rows = store.track_rows("never-ingested").await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_concurrent_ingest_converges_on_one_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let store = CatalogStore::open(&path).await.unwrap();

    // Two racing searches for the same never-before-seen artist both pass
    // the existence check and both persist
    let batch_a = test_batch("ar1");
    let batch_b = test_batch("ar1");
    let (a, b) = tokio::join!(
        store.persist_catalog(&batch_a),
        store.persist_catalog(&batch_b)
    );
    a.unwrap();
    b.unwrap();

    assert!(store.artist_exists("ar1").await.unwrap());

    let rows = store.track_rows("ar1").await.unwrap();
    assert_eq!(rows.len(), 3);
}
