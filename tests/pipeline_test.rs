use spofacli::management::{AlbumCatalog, assemble_batch, feature_means, merge_features};
use spofacli::types::{
    AlbumKind, AlbumRecord, Artist, AudioFeatures, TrackRecord, TrackRow,
};

fn test_artist(id: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: "Test Artist".to_string(),
        followers: Some(42),
        popularity: Some(60),
        genres: vec![],
    }
}

fn test_album(id: &str, kind: AlbumKind, total_tracks: i64) -> AlbumRecord {
    AlbumRecord {
        id: id.to_string(),
        kind,
        name: format!("{id} name"),
        total_tracks,
        available_markets: vec![],
        images: vec![],
    }
}

fn test_track(id: &str, number: i64) -> TrackRecord {
    TrackRecord {
        id: id.to_string(),
        name: format!("{id} name"),
        track_number: number,
        duration_ms: Some(180_000),
        features: AudioFeatures::default(),
    }
}

fn features_with(instrumentalness: f64) -> AudioFeatures {
    AudioFeatures {
        instrumentalness: Some(instrumentalness),
        ..Default::default()
    }
}

fn row_with(id: &str, danceability: Option<f64>, energy: Option<f64>) -> TrackRow {
    TrackRow {
        track_id: id.to_string(),
        track_name: format!("{id} name"),
        track_number: 1,
        album_name: "Album".to_string(),
        key: None,
        duration_ms: None,
        loudness: None,
        tempo: None,
        time_signature: None,
        instrumentalness: None,
        acousticness: None,
        danceability,
        energy,
        liveness: None,
        speechiness: None,
        valence: None,
    }
}

#[test]
fn test_merge_features_aligns_by_position() {
    let tracks = vec![test_track("t1", 1), test_track("t2", 2), test_track("t3", 3)];
    let features = vec![
        Some(features_with(0.1)),
        None, // upstream returned null for this track
        Some(features_with(0.3)),
    ];

    let merged = merge_features(tracks, features);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0].features.instrumentalness, Some(0.1));
    assert_eq!(merged[1].features.instrumentalness, None);
    assert_eq!(merged[2].features.instrumentalness, Some(0.3));

    // Identity fields survive the merge
    assert_eq!(merged[1].id, "t2");
    assert_eq!(merged[1].track_number, 2);
}

#[test]
fn test_merge_features_pads_short_feature_lists() {
    let tracks = vec![test_track("t1", 1), test_track("t2", 2)];
    let features = vec![Some(features_with(0.9))];

    let merged = merge_features(tracks, features);

    // Every track keeps its slot even when the feature list runs short
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].features.instrumentalness, Some(0.9));
    assert_eq!(merged[1].features.instrumentalness, None);
}

#[test]
fn test_assemble_batch_accumulates_associations() {
    let catalogs = vec![
        AlbumCatalog {
            album: test_album("al1", AlbumKind::Album, 2),
            tracks: vec![test_track("t1", 1), test_track("t2", 2)],
        },
        AlbumCatalog {
            album: test_album("al2", AlbumKind::Single, 1),
            tracks: vec![test_track("t3", 1)],
        },
    ];

    let batch = assemble_batch(test_artist("ar1"), catalogs);

    assert_eq!(batch.albums.len(), 2);
    assert_eq!(batch.tracks.len(), 3);

    // Every album is tied to the ingested artist
    assert_eq!(
        batch.artist_albums,
        vec![
            ("ar1".to_string(), "al1".to_string()),
            ("ar1".to_string(), "al2".to_string())
        ]
    );

    // Every track is tied to its artist and its album
    assert_eq!(batch.track_artists.len(), 3);
    assert!(batch
        .track_artists
        .iter()
        .all(|(_, artist_id)| artist_id == "ar1"));
    assert!(batch
        .track_albums
        .contains(&("t3".to_string(), "al2".to_string())));
}

#[test]
fn test_assemble_batch_dedupes_shared_tracks() {
    // The same track appears on a studio album and on a compilation
    let catalogs = vec![
        AlbumCatalog {
            album: test_album("al1", AlbumKind::Album, 1),
            tracks: vec![test_track("t1", 1)],
        },
        AlbumCatalog {
            album: test_album("al2", AlbumKind::Compilation, 1),
            tracks: vec![test_track("t1", 9)],
        },
    ];

    let batch = assemble_batch(test_artist("ar1"), catalogs);

    // One track row, but both album associations survive
    assert_eq!(batch.tracks.len(), 1);
    assert_eq!(batch.track_albums.len(), 2);
    assert!(batch
        .track_albums
        .contains(&("t1".to_string(), "al1".to_string())));
    assert!(batch
        .track_albums
        .contains(&("t1".to_string(), "al2".to_string())));
}

#[test]
fn test_feature_means_empty_table() {
    assert!(feature_means(&[]).is_empty());
}

#[test]
fn test_feature_means_averages_present_values() {
    let rows = vec![
        row_with("t1", Some(0.2), Some(0.9)),
        row_with("t2", Some(0.4), Some(0.7)),
    ];

    let means = feature_means(&rows);

    let danceability = means.iter().find(|m| m.feature == "danceability").unwrap();
    assert!((danceability.value - 0.3).abs() < 1e-9);

    let energy = means.iter().find(|m| m.feature == "energy").unwrap();
    assert!((energy.value - 0.8).abs() < 1e-9);

    // Features with no values at all are omitted rather than reported as 0
    assert!(means.iter().all(|m| m.feature != "valence"));
}

#[test]
fn test_feature_means_skips_null_values() {
    let rows = vec![
        row_with("t1", Some(0.6), None),
        row_with("t2", None, None),
        row_with("t3", Some(0.2), None),
    ];

    let means = feature_means(&rows);

    // Mean over the two present values only
    let danceability = means.iter().find(|m| m.feature == "danceability").unwrap();
    assert!((danceability.value - 0.4).abs() < 1e-9);
}
