use std::{cmp::Ordering, collections::HashSet};

use crate::types::{AlbumRecord, TrackRecord, TrackRow};

pub fn remove_duplicate_albums(albums: &mut Vec<AlbumRecord>) {
    let mut seen_ids = HashSet::new();
    albums.retain(|album| seen_ids.insert(album.id.clone()));
}

pub fn remove_duplicate_tracks(tracks: &mut Vec<TrackRecord>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}

pub fn sort_track_rows(rows: &mut Vec<TrackRow>) {
    rows.sort_by(|a, b| {
        match a.album_name.cmp(&b.album_name) {
            Ordering::Equal => a.track_number.cmp(&b.track_number), // secondary sort: position within album
            other => other,
        }
    });
}

pub fn format_duration(duration_ms: Option<i64>) -> String {
    match duration_ms {
        Some(ms) if ms >= 0 => {
            let total_secs = ms / 1000;
            format!("{}:{:02}", total_secs / 60, total_secs % 60)
        }
        _ => String::new(),
    }
}

pub fn format_feature(value: Option<f64>) -> String {
    value.map(|v| format!("{:.3}", v)).unwrap_or_default()
}
