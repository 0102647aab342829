use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::{Table, Tabled};

use crate::{
    config, error, info,
    management::{self, SearchOutcome},
    spotify::SpotifyClient,
    store::CatalogStore,
    success,
    types::TrackRow,
    utils, warning,
};

#[derive(Tabled)]
struct TrackTableRow {
    pub album: String,
    pub no: i64,
    pub name: String,
    pub duration: String,
    pub danceability: String,
    pub energy: String,
    pub valence: String,
}

#[derive(Tabled)]
struct FeatureMeanTableRow {
    pub feature: String,
    pub mean: String,
}

pub async fn search(artist_name: String, json: bool) {
    let client = match SpotifyClient::new() {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    };

    let store = match CatalogStore::open(&config::database_path()).await {
        Ok(store) => store,
        Err(e) => error!("Cannot open catalog database. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Searching for '{artist_name}'..."));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let outcome = management::search(&client, &store, &artist_name).await;
    pb.finish_and_clear();

    let report = match outcome {
        Ok(SearchOutcome::Report(report)) => report,
        Ok(SearchOutcome::NotFound) => {
            warning!("No artist matching '{}' exists.", artist_name);
            return;
        }
        Err(e) => error!("Search failed. Err: {}", e),
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize report. Err: {}", e),
        }
        return;
    }

    if report.freshly_ingested {
        success!(
            "Ingested catalog for {artist}: {tracks} tracks.",
            artist = report.artist.name,
            tracks = report.rows.len()
        );
    } else {
        info!(
            "Catalog for {artist} already cached ({tracks} tracks).",
            artist = report.artist.name,
            tracks = report.rows.len()
        );
    }

    let mut rows = report.rows.clone();
    utils::sort_track_rows(&mut rows);

    let table_rows: Vec<TrackTableRow> = rows.into_iter().map(to_table_row).collect();
    println!("{}", Table::new(table_rows));

    if !report.feature_means.is_empty() {
        let mean_rows: Vec<FeatureMeanTableRow> = report
            .feature_means
            .iter()
            .map(|m| FeatureMeanTableRow {
                feature: m.feature.to_string(),
                mean: format!("{:.3}", m.value),
            })
            .collect();
        println!("{}", Table::new(mean_rows));
    }
}

fn to_table_row(row: TrackRow) -> TrackTableRow {
    TrackTableRow {
        album: row.album_name,
        no: row.track_number,
        name: row.track_name,
        duration: utils::format_duration(row.duration_ms),
        danceability: utils::format_feature(row.danceability),
        energy: utils::format_feature(row.energy),
        valence: utils::format_feature(row.valence),
    }
}
