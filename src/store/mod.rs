//! Catalog database.
//!
//! SQLite-backed persistence for ingested artist catalogs. The write path
//! is a single transaction per artist: the artist row, its albums, tracks,
//! and the three association sets all become durable together, so
//! [`CatalogStore::artist_exists`] only reports true for fully written
//! catalogs. All inserts are `INSERT OR IGNORE` keyed by upstream ids,
//! which makes concurrent duplicate ingestions of the same artist converge
//! on one row set instead of failing.

mod schema;

use std::{path::Path, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

use crate::{
    error::Result,
    types::{AlbumRecord, Artist, CatalogBatch, TrackRecord, TrackRow},
};

/// Rows per INSERT statement on the bulk write path.
const WRITE_BATCH_SIZE: usize = 25;

pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    /// Opens (creating if needed) the catalog database at `path`.
    ///
    /// Enables WAL and a busy timeout so concurrent search requests can
    /// share the database, then creates any missing tables.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| sqlx::Error::Io(e))?;
        }

        // connection-level options so every pooled connection gets the
        // same journal mode and lock patience
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        schema::create_tables(&pool).await?;

        Ok(Self { pool })
    }

    /// Opens a private in-memory database. Single connection, intended for
    /// tests.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        schema::create_tables(&pool).await?;

        Ok(Self { pool })
    }

    /// Point lookup deciding whether ingestion for this artist already ran.
    ///
    /// Returns `false` for an absent artist; errors only on store failure,
    /// which the caller must treat as fatal rather than as "does not
    /// exist".
    pub async fn artist_exists(&self, artist_id: &str) -> Result<bool> {
        let hit: Option<i64> = sqlx::query_scalar("SELECT 1 FROM artists WHERE artist_id = ?")
            .bind(artist_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(hit.is_some())
    }

    /// Persists a fully fetched catalog in one transaction.
    ///
    /// Inserts are chunked at [`WRITE_BATCH_SIZE`] rows per statement to
    /// bound statement size, and keyed `OR IGNORE` on upstream ids so a
    /// concurrent duplicate ingestion upserts instead of erroring.
    pub async fn persist_catalog(&self, batch: &CatalogBatch) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        insert_artist(&mut tx, &batch.artist).await?;
        insert_albums(&mut tx, &batch.albums).await?;
        insert_tracks(&mut tx, &batch.tracks).await?;
        insert_pairs(
            &mut tx,
            "artist_albums",
            ("artist_id", "album_id"),
            &batch.artist_albums,
        )
        .await?;
        insert_pairs(
            &mut tx,
            "track_artists",
            ("track_id", "artist_id"),
            &batch.track_artists,
        )
        .await?;
        insert_pairs(
            &mut tx,
            "track_albums",
            ("track_id", "album_id"),
            &batch.track_albums,
        )
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Reads every track associated with `artist_id` back out as one flat
    /// analytics row per track, with the owning album's display name
    /// joined in.
    ///
    /// Row order is unspecified; callers sort explicitly. An artist with
    /// no persisted tracks yields an empty vector.
    pub async fn track_rows(&self, artist_id: &str) -> Result<Vec<TrackRow>> {
        let rows = sqlx::query_as::<_, TrackRow>(
            r#"
            SELECT t.track_id,
                   t.track_name,
                   t.track_number,
                   (SELECT al.album_name
                      FROM track_albums tal
                      JOIN albums al ON al.album_id = tal.album_id
                     WHERE tal.track_id = t.track_id
                     ORDER BY al.album_id
                     LIMIT 1) AS album_name,
                   t.key,
                   t.duration_ms,
                   t.loudness,
                   t.tempo,
                   t.time_signature,
                   t.instrumentalness,
                   t.acousticness,
                   t.danceability,
                   t.energy,
                   t.liveness,
                   t.speechiness,
                   t.valence
              FROM tracks t
              JOIN track_artists ta ON ta.track_id = t.track_id
             WHERE ta.artist_id = ?
            "#,
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

async fn insert_artist(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    artist: &Artist,
) -> Result<()> {
    sqlx::query(
        "INSERT OR IGNORE INTO artists (artist_id, name, followers, popularity, genres) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&artist.id)
    .bind(&artist.name)
    .bind(artist.followers)
    .bind(artist.popularity)
    .bind(serde_json::to_string(&artist.genres).unwrap_or_default())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_albums(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    albums: &[AlbumRecord],
) -> Result<()> {
    for chunk in albums.chunks(WRITE_BATCH_SIZE) {
        let placeholders = vec!["(?, ?, ?, ?, ?, ?)"; chunk.len()].join(", ");
        let sql = format!(
            "INSERT OR IGNORE INTO albums \
             (album_id, album_type, album_name, total_tracks, available_markets, images) \
             VALUES {placeholders}"
        );

        let mut query = sqlx::query(&sql);
        for album in chunk {
            query = query
                .bind(&album.id)
                .bind(album.kind.as_str())
                .bind(&album.name)
                .bind(album.total_tracks)
                .bind(serde_json::to_string(&album.available_markets).unwrap_or_default())
                .bind(serde_json::to_string(&album.images).unwrap_or_default());
        }
        query.execute(&mut **tx).await?;
    }

    Ok(())
}

async fn insert_tracks(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    tracks: &[TrackRecord],
) -> Result<()> {
    for chunk in tracks.chunks(WRITE_BATCH_SIZE) {
        let placeholders =
            vec!["(?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"; chunk.len()].join(", ");
        let sql = format!(
            "INSERT OR IGNORE INTO tracks \
             (track_id, track_name, track_number, duration_ms, key, loudness, tempo, \
              time_signature, instrumentalness, acousticness, danceability, energy, \
              liveness, speechiness, valence) \
             VALUES {placeholders}"
        );

        let mut query = sqlx::query(&sql);
        for track in chunk {
            let f = &track.features;
            query = query
                .bind(&track.id)
                .bind(&track.name)
                .bind(track.track_number)
                .bind(track.duration_ms)
                .bind(f.key)
                .bind(f.loudness)
                .bind(f.tempo)
                .bind(f.time_signature)
                .bind(f.instrumentalness)
                .bind(f.acousticness)
                .bind(f.danceability)
                .bind(f.energy)
                .bind(f.liveness)
                .bind(f.speechiness)
                .bind(f.valence);
        }
        query.execute(&mut **tx).await?;
    }

    Ok(())
}

async fn insert_pairs(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    table: &str,
    columns: (&str, &str),
    pairs: &[(String, String)],
) -> Result<()> {
    for chunk in pairs.chunks(WRITE_BATCH_SIZE) {
        let placeholders = vec!["(?, ?)"; chunk.len()].join(", ");
        let sql = format!(
            "INSERT OR IGNORE INTO {table} ({a}, {b}) VALUES {placeholders}",
            a = columns.0,
            b = columns.1,
        );

        let mut query = sqlx::query(&sql);
        for (left, right) in chunk {
            query = query.bind(left).bind(right);
        }
        query.execute(&mut **tx).await?;
    }

    Ok(())
}
