//! Catalog table definitions.
//!
//! Five tables: one per entity (artists, albums, tracks) and three
//! association tables. Associations are many-to-many in the schema even
//! though each ingested album belongs to exactly one artist in practice.

use sqlx::SqlitePool;

use crate::error::Result;

pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_artists_table(pool).await?;
    create_albums_table(pool).await?;
    create_tracks_table(pool).await?;
    create_artist_albums_table(pool).await?;
    create_track_artists_table(pool).await?;
    create_track_albums_table(pool).await?;
    Ok(())
}

async fn create_artists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            artist_id  TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            followers  INTEGER,
            popularity INTEGER,
            genres     TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_albums_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            album_id          TEXT PRIMARY KEY,
            album_type        TEXT NOT NULL,
            album_name        TEXT NOT NULL,
            total_tracks      INTEGER NOT NULL,
            available_markets TEXT,
            images            TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_tracks_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tracks (
            track_id         TEXT PRIMARY KEY,
            track_name       TEXT NOT NULL,
            track_number     INTEGER NOT NULL,
            duration_ms      INTEGER,
            key              INTEGER,
            loudness         REAL,
            tempo            REAL,
            time_signature   INTEGER,
            instrumentalness REAL,
            acousticness     REAL,
            danceability     REAL,
            energy           REAL,
            liveness         REAL,
            speechiness      REAL,
            valence          REAL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_artist_albums_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artist_albums (
            artist_id TEXT NOT NULL,
            album_id  TEXT NOT NULL,
            PRIMARY KEY (artist_id, album_id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_track_artists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS track_artists (
            track_id  TEXT NOT NULL,
            artist_id TEXT NOT NULL,
            PRIMARY KEY (track_id, artist_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_track_artists_artist ON track_artists (artist_id)",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_track_albums_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS track_albums (
            track_id TEXT NOT NULL,
            album_id TEXT NOT NULL,
            PRIMARY KEY (track_id, album_id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
