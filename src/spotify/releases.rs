use crate::{
    error::Result,
    types::{AlbumRecord, AlbumsPage, AlbumTracksPage, TrackRecord},
};

use super::SpotifyClient;

/// Page size for the paginated listing endpoints (upstream maximum 50).
const PAGE_LIMIT: u32 = 50;

impl SpotifyClient {
    /// Retrieves the artist's complete discography.
    ///
    /// Fetches `/artists/{id}/albums` filtered to albums, singles, and
    /// compilations, following the upstream `next` cursor until every page
    /// has been consumed. Artists with large catalogs span several pages;
    /// stopping after the first page silently truncates the discography,
    /// so the loop only terminates when the upstream reports no next page.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::Error::Upstream`] for non-2xx responses (e.g. a
    /// bad artist id) and [`crate::Error::Http`] for transport failures,
    /// after the shared retry policy is exhausted.
    pub async fn list_discography(&self, artist_id: &str) -> Result<Vec<AlbumRecord>> {
        let path = format!("/artists/{artist_id}/albums");
        let limit = PAGE_LIMIT.to_string();

        let mut albums: Vec<AlbumRecord> = Vec::new();
        let mut offset: u32 = 0;

        loop {
            let offset_param = offset.to_string();
            let page: AlbumsPage = self
                .get_json(
                    &path,
                    &[
                        ("include_groups", "album,single,compilation"),
                        ("limit", limit.as_str()),
                        ("offset", offset_param.as_str()),
                    ],
                )
                .await?;

            let fetched = page.items.len() as u32;
            albums.extend(page.items.into_iter().map(AlbumRecord::from));

            if page.next.is_none() || fetched == 0 {
                break;
            }
            offset += fetched;
        }

        Ok(albums)
    }

    /// Retrieves the full track listing of one album, following pagination
    /// the same way as [`SpotifyClient::list_discography`].
    ///
    /// The returned records carry identity fields only; audio features are
    /// merged in later by the ingestion pipeline.
    pub async fn album_tracks(&self, album_id: &str) -> Result<Vec<TrackRecord>> {
        let path = format!("/albums/{album_id}/tracks");
        let limit = PAGE_LIMIT.to_string();

        let mut tracks: Vec<TrackRecord> = Vec::new();
        let mut offset: u32 = 0;

        loop {
            let offset_param = offset.to_string();
            let page: AlbumTracksPage = self
                .get_json(
                    &path,
                    &[("limit", limit.as_str()), ("offset", offset_param.as_str())],
                )
                .await?;

            let fetched = page.items.len() as u32;
            tracks.extend(page.items.into_iter().map(|t| TrackRecord {
                id: t.id,
                name: t.name,
                track_number: t.track_number,
                duration_ms: t.duration_ms,
                features: Default::default(),
            }));

            if page.next.is_none() || fetched == 0 {
                break;
            }
            offset += fetched;
        }

        Ok(tracks)
    }
}
