use crate::{
    error::Result,
    types::{Artist, SearchArtistsResponse},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Resolves a free-text artist name to the first-ranked catalog match.
    ///
    /// Queries the `/search` endpoint with `type=artist&limit=1` and
    /// returns the single best match, or `None` when the catalog has no
    /// artist for that name. An empty or whitespace-only name returns
    /// `None` without touching the network (the upstream rejects an empty
    /// `q` with 400, which is not a useful way to say "no match").
    ///
    /// # Example
    ///
    /// ```
    /// let artist = client.search_artist("Radiohead").await?;
    /// if let Some(artist) = artist {
    ///     println!("{} ({})", artist.name, artist.id);
    /// }
    /// ```
    pub async fn search_artist(&self, name: &str) -> Result<Option<Artist>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let response: SearchArtistsResponse = self
            .get_json("/search", &[("q", name), ("type", "artist"), ("limit", "1")])
            .await?;

        Ok(response.artists.items.into_iter().next().map(Artist::from))
    }
}
