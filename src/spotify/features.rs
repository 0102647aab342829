use crate::{
    error::Result,
    types::{AudioFeatures, AudioFeaturesResponse},
};

use super::SpotifyClient;

/// Upstream cap on ids per audio-features call.
pub const FEATURES_BATCH_LIMIT: usize = 100;

impl SpotifyClient {
    /// Retrieves audio features for a list of track ids.
    ///
    /// The `/audio-features` endpoint accepts at most
    /// [`FEATURES_BATCH_LIMIT`] ids per call, so longer lists are chunked
    /// and the per-chunk results concatenated back in input order: the
    /// returned vector has exactly one entry per input id, at the same
    /// position. Tracks the upstream has not analyzed come back as `null`
    /// and are preserved as `None` rather than treated as an error.
    ///
    /// An empty id list returns an empty vector without a network call.
    pub async fn batch_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>> {
        let mut features: Vec<Option<AudioFeatures>> = Vec::with_capacity(track_ids.len());

        for chunk in track_ids.chunks(FEATURES_BATCH_LIMIT) {
            let ids = chunk.join(",");
            let mut batch: Vec<Option<AudioFeatures>> = self
                .get_json::<AudioFeaturesResponse>("/audio-features", &[("ids", ids.as_str())])
                .await?
                .audio_features;
            // keep positional alignment even if the upstream answers short
            batch.resize_with(chunk.len(), || None);
            features.extend(batch);
        }

        Ok(features)
    }
}
