//! Ingestion pipeline and extraction/projection.
//!
//! The write path ([`ingest`]) pulls an artist's full discography and
//! per-track audio features from the Spotify client, fans the per-album
//! work out with bounded concurrency, and persists the accumulated catalog
//! in one transaction. The read path ([`extract`], [`feature_means`])
//! projects the stored catalog into the flat table and radar-chart
//! averages consumed downstream. [`search`] ties both together behind the
//! store's existence gate.

mod extract;
mod ingest;
mod search;

pub use extract::{extract, feature_means};
pub use ingest::{AlbumCatalog, assemble_batch, fetch_catalog, ingest, merge_features};
pub use search::{DiscographyReport, SearchOutcome, search};
