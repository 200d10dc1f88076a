//! Catalog provider seam.
//!
//! The merge engine never talks to a music service itself. It is handed
//! fully materialized [`Release`]s, which [`fetch_releases`] builds from
//! whatever implements [`CatalogProvider`]. Paging, retries and rate limits
//! are the implementation's concern.

use crate::{
    Res,
    catalog::{Release, ReleaseCandidate},
    types::{AlbumTrack, Artist},
};

/// Source of artists, release listings and track lists.
#[allow(async_fn_in_trait)]
pub trait CatalogProvider {
    /// Artists matching a free-text query, best match first.
    async fn search_artists(&mut self, query: &str) -> Res<Vec<Artist>>;

    /// Every release listed for `artist_id`, across all pages.
    async fn artist_releases(&mut self, artist_id: &str) -> Res<Vec<ReleaseCandidate>>;

    /// The full track list of a release, in provider order.
    async fn release_tracks(&mut self, release_id: &str) -> Res<Vec<AlbumTrack>>;
}

/// Fetches the tracks of every selected release and builds the releases
/// handed to the merger.
///
/// `on_progress` is called before each fetch with the number of releases
/// done so far, the total and the release name. Order is preserved and the
/// release types are normalized on the way.
pub async fn fetch_releases<P, F>(
    provider: &mut P,
    candidates: Vec<ReleaseCandidate>,
    mut on_progress: F,
) -> Res<Vec<Release>>
where
    P: CatalogProvider,
    F: FnMut(usize, usize, &str),
{
    let total = candidates.len();
    let mut releases = Vec::with_capacity(total);

    for (done, candidate) in candidates.into_iter().enumerate() {
        on_progress(done, total, &candidate.name);
        let tracks = provider.release_tracks(&candidate.id).await?;
        releases.push(candidate.into_release(tracks)?);
    }

    Ok(releases)
}
