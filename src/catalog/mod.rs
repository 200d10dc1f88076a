//! # Catalog Module
//!
//! Turns an artist's releases into one ordered, de-duplicated songlist.
//!
//! ## Pipeline
//!
//! ```text
//! ReleaseCandidate listing (provider)
//!     ↓  is_impure + InclusionPolicy      (select_releases)
//!     ↓  fetch tracks, normalize_type     (ReleaseCandidate::into_release)
//! Release list, sorted by date
//!     ↓  albums first, then EPs, then singles   (merge_releases)
//!     ↓  first occurrence of each name wins      (deduplicate)
//!     ↓  optional reverse                        (compile_songlist)
//! Track sequence for the playlist
//! ```
//!
//! Everything in here is synchronous and free of I/O. Fetching listings and
//! tracks is the provider's job, asking the user is the job of whatever
//! implements [`InclusionPolicy`] and [`ArtistSelector`].
//!
//! ## Ordering Rules
//!
//! Albums form the backbone because they are the least likely to be
//! superseded. EPs are spliced before singles since an EP is more likely to
//! contain what a single also contains. A spliced release whose first track
//! is already in the list replaces that track in place; otherwise it lands
//! where its release date puts it.
//!
//! ## Invariant
//!
//! The final sequence holds exactly one track per distinct name across all
//! merged releases. Anything else is reported as
//! [`CatalogError::InternalConsistency`](crate::error::CatalogError) and the
//! songlist is discarded.

mod dedup;
mod merge;
mod model;
mod normalize;
mod purity;
mod selection;

pub use dedup::deduplicate;
pub use dedup::distinct_track_names;
pub use dedup::remove_repeated_names;
pub use merge::merge_releases;
pub use model::Release;
pub use model::ReleaseCandidate;
pub use model::ReleaseType;
pub use model::Track;
pub use normalize::EP_TRACK_THRESHOLD;
pub use normalize::normalize_type;
pub use purity::is_impure;
pub use selection::ArtistSelector;
pub use selection::ExcludeAll;
pub use selection::IncludeAll;
pub use selection::InclusionPolicy;
pub use selection::resolve_artist;
pub use selection::select_releases;

use crate::error::CatalogError;

/// Merges and deduplicates `releases`, reversing the result if asked to.
///
/// `releases` must already be filtered to the included ones, carry their
/// final type and be sorted by release date.
pub fn compile_songlist(releases: Vec<Release>, reverse: bool) -> Result<Vec<Track>, CatalogError> {
    let expected = distinct_track_names(&releases);
    let merged = merge_releases(releases)?;
    let mut songlist = deduplicate(merged, expected)?;

    if reverse {
        songlist.reverse();
    }

    Ok(songlist)
}
