use std::collections::HashSet;

use super::{Release, Track};
use crate::error::CatalogError;

/// Drops every track whose name already appeared earlier in the sequence.
pub fn remove_repeated_names(tracks: &mut Vec<Track>) {
    let mut seen: HashSet<String> = HashSet::new();
    tracks.retain(|t| seen.insert(t.name.clone()));
}

/// Number of distinct track names across `releases`.
pub fn distinct_track_names(releases: &[Release]) -> usize {
    releases
        .iter()
        .flat_map(|r| r.tracks.iter().map(|t| t.name.as_str()))
        .collect::<HashSet<_>>()
        .len()
}

/// Removes repeated names and checks that exactly `expected` tracks remain.
///
/// A count mismatch means a track went missing during the merge and is
/// reported as [`CatalogError::InternalConsistency`].
pub fn deduplicate(mut tracks: Vec<Track>, expected: usize) -> Result<Vec<Track>, CatalogError> {
    remove_repeated_names(&mut tracks);

    if tracks.len() != expected {
        return Err(CatalogError::InternalConsistency {
            expected,
            actual: tracks.len(),
        });
    }

    Ok(tracks)
}
