use super::ReleaseCandidate;

const COMPILATION_GROUP: &str = "compilation";

/// Returns `true` when a release should not be included without asking.
///
/// A release is impure if any credited artist is someone other than
/// `artist_id` (features, splits, guest appearances) or if the provider files
/// it under the `compilation` group for this artist.
pub fn is_impure(artist_id: &str, release: &ReleaseCandidate) -> bool {
    release.artist_ids.iter().any(|id| id != artist_id)
        || release.album_group.as_deref() == Some(COMPILATION_GROUP)
}
