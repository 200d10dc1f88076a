use super::ReleaseType;

/// Singles with at least this many tracks are ordered like EPs.
pub const EP_TRACK_THRESHOLD: u32 = 6;

/// Reclassifies long singles as EPs; every other type passes through.
pub fn normalize_type(release_type: ReleaseType, total_tracks: u32) -> ReleaseType {
    match release_type {
        ReleaseType::Single if total_tracks >= EP_TRACK_THRESHOLD => ReleaseType::Ep,
        other => other,
    }
}
