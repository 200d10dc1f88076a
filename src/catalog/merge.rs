use std::collections::HashMap;

use chrono::NaiveDate;

use super::{Release, ReleaseType, Track};
use crate::error::CatalogError;

/// Ordered track sequence with a name index kept in step with it.
///
/// `positions` maps every name present to the index of its first
/// occurrence in `tracks`.
#[derive(Debug, Default)]
struct Songlist {
    tracks: Vec<Track>,
    positions: HashMap<String, usize>,
}

impl Songlist {
    fn position_of(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    fn first_released_after(&self, date: NaiveDate) -> Option<usize> {
        self.tracks.iter().position(|t| t.release_date > date)
    }

    fn append(&mut self, tracks: Vec<Track>) {
        let start = self.tracks.len();
        self.tracks.extend(tracks);
        self.reindex_from(start);
    }

    /// Replaces `replaced` tracks starting at `at` with `tracks`.
    fn splice(&mut self, at: usize, replaced: usize, tracks: Vec<Track>) {
        self.tracks.splice(at..at + replaced, tracks);
        self.reindex_from(at);
    }

    // Everything before `from` is untouched, so only entries at or past it move.
    fn reindex_from(&mut self, from: usize) {
        self.positions.retain(|_, pos| *pos < from);
        for (offset, track) in self.tracks[from..].iter().enumerate() {
            self.positions
                .entry(track.name.clone())
                .or_insert(from + offset);
        }
    }

    fn splice_release(&mut self, release: Release) -> Result<(), CatalogError> {
        let anchor = match release.anchor_name() {
            Some(name) => self.position_of(name),
            None => return Err(CatalogError::EmptyRelease(release.name)),
        };

        match anchor {
            Some(pos) => self.splice(pos, 1, release.tracks),
            None => match self.first_released_after(release.release_date) {
                Some(pos) => self.splice(pos, 0, release.tracks),
                None => self.append(release.tracks),
            },
        }
        Ok(())
    }
}

/// Merges date-sorted releases into a single ordered track sequence.
///
/// Albums are laid down first, in input order, as the backbone. EPs and then
/// singles (compilations ride with the singles) are spliced in afterwards,
/// each group in input order. A spliced release whose first track name is
/// already in the sequence replaces that track in place with its full track
/// list; otherwise it is inserted before the first track released strictly
/// later than itself, or appended.
///
/// The result may still contain repeated names; see
/// [`deduplicate`](super::deduplicate).
pub fn merge_releases(releases: Vec<Release>) -> Result<Vec<Track>, CatalogError> {
    if let Some(empty) = releases.iter().find(|r| r.tracks.is_empty()) {
        return Err(CatalogError::EmptyRelease(empty.name.clone()));
    }

    let (albums, rest): (Vec<Release>, Vec<Release>) = releases
        .into_iter()
        .partition(|r| r.release_type == ReleaseType::Album);
    let (eps, singles): (Vec<Release>, Vec<Release>) = rest
        .into_iter()
        .partition(|r| r.release_type == ReleaseType::Ep);

    let mut songlist = Songlist::default();
    for album in albums {
        songlist.append(album.tracks);
    }

    for release in eps.into_iter().chain(singles) {
        songlist.splice_release(release)?;
    }

    Ok(songlist.tracks)
}
