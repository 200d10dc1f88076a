use super::{ReleaseCandidate, is_impure};
use crate::{error::CatalogError, types::Artist};

/// Decides which impure releases make it into the songlist.
///
/// `include` receives every impure release at once, in listing order, and
/// returns one decision per release. Missing decisions count as "exclude".
///
/// Any `FnMut(&ReleaseCandidate) -> bool` is a policy, which keeps
/// rule-based decisions a one-liner.
pub trait InclusionPolicy {
    fn include(&mut self, impure: &[&ReleaseCandidate]) -> Result<Vec<bool>, CatalogError>;
}

impl<F> InclusionPolicy for F
where
    F: FnMut(&ReleaseCandidate) -> bool,
{
    fn include(&mut self, impure: &[&ReleaseCandidate]) -> Result<Vec<bool>, CatalogError> {
        Ok(impure.iter().map(|release| self(release)).collect())
    }
}

/// Keeps every impure release.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAll;

impl InclusionPolicy for IncludeAll {
    fn include(&mut self, impure: &[&ReleaseCandidate]) -> Result<Vec<bool>, CatalogError> {
        Ok(vec![true; impure.len()])
    }
}

/// Drops every impure release.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcludeAll;

impl InclusionPolicy for ExcludeAll {
    fn include(&mut self, impure: &[&ReleaseCandidate]) -> Result<Vec<bool>, CatalogError> {
        Ok(vec![false; impure.len()])
    }
}

/// Filters an artist's listing down to the releases that will be merged.
///
/// Pure releases are always kept. Impure ones are handed to `policy` in a
/// single call, skipped entirely when there are none. The kept releases
/// come back stably sorted by release date, ascending.
pub fn select_releases<P: InclusionPolicy + ?Sized>(
    artist_id: &str,
    candidates: Vec<ReleaseCandidate>,
    policy: &mut P,
) -> Result<Vec<ReleaseCandidate>, CatalogError> {
    let flags: Vec<bool> = candidates
        .iter()
        .map(|release| is_impure(artist_id, release))
        .collect();

    let impure: Vec<&ReleaseCandidate> = candidates
        .iter()
        .zip(&flags)
        .filter(|(_, impure)| **impure)
        .map(|(release, _)| release)
        .collect();

    let decisions = if impure.is_empty() {
        Vec::new()
    } else {
        policy.include(&impure)?
    };
    let mut decisions = decisions.into_iter();

    let mut selected: Vec<ReleaseCandidate> = candidates
        .into_iter()
        .zip(flags)
        .filter(|(_, impure)| !*impure || decisions.next().unwrap_or(false))
        .map(|(release, _)| release)
        .collect();

    selected.sort_by_key(|release| release.release_date);
    Ok(selected)
}

/// Picks the target artist out of search results.
pub trait ArtistSelector {
    /// Asks whether the only search hit is the intended artist.
    fn confirm(&mut self, artist: &Artist) -> Result<bool, CatalogError>;

    /// Picks one of several hits, `None` when no choice was made.
    fn choose(&mut self, artists: &[Artist]) -> Result<Option<usize>, CatalogError>;
}

/// Resolves `query`'s search results to a single artist.
///
/// No results is [`CatalogError::NotFound`]. A single result still needs
/// confirmation, and several results are never auto-resolved: the selector
/// has to pick one or the call fails with
/// [`CatalogError::AmbiguousSelection`].
pub fn resolve_artist<S: ArtistSelector + ?Sized>(
    query: &str,
    mut results: Vec<Artist>,
    selector: &mut S,
) -> Result<Artist, CatalogError> {
    match results.len() {
        0 => Err(CatalogError::NotFound(query.to_string())),
        1 => {
            let artist = results.remove(0);
            if selector.confirm(&artist)? {
                Ok(artist)
            } else {
                Err(CatalogError::SelectionDeclined(artist.name))
            }
        }
        count => match selector.choose(&results)? {
            Some(index) if index < count => Ok(results.swap_remove(index)),
            _ => Err(CatalogError::AmbiguousSelection {
                query: query.to_string(),
                count,
            }),
        },
    }
}
