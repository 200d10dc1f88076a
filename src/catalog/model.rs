use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use crate::{
    error::CatalogError,
    types::{Album, AlbumTrack},
    utils,
};

/// Release category used for ordering decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseType {
    Album,
    Ep,
    Single,
    Compilation,
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReleaseType::Album => "album",
            ReleaseType::Ep => "EP",
            ReleaseType::Single => "single",
            ReleaseType::Compilation => "compilation",
        };
        f.write_str(s)
    }
}

impl FromStr for ReleaseType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "album" => Ok(ReleaseType::Album),
            "ep" => Ok(ReleaseType::Ep),
            "single" => Ok(ReleaseType::Single),
            "compilation" => Ok(ReleaseType::Compilation),
            other => Err(CatalogError::UnknownReleaseType(other.to_string())),
        }
    }
}

/// A track placed in the songlist.
///
/// Ordering and deduplication only ever look at `name`; `id` is what the
/// playlist receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub track_number: u32,
    pub album_name: String,
    pub release_date: NaiveDate,
}

/// A release with its full, provider-ordered track list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    pub release_date: NaiveDate,
    pub tracks: Vec<Track>,
    pub release_type: ReleaseType,
}

impl Release {
    /// Builds a release from tracks in the order given, stamping every
    /// track with the release's name and date.
    pub fn new(
        name: impl Into<String>,
        release_date: NaiveDate,
        release_type: ReleaseType,
        tracks: Vec<AlbumTrack>,
    ) -> Self {
        let name = name.into();
        let tracks = tracks
            .into_iter()
            .map(|track| Track {
                id: track.id,
                name: track.name,
                track_number: track.track_number,
                album_name: name.clone(),
                release_date,
            })
            .collect();

        Self {
            name,
            release_date,
            tracks,
            release_type,
        }
    }

    /// Name of the first track, used to detect collisions with the songlist.
    pub fn anchor_name(&self) -> Option<&str> {
        self.tracks.first().map(|t| t.name.as_str())
    }
}

/// A release as listed for an artist, before its tracks are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCandidate {
    pub id: String,
    pub name: String,
    pub release_date: NaiveDate,
    /// Provider category: `album`, `single` or `compilation`.
    pub album_type: String,
    /// Relation to the requested artist: `album`, `single`, `compilation`
    /// or `appears_on`.
    pub album_group: Option<String>,
    pub total_tracks: u32,
    pub artist_ids: Vec<String>,
    pub url: String,
}

impl ReleaseCandidate {
    /// Turns the listing into a full release once its tracks are known.
    ///
    /// The provider type goes through [`normalize_type`](super::normalize_type)
    /// here, so every release handed to the merger carries its final type.
    pub fn into_release(self, tracks: Vec<AlbumTrack>) -> Result<Release, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::EmptyRelease(self.name));
        }

        let provider_type: ReleaseType = self.album_type.parse()?;
        let release_type = super::normalize_type(provider_type, self.total_tracks);

        Ok(Release::new(
            self.name,
            self.release_date,
            release_type,
            tracks,
        ))
    }
}

impl TryFrom<Album> for ReleaseCandidate {
    type Error = CatalogError;

    fn try_from(album: Album) -> Result<Self, Self::Error> {
        let release_date =
            utils::parse_release_date(&album.release_date, &album.release_date_precision)?;

        Ok(Self {
            id: album.id,
            name: album.name,
            release_date,
            album_type: album.album_type,
            album_group: album.album_group,
            total_tracks: album.total_tracks,
            artist_ids: album.artists.into_iter().map(|a| a.id).collect(),
            url: album.external_urls.spotify,
        })
    }
}
