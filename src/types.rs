use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body of a token exchange or refresh response.
///
/// Refresh responses may omit `refresh_token` and `scope`, in which case the
/// previous values stay valid.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

/// One page of an offset-paginated Spotify listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: Paging<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    pub id: String,
    pub name: String,
}

/// Simplified album object as returned by `/artists/{id}/albums`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub release_date_precision: String,
    pub album_type: String,
    /// Only present on the artist albums endpoint.
    pub album_group: Option<String>,
    pub total_tracks: u32,
    pub artists: Vec<AlbumArtist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

/// Simplified track object as returned by `/albums/{id}/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTrack {
    pub id: String,
    pub name: String,
    pub track_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct SongTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "Song")]
    pub name: String,
    #[tabled(rename = "Album")]
    pub album: String,
    #[tabled(rename = "Released")]
    pub release_date: String,
}
