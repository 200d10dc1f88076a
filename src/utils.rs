use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::NaiveDate;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::error::CatalogError;

const ARTIST_URL_PREFIX: &str = "https://open.spotify.com/artist/";

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts the artist id from an `open.spotify.com/artist/<id>` link,
/// dropping any query string such as `?si=...`.
///
/// Returns `None` for anything that is not an artist link, which callers
/// treat as a free-text search.
pub fn artist_id_from_url(input: &str) -> Option<String> {
    let rest = input.trim().strip_prefix(ARTIST_URL_PREFIX)?;
    let id = rest
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id.to_string())
}

/// Parses a provider release date according to its precision.
///
/// `day` dates are taken as is, `month` dates fall on the first of the
/// month and `year` dates on January 1st.
pub fn parse_release_date(date: &str, precision: &str) -> Result<NaiveDate, CatalogError> {
    let invalid = || CatalogError::InvalidReleaseDate {
        date: date.to_string(),
        precision: precision.to_string(),
    };

    let padded = match precision {
        "day" => date.to_string(),
        "month" => format!("{}-01", date),
        "year" => format!("{}-01-01", date),
        _ => return Err(invalid()),
    };

    NaiveDate::parse_from_str(&padded, "%Y-%m-%d").map_err(|_| invalid())
}

/// Builds the playlist URI for a track id.
pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}
