use crate::{
    Res,
    catalog::ReleaseCandidate,
    spotify::SpotifyClient,
    types::{Album, AlbumTrack, Paging},
};

/// Page size used for release and track listings (Spotify maximum).
const PAGE_LIMIT: u32 = 50;

/// Release groups requested for an artist. Guest appearances and
/// compilations are listed too and sorted out by the purity check.
const INCLUDE_GROUPS: &str = "album,single,compilation,appears_on";

/// Retrieves every release listed for an artist.
///
/// Follows the `next` links of `/artists/{id}/albums` until the listing is
/// exhausted. The configured market, if any, is passed along.
///
/// A release whose date cannot be parsed fails the whole listing with
/// [`CatalogError::InvalidReleaseDate`](crate::error::CatalogError).
///
/// # Returns
///
/// The releases in the order Spotify lists them. Callers sort them by
/// date before merging.
pub async fn get_releases_for_artist(
    client: &mut SpotifyClient,
    artist_id: &str,
) -> Res<Vec<ReleaseCandidate>> {
    let first_page = client.endpoint(&format!("artists/{}/albums", artist_id));
    let mut query = client.market_query();
    query.push(("include_groups", INCLUDE_GROUPS.to_string()));
    query.push(("limit", PAGE_LIMIT.to_string()));

    let albums: Vec<Album> = get_all_pages(client, first_page, query).await?;

    let releases = albums
        .into_iter()
        .map(ReleaseCandidate::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(releases)
}

/// Retrieves the complete track list of a release, in provider order.
pub async fn get_release_tracks(
    client: &mut SpotifyClient,
    release_id: &str,
) -> Res<Vec<AlbumTrack>> {
    let first_page = client.endpoint(&format!("albums/{}/tracks", release_id));
    let mut query = client.market_query();
    query.push(("limit", PAGE_LIMIT.to_string()));

    get_all_pages(client, first_page, query).await
}

/// Collects the items of a paged listing. `query` only applies to the
/// first request; `next` links already carry it.
async fn get_all_pages<T: serde::de::DeserializeOwned>(
    client: &mut SpotifyClient,
    first_page: String,
    query: Vec<(&'static str, String)>,
) -> Res<Vec<T>> {
    let mut items = Vec::new();

    let mut page: Paging<T> = client
        .request_json(|http| http.get(&first_page).query(&query))
        .await?;

    loop {
        items.extend(page.items);

        let Some(next) = page.next else {
            break;
        };
        page = client.request_json(|http| http.get(&next)).await?;
    }

    Ok(items)
}
