use crate::{
    Res,
    spotify::SpotifyClient,
    types::{Artist, SearchArtistsResponse},
};

/// Number of search hits offered for disambiguation.
const SEARCH_LIMIT: u32 = 10;

/// Searches artists by name using Spotify's `artist:` field filter.
///
/// Only the first page is fetched; the hits are ordered by Spotify's
/// relevance ranking and an empty list means nothing matched.
///
/// # Example
///
/// ```
/// let hits = search(&mut client, "Tove Lo").await?;
/// for artist in hits {
///     println!("{} ({})", artist.name, artist.external_urls.spotify);
/// }
/// ```
pub async fn search(client: &mut SpotifyClient, name: &str) -> Res<Vec<Artist>> {
    let api_url = client.endpoint("search");
    let query = format!("artist:{}", name);
    let limit = SEARCH_LIMIT.to_string();

    let res: SearchArtistsResponse = client
        .request_json(|http| {
            http.get(&api_url).query(&[
                ("q", query.as_str()),
                ("type", "artist"),
                ("limit", limit.as_str()),
            ])
        })
        .await?;

    Ok(res.artists.items)
}
