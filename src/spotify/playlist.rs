use crate::{
    Res,
    sink::{MAX_PLAYLIST_BATCH, PlaylistSink},
    spotify::SpotifyClient,
    types::{AddTrackToPlaylistRequest, AddTrackToPlaylistResponse},
    utils,
};

/// Appends tracks to the end of a playlist.
///
/// Spotify rejects more than [`MAX_PLAYLIST_BATCH`] URIs per call; larger
/// lists have to be split by the caller (see [`crate::sink::deliver`]).
///
/// # Returns
///
/// The playlist's new snapshot id.
pub async fn add_tracks(
    client: &mut SpotifyClient,
    playlist_id: &str,
    uris: Vec<String>,
) -> Res<String> {
    if uris.len() > MAX_PLAYLIST_BATCH {
        return Err(format!(
            "Cannot add {} tracks at once, the limit is {}",
            uris.len(),
            MAX_PLAYLIST_BATCH
        )
        .into());
    }

    let api_url = client.endpoint(&format!("playlists/{}/tracks", playlist_id));
    let body = AddTrackToPlaylistRequest { uris };

    let res: AddTrackToPlaylistResponse = client
        .request_json(|http| http.post(&api_url).json(&body))
        .await?;

    Ok(res.snapshot_id)
}

/// A Spotify playlist used as the songlist's destination.
pub struct SpotifyPlaylist<'a> {
    client: &'a mut SpotifyClient,
    playlist_id: String,
}

impl<'a> SpotifyPlaylist<'a> {
    pub fn new(client: &'a mut SpotifyClient, playlist_id: String) -> Self {
        Self {
            client,
            playlist_id,
        }
    }
}

impl PlaylistSink for SpotifyPlaylist<'_> {
    async fn add_batch(&mut self, track_ids: &[String]) -> Res<()> {
        let uris = track_ids.iter().map(|id| utils::track_uri(id)).collect();
        add_tracks(self.client, &self.playlist_id, uris).await?;
        Ok(())
    }
}
