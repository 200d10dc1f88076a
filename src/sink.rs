use crate::{Res, catalog::Track};

/// Most track ids a playlist accepts in a single add call.
pub const MAX_PLAYLIST_BATCH: usize = 100;

/// Destination of a compiled songlist.
#[allow(async_fn_in_trait)]
pub trait PlaylistSink {
    /// Appends `track_ids` after whatever the destination already holds.
    ///
    /// Never called with more than [`MAX_PLAYLIST_BATCH`] ids.
    async fn add_batch(&mut self, track_ids: &[String]) -> Res<()>;
}

/// Hands `tracks` to `sink` in order, in batches of at most
/// [`MAX_PLAYLIST_BATCH`]. Returns the number of tracks delivered.
///
/// Stops at the first failing batch; earlier batches stay delivered.
pub async fn deliver<S: PlaylistSink>(sink: &mut S, tracks: &[Track]) -> Res<usize> {
    let track_ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();

    for chunk in track_ids.chunks(MAX_PLAYLIST_BATCH) {
        sink.add_batch(chunk).await?;
    }

    Ok(track_ids.len())
}
