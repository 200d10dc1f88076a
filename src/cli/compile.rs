use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    Res,
    catalog::{self, ExcludeAll, IncludeAll, InclusionPolicy, Track},
    cli::prompt::{PromptPolicy, PromptSelector},
    config, error, info,
    provider::{self, CatalogProvider},
    sink,
    spotify::{SpotifyClient, playlist::SpotifyPlaylist},
    success,
    types::SongTableRow,
    utils, warning,
};

/// How impure releases (guest appearances, compilations) are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImpurePolicy {
    /// Ask which ones to keep.
    #[default]
    Ask,
    Include,
    Exclude,
}

#[derive(Debug, Clone)]
pub struct CompileRequest {
    pub artist: String,
    pub reverse: bool,
    pub dry_run: bool,
    pub playlist_id: Option<String>,
    pub impure: ImpurePolicy,
}

pub async fn compile(request: CompileRequest) {
    let mut client = match SpotifyClient::connect().await {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    };

    let songs = match build_songlist(&mut client, &request).await {
        Ok(songs) => songs,
        Err(e) => error!("{}", e),
    };

    if request.dry_run {
        print_songlist(&songs);
        return;
    }

    let playlist_id = match request.playlist_id.clone() {
        Some(id) => id,
        None => match config::spotify_playlist_id() {
            Ok(id) => id,
            Err(e) => error!("No playlist given. Use --playlist or set {}", e),
        },
    };

    info!("Adding {} songs to the playlist...", songs.len());
    let mut playlist = SpotifyPlaylist::new(&mut client, playlist_id);
    match sink::deliver(&mut playlist, &songs).await {
        Ok(count) => success!("Added {} songs to the playlist.", count),
        Err(e) => error!("Failed to add songs to the playlist: {}", e),
    }
}

async fn build_songlist(client: &mut SpotifyClient, request: &CompileRequest) -> Res<Vec<Track>> {
    let artist_id = resolve_artist_id(client, &request.artist).await?;

    let pb = spinner("Fetching releases...");
    let listing = client.artist_releases(&artist_id).await;
    pb.finish_and_clear();
    let listing = listing?;

    if listing.is_empty() {
        warning!("No releases listed for this artist.");
    }

    let mut policy: Box<dyn InclusionPolicy> = match request.impure {
        ImpurePolicy::Ask => Box::new(PromptPolicy::default()),
        ImpurePolicy::Include => Box::new(IncludeAll),
        ImpurePolicy::Exclude => Box::new(ExcludeAll),
    };
    let selected = catalog::select_releases(&artist_id, listing, policy.as_mut())?;

    info!("Getting albums...");
    let pb = spinner("Fetching tracks...");
    let releases = provider::fetch_releases(client, selected, |done, total, name| {
        pb.set_message(format!("Fetching tracks of {} ({}/{})", name, done + 1, total));
    })
    .await;
    pb.finish_and_clear();
    let releases = releases?;

    info!("Compiling songlist...");
    Ok(catalog::compile_songlist(releases, request.reverse)?)
}

/// Turns a link or a name into an artist id, searching and asking for
/// confirmation when needed.
async fn resolve_artist_id(client: &mut SpotifyClient, artist: &str) -> Res<String> {
    if let Some(id) = utils::artist_id_from_url(artist) {
        return Ok(id);
    }

    let pb = spinner("Searching artist...");
    let hits = client.search_artists(artist).await;
    pb.finish_and_clear();

    let mut selector = PromptSelector::default();
    let chosen = catalog::resolve_artist(artist, hits?, &mut selector)?;
    Ok(chosen.id)
}

fn print_songlist(songs: &[Track]) {
    info!("Songs would have been added in this order:");

    let rows: Vec<SongTableRow> = songs
        .iter()
        .enumerate()
        .map(|(i, song)| SongTableRow {
            position: i + 1,
            name: song.name.clone(),
            album: song.album_name.clone(),
            release_date: song.release_date.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
