use std::collections::HashMap;

use chrono::NaiveDate;
use songlist::Res;
use songlist::catalog::{self, ExcludeAll, IncludeAll, ReleaseCandidate, ReleaseType, Track};
use songlist::provider::{CatalogProvider, fetch_releases};
use songlist::sink::{MAX_PLAYLIST_BATCH, PlaylistSink, deliver};
use songlist::types::{AlbumTrack, Artist};

const ARTIST_ID: &str = "artist_1";

// In-memory provider serving a fixed listing and track lists
struct FakeCatalog {
    listing: Vec<ReleaseCandidate>,
    tracks: HashMap<String, Vec<AlbumTrack>>,
    fetched: Vec<String>,
}

impl FakeCatalog {
    fn new() -> Self {
        Self {
            listing: Vec::new(),
            tracks: HashMap::new(),
            fetched: Vec::new(),
        }
    }

    fn with_release(
        mut self,
        id: &str,
        release_date: &str,
        album_type: &str,
        artist_ids: &[&str],
        track_names: &[&str],
    ) -> Self {
        self.listing.push(ReleaseCandidate {
            id: id.to_string(),
            name: id.to_string(),
            release_date: NaiveDate::parse_from_str(release_date, "%Y-%m-%d").unwrap(),
            album_type: album_type.to_string(),
            album_group: Some(album_type.to_string()),
            total_tracks: track_names.len() as u32,
            artist_ids: artist_ids.iter().map(|a| a.to_string()).collect(),
            url: String::new(),
        });
        self.tracks.insert(
            id.to_string(),
            track_names
                .iter()
                .enumerate()
                .map(|(i, name)| AlbumTrack {
                    id: format!("{}:{}", id, i + 1),
                    name: name.to_string(),
                    track_number: i as u32 + 1,
                })
                .collect(),
        );
        self
    }
}

impl CatalogProvider for FakeCatalog {
    async fn search_artists(&mut self, _query: &str) -> Res<Vec<Artist>> {
        Ok(Vec::new())
    }

    async fn artist_releases(&mut self, _artist_id: &str) -> Res<Vec<ReleaseCandidate>> {
        Ok(self.listing.clone())
    }

    async fn release_tracks(&mut self, release_id: &str) -> Res<Vec<AlbumTrack>> {
        self.fetched.push(release_id.to_string());
        self.tracks
            .get(release_id)
            .cloned()
            .ok_or_else(|| format!("unknown release {}", release_id).into())
    }
}

// Sink recording every batch it receives
#[derive(Default)]
struct RecordingSink {
    batches: Vec<Vec<String>>,
    fail_on_batch: Option<usize>,
}

impl PlaylistSink for RecordingSink {
    async fn add_batch(&mut self, track_ids: &[String]) -> Res<()> {
        if self.fail_on_batch == Some(self.batches.len()) {
            return Err("playlist rejected the batch".into());
        }
        self.batches.push(track_ids.to_vec());
        Ok(())
    }
}

fn tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| Track {
            id: format!("id{}", i),
            name: format!("Song {}", i),
            track_number: i as u32 + 1,
            album_name: "Album".to_string(),
            release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        })
        .collect()
}

#[tokio::test]
async fn test_compile_from_provider() {
    let mut provider = FakeCatalog::new()
        .with_release("album-2021", "2021-03-01", "album", &[ARTIST_ID], &["Intro", "Lead", "Outro"])
        .with_release("single-2020", "2020-10-01", "single", &[ARTIST_ID], &["Lead"])
        .with_release("feature", "2020-05-01", "single", &[ARTIST_ID, "guest"], &["Guest Spot"])
        .with_release(
            "long-single",
            "2019-01-01",
            "single",
            &[ARTIST_ID],
            &["One", "Two", "Three", "Four", "Five", "Six"],
        );

    let listing = provider.artist_releases(ARTIST_ID).await.unwrap();
    let selected = catalog::select_releases(ARTIST_ID, listing, &mut ExcludeAll).unwrap();

    let mut progress = Vec::new();
    let releases = fetch_releases(&mut provider, selected, |done, total, name| {
        progress.push(format!("{}/{} {}", done + 1, total, name));
    })
    .await
    .unwrap();

    // The feature was never fetched and releases are date ordered
    assert_eq!(provider.fetched, vec!["long-single", "single-2020", "album-2021"]);
    assert_eq!(progress[0], "1/3 long-single");

    // Six-track single is merged as an EP
    assert_eq!(releases[0].release_type, ReleaseType::Ep);

    let songs = catalog::compile_songlist(releases, false).unwrap();
    let names: Vec<&str> = songs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["One", "Two", "Three", "Four", "Five", "Six", "Intro", "Lead", "Outro"]
    );
    assert_eq!(songs[7].id, "single-2020:1");
}

#[tokio::test]
async fn test_compile_keeps_included_impure_releases() {
    let mut provider = FakeCatalog::new()
        .with_release("album", "2021-03-01", "album", &[ARTIST_ID], &["A", "B"])
        .with_release("feature", "2022-05-01", "single", &[ARTIST_ID, "guest"], &["Guest Spot"]);

    let listing = provider.artist_releases(ARTIST_ID).await.unwrap();
    let selected = catalog::select_releases(ARTIST_ID, listing, &mut IncludeAll).unwrap();
    let releases = fetch_releases(&mut provider, selected, |_, _, _| {})
        .await
        .unwrap();

    let songs = catalog::compile_songlist(releases, true).unwrap();
    let names: Vec<&str> = songs.iter().map(|s| s.name.as_str()).collect();

    assert_eq!(names, vec!["Guest Spot", "B", "A"]);
}

#[tokio::test]
async fn test_fetch_failure_is_propagated() {
    let mut provider = FakeCatalog::new().with_release("album", "2021-03-01", "album", &[ARTIST_ID], &["A"]);
    let mut listing = provider.artist_releases(ARTIST_ID).await.unwrap();
    listing[0].id = "missing".to_string();

    let result = fetch_releases(&mut provider, listing, |_, _, _| {}).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_deliver_in_batches() {
    let songs = tracks(250);
    let mut sink = RecordingSink::default();

    let delivered = deliver(&mut sink, &songs).await.unwrap();

    assert_eq!(delivered, 250);
    let sizes: Vec<usize> = sink.batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![MAX_PLAYLIST_BATCH, MAX_PLAYLIST_BATCH, 50]);

    // Order is preserved across batches
    let flat: Vec<String> = sink.batches.concat();
    let expected: Vec<String> = songs.iter().map(|s| s.id.clone()).collect();
    assert_eq!(flat, expected);
}

#[tokio::test]
async fn test_deliver_exact_batch_and_empty() {
    let mut sink = RecordingSink::default();
    deliver(&mut sink, &tracks(MAX_PLAYLIST_BATCH)).await.unwrap();
    assert_eq!(sink.batches.len(), 1);

    let mut empty = RecordingSink::default();
    let delivered = deliver(&mut empty, &[]).await.unwrap();
    assert_eq!(delivered, 0);
    assert!(empty.batches.is_empty());
}

#[tokio::test]
async fn test_deliver_stops_at_failing_batch() {
    let mut sink = RecordingSink {
        batches: Vec::new(),
        fail_on_batch: Some(1),
    };

    let result = deliver(&mut sink, &tracks(230)).await;

    assert!(result.is_err());
    assert_eq!(sink.batches.len(), 1);
}
