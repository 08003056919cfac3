//! Integration tests for the archive adapter against a mock HTTP server.

use cadenza_catalog::{ArchiveCatalog, Catalog};
use cadenza_core::TrackKey;
use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_search(server: &MockServer, docs: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/advancedsearch.php"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "response": { "docs": docs, "numFound": 2 }
            })),
        )
        .mount(server)
        .await;
}

async fn mock_metadata(server: &MockServer, identifier: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/metadata/{identifier}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn search_normalizes_polymorphic_docs() {
    let server = MockServer::start().await;

    mock_search(
        &server,
        json!([
            { "identifier": "live1977", "title": ["", "Barton Hall"], "creator": "Grateful Dead" },
            { "identifier": "noaudio", "title": "Flyers", "creator": 1977 }
        ]),
    )
    .await;

    mock_metadata(
        &server,
        "live1977",
        json!({
            "metadata": { "title": ["", "Barton Hall"], "creator": "Grateful Dead", "subject": ["rock", "live"] },
            "files": [
                { "name": "cover.jpg", "format": "JPEG" },
                { "name": "02 Scarlet.mp3", "format": "VBR MP3", "length": "245", "track": "2" },
                { "name": "01 Intro.mp3", "format": "VBR MP3", "length": "3:45", "title": "Intro", "track": "1" }
            ]
        }),
    )
    .await;

    // An item whose files are all non-audio yields no track.
    mock_metadata(
        &server,
        "noaudio",
        json!({
            "metadata": { "title": "Flyers", "creator": 1977 },
            "files": [ { "name": "scan.jpg", "format": "JPEG" } ]
        }),
    )
    .await;

    let catalog = ArchiveCatalog::with_base_url(server.uri()).unwrap();
    let outcome = catalog
        .search("grateful dead", 10, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.tracks.len(), 1);
    let track = &outcome.tracks[0];
    assert_eq!(track.id.as_str(), "live1977/01 Intro.mp3");
    assert_eq!(track.title, "Intro");
    assert_eq!(track.artist, "Grateful Dead");
    assert_eq!(track.album.as_deref(), Some("Barton Hall"));
    assert_eq!(track.duration, Some(Duration::from_secs(225)));
    assert_eq!(track.genre.as_deref(), Some("rock"));
    assert!(track
        .stream_url
        .as_deref()
        .unwrap()
        .ends_with("/download/live1977/01%20Intro.mp3"));

    // Albums and artists are grouped from the loaded tracks.
    assert_eq!(outcome.albums.len(), 1);
    assert_eq!(outcome.albums[0].title, "Barton Hall");
    assert_eq!(outcome.artists.len(), 1);
    assert_eq!(outcome.artists[0].name, "Grateful Dead");
}

#[tokio::test]
async fn album_tracks_prefer_vbr_and_order_by_number() {
    let server = MockServer::start().await;

    mock_metadata(
        &server,
        "item",
        json!({
            "metadata": { "title": "Album", "creator": "Artist" },
            "files": [
                { "name": "two.flac", "format": "FLAC", "track": "2", "title": "Two (lossless)" },
                { "name": "two_vbr.mp3", "format": "VBR MP3", "track": "2", "title": "Two" },
                { "name": "one.flac", "format": "FLAC", "track": "1", "title": "One" },
                { "name": "bonus.mp3", "format": "MP3", "track": "not-a-number", "title": "Bonus" }
            ]
        }),
    )
    .await;

    let catalog = ArchiveCatalog::with_base_url(server.uri()).unwrap();
    let tracks = catalog.album_tracks("item").await.unwrap();

    let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
    // Track "two" keeps only the VBR MP3 encoding; the unnumbered bonus
    // file sorts last.
    assert_eq!(titles, vec!["One", "Two", "Bonus"]);
    assert_eq!(tracks[1].id.as_str(), "item/two_vbr.mp3");
}

#[tokio::test]
async fn track_resolves_percent_encoded_file_names() {
    let server = MockServer::start().await;

    mock_metadata(
        &server,
        "item",
        json!({
            "metadata": { "title": "Album", "creator": "Artist" },
            "files": [
                { "name": "My Song.mp3", "format": "VBR MP3", "length": "245" }
            ]
        }),
    )
    .await;

    let catalog = ArchiveCatalog::with_base_url(server.uri()).unwrap();
    let key = TrackKey::from_raw("item/My%20Song.mp3");
    let track = catalog.track(&key).await.unwrap().unwrap();

    // The returned id preserves the caller's key form.
    assert_eq!(track.id, key);
    assert_eq!(track.title, "My Song");
    assert_eq!(track.duration, Some(Duration::from_secs(245)));
}

#[tokio::test]
async fn malformed_key_is_an_error() {
    let server = MockServer::start().await;
    let catalog = ArchiveCatalog::with_base_url(server.uri()).unwrap();

    let result = catalog.track(&TrackKey::from_raw("no-separator")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn server_errors_degrade_to_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/advancedsearch.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let catalog = ArchiveCatalog::with_base_url(server.uri()).unwrap();
    let outcome = catalog
        .search("anything", 10, CancellationToken::new())
        .await
        .unwrap();
    assert!(!outcome.has_results());
}

#[tokio::test]
async fn cancellation_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/advancedsearch.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": { "docs": [], "numFound": 0 } }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let catalog = ArchiveCatalog::with_base_url(server.uri()).unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let result = catalog.search("anything", 10, token).await;
    assert!(matches!(
        result,
        Err(cadenza_catalog::CatalogError::Cancelled)
    ));
}

#[tokio::test]
async fn statistics_joins_counts_and_genres() {
    let server = MockServer::start().await;

    // All advanced-search calls (counts, popular lookups, genre counts)
    // share one template; the counts dominate the assertions.
    Mock::given(method("GET"))
        .and(path("/advancedsearch.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "docs": [
                    { "identifier": "pop1", "title": "Top Item", "creator": "Top Artist" }
                ],
                "numFound": 1234
            }
        })))
        .mount(&server)
        .await;

    mock_metadata(
        &server,
        "pop1",
        json!({
            "metadata": { "title": "Top Item", "creator": "Top Artist" },
            "files": [ { "name": "hit.mp3", "format": "VBR MP3", "length": "200" } ]
        }),
    )
    .await;

    let catalog = ArchiveCatalog::with_base_url(server.uri()).unwrap();
    let stats = catalog.statistics(CancellationToken::new()).await.unwrap();

    assert_eq!(stats.total_audio_items, 1234);
    assert_eq!(stats.total_music_items, 1234);
    assert_eq!(stats.most_popular_track.unwrap().title, "hit");
    assert_eq!(stats.most_popular_album.unwrap().title, "Top Item");
    assert_eq!(stats.most_popular_artist.unwrap().name, "Top Artist");
    assert_eq!(stats.genre_stats.len(), 8);
    assert!(stats.genre_stats.iter().all(|(_, count)| *count == 1234));
}
