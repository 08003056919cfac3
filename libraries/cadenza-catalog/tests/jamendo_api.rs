//! Integration tests for the Jamendo adapter against a mock HTTP server.

use cadenza_catalog::{Catalog, JamendoCatalog, ResultCache};
use cadenza_core::TrackKey;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_for(server: &MockServer) -> JamendoCatalog {
    JamendoCatalog::with_base_urls(
        "test-client",
        Arc::new(ResultCache::new()),
        server.uri(),
        "https://mp3l.jamendo.com",
    )
    .unwrap()
}

#[tokio::test]
async fn search_joins_tracks_artists_albums() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .and(query_param("search", "ambient dawn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "1468123",
                "name": "Dawn",
                "duration": 245,
                "artist_id": "351716",
                "artist_name": "Nordgroove",
                "album_id": "163917",
                "album_name": "First Light",
                "album_image": "http://img/album.jpg",
                "audio": "http://stream/1468123",
                "musicinfo": { "tags": { "genres": ["ambient"] } }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/artists/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": "351716", "name": "Nordgroove", "image": "http://img/artist.jpg" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/albums/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "163917",
                "name": "First Light",
                "releasedate": "2017-06-30",
                "artist_id": "351716",
                "artist_name": "Nordgroove",
                "image": "http://img/album.jpg"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let outcome = catalog
        .search("ambient dawn", 20, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.tracks.len(), 1);
    assert_eq!(outcome.tracks[0].id.as_str(), "1468123");
    assert_eq!(outcome.tracks[0].artist, "Nordgroove");
    assert_eq!(outcome.tracks[0].duration, Some(Duration::from_secs(245)));
    assert_eq!(outcome.artists.len(), 1);
    assert_eq!(outcome.albums.len(), 1);
    assert_eq!(
        outcome.albums[0].release_date.as_deref(),
        Some("2017-06-30")
    );

    // Identical query within the TTL is served from the cache; the
    // `.expect(1)` mocks verify no second round-trip happens.
    let cached = catalog
        .search("ambient dawn", 20, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(cached.tracks.len(), 1);
}

#[tokio::test]
async fn album_loads_its_tracks_in_position_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/"))
        .and(query_param("id", "163917"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": "163917", "name": "First Light", "artist_name": "Nordgroove" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .and(query_param("album_id", "163917"))
        .and(query_param("order", "position"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "id": "1", "name": "Opening", "duration": 100 },
                { "id": "2", "name": "Middle", "duration": 200 }
            ]
        })))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let album = catalog.album("163917").await.unwrap().unwrap();

    assert_eq!(album.title, "First Light");
    assert_eq!(album.tracks.len(), 2);
    assert_eq!(album.tracks[0].title, "Opening");
    assert_eq!(album.tracks[1].title, "Middle");
}

#[tokio::test]
async fn missing_track_is_none_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let track = catalog
        .track(&TrackKey::from_raw("999999"))
        .await
        .unwrap();
    assert!(track.is_none());
}

#[tokio::test]
async fn network_failure_degrades_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let tracks = catalog.popular_tracks(10).await.unwrap();
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn stream_url_falls_back_to_template() {
    let server = MockServer::start().await;
    let catalog = catalog_for(&server);

    let track = cadenza_core::Track {
        id: TrackKey::from_raw("1468123"),
        title: "Dawn".to_string(),
        artist: "Nordgroove".to_string(),
        artist_id: None,
        album: None,
        album_id: None,
        cover_url: None,
        stream_url: None,
        duration: None,
        genre: None,
        track_number: None,
    };

    let url = catalog.stream_url(&track).await.unwrap().unwrap();
    assert_eq!(url, "https://mp3l.jamendo.com/?trackid=1468123&format=mp32");
}
