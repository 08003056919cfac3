//! Integration tests for the playlists vertical slice.
//!
//! Covers the default-playlist bootstrap, track-key ordering, the
//! empty-description round-trip, and link-row cascade on delete.

mod test_helpers;

use cadenza_storage::{playlists, seed};
use sqlx::Row;
use test_helpers::*;

#[tokio::test]
async fn first_playlist_is_favorites_with_dedicated_cover() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let listener = create_test_listener(pool, "Maya", "maya@example.com").await;

    let first = playlists::create_for_listener(pool, listener.id)
        .await
        .unwrap();
    assert_eq!(first.title, playlists::FAVORITES_TITLE);
    assert_eq!(first.creator_id, listener.id);

    let cover = cadenza_storage::pictures::get_playlist_cover(pool, first.cover_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cover.file_path, seed::FAVORITES_COVER_PATH);

    // The creator link row exists.
    let linked = playlists::get_for_listener(pool, listener.id).await.unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, first.id);
}

#[tokio::test]
async fn later_playlists_get_numbered_names_and_generic_cover() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let listener = create_test_listener(pool, "Owen", "owen@example.com").await;

    playlists::create_for_listener(pool, listener.id).await.unwrap();
    let second = playlists::create_for_listener(pool, listener.id)
        .await
        .unwrap();
    let third = playlists::create_for_listener(pool, listener.id)
        .await
        .unwrap();

    assert_eq!(second.title, "Playlist 2");
    assert_eq!(third.title, "Playlist 3");

    let cover = cadenza_storage::pictures::get_playlist_cover(pool, second.cover_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cover.file_path, seed::DEFAULT_COVER_PATH);
}

#[tokio::test]
async fn track_keys_keep_order_and_dedupe() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let listener = create_test_listener(pool, "Ida", "ida@example.com").await;
    let playlist = playlists::create_for_listener(pool, listener.id)
        .await
        .unwrap();

    playlists::add_track_key(pool, playlist.id, "item1/01 Intro.mp3")
        .await
        .unwrap();
    playlists::add_track_key(pool, playlist.id, "1468123")
        .await
        .unwrap();
    // Adding the same key twice is a no-op.
    let after_dupe = playlists::add_track_key(pool, playlist.id, "item1/01 Intro.mp3")
        .await
        .unwrap();

    assert_eq!(
        after_dupe.track_keys,
        vec!["item1/01 Intro.mp3".to_string(), "1468123".to_string()]
    );

    let after_remove = playlists::remove_track_key(pool, playlist.id, "item1/01 Intro.mp3")
        .await
        .unwrap();
    assert_eq!(after_remove.track_keys, vec!["1468123".to_string()]);
}

#[tokio::test]
async fn empty_description_round_trips_as_empty() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let listener = create_test_listener(pool, "June", "june@example.com").await;
    let playlist = playlists::create_for_listener(pool, listener.id)
        .await
        .unwrap();

    let updated = playlists::update(pool, playlist.id, "Morning Mix", "", None)
        .await
        .unwrap();
    assert_eq!(updated.title, "Morning Mix");
    assert_eq!(updated.description.as_deref(), Some(""));

    let reloaded = playlists::get_by_id(pool, playlist.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.description.as_deref(), Some(""));
}

#[tokio::test]
async fn update_with_cover_appends_a_cover_row() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let listener = create_test_listener(pool, "Tomas", "tomas@example.com").await;
    let playlist = playlists::create_for_listener(pool, listener.id)
        .await
        .unwrap();
    let original_cover = playlist.cover_id;

    let updated = playlists::update(
        pool,
        playlist.id,
        "Reworked",
        "fresh cover",
        Some("/pictures/cadenza/PlaylistCovers/PlaylistCover_0.png"),
    )
    .await
    .unwrap();

    assert_ne!(updated.cover_id, original_cover);
    // Old cover row remains.
    assert!(cadenza_storage::pictures::get_playlist_cover(pool, original_cover)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn delete_cascades_the_link_row() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let listener = create_test_listener(pool, "Ezra", "ezra@example.com").await;
    let playlist = playlists::create_for_listener(pool, listener.id)
        .await
        .unwrap();

    playlists::delete(pool, playlist.id).await.unwrap();

    assert!(playlists::get_by_id(pool, playlist.id).await.unwrap().is_none());
    assert!(playlists::get_for_listener(pool, listener.id)
        .await
        .unwrap()
        .is_empty());

    let links = sqlx::query("SELECT COUNT(*) AS n FROM listener_playlists WHERE playlist_id = ?")
        .bind(playlist.id)
        .fetch_one(pool)
        .await
        .unwrap();
    assert_eq!(links.get::<i64, _>("n"), 0);
}

#[tokio::test]
async fn registration_scenario_creates_exactly_one_favorites() {
    let db = TestDb::new().await;
    let pool = db.pool();

    // Register listener a@b.com with password abc123 …
    let picture = cadenza_storage::pictures::default_profile_picture(pool)
        .await
        .unwrap();
    let listener = cadenza_storage::listeners::create(
        pool,
        cadenza_storage::listeners::CreateListener {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            password_hash: cadenza_storage::auth::sha256_hex("abc123"),
            profile_picture_id: picture.id,
        },
    )
    .await
    .unwrap();
    playlists::create_for_listener(pool, listener.id).await.unwrap();

    // … exactly one playlist titled "Favorites" is created and linked.
    let linked = playlists::get_for_listener(pool, listener.id).await.unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].title, playlists::FAVORITES_TITLE);
    assert_eq!(playlists::count(pool).await.unwrap(), 1);
}
