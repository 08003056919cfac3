//! Application wiring: pages, activation dispatch, transport passthrough.
//!
//! [`App`] owns the storage pool, the catalog, the playback controller,
//! and the per-concern controllers. A frontend renders the view structs,
//! feeds clicks into [`App::activate`], and drives [`App::tick`] from its
//! render loop.

use crate::admin::AdminController;
use crate::cards::{
    album_card, album_container, artist_card, listener_card, player_track, playlist_card,
    playlist_container, track_card, Card, CardAction,
};
use crate::library::LibraryController;
use crate::navigator::{Navigator, Page};
use crate::search::{SearchController, DEFAULT_SEARCH_LIMIT};
use crate::session::{RegistrationForm, Session};
use cadenza_catalog::Catalog;
use cadenza_core::{Album, Artist, CadenzaError, Listener, Playlist, Result, Track, TrackKey};
use cadenza_playback::{PlayerController, PlayerTrack, StreamOpener};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::warn;

/// Home page view data.
#[derive(Debug, Clone)]
pub struct HomeView {
    /// Popular tracks
    pub track_cards: Vec<Card>,
    /// Popular albums
    pub album_cards: Vec<Card>,
    /// Popular artists
    pub artist_cards: Vec<Card>,
}

/// Search results view data.
#[derive(Debug, Clone)]
pub struct SearchView {
    /// The query that produced these results
    pub query: String,
    /// Matching tracks
    pub track_cards: Vec<Card>,
    /// Matching albums
    pub album_cards: Vec<Card>,
    /// Matching artists
    pub artist_cards: Vec<Card>,
}

/// An opened album page.
#[derive(Debug, Clone)]
pub struct AlbumView {
    /// The album, tracks loaded
    pub album: Album,
    /// Track cards tagged with the album container
    pub track_cards: Vec<Card>,
}

/// An opened artist page.
#[derive(Debug, Clone)]
pub struct ArtistView {
    /// The artist, top tracks and albums loaded
    pub artist: Artist,
    /// Top-track cards
    pub track_cards: Vec<Card>,
    /// Album cards
    pub album_cards: Vec<Card>,
}

/// An opened playlist collection page.
#[derive(Debug, Clone)]
pub struct CollectionView {
    /// The playlist row
    pub playlist: Playlist,
    /// Resolved, playable tracks tagged with the playlist container
    pub track_cards: Vec<Card>,
}

/// What a card activation produced.
#[derive(Debug)]
pub enum Opened {
    /// Playback was handed the track (errors surface as playback events)
    Played,
    /// An album page
    Album(Box<AlbumView>),
    /// An artist page
    Artist(Box<ArtistView>),
    /// A playlist collection page
    Collection(Box<CollectionView>),
    /// A ban flag was flipped
    BanToggled {
        /// The listener whose flag changed
        listener_id: i64,
        /// The new status
        banned: bool,
    },
}

/// The assembled application.
pub struct App {
    pool: SqlitePool,
    catalog: Arc<dyn Catalog>,

    /// Playback controller; drain its events for the now-playing surface.
    pub player: PlayerController,
    /// Page journal.
    pub navigator: Navigator,
    /// Signed-in account state.
    pub session: Session,
    /// Latest-wins search front.
    pub search: SearchController,
    /// Playlist operations.
    pub library: LibraryController,
    /// Admin operations.
    pub admin: AdminController,
}

impl App {
    /// Assemble the application over a pool, a catalog, and a platform
    /// stream opener.
    pub fn new(pool: SqlitePool, catalog: Arc<dyn Catalog>, opener: Box<dyn StreamOpener>) -> Self {
        Self {
            pool,
            catalog: Arc::clone(&catalog),
            player: PlayerController::new(opener),
            navigator: Navigator::new(),
            session: Session::new(),
            search: SearchController::new(Arc::clone(&catalog)),
            library: LibraryController::new(Arc::clone(&catalog)),
            admin: AdminController::new(catalog),
        }
    }

    /// The storage pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // --- pages ----------------------------------------------------------

    /// Load the home page: popular tracks, albums, and artists.
    pub async fn home(&mut self) -> Result<HomeView> {
        let (tracks, albums, artists) = tokio::join!(
            self.catalog.popular_tracks(10),
            self.catalog.popular_albums(10),
            self.catalog.popular_artists(10),
        );

        self.navigator.navigate(Page::Home);
        Ok(HomeView {
            track_cards: tracks
                .map_err(CadenzaError::from)?
                .iter()
                .map(|t| track_card(t, None))
                .collect(),
            album_cards: albums
                .map_err(CadenzaError::from)?
                .iter()
                .map(album_card)
                .collect(),
            artist_cards: artists
                .map_err(CadenzaError::from)?
                .iter()
                .map(artist_card)
                .collect(),
        })
    }

    /// React to the search box changing.
    ///
    /// Empty text cancels any in-flight search and returns to home; text
    /// runs a latest-wins search. A superseded call returns
    /// [`CadenzaError::Cancelled`] — drop it, a newer result is coming.
    pub async fn search_input_changed(&mut self, text: &str) -> Result<Option<SearchView>> {
        if text.is_empty() {
            self.search.cancel();
            self.navigator.navigate(Page::Home);
            return Ok(None);
        }

        let outcome = self
            .search
            .search(text, DEFAULT_SEARCH_LIMIT)
            .await
            .map_err(CadenzaError::from)?;

        self.navigator.navigate(Page::Search {
            query: text.to_string(),
        });

        Ok(Some(SearchView {
            query: text.to_string(),
            track_cards: outcome.tracks.iter().map(|t| track_card(t, None)).collect(),
            album_cards: outcome.albums.iter().map(album_card).collect(),
            artist_cards: outcome.artists.iter().map(artist_card).collect(),
        }))
    }

    /// Open an album page; its track cards carry the album container.
    pub async fn open_album(&mut self, id: &str) -> Result<AlbumView> {
        let mut album = self
            .catalog
            .album(id)
            .await
            .map_err(CadenzaError::from)?
            .ok_or_else(|| CadenzaError::not_found("Album", id))?;

        if album.tracks.is_empty() {
            album.tracks = self
                .catalog
                .album_tracks(id)
                .await
                .map_err(CadenzaError::from)?;
        }

        self.navigator.navigate(Page::Album { id: id.to_string() });

        let container = album_container(&album);
        let track_cards = album
            .tracks
            .iter()
            .map(|t| track_card(t, Some(container.clone())))
            .collect();

        Ok(AlbumView { album, track_cards })
    }

    /// Open an artist page.
    pub async fn open_artist(&mut self, id: &str) -> Result<ArtistView> {
        let mut artist = self
            .catalog
            .artist(id)
            .await
            .map_err(CadenzaError::from)?
            .ok_or_else(|| CadenzaError::not_found("Artist", id))?;

        if artist.top_tracks.is_empty() {
            artist.top_tracks = self
                .catalog
                .artist_tracks(id)
                .await
                .map_err(CadenzaError::from)?;
        }
        if artist.albums.is_empty() {
            artist.albums = self
                .catalog
                .artist_albums(id)
                .await
                .map_err(CadenzaError::from)?;
        }

        self.navigator.navigate(Page::Artist { id: id.to_string() });

        Ok(ArtistView {
            track_cards: artist
                .top_tracks
                .iter()
                .map(|t| track_card(t, None))
                .collect(),
            album_cards: artist.albums.iter().map(album_card).collect(),
            artist,
        })
    }

    /// Open a playlist collection page, resolving its track keys through
    /// the catalog.
    pub async fn open_collection(&mut self, playlist_id: i64) -> Result<CollectionView> {
        let playlist = cadenza_storage::playlists::get_by_id(&self.pool, playlist_id)
            .await
            .map_err(CadenzaError::from)?
            .ok_or_else(|| CadenzaError::not_found("Playlist", playlist_id.to_string()))?;

        let tracks = self.library.resolve_tracks(&playlist).await?;

        self.navigator.navigate(Page::Collection { playlist_id });

        let container = playlist_container(&playlist, &tracks);
        let track_cards = tracks
            .iter()
            .map(|t| track_card(t, Some(container.clone())))
            .collect();

        Ok(CollectionView {
            playlist,
            track_cards,
        })
    }

    /// The signed-in listener's library page.
    pub async fn library_page(&mut self) -> Result<Vec<Card>> {
        let listener_id = self.require_listener()?.id;
        let playlists = self.library.playlists(&self.pool, listener_id).await?;

        let mut cards = Vec::with_capacity(playlists.len());
        for playlist in &playlists {
            let cover = cadenza_storage::pictures::get_playlist_cover(&self.pool, playlist.cover_id)
                .await
                .map_err(CadenzaError::from)?
                .map(|c| c.file_path);
            cards.push(playlist_card(playlist, cover));
        }

        self.navigator.navigate(Page::Library);
        Ok(cards)
    }

    /// The listening-history pane, newest entry last.
    pub fn history_cards(&self) -> Vec<Card> {
        self.player
            .history()
            .entries()
            .iter()
            .map(|entry| track_card(&track_from_player(entry), None))
            .collect()
    }

    /// The admin ban list as cards.
    pub async fn ban_list_page(&mut self, name_filter: &str) -> Result<Vec<Card>> {
        let listeners = self.admin.ban_list(&self.pool, name_filter).await?;

        let mut cards = Vec::with_capacity(listeners.len());
        for listener in &listeners {
            let picture = cadenza_storage::pictures::get_profile_picture(
                &self.pool,
                listener.profile_picture_id,
            )
            .await
            .map_err(CadenzaError::from)?
            .map(|p| p.file_path);
            cards.push(listener_card(listener, picture));
        }

        self.navigator.navigate(Page::AdminBanList);
        Ok(cards)
    }

    /// The admin statistics page (latest request wins).
    pub async fn statistics_page(&mut self) -> Result<crate::admin::StatisticsView> {
        self.navigator.navigate(Page::AdminStatistics);
        self.admin.statistics(&self.pool).await
    }

    /// The admin report page.
    pub async fn report_page(&mut self) -> Result<crate::admin::ReportView> {
        self.navigator.navigate(Page::AdminReport);
        self.admin.report(&self.pool).await
    }

    // --- activation -----------------------------------------------------

    /// Dispatch a card activation: play the tagged track, open the tagged
    /// album/artist/playlist, or flip a ban flag.
    pub async fn activate(&mut self, card: Card) -> Result<Opened> {
        match card.action {
            CardAction::PlayTrack { track, container } => {
                // Playback failures surface through drained events; the
                // activation itself succeeds.
                if let Err(err) = self.player.select(player_track(&track), container) {
                    warn!(error = %err, "track selection failed");
                }
                Ok(Opened::Played)
            }
            CardAction::OpenAlbum { id } => {
                Ok(Opened::Album(Box::new(self.open_album(&id).await?)))
            }
            CardAction::OpenArtist { id } => {
                Ok(Opened::Artist(Box::new(self.open_artist(&id).await?)))
            }
            CardAction::OpenPlaylist { id } => Ok(Opened::Collection(Box::new(
                self.open_collection(id).await?,
            ))),
            CardAction::ToggleBan { listener_id } => {
                let banned = self.admin.toggle_ban(&self.pool, listener_id).await?;
                Ok(Opened::BanToggled {
                    listener_id,
                    banned,
                })
            }
        }
    }

    // --- session --------------------------------------------------------

    /// Register a listener, then land on the login page.
    pub async fn register(&mut self, form: &RegistrationForm) -> Result<Listener> {
        let listener = self.session.register(&self.pool, form).await?;
        self.navigator.navigate(Page::Login);
        Ok(listener)
    }

    /// Sign a listener in and land on home.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Listener> {
        let listener = self.session.login(&self.pool, email, password).await?.clone();
        self.player.stop();
        self.navigator.navigate(Page::Home);
        Ok(listener)
    }

    /// Sign an admin in and land on the ban list.
    pub async fn login_admin(&mut self, login: &str, password: &str) -> Result<()> {
        self.session.login_admin(&self.pool, login, password).await?;
        self.navigator.navigate(Page::AdminBanList);
        Ok(())
    }

    fn require_listener(&self) -> Result<&Listener> {
        self.session
            .listener()
            .ok_or_else(|| CadenzaError::validation("Not signed in"))
    }

    // --- transport passthrough ------------------------------------------

    /// Play/pause toggle for the player bar.
    pub fn toggle_playback(&mut self) {
        self.player.toggle();
    }

    /// The "next" control.
    pub fn next_track(&mut self) {
        if let Err(err) = self.player.next() {
            warn!(error = %err, "next failed");
        }
    }

    /// The "previous" control.
    pub fn previous_track(&mut self) {
        if let Err(err) = self.player.previous() {
            warn!(error = %err, "previous failed");
        }
    }

    /// Drive continuation from the render loop.
    pub fn tick(&mut self) {
        if let Err(err) = self.player.tick() {
            warn!(error = %err, "continuation failed");
        }
    }

    /// Navigate back, returning the new page.
    pub fn back(&mut self) -> Option<Page> {
        self.navigator.back().cloned()
    }

    /// Navigate forward, returning the new page.
    pub fn forward(&mut self) -> Option<Page> {
        self.navigator.forward().cloned()
    }
}

/// Rebuild a catalog-shaped track from a history entry (enough for a
/// card and replay; catalog-only fields stay empty).
fn track_from_player(entry: &PlayerTrack) -> Track {
    Track {
        id: TrackKey::from_raw(entry.key.clone()),
        title: entry.title.clone(),
        artist: entry.artist.clone(),
        artist_id: None,
        album: entry.album.clone(),
        album_id: None,
        cover_url: None,
        stream_url: entry.stream_url.clone(),
        duration: entry.duration,
        genre: None,
        track_number: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_round_trips_through_the_player_projection() {
        let player = PlayerTrack {
            key: "item/a.mp3".to_string(),
            title: "A".to_string(),
            artist: "Artist".to_string(),
            album: Some("Album".to_string()),
            stream_url: Some("http://s/a".to_string()),
            duration: None,
        };

        let track = track_from_player(&player);
        assert_eq!(track.id.as_str(), "item/a.mp3");
        assert_eq!(player_track(&track), player);
    }
}
