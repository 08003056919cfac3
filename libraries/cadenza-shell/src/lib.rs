//! Cadenza Shell
//!
//! The presentation-agnostic application layer: the page navigator, the
//! card view-model factory, and the session/search/library/admin
//! controllers that the original windows wired into widgets.
//!
//! Nothing here renders. A frontend builds visuals from [`Card`]s and
//! view structs, forwards clicks to [`App::activate`], and drains
//! playback events from [`App::player`] for the now-playing surface.

#![forbid(unsafe_code)]

mod admin;
mod app;
mod cards;
mod library;
mod navigator;
mod search;
mod session;

pub use admin::{AdminController, ReportView, StatisticsView};
pub use app::{AlbumView, App, ArtistView, CollectionView, HomeView, Opened, SearchView};
pub use cards::{
    album_card, album_container, artist_card, listener_card, player_track, playlist_card,
    playlist_container, track_card, Card, CardAction, CardKind,
};
pub use library::LibraryController;
pub use navigator::{Navigator, Page};
pub use search::SearchController;
pub use session::{RegistrationForm, Session};
