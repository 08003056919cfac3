//! Domain types for the Cadenza client

mod account;
mod album;
mod artist;
mod playlist;
mod track;

pub use account::{Admin, Listener, ProfilePicture};
pub use album::Album;
pub use artist::Artist;
pub use playlist::{ListenerPlaylistLink, Playlist, PlaylistCover, MAX_DESCRIPTION_LEN};
pub use track::{Track, TrackKey};
