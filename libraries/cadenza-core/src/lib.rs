//! Cadenza Core
//!
//! Domain types, validation, and error handling shared across the Cadenza
//! music client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Catalog Types**: `Track`, `Album`, `Artist` — transient records
//!   fetched live from external catalogs, never persisted locally.
//! - **Account Types**: `Listener`, `Admin`, `Playlist` and their picture
//!   rows — persisted by `cadenza-storage`.
//! - **Validation**: email/password checks used by registration and login.
//! - **Error Handling**: unified `CadenzaError` and `Result` types.
//!
//! A track's identity is the opaque catalog key `"{itemId}/{fileName}"`
//! (archive adapter) or a numeric id rendered as a string (Jamendo
//! adapter); playlists store these keys as plain strings, not foreign keys.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;
pub mod validate;

pub use error::{CadenzaError, Result};

pub use types::{
    Admin, Album, Artist, Listener, ListenerPlaylistLink, Playlist, PlaylistCover,
    ProfilePicture, Track, TrackKey,
};
