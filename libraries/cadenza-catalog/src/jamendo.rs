//! Jamendo catalog adapter.
//!
//! Talks to the API-key-authenticated Jamendo v3.0 JSON endpoints. Unlike
//! the archive adapter, tracks, albums, and artists are real entities with
//! numeric ids, and every read goes through the TTL result cache.

use crate::cache::{ResultCache, ENTITY_TTL, LIST_TTL, SEARCH_TTL};
use crate::error::{CatalogError, Result};
use crate::{Catalog, CatalogStatistics, SearchOutcome};
use async_trait::async_trait;
use cadenza_core::{Album, Artist, Track, TrackKey};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.jamendo.com/v3.0";
const DEFAULT_STREAM_BASE: &str = "https://mp3l.jamendo.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const UNKNOWN_TITLE: &str = "Unknown";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";

// --- wire types ---------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TracksResponse {
    #[serde(default)]
    results: Vec<JamendoTrack>,
}

#[derive(Debug, Deserialize)]
struct ArtistsResponse {
    #[serde(default)]
    results: Vec<JamendoArtist>,
}

#[derive(Debug, Deserialize)]
struct AlbumsResponse {
    #[serde(default)]
    results: Vec<JamendoAlbum>,
}

#[derive(Debug, Deserialize)]
struct JamendoTrack {
    // Ids arrive as strings even though they are numeric
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    duration: i64,
    #[serde(default)]
    artist_id: String,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    album_id: String,
    #[serde(default)]
    album_name: String,
    #[serde(default)]
    album_image: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    audio: String,
    #[serde(default)]
    musicinfo: Option<MusicInfo>,
}

#[derive(Debug, Deserialize)]
struct MusicInfo {
    #[serde(default)]
    tags: Option<Tags>,
}

#[derive(Debug, Deserialize)]
struct Tags {
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct JamendoArtist {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: String,
}

#[derive(Debug, Deserialize)]
struct JamendoAlbum {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    releasedate: String,
    #[serde(default)]
    artist_id: String,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    image: String,
}

// --- adapter ------------------------------------------------------------

/// Jamendo v3.0 adapter.
pub struct JamendoCatalog {
    http: reqwest::Client,
    base_url: String,
    stream_base: String,
    client_id: String,
    cache: Arc<ResultCache>,
}

impl JamendoCatalog {
    /// Create an adapter against the public Jamendo endpoints.
    pub fn new(client_id: impl Into<String>, cache: Arc<ResultCache>) -> Result<Self> {
        Self::with_base_urls(client_id, cache, DEFAULT_BASE_URL, DEFAULT_STREAM_BASE)
    }

    /// Create an adapter against custom base URLs (integration tests).
    pub fn with_base_urls(
        client_id: impl Into<String>,
        cache: Arc<ResultCache>,
        base_url: impl Into<String>,
        stream_base: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            stream_base: stream_base.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            cache,
        })
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut query = format!("client_id={}&format=json", self.client_id);
        for (key, value) in params {
            query.push('&');
            query.push_str(key);
            query.push('=');
            query.push_str(&urlencoding::encode(value));
        }
        format!("{}/{}/?{}", self.base_url, endpoint, query)
    }

    fn track_stream_url(&self, track_id: &str) -> String {
        format!("{}/?trackid={}&format=mp32", self.stream_base, track_id)
    }

    /// Fetch and deserialize an endpoint. Failures degrade to `None` with
    /// a warning; cancellation propagates.
    async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&CancellationToken>,
    ) -> Result<Option<T>> {
        debug!(url = %url, "jamendo request");

        let request = async {
            self.http
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .json::<T>()
                .await
        };

        let outcome = match token {
            Some(token) => tokio::select! {
                () = token.cancelled() => return Err(CatalogError::Cancelled),
                res = request => res,
            },
            None => request.await,
        };

        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(error = %err, "jamendo request failed");
                Ok(None)
            }
        }
    }

    fn map_track(&self, t: &JamendoTrack) -> Track {
        Track {
            id: TrackKey::from_raw(t.id.clone()),
            title: fallback(&t.name, UNKNOWN_TITLE),
            artist: fallback(&t.artist_name, UNKNOWN_ARTIST),
            artist_id: non_blank(&t.artist_id),
            album: non_blank(&t.album_name),
            album_id: non_blank(&t.album_id),
            cover_url: non_blank(&t.album_image).or_else(|| non_blank(&t.image)),
            stream_url: non_blank(&t.audio).or_else(|| Some(self.track_stream_url(&t.id))),
            duration: (t.duration > 0).then(|| Duration::from_secs(t.duration as u64)),
            genre: t
                .musicinfo
                .as_ref()
                .and_then(|info| info.tags.as_ref())
                .and_then(|tags| tags.genres.first())
                .and_then(|g| non_blank(g)),
            track_number: None,
        }
    }

    fn map_artist(a: &JamendoArtist) -> Artist {
        Artist {
            id: non_blank(&a.id),
            name: fallback(&a.name, UNKNOWN_ARTIST),
            image_url: non_blank(&a.image),
            top_tracks: Vec::new(),
            albums: Vec::new(),
        }
    }

    fn map_album(a: &JamendoAlbum) -> Album {
        Album {
            id: a.id.clone(),
            title: fallback(&a.name, UNKNOWN_ALBUM),
            artist_name: fallback(&a.artist_name, UNKNOWN_ARTIST),
            artist_id: non_blank(&a.artist_id),
            cover_url: non_blank(&a.image),
            release_date: non_blank(&a.releasedate),
            tracks: Vec::new(),
        }
    }

    async fn fetch_tracks(
        &self,
        params: &[(&str, &str)],
        token: Option<&CancellationToken>,
    ) -> Result<Vec<Track>> {
        let url = self.build_url("tracks", params);
        let response: Option<TracksResponse> = self.fetch(&url, token).await?;
        Ok(response
            .map(|r| r.results.iter().map(|t| self.map_track(t)).collect())
            .unwrap_or_default())
    }

    async fn fetch_artists(
        &self,
        params: &[(&str, &str)],
        token: Option<&CancellationToken>,
    ) -> Result<Vec<Artist>> {
        let url = self.build_url("artists", params);
        let response: Option<ArtistsResponse> = self.fetch(&url, token).await?;
        Ok(response
            .map(|r| r.results.iter().map(Self::map_artist).collect())
            .unwrap_or_default())
    }

    async fn fetch_albums(
        &self,
        params: &[(&str, &str)],
        token: Option<&CancellationToken>,
    ) -> Result<Vec<Album>> {
        let url = self.build_url("albums", params);
        let response: Option<AlbumsResponse> = self.fetch(&url, token).await?;
        Ok(response
            .map(|r| r.results.iter().map(Self::map_album).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl Catalog for JamendoCatalog {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        token: CancellationToken,
    ) -> Result<SearchOutcome> {
        if query.trim().is_empty() {
            return Ok(SearchOutcome::default());
        }

        let key = format!("search_{query}_{limit}");
        let outcome = self
            .cache
            .get_or_populate(&key, SEARCH_TTL, || async {
                let limit_text = limit.to_string();
                let tracks_params = [
                    ("search", query),
                    ("limit", &limit_text),
                    ("include", "musicinfo"),
                    ("audioformat", "mp32"),
                ];
                let artists_params = [("search", query), ("limit", "10")];
                let albums_params = [("search", query), ("limit", "10")];
                let (tracks, artists, albums) = tokio::join!(
                    self.fetch_tracks(&tracks_params, Some(&token)),
                    self.fetch_artists(&artists_params, Some(&token)),
                    self.fetch_albums(&albums_params, Some(&token)),
                );

                Ok::<_, CatalogError>(SearchOutcome {
                    tracks: tracks?,
                    albums: albums?,
                    artists: artists?,
                })
            })
            .await?;

        Ok((*outcome).clone())
    }

    async fn track(&self, key: &TrackKey) -> Result<Option<Track>> {
        let id = key.as_str();
        let cache_key = format!("track_{id}");
        let track = self
            .cache
            .get_or_populate(&cache_key, ENTITY_TTL, || async {
                let tracks = self
                    .fetch_tracks(
                        &[
                            ("id", id),
                            ("include", "musicinfo"),
                            ("audioformat", "mp32"),
                        ],
                        None,
                    )
                    .await?;
                Ok::<_, CatalogError>(tracks.into_iter().next())
            })
            .await?;

        Ok((*track).clone())
    }

    async fn album(&self, id: &str) -> Result<Option<Album>> {
        let cache_key = format!("album_{id}");
        let album = self
            .cache
            .get_or_populate(&cache_key, ENTITY_TTL, || async {
                let albums = self.fetch_albums(&[("id", id)], None).await?;
                let Some(mut album) = albums.into_iter().next() else {
                    return Ok::<_, CatalogError>(None);
                };
                album.tracks = self.album_tracks(id).await?;
                Ok(Some(album))
            })
            .await?;

        Ok((*album).clone())
    }

    async fn album_tracks(&self, id: &str) -> Result<Vec<Track>> {
        let cache_key = format!("album_tracks_{id}");
        let tracks = self
            .cache
            .get_or_populate(&cache_key, ENTITY_TTL, || async {
                self.fetch_tracks(
                    &[
                        ("album_id", id),
                        ("audioformat", "mp32"),
                        ("order", "position"),
                    ],
                    None,
                )
                .await
            })
            .await?;

        Ok((*tracks).clone())
    }

    async fn artist(&self, id: &str) -> Result<Option<Artist>> {
        let cache_key = format!("artist_{id}");
        let artist = self
            .cache
            .get_or_populate(&cache_key, ENTITY_TTL, || async {
                let artists = self.fetch_artists(&[("id", id)], None).await?;
                let Some(mut artist) = artists.into_iter().next() else {
                    return Ok::<_, CatalogError>(None);
                };

                let (tracks, albums) =
                    tokio::join!(self.artist_tracks(id), self.artist_albums(id));
                artist.top_tracks = tracks?.into_iter().take(10).collect();
                artist.albums = albums?;
                Ok(Some(artist))
            })
            .await?;

        Ok((*artist).clone())
    }

    async fn artist_tracks(&self, id: &str) -> Result<Vec<Track>> {
        let cache_key = format!("artist_tracks_{id}");
        let tracks = self
            .cache
            .get_or_populate(&cache_key, LIST_TTL, || async {
                self.fetch_tracks(
                    &[
                        ("artist_id", id),
                        ("limit", "100"),
                        ("order", "popularity_total"),
                        ("audioformat", "mp32"),
                    ],
                    None,
                )
                .await
            })
            .await?;

        Ok((*tracks).clone())
    }

    async fn artist_albums(&self, id: &str) -> Result<Vec<Album>> {
        let cache_key = format!("artist_albums_{id}");
        let albums = self
            .cache
            .get_or_populate(&cache_key, ENTITY_TTL, || async {
                self.fetch_albums(&[("artist_id", id), ("limit", "50")], None)
                    .await
            })
            .await?;

        Ok((*albums).clone())
    }

    async fn popular_tracks(&self, limit: usize) -> Result<Vec<Track>> {
        let cache_key = format!("popular_{limit}");
        let tracks = self
            .cache
            .get_or_populate(&cache_key, LIST_TTL, || async {
                self.fetch_tracks(
                    &[
                        ("limit", &limit.to_string()),
                        ("order", "popularity_total"),
                        ("include", "musicinfo"),
                        ("audioformat", "mp32"),
                    ],
                    None,
                )
                .await
            })
            .await?;

        Ok((*tracks).clone())
    }

    async fn popular_albums(&self, limit: usize) -> Result<Vec<Album>> {
        let cache_key = format!("popular_albums_{limit}");
        let albums = self
            .cache
            .get_or_populate(&cache_key, ENTITY_TTL, || async {
                self.fetch_albums(
                    &[("limit", &limit.to_string()), ("order", "popularity_total")],
                    None,
                )
                .await
            })
            .await?;

        Ok((*albums).clone())
    }

    async fn popular_artists(&self, limit: usize) -> Result<Vec<Artist>> {
        let cache_key = format!("popular_artists_{limit}");
        let artists = self
            .cache
            .get_or_populate(&cache_key, ENTITY_TTL, || async {
                self.fetch_artists(
                    &[("limit", &limit.to_string()), ("order", "popularity_total")],
                    None,
                )
                .await
            })
            .await?;

        Ok((*artists).clone())
    }

    async fn tracks_by_genre(
        &self,
        genre: &str,
        limit: usize,
        token: CancellationToken,
    ) -> Result<Vec<Track>> {
        let cache_key = format!("genre_{genre}_{limit}");
        let tracks = self
            .cache
            .get_or_populate(&cache_key, LIST_TTL, || async {
                self.fetch_tracks(
                    &[
                        ("tags", &genre.to_lowercase()),
                        ("limit", &limit.to_string()),
                        ("order", "popularity_total"),
                        ("include", "musicinfo"),
                        ("audioformat", "mp32"),
                    ],
                    Some(&token),
                )
                .await
            })
            .await?;

        Ok((*tracks).clone())
    }

    async fn new_releases(&self, limit: usize) -> Result<Vec<Track>> {
        let cache_key = format!("new_{limit}");
        let tracks = self
            .cache
            .get_or_populate(&cache_key, LIST_TTL, || async {
                self.fetch_tracks(
                    &[
                        ("limit", &limit.to_string()),
                        ("order", "releasedate_desc"),
                        ("include", "musicinfo"),
                        ("audioformat", "mp32"),
                    ],
                    None,
                )
                .await
            })
            .await?;

        Ok((*tracks).clone())
    }

    fn genres(&self) -> Vec<String> {
        [
            "rock",
            "pop",
            "electronic",
            "hiphop",
            "jazz",
            "classical",
            "metal",
            "folk",
            "ambient",
            "blues",
            "country",
            "reggae",
            "punk",
            "soul",
            "funk",
            "indie",
            "alternative",
            "dance",
            "house",
            "techno",
            "trance",
            "dubstep",
            "chillout",
            "lounge",
            "acoustic",
            "instrumental",
            "world",
            "latin",
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    }

    async fn stream_url(&self, track: &Track) -> Result<Option<String>> {
        Ok(track
            .stream_url
            .clone()
            .or_else(|| Some(self.track_stream_url(track.id.as_str()))))
    }

    async fn statistics(&self, token: CancellationToken) -> Result<CatalogStatistics> {
        // Jamendo exposes no catalog-wide counts; the statistics page gets
        // the most-popular entities and empty totals from this adapter.
        let fetch = async {
            tokio::join!(
                self.popular_tracks(1),
                self.popular_albums(1),
                self.popular_artists(1),
            )
        };

        let (tracks, albums, artists) = tokio::select! {
            () = token.cancelled() => return Err(CatalogError::Cancelled),
            res = fetch => res,
        };

        Ok(CatalogStatistics {
            total_audio_items: 0,
            total_music_items: 0,
            most_popular_track: tracks?.into_iter().next(),
            most_popular_album: albums?.into_iter().next(),
            most_popular_artist: artists?.into_iter().next(),
            genre_stats: Vec::new(),
        })
    }
}

// --- helpers ------------------------------------------------------------

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| s.to_string())
}

fn fallback(s: &str, default: &str) -> String {
    if s.trim().is_empty() {
        default.to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> JamendoCatalog {
        JamendoCatalog::new("test-client", Arc::new(ResultCache::new())).unwrap()
    }

    #[test]
    fn url_carries_client_id_and_params() {
        let url = catalog().build_url("tracks", &[("search", "lo fi beats"), ("limit", "20")]);
        assert_eq!(
            url,
            "https://api.jamendo.com/v3.0/tracks/?client_id=test-client&format=json&search=lo%20fi%20beats&limit=20"
        );
    }

    #[test]
    fn stream_url_template() {
        assert_eq!(
            catalog().track_stream_url("1468123"),
            "https://mp3l.jamendo.com/?trackid=1468123&format=mp32"
        );
    }

    #[test]
    fn track_mapping_fills_unknowns() {
        let raw = JamendoTrack {
            id: "42".to_string(),
            name: String::new(),
            duration: 245,
            artist_id: String::new(),
            artist_name: "  ".to_string(),
            album_id: "7".to_string(),
            album_name: "Album".to_string(),
            album_image: String::new(),
            image: "http://img/42.jpg".to_string(),
            audio: String::new(),
            musicinfo: Some(MusicInfo {
                tags: Some(Tags {
                    genres: vec!["ambient".to_string()],
                }),
            }),
        };

        let track = catalog().map_track(&raw);
        assert_eq!(track.title, "Unknown");
        assert_eq!(track.artist, "Unknown Artist");
        assert_eq!(track.artist_id, None);
        assert_eq!(track.album_id.as_deref(), Some("7"));
        assert_eq!(track.cover_url.as_deref(), Some("http://img/42.jpg"));
        assert_eq!(
            track.stream_url.as_deref(),
            Some("https://mp3l.jamendo.com/?trackid=42&format=mp32")
        );
        assert_eq!(track.duration, Some(Duration::from_secs(245)));
        assert_eq!(track.genre.as_deref(), Some("ambient"));
    }

    #[test]
    fn zero_duration_is_absent() {
        let raw = JamendoTrack {
            id: "1".to_string(),
            name: "T".to_string(),
            duration: 0,
            artist_id: String::new(),
            artist_name: String::new(),
            album_id: String::new(),
            album_name: String::new(),
            album_image: String::new(),
            image: String::new(),
            audio: String::new(),
            musicinfo: None,
        };
        assert_eq!(catalog().map_track(&raw).duration, None);
    }
}
