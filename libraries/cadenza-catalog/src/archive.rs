//! Internet Archive catalog adapter.
//!
//! Talks to the archive.org advanced-search and per-item metadata
//! endpoints. An "album" here is a catalog item (one identifier holding
//! many files); artists are grouped by the denormalized `creator` field.
//! Track identity is `"{identifier}/{fileName}"`.
//!
//! Per-item metadata fan-out during search is capped by a semaphore of 5
//! concurrent requests.

use crate::duration::parse_length;
use crate::error::{CatalogError, Result};
use crate::flex::{first_genre, first_scalar, resolve_year, scalar_or};
use crate::{Catalog, CatalogStatistics, SearchOutcome};
use async_trait::async_trait;
use cadenza_core::{Album, Artist, Track, TrackKey};
use futures_util::future::join_all;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://archive.org";
const USER_AGENT: &str = concat!("Cadenza/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Cap on concurrent per-item metadata fetches during a search fan-out.
const METADATA_CONCURRENCY: usize = 5;

const SORT_DOWNLOADS: &str = "downloads desc";
const SORT_PUBLICDATE: &str = "publicdate desc";

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";

const STAT_GENRES: [&str; 8] = [
    "rock",
    "pop",
    "jazz",
    "classical",
    "electronic",
    "hip-hop",
    "folk",
    "blues",
];

// --- wire types ---------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: Option<SearchBody>,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    docs: Vec<SearchDoc>,
    #[serde(rename = "numFound", default)]
    num_found: u64,
}

/// A search result document. Every metadata field may be a string, a
/// number, or an array of either; they normalize through [`crate::flex`].
#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(default)]
    identifier: String,
    #[serde(default)]
    title: Value,
    #[serde(default)]
    creator: Value,
    #[serde(default)]
    year: Value,
    #[serde(default)]
    date: Value,
    #[serde(default)]
    subject: Value,
}

#[derive(Debug, Deserialize)]
struct MetadataEnvelope {
    #[serde(default)]
    files: Vec<FileEntry>,
    metadata: Option<ItemMetadata>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    length: Value,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    track: Value,
}

#[derive(Debug, Deserialize)]
struct ItemMetadata {
    #[serde(default)]
    title: Value,
    #[serde(default)]
    creator: Value,
    #[serde(default)]
    year: Value,
    #[serde(default)]
    date: Value,
    #[serde(default)]
    subject: Value,
}

// --- adapter ------------------------------------------------------------

/// Internet Archive adapter.
pub struct ArchiveCatalog {
    http: reqwest::Client,
    base_url: String,
    limiter: Arc<Semaphore>,
}

impl ArchiveCatalog {
    /// Create an adapter against the public archive.org endpoints.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create an adapter against a custom base URL (integration tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limiter: Arc::new(Semaphore::new(METADATA_CONCURRENCY)),
        })
    }

    fn stream_url_for(&self, identifier: &str, file_name: &str) -> String {
        format!(
            "{}/download/{}/{}",
            self.base_url,
            identifier,
            urlencoding::encode(file_name)
        )
    }

    fn cover_url_for(&self, identifier: &str) -> String {
        format!("{}/services/img/{}", self.base_url, identifier)
    }

    /// Run the advanced-search endpoint. Failures degrade to an empty doc
    /// list; cancellation propagates.
    async fn search_items(
        &self,
        query: &str,
        rows: usize,
        sort: &str,
        token: Option<&CancellationToken>,
    ) -> Result<Vec<SearchDoc>> {
        let body = self.search_raw(query, rows, sort, token).await?;
        Ok(body.map(|b| b.docs).unwrap_or_default())
    }

    /// Count matches for a query (`rows=0`, read `numFound`).
    async fn total_count(&self, query: &str, token: Option<&CancellationToken>) -> Result<u64> {
        let body = self.search_raw(query, 0, SORT_DOWNLOADS, token).await?;
        Ok(body.map(|b| b.num_found).unwrap_or(0))
    }

    async fn search_raw(
        &self,
        query: &str,
        rows: usize,
        sort: &str,
        token: Option<&CancellationToken>,
    ) -> Result<Option<SearchBody>> {
        let url = format!(
            "{}/advancedsearch.php?q={}&fl[]=identifier,title,creator,date,year,subject&rows={}&sort[]={}&output=json",
            self.base_url,
            urlencoding::encode(query),
            rows,
            urlencoding::encode(sort),
        );
        debug!(url = %url, "archive search");

        let fetch = async {
            self.http
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<SearchEnvelope>()
                .await
        };

        let outcome = match token {
            Some(token) => tokio::select! {
                () = token.cancelled() => return Err(CatalogError::Cancelled),
                res = fetch => res,
            },
            None => fetch.await,
        };

        match outcome {
            Ok(envelope) => Ok(envelope.response),
            Err(err) => {
                warn!(error = %err, "archive search failed");
                Ok(None)
            }
        }
    }

    /// Fetch per-item metadata. Failures degrade to `None`; cancellation
    /// propagates.
    async fn metadata(
        &self,
        identifier: &str,
        token: Option<&CancellationToken>,
    ) -> Result<Option<MetadataEnvelope>> {
        let url = format!("{}/metadata/{}", self.base_url, identifier);

        let fetch = async {
            self.http
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<MetadataEnvelope>()
                .await
        };

        let outcome = match token {
            Some(token) => tokio::select! {
                () = token.cancelled() => return Err(CatalogError::Cancelled),
                res = fetch => res,
            },
            None => fetch.await,
        };

        match outcome {
            Ok(envelope) => Ok(Some(envelope)),
            Err(err) => {
                warn!(identifier, error = %err, "archive metadata fetch failed");
                Ok(None)
            }
        }
    }

    fn build_track(&self, identifier: &str, item: &ItemMetadata, file: &FileEntry) -> Track {
        let album_title = first_scalar(&item.title);
        Track {
            id: TrackKey::new(identifier, &file.name),
            title: file
                .title
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| clean_name(&file.name)),
            artist: scalar_or(&item.creator, UNKNOWN_ARTIST),
            artist_id: None,
            album: (!album_title.trim().is_empty()).then_some(album_title),
            album_id: Some(identifier.to_string()),
            cover_url: Some(self.cover_url_for(identifier)),
            stream_url: Some(self.stream_url_for(identifier, &file.name)),
            duration: parse_length(&first_scalar(&file.length)),
            genre: first_genre(&item.subject),
            track_number: parse_track_number(&file.track),
        }
    }

    /// The first (lowest-numbered) eligible audio track of an item, or
    /// `None` when the item has no eligible audio files.
    async fn first_track(
        &self,
        identifier: &str,
        token: Option<&CancellationToken>,
    ) -> Result<Option<Track>> {
        let Some(meta) = self.metadata(identifier, token).await? else {
            return Ok(None);
        };
        let Some(item) = meta.metadata.as_ref() else {
            return Ok(None);
        };

        let file = meta
            .files
            .iter()
            .filter(|f| is_audio(f.format.as_deref()))
            .min_by_key(|f| parse_track_number(&f.track).unwrap_or(u32::MAX));

        Ok(file.map(|f| self.build_track(identifier, item, f)))
    }

    /// [`Self::first_track`] behind the fan-out semaphore.
    async fn first_track_limited(
        &self,
        identifier: &str,
        token: &CancellationToken,
    ) -> Result<Option<Track>> {
        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|_| CatalogError::Cancelled)?;
        self.first_track(identifier, Some(token)).await
    }

    fn doc_album(&self, doc: &SearchDoc, fallback_artist: &str) -> Album {
        Album {
            id: doc.identifier.clone(),
            title: scalar_or(&doc.title, UNKNOWN_ALBUM),
            artist_name: scalar_or(&doc.creator, fallback_artist),
            artist_id: None,
            cover_url: Some(self.cover_url_for(&doc.identifier)),
            release_date: resolve_year(&doc.year, &doc.date),
            tracks: Vec::new(),
        }
    }

    async fn fan_out_first_tracks(
        &self,
        docs: &[SearchDoc],
        limit: usize,
        token: &CancellationToken,
    ) -> Result<Vec<Track>> {
        let futures = docs
            .iter()
            .take(limit)
            .map(|doc| self.first_track_limited(&doc.identifier, token));

        let mut tracks = Vec::new();
        for result in join_all(futures).await {
            match result {
                Ok(Some(track)) => tracks.push(track),
                Ok(None) => {}
                Err(CatalogError::Cancelled) => return Err(CatalogError::Cancelled),
                Err(err) => warn!(error = %err, "track load failed during fan-out"),
            }
        }
        Ok(tracks)
    }

    async fn most_popular_artist(&self, token: &CancellationToken) -> Result<Option<Artist>> {
        let docs = self
            .search_items(
                "mediatype:audio AND subject:music",
                10,
                SORT_DOWNLOADS,
                Some(token),
            )
            .await?;
        Ok(group_artists(&docs, |id| self.cover_url_for(id))
            .into_iter()
            .next())
    }
}

#[async_trait]
impl Catalog for ArchiveCatalog {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        token: CancellationToken,
    ) -> Result<SearchOutcome> {
        if query.trim().is_empty() {
            return Ok(SearchOutcome::default());
        }

        let q = format!("({query}) AND mediatype:audio");
        let docs = self
            .search_items(&q, limit, SORT_DOWNLOADS, Some(&token))
            .await?;
        if docs.is_empty() {
            return Ok(SearchOutcome::default());
        }

        let tracks = self.fan_out_first_tracks(&docs, limit, &token).await?;

        // Group loaded tracks into album and artist summaries.
        let mut albums = Vec::new();
        let mut seen_albums = HashSet::new();
        for track in &tracks {
            let Some(album_id) = track.album_id.as_deref() else {
                continue;
            };
            if album_id.trim().is_empty() || !seen_albums.insert(album_id.to_string()) {
                continue;
            }
            albums.push(Album {
                id: album_id.to_string(),
                title: track.album.clone().unwrap_or_else(|| UNKNOWN_ALBUM.into()),
                artist_name: track.artist.clone(),
                artist_id: None,
                cover_url: track.cover_url.clone(),
                release_date: None,
                tracks: Vec::new(),
            });
            if albums.len() >= 20 {
                break;
            }
        }

        let mut artists = Vec::new();
        let mut seen_artists = HashSet::new();
        for track in &tracks {
            let name = track.artist.trim();
            if name.is_empty() || !seen_artists.insert(name.to_lowercase()) {
                continue;
            }
            artists.push(Artist {
                id: None,
                name: track.artist.clone(),
                image_url: track.cover_url.clone(),
                top_tracks: Vec::new(),
                albums: Vec::new(),
            });
            if artists.len() >= 20 {
                break;
            }
        }

        Ok(SearchOutcome {
            tracks,
            albums,
            artists,
        })
    }

    async fn track(&self, key: &TrackKey) -> Result<Option<Track>> {
        let (identifier, raw_file) = key
            .split()
            .map_err(|_| CatalogError::MalformedKey(key.to_string()))?;
        let file_name = urlencoding::decode(raw_file)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| raw_file.to_string());

        let Some(meta) = self.metadata(identifier, None).await? else {
            return Ok(None);
        };
        let Some(item) = meta.metadata.as_ref() else {
            return Ok(None);
        };

        let Some(file) = meta
            .files
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(&file_name))
        else {
            return Ok(None);
        };

        let mut track = self.build_track(identifier, item, file);
        track.id = key.clone();
        Ok(Some(track))
    }

    async fn album(&self, id: &str) -> Result<Option<Album>> {
        let Some(meta) = self.metadata(id, None).await? else {
            return Ok(None);
        };
        let Some(item) = meta.metadata.as_ref() else {
            return Ok(None);
        };

        Ok(Some(Album {
            id: id.to_string(),
            title: scalar_or(&item.title, UNKNOWN_ALBUM),
            artist_name: scalar_or(&item.creator, UNKNOWN_ARTIST),
            artist_id: None,
            cover_url: Some(self.cover_url_for(id)),
            release_date: resolve_year(&item.year, &item.date),
            tracks: Vec::new(),
        }))
    }

    async fn album_tracks(&self, id: &str) -> Result<Vec<Track>> {
        let Some(meta) = self.metadata(id, None).await? else {
            return Ok(Vec::new());
        };
        let Some(item) = meta.metadata.as_ref() else {
            return Ok(Vec::new());
        };

        // One track per base name: multi-encoding items carry the same
        // recording as e.g. "song.flac" + "song_vbr.mp3"; keep the
        // highest-priority encoding of each group.
        let mut groups: HashMap<String, &FileEntry> = HashMap::new();
        for file in meta.files.iter().filter(|f| is_audio(f.format.as_deref())) {
            let base = track_base_name(&file.name);
            groups
                .entry(base)
                .and_modify(|best| {
                    if format_priority(file.format.as_deref())
                        > format_priority(best.format.as_deref())
                    {
                        *best = file;
                    }
                })
                .or_insert(file);
        }

        let mut chosen: Vec<&FileEntry> = groups.into_values().collect();
        chosen.sort_by_key(|f| parse_track_number(&f.track).unwrap_or(u32::MAX));

        Ok(chosen
            .into_iter()
            .map(|f| self.build_track(id, item, f))
            .collect())
    }

    async fn artist(&self, id: &str) -> Result<Option<Artist>> {
        if id.trim().is_empty() {
            return Ok(None);
        }

        let q = format!("creator:\"{id}\" AND mediatype:audio");
        let docs = self.search_items(&q, 50, SORT_DOWNLOADS, None).await?;

        let mut artist = Artist::named(id);
        if let Some(doc) = docs.first() {
            artist.image_url = Some(self.cover_url_for(&doc.identifier));
        }
        Ok(Some(artist))
    }

    async fn artist_tracks(&self, id: &str) -> Result<Vec<Track>> {
        if id.trim().is_empty() {
            return Ok(Vec::new());
        }

        let q = format!("creator:\"{id}\" AND mediatype:audio");
        let docs = self.search_items(&q, 30, SORT_DOWNLOADS, None).await?;
        if docs.is_empty() {
            return Ok(Vec::new());
        }

        let futures = docs
            .iter()
            .take(10)
            .map(|doc| self.album_tracks(&doc.identifier));

        let mut all_tracks = Vec::new();
        for result in join_all(futures).await {
            match result {
                Ok(tracks) => all_tracks.extend(tracks),
                Err(err) => warn!(error = %err, "artist album load failed"),
            }
        }

        // The same recording shows up across live items; dedupe by
        // normalized title plus whole-second duration.
        let mut seen = HashSet::new();
        Ok(all_tracks
            .into_iter()
            .filter(|t| !t.title.trim().is_empty())
            .filter(|t| {
                let fingerprint = (
                    t.title.trim().to_lowercase(),
                    t.duration.map(|d| d.as_secs()).unwrap_or(0),
                );
                seen.insert(fingerprint)
            })
            .collect())
    }

    async fn artist_albums(&self, id: &str) -> Result<Vec<Album>> {
        if id.trim().is_empty() {
            return Ok(Vec::new());
        }

        let q = format!("creator:\"{id}\" AND mediatype:audio");
        let docs = self.search_items(&q, 50, SORT_DOWNLOADS, None).await?;
        Ok(docs.iter().map(|doc| self.doc_album(doc, id)).collect())
    }

    async fn popular_tracks(&self, limit: usize) -> Result<Vec<Track>> {
        let docs = self
            .search_items(
                "collection:etree AND mediatype:audio",
                limit * 2,
                SORT_DOWNLOADS,
                None,
            )
            .await?;

        let mut tracks = Vec::new();
        for doc in &docs {
            if tracks.len() >= limit {
                break;
            }
            if let Some(track) = self.first_track(&doc.identifier, None).await? {
                tracks.push(track);
            }
        }
        Ok(tracks)
    }

    async fn popular_albums(&self, limit: usize) -> Result<Vec<Album>> {
        let docs = self
            .search_items(
                "collection:etree AND mediatype:audio",
                limit,
                SORT_DOWNLOADS,
                None,
            )
            .await?;
        Ok(docs
            .iter()
            .map(|doc| self.doc_album(doc, UNKNOWN_ARTIST))
            .collect())
    }

    async fn popular_artists(&self, limit: usize) -> Result<Vec<Artist>> {
        let docs = self
            .search_items(
                "mediatype:audio AND subject:music",
                limit * 3,
                SORT_DOWNLOADS,
                None,
            )
            .await?;
        let mut artists = group_artists(&docs, |id| self.cover_url_for(id));
        artists.truncate(limit);
        Ok(artists)
    }

    async fn tracks_by_genre(
        &self,
        genre: &str,
        limit: usize,
        token: CancellationToken,
    ) -> Result<Vec<Track>> {
        let q = format!("subject:\"{genre}\" AND mediatype:audio");
        let docs = self
            .search_items(&q, limit, SORT_DOWNLOADS, Some(&token))
            .await?;
        self.fan_out_first_tracks(&docs, limit, &token).await
    }

    async fn new_releases(&self, limit: usize) -> Result<Vec<Track>> {
        let docs = self
            .search_items(
                "mediatype:audio AND subject:music",
                limit,
                SORT_PUBLICDATE,
                None,
            )
            .await?;

        let token = CancellationToken::new();
        self.fan_out_first_tracks(&docs, limit, &token).await
    }

    fn genres(&self) -> Vec<String> {
        [
            "rock",
            "jazz",
            "electronic",
            "blues",
            "classical",
            "folk",
            "metal",
            "reggae",
            "punk",
            "funk",
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    }

    async fn stream_url(&self, track: &Track) -> Result<Option<String>> {
        Ok(track.stream_url.clone())
    }

    async fn statistics(&self, token: CancellationToken) -> Result<CatalogStatistics> {
        let popular_track = async {
            let docs = self
                .search_items(
                    "mediatype:audio AND subject:music",
                    1,
                    SORT_DOWNLOADS,
                    Some(&token),
                )
                .await?;
            match docs.first() {
                Some(doc) => self.first_track(&doc.identifier, Some(&token)).await,
                None => Ok(None),
            }
        };

        let popular_album = async {
            let docs = self
                .search_items(
                    "mediatype:audio AND subject:music",
                    1,
                    SORT_DOWNLOADS,
                    Some(&token),
                )
                .await?;
            Ok::<_, CatalogError>(docs.first().map(|doc| self.doc_album(doc, UNKNOWN_ARTIST)))
        };

        let genre_counts = async {
            let token = &token;
            let futures = STAT_GENRES.iter().map(|genre| async move {
                let count = self
                    .total_count(
                        &format!("subject:\"{genre}\" AND mediatype:audio"),
                        Some(token),
                    )
                    .await?;
                Ok::<_, CatalogError>((capitalize_first(genre), count))
            });

            let mut counts = Vec::new();
            for result in join_all(futures).await {
                counts.push(result?);
            }
            counts.sort_by(|a, b| b.1.cmp(&a.1));
            Ok::<_, CatalogError>(counts)
        };

        let (total_audio, total_music, track, album, artist, genres) = tokio::join!(
            self.total_count("mediatype:audio", Some(&token)),
            self.total_count("mediatype:audio AND subject:music", Some(&token)),
            popular_track,
            popular_album,
            self.most_popular_artist(&token),
            genre_counts,
        );

        Ok(CatalogStatistics {
            total_audio_items: total_audio?,
            total_music_items: total_music?,
            most_popular_track: track?,
            most_popular_album: album?,
            most_popular_artist: artist?,
            genre_stats: genres?,
        })
    }
}

// --- helpers ------------------------------------------------------------

fn is_audio(format: Option<&str>) -> bool {
    format.is_some_and(|f| {
        let f = f.to_ascii_lowercase();
        f.contains("mp3") || f.contains("flac") || f.contains("ogg")
    })
}

/// Encoding preference when an item carries the same recording in several
/// formats. "VBR MP3" outranks lossless FLAC on purpose: this is a
/// streaming client and the archive's FLAC files are routinely an order
/// of magnitude larger.
fn format_priority(format: Option<&str>) -> u8 {
    match format.map(str::to_ascii_lowercase).as_deref() {
        Some("vbr mp3") => 5,
        Some("mp3") => 4,
        Some("ogg vorbis") => 3,
        Some("flac") => 2,
        _ => 1,
    }
}

/// Base name shared by the encodings of one recording: the file stem with
/// a trailing encoding suffix (`_vbr`, `_128`..`_320`, `_flac`, `_ogg`)
/// removed.
fn track_base_name(name: &str) -> String {
    let stem = file_stem(name).to_ascii_lowercase();
    for suffix in ["vbr", "128", "192", "256", "320", "flac", "ogg"] {
        if let Some(prefix) = stem.strip_suffix(suffix) {
            return prefix.strip_suffix('_').unwrap_or(prefix).to_string();
        }
    }
    stem
}

fn file_stem(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

fn clean_name(name: &str) -> String {
    file_stem(name).to_string()
}

fn parse_track_number(value: &Value) -> Option<u32> {
    first_scalar(value).trim().parse().ok()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Group docs by creator, most frequent first.
fn group_artists(docs: &[SearchDoc], cover_url: impl Fn(&str) -> String) -> Vec<Artist> {
    let mut counts: Vec<(String, usize, &SearchDoc)> = Vec::new();
    for doc in docs {
        let name = first_scalar(&doc.creator);
        if name.trim().is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(n, _, _)| *n == name) {
            Some((_, count, _)) => *count += 1,
            None => counts.push((name, 1, doc)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(name, _, doc)| Artist {
            id: None,
            name,
            image_url: Some(cover_url(&doc.identifier)),
            top_tracks: Vec::new(),
            albums: Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn audio_format_detection() {
        assert!(is_audio(Some("VBR MP3")));
        assert!(is_audio(Some("Flac")));
        assert!(is_audio(Some("Ogg Vorbis")));
        assert!(!is_audio(Some("JPEG")));
        assert!(!is_audio(Some("Metadata")));
        assert!(!is_audio(None));
    }

    #[test]
    fn vbr_outranks_flac() {
        assert!(format_priority(Some("VBR MP3")) > format_priority(Some("FLAC")));
        assert!(format_priority(Some("MP3")) > format_priority(Some("Ogg Vorbis")));
        assert!(format_priority(Some("FLAC")) > format_priority(Some("WAVE")));
        assert_eq!(format_priority(None), 1);
    }

    #[test]
    fn base_name_strips_encoding_suffixes() {
        assert_eq!(track_base_name("02 Scarlet_vbr.mp3"), "02 scarlet");
        assert_eq!(track_base_name("02 Scarlet_320.mp3"), "02 scarlet");
        assert_eq!(track_base_name("02 Scarlet.flac"), "02 scarlet");
        assert_eq!(track_base_name("02 Scarletvbr.mp3"), "02 scarlet");
        assert_eq!(track_base_name("plain-name.ogg"), "plain-name");
    }

    #[test]
    fn track_numbers_parse_or_sort_last() {
        assert_eq!(parse_track_number(&json!("5")), Some(5));
        assert_eq!(parse_track_number(&json!(12)), Some(12));
        assert_eq!(parse_track_number(&json!("1/10")), None);
        assert_eq!(parse_track_number(&Value::Null), None);
    }

    #[test]
    fn artist_grouping_orders_by_frequency() {
        let docs: Vec<SearchDoc> = vec![
            serde_json::from_value(json!({"identifier": "a1", "creator": "Beta"})).unwrap(),
            serde_json::from_value(json!({"identifier": "a2", "creator": "Alpha"})).unwrap(),
            serde_json::from_value(json!({"identifier": "a3", "creator": "Alpha"})).unwrap(),
            serde_json::from_value(json!({"identifier": "a4", "creator": ""})).unwrap(),
        ];

        let artists = group_artists(&docs, |id| format!("img/{id}"));
        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0].name, "Alpha");
        assert_eq!(artists[0].image_url.as_deref(), Some("img/a2"));
        assert_eq!(artists[1].name, "Beta");
    }
}
