// ABOUTME: Google Books API client for title and author searches
// ABOUTME: Converts volumes into books, skipping incomplete records, with a TTL response cache
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Google Books API client
//!
//! Searches are forwarded as `intitle:<keyword>` or `inauthor:<keyword>` and
//! ordered by relevance. The API caps `maxResults` at 40.
//!
//! # API Reference
//! Google Books API: <https://developers.google.com/books/docs/v1/using>

use super::{BookMetadataProvider, SearchField};
use crate::constants::google_books::{
    DEFAULT_BASE_URL, DEFAULT_CACHE_TTL_SECS, EDGE_CURL_PARAM, ISBN_10, ISBN_13,
    MAX_CACHED_SEARCHES, PLACEHOLDER_COVER,
};
use crate::constants::limits::MAX_ALLOWED_RESULTS;
use crate::errors::{AppError, AppResult};
use crate::models::Book;
use async_trait::async_trait;
use lru::LruCache;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

const SERVICE_NAME: &str = "Google Books API";

/// Google Books client configuration
#[derive(Debug, Clone)]
pub struct GoogleBooksClientConfig {
    /// Base URL, e.g. <https://www.googleapis.com/books/v1>
    pub base_url: String,
    /// Optional API key
    pub api_key: Option<String>,
    /// Cache TTL in seconds
    pub cache_ttl_secs: u64,
}

impl Default for GoogleBooksClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// `GET /volumes` response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    /// Absent when nothing matched
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// A single search result
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Bibliographic data; every field may be missing
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

/// Bibliographic data of a volume
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    publisher: Option<String>,
    published_date: Option<String>,
    description: Option<String>,
    industry_identifiers: Option<Vec<IndustryIdentifier>>,
    page_count: Option<u32>,
    categories: Option<Vec<String>>,
    image_links: Option<ImageLinks>,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    kind: String,
    identifier: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    thumbnail: Option<String>,
    small_thumbnail: Option<String>,
}

/// Convert volumes into books, dropping any that lack a required field
#[must_use]
pub fn books_from_volumes(response: VolumesResponse) -> Vec<Book> {
    response
        .items
        .into_iter()
        .filter_map(|volume| book_from_volume(volume.volume_info))
        .collect()
}

fn book_from_volume(info: VolumeInfo) -> Option<Book> {
    Some(Book {
        isbn: preferred_identifier(&info.industry_identifiers?)?,
        title: info.title?,
        authors: info.authors?,
        cover: cover_url(info.image_links.as_ref()),
        pages: info.page_count?,
        published: info.published_date?,
        publisher: info.publisher?,
        language: info.language?,
        description: info.description?,
        categories: info.categories?,
    })
}

/// ISBN-13, then ISBN-10, then whatever identifier comes first
fn preferred_identifier(identifiers: &[IndustryIdentifier]) -> Option<String> {
    identifiers
        .iter()
        .find(|id| id.kind == ISBN_13)
        .or_else(|| identifiers.iter().find(|id| id.kind == ISBN_10))
        .or_else(|| identifiers.first())
        .map(|id| id.identifier.clone())
}

/// Thumbnail without the page-curl decoration, served over HTTPS
fn cover_url(links: Option<&ImageLinks>) -> String {
    links
        .and_then(|links| links.thumbnail.as_ref().or(links.small_thumbnail.as_ref()))
        .map_or_else(
            || PLACEHOLDER_COVER.to_owned(),
            |url| {
                let url = url.replace(EDGE_CURL_PARAM, "");
                url.strip_prefix("http://")
                    .map_or(url.clone(), |rest| format!("https://{rest}"))
            },
        )
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Google Books API client
pub struct GoogleBooksClient {
    config: GoogleBooksClientConfig,
    http_client: reqwest::Client,
    search_cache: Arc<RwLock<LruCache<String, CacheEntry<Vec<Book>>>>>,
}

impl GoogleBooksClient {
    const CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(MAX_CACHED_SEARCHES) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a new client
    #[must_use]
    pub fn new(config: GoogleBooksClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
            search_cache: Arc::new(RwLock::new(LruCache::new(Self::CACHE_CAPACITY))),
        }
    }

    async fn cached(&self, key: &str) -> Option<Vec<Book>> {
        let cache = self.search_cache.read().await;
        cache
            .peek(key)
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(|entry| entry.data.clone())
    }

    /// Store a search result, dropping entries that have already expired
    async fn store(&self, key: String, books: &[Book]) {
        let now = Instant::now();
        let Some(expires_at) = now.checked_add(Duration::from_secs(self.config.cache_ttl_secs))
        else {
            debug!(%key, ttl_secs = self.config.cache_ttl_secs, "Cache TTL out of range, not caching");
            return;
        };

        let mut cache = self.search_cache.write().await;
        let expired: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(cached_key, _)| cached_key.clone())
            .collect();
        for cached_key in &expired {
            cache.pop(cached_key);
        }
        cache.put(
            key,
            CacheEntry {
                data: books.to_vec(),
                expires_at,
            },
        );
    }

    async fn fetch(&self, field: SearchField, keyword: &str, limit: u32) -> AppResult<Vec<Book>> {
        let url = format!("{}/volumes", self.config.base_url.trim_end_matches('/'));
        let query = format!("{}:{keyword}", field.query_prefix());
        let max_results = limit.min(MAX_ALLOWED_RESULTS).to_string();

        let mut params = vec![
            ("q", query.as_str()),
            ("maxResults", max_results.as_str()),
            ("orderBy", "relevance"),
            ("projection", "full"),
        ];
        if let Some(key) = self.config.api_key.as_deref() {
            params.push(("key", key));
        }

        let response = self
            .http_client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("HTTP {status}: {body}"),
            ));
        }

        let volumes: VolumesResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })?;

        Ok(books_from_volumes(volumes))
    }

    /// Clear the response cache
    pub async fn clear_cache(&self) {
        self.search_cache.write().await.clear();
    }

    /// Number of cached searches
    pub async fn cache_len(&self) -> usize {
        self.search_cache.read().await.len()
    }
}

#[async_trait]
impl BookMetadataProvider for GoogleBooksClient {
    async fn search(&self, field: SearchField, keyword: &str, limit: u32) -> AppResult<Vec<Book>> {
        let cache_key = format!("{}:{keyword}:{limit}", field.query_prefix());
        if let Some(books) = self.cached(&cache_key).await {
            debug!(%cache_key, "Book search served from cache");
            return Ok(books);
        }

        let books = self.fetch(field, keyword, limit).await?;
        info!(field = %field, keyword, results = books.len(), "Searched Google Books");

        self.store(cache_key, &books).await;

        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn volume(overrides: serde_json::Value) -> serde_json::Value {
        let mut info = json!({
            "title": "The Fellowship of the Ring",
            "authors": ["J. R. R. Tolkien"],
            "publisher": "HarperCollins",
            "publishedDate": "1954-07-29",
            "description": "The first volume.",
            "industryIdentifiers": [
                {"type": "ISBN_10", "identifier": "0261103571"},
                {"type": "ISBN_13", "identifier": "9780261103573"}
            ],
            "pageCount": 423,
            "categories": ["Fiction"],
            "imageLinks": {
                "thumbnail": "http://books.google.com/books/content?id=abc&printsec=frontcover&img=1&zoom=1&edge=curl"
            },
            "language": "en"
        });
        if let (Some(target), Some(source)) = (info.as_object_mut(), overrides.as_object()) {
            for (key, value) in source {
                if value.is_null() {
                    target.remove(key);
                } else {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
        json!({ "volumeInfo": info })
    }

    fn parse(items: Vec<serde_json::Value>) -> Vec<Book> {
        let response: VolumesResponse =
            serde_json::from_value(json!({ "kind": "books#volumes", "items": items })).unwrap();
        books_from_volumes(response)
    }

    #[test]
    fn test_complete_volume_becomes_book() {
        let books = parse(vec![volume(json!({}))]);
        assert_eq!(books.len(), 1);

        let book = &books[0];
        assert_eq!(book.isbn, "9780261103573");
        assert_eq!(book.pages, 423);
        assert_eq!(
            book.cover,
            "https://books.google.com/books/content?id=abc&printsec=frontcover&img=1&zoom=1"
        );
    }

    #[test]
    fn test_incomplete_volumes_are_dropped() {
        let books = parse(vec![
            volume(json!({ "description": null })),
            volume(json!({ "categories": null })),
            volume(json!({ "industryIdentifiers": null })),
            volume(json!({})),
        ]);
        assert_eq!(books.len(), 1);
    }

    #[test]
    fn test_identifier_preference() {
        let isbn10_only = parse(vec![volume(json!({
            "industryIdentifiers": [
                {"type": "OTHER", "identifier": "OCLC:1"},
                {"type": "ISBN_10", "identifier": "0261103571"}
            ]
        }))]);
        assert_eq!(isbn10_only[0].isbn, "0261103571");

        let other_only = parse(vec![volume(json!({
            "industryIdentifiers": [{"type": "OTHER", "identifier": "OCLC:1"}]
        }))]);
        assert_eq!(other_only[0].isbn, "OCLC:1");
    }

    #[test]
    fn test_missing_cover_uses_placeholder() {
        let books = parse(vec![volume(json!({ "imageLinks": null }))]);
        assert_eq!(books[0].cover, PLACEHOLDER_COVER);
    }

    #[test]
    fn test_https_cover_is_untouched() {
        let books = parse(vec![volume(json!({
            "imageLinks": {"thumbnail": "https://example.com/cover.jpg"}
        }))]);
        assert_eq!(books[0].cover, "https://example.com/cover.jpg");
    }

    #[test]
    fn test_no_items() {
        let response: VolumesResponse =
            serde_json::from_value(json!({ "kind": "books#volumes", "totalItems": 0 })).unwrap();
        assert!(books_from_volumes(response).is_empty());
    }
}
