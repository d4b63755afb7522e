//! Content fetching for guest URLs
//!
//! Video-hosting URLs yield the caption transcript; everything else yields
//! the visible text of the page's main content. Failures never escape the
//! fetcher: callers get `None` and decide how to report it.

use async_trait::async_trait;
use podbrief_common::config::FetchConfig;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use yt_transcript_rs::api::YouTubeTranscriptApi;

use super::response_parsing::collapse_whitespace;

/// Elements whose text never counts as page content
const STRIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "nav", "footer", "header"];

/// Containers holding the main content, in `querySelector` order
const MAIN_CONTENT_SELECTOR: &str = "main, article, .content, .post, .entry";

/// Retrieves textual content for a URL
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Transcript or page text for `url`; `None` on any failure
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// Fetch failure reasons (logged, never returned to API callers)
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Transcript unavailable: {0}")]
    Transcript(String),

    #[error("No readable text")]
    NoContent,
}

fn video_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?:youtube\.com/(?:watch\?(?:[^#\s]*&)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{6,})",
        )
        .expect("video id pattern is valid")
    })
}

/// Video ID of a YouTube URL, if `url` is one
pub fn youtube_video_id(url: &str) -> Option<String> {
    video_id_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn parse_selector(selector: &str) -> Option<Selector> {
    Selector::parse(selector).ok()
}

fn is_stripped(element: ElementRef<'_>) -> bool {
    STRIPPED_ELEMENTS.contains(&element.value().name())
}

/// Visible text of `root`, skipping stripped elements
fn visible_text(root: ElementRef<'_>) -> String {
    let mut text = String::new();

    for node in root.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(is_stripped);

        if !hidden {
            text.push_str(fragment);
            text.push(' ');
        }
    }

    collapse_whitespace(&text)
}

/// Extract the readable main-content text from an HTML document
///
/// Prefers the first main-content container; falls back to the whole body
/// when there is none or when it holds no visible text.
pub fn extract_page_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let main_text = parse_selector(MAIN_CONTENT_SELECTOR)
        .and_then(|selector| document.select(&selector).next())
        .map(visible_text)
        .filter(|text| !text.is_empty());

    let text = match main_text {
        Some(text) => text,
        None => {
            let body = parse_selector("body").and_then(|selector| document.select(&selector).next());
            visible_text(body.unwrap_or_else(|| document.root_element()))
        }
    };

    (!text.is_empty()).then_some(text)
}

/// Fetcher backed by plain HTTP for pages and caption tracks for videos
pub struct WebContentFetcher {
    http_client: reqwest::Client,
    transcript_languages: Vec<String>,
}

impl WebContentFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            transcript_languages: config.transcript_languages.clone(),
        })
    }

    async fn fetch_transcript(&self, video_id: &str) -> Result<String, FetchError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| FetchError::Transcript(e.to_string()))?;

        let languages: Vec<&str> = self.transcript_languages.iter().map(String::as_str).collect();
        let transcript = api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| FetchError::Transcript(e.to_string()))?;

        let text = transcript
            .snippets
            .iter()
            .map(|snippet| snippet.text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            return Err(FetchError::NoContent);
        }
        Ok(text)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let response = self
            .http_client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        extract_page_text(&html).ok_or(FetchError::NoContent)
    }
}

#[async_trait]
impl ContentFetcher for WebContentFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let url = url.trim();

        let result = match youtube_video_id(url) {
            Some(video_id) => {
                debug!(url = %url, video_id = %video_id, "Fetching video transcript");
                self.fetch_transcript(&video_id).await
            }
            None => {
                debug!(url = %url, "Fetching page text");
                self.fetch_page(url).await
            }
        };

        match result {
            Ok(text) => {
                debug!(url = %url, chars = text.len(), "Fetched content");
                Some(text)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Content fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_ids() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            youtube_video_id("https://youtu.be/5_EJwYeQusM?feature=shared").as_deref(),
            Some("5_EJwYeQusM")
        );
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?feature=share&v=abc-DEF_123").as_deref(),
            Some("abc-DEF_123")
        );
        assert_eq!(
            youtube_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(youtube_video_id("https://www.youtube.com/@channel"), None);
    }

    #[test]
    fn test_extract_prefers_main_container() {
        let html = r#"
            <html><head><title>T</title><style>body { color: red }</style></head>
            <body>
              <header>Site header</header>
              <nav>Home | About</nav>
              <main>
                <h1>Grace Hopper</h1>
                <p>Rear admiral and   computing pioneer.</p>
                <script>track()</script>
              </main>
              <footer>Copyright</footer>
            </body></html>
        "#;

        let text = extract_page_text(html).unwrap();
        assert_eq!(text, "Grace Hopper Rear admiral and computing pioneer.");
    }

    #[test]
    fn test_extract_falls_back_to_body() {
        let html = r#"
            <html><body>
              <nav>Menu</nav>
              <div><p>Plain page text</p></div>
              <noscript>Enable JS</noscript>
            </body></html>
        "#;

        assert_eq!(extract_page_text(html).unwrap(), "Plain page text");
    }

    #[test]
    fn test_extract_class_container() {
        let html = r#"<body><div>Sidebar</div><div class="post"><p>Post body</p></div></body>"#;
        assert_eq!(extract_page_text(html).unwrap(), "Post body");
    }

    #[test]
    fn test_extract_empty_page() {
        let html = "<html><body><script>only()</script><footer>x</footer></body></html>";
        assert!(extract_page_text(html).is_none());
    }

    #[tokio::test]
    async fn test_invalid_url_is_absent() {
        let fetcher = WebContentFetcher::new(&FetchConfig::default()).unwrap();
        assert!(fetcher.fetch("not a url").await.is_none());
        assert!(fetcher.fetch("ftp://example.com/file").await.is_none());
    }
}
