//! Platform handlers and ordered first-match dispatch.

mod instagram;
mod twitter;
mod youtube;

pub use instagram::InstagramHandler;
pub use twitter::TwitterHandler;
pub use youtube::YouTubeHandler;

/// A platform crec can download from.
///
/// `can_handle` must be a pure, total, fast string predicate — no network,
/// no filesystem — so walking the registry costs nothing.
pub trait PlatformHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_handle(&self, url: &str) -> bool;

    /// yt-dlp format selector used when the request does not force one
    /// (audio-only, no-audio and quality selection all override this).
    fn default_format(&self) -> &'static str {
        "bestvideo+bestaudio/best"
    }
}

/// Explicit ordered handler list; first match wins.
///
/// The order — YouTube, Twitter/X, Instagram — is fixed and test-covered
/// rather than an artifact of registration. No handler matching means the
/// URL is unsupported; there is no generic fallback extraction.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn PlatformHandler>>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self {
            handlers: vec![
                Box::new(YouTubeHandler),
                Box::new(TwitterHandler),
                Box::new(InstagramHandler),
            ],
        }
    }
}

impl HandlerRegistry {
    /// First handler whose predicate accepts `url`, or `None` for an
    /// unsupported URL.
    pub fn select(&self, url: &str) -> Option<&dyn PlatformHandler> {
        self.handlers
            .iter()
            .find(|h| h.can_handle(url))
            .map(|h| h.as_ref())
    }

    /// Handler names in dispatch order, for "supported platforms" output.
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_order_is_fixed() {
        let registry = HandlerRegistry::default();
        assert_eq!(registry.names(), vec!["youtube", "twitter", "instagram"]);
    }

    #[test]
    fn selects_matching_handler() {
        let registry = HandlerRegistry::default();
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "youtube"),
            ("https://x.com/user/status/123456789", "twitter"),
            ("https://www.instagram.com/reel/Cabc/", "instagram"),
        ];
        for (url, name) in cases {
            assert_eq!(registry.select(url).map(|h| h.name()), Some(name), "{url}");
        }
    }

    #[test]
    fn foreign_urls_select_nothing() {
        let registry = HandlerRegistry::default();
        for url in [
            "https://example.com/video",
            "https://vimeo.com/12345",
            "not a url",
            "",
        ] {
            assert!(registry.select(url).is_none(), "{url:?}");
        }
    }
}
