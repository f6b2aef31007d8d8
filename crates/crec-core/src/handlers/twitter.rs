//! Twitter/X handler: single-status URLs on either domain.

use super::PlatformHandler;

pub struct TwitterHandler;

impl PlatformHandler for TwitterHandler {
    fn name(&self) -> &'static str {
        "twitter"
    }

    /// Only `/status/<id>` pages carry downloadable media.
    fn can_handle(&self, url: &str) -> bool {
        (url.contains("twitter.com/") || url.contains("x.com/")) && url.contains("/status/")
    }

    fn default_format(&self) -> &'static str {
        "best"
    }
}
