//! YouTube handler: watch, short-link and Shorts URLs.

use super::PlatformHandler;

pub struct YouTubeHandler;

impl PlatformHandler for YouTubeHandler {
    fn name(&self) -> &'static str {
        "youtube"
    }

    /// A watchable path shape is required; a bare homepage or channel URL
    /// is nothing we can download.
    fn can_handle(&self, url: &str) -> bool {
        url.contains("youtube.com/watch")
            || url.contains("youtu.be/")
            || url.contains("youtube.com/shorts/")
    }
}
