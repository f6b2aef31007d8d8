//! Instagram handler: posts, reels and stories.

use super::PlatformHandler;

pub struct InstagramHandler;

impl PlatformHandler for InstagramHandler {
    fn name(&self) -> &'static str {
        "instagram"
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("instagram.com")
    }

    /// Instagram serves split streams; prefer an mp4/m4a pair so the merge
    /// lands in an mp4 container without recoding.
    fn default_format(&self) -> &'static str {
        "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best"
    }
}
