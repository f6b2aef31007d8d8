//! Caller-supplied download request.

use std::path::PathBuf;

/// All parameters for a single download. Constructed per invocation and
/// consumed once; nothing in it persists across runs.
#[derive(Debug, Clone, Default)]
pub struct DownloadRequest {
    pub url: String,
    /// Download audio only and transcode it to mp3.
    pub audio_only: bool,
    /// Requested vertical resolution, e.g. "720". Best-effort: falls back to
    /// the best available format when the height is not offered.
    pub quality: Option<String>,
    /// 0 disables compression; higher levels produce smaller files.
    pub compress_level: u32,
    /// Media root override; `~/crec` when unset.
    pub output_dir: Option<PathBuf>,
    /// Fetch the thumbnail image instead of the media itself.
    pub download_thumbnail: bool,
    /// Filename template with `{title}`, `{id}`, `{quality}`, `{date}`
    /// placeholders.
    pub filename_pattern: Option<String>,
    pub is_playlist: bool,
    /// Extra ffmpeg arguments passed through to yt-dlp post-processing.
    pub transcode_args: Option<String>,
    /// Strip the audio track (video-only format selection).
    pub no_audio: bool,
    /// Copy the final absolute path to the system clipboard (best effort).
    pub copy_to_clipboard: bool,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}
