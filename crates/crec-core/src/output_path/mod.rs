//! Output-path resolution: directory taxonomy under the media root,
//! sequential fallback naming, and filename-pattern expansion.
//!
//! The resolver is deterministic string/path logic; its only I/O is the
//! idempotent creation of the target directory and the existence probes of
//! the sequential counter.

mod pattern;
mod sequential;

pub use pattern::{expand_pattern, has_placeholders, sanitize_filename};
pub use sequential::next_sequential_path;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::request::DownloadRequest;
use crate::ytdlp::MediaInfo;

/// Content class deciding which subdirectory of the media root is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    Photo,
}

impl MediaKind {
    /// Audio wins over thumbnail when both flags are set.
    pub fn of(audio_only: bool, thumbnail: bool) -> Self {
        if audio_only {
            MediaKind::Audio
        } else if thumbnail {
            MediaKind::Photo
        } else {
            MediaKind::Video
        }
    }

    pub fn subdir(self) -> &'static str {
        match self {
            MediaKind::Video => "videos",
            MediaKind::Audio => "audio",
            MediaKind::Photo => "photos",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            MediaKind::Audio => "mp3",
            MediaKind::Video | MediaKind::Photo => "mp4",
        }
    }
}

/// Destination for a download: either a collision-checked concrete file
/// path, or a yt-dlp output template expanded by the tool at download time.
/// Never both; collisions in the template branches are the tool's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedOutputPath {
    Concrete(PathBuf),
    Template(String),
}

impl ResolvedOutputPath {
    /// String form handed to yt-dlp as `-o`.
    pub fn as_outtmpl(&self) -> String {
        match self {
            ResolvedOutputPath::Concrete(p) => p.display().to_string(),
            ResolvedOutputPath::Template(t) => t.clone(),
        }
    }
}

/// Default media root: `~/crec`.
pub fn default_media_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crec")
}

/// Ensures `<root>/<subdir>` exists and returns it. Idempotent; an already
/// existing directory is not an error, an uncreatable one is fatal.
pub fn ensure_media_dir(root: &Path, kind: MediaKind) -> Result<PathBuf> {
    let dir = root.join(kind.subdir());
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir)
}

/// Resolves the destination for a request. Rules, in order:
///
/// 1. Base directory: `output_dir` override, else `~/crec`; content
///    subdirectory `audio`/`photos`/`videos` (audio wins over thumbnail).
/// 2. Custom pattern: template with `{..}` placeholders expanded from the
///    prefetched metadata; concrete extension when metadata is present,
///    `%(ext)s` deferred to yt-dlp otherwise; `_compressed` suffix before
///    the extension when `compressed`.
/// 3. Thumbnail: `%(title)s.%(ext)s` template.
/// 4. Compressed without a pattern: `%(title)s_compressed.%(ext)s` template.
/// 5. Playlist without a pattern: per-item `%(playlist_index)s - %(title)s`
///    template (the sequential counter never applies to playlists).
/// 6. Otherwise: concrete sequential `video<N>.mp4` / `audio<N>.mp3`.
pub fn resolve(
    req: &DownloadRequest,
    info: Option<&MediaInfo>,
    compressed: bool,
) -> Result<ResolvedOutputPath> {
    let root = req.output_dir.clone().unwrap_or_else(default_media_root);
    let kind = MediaKind::of(req.audio_only, req.download_thumbnail);
    let dir = ensure_media_dir(&root, kind)?;

    if let Some(pat) = req.filename_pattern.as_deref() {
        let mut stem = expand_pattern(pat, info);
        if compressed {
            stem.push_str("_compressed");
        }
        let name = match info {
            Some(_) => format!("{stem}.{}", kind.extension()),
            None => format!("{stem}.%(ext)s"),
        };
        return Ok(ResolvedOutputPath::Template(dir.join(name).display().to_string()));
    }

    if req.download_thumbnail {
        let name = "%(title)s.%(ext)s";
        return Ok(ResolvedOutputPath::Template(dir.join(name).display().to_string()));
    }

    if compressed {
        let name = "%(title)s_compressed.%(ext)s";
        return Ok(ResolvedOutputPath::Template(dir.join(name).display().to_string()));
    }

    if req.is_playlist {
        let name = "%(playlist_index)s - %(title)s.%(ext)s";
        return Ok(ResolvedOutputPath::Template(dir.join(name).display().to_string()));
    }

    Ok(ResolvedOutputPath::Concrete(next_sequential_path(
        &dir,
        req.audio_only,
    )))
}

/// Opens the media root in the system file manager, creating it first.
pub fn open_media_root(root: &Path) -> Result<()> {
    fs::create_dir_all(root).with_context(|| format!("creating {}", root.display()))?;
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    std::process::Command::new(opener)
        .arg(root)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("launching {opener}"))?;
    Ok(())
}
