//! Per-request orchestration: dispatch, path resolution, the yt-dlp run,
//! and post-processing side effects.
//!
//! A request is processed synchronously and sequentially; the only
//! asynchronous unit is the detached clipboard task.

use anyhow::Result;
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::config::CrecConfig;
use crate::handlers::HandlerRegistry;
use crate::output_path::{self, has_placeholders, ResolvedOutputPath};
use crate::postprocess::{clipboard, compress};
use crate::request::DownloadRequest;
use crate::ytdlp::{self, MediaInfo, ProgressUpdate};

/// Result of one download attempt. Extraction failures are values, not
/// errors: only unrecoverable filesystem problems surface as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// No handler recognized the URL. Nothing was created or fetched.
    Unsupported,
    /// The external tool failed; the diagnostic has been logged.
    Failed,
    Completed(PathBuf),
}

/// Runs one request end to end: select a handler, resolve the destination,
/// invoke yt-dlp, then apply optional compression and clipboard copy.
pub async fn download(
    cfg: &CrecConfig,
    registry: &HandlerRegistry,
    req: &DownloadRequest,
    progress: Option<mpsc::Sender<ProgressUpdate>>,
) -> Result<DownloadOutcome> {
    let Some(handler) = registry.select(&req.url) else {
        return Ok(DownloadOutcome::Unsupported);
    };
    tracing::info!(handler = handler.name(), url = %req.url, "dispatching download");

    let info = prefetch_info(cfg, req).await;
    let resolved = output_path::resolve(req, info.as_ref(), false)?;
    tracing::debug!(outtmpl = %resolved.as_outtmpl(), "resolved output path");

    let inv = ytdlp::build_download_args(cfg, req, handler.default_format(), &resolved, info.as_ref());
    let mut final_path = match ytdlp::run_download(&inv, &resolved, progress).await {
        Ok(path) => path,
        Err(err) => {
            tracing::error!("download failed: {err}");
            return Ok(DownloadOutcome::Failed);
        }
    };

    if req.compress_level > 0 && !req.download_thumbnail {
        final_path = run_compression(cfg, req, info.as_ref(), final_path).await?;
    }

    if req.copy_to_clipboard {
        let abs = std::fs::canonicalize(&final_path).unwrap_or_else(|_| final_path.clone());
        clipboard::copy_path_async(abs);
    }

    Ok(DownloadOutcome::Completed(final_path))
}

/// Metadata is only fetched when something needs it: a quality selection or
/// a pattern with placeholders. A failed fetch is soft; the run continues
/// with deferred templates and the default format.
async fn prefetch_info(cfg: &CrecConfig, req: &DownloadRequest) -> Option<MediaInfo> {
    let needed = req.quality.is_some()
        || req
            .filename_pattern
            .as_deref()
            .map(has_placeholders)
            .unwrap_or(false);
    if !needed {
        return None;
    }
    match ytdlp::fetch_info(cfg, &req.url).await {
        Ok(info) => Some(info),
        Err(err) => {
            tracing::warn!("metadata fetch failed, continuing without: {err}");
            None
        }
    }
}

/// Compression never discards the only artifact: the original is removed
/// only after ffmpeg succeeded, and a failed re-encode keeps it as the
/// result.
async fn run_compression(
    cfg: &CrecConfig,
    req: &DownloadRequest,
    info: Option<&MediaInfo>,
    downloaded: PathBuf,
) -> Result<PathBuf> {
    let target = match output_path::resolve(req, info, true)? {
        ResolvedOutputPath::Concrete(path) => path,
        ResolvedOutputPath::Template(template) => {
            compress::materialize_compressed_target(&template, &downloaded)
        }
    };

    match compress::compress_video(cfg, &downloaded, &target, req.compress_level).await {
        Ok(()) => {
            if let Err(err) = tokio::fs::remove_file(&downloaded).await {
                tracing::warn!("could not remove uncompressed original: {err}");
            }
            Ok(target)
        }
        Err(err) => {
            tracing::warn!("compression failed, keeping original: {err:#}");
            Ok(downloaded)
        }
    }
}
