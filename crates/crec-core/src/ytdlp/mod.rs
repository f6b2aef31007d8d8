//! Invocation of the external yt-dlp tool: argument building, metadata
//! fetch (`-J`) and the streaming download run.
//!
//! All retrieval, format negotiation and transcoding happen inside the tool;
//! this module only builds argument vectors and reads lines back.

mod error;
mod info;
mod progress;

pub use error::YtdlpError;
pub use info::{FormatInfo, MediaInfo};
pub use progress::{parse_destination, parse_progress};

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::config::CrecConfig;
use crate::output_path::ResolvedOutputPath;
use crate::request::DownloadRequest;

/// Stderr lines kept for the error message when the tool fails.
const STDERR_TAIL_LINES: usize = 40;

/// Download percentage forwarded to the caller as lines arrive.
#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate {
    pub percent: f32,
}

/// Fully built yt-dlp invocation for one request.
#[derive(Debug, Clone)]
pub struct YtdlpInvocation {
    pub bin: String,
    pub args: Vec<String>,
}

/// Builds the argument vector for a download run.
///
/// Option precedence follows the request semantics: a requested quality maps
/// to a format id from the prefetched format list (soft fallback to the
/// handler default with a warning when unavailable), then audio-only and
/// no-audio override the selector outright.
pub fn build_download_args(
    cfg: &CrecConfig,
    req: &DownloadRequest,
    default_format: &str,
    outtmpl: &ResolvedOutputPath,
    info: Option<&MediaInfo>,
) -> YtdlpInvocation {
    let mut args: Vec<String> = vec![
        "--newline".into(),
        "--no-colors".into(),
        "--ignore-errors".into(),
        "-o".into(),
        outtmpl.as_outtmpl(),
    ];
    if !cfg.check_certificates {
        args.push("--no-check-certificate".into());
    }

    let mut format = default_format.to_string();
    if let Some(q) = req.quality.as_deref() {
        let resolved = q
            .trim_end_matches('p')
            .parse::<u32>()
            .ok()
            .and_then(|h| info.and_then(|i| i.format_for_quality(h)));
        match resolved {
            Some(id) => format = format!("{id}+bestaudio/best"),
            None => {
                tracing::warn!(quality = q, "requested quality not available, downloading best")
            }
        }
    }
    if req.audio_only {
        format = "bestaudio/best".into();
        args.push("-x".into());
        args.push("--audio-format".into());
        args.push("mp3".into());
        args.push("--audio-quality".into());
        args.push(format!("{}K", cfg.audio_bitrate));
    }
    if req.no_audio {
        format = "bestvideo/best".into();
    }
    args.push("-f".into());
    args.push(format);

    if let Some(extra) = req.transcode_args.as_deref() {
        args.push("--postprocessor-args".into());
        args.push(format!("ffmpeg:{extra}"));
    }

    if req.download_thumbnail {
        args.push("--skip-download".into());
        args.push("--write-thumbnail".into());
    }

    args.push(if req.is_playlist { "--yes-playlist" } else { "--no-playlist" }.into());
    args.push(req.url.clone());

    YtdlpInvocation {
        bin: cfg.ytdlp_bin.clone(),
        args,
    }
}

/// Fetches the metadata record without downloading (`yt-dlp -J`).
pub async fn fetch_info(cfg: &CrecConfig, url: &str) -> Result<MediaInfo, YtdlpError> {
    let bin = cfg.ytdlp_bin.clone();
    let mut cmd = Command::new(&bin);
    cmd.args(["-J", "--no-warnings"]);
    if !cfg.check_certificates {
        cmd.arg("--no-check-certificate");
    }
    cmd.arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let out = cmd.output().await.map_err(|e| YtdlpError::Spawn {
        bin: bin.clone(),
        source: e,
    })?;
    if !out.status.success() {
        return Err(YtdlpError::Failed {
            bin,
            status: out.status,
            stderr_tail: tail_of(&out.stderr),
        });
    }
    Ok(serde_json::from_slice(&out.stdout)?)
}

fn tail_of(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Runs the built invocation, streaming stdout for progress and destination
/// lines.
///
/// Returns the final output path: the concrete resolver path when one was
/// used, otherwise the last destination the tool reported (post-processing
/// steps announce theirs after the raw download's, so last wins).
pub async fn run_download(
    inv: &YtdlpInvocation,
    resolved: &ResolvedOutputPath,
    progress: Option<mpsc::Sender<ProgressUpdate>>,
) -> Result<PathBuf, YtdlpError> {
    tracing::debug!(bin = %inv.bin, args = ?inv.args, "spawning downloader");
    let mut child = Command::new(&inv.bin)
        .args(&inv.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| YtdlpError::Spawn {
            bin: inv.bin.clone(),
            source: e,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Keep a bounded stderr tail for the error message.
    let tail_task = tokio::spawn(async move {
        let mut tail: VecDeque<String> = VecDeque::new();
        if let Some(stream) = stderr {
            let mut lines = BufReader::new(stream).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                tracing::debug!(target: "crec_core::ytdlp::stderr", "{line}");
                if tail.len() >= STDERR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line);
            }
        }
        tail
    });

    let mut destination: Option<String> = None;
    if let Some(stream) = stdout {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            tracing::trace!(target: "crec_core::ytdlp::stdout", "{line}");
            if let Some(percent) = parse_progress(&line) {
                if let Some(tx) = &progress {
                    let _ = tx.try_send(ProgressUpdate { percent });
                }
            }
            if let Some(dest) = parse_destination(&line) {
                destination = Some(dest);
            }
        }
    }

    let status = child.wait().await.map_err(|e| YtdlpError::Io {
        bin: inv.bin.clone(),
        source: e,
    })?;
    let tail = tail_task.await.unwrap_or_default();

    if !status.success() {
        return Err(YtdlpError::Failed {
            bin: inv.bin.clone(),
            status,
            stderr_tail: Vec::from(tail).join("\n"),
        });
    }

    match resolved {
        ResolvedOutputPath::Concrete(path) => Ok(path.clone()),
        ResolvedOutputPath::Template(_) => {
            destination.map(PathBuf::from).ok_or(YtdlpError::NoOutput)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::DownloadRequest;

    fn build(req: &DownloadRequest, info: Option<&MediaInfo>) -> YtdlpInvocation {
        let cfg = CrecConfig::default();
        let outtmpl = ResolvedOutputPath::Template("/tmp/out.%(ext)s".to_string());
        build_download_args(&cfg, req, "bestvideo+bestaudio/best", &outtmpl, info)
    }

    fn arg_after(inv: &YtdlpInvocation, flag: &str) -> Option<String> {
        let pos = inv.args.iter().position(|a| a == flag)?;
        inv.args.get(pos + 1).cloned()
    }

    #[test]
    fn default_run_uses_handler_format() {
        let req = DownloadRequest::new("https://example.com/x");
        let inv = build(&req, None);
        assert_eq!(inv.bin, "yt-dlp");
        assert_eq!(arg_after(&inv, "-f").as_deref(), Some("bestvideo+bestaudio/best"));
        assert_eq!(arg_after(&inv, "-o").as_deref(), Some("/tmp/out.%(ext)s"));
        assert!(inv.args.contains(&"--no-check-certificate".to_string()));
        assert!(inv.args.contains(&"--no-playlist".to_string()));
        assert_eq!(inv.args.last().map(String::as_str), Some("https://example.com/x"));
    }

    #[test]
    fn audio_only_extracts_mp3() {
        let mut req = DownloadRequest::new("u");
        req.audio_only = true;
        let inv = build(&req, None);
        assert_eq!(arg_after(&inv, "-f").as_deref(), Some("bestaudio/best"));
        assert!(inv.args.contains(&"-x".to_string()));
        assert_eq!(arg_after(&inv, "--audio-format").as_deref(), Some("mp3"));
        assert_eq!(arg_after(&inv, "--audio-quality").as_deref(), Some("192K"));
    }

    #[test]
    fn no_audio_selects_video_only() {
        let mut req = DownloadRequest::new("u");
        req.no_audio = true;
        let inv = build(&req, None);
        assert_eq!(arg_after(&inv, "-f").as_deref(), Some("bestvideo/best"));
    }

    #[test]
    fn quality_hit_uses_format_id() {
        let info = MediaInfo {
            formats: vec![FormatInfo {
                format_id: "136".into(),
                height: Some(720),
                vcodec: Some("avc1".into()),
            }],
            ..MediaInfo::default()
        };
        let mut req = DownloadRequest::new("u");
        req.quality = Some("720".into());
        let inv = build(&req, Some(&info));
        assert_eq!(arg_after(&inv, "-f").as_deref(), Some("136+bestaudio/best"));
    }

    #[test]
    fn quality_miss_falls_back_to_default() {
        let mut req = DownloadRequest::new("u");
        req.quality = Some("4320".into());
        let inv = build(&req, Some(&MediaInfo::default()));
        assert_eq!(arg_after(&inv, "-f").as_deref(), Some("bestvideo+bestaudio/best"));
    }

    #[test]
    fn thumbnail_skips_download() {
        let mut req = DownloadRequest::new("u");
        req.download_thumbnail = true;
        let inv = build(&req, None);
        assert!(inv.args.contains(&"--skip-download".to_string()));
        assert!(inv.args.contains(&"--write-thumbnail".to_string()));
    }

    #[test]
    fn playlist_flag_switches_selection() {
        let mut req = DownloadRequest::new("u");
        req.is_playlist = true;
        let inv = build(&req, None);
        assert!(inv.args.contains(&"--yes-playlist".to_string()));
        assert!(!inv.args.contains(&"--no-playlist".to_string()));
    }

    #[test]
    fn transcode_args_pass_through() {
        let mut req = DownloadRequest::new("u");
        req.transcode_args = Some("-vf scale=640:-1".into());
        let inv = build(&req, None);
        assert_eq!(
            arg_after(&inv, "--postprocessor-args").as_deref(),
            Some("ffmpeg:-vf scale=640:-1")
        );
    }

    #[test]
    fn certificate_check_toggle() {
        let mut cfg = CrecConfig::default();
        cfg.check_certificates = true;
        let req = DownloadRequest::new("u");
        let outtmpl = ResolvedOutputPath::Template("/tmp/o".into());
        let inv = build_download_args(&cfg, &req, "best", &outtmpl, None);
        assert!(!inv.args.contains(&"--no-check-certificate".to_string()));
    }
}
