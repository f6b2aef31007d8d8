//! Optional ffmpeg re-encode producing a smaller `_compressed` artifact.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::config::CrecConfig;

/// Maps a user compression level (1..) to an x264 CRF. Level 0 disables
/// compression upstream; each level adds 5 CRF points on top of the x264
/// default of 23, capped at the codec maximum.
pub fn crf_for_level(level: u32) -> u32 {
    23u32.saturating_add(level.saturating_mul(5)).min(51)
}

/// Fills the resolver's compressed template with the downloaded file's
/// actual stem and extension, yielding the concrete ffmpeg target.
pub fn materialize_compressed_target(template: &str, downloaded: &Path) -> PathBuf {
    let stem = downloaded
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("video");
    let ext = downloaded
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("mp4");
    PathBuf::from(template.replace("%(title)s", stem).replace("%(ext)s", ext))
}

/// Re-encodes `input` into `output`. On failure the partial output is
/// removed and `input` is left untouched; the caller decides whether to
/// delete the original.
pub async fn compress_video(
    cfg: &CrecConfig,
    input: &Path,
    output: &Path,
    level: u32,
) -> Result<()> {
    let crf = crf_for_level(level);
    tracing::info!(input = %input.display(), output = %output.display(), crf, "compressing");

    let status = Command::new(&cfg.ffmpeg_bin)
        .arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-vcodec", "libx264", "-preset", "medium", "-crf"])
        .arg(crf.to_string())
        .arg(output)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .with_context(|| format!("failed to start {}", cfg.ffmpeg_bin))?;

    if !status.success() {
        let _ = tokio::fs::remove_file(output).await;
        bail!("{} exited with {}", cfg.ffmpeg_bin, status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crf_grows_with_level_and_caps() {
        assert_eq!(crf_for_level(1), 28);
        assert_eq!(crf_for_level(3), 38);
        assert_eq!(crf_for_level(100), 51);
    }

    #[test]
    fn materializes_template_from_downloaded_file() {
        let target = materialize_compressed_target(
            "/out/videos/%(title)s_compressed.%(ext)s",
            Path::new("/out/videos/video3.mp4"),
        );
        assert_eq!(target, PathBuf::from("/out/videos/video3_compressed.mp4"));
    }

    #[test]
    fn materializes_fully_expanded_template_unchanged() {
        let target = materialize_compressed_target(
            "/out/videos/Clip_compressed.mp4",
            Path::new("/out/videos/Clip.mp4"),
        );
        assert_eq!(target, PathBuf::from("/out/videos/Clip_compressed.mp4"));
    }
}
