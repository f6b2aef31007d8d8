use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/crec/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrecConfig {
    /// Media root override; `~/crec` when unset. Per-request `--output-dir`
    /// still takes precedence over both.
    #[serde(default)]
    pub media_root: Option<PathBuf>,
    /// yt-dlp binary to invoke (name or absolute path).
    #[serde(default = "default_ytdlp_bin")]
    pub ytdlp_bin: String,
    /// ffmpeg binary used for compression.
    #[serde(default = "default_ffmpeg_bin")]
    pub ffmpeg_bin: String,
    /// Bitrate in kbit/s for extracted mp3 audio.
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: u32,
    /// Verify TLS certificates during extraction. Off by default; several of
    /// the supported CDNs serve media from hosts with mismatched certs.
    #[serde(default)]
    pub check_certificates: bool,
}

fn default_ytdlp_bin() -> String {
    "yt-dlp".to_string()
}

fn default_ffmpeg_bin() -> String {
    "ffmpeg".to_string()
}

fn default_audio_bitrate() -> u32 {
    192
}

impl Default for CrecConfig {
    fn default() -> Self {
        Self {
            media_root: None,
            ytdlp_bin: default_ytdlp_bin(),
            ffmpeg_bin: default_ffmpeg_bin(),
            audio_bitrate: default_audio_bitrate(),
            check_certificates: false,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("crec")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CrecConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CrecConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CrecConfig = toml::from_str(&data)?;
    Ok(cfg)
}
