//! CLI for the crec media download helper.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crec_core::config;
use std::path::PathBuf;

use commands::{run_get, run_info, run_open};

/// Top-level CLI for the crec media download helper.
#[derive(Debug, Parser)]
#[command(name = "crec")]
#[command(about = "crec: download media from YouTube, Instagram and Twitter/X", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the media behind a supported URL.
    Get {
        /// URL of the post, video, reel or status to download.
        url: String,

        /// Download audio only and transcode it to mp3.
        #[arg(long)]
        audio: bool,

        /// Preferred vertical resolution (e.g. 720). Falls back to best available.
        #[arg(long, value_name = "HEIGHT")]
        quality: Option<String>,

        /// Compression level: 0 = off, higher = smaller file.
        #[arg(long, default_value = "0", value_name = "LEVEL")]
        compress: u32,

        /// Media root override (default: ~/crec).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Fetch the thumbnail image instead of the media.
        #[arg(long)]
        thumbnail: bool,

        /// Filename pattern with {title}, {id}, {quality}, {date} placeholders.
        #[arg(long, value_name = "PATTERN")]
        pattern: Option<String>,

        /// Download the whole playlist with per-item numbering.
        #[arg(long)]
        playlist: bool,

        /// Extra ffmpeg arguments passed through to post-processing.
        #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
        transcode_args: Option<String>,

        /// Strip the audio track (video-only download).
        #[arg(long)]
        no_audio: bool,

        /// Copy the resulting path to the clipboard.
        #[arg(long)]
        copy: bool,
    },

    /// Print the metadata of a URL without downloading.
    Info {
        /// URL to inspect.
        url: String,
    },

    /// Open the media root in the system file manager.
    Open,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get {
                url,
                audio,
                quality,
                compress,
                output_dir,
                thumbnail,
                pattern,
                playlist,
                transcode_args,
                no_audio,
                copy,
            } => {
                let mut req = crec_core::request::DownloadRequest::new(url);
                req.audio_only = audio;
                req.quality = quality;
                req.compress_level = compress;
                req.output_dir = output_dir;
                req.download_thumbnail = thumbnail;
                req.filename_pattern = pattern;
                req.is_playlist = playlist;
                req.transcode_args = transcode_args;
                req.no_audio = no_audio;
                req.copy_to_clipboard = copy;
                run_get(&cfg, req).await?;
            }
            CliCommand::Info { url } => run_info(&cfg, &url).await?,
            CliCommand::Open => run_open(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
