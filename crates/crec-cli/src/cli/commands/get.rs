//! `crec get <url>` – download the media behind a supported URL.

use anyhow::Result;
use crec_core::config::CrecConfig;
use crec_core::downloader::{self, DownloadOutcome};
use crec_core::handlers::HandlerRegistry;
use crec_core::request::DownloadRequest;
use crec_core::ytdlp::ProgressUpdate;
use std::io::Write;

pub async fn run_get(cfg: &CrecConfig, mut req: DownloadRequest) -> Result<()> {
    // Config-level media root applies when the flag did not.
    if req.output_dir.is_none() {
        req.output_dir = cfg.media_root.clone();
    }

    let registry = HandlerRegistry::default();

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<ProgressUpdate>(16);
    let progress_handle = tokio::spawn(async move {
        let mut last_percent = -1.0f32;
        while let Some(update) = progress_rx.recv().await {
            if update.percent > last_percent {
                print!("\rDownloading: {:.1}%", update.percent);
                let _ = std::io::stdout().flush();
                last_percent = update.percent;
            }
        }
        if last_percent >= 0.0 {
            println!();
        }
    });

    let outcome = downloader::download(cfg, &registry, &req, Some(progress_tx)).await?;
    let _ = progress_handle.await;

    match outcome {
        DownloadOutcome::Unsupported => {
            println!(
                "Unsupported URL: {} (supported platforms: {})",
                req.url,
                registry.names().join(", ")
            );
        }
        DownloadOutcome::Failed => {
            println!("Download failed; see the log for details.");
        }
        DownloadOutcome::Completed(path) => {
            println!("Saved to {}", path.display());
            if req.copy_to_clipboard {
                println!("Path copied to clipboard.");
            }
        }
    }
    Ok(())
}
