//! `crec info <url>` – print extracted metadata without downloading.

use anyhow::Result;
use crec_core::config::CrecConfig;
use crec_core::handlers::HandlerRegistry;
use crec_core::ytdlp;

pub async fn run_info(cfg: &CrecConfig, url: &str) -> Result<()> {
    let registry = HandlerRegistry::default();
    let Some(handler) = registry.select(url) else {
        println!(
            "Unsupported URL: {url} (supported platforms: {})",
            registry.names().join(", ")
        );
        return Ok(());
    };

    let info = ytdlp::fetch_info(cfg, url).await?;
    println!("platform:    {}", handler.name());
    println!("title:       {}", info.title.as_deref().unwrap_or("-"));
    println!("id:          {}", info.id.as_deref().unwrap_or("-"));
    match info.height {
        Some(h) => println!("height:      {h}"),
        None => println!("height:      -"),
    }
    println!("upload date: {}", info.upload_date.as_deref().unwrap_or("-"));
    println!("formats:     {}", info.formats.len());
    Ok(())
}
