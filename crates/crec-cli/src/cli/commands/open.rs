//! `crec open` – open the media root in the system file manager.

use anyhow::Result;
use crec_core::config::CrecConfig;
use crec_core::output_path;

pub fn run_open(cfg: &CrecConfig) -> Result<()> {
    let root = cfg
        .media_root
        .clone()
        .unwrap_or_else(output_path::default_media_root);
    output_path::open_media_root(&root)?;
    println!("Opened {}", root.display());
    Ok(())
}
