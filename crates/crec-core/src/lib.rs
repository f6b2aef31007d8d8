pub mod config;
pub mod logging;

pub mod downloader;
pub mod handlers;
pub mod output_path;
pub mod postprocess;
pub mod request;
pub mod ytdlp;
