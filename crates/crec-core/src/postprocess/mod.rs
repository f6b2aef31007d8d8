//! Side effects that run after a successful download.

pub mod clipboard;
pub mod compress;
