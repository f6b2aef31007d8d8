//! Sequential fallback naming: `video<N>.mp4` / `audio<N>.mp3`.

use std::path::{Path, PathBuf};

/// First free `video<N>.mp4` (or `audio<N>.mp3`) in `dir`, counting from 1.
///
/// Linear probing with no upper bound: the scan is O(existing files) and the
/// chosen name is only guaranteed free at probe time. Two concurrent
/// invocations can race on the same slot; crec is a single-invocation tool,
/// so the race is accepted rather than locked around.
pub fn next_sequential_path(dir: &Path, audio_only: bool) -> PathBuf {
    let base = if audio_only { "audio" } else { "video" };
    let ext = if audio_only { "mp3" } else { "mp4" };

    let mut counter: u64 = 1;
    loop {
        let candidate = dir.join(format!("{base}{counter}.{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
