//! Parsing of yt-dlp stdout lines: progress percentages and output paths.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // [download]  12.5% of ~ 310.04MiB at  374.36KiB/s ETA 11:59
    static ref PROGRESS_RE: Regex = Regex::new(r"\[download\]\s+(\d+(?:\.\d+)?)%").unwrap();
    static ref DEST_RE: Regex = Regex::new(r"\[download\]\s+Destination:\s+(.+)").unwrap();
    static ref MERGE_RE: Regex =
        Regex::new(r#"\[Merger\]\s+Merging formats into "(.+)""#).unwrap();
    static ref EXTRACT_RE: Regex = Regex::new(r"\[ExtractAudio\]\s+Destination:\s+(.+)").unwrap();
    static ref THUMB_RE: Regex = Regex::new(r"Writing video thumbnail .*to:\s+(.+)").unwrap();
    static ref ALREADY_RE: Regex =
        Regex::new(r"\[download\]\s+(.+?) has already been downloaded").unwrap();
}

/// Download percentage reported by a `[download]` line, if any.
pub fn parse_progress(line: &str) -> Option<f32> {
    PROGRESS_RE.captures(line)?.get(1)?.as_str().parse().ok()
}

/// Output path announced by this line, if it announces one.
///
/// Post-processing destinations (merge, audio extraction) supersede the raw
/// download path; callers keep the last value seen over the whole run.
pub fn parse_destination(line: &str) -> Option<String> {
    for re in [&*MERGE_RE, &*EXTRACT_RE, &*DEST_RE, &*THUMB_RE, &*ALREADY_RE] {
        if let Some(caps) = re.captures(line) {
            return Some(caps[1].trim().to_string());
        }
    }
    None
}
