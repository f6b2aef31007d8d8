//! Metadata record produced by `yt-dlp -J`.

use serde::Deserialize;

/// One entry of the extractor's format list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatInfo {
    pub format_id: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub vcodec: Option<String>,
}

/// Subset of the yt-dlp metadata record that crec consumes. Everything is
/// optional; extractors differ in what they report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    /// YYYYMMDD, as yt-dlp reports it.
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub formats: Vec<FormatInfo>,
}

impl MediaInfo {
    /// Format id of a video format with the requested height, if listed.
    /// Later entries win: yt-dlp sorts the list worst-first.
    pub fn format_for_quality(&self, height: u32) -> Option<&str> {
        self.formats
            .iter()
            .filter(|f| f.height == Some(height))
            .filter(|f| f.vcodec.as_deref().map(|v| v != "none").unwrap_or(true))
            .next_back()
            .map(|f| f.format_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "title": "Clip",
        "id": "abc123",
        "height": 1080,
        "upload_date": "20240110",
        "formats": [
            {"format_id": "sb0", "height": null, "vcodec": "none"},
            {"format_id": "140", "vcodec": "none"},
            {"format_id": "134", "height": 360, "vcodec": "avc1.4d401e"},
            {"format_id": "136", "height": 720, "vcodec": "avc1.4d401f"},
            {"format_id": "247", "height": 720, "vcodec": "vp9"}
        ]
    }"#;

    #[test]
    fn parses_metadata_record() {
        let info: MediaInfo = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(info.title.as_deref(), Some("Clip"));
        assert_eq!(info.id.as_deref(), Some("abc123"));
        assert_eq!(info.height, Some(1080));
        assert_eq!(info.upload_date.as_deref(), Some("20240110"));
        assert_eq!(info.formats.len(), 5);
    }

    #[test]
    fn quality_lookup_prefers_later_entries() {
        let info: MediaInfo = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(info.format_for_quality(720), Some("247"));
        assert_eq!(info.format_for_quality(360), Some("134"));
    }

    #[test]
    fn quality_lookup_misses_cleanly() {
        let info: MediaInfo = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(info.format_for_quality(1080), None);
    }

    #[test]
    fn audio_only_formats_are_skipped() {
        let info = MediaInfo {
            formats: vec![FormatInfo {
                format_id: "bad".into(),
                height: Some(720),
                vcodec: Some("none".into()),
            }],
            ..MediaInfo::default()
        };
        assert_eq!(info.format_for_quality(720), None);
    }

    #[test]
    fn tolerates_sparse_records() {
        let info: MediaInfo = serde_json::from_str("{}").unwrap();
        assert!(info.title.is_none());
        assert!(info.formats.is_empty());
    }
}
