//! `{placeholder}` expansion and filename sanitization for custom patterns.

use crate::ytdlp::MediaInfo;

/// Placeholders recognized in a filename pattern. Case-sensitive, literal
/// braces required.
const PLACEHOLDERS: &[&str] = &["{title}", "{id}", "{quality}", "{date}"];

/// Whether the pattern references any recognized placeholder (and therefore
/// needs a metadata prefetch to expand meaningfully).
pub fn has_placeholders(pattern: &str) -> bool {
    PLACEHOLDERS.iter().any(|p| pattern.contains(p))
}

/// Expands the recognized placeholders and sanitizes the result.
///
/// Substitution is purely textual. Without metadata, `{title}` falls back to
/// `video` and the other placeholders to empty strings. Unknown placeholders
/// are not an error; their text survives (minus the braces, which the
/// character filter drops).
pub fn expand_pattern(pattern: &str, info: Option<&MediaInfo>) -> String {
    let title = info
        .and_then(|i| i.title.clone())
        .unwrap_or_else(|| "video".to_string());
    let id = info.and_then(|i| i.id.clone()).unwrap_or_default();
    let quality = info
        .and_then(|i| i.height)
        .map(|h| h.to_string())
        .unwrap_or_default();
    let date = info.and_then(|i| i.upload_date.clone()).unwrap_or_default();

    let expanded = pattern
        .replace("{title}", &title)
        .replace("{id}", &id)
        .replace("{quality}", &quality)
        .replace("{date}", &date);
    sanitize_filename(&expanded)
}

/// Keeps alphanumerics, spaces, hyphens, underscores and periods; drops
/// everything else (path separators, braces, shell metacharacters).
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> MediaInfo {
        MediaInfo {
            title: Some("Clip".to_string()),
            id: Some("abc123".to_string()),
            height: Some(720),
            upload_date: Some("20240110".to_string()),
            ..MediaInfo::default()
        }
    }

    #[test]
    fn substitutes_all_placeholders() {
        let info = info();
        assert_eq!(expand_pattern("{title}_{quality}p", Some(&info)), "Clip_720p");
        assert_eq!(expand_pattern("{id}-{date}", Some(&info)), "abc123-20240110");
    }

    #[test]
    fn strips_illegal_characters() {
        let mut info = info();
        info.title = Some("Clip: a/b?".to_string());
        assert_eq!(expand_pattern("{title}", Some(&info)), "Clip ab");
    }

    #[test]
    fn unknown_placeholder_survives_without_braces() {
        assert_eq!(expand_pattern("{title}_{nope}", Some(&info())), "Clip_nope");
    }

    #[test]
    fn defaults_without_metadata() {
        assert_eq!(expand_pattern("{title}_{quality}", None), "video_");
    }

    #[test]
    fn placeholder_detection() {
        assert!(has_placeholders("{title} x"));
        assert!(has_placeholders("a{date}b"));
        assert!(!has_placeholders("plain name"));
        assert!(!has_placeholders("{Title}")); // case-sensitive
    }

    #[test]
    fn sanitize_keeps_safe_set() {
        assert_eq!(sanitize_filename("a b-c_d.e"), "a b-c_d.e");
        assert_eq!(sanitize_filename("a/b\\c:d*e"), "abcde");
    }
}
