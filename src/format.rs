//! Formatting helpers for the file listing and download summary.

use std::time::Duration;

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Formats a byte count the way the listing displays sizes.
///
/// Zero is special-cased as `"0 Bytes"`. Otherwise the value is scaled by
/// powers of 1024, printed with up to two decimals and trailing zeros
/// trimmed: `1536` becomes `"1.5 KB"`, `2048` becomes `"2 KB"`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exp = ((bytes.ilog2() / 10) as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let rendered = format!("{value:.2}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[exp])
}

/// Formats a duration for the summary (e.g. "5.0s", "1m 05s", "1h 01m 05s").
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 3600 {
        format!(
            "{}h {:02}m {:02}s",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}.{:01}s", secs, d.subsec_millis() / 100)
    }
}

/// Maps a MIME type to the icon tag used in the listing.
#[must_use]
pub fn file_icon(mimetype: &str) -> &'static str {
    if mimetype.starts_with("image/") {
        "image"
    } else if mimetype.starts_with("video/") {
        "video"
    } else if mimetype.starts_with("audio/") {
        "music"
    } else if mimetype.contains("pdf") {
        "file-text"
    } else if mimetype.contains("zip") || mimetype.contains("rar") || mimetype.contains("tar") {
        "archive"
    } else if mimetype.contains("text/") {
        "file-text"
    } else {
        "file"
    }
}
