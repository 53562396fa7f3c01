//! Image filename rules: extension allowlist, sanitizing, stored names.

use chrono::{DateTime, Utc};

/// Timestamp prefix length of a stored name: `YYYYMMDDHHMMSS_`.
pub const STORED_PREFIX_LEN: usize = 15;

/// Longest sanitized name that still fits an `image_filename` once prefixed.
pub const SANITIZED_MAX_LEN: usize = super::IMAGE_FILENAME_MAX_LEN - STORED_PREFIX_LEN;

/// Extensions accepted by default, compared case-insensitively.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// The extension after the last `.`, if the name has one.
pub fn extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    extension(filename).is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

/// Reduce a client-supplied filename to a safe single path segment.
///
/// Path separators and whitespace become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped, and leading or trailing `.`/`_` are
/// trimmed, so `../../etc/passwd` becomes `etc_passwd`. The result may be
/// empty.
pub fn sanitize_filename(filename: &str) -> String {
    let flattened: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    flattened
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Shorten a sanitized name to at most `max_len` characters, cutting the
/// stem and keeping the extension. `None` if the extension alone does not
/// fit.
///
/// Sanitized names are ASCII, so byte offsets are character offsets.
pub fn truncate_filename(sanitized: &str, max_len: usize) -> Option<String> {
    if sanitized.len() <= max_len {
        return Some(sanitized.to_string());
    }

    let (stem, ext) = sanitized.rsplit_once('.')?;
    let keep = max_len.checked_sub(ext.len() + 1).filter(|keep| *keep > 0)?;
    let stem = stem[..keep.min(stem.len())].trim_end_matches(['.', '_']);
    if stem.is_empty() {
        return None;
    }

    Some(format!("{stem}.{ext}"))
}

/// `YYYYMMDDHHMMSS_<sanitized>`.
pub fn stored_image_name(sanitized: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}", at.format("%Y%m%d%H%M%S"), sanitized)
}

/// Whether `name` is already a bare, sanitized filename.
pub fn is_plain_filename(name: &str) -> bool {
    !name.is_empty() && sanitize_filename(name) == name
}
