//! Filename derivation and extension correction

use apkget_types::PackageId;
use regex::Regex;
use std::sync::LazyLock;

static DISPOSITION_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)filename[^;=\n]*=\s*(?:"([^"]*)"|'([^']*)'|([^;\n]*))"#)
        .expect("disposition pattern is valid")
});

/// Pick the artifact filename from `Content-Disposition`, falling back to
/// `{package}.apk`
pub(crate) fn artifact_filename(package: &PackageId, disposition: Option<&str>) -> String {
    disposition
        .and_then(disposition_filename)
        .unwrap_or_else(|| package.default_filename())
}

/// Extract the filename parameter from a `Content-Disposition` value
///
/// Handles quoted, single-quoted and bare values plus the RFC 5987
/// `UTF-8''name` form. Only the last path component is kept.
pub(crate) fn disposition_filename(header: &str) -> Option<String> {
    let caps = DISPOSITION_FILENAME.captures(header)?;
    let raw = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str();

    let value = strip_charset_prefix(raw.trim())
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    let name = value.rsplit(['/', '\\']).next().unwrap_or(value).trim();

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

fn strip_charset_prefix(value: &str) -> &str {
    match value.split_once("''") {
        Some((charset, rest)) if !charset.is_empty() && !charset.contains(char::is_whitespace) => {
            rest
        }
        _ => value,
    }
}

/// Rewrite a trailing `.apk` to `.xapk` or `.apks` when the link or media
/// type says the artifact is a bundle
///
/// Returns the corrected name, or `None` when no rewrite applies.
pub(crate) fn corrected_extension(filename: &str, url: &str, content_type: &str) -> Option<String> {
    const APK: &str = ".apk";

    let lower_name = filename.to_ascii_lowercase();
    if !lower_name.ends_with(APK) {
        return None;
    }

    let url = url.to_ascii_lowercase();
    let content_type = content_type.to_ascii_lowercase();
    let target = if url.contains(".xapk") || content_type.contains("xapk") {
        ".xapk"
    } else if url.contains(".apks") || content_type.contains("apks") {
        ".apks"
    } else {
        return None;
    };

    let stem = &filename[..filename.len() - APK.len()];
    Some(format!("{stem}{target}"))
}
