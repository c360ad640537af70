use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHANUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("static regex is valid"));

/// Replaces every run of non-alphanumeric ASCII characters with a single `_`.
pub fn sanitize_title(title: &str) -> String {
    NON_ALPHANUMERIC_RUN.replace_all(title, "_").into_owned()
}

/// Joins an optional discriminator and a sanitized title into a file stem.
///
/// Empty parts are left out, so no leading or doubled underscore appears.
pub fn file_stem(discriminator: Option<&str>, title: &str) -> String {
    let title = sanitize_title(title);
    [discriminator.unwrap_or(""), title.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}
