use once_cell::sync::Lazy;
use regex::Regex;

pub const TXT_EXTENSION: &str = ".txt";

/// Whitespace, dots and underscores all become a single hyphen.
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s._]+").expect("static regex compile"));
static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("static regex compile"));
static HYPHEN_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-{2,}").expect("static regex compile"));

/// Turns a model reply into a storage-safe `.txt` file name.
///
/// Only the first non-blank line is considered. The stem is reduced to
/// `[a-z0-9-]`, so the only dot in the result is the one before `txt`. Returns `None` when nothing
/// usable is left, so the caller can substitute its own default.
#[must_use]
pub fn normalize_file_name(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let unquoted = line
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
        .to_lowercase();

    let without_ext = unquoted.strip_suffix(TXT_EXTENSION).unwrap_or(&unquoted);

    let hyphenated = SEPARATOR_RE.replace_all(without_ext, "-");
    let cleaned = DISALLOWED_RE.replace_all(&hyphenated, "");
    let collapsed = HYPHEN_RUN_RE.replace_all(&cleaned, "-");
    let stem = collapsed.trim_matches('-');
    if stem.is_empty() {
        return None;
    }

    Some(format!("{stem}{TXT_EXTENSION}"))
}
