use std::path::{Path, PathBuf};

/// Turn a pasted (dragged-in) payload into paths.
///
/// A payload that names one existing path verbatim is taken as is, which
/// covers terminals that paste a single path with unescaped spaces.
pub fn dropped_paths(text: &str) -> Vec<PathBuf> {
    let trimmed = text.trim();
    if !trimmed.is_empty() && Path::new(trimmed).exists() {
        return vec![PathBuf::from(trimmed)];
    }
    parse_dropped_paths(text)
}

/// Split a paste payload the way a shell would: whitespace separates paths,
/// quotes group, backslash escapes the next character. `file://` URIs are
/// converted to plain paths.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_token = true;
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }

    tokens
        .into_iter()
        .filter(|t| !t.is_empty())
        .filter_map(|t| match t.strip_prefix("file://") {
            Some(rest) => file_uri_path(rest),
            None => Some(PathBuf::from(t)),
        })
        .collect()
}

/// Local path named by the part of a `file://` URI after the scheme.
///
/// Escapes decode to raw bytes, so names that are not UTF-8 survive.
fn file_uri_path(rest: &str) -> Option<PathBuf> {
    let (host, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
    if !host.is_empty() && !host.eq_ignore_ascii_case("localhost") {
        tracing::warn!(host, "ignoring a file URI on another host");
        return None;
    }
    if path.is_empty() {
        return None;
    }
    Some(path_from_bytes(&urlencoding::decode_binary(path.as_bytes())))
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}
