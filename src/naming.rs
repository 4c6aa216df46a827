//! Path and title helpers shared by the normalizer, filter, and renderer.
//!
//! ## Display Titles
//!
//! Items without an explicit `title`/`name` are labelled by their file name
//! with the extension stripped:
//! - `/movies/Blade%20Runner.mkv` → "Blade Runner"
//! - `music/01 Intro.flac` → "01 Intro"
//!
//! ## Natural Order
//!
//! [`natural_cmp`] compares embedded digit runs by value, so "Episode 2"
//! sorts before "Episode 10".

use std::cmp::Ordering;

/// Make a manifest reference absolute.
///
/// Scheme-qualified (`https://…`), protocol-relative (`//…`), `blob:` and
/// `data:` references are returned untouched. Anything else gets a single
/// leading slash if it does not already start with one.
pub fn ensure_absolute(reference: &str) -> String {
    if has_scheme(reference) || reference.starts_with('/') {
        reference.to_string()
    } else {
        format!("/{reference}")
    }
}

fn has_scheme(reference: &str) -> bool {
    if reference.starts_with("//") || reference.starts_with("blob:") || reference.starts_with("data:")
    {
        return true;
    }
    match reference.find("://") {
        Some(pos) if pos > 0 => {
            let scheme = &reference[..pos];
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Last path segment, percent-decoded.
///
/// Falls back to the whole input when it ends with a slash, and to the raw
/// segment when it is not valid percent-encoding.
pub fn file_name(path: &str) -> String {
    let segment = match path.rsplit('/').next() {
        Some(s) if !s.is_empty() => s,
        _ => path,
    };
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// Strip a trailing `.ext` from the final segment of `path`.
pub fn strip_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[segment_start..].rfind('.') {
        Some(dot) => &path[..segment_start + dot],
        None => path,
    }
}

/// Lowercased extension of the final path segment, without the dot.
/// Empty when there is none.
pub fn extension(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment
        .rfind('.')
        .map(|dot| segment[dot + 1..].to_lowercase())
        .unwrap_or_default()
}

/// Title derived from a path: file name without its extension.
///
/// Never empty for a non-empty path: `.hidden` keeps its full name, and a
/// path with no usable segment falls back to the path itself.
pub fn title_from_path(path: &str) -> String {
    let name = file_name(path);
    let stem = strip_extension(&name);
    if !stem.is_empty() {
        stem.to_string()
    } else if !name.is_empty() {
        name
    } else {
        path.to_string()
    }
}

/// Sibling cover guess: the same path with its extension replaced by `.jpg`.
pub fn sibling_cover(path: &str) -> String {
    format!("{}.jpg", strip_extension(path))
}

#[derive(Debug, PartialEq)]
enum Chunk<'a> {
    Text(String),
    Digits(&'a str),
}

/// Split into alternating text/digit runs, always starting with a (possibly
/// empty) text run and ending with one.
fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut rest = s;
    loop {
        let text_end = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        out.push(Chunk::Text(rest[..text_end].to_lowercase()));
        rest = &rest[text_end..];
        if rest.is_empty() {
            return out;
        }
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        out.push(Chunk::Digits(&rest[..digits_end]));
        rest = &rest[digits_end..];
    }
}

/// Compare two digit runs by numeric value without overflow.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Natural string ordering.
///
/// Text runs compare case-insensitively, digit runs by value. When one
/// string runs out of chunks while equal so far, it sorts first.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = chunks(a);
    let b = chunks(b);
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = match (x, y) {
            (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            // Runs alternate from a text start, so positions always agree.
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}
