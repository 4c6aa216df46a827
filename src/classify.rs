//! Media type inference.
//!
//! Three sources decide an item's [`MediaKind`], strongest first: an explicit
//! `type` field on the node, a hint taken from the name of an enclosing key
//! ([`key_hint`]), and finally the path itself ([`guess_kind`]).

use crate::naming::extension;
use crate::types::MediaKind;

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "m4v"];
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "m4a", "aac", "ogg"];
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];
pub const BOOK_EXTENSIONS: &[&str] = &["pdf"];

pub fn is_video(path: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&extension(path).as_str())
}

pub fn is_audio(path: &str) -> bool {
    AUDIO_EXTENSIONS.contains(&extension(path).as_str())
}

pub fn is_image(path: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&extension(path).as_str())
}

pub fn is_book(path: &str) -> bool {
    BOOK_EXTENSIONS.contains(&extension(path).as_str())
}

/// Guess a kind from the path alone.
///
/// A `/shows/` or `/tv/` segment wins over the extension, so episodes kept
/// as `.mkv` files under `shows/` are not listed as movies.
pub fn guess_kind(path: &str) -> MediaKind {
    let lower = path.to_lowercase();
    if lower.contains("/shows/") || lower.contains("/tv/") {
        MediaKind::Show
    } else if is_video(&lower) {
        MediaKind::Movie
    } else if is_audio(&lower) {
        MediaKind::Music
    } else if is_image(&lower) {
        MediaKind::Image
    } else if is_book(&lower) {
        MediaKind::Book
    } else {
        MediaKind::Other
    }
}

/// Context hint from a property name. Case-insensitive substring rules,
/// checked in order; the first that matches wins.
pub fn key_hint(key: &str) -> Option<MediaKind> {
    let key = key.to_lowercase();
    let has = |needle: &str| key.contains(needle);
    if has("movie") {
        Some(MediaKind::Movie)
    } else if has("show") {
        Some(MediaKind::Show)
    } else if has("music") || has("song") {
        Some(MediaKind::Music)
    } else if has("gallery") || has("image") {
        Some(MediaKind::Image)
    } else if has("books") || has("pdf") {
        Some(MediaKind::Book)
    } else {
        None
    }
}

/// Arrays under an `episodes` key always hold shows.
pub fn is_episodes_key(key: &str) -> bool {
    key.to_lowercase().contains("episodes")
}
