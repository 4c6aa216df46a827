//! CLI output formatting.
//!
//! # Information-First Display
//!
//! The catalog listing leads with each item's positional index and title;
//! the path and resolved type follow as indented context lines:
//!
//! ```text
//! Movies (2 items)
//! 001 Alien
//!     Source: /movies/Alien.mp4
//! 002 Blade Runner
//!     Source: /movies/Blade%20Runner.mkv
//!     Cover: /movies/covers/blade.jpg
//!
//! Shows (1 item)
//! 001 Pilot
//!     Source: /shows/foo/pilot.mkv
//! ```
//!
//! Items are grouped by resolved type, in a fixed order, and sorted
//! naturally within each group.
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O; `print_*`
//! wrappers write them to stdout.

use crate::generate::count_label;
use crate::naming::natural_cmp;
use crate::types::{MediaItem, MediaKind};

const GROUP_ORDER: &[(MediaKind, &str)] = &[
    (MediaKind::Movie, "Movies"),
    (MediaKind::Show, "Shows"),
    (MediaKind::Music, "Music"),
    (MediaKind::Image, "Images"),
    (MediaKind::Book, "Books"),
    (MediaKind::Other, "Other"),
];

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Catalog listing grouped by type. Empty groups are skipped.
pub fn format_items(items: &[MediaItem]) -> Vec<String> {
    let mut lines = Vec::new();

    for (kind, heading) in GROUP_ORDER {
        let mut group: Vec<&MediaItem> = items.iter().filter(|i| i.kind == *kind).collect();
        if group.is_empty() {
            continue;
        }
        group.sort_by(|a, b| natural_cmp(&a.title, &b.title));

        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("{} ({})", heading, count_label(group.len())));
        for (i, item) in group.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), item.title));
            lines.push(format!("{}Source: {}", indent(1), item.path));
            if let Some(cover) = &item.cover {
                lines.push(format!("{}Cover: {}", indent(1), cover));
            }
        }
    }

    if lines.is_empty() {
        lines.push("No media found".to_string());
    }
    lines
}

pub fn print_items(items: &[MediaItem]) {
    for line in format_items(items) {
        println!("{}", line);
    }
}
