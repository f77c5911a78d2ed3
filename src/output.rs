//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Every post is shown by its positional index and title, with the script path
//! and other details as indented context lines. The output reads as a content
//! inventory while still pointing back to the files it came from.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 Painting the armor (2)
//!     Source: data/posts-blog/2-blog/2-script.txt
//!     Date: 10/02/2025
//! 002 First fitting (1)
//!     Source: data/posts-blog/1-blog/1-script.txt
//!
//! Portfolio
//! 001 Knight armor (2)
//!     Post: 2.html
//!
//! Widgets
//!     Agenda: instructions/schedule_info.txt
//!     Feedbacks: 2 entries
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 Painting the armor (2)
//!     1 carousel, 4 images
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Blog → blog.html
//! Portfolio → portfolio.html
//! 001 Painting the armor → 2.html
//!
//! Generated 5 pages, 2 posts, 12 assets
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure,
//! no I/O.

use crate::generate::{BLOG_PAGE, GenerateSummary, HOME_PAGE, PORTFOLIO_PAGE};
use crate::post::{PostReport, SCRIPT_SUFFIX};
use crate::scan::Manifest;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Post header: positional index, title, and id.
///
/// ```text
/// 001 First fitting (1)
/// ```
fn post_header(index: usize, title: &str, id: &str) -> String {
    format!("{} {} ({})", format_index(index), title, id)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((end, _)) => format!("{}...", &text[..end]),
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan output: discovered posts and widget sources.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];

    for (i, post) in manifest.posts.iter().enumerate() {
        lines.push(post_header(i + 1, &post.title, &post.id));
        let source = if post.asset_base == "." {
            format!("{}{}", post.id, SCRIPT_SUFFIX)
        } else {
            format!("{}/{}{}", post.asset_base, post.id, SCRIPT_SUFFIX)
        };
        lines.push(format!("{}Source: {}", indent(1), source));
        if !post.date.is_empty() {
            lines.push(format!("{}Date: {}", indent(1), post.date));
        }
        if !post.description.is_empty() {
            lines.push(format!(
                "{}Description: {}",
                indent(1),
                truncate_desc(&post.description, 60)
            ));
        }
    }
    if manifest.posts.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }

    lines.push(String::new());
    lines.push("Portfolio".to_string());
    for (i, item) in manifest.portfolio.iter().enumerate() {
        lines.push(post_header(i + 1, &item.title, &item.id));
        if let Some(page) = item.post_page() {
            lines.push(format!("{}Post: {}", indent(1), page));
        }
    }
    if manifest.portfolio.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }

    let home = &manifest.config.home;
    lines.push(String::new());
    lines.push("Widgets".to_string());
    lines.push(match &manifest.agenda {
        Some(_) => format!("{}Agenda: {}", indent(1), home.agenda),
        None => format!("{}Agenda: missing ({})", indent(1), home.agenda),
    });
    lines.push(match &manifest.feedbacks {
        Some(feedbacks) if feedbacks.len() == 1 => format!("{}Feedbacks: 1 entry", indent(1)),
        Some(feedbacks) => format!("{}Feedbacks: {} entries", indent(1), feedbacks.len()),
        None => format!("{}Feedbacks: missing ({})", indent(1), home.feedbacks),
    });

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the per-post structure found by rendering each body.
pub fn format_check_output(reports: &[PostReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        lines.push(post_header(i + 1, &report.title, &report.id));
        lines.push(format!(
            "{}{}, {}",
            indent(1),
            plural(report.carousels, "carousel"),
            plural(report.images, "image")
        ));
        for carousel in &report.document.carousels {
            let id = carousel.id.as_deref().unwrap_or("(no id)");
            lines.push(format!(
                "{}{}: {}",
                indent(2),
                id,
                plural(carousel.slides.len(), "slide")
            ));
        }
    }
    lines
}

/// Print check output to stdout.
pub fn print_check_output(reports: &[PostReport]) {
    for line in format_check_output(reports) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format generated pages, `title → file`, followed by totals.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = Vec::new();
    let mut post_index = 0;

    for page in &summary.pages {
        if [HOME_PAGE, BLOG_PAGE, PORTFOLIO_PAGE].contains(&page.filename.as_str()) {
            lines.push(format!("{} \u{2192} {}", page.title, page.filename));
        } else {
            post_index += 1;
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(post_index),
                page.title,
                page.filename
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(summary.pages.len(), "page"),
        plural(summary.posts, "post"),
        plural(summary.assets, "asset")
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
