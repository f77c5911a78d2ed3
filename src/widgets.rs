//! Homepage widgets and navigation helpers.
//!
//! Each widget turns one plain-text content file into markup:
//!
//! - **Agenda status** (`schedule_info.txt`): free text, line breaks kept.
//! - **Feedback carousel** (`feedbacks.txt`): blank-line separated blocks of
//!   `quote` / `author`, rendered in the same carousel shape the translator
//!   produces so the page controller binds it like any other carousel.

use maud::{Markup, PreEscaped, html};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n\s*\n").unwrap());

/// Agenda text as HTML: trimmed, one `<br>` per line break, content verbatim.
pub fn format_agenda(text: &str) -> String {
    text.trim().replace("\r\n", "\n").replace('\n', "<br>")
}

/// One client testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub quote: String,
    pub author: String,
}

/// Parse the feedbacks file. Blocks without both a quote and an author line
/// are skipped.
pub fn parse_feedbacks(text: &str) -> Vec<Feedback> {
    BLANK_LINE
        .split(text.trim())
        .filter_map(|block| {
            let mut lines = block.lines().map(str::trim);
            let quote = lines.next().filter(|line| !line.is_empty())?;
            let author = lines.next().filter(|line| !line.is_empty())?;
            Some(Feedback {
                quote: quote.to_string(),
                author: author.to_string(),
            })
        })
        .collect()
}

/// Feedback carousel markup. The first slide and indicator start active.
pub fn render_feedbacks(feedbacks: &[Feedback]) -> Markup {
    html! {
        div.carousel.feedback-carousel id="feedbacks-carousel" {
            div.carousel-slides {
                @for (index, feedback) in feedbacks.iter().enumerate() {
                    div.carousel-slide.active[index == 0] {
                        p.feedback-quote { "\u{201c}" (feedback.quote) "\u{201d}" }
                        span.feedback-author { "- " (feedback.author) }
                    }
                }
            }
            @if feedbacks.len() > 1 {
                button.carousel-arrow.prev { (PreEscaped("&#10094;")) }
                button.carousel-arrow.next { (PreEscaped("&#10095;")) }
                div.carousel-dots {
                    @for index in 0..feedbacks.len() {
                        span.carousel-dot.active[index == 0] data-slide=(index) {}
                    }
                }
            }
        }
    }
}

/// Last path segment, with the site root standing for `index.html`.
pub fn page_name(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => "index.html",
    }
}

/// Whether a navigation link points at the page being shown.
pub fn is_active_link(href: &str, current_path: &str) -> bool {
    page_name(href) == page_name(current_path)
}
