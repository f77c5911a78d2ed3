//! BIAScript to HTML translation.
//!
//! BIAScript is the tag language used in post bodies. A body is plain text with
//! bracket-delimited tags mixed in:
//!
//! ```text
//! <title>Making the armor</title>
//! <txt>Foam first, then <link=the pattern>https://example.com/p.pdf</link>.</txt>
//! <carousel>01.webp, 02.webp, 03.webp</carousel>
//! <img>before.webp, after.webp</img>
//! ```
//!
//! ## Grammar
//!
//! Tags never nest. Translation is a fixed sequence of independent rewrite
//! passes over the text, each matching its tag non-greedily (content may span
//! lines):
//!
//! 1. `carousel`: comma-separated images; one slide each, plus controls and
//!    indicators when there are at least two
//! 2. `img`: one image, or two side by side (see [`ImgTagMode`])
//! 3. `title`: `<h3>`, content verbatim
//! 4. `txt`: `<p>`, content verbatim
//! 5. every `</p>` gains a trailing `<br>`
//! 6. `link=LABEL` / `link`: anchor opening in a new tab without opener access
//!
//! The order is part of the language: `txt` content may hold links, and the
//! paragraph rule must see the paragraphs `txt` produced.
//!
//! A tag whose content holds another opening tag of the same kind is a nesting
//! attempt and is left untouched. There is no escape mechanism, so the first
//! closing delimiter always ends a tag. Unmatched or garbled tags stay in the
//! output as literal text; translation never fails.
//!
//! Image sources are `asset_base + "/" + filename`. Whether the file exists is
//! not checked here.

use maud::{Markup, PreEscaped, html};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static CAROUSEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<carousel>(.*?)</carousel>").unwrap());
static IMG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<img>(.*?)</img>").unwrap());
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<title>(.*?)</title>").unwrap());
static TXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<txt>(.*?)</txt>").unwrap());
static PARAGRAPH_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</p>(?:<br>)?").unwrap());
static LABELED_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<link=(.*?)>(?s:(.*?))</link>").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<link>(.*?)</link>").unwrap());

/// How the `img` tag reads its content.
///
/// Older site revisions took exactly one filename per tag; later ones accept
/// one or two comma-separated names and lay two out side by side. Both are
/// live on the site, so the choice is configuration (`[markup] img_tag`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImgTagMode {
    /// Whole trimmed content is a single filename.
    Single,
    /// One or two comma-separated filenames.
    #[default]
    Multi,
}

/// Per-document source of carousel identifiers.
///
/// Each non-empty `carousel` tag draws the next number, so the first carousel
/// of a document is `carousel-1`. Use one sequence per document; a fresh
/// sequence makes the output for a given input stable.
#[derive(Debug, Default)]
pub struct CarouselSequence {
    issued: u32,
}

impl CarouselSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the next identifier. Never reuses a value.
    pub fn next_id(&mut self) -> u32 {
        self.issued += 1;
        self.issued
    }

    /// How many identifiers have been drawn so far.
    pub fn issued(&self) -> u32 {
        self.issued
    }
}

/// Translate a BIAScript body into an HTML fragment.
pub fn translate(
    markup: &str,
    asset_base: &str,
    sequence: &mut CarouselSequence,
    img_mode: ImgTagMode,
) -> String {
    let html = CAROUSEL
        .replace_all(markup, |caps: &Captures| {
            guard_nesting(caps, "<carousel>", |content| {
                carousel_block(content, asset_base, sequence)
            })
        })
        .into_owned();

    let html = IMG
        .replace_all(&html, |caps: &Captures| {
            guard_nesting(caps, "<img>", |content| {
                image_block(content, asset_base, img_mode)
            })
        })
        .into_owned();

    let html = TITLE
        .replace_all(&html, |caps: &Captures| {
            guard_nesting(caps, "<title>", |content| format!("<h3>{content}</h3>"))
        })
        .into_owned();

    let html = TXT
        .replace_all(&html, |caps: &Captures| {
            guard_nesting(caps, "<txt>", |content| format!("<p>{content}</p>"))
        })
        .into_owned();

    let html = PARAGRAPH_CLOSE.replace_all(&html, "</p><br>").into_owned();

    let html = LABELED_LINK
        .replace_all(&html, |caps: &Captures| {
            let url = &caps[2];
            if url.contains("<link") {
                return caps[0].to_string();
            }
            anchor(url.trim(), PreEscaped(caps[1].trim().to_string())).into_string()
        })
        .into_owned();

    LINK.replace_all(&html, |caps: &Captures| {
        guard_nesting(caps, "<link", |content| {
            let url = content.trim();
            anchor(url, html! { (url) }).into_string()
        })
    })
    .into_owned()
}

/// Rewrite a match unless its content re-opens the same tag.
fn guard_nesting(caps: &Captures, open: &str, rewrite: impl FnOnce(&str) -> String) -> String {
    let content = &caps[1];
    if content.contains(open) {
        debug!(tag = open, "nested tag left as literal text");
        return caps[0].to_string();
    }
    rewrite(content)
}

/// Resolve an image filename against the post's asset directory.
pub fn asset_url(asset_base: &str, filename: &str) -> String {
    format!("{}/{}", asset_base, filename.trim())
}

fn carousel_block(content: &str, asset_base: &str, sequence: &mut CarouselSequence) -> String {
    let images: Vec<&str> = content.trim().split(',').map(str::trim).collect();
    if images.first().is_none_or(|first| first.is_empty()) {
        debug!("empty carousel dropped");
        return String::new();
    }
    let id = sequence.next_id();
    render_carousel(id, &images, asset_base).into_string()
}

fn render_carousel(id: u32, images: &[&str], asset_base: &str) -> Markup {
    html! {
        div.carousel id={ "carousel-" (id) } {
            div.carousel-slides {
                @for (index, image) in images.iter().enumerate() {
                    div.carousel-slide.active[index == 0] {
                        img src=(asset_url(asset_base, image)) alt={ "Carousel image " (index + 1) };
                    }
                }
            }
            @if images.len() > 1 {
                button.carousel-arrow.prev { (PreEscaped("&#10094;")) }
                button.carousel-arrow.next { (PreEscaped("&#10095;")) }
                div.carousel-dots {
                    @for index in 0..images.len() {
                        span.carousel-dot.active[index == 0] data-slide=(index) {}
                    }
                }
            }
        }
    }
}

fn image_block(content: &str, asset_base: &str, mode: ImgTagMode) -> String {
    let images: Vec<&str> = match mode {
        ImgTagMode::Single => Some(content.trim())
            .filter(|name| !name.is_empty())
            .into_iter()
            .collect(),
        ImgTagMode::Multi => content
            .trim()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect(),
    };

    let block = match images.as_slice() {
        [single] => html! {
            div.single-image-container {
                img src=(asset_url(asset_base, single)) alt="Post image";
            }
        },
        [left, right] => html! {
            div.dual-image-container {
                img src=(asset_url(asset_base, left)) alt="Post image 1";
                img src=(asset_url(asset_base, right)) alt="Post image 2";
            }
        },
        _ => {
            debug!(count = images.len(), "img tag dropped");
            return String::new();
        }
    };
    block.into_string()
}

fn anchor(url: &str, label: Markup) -> Markup {
    html! {
        a href=(url) target="_blank" rel="noopener noreferrer" { (label) }
    }
}
