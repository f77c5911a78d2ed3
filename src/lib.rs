//! # BIAScript
//!
//! A small tag language for cosplay blog posts, and the static site built
//! from it. Authors write posts as plain text with a handful of tags:
//!
//! ```text
//! <title>The bodice</title>
//! <txt>Pinned and ready. See <link=the pattern>https://example.com</link>.</txt>
//! <carousel>01.webp, 02.webp, 03.webp</carousel>
//! <img>04.webp, 05.webp</img>
//! ```
//!
//! [`markup::translate`] turns that into HTML fragments: headings, paragraphs,
//! image carousels, single and side-by-side images, and external links.
//!
//! # Architecture: Two Halves
//!
//! ```text
//! Build time   content/  →  scan  →  Manifest  →  generate  →  dist/
//! Page time    rendered HTML  →  dom::Document  →  page::Page (carousels, lightbox)
//! ```
//!
//! The build half walks the content directory, parses post scripts and the
//! homepage widget sources, and writes every page with Maud.
//!
//! The page half models the interactive behaviour of the rendered output:
//! carousels that step with arrows, indicators, and swipes, and a lightbox
//! overlay that opens on image clicks. It runs against a scanned
//! [`dom::Document`] and routes input events through [`page::Page`], so the
//! whole behaviour is testable without a browser.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`markup`] | BIAScript translator: tag rules, carousel ids, asset URLs |
//! | [`dom`] | html5ever parse of rendered HTML into carousel and image nodes |
//! | [`carousel`] | One carousel's state: active slide, stepping, swipe detection |
//! | [`lightbox`] | Image overlay with scroll lock and scrollbar compensation |
//! | [`page`] | Event routing between carousels and the lightbox |
//! | [`widgets`] | Agenda banner, feedback carousel, active navigation link |
//! | [`post`] | Post script parsing and ordering |
//! | [`portfolio`] | Portfolio info files and card links |
//! | [`scan`] | Walks the content directory into a [`scan::Manifest`] |
//! | [`generate`] | Renders the site from the manifest using Maud |
//! | [`config`] | `config.toml` loading, merging over defaults, validation |
//! | [`types`] | Shared config types (`NavLink`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Carousel Sequence Per Document
//!
//! Carousel ids (`carousel-1`, `carousel-2`, ...) come from a
//! [`markup::CarouselSequence`] the caller owns. Each post page gets a fresh
//! sequence, so ids are deterministic per page and posts can be rendered in
//! parallel.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Post titles, dates, and descriptions are escaped on
//! interpolation; BIAScript output is inserted as-is because authors are allowed
//! inline HTML inside `<txt>` blocks.
//!
//! ## The Filesystem Is the Index
//!
//! Posts are found by walking the content root for `<id>-script.txt`. Numeric ids
//! order the blog newest first. There is no separate post list to keep in sync.

pub mod carousel;
pub mod config;
pub mod dom;
pub mod generate;
pub mod lightbox;
pub mod markup;
pub mod output;
pub mod page;
pub mod portfolio;
pub mod post;
pub mod scan;
pub mod types;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_helpers;
