//! HTML site generation.
//!
//! Second stage of the build. Takes the scan [`Manifest`] and writes the
//! static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`index.html`): agenda banner, latest post cards, feedback carousel
//! - **Blog** (`blog.html`): every post card, newest first
//! - **Portfolio** (`portfolio.html`): piece cards, linked to their post when
//!   one exists
//! - **Posts** (`{id}.html`): title, date, translated BIAScript body
//!
//! Every page carries the configured navigation with the current page's link
//! marked `active-link`, and the lightbox overlay element when enabled.
//! `static/site.js` is inlined into every page; it binds the carousels and
//! the lightbox with the same rules as [`crate::page`].
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── blog.html
//! ├── portfolio.html
//! ├── 1.html
//! ├── 2.html
//! └── data/posts-blog/1-blog/01.webp   # assets copied with their paths
//! ```
//!
//! Post bodies are translated in parallel; each post gets its own carousel
//! sequence, so ids are `carousel-1..n` within every page.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Text from post scripts is escaped; BIAScript output and the agenda text are
//! inserted as-is.

use crate::config::SiteConfig;
use crate::markup::{CarouselSequence, ImgTagMode, translate};
use crate::portfolio::{INFO_SUFFIX, PortfolioItem};
use crate::post::{Post, SCRIPT_SUFFIX};
use crate::scan::Manifest;
use crate::types::NavLink;
use crate::widgets;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A written page, for CLI output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub title: String,
    pub filename: String,
}

#[derive(Debug, Default)]
pub struct GenerateSummary {
    pub pages: Vec<GeneratedPage>,
    pub posts: usize,
    pub assets: usize,
}

pub const HOME_PAGE: &str = "index.html";
pub const BLOG_PAGE: &str = "blog.html";
pub const PORTFOLIO_PAGE: &str = "portfolio.html";

const JS: &str = include_str!("../static/site.js");

pub fn generate(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let config = &manifest.config;
    fs::create_dir_all(output_dir)?;

    let assets = copy_assets(source_dir, output_dir)?;

    let rendered: Vec<(&Post, Markup)> = manifest
        .posts
        .par_iter()
        .map(|post| (post, render_post_page(post, config)))
        .collect();

    let mut summary = GenerateSummary {
        assets,
        posts: rendered.len(),
        ..GenerateSummary::default()
    };

    let home = render_home_page(manifest);
    fs::write(output_dir.join(HOME_PAGE), home.into_string())?;
    summary.pages.push(GeneratedPage {
        title: "Home".to_string(),
        filename: HOME_PAGE.to_string(),
    });

    let blog = render_blog_page(&manifest.posts, config);
    fs::write(output_dir.join(BLOG_PAGE), blog.into_string())?;
    summary.pages.push(GeneratedPage {
        title: "Blog".to_string(),
        filename: BLOG_PAGE.to_string(),
    });

    let portfolio = render_portfolio_page(&manifest.portfolio, config);
    fs::write(output_dir.join(PORTFOLIO_PAGE), portfolio.into_string())?;
    summary.pages.push(GeneratedPage {
        title: "Portfolio".to_string(),
        filename: PORTFOLIO_PAGE.to_string(),
    });

    for (post, page) in rendered {
        let filename = post.page_filename();
        fs::write(output_dir.join(&filename), page.into_string())?;
        summary.pages.push(GeneratedPage {
            title: post.title.clone(),
            filename,
        });
    }

    Ok(summary)
}

/// Copy every content file except post scripts, portfolio info files and
/// `config.toml`, keeping paths.
///
/// An output directory inside the source tree is skipped, so rebuilding into
/// `content/dist` never copies the previous build into itself.
fn copy_assets(source_dir: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    let source_dir = source_dir.canonicalize()?;
    let output_dir = output_dir.canonicalize()?;
    let mut copied = 0;
    let walker = WalkDir::new(&source_dir)
        .into_iter()
        .filter_entry(|entry| entry.path() != output_dir.as_path());
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.ends_with(SCRIPT_SUFFIX) || name.ends_with(INFO_SUFFIX) || name == "config.toml" {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&source_dir) else {
            continue;
        };
        let target = output_dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        copied += 1;
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(title: &str, config: &SiteConfig, current_page: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.site.name) " - " (title) }
                link rel="stylesheet" href="style.css";
            }
            body {
                header.site-header {
                    nav.nav-links {
                        (render_nav(&config.site.nav, current_page))
                    }
                }
                (content)
                @if config.lightbox.enabled {
                    (lightbox_overlay(config.lightbox.fixed_header))
                }
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the navigation links, marking the one for `current_page`.
pub fn render_nav(links: &[NavLink], current_page: &str) -> Markup {
    html! {
        @for link in links {
            @let active = widgets::is_active_link(&link.href, current_page);
            a href=(link.href) class=[active.then_some("active-link")] { (link.label) }
        }
    }
}

/// Overlay element the page controller opens on image clicks.
fn lightbox_overlay(fixed_header: bool) -> Markup {
    html! {
        div.lightbox id="lightbox" data-fixed-header=(fixed_header.to_string()) hidden {
            img.lightbox-image id="lightbox-image" alt="";
        }
    }
}

/// Post preview card linking to the post page.
fn render_post_card(post: &Post) -> Markup {
    html! {
        a.blog-preview-card href=(post.page_filename()) {
            img.blog-thumbnail src=(post.thumbnail()) alt=(format!("Thumbnail of {}", post.title)) loading="lazy";
            div.blog-preview-content {
                h2.blog-title { (post.title) }
                p.blog-date { (post.date) }
                p.blog-description { (post.description) }
            }
        }
    }
}

/// Portfolio card; a link to the making-of post when the piece has one.
fn render_portfolio_card(item: &PortfolioItem) -> Markup {
    let inner = html! {
        img src=(item.thumbnail()) alt=(item.title) loading="lazy";
        div.portfolio-card-info {
            h2.portfolio-title { (item.title) }
            p.portfolio-subtitle { (item.subtitle) }
        }
    };
    html! {
        @if let Some(page) = item.post_page() {
            a.portfolio-card href=(page) { (inner) }
        } @else {
            div.portfolio-card { (inner) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a post page.
pub fn render_post_page(post: &Post, config: &SiteConfig) -> Markup {
    let body = post.render_body(config.markup.img_tag);
    let content = html! {
        main.post-page {
            article id="post-content-area" {
                h1 id="post-title" { (post.title) }
                p id="post-date" { (post.date) }
                div id="post-body" { (PreEscaped(body)) }
            }
        }
    };
    base_document(&post.title, config, &post.page_filename(), content)
}

/// Renders the blog list page.
pub fn render_blog_page(posts: &[Post], config: &SiteConfig) -> Markup {
    let content = html! {
        main.blog-page {
            div id="blog-list-container" {
                @for post in posts {
                    (render_post_card(post))
                }
                @if posts.is_empty() {
                    p { "No posts yet." }
                }
            }
        }
    };
    base_document("Blog", config, BLOG_PAGE, content)
}

/// Renders the portfolio grid.
pub fn render_portfolio_page(items: &[PortfolioItem], config: &SiteConfig) -> Markup {
    let content = html! {
        main.portfolio-page {
            div id="portfolio-grid" {
                @for item in items {
                    (render_portfolio_card(item))
                }
                @if items.is_empty() {
                    p { "No portfolio items yet." }
                }
            }
        }
    };
    base_document("Portfolio", config, PORTFOLIO_PAGE, content)
}

/// Renders the homepage widgets.
pub fn render_home_page(manifest: &Manifest) -> Markup {
    let config = &manifest.config;
    let latest = manifest.posts.iter().take(config.home.latest_posts);

    let content = html! {
        main.home-page {
            section id="agenda-banner" {
                p id="agenda-status-text" {
                    @if let Some(text) = &manifest.agenda {
                        (PreEscaped(widgets::format_agenda(text)))
                    } @else {
                        "The agenda status could not be loaded."
                    }
                }
            }
            section.latest-posts {
                div id="latest-posts-grid" {
                    @for post in latest {
                        (render_post_card(post))
                    }
                }
            }
            section.feedbacks {
                @if let Some(feedbacks) = manifest.feedbacks.as_deref().filter(|f| !f.is_empty()) {
                    (widgets::render_feedbacks(feedbacks))
                } @else {
                    p { "Feedback could not be loaded." }
                }
            }
        }
    };
    base_document("Home", config, HOME_PAGE, content)
}

/// Translate one body for the `translate` command.
pub fn render_fragment(markup: &str, asset_base: &str, img_mode: ImgTagMode) -> String {
    translate(markup, asset_base, &mut CarouselSequence::new(), img_mode)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use crate::test_helpers::{count_class, setup_site};
    use tempfile::TempDir;

    fn sample_post() -> Post {
        Post::parse(
            "7",
            "data/posts-blog/7-blog",
            "Wig styling\n01/02/2025\nTeasing & spraying\n-\n\
             <title>Base</title>\n<txt>Start <b>here</b>.</txt>\n<carousel>a.webp,b.webp</carousel>",
        )
    }

    #[test]
    fn nav_marks_current_page() {
        let links = vec![NavLink::new("Home", "index.html"), NavLink::new("Blog", "blog.html")];
        let html = render_nav(&links, "blog.html").into_string();
        assert!(html.contains(r#"<a href="blog.html" class="active-link">Blog</a>"#));
        assert!(html.contains(r#"<a href="index.html">Home</a>"#));
    }

    #[test]
    fn post_page_contains_translated_body() {
        let html = render_post_page(&sample_post(), &SiteConfig::default()).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Gwil Cosplay - Wig styling</title>"));
        assert!(html.contains("<h3>Base</h3>"));
        assert!(html.contains("<p>Start <b>here</b>.</p><br>"));
        assert_eq!(count_class(&html, "carousel-slide"), 2);
        assert!(html.contains(r#"src="data/posts-blog/7-blog/a.webp""#));
    }

    #[test]
    fn post_title_is_escaped() {
        let mut post = sample_post();
        post.title = "<script>x</script>".into();
        let html = render_post_page(&post, &SiteConfig::default()).into_string();
        assert!(!html.contains("<script>x"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn lightbox_overlay_follows_config() {
        let mut config = SiteConfig::default();
        let html = render_post_page(&sample_post(), &config).into_string();
        assert!(html.contains(r#"id="lightbox""#));
        assert!(html.contains(r#"data-fixed-header="true""#));

        config.lightbox.enabled = false;
        let html = render_post_page(&sample_post(), &config).into_string();
        assert!(!html.contains(r#"id="lightbox""#));
    }

    #[test]
    fn every_page_inlines_the_site_script() {
        let html = render_post_page(&sample_post(), &SiteConfig::default()).into_string();
        assert!(html.contains("<script>"));
        assert!(html.contains("SWIPE_THRESHOLD = 50"));
        assert!(html.contains("stopPropagation"));

        let html = render_blog_page(&[], &SiteConfig::default()).into_string();
        assert!(html.contains("getElementById('lightbox')"));
    }

    #[test]
    fn portfolio_cards_link_only_when_a_post_exists() {
        let tmp = setup_site();
        let manifest = scan(tmp.path()).unwrap();
        let html = render_portfolio_page(&manifest.portfolio, &manifest.config).into_string();

        assert_eq!(count_class(&html, "portfolio-card"), 2);
        assert!(html.contains(r#"href="2.html""#));
        assert!(html.contains(r#"<div class="portfolio-card">"#));
        assert!(html.contains("data/posts-portfolio/1-portfolio/1-thumbnail-portfolio.webp"));
        assert!(html.contains(r#"<h2 class="portfolio-title">Knight armor</h2>"#));
        assert!(html.contains(r#"class="active-link">Portfolio"#));
        assert!(html.find("Knight armor") < html.find("Forest witch"));
    }

    #[test]
    fn empty_portfolio_says_so() {
        let html = render_portfolio_page(&[], &SiteConfig::default()).into_string();
        assert!(html.contains("No portfolio items yet."));
    }

    #[test]
    fn blog_page_lists_cards() {
        let posts = vec![sample_post()];
        let html = render_blog_page(&posts, &SiteConfig::default()).into_string();
        assert!(html.contains(r#"href="7.html""#));
        assert!(html.contains("data/posts-blog/7-blog/7-thumbnail-blog.webp"));
        assert!(html.contains("Teasing &amp; spraying"));
        assert!(html.contains(r#"class="active-link">Blog"#));
    }

    #[test]
    fn home_page_widgets() {
        let tmp = setup_site();
        let manifest = scan(tmp.path()).unwrap();
        let html = render_home_page(&manifest).into_string();
        assert!(html.contains("Open for commissions<br>From May"));
        assert_eq!(count_class(&html, "blog-preview-card"), 2);
        assert!(html.contains(r#"id="feedbacks-carousel""#));
    }

    #[test]
    fn home_page_limits_latest_posts() {
        let tmp = setup_site();
        let mut manifest = scan(tmp.path()).unwrap();
        manifest.config.home.latest_posts = 1;
        let html = render_home_page(&manifest).into_string();
        assert_eq!(count_class(&html, "blog-preview-card"), 1);
        assert!(html.contains(r#"href="2.html""#));
    }

    #[test]
    fn home_page_fallbacks() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        let html = render_home_page(&manifest).into_string();
        assert!(html.contains("The agenda status could not be loaded."));
        assert!(html.contains("Feedback could not be loaded."));
    }

    #[test]
    fn generate_writes_site() {
        let tmp = setup_site();
        let out = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        let summary = generate(&manifest, tmp.path(), out.path()).unwrap();

        assert_eq!(summary.posts, 2);
        assert!(out.path().join("index.html").is_file());
        assert!(out.path().join("blog.html").is_file());
        assert!(out.path().join("1.html").is_file());
        assert!(out.path().join("2.html").is_file());
        assert!(out.path().join("data/posts-blog/1-blog/01.webp").is_file());
        assert!(out.path().join("portfolio.html").is_file());
        assert!(!out.path().join("data/posts-blog/1-blog/1-script.txt").exists());
        assert!(!out.path().join("data/posts-portfolio/1-portfolio/1-info.txt").exists());

        let filenames: Vec<&str> = summary.pages.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(
            filenames,
            ["index.html", "blog.html", "portfolio.html", "2.html", "1.html"]
        );
    }

    #[test]
    fn output_inside_source_is_not_copied_into_itself() {
        let tmp = setup_site();
        let out = tmp.path().join("dist");
        let manifest = scan(tmp.path()).unwrap();
        let first = generate(&manifest, tmp.path(), &out).unwrap();
        let second = generate(&manifest, tmp.path(), &out).unwrap();

        assert!(out.join("data/posts-blog/1-blog/01.webp").is_file());
        assert!(!out.join("dist").exists());
        assert_eq!(first.assets, second.assets);
    }

    #[test]
    fn each_page_numbers_its_own_carousels() {
        let tmp = setup_site();
        let out = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        generate(&manifest, tmp.path(), out.path()).unwrap();

        for page in ["1.html", "2.html"] {
            let html = fs::read_to_string(out.path().join(page)).unwrap();
            assert!(html.contains(r#"id="carousel-1""#), "{page}");
        }
    }
}
