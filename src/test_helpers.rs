//! Shared test utilities for the biascript test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_site();
//! let manifest = scan(tmp.path()).unwrap();
//! let html = render_post_page(&manifest.posts[0], &manifest.config).into_string();
//! assert_eq!(count_class(&html, "carousel-slide"), 3);
//! ```

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tempfile::TempDir;

static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"class="([^"]*)""#).unwrap());

// =========================================================================
// Fixture setup
// =========================================================================

const POST_1: &str = "\
First fitting
03/01/2025
Trying the bodice on for the first time.
---
<title>The bodice</title>
<txt>Pinned and ready.</txt>
<carousel>01.webp, 02.webp, 03.webp</carousel>
<img>04.webp</img>
";

const POST_2: &str = "\
Painting the armor
10/02/2025
Primer, base coat, weathering.
---
<txt>See <link=the paint list>https://example.com/paint</link>.</txt>
<carousel>01.webp, 02.webp</carousel>
<img>03.webp, 04.webp</img>
";

const FEEDBACKS: &str = "\
Beautiful work, fits perfectly.
Alex

Fast and careful, would commission again.
Sam
";

/// Write a file under `root`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// A content directory with two posts, two portfolio entries (the newer one
/// linked to post 2) and both homepage widget sources.
///
/// Tests get an isolated copy they can mutate without affecting other tests.
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write_file(root, "data/posts-blog/1-blog/1-script.txt", POST_1);
    write_file(root, "data/posts-blog/2-blog/2-script.txt", POST_2);
    for id in ["1", "2"] {
        for image in ["01.webp", "02.webp", "03.webp", "04.webp"] {
            write_file(root, &format!("data/posts-blog/{id}-blog/{image}"), "webp");
        }
        write_file(
            root,
            &format!("data/posts-blog/{id}-blog/{id}-thumbnail-blog.webp"),
            "webp",
        );
    }
    write_file(
        root,
        "data/posts-portfolio/1-portfolio/1-info.txt",
        "Forest witch\nHand-dyed cloak\n",
    );
    write_file(
        root,
        "data/posts-portfolio/2-portfolio/2-info.txt",
        "Knight armor\nFoam and worbla\n2\n",
    );
    for id in ["1", "2"] {
        write_file(
            root,
            &format!("data/posts-portfolio/{id}-portfolio/{id}-thumbnail-portfolio.webp"),
            "webp",
        );
    }
    write_file(
        root,
        "instructions/schedule_info.txt",
        "Open for commissions\nFrom May\n",
    );
    write_file(root, "instructions/feedbacks.txt", FEEDBACKS);
    tmp
}

// =========================================================================
// HTML assertions
// =========================================================================

/// Number of elements whose class list contains `class` as a whole token.
pub fn count_class(html: &str, class: &str) -> usize {
    CLASS_ATTR
        .captures_iter(html)
        .filter(|caps| caps[1].split_whitespace().any(|c| c == class))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_class_matches_whole_tokens() {
        let html = r#"<div class="carousel-slide active"></div><div class="carousel-slides"></div>"#;
        assert_eq!(count_class(html, "carousel-slide"), 1);
        assert_eq!(count_class(html, "active"), 1);
        assert_eq!(count_class(html, "carousel"), 0);
    }
}
