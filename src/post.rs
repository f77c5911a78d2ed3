//! Blog post scripts.
//!
//! A post lives in its own directory next to its images:
//!
//! ```text
//! data/posts-blog/12-blog/
//! ├── 12-script.txt              # the post
//! ├── 12-thumbnail-blog.webp     # card thumbnail
//! └── 01.webp, 02.webp, ...      # images referenced from the body
//! ```
//!
//! The script is line oriented. After trimming the whole file:
//!
//! | Line | Content |
//! |------|---------|
//! | 1 | title |
//! | 2 | date, free text |
//! | 3 | short description for post cards |
//! | 4 | ignored (separator) |
//! | 5.. | BIAScript body |

use crate::dom::Document;
use crate::markup::{self, CarouselSequence, ImgTagMode};
use serde::Serialize;

pub const SCRIPT_SUFFIX: &str = "-script.txt";
pub const UNTITLED: &str = "Untitled post";
/// Ids whose `{id}.html` page would overwrite a fixed site page.
pub const RESERVED_IDS: &[&str] = &["index", "blog", "portfolio"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub body: String,
    /// Post directory relative to the site root, `/`-separated.
    pub asset_base: String,
}

/// What a post body renders to, for `check` output.
#[derive(Debug, Clone, Serialize)]
pub struct PostReport {
    pub id: String,
    pub title: String,
    pub carousels: usize,
    pub images: usize,
    pub document: Document,
}

impl Post {
    pub fn parse(id: &str, asset_base: &str, text: &str) -> Self {
        let lines: Vec<&str> = text.trim().split('\n').collect();
        let line = |n: usize| lines.get(n).map(|l| l.trim_end_matches('\r')).unwrap_or("");

        let title = match line(0).trim() {
            "" => UNTITLED.to_string(),
            title => title.to_string(),
        };
        let body = lines
            .get(4..)
            .map(|rest| {
                rest.iter()
                    .map(|l| l.trim_end_matches('\r'))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        Self {
            id: id.to_string(),
            title,
            date: line(1).trim().to_string(),
            description: line(2).trim().to_string(),
            body,
            asset_base: asset_base.to_string(),
        }
    }

    /// Post id from a script filename (`12-script.txt` → `12`).
    pub fn id_from_filename(filename: &str) -> Option<&str> {
        filename
            .strip_suffix(SCRIPT_SUFFIX)
            .filter(|id| !id.is_empty())
    }

    /// Whether a post with this id would collide with a fixed page.
    ///
    /// Compared without case so the collision also holds on case-insensitive
    /// filesystems.
    pub fn is_reserved_id(id: &str) -> bool {
        RESERVED_IDS.iter().any(|reserved| reserved.eq_ignore_ascii_case(id))
    }

    /// Body translated to HTML with a fresh carousel sequence.
    pub fn render_body(&self, img_mode: ImgTagMode) -> String {
        markup::translate(
            &self.body,
            &self.asset_base,
            &mut CarouselSequence::new(),
            img_mode,
        )
    }

    pub fn thumbnail(&self) -> String {
        markup::asset_url(&self.asset_base, &format!("{}-thumbnail-blog.webp", self.id))
    }

    /// Output page filename.
    pub fn page_filename(&self) -> String {
        format!("{}.html", self.id)
    }

    pub fn inspect(&self, img_mode: ImgTagMode) -> PostReport {
        let document = Document::scan(&self.render_body(img_mode));
        PostReport {
            id: self.id.clone(),
            title: self.title.clone(),
            carousels: document.carousels.len(),
            images: document.images.len(),
            document,
        }
    }
}

/// Order posts newest first: numeric ids descending, then other ids descending.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        let key = |p: &Post| (p.id.parse::<u64>().ok(), p.id.clone());
        key(b).cmp(&key(a))
    });
}
