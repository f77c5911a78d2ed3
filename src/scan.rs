//! Content directory scanning.
//!
//! First stage of the build. Walks the content root and collects everything
//! the pages are rendered from:
//!
//! ```text
//! content/
//! ├── config.toml                      # Site configuration (optional)
//! ├── instructions/
//! │   ├── schedule_info.txt            # Agenda status (homepage banner)
//! │   └── feedbacks.txt                # Testimonials (homepage carousel)
//! └── data/
//!     ├── posts-blog/
//!     │   ├── 1-blog/
//!     │   │   ├── 1-script.txt         # Post script
//!     │   │   ├── 1-thumbnail-blog.webp
//!     │   │   └── 01.webp
//!     │   └── 2-blog/
//!     │       └── ...
//!     └── posts-portfolio/
//!         └── 1-portfolio/
//!             ├── 1-info.txt           # Portfolio card
//!             └── 1-thumbnail-portfolio.webp
//! ```
//!
//! Any file named `<id>-script.txt` is a post, wherever it sits; its directory
//! is the post's asset base. Post ids must be unique across the tree and must
//! not name a fixed page (`index`, `blog`, `portfolio`). Files named
//! `<id>-info.txt` are portfolio entries, found the same way.
//!
//! Unreadable posts and widget files are logged and skipped so one broken file
//! does not take the whole site down.

use crate::config::{self, SiteConfig};
use crate::portfolio::{self, PortfolioItem};
use crate::post::{self, Post};
use crate::widgets::{self, Feedback};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Duplicate post id {0} in {1}")]
    DuplicatePost(String, PathBuf),
    #[error("Post id {0} in {1} would overwrite the {0}.html site page")]
    ReservedPostId(String, PathBuf),
}

/// Everything the site is rendered from.
#[derive(Debug, Serialize)]
pub struct Manifest {
    /// Posts, newest first.
    pub posts: Vec<Post>,
    /// Portfolio entries, newest first.
    pub portfolio: Vec<PortfolioItem>,
    /// Agenda status text, raw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    /// `None` when the feedbacks file is missing or unreadable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedbacks: Option<Vec<Feedback>>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let Entries {
        mut posts,
        mut portfolio,
    } = scan_entries(root)?;
    post::sort_newest_first(&mut posts);
    portfolio::sort_newest_first(&mut portfolio);

    let agenda = read_optional(&root.join(&config.home.agenda));
    let feedbacks =
        read_optional(&root.join(&config.home.feedbacks)).map(|text| widgets::parse_feedbacks(&text));

    Ok(Manifest {
        posts,
        portfolio,
        agenda,
        feedbacks,
        config,
    })
}

#[derive(Default)]
struct Entries {
    posts: Vec<Post>,
    portfolio: Vec<PortfolioItem>,
}

fn scan_entries(root: &Path) -> Result<Entries, ScanError> {
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut entries = Entries::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let filename = entry.file_name().to_string_lossy();
        let path = entry.path();

        if let Some(id) = PortfolioItem::id_from_filename(&filename) {
            if let Some(text) = read_entry(path) {
                debug!(id, "found portfolio entry");
                entries
                    .portfolio
                    .push(PortfolioItem::parse(id, &asset_base(root, path), &text));
            }
            continue;
        }

        let Some(id) = Post::id_from_filename(&filename) else {
            continue;
        };
        if Post::is_reserved_id(id) {
            return Err(ScanError::ReservedPostId(id.to_string(), path.to_path_buf()));
        }
        if seen.contains_key(id) {
            return Err(ScanError::DuplicatePost(id.to_string(), path.to_path_buf()));
        }
        let Some(text) = read_entry(path) else {
            continue;
        };

        let asset_base = asset_base(root, path);
        debug!(id, asset_base = %asset_base, "found post");
        entries.posts.push(Post::parse(id, &asset_base, &text));
        seen.insert(id.to_string(), path.to_path_buf());
    }

    Ok(entries)
}

fn read_entry(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable entry");
            None
        }
    }
}

/// Post directory relative to the content root, `/`-separated (`.` at the root).
fn asset_base(root: &Path, script: &Path) -> String {
    let dir = script
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .unwrap_or_else(|| Path::new(""));
    let parts: Vec<String> = dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn read_optional(path: &Path) -> Option<String> {
    if !path.is_file() {
        debug!(path = %path.display(), "widget source not present");
        return None;
    }
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable widget source");
            None
        }
    }
}
