//! Portfolio entries.
//!
//! Each finished piece has a directory with a short info file and a thumbnail:
//!
//! ```text
//! data/posts-portfolio/4-portfolio/
//! ├── 4-info.txt                     # title, subtitle, optional post id
//! └── 4-thumbnail-portfolio.webp
//! ```
//!
//! The info file is trimmed and read line by line. The third line, when
//! present, names the blog post that tells the making-of story; the card then
//! links to that post's page.

use crate::markup;
use serde::Serialize;

pub const INFO_SUFFIX: &str = "-info.txt";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    /// Id of the blog post about this piece.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,
    /// Item directory relative to the site root, `/`-separated.
    pub asset_base: String,
}

impl PortfolioItem {
    pub fn parse(id: &str, asset_base: &str, text: &str) -> Self {
        let lines: Vec<&str> = text.trim().split('\n').collect();
        let line = |n: usize| lines.get(n).map(|l| l.trim()).unwrap_or("");

        Self {
            id: id.to_string(),
            title: line(0).to_string(),
            subtitle: line(1).to_string(),
            post: Some(line(2)).filter(|p| !p.is_empty()).map(str::to_string),
            asset_base: asset_base.to_string(),
        }
    }

    /// Item id from an info filename (`4-info.txt` → `4`).
    pub fn id_from_filename(filename: &str) -> Option<&str> {
        filename
            .strip_suffix(INFO_SUFFIX)
            .filter(|id| !id.is_empty())
    }

    pub fn thumbnail(&self) -> String {
        markup::asset_url(
            &self.asset_base,
            &format!("{}-thumbnail-portfolio.webp", self.id),
        )
    }

    /// Page the card links to, if the piece has a blog post.
    pub fn post_page(&self) -> Option<String> {
        self.post.as_ref().map(|id| format!("{id}.html"))
    }
}

/// Newest first, by the same id ordering as posts.
pub fn sort_newest_first(items: &mut [PortfolioItem]) {
    items.sort_by(|a, b| {
        let key = |item: &PortfolioItem| (item.id.parse::<u64>().ok(), item.id.clone());
        key(b).cmp(&key(a))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_three_lines() {
        let item = PortfolioItem::parse(
            "4",
            "data/posts-portfolio/4-portfolio",
            "Knight armor\nFoam and worbla\n12\n",
        );
        assert_eq!(item.title, "Knight armor");
        assert_eq!(item.subtitle, "Foam and worbla");
        assert_eq!(item.post.as_deref(), Some("12"));
        assert_eq!(item.post_page().as_deref(), Some("12.html"));
        assert_eq!(
            item.thumbnail(),
            "data/posts-portfolio/4-portfolio/4-thumbnail-portfolio.webp"
        );
    }

    #[test]
    fn missing_post_line_means_no_link() {
        let item = PortfolioItem::parse("4", "p", "Knight armor\r\nFoam\r\n");
        assert_eq!(item.subtitle, "Foam");
        assert_eq!(item.post, None);
        assert_eq!(item.post_page(), None);
    }

    #[test]
    fn blank_post_line_means_no_link() {
        let item = PortfolioItem::parse("4", "p", "Knight armor\nFoam\n   ");
        assert_eq!(item.post, None);
    }

    #[test]
    fn id_from_info_filename() {
        assert_eq!(PortfolioItem::id_from_filename("4-info.txt"), Some("4"));
        assert_eq!(PortfolioItem::id_from_filename("-info.txt"), None);
        assert_eq!(PortfolioItem::id_from_filename("4-script.txt"), None);
    }

    #[test]
    fn newest_first_ordering() {
        let mut items: Vec<PortfolioItem> = ["3", "11", "1"]
            .iter()
            .map(|id| PortfolioItem::parse(id, "p", "t"))
            .collect();
        sort_newest_first(&mut items);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["11", "3", "1"]);
    }
}
