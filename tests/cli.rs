//! End-to-end tests driving the built `biascript` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn biascript(source: &Path, output: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_biascript"))
        .arg("--source")
        .arg(source)
        .arg("--output")
        .arg(output)
        .args(args)
        .output()
        .unwrap()
}

fn content_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(
        root,
        "data/posts-blog/1-blog/1-script.txt",
        "Hello\n01/01/2025\nFirst post\n---\n<title>Intro</title>\n<carousel>a.webp, b.webp</carousel>",
    );
    write_file(
        root,
        "data/posts-blog/2-blog/2-script.txt",
        "Second\n02/01/2025\nAnother\n---\n<txt>Body</txt>\n<img>c.webp</img>",
    );
    write_file(root, "data/posts-blog/1-blog/a.webp", "webp");
    write_file(
        root,
        "data/posts-portfolio/3-portfolio/3-info.txt",
        "Knight armor\nFoam and worbla\n1\n",
    );
    write_file(root, "instructions/schedule_info.txt", "Open\nBooked in June");
    write_file(root, "instructions/feedbacks.txt", "Great!\nJo\n\nLovely.\nKim\n");
    tmp
}

#[test]
fn build_writes_pages_and_assets() {
    let content = content_dir();
    let dist = TempDir::new().unwrap();
    let out = biascript(content.path(), dist.path(), &["build"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let index = fs::read_to_string(dist.path().join("index.html")).unwrap();
    assert!(index.contains("Open<br>Booked in June"));
    assert!(index.contains(r#"href="2.html""#));
    assert!(index.contains(r#"href="index.html" class="active-link""#));
    assert!(index.contains("\u{201c}Great!\u{201d}"));

    let blog = fs::read_to_string(dist.path().join("blog.html")).unwrap();
    let newest = blog.find(r#"href="2.html""#).unwrap();
    let oldest = blog.find(r#"href="1.html""#).unwrap();
    assert!(newest < oldest);

    let post = fs::read_to_string(dist.path().join("1.html")).unwrap();
    assert!(post.contains("<h3>Intro</h3>"));
    assert!(post.contains(r#"id="carousel-1""#));
    assert!(post.contains(r#"src="data/posts-blog/1-blog/a.webp""#));

    assert!(dist.path().join("data/posts-blog/1-blog/a.webp").is_file());
    assert!(!dist.path().join("data/posts-blog/1-blog/1-script.txt").exists());

    let portfolio = fs::read_to_string(dist.path().join("portfolio.html")).unwrap();
    assert!(portfolio.contains(r#"href="1.html""#));
    assert!(portfolio.contains("Knight armor"));
    assert!(!dist.path().join("data/posts-portfolio/3-portfolio/3-info.txt").exists());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Generated 5 pages, 2 posts"));
}

#[test]
fn translate_prints_fragment() {
    let content = TempDir::new().unwrap();
    write_file(content.path(), "body.txt", "<txt>Hi</txt>\n<img>x.webp, y.webp</img>");
    let out = biascript(
        content.path(),
        content.path(),
        &[
            "translate",
            content.path().join("body.txt").to_str().unwrap(),
            "--assets",
            "img/post",
        ],
    );
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("<p>Hi</p><br>"));
    assert!(stdout.contains("dual-image-container"));
    assert!(stdout.contains(r#"src="img/post/y.webp""#));
}

#[test]
fn check_json_reports_structure() {
    let content = content_dir();
    let out = biascript(content.path(), content.path(), &["check", "--json"]);
    assert!(out.status.success());
    let reports: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(reports[0]["id"], "2");
    assert_eq!(reports[0]["images"], 1);
    assert_eq!(reports[1]["carousels"], 1);
}

#[test]
fn gen_config_prints_stock_config() {
    let tmp = TempDir::new().unwrap();
    let out = biascript(tmp.path(), tmp.path(), &["gen-config"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[site]"));
    assert!(stdout.contains("img_tag = \"multi\""));
}

#[test]
fn post_named_after_a_fixed_page_fails_the_build() {
    let content = content_dir();
    write_file(content.path(), "data/posts-blog/x/index-script.txt", "Clash");
    let dist = TempDir::new().unwrap();
    let out = biascript(content.path(), dist.path(), &["build"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("ReservedPostId"));
    assert!(!dist.path().join("index.html").exists());
}

#[test]
fn rebuilding_into_the_source_tree_does_not_nest_output() {
    let content = content_dir();
    let dist = content.path().join("dist");
    for _ in 0..2 {
        let out = biascript(content.path(), &dist, &["build"]);
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    }
    assert!(dist.join("data/posts-blog/1-blog/a.webp").is_file());
    assert!(!dist.join("dist").exists());
}

#[test]
fn invalid_config_fails_the_build() {
    let content = content_dir();
    write_file(content.path(), "config.toml", "[site]\ncolour = \"red\"\n");
    let dist = TempDir::new().unwrap();
    let out = biascript(content.path(), dist.path(), &["build"]);
    assert!(!out.status.success());
}
