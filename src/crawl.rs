//! Building a [`LinkGraph`] from a directory of HTML pages.

use crate::*;
use regex::Regex;
use std::{collections::BTreeSet, path::Path, sync::OnceLock};
use tracing::debug;
use walkdir::WalkDir;

const PAGE_SUFFIX: &str = ".html";

fn anchor_href() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("Invalid regex"))
}

/// `href` targets of every `<a>` tag in `html`.
pub fn extract_links(html: &str) -> BTreeSet<String> {
    anchor_href()
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Reads every `*.html` file directly inside `dir`.
///
/// A page is named by its file name. Self links and links to names that are
/// not pages of `dir` are dropped.
pub fn crawl(dir: &Path) -> Result<LinkGraph> {
    let mut corpus = Corpus::new();
    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);
    for entry in entries {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(PAGE_SUFFIX) {
            continue;
        }
        let html = std::fs::read_to_string(entry.path()).map_err(|source| Error::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        let mut links = extract_links(&html);
        links.remove(&name);
        corpus.insert(name, links);
    }

    let pages: BTreeSet<String> = corpus.keys().cloned().collect();
    let mut dropped = 0;
    for links in corpus.values_mut() {
        let before = links.len();
        links.retain(|l| pages.contains(l));
        dropped += before - links.len();
    }
    debug!(
        dir = %dir.display(),
        pages = pages.len(),
        dropped,
        "crawled corpus"
    );
    LinkGraph::new(&corpus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_hrefs() {
        let html = r#"
            <a href="1.html">one</a>
            <a class="x" href="2.html">two</a>
            <A href="3.html">not matched</A>
            <a  href="1.html">again</a>
            <link href="style.css">
        "#;
        let links = extract_links(html);
        let links: Vec<_> = links.iter().map(String::as_str).collect();
        assert_eq!(links, ["1.html", "2.html"]);
    }

    #[test]
    fn crawls_directory() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, body: &str| std::fs::write(dir.path().join(name), body).unwrap();
        write("1.html", r#"<a href="2.html">2</a><a href="1.html">me</a>"#);
        write("2.html", r#"<a href="1.html">1</a><a href="https://example.com">out</a>"#);
        write("3.html", "no links");
        write("notes.txt", r#"<a href="1.html">ignored</a>"#);
        std::fs::create_dir(dir.path().join("sub.html")).unwrap();

        let g = crawl(dir.path()).unwrap();
        let names: Vec<_> = g.pages().iter().map(|v| g.name(*v)).collect();
        assert_eq!(names, ["1.html", "2.html", "3.html"]);
        let one = g.vertex("1.html").unwrap();
        let linked: Vec<_> = g.links(one).map(|v| g.name(v)).collect();
        assert_eq!(linked, ["2.html"]);
        assert_eq!(g.out_degree(g.vertex("2.html").unwrap()), 1);
        assert_eq!(g.out_degree(g.vertex("3.html").unwrap()), 0);
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let res = crawl(&dir.path().join("absent"));
        assert!(matches!(res, Err(Error::WalkDir(_))));
    }
}
