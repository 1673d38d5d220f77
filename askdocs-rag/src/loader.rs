//! Content loaders: web pages and directories of PDF files.

use std::path::{Path, PathBuf};

use scraper::{Html, Selector};
use tracing::debug;

use crate::document::Document;
use crate::error::{RagError, Result};

/// Loads a single web page into a [`Document`].
///
/// The page body becomes the text; `source`, `title`, and `description`
/// land in the metadata (empty strings when the page does not declare
/// them, so every record carries the full declared property set).
pub struct WebPageLoader {
    url: String,
    client: reqwest::Client,
}

impl WebPageLoader {
    /// Create a loader for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), client: reqwest::Client::new() }
    }

    /// Fetch and parse the page.
    pub async fn load(&self) -> Result<Document> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.error(format!("request failed: {e}")))?
            .text()
            .await
            .map_err(|e| self.error(format!("reading body failed: {e}")))?;

        let html = Html::parse_document(&body);
        let title = select_text(&html, "title");
        let description = select_attr(&html, r#"meta[name="description"]"#, "content");
        let text = page_text(&html);

        debug!(url = %self.url, chars = text.len(), "loaded web page");

        Ok(Document::new(text)
            .with_metadata("source", self.url.clone())
            .with_metadata("title", title)
            .with_metadata("description", description))
    }

    fn error(&self, message: String) -> RagError {
        RagError::Loader { location: self.url.clone(), message }
    }
}

fn select_text(html: &Html, selector: &str) -> String {
    let selector = Selector::parse(selector).expect("static selector");
    html.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn select_attr(html: &Html, selector: &str, attr: &str) -> String {
    let selector = Selector::parse(selector).expect("static selector");
    html.select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Visible text of the page body, whitespace-collapsed.
fn page_text(html: &Html) -> String {
    let body = Selector::parse("body").expect("static selector");
    let element = html.select(&body).next();
    let raw: String = match element {
        Some(el) => el.text().collect(),
        None => html.root_element().text().collect(),
    };
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Loads every PDF in a directory, one [`Document`] per page.
///
/// Each document carries the file path as `source` and the 1-based page
/// number as `page`.
pub struct PdfDirectoryLoader {
    dir: PathBuf,
}

impl PdfDirectoryLoader {
    /// Create a loader for the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read and extract text from every `*.pdf` file, in path order.
    pub fn load(&self) -> Result<Vec<Document>> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)
            .map_err(|e| self.error(&self.dir, format!("reading directory failed: {e}")))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
            })
            .collect();
        paths.sort();

        let mut documents = Vec::new();
        for path in &paths {
            documents.extend(self.load_file(path)?);
        }
        Ok(documents)
    }

    fn load_file(&self, path: &Path) -> Result<Vec<Document>> {
        let pdf = lopdf::Document::load(path)
            .map_err(|e| self.error(path, format!("parsing PDF failed: {e}")))?;
        let source = path.display().to_string();

        let mut documents = Vec::new();
        for (page_number, _) in pdf.get_pages() {
            let text = pdf
                .extract_text(&[page_number])
                .map_err(|e| self.error(path, format!("extracting page {page_number}: {e}")))?;
            documents.push(
                Document::new(text.trim())
                    .with_metadata("source", source.clone())
                    .with_metadata("page", i64::from(page_number)),
            );
        }

        debug!(path = %path.display(), pages = documents.len(), "loaded pdf");
        Ok(documents)
    }

    fn error(&self, path: &Path, message: String) -> RagError {
        RagError::Loader { location: path.display().to_string(), message }
    }
}
