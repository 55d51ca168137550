//! Extraction of document and spreadsheet identifiers from service URLs.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

static RE_DOCUMENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"document/d/([A-Za-z0-9_-]+)").unwrap());

static RE_SPREADSHEET_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"spreadsheets/d/([A-Za-z0-9_-]+)").unwrap());

/// Kind of resource a URL points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Document,
    Spreadsheet,
}

/// Identifiers found in a text, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkSet {
    pub documents: Vec<String>,
    pub spreadsheets: Vec<String>,
}

impl LinkSet {
    /// Returns true if no identifiers were found.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.spreadsheets.is_empty()
    }

    /// Total number of identifiers.
    pub fn len(&self) -> usize {
        self.documents.len() + self.spreadsheets.len()
    }
}

/// Classifies a URL and extracts its identifier.
///
/// Returns `None` for URLs that are neither a document nor a spreadsheet, or
/// that carry no identifier.
pub fn classify_url(url: &str) -> Option<(ResourceKind, String)> {
    let (kind, re) = if url.contains("/document/") {
        (ResourceKind::Document, &*RE_DOCUMENT_ID)
    } else if url.contains("/spreadsheets/") {
        (ResourceKind::Spreadsheet, &*RE_SPREADSHEET_ID)
    } else {
        return None;
    };

    re.captures(url).map(|caps| (kind, caps[1].to_string()))
}

/// Finds every document and spreadsheet URL in `text`.
///
/// Duplicates are kept.
pub fn extract_links(text: &str) -> LinkSet {
    let mut links = LinkSet::default();

    for url in RE_URL.find_iter(text).map(|m| m.as_str()) {
        match classify_url(url) {
            Some((ResourceKind::Document, id)) => links.documents.push(id),
            Some((ResourceKind::Spreadsheet, id)) => links.spreadsheets.push(id),
            None => log::debug!("Ignoring URL {}", url),
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_document() {
        assert_eq!(
            classify_url("https://docs.google.com/document/d/1AbC_d-9/edit#heading=h.1"),
            Some((ResourceKind::Document, "1AbC_d-9".to_string()))
        );
    }

    #[test]
    fn test_classify_spreadsheet() {
        assert_eq!(
            classify_url("https://docs.google.com/spreadsheets/d/XyZ123/edit?gid=0"),
            Some((ResourceKind::Spreadsheet, "XyZ123".to_string()))
        );
    }

    #[test]
    fn test_classify_unrelated() {
        assert_eq!(classify_url("https://example.com/page"), None);
        assert_eq!(classify_url("https://docs.google.com/document/u/0/"), None);
    }

    #[test]
    fn test_extract_links_in_order() {
        let text = "\
Скрипт: https://docs.google.com/document/d/doc1/edit
Цены: https://docs.google.com/spreadsheets/d/sheet1/edit
Сайт: https://example.com
Ещё: http://docs.google.com/document/d/doc2 и снова https://docs.google.com/document/d/doc1/view";

        let links = extract_links(text);
        assert_eq!(links.documents, vec!["doc1", "doc2", "doc1"]);
        assert_eq!(links.spreadsheets, vec!["sheet1"]);
        assert_eq!(links.len(), 4);
    }

    #[test]
    fn test_extract_links_none() {
        assert!(extract_links("no links here").is_empty());
    }
}
