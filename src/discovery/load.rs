use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::types::{DirectoryList, RestDescription};
use crate::error::{GenerateError, Result};

/// Where a discovery document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoverySource {
    /// Fetched over HTTP(S) through the request queue
    Remote(Url),
    /// Read straight from disk, no network call
    Local(PathBuf),
}

impl DiscoverySource {
    /// Classify user input: `http`/`https` URLs are remote, `file://` URLs and
    /// anything without a scheme are local paths.
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => DiscoverySource::Remote(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(DiscoverySource::Local)
                .unwrap_or_else(|_| DiscoverySource::Local(PathBuf::from(input))),
            _ => DiscoverySource::Local(PathBuf::from(input)),
        }
    }
}

impl fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoverySource::Remote(url) => write!(f, "{url}"),
            DiscoverySource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

fn from_value<T: DeserializeOwned>(origin: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| GenerateError::parse(origin, e))
}

/// Interpret an already-fetched JSON body as a discovery document.
pub fn parse_description(origin: &str, value: Value) -> Result<RestDescription> {
    from_value(origin, value)
}

/// Interpret an already-fetched JSON body as the API directory listing.
pub fn parse_directory_list(origin: &str, value: Value) -> Result<DirectoryList> {
    from_value(origin, value)
}

/// Read and parse a discovery document from disk.
pub async fn read_description(path: &Path) -> Result<RestDescription> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| GenerateError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| GenerateError::parse(path.display().to_string(), e))
}

#[derive(Deserialize)]
struct IgnoreFile {
    #[serde(default)]
    ignore: Vec<String>,
}

/// Load the set of API ids to skip from `{"ignore": [...]}`.
///
/// A missing file is an empty set; a file that exists but does not parse is an error.
pub async fn load_ignore_list(path: &Path) -> Result<BTreeSet<String>> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no ignore list found");
            return Ok(BTreeSet::new());
        }
        Err(e) => return Err(GenerateError::io(path, e)),
    };
    let parsed: IgnoreFile = serde_json::from_str(&text)
        .map_err(|e| GenerateError::parse(path.display().to_string(), e))?;
    Ok(parsed.ignore.into_iter().collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_classification() {
        assert!(matches!(
            DiscoverySource::parse("https://example.com/discovery/v1/apis/drive/v3/rest"),
            DiscoverySource::Remote(_)
        ));
        assert_eq!(
            DiscoverySource::parse("fixtures/drive.json"),
            DiscoverySource::Local(PathBuf::from("fixtures/drive.json"))
        );
        assert_eq!(
            DiscoverySource::parse("/tmp/drive.json"),
            DiscoverySource::Local(PathBuf::from("/tmp/drive.json"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_file_url_is_local() {
        assert_eq!(
            DiscoverySource::parse("file:///tmp/drive.json"),
            DiscoverySource::Local(PathBuf::from("/tmp/drive.json"))
        );
    }

    #[test]
    fn test_parse_description_reports_origin() {
        let err = parse_description("https://x/rest", json!({"name": 1})).unwrap_err();
        assert!(matches!(err, GenerateError::Parse { ref origin, .. } if origin == "https://x/rest"));
    }

    #[test]
    fn test_parse_directory_list() {
        let list = parse_directory_list(
            "dir",
            json!({"items": [{
                "id": "drive:v3",
                "name": "drive",
                "version": "v3",
                "description": "Manages files",
                "discoveryRestUrl": "https://example.com/drive/v3/rest"
            }]}),
        )
        .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].id, "drive:v3");
    }

    #[tokio::test]
    async fn test_ignore_list_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let set = load_ignore_list(&dir.path().join("ignore.json")).await.unwrap();
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_ignore_list_reads_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ignore.json");
        std::fs::write(&path, r#"{"ignore": ["sql:v1beta4", "drive:v2"]}"#).unwrap();
        let set = load_ignore_list(&path).await.unwrap();
        assert!(set.contains("sql:v1beta4"));
        assert!(set.contains("drive:v2"));
    }

    #[tokio::test]
    async fn test_ignore_list_malformed_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ignore.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_ignore_list(&path).await.is_err());
    }
}
