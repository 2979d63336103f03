use chrono::{DateTime, Local, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

lazy_static! {
    // [[target]] or [[target|display]]
    static ref WIKILINK_RE: Regex = Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").unwrap();
}

/// A note as returned by the backend's structured (`olrapi.note+json`) view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultFile {
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub frontmatter: Option<Map<String, Value>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stat: FileStat,
}

/// Timestamps are milliseconds since the Unix epoch, size is in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub ctime: i64,
    pub mtime: i64,
    pub size: i64,
}

impl FileStat {
    pub fn created_at(&self) -> Option<DateTime<Local>> {
        millis_to_local(self.ctime)
    }

    pub fn modified_at(&self) -> Option<DateTime<Local>> {
        millis_to_local(self.mtime)
    }
}

fn millis_to_local(millis: i64) -> Option<DateTime<Local>> {
    if millis <= 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&Local))
}

impl VaultFile {
    /// File name without directories or extension.
    pub fn name(&self) -> &str {
        let file = self.path.rsplit('/').next().unwrap_or(&self.path);
        file.strip_suffix(".md").unwrap_or(file)
    }

    pub fn folder(&self) -> &str {
        self.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }

    pub fn frontmatter_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .frontmatter
            .as_ref()
            .map(|fm| fm.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    pub fn wikilinks(&self) -> Vec<String> {
        extract_wikilinks(&self.content)
    }
}

pub fn extract_wikilinks(content: &str) -> Vec<String> {
    WIKILINK_RE
        .captures_iter(content)
        .map(|c| c[1].trim().to_string())
        .collect()
}
