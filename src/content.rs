//! Typed model for the Gofile contents endpoint.
//!
//! The envelope is decoded into explicit structures; a body that does not
//! match the expected shape is a decode error, never a silently-missing
//! field. Only the flat `contents` keying is modeled — the child mapping
//! of one listing, keyed by content identifier.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level JSON wrapper returned by the contents endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEnvelope {
    /// Upstream status flag; the payload is only trusted when `"ok"`.
    pub status: String,
    pub data: ContentData,
}

impl ContentEnvelope {
    /// Returns true when the upstream reported success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Payload of a successful listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentData {
    #[serde(default)]
    pub is_owner: bool,
    /// Whether the folder is password protected.
    #[serde(default)]
    pub is_password: bool,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Child entries keyed by content identifier. Empty when the folder
    /// is locked and no valid password accompanied the request.
    #[serde(default)]
    pub contents: HashMap<String, ContentItem>,
}

/// Whether an entry is a downloadable file or a nested folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

impl ItemKind {
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }
}

/// One child entry of a listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub size: u64,
    /// Direct download link.
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Creation time as a unix timestamp in seconds.
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub mimetype: String,
}

impl ContentItem {
    /// Returns true when the MIME type indicates an inline-previewable image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mimetype.starts_with("image/")
    }
}

/// A content item augmented with a derived preview link.
///
/// `preview_url` is populated only for image MIME types; everything else
/// carries an empty string, matching the grid the listing feeds.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    pub item: ContentItem,
    pub preview_url: String,
}

impl PreviewFile {
    fn from_item(item: ContentItem) -> Self {
        let preview_url = if item.is_image() {
            item.link.clone()
        } else {
            String::new()
        };
        Self { item, preview_url }
    }

    /// Returns true when a preview link was derived.
    #[must_use]
    pub fn has_preview(&self) -> bool {
        !self.preview_url.is_empty()
    }
}

/// Flattens an envelope's child mapping into a display list.
///
/// Entries are sorted by name so output is stable across runs; the wire
/// mapping carries no ordering of its own.
#[must_use]
pub fn preview_files(envelope: &ContentEnvelope) -> Vec<PreviewFile> {
    let mut files: Vec<PreviewFile> = envelope
        .data
        .contents
        .values()
        .cloned()
        .map(PreviewFile::from_item)
        .collect();
    files.sort_by(|a, b| a.item.name.cmp(&b.item.name));
    files
}
