//! gofile-dl - preview and download Gofile share links.
//!
//! This library resolves a pasted share link to its content listing,
//! previews file metadata, and downloads files one at a time with a
//! fixed delay between them, abstracted from any specific UI.
//!
//! # Example
//!
//! ```no_run
//! use gofile_dl::{
//!     DownloadConfig, DownloadItem, Downloader, GofileClient, HttpFetcher, NoProgress,
//!     preview_files,
//! };
//!
//! # async fn example() -> gofile_dl::Result<()> {
//! let client = GofileClient::new()?;
//!
//! // Fetch the listing behind a share link.
//! let envelope = client.fetch_contents("https://gofile.io/d/abc123", None).await?;
//! let files = preview_files(&envelope);
//!
//! // Download everything, sequentially, with no progress reporting.
//! let items: Vec<DownloadItem> = files.iter().map(DownloadItem::from_preview).collect();
//! let downloader = Downloader::new(
//!     HttpFetcher::new(client.http()),
//!     DownloadConfig::default(),
//!     ".",
//! );
//! let stats = downloader.download_all(&items, &NoProgress).await?;
//! println!("Downloaded {} files", stats.files_downloaded);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod client;
pub mod config;
pub mod content;
pub mod download;
pub mod error;
pub mod format;
pub mod fs;
pub mod session;
pub mod stats;
pub mod url;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "cli")]
pub mod cli;

// Re-export main types for convenience
pub use client::{API_BASE, GofileClient};
pub use config::{ApiConfig, AppConfig, DownloadConfig, PathConfig};
pub use content::{ContentEnvelope, ContentItem, ItemKind, PreviewFile, preview_files};
pub use download::{
    DownloadItem, DownloadProgress, Downloader, FileFetcher, HttpFetcher, NoProgress,
};
pub use error::{Error, Result};
pub use format::{file_icon, format_duration, format_file_size};
pub use fs::{FileSystem, TokioFileSystem};
pub use session::{DownloadScope, PreviewSession, SessionPhase};
pub use stats::{SessionStats, SessionStatsBuilder};
pub use url::extract_content_id;
