//! Download trigger and bulk orchestration.
//!
//! Files are fetched fully into memory, staged as `{name}.part`, then
//! renamed into place. Bulk downloads run strictly in input order with a
//! fixed delay between files to avoid download throttling — a sequential
//! queue on purpose, not a concurrency-1 accident.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::DownloadConfig;
use crate::content::PreviewFile;
use crate::error::Result;
use crate::fs::{FileSystem, TokioFileSystem};
use crate::stats::{SessionStats, SessionStatsBuilder};

/// Abstraction over fetching a URL's bytes, for testability.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Fetches the full body of `url` into memory.
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes>;
}

/// Production fetcher over a shared `reqwest` client.
///
/// An optional bearer token (the proxied account token) is attached to
/// every direct-link request when configured.
pub struct HttpFetcher {
    client: reqwest::Client,
    bearer: Option<String>,
}

impl HttpFetcher {
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            bearer: None,
        }
    }

    /// Attaches a bearer token to direct-link requests.
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

#[async_trait]
impl FileFetcher for HttpFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes> {
        let mut req = self.client.get(url);
        if let Some(token) = &self.bearer {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?.error_for_status()?;
        Ok(resp.bytes().await?)
    }
}

/// Trait for receiving download lifecycle callbacks.
///
/// All methods have default no-op implementations for convenience.
pub trait DownloadProgress: Send + Sync {
    /// Called when a file download starts.
    fn on_file_start(&self, _name: &str, _size: u64) {}

    /// Called when a file download completes successfully.
    fn on_file_complete(&self, _name: &str, _bytes: u64) {}

    /// Called when a file is skipped because it already exists.
    fn on_file_skipped(&self, _name: &str) {}

    /// Called when a file download fails.
    fn on_error(&self, _name: &str, _error: &str) {}
}

/// A null progress implementation that ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl DownloadProgress for NoProgress {}

/// An ordered (link, filename) pair queued for download.
#[derive(Debug, Clone)]
pub struct DownloadItem {
    /// Direct URL to fetch.
    pub link: String,
    /// File name to save under, relative to the download directory.
    pub filename: String,
    /// Advertised size in bytes, for display only.
    pub size: u64,
}

impl DownloadItem {
    /// Builds a queue entry from a previewed file.
    #[must_use]
    pub fn from_preview(file: &PreviewFile) -> Self {
        Self {
            link: file.item.link.clone(),
            filename: file.item.name.clone(),
            size: file.item.size,
        }
    }
}

/// Returns the `.part` staging path for a given final path.
fn part_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".part");
    PathBuf::from(s)
}

/// Downloads files into a target directory.
pub struct Downloader<F: FileFetcher = HttpFetcher, S: FileSystem = TokioFileSystem> {
    fetcher: F,
    fs: S,
    config: DownloadConfig,
    dir: PathBuf,
}

impl Downloader<HttpFetcher, TokioFileSystem> {
    /// Creates a downloader with the default file system.
    #[must_use]
    pub fn new(fetcher: HttpFetcher, config: DownloadConfig, dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            fs: TokioFileSystem,
            config,
            dir: dir.into(),
        }
    }
}

impl<F: FileFetcher, S: FileSystem> Downloader<F, S> {
    /// Creates a downloader with custom fetcher and file system implementations.
    #[must_use]
    pub fn with_parts(fetcher: F, fs: S, config: DownloadConfig, dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            fs,
            config,
            dir: dir.into(),
        }
    }

    /// Returns the download configuration.
    #[must_use]
    pub const fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Downloads a single file.
    ///
    /// The body is fetched fully into memory, written to `{name}.part`,
    /// then renamed to the final name — the transient staging mirrors the
    /// object-URL-and-release flow of the original UI. Returns the number
    /// of bytes written.
    ///
    /// # Errors
    ///
    /// Network and write errors propagate; there is no partial-download
    /// recovery. The `.part` file is removed on failure unless
    /// `cleanup_on_error` is disabled.
    pub async fn download_file(
        &self,
        item: &DownloadItem,
        progress: &dyn DownloadProgress,
    ) -> Result<u64> {
        let dest = self.dir.join(&item.filename);
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent).await?;
        }

        progress.on_file_start(&item.filename, item.size);
        log::debug!("downloading {} from {}", item.filename, item.link);

        let part = part_path(&dest);
        match self.fetch_and_store(&item.link, &part, &dest).await {
            Ok(bytes) => {
                progress.on_file_complete(&item.filename, bytes);
                Ok(bytes)
            }
            Err(e) => {
                if self.config.cleanup_on_error {
                    let _ = self.fs.remove_file(&part).await;
                }
                progress.on_error(&item.filename, &e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_and_store(&self, link: &str, part: &Path, dest: &Path) -> Result<u64> {
        let body = self.fetcher.fetch_bytes(link).await?;
        self.fs.write_file(part, &body).await?;
        self.fs.rename_file(part, dest).await?;
        Ok(body.len() as u64)
    }

    /// Downloads all items strictly in input order.
    ///
    /// Sleeps the configured delay between downloads (not before the
    /// first, not after a skip). A failure on one file aborts the
    /// remaining sequence; there is no per-file error isolation and no
    /// cancellation once started.
    ///
    /// # Errors
    ///
    /// Returns the first download error encountered.
    pub async fn download_all(
        &self,
        items: &[DownloadItem],
        progress: &dyn DownloadProgress,
    ) -> Result<SessionStats> {
        let mut builder = SessionStatsBuilder::new();
        let delay = Duration::from_millis(self.config.delay_ms);
        let mut downloaded_any = false;

        for item in items {
            let dest = self.dir.join(&item.filename);
            if !self.config.force_overwrite && self.fs.file_exists(&dest).await {
                log::info!("{} already exists, skipping", item.filename);
                progress.on_file_skipped(&item.filename);
                builder.record_skip();
                continue;
            }

            if downloaded_any && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let bytes = self.download_file(item, progress).await?;
            downloaded_any = true;
            builder.record_download(bytes);
        }

        Ok(builder.build())
    }
}
