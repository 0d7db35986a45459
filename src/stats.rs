//! Session statistics for the download summary.

use std::time::{Duration, Instant};

/// Statistics for one bulk download run.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Number of files successfully downloaded.
    pub files_downloaded: usize,
    /// Number of files skipped (already existed).
    pub files_skipped: usize,
    /// Total bytes written.
    pub total_bytes: u64,
    /// Wall-clock time for the whole run, delays included.
    pub elapsed: Duration,
}

impl SessionStats {
    /// Returns the average download speed in bytes per second.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn average_speed(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.total_bytes as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// Accumulates per-file results while a run is in progress.
#[derive(Debug)]
pub struct SessionStatsBuilder {
    started: Instant,
    files_downloaded: usize,
    files_skipped: usize,
    total_bytes: u64,
}

impl Default for SessionStatsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStatsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            files_downloaded: 0,
            files_skipped: 0,
            total_bytes: 0,
        }
    }

    pub fn record_download(&mut self, bytes: u64) {
        self.files_downloaded += 1;
        self.total_bytes += bytes;
    }

    pub fn record_skip(&mut self) {
        self.files_skipped += 1;
    }

    /// Finalizes the stats, stamping the elapsed time.
    #[must_use]
    pub fn build(self) -> SessionStats {
        SessionStats {
            files_downloaded: self.files_downloaded,
            files_skipped: self.files_skipped,
            total_bytes: self.total_bytes,
            elapsed: self.started.elapsed(),
        }
    }
}
