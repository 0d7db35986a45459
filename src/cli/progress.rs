//! Progress and listing output for CLI downloads.

use chrono::DateTime;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::content::PreviewFile;
use crate::download::DownloadProgress;
use crate::format::{file_icon, format_duration, format_file_size};
use crate::stats::SessionStats;

const SEPARATOR: &str = "────────────────────────────────────────────────────────────";

/// Creates the file-counting bar for a bulk download.
fn make_files_bar(total_files: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_files);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} - {msg}")
            .expect("progress template is valid")
            .progress_chars("━━╌"),
    );
    bar
}

/// Drives the indicatif bar from download callbacks.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    #[must_use]
    pub fn new(total_files: u64) -> Self {
        let bar = make_files_bar(total_files);
        bar.enable_steady_tick(std::time::Duration::from_millis(250));
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl DownloadProgress for CliProgress {
    fn on_file_start(&self, name: &str, size: u64) {
        self.bar
            .set_message(format!("{name} ({})", format_file_size(size)));
    }

    fn on_file_complete(&self, name: &str, bytes: u64) {
        self.bar.inc(1);
        self.bar
            .println(format!("  ✓ {name} ({})", format_file_size(bytes)));
    }

    fn on_file_skipped(&self, name: &str) {
        self.bar.inc(1);
        self.bar.println(format!("  - {name} (already exists)"));
    }

    fn on_error(&self, name: &str, error: &str) {
        self.bar.println(format!("  ✗ {name}: {error}"));
    }
}

/// Prints the previewed file listing.
pub fn print_file_list(files: &[PreviewFile]) {
    if files.is_empty() {
        println!("No files to display");
        return;
    }

    let total_size: u64 = files.iter().map(|f| f.item.size).sum();

    println!("\n{SEPARATOR}");
    println!("Files ({})", files.len());
    println!("{SEPARATOR}");

    for file in files {
        let item = &file.item;
        let icon = if item.kind.is_file() {
            file_icon(&item.mimetype)
        } else {
            "folder"
        };
        let created = DateTime::from_timestamp(item.create_time, 0)
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let preview = if file.has_preview() { " [preview]" } else { "" };

        println!(
            "  [{icon:>9}] {} ({})  {}  {} {}{preview}",
            style(&item.name).bold(),
            format_file_size(item.size),
            item.mimetype,
            style(&item.id).dim(),
            created,
        );
    }

    println!("{SEPARATOR}");
    println!(
        "  {} file(s), {} total",
        files.len(),
        format_file_size(total_size)
    );
    println!("{SEPARATOR}\n");
}

/// Prints a summary of download statistics.
pub fn print_summary(stats: &SessionStats) {
    if stats.files_downloaded == 0 && stats.files_skipped == 0 {
        return;
    }

    println!("\n{SEPARATOR}");
    println!("Download Summary");
    println!("{SEPARATOR}");

    if stats.files_downloaded > 0 {
        println!("  Files downloaded:  {}", stats.files_downloaded);
        println!(
            "  Total size:        {}",
            format_file_size(stats.total_bytes)
        );
        println!("  Total time:        {}", format_duration(stats.elapsed));
        println!(
            "  Average speed:     {}/s",
            format_file_size(stats.average_speed())
        );
    }

    if stats.files_skipped > 0 {
        println!("  Files skipped:     {}", stats.files_skipped);
    }

    println!("{SEPARATOR}");
}
