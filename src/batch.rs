use crate::constants::{
    FOLDER_PREFIX, PREVIEW_PREFIX, PROGRESS_BAR_TEMPLATE, RATIO_PREFIX, SETTINGS_PREFIX,
    SIZE_PREFIX, SKIP_PREFIX, SUCCESS_PREFIX, SUMMARY_PREFIX,
};
use crate::error::{CompressionError, Result};
use crate::finder::{find_images, mirror_output_path};
use crate::processing::{compress_file, CompressionAction, CompressionOptions, CompressionReport};
use crate::utils::{bytes_to_kib, bytes_to_mib, calculate_compression_ratio, format_file_size};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a run needs, already validated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub gallery_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub options: CompressionOptions,
    pub dry_run: bool,
}

/// Per-file result handed back to the run loop.
#[derive(Debug)]
pub enum FileOutcome {
    Succeeded(CompressionReport),
    Failed {
        path: PathBuf,
        /// `None` when even the size could not be read.
        original_size: Option<u64>,
        error: CompressionError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    NeedsCompression,
    SmallEnough,
}

impl PreviewStatus {
    pub fn classify(size: u64, options: &CompressionOptions) -> Self {
        if options.fits(size) {
            PreviewStatus::SmallEnough
        } else {
            PreviewStatus::NeedsCompression
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PreviewStatus::NeedsCompression => "needs compression",
            PreviewStatus::SmallEnough => "already small enough",
        }
    }
}

/// Run-scoped counters, built up by the loop and returned to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub dry_run: bool,
    pub total_files: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub needs_compression: usize,
    /// Size of every file seen, including ones that later failed.
    pub total_original_bytes: u64,
    /// Original size of the files that were processed successfully.
    pub succeeded_original_bytes: u64,
    pub total_compressed_bytes: u64,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.total_files += 1;
        match outcome {
            FileOutcome::Succeeded(report) => {
                self.succeeded += 1;
                if report.action == CompressionAction::Skipped {
                    self.skipped += 1;
                }
                self.total_original_bytes += report.original_size;
                self.succeeded_original_bytes += report.original_size;
                self.total_compressed_bytes += report.compressed_size;
            }
            FileOutcome::Failed { original_size, .. } => {
                self.failed += 1;
                self.total_original_bytes += original_size.unwrap_or(0);
            }
        }
    }

    pub fn record_preview(&mut self, size: u64, status: PreviewStatus) {
        self.total_files += 1;
        self.total_original_bytes += size;
        if status == PreviewStatus::NeedsCompression {
            self.needs_compression += 1;
        }
    }

    /// Overall reduction across the files that succeeded.
    pub fn compression_ratio(&self) -> f64 {
        calculate_compression_ratio(self.succeeded_original_bytes, self.total_compressed_bytes)
    }
}

/// Finds every image under the gallery and either previews or compresses
/// them one at a time.
pub fn run_gallery(config: &RunConfig) -> Result<RunSummary> {
    let image_files = find_images(&config.gallery_dir)?;
    if image_files.is_empty() {
        return Err(CompressionError::NoImagesFound(config.gallery_dir.clone()));
    }

    print_header(config, image_files.len());

    let summary = if config.dry_run {
        preview_files(&image_files, &config.options)
    } else {
        compress_files(
            &image_files,
            &config.gallery_dir,
            config.output_dir.as_deref(),
            &config.options,
        )
    };

    print_summary(&summary);
    Ok(summary)
}

/// Reports what a real run would do. Only file metadata is read.
pub fn preview_files(image_files: &[PathBuf], options: &CompressionOptions) -> RunSummary {
    let mut summary = RunSummary {
        dry_run: true,
        ..RunSummary::default()
    };

    for path in image_files {
        match fs::metadata(path) {
            Ok(metadata) => {
                let size = metadata.len();
                let status = PreviewStatus::classify(size, options);
                crate::info!(
                    "{} Preview: {} ({:.1} KB) - {}",
                    PREVIEW_PREFIX,
                    display_name(path),
                    bytes_to_kib(size),
                    status.label()
                );
                summary.record_preview(size, status);
            }
            Err(e) => {
                crate::error!("Cannot read {}: {}", display_name(path), e);
                summary.total_files += 1;
                summary.failed += 1;
            }
        }
    }

    summary
}

pub fn compress_files(
    image_files: &[PathBuf],
    gallery_dir: &Path,
    output_dir: Option<&Path>,
    options: &CompressionOptions,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let progress = create_progress_bar(image_files.len() as u64);

    for path in image_files {
        let output = output_dir.map(|dir| mirror_output_path(path, gallery_dir, dir));
        progress.set_message(display_name(path));

        let outcome = process_file(path, output.as_deref(), options);
        progress.suspend(|| print_outcome(&outcome));
        summary.record(&outcome);
        progress.inc(1);
    }

    progress.finish_and_clear();
    summary
}

/// Compresses one file and folds any error into a `FileOutcome::Failed`.
pub fn process_file(
    path: &Path,
    output: Option<&Path>,
    options: &CompressionOptions,
) -> FileOutcome {
    let original_size = fs::metadata(path).ok().map(|m| m.len());
    match compress_file(path, output, options) {
        Ok(report) => FileOutcome::Succeeded(report),
        Err(error) => FileOutcome::Failed {
            path: path.to_path_buf(),
            original_size,
            error,
        },
    }
}

fn create_progress_bar(len: u64) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    let progress = ProgressBar::new(len);
    progress.set_style(style);
    progress
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_header(config: &RunConfig, file_count: usize) {
    crate::info!(
        "{} Found {} image files in {}",
        FOLDER_PREFIX,
        file_count,
        config.gallery_dir.display()
    );
    crate::info!(
        "{} Settings: quality={}, max size={}",
        SETTINGS_PREFIX,
        config.options.quality,
        format_file_size(config.options.max_size_bytes)
    );
    crate::info!("📐 Keeping original dimensions, only reducing file size");
    if let Some(output_dir) = &config.output_dir {
        crate::info!("📁 Writing results to {}", output_dir.display());
    }
    if config.dry_run {
        crate::info!("🔍 Dry run - no files will be modified");
    }
    crate::separator!();
}

pub fn print_outcome(outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Succeeded(report) if report.action == CompressionAction::Skipped => {
            crate::info!(
                "{} {} is already small enough, skipped compression",
                SKIP_PREFIX,
                display_name(&report.input)
            );
        }
        FileOutcome::Succeeded(report) => {
            crate::info!("{} {}", SUCCESS_PREFIX, display_name(&report.input));
            crate::info!(
                "   Dimensions: {}x{} (unchanged)",
                report.dimensions.0,
                report.dimensions.1
            );
            crate::info!(
                "   File size: {:.1} KB → {:.1} KB",
                bytes_to_kib(report.original_size),
                bytes_to_kib(report.compressed_size)
            );
            crate::info!("   Compression: {:.1}%", report.compression_ratio());
            if let Some(quality) = report.quality {
                crate::info!("   Quality: {}", quality);
            }
            if report.output != report.input {
                crate::info!("   Saved to: {}", report.output.display());
            }
            crate::info!();
        }
        FileOutcome::Failed { path, error, .. } => {
            crate::error!("Failed to process {}: {}", display_name(path), error);
        }
    }
}

pub fn print_summary(summary: &RunSummary) {
    crate::separator!();
    if summary.dry_run {
        crate::info!(
            "{} Preview complete: found {} image files ({} need compression)",
            SUMMARY_PREFIX,
            summary.total_files,
            summary.needs_compression
        );
        crate::info!(
            "{} Total size: {:.1} MB",
            SIZE_PREFIX,
            bytes_to_mib(summary.total_original_bytes)
        );
        return;
    }

    crate::info!(
        "{} Compression complete: {}/{} files processed successfully \
         ({} already small enough, {} failed)",
        SUMMARY_PREFIX,
        summary.succeeded,
        summary.total_files,
        summary.skipped,
        summary.failed
    );
    crate::info!(
        "{} Total original size: {:.1} MB",
        SIZE_PREFIX,
        bytes_to_mib(summary.total_original_bytes)
    );
    crate::info!(
        "{} Total compressed size: {:.1} MB",
        SIZE_PREFIX,
        bytes_to_mib(summary.total_compressed_bytes)
    );
    if summary.succeeded_original_bytes > 0 {
        crate::info!(
            "{} Overall compression: {:.1}% across successful files",
            RATIO_PREFIX,
            summary.compression_ratio()
        );
    }
}
