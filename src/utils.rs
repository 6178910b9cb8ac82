/// Size and ratio helpers shared by the per-file report and the run summary.
use crate::constants::BYTES_PER_MIB;

/// Format file size in human-readable format
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 KB")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Compression ratio as a percentage: `(1 - compressed / original) * 100`.
///
/// Positive means the file shrank, negative means it grew. An empty original
/// yields `0.0`.
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

pub fn bytes_to_kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MIB
}

/// Convert a MiB budget into whole bytes, rounding down so that
/// `size <= budget` matches a comparison against the fractional value.
pub fn mib_to_bytes(mib: f64) -> u64 {
    (mib * BYTES_PER_MIB).floor() as u64
}
