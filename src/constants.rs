pub const DEFAULT_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_GALLERY_DIR: &str = "images/gallery";
pub const DEFAULT_MAX_SIZE_MIB: f64 = 2.0;
pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Fallback JPEG qualities probed after the requested one, in order.
/// The last entry is the floor: the probe loop always stops there.
pub const QUALITY_LADDER_TAIL: [u8; QUALITY_LADDER_LEN - 1] = [75, 65, 55, 45, 35];
pub const QUALITY_LADDER_LEN: usize = 6;
pub const LADDER_FLOOR_QUALITY: u8 = QUALITY_LADDER_TAIL[QUALITY_LADDER_TAIL.len() - 1];

/// Lowercased file-name suffixes picked up by the finder.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 6] =
    [".jpg", ".jpeg", ".png", ".webp", ".bmp", ".tiff"];

pub const PNG_OPTIMIZATION_PRESET: u8 = 4;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;

pub const TEMP_FILE_SUFFIX: &str = ".temp";
pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";
pub const SEPARATOR_WIDTH: usize = 60;

// Common output message prefixes
pub const SUCCESS_PREFIX: &str = "✅";
pub const SKIP_PREFIX: &str = "⏭️ ";
pub const PREVIEW_PREFIX: &str = "📋";
pub const FOLDER_PREFIX: &str = "📂";
pub const SETTINGS_PREFIX: &str = "⚙️ ";
pub const SUMMARY_PREFIX: &str = "📊";
pub const SIZE_PREFIX: &str = "📦";
pub const RATIO_PREFIX: &str = "📈";
