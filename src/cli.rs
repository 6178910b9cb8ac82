use crate::batch::RunConfig;
use crate::constants::{DEFAULT_GALLERY_DIR, DEFAULT_MAX_SIZE_MIB, DEFAULT_QUALITY};
use crate::error::Result;
use crate::processing::CompressionOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gallery-squeeze",
    about = "Compress every image in a gallery folder in place, keeping the original dimensions",
    long_about = "gallery-squeeze walks a gallery directory and rewrites every JPEG, PNG, \
                  WebP, BMP and TIFF file that is larger than the size budget. JPEG-bound \
                  files step down a fixed quality ladder (requested, 75, 65, 55, 45, 35) \
                  until they fit; PNG files are re-saved losslessly with oxipng. Pixel \
                  dimensions never change. Transparency is flattened onto white.",
    version,
    after_help = "EXAMPLES:\n  \
    gallery-squeeze\n  \
    gallery-squeeze --gallery-dir ./photos --quality 80 --max-size 1.5\n  \
    gallery-squeeze --dry-run\n  \
    gallery-squeeze --gallery-dir ./photos -o ./photos-small"
)]
pub struct Args {
    #[arg(
        long,
        default_value = DEFAULT_GALLERY_DIR,
        help = "Gallery directory to scan (default: images/gallery)",
        long_help = "Root directory scanned recursively for .jpg, .jpeg, .png, .webp, .bmp \
                     and .tiff files."
    )]
    pub gallery_dir: PathBuf,

    #[arg(
        short = 'q',
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100),
        help = "JPEG quality to try first, 1-100 (default: 85)",
        long_help = "First JPEG quality probed for non-PNG files. If the result is still over the \
                     size budget, 75, 65, 55, 45 and 35 are tried in that order."
    )]
    pub quality: u8,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_SIZE_MIB,
        help = "Target maximum file size in MB (default: 2.0)",
        long_help = "Files at or below this size (in MiB) are left untouched."
    )]
    pub max_size: f64,

    #[arg(long, help = "Preview mode: list files without modifying anything")]
    pub dry_run: bool,

    #[arg(
        short = 'o',
        long,
        help = "Write results here instead of overwriting the originals",
        long_help = "Write compressed files under this directory, mirroring their path relative to \
                     the gallery directory. Originals are left untouched."
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print every quality probe")]
    pub verbose: bool,
}

impl Args {
    pub fn to_run_config(&self) -> Result<RunConfig> {
        let options = CompressionOptions::new(Some(self.quality), Some(self.max_size))?;
        Ok(RunConfig {
            gallery_dir: self.gallery_dir.clone(),
            output_dir: self.output_dir.clone(),
            options,
            dry_run: self.dry_run,
        })
    }
}
