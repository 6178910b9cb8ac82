pub mod logger;

pub mod artifact;
pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod finder;
pub mod formats;
pub mod processing;
pub mod utils;

pub use artifact::ImageArtifact;
pub use batch::{run_gallery, FileOutcome, PreviewStatus, RunConfig, RunSummary};
pub use error::{CompressionError, Result};
pub use finder::{find_images, is_image_file};
pub use formats::OutputFormat;
pub use processing::{
    compress_file, quality_ladder, CompressionAction, CompressionOptions, CompressionReport,
    QualityProbe,
};
