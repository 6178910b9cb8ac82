use anyhow::{Context, Result};
use clap::Parser;
use gallery_squeeze::batch::run_gallery;
use gallery_squeeze::cli::Args;
use gallery_squeeze::logger::{set_verbosity, Verbosity};

fn main() -> Result<()> {
    let args = Args::parse();
    set_verbosity(Verbosity::from_flags(args.quiet, args.verbose));

    let config = args.to_run_config()?;
    run_gallery(&config)
        .with_context(|| format!("Failed to squeeze gallery {}", config.gallery_dir.display()))?;

    Ok(())
}
