//! Local Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where the cart and preferences are kept between runs.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the persisted cart and preferences
    #[arg(long, env = "IHRAM_DATA_DIR", default_value = ".ihram")]
    pub data_dir: PathBuf,
}
