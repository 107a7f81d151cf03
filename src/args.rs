use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "save-page")]
#[command(about = "Save a single web page and its resources to a local directory")]
#[command(version)]
pub struct Args {
    /// URL of the page to save
    pub url: String,

    /// Time budget in seconds for resource downloads
    #[arg(default_value_t = 4)]
    pub time_limit: u64,

    /// Directory the snapshot directory is created under
    #[arg(short, long, default_value = ".")]
    pub output_root: PathBuf,
}
