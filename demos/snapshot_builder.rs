use clap::Parser;
use save_page::{Snapshot, SnapshotError};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the page to save
    #[arg(short, long)]
    url: String,

    /// JSON configuration string
    #[arg(short, long)]
    config: Option<String>,

    /// Path to JSON configuration file
    #[arg(long)]
    config_file: Option<String>,

    /// Time budget in seconds
    #[arg(short, long)]
    time_limit: Option<u64>,

    /// Output root directory
    #[arg(short, long)]
    output_root: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), SnapshotError> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    println!("Saving page: {}", args.url);

    let mut builder = Snapshot::new(&args.url);

    // Apply configuration from file if specified
    if let Some(config_file) = args.config_file {
        println!("Loading configuration from file: {}", config_file);
        builder = builder.with_config_file(config_file)?;
    }

    // Apply configuration from string if specified (overrides file config)
    if let Some(config_str) = args.config {
        println!("Applying configuration from string");
        builder = builder.with_config_str(&config_str)?;
    }

    // Apply command-line overrides
    if let Some(time_limit) = args.time_limit {
        builder = builder.with_time_limit(time_limit);
    }
    if let Some(output_root) = args.output_root {
        builder = builder.with_output_root(output_root);
    }

    let report = builder.run().await?;

    println!(
        "Saved \"{}\" with {} resources to {}",
        report.title,
        report.saved.len(),
        report.output_dir.display()
    );
    for resource in &report.saved {
        println!("  {} -> {}", resource.remote_url, resource.local_path);
    }

    Ok(())
}
