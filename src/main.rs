use clap::Parser;
use save_page::Snapshot;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Saving page: {}", args.url);
    let start_time = std::time::Instant::now();

    // Build and run the snapshot pipeline
    let snapshot = Snapshot::new(&args.url)
        .with_time_limit(args.time_limit)
        .with_output_root(&args.output_root);

    let report = match snapshot.run().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Failed to save page: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let duration = start_time.elapsed();
    println!("Saved \"{}\" to {}", report.title, report.output_dir.display());
    println!(
        "{} of {} resources downloaded in {:.2} seconds ({} failed, {} skipped)",
        report.saved.len(),
        report.total_references(),
        duration.as_secs_f64(),
        report.failed.len(),
        report.skipped.len()
    );
}
