use url::Url;

use crate::config::SnapshotConfig;
use crate::error::SnapshotError;
use crate::fetcher::{Fetcher, TimeBudget};
use crate::parsers::{ResourceRef, html};
use crate::resources::ResourceRules;
use crate::results::{SavedResource, SnapshotReport};
use crate::rewriter;
use crate::storage::{OutputDir, filename_for};

/// Runs the whole snapshot pipeline for the configured URL.
///
/// Strictly sequential: fetch the page, parse it, download each referenced
/// resource under the time budget, rewrite the references, and write the
/// result to disk. A failed page fetch is fatal and nothing is written;
/// failed resource downloads are skipped and reported.
pub async fn run(config: &SnapshotConfig) -> Result<SnapshotReport, SnapshotError> {
    let base = Url::parse(&config.start_url).map_err(|e| SnapshotError::InvalidUrl {
        url: config.start_url.clone(),
        source: e,
    })?;

    // The budget covers the whole run, downloads included
    let budget = TimeBudget::new(config.time_limit());
    let fetcher = Fetcher::new(config)?;

    // Fatal on failure: no output directory exists yet
    let page = fetcher.fetch_page(&base).await?;

    match page.content_type.as_deref() {
        Some(content_type) if !content_type.contains("html") => {
            ::log::warn!("Page served with non-HTML content type: {}", content_type);
        }
        Some(content_type) => ::log::debug!("Page content type: {}", content_type),
        None => {}
    }

    let page_text = String::from_utf8_lossy(&page.bytes).into_owned();
    let mut document = html::parse(&page_text);

    let title = html::extract_title(&document)
        .or_else(|| base.host_str().map(|host| host.to_string()))
        .unwrap_or_else(|| "untitled".to_string());
    ::log::info!("Page title: {}", title);

    let output = OutputDir::create(&config.output_root, &title)?;

    // The raw page is written first; the rewritten version replaces it
    // once downloads finish.
    output.write_index(&page.bytes)?;

    let rules = ResourceRules::new()?;
    let references = html::discover_references(&document, &rules, &base);
    ::log::info!("Found {} resource references", references.len());

    let outcome = download_references(&fetcher, &budget, &output, &references).await;

    let rewritten =
        rewriter::rewrite_references(&mut document, &rules, &base, &outcome.replacements);
    output.write_index(rewritten.as_bytes())?;

    ::log::info!(
        "Snapshot complete: {} saved, {} failed, {} skipped",
        outcome.saved.len(),
        outcome.failed.len(),
        outcome.skipped.len()
    );

    Ok(SnapshotReport {
        url: base.to_string(),
        title,
        output_dir: output.path().to_path_buf(),
        saved: outcome.saved,
        failed: outcome.failed,
        skipped: outcome.skipped,
    })
}

/// What the download loop produced: one replacement value per discovered
/// reference, in discovery order, plus the per-resource outcomes for the
/// report
struct DownloadOutcome {
    replacements: Vec<String>,
    saved: Vec<SavedResource>,
    failed: Vec<String>,
    skipped: Vec<String>,
}

/// Downloads each reference in turn, checking the budget before every
/// request.
///
/// Each reference yields exactly one replacement: its local relative path
/// on success, or its resolved absolute URL when the download failed or the
/// budget ran out, so the saved page degrades to remote resources rather
/// than broken relative ones. Duplicate references are downloaded again
/// each time they appear; there is no deduplication.
async fn download_references(
    fetcher: &Fetcher,
    budget: &TimeBudget,
    output: &OutputDir,
    references: &[ResourceRef],
) -> DownloadOutcome {
    let mut outcome = DownloadOutcome {
        replacements: Vec::with_capacity(references.len()),
        saved: Vec::new(),
        failed: Vec::new(),
        skipped: Vec::new(),
    };
    let mut budget_reported = false;

    for reference in references {
        let remote = reference.resolved.to_string();

        if budget.exhausted() {
            if !budget_reported {
                ::log::warn!("Time limit exceeded, skipping remaining resource downloads");
                budget_reported = true;
            }
            outcome.replacements.push(remote.clone());
            outcome.skipped.push(remote);
            continue;
        }

        match fetcher.fetch_resource(&reference.resolved, budget).await {
            Ok(bytes) => {
                let filename = filename_for(&reference.resolved);
                match output.write_resource(reference.kind.subdir(), &filename, &bytes) {
                    Ok(local_path) => {
                        ::log::debug!("Saved {} as {}", remote, local_path);
                        outcome.replacements.push(local_path.clone());
                        outcome.saved.push(SavedResource {
                            remote_url: remote,
                            local_path,
                            kind: reference.kind,
                        });
                    }
                    Err(e) => {
                        ::log::warn!("Failed to save {}: {}", remote, e);
                        outcome.replacements.push(remote.clone());
                        outcome.failed.push(remote);
                    }
                }
            }
            Err(e) => {
                ::log::warn!("Failed to download {}: {}", remote, e);
                outcome.replacements.push(remote.clone());
                outcome.failed.push(remote);
            }
        }
    }

    outcome
}
