use crate::config::{DEFAULT_DELAY, SiteConfig};
use crate::manifest::read_manifest;
use chrono::{DateTime, Local};
use csv::{Writer, WriterBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tombstone_scanner::{
    CompiledSelectors, Fetcher, REVIEW_HEADER, Result, ReviewRecord, SelectorTable,
    extract_review,
};
use tracing::info;

/// Options for configuring an extract run
#[derive(Debug)]
pub struct ExtractOptions {
    pub site: SiteConfig,
    pub manifest_path: PathBuf,
    pub data_path: PathBuf,
    pub selectors: SelectorTable,
    pub delay: Duration,
    pub show_progress_bars: bool,
}

impl ExtractOptions {
    pub fn new(manifest_path: impl Into<PathBuf>, data_path: impl Into<PathBuf>) -> Self {
        Self {
            site: SiteConfig::default(),
            manifest_path: manifest_path.into(),
            data_path: data_path.into(),
            selectors: SelectorTable::default(),
            delay: DEFAULT_DELAY,
            show_progress_bars: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractSummary {
    pub urls_in_manifest: usize,
    pub reviews_written: usize,
    pub data_path: PathBuf,
    pub started_at: DateTime<Local>,
}

/// Callback for reporting extract progress
pub type ExtractProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Append-only CSV sink for review rows.
pub struct ReviewWriter {
    writer: Writer<File>,
}

impl ReviewWriter {
    /// Truncate `path` and write the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(File::create(path)?);
        writer.write_record(REVIEW_HEADER)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Write one row and flush it so it survives an aborted run.
    pub fn append(&mut self, record: &ReviewRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Visit every manifest URL in order and write one data row per review.
///
/// Any fetch, status or required-field failure stops the run immediately;
/// rows written before it stay in the data file.
pub async fn execute_extract(
    options: ExtractOptions,
    progress_callback: Option<ExtractProgressCallback>,
) -> Result<ExtractSummary> {
    let ExtractOptions {
        site,
        manifest_path,
        data_path,
        selectors,
        delay,
        show_progress_bars,
    } = options;

    let started_at = Local::now();
    let links = read_manifest(&manifest_path)?;
    let compiled = selectors.compile()?;
    let fetcher = Fetcher::new()?;
    let mut writer = ReviewWriter::create(&data_path)?;

    info!(
        "Starting review extraction: {} urls from {}",
        links.len(),
        manifest_path.display()
    );

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new(links.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(pb)
    } else {
        None
    };

    let mut reviews_written = 0usize;
    for (index, link) in links.iter().enumerate() {
        let outcome = extract_one(&fetcher, &site, &compiled, index, link).await;
        let record = match outcome {
            Ok(record) => record,
            Err(e) => {
                if let Some(ref pb) = progress_bar {
                    pb.abandon_with_message(format!("Failed on review {}: {}", index, link));
                }
                return Err(e);
            }
        };

        writer.append(&record)?;
        reviews_written += 1;

        if let Some(ref pb) = progress_bar {
            pb.set_message(link.clone());
            pb.inc(1);
        }
        if let Some(ref callback) = progress_callback {
            callback(format!("Review {}: {}", index, link));
        }

        tokio::time::sleep(delay).await;
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("Extraction complete! {} reviews", reviews_written));
    }
    info!("finished review extraction: {} rows", reviews_written);

    Ok(ExtractSummary {
        urls_in_manifest: links.len(),
        reviews_written,
        data_path,
        started_at,
    })
}

async fn extract_one(
    fetcher: &Fetcher,
    site: &SiteConfig,
    selectors: &CompiledSelectors,
    index: usize,
    link: &str,
) -> Result<ReviewRecord> {
    info!("On review {}: {}", index, link);
    let url = site.resolve(link)?;
    let page = fetcher.get_ok(&url).await?;
    extract_review(&page.body.unwrap_or_default(), index, selectors, &url)
}
