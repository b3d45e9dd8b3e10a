// Re-export modules
pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod images;
pub mod metrics;
pub mod query;
pub mod records;

// Re-export commonly used types for convenience
pub use config::SearchConfig;
pub use error::Error;
pub use query::{SearchQuery, Section};
pub use records::ArticleRecord;

use fantoccini::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What a finished run produced
#[derive(Debug)]
pub struct RunSummary {
    pub records_written: usize,
    pub images_saved: usize,
    pub output_path: PathBuf,
}

/// Builder for one search run against one WebDriver session.
///
/// The run is a strictly sequential pipeline over a single page handle:
/// open the site, drive the search box and filters, drain the "show
/// more" control, extract every result, write the CSV.
pub struct Pipeline {
    query: SearchQuery,
    config: SearchConfig,
    webdriver_override: Option<String>,
}

impl Pipeline {
    /// Create a new pipeline for the given query with default
    /// configuration
    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            config: SearchConfig::default(),
            webdriver_override: None,
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(
        mut self,
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        self.config = SearchConfig::from_file(path)?;
        Ok(self)
    }

    /// Override the WebDriver URL, taking precedence over both the
    /// configuration and the WEBDRIVER_URL environment variable
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.webdriver_override = Some(url.to_string());
        self
    }

    /// Run the pipeline to completion and write the output CSV.
    ///
    /// The WebDriver session is acquired once here and closed on the way
    /// out whether the stages succeeded or not.
    pub async fn run(self) -> Result<RunSummary, Error> {
        let Self {
            query,
            config,
            webdriver_override,
        } = self;

        let webdriver_url = webdriver_override
            .or_else(|| std::env::var("WEBDRIVER_URL").ok().filter(|u| !u.is_empty()))
            .unwrap_or_else(|| config.webdriver_url.clone());

        let client = browser::session::connect(&webdriver_url).await?;
        let outcome = run_stages(&client, &query, &config).await;

        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close the WebDriver session: {}", e);
        }
        outcome
    }
}

async fn run_stages(
    client: &Client,
    query: &SearchQuery,
    config: &SearchConfig,
) -> Result<RunSummary, Error> {
    let wait_timeout = Duration::from_millis(config.wait_timeout_ms);
    let settle_timeout = Duration::from_millis(config.settle_timeout_ms);

    browser::navigator::open(
        client,
        &query.site_url,
        config.retry_count,
        Duration::from_secs(config.backoff_base_secs),
        wait_timeout,
    )
    .await?;

    ::log::info!("Searching for the keyword '{}'", query.phrase);
    browser::search::initiate(client, query, wait_timeout).await?;
    browser::search::select_section(client, query.section, wait_timeout).await?;
    browser::dates::apply_range(client, &query.start_date, &query.end_date, wait_timeout).await?;

    let mut control =
        browser::pagination::PageExpandControl::new(client, browser::pagination::SHOW_MORE);
    let expanded =
        browser::pagination::drain(&mut control, settle_timeout, config.max_expansions).await;
    if !expanded {
        ::log::info!("Result list fit on a single page");
    }

    let mut images = images::ImageStore::new(config.image_dir.as_str());
    let records = extract::extract_all(client, query, &mut images).await?;

    let output_path = records::default_csv_path(Path::new(&config.output_dir), &query.phrase);
    records::write_records(&records, &output_path)?;

    Ok(RunSummary {
        records_written: records.len(),
        images_saved: images.saved(),
        output_path,
    })
}
