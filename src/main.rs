use clap::Parser;
use newsclip::{Pipeline, SearchConfig, SearchQuery};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match SearchConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SearchConfig::default(),
    };

    println!("Note: searching requires a WebDriver server (e.g. ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL or --webdriver-url if not using the default {}",
        config.webdriver_url
    );

    let query = SearchQuery::new(&args.phrase, args.section, args.months, &config.site_url);
    ::log::info!(
        "Searching '{}' in section '{}' between {} and {}",
        query.phrase,
        query.section.label(),
        query.start_date,
        query.end_date
    );

    let mut pipeline = Pipeline::new(query).with_config(config);
    if let Some(url) = &args.webdriver_url {
        pipeline = pipeline.with_webdriver_url(url);
    }

    let start_time = std::time::Instant::now();
    match pipeline.run().await {
        Ok(summary) => {
            ::log::info!(
                "Wrote {} records ({} images) to {} in {:.2} seconds",
                summary.records_written,
                summary.images_saved,
                summary.output_path.display(),
                start_time.elapsed().as_secs_f64()
            );
        }
        Err(e) => {
            ::log::error!("Run failed: {}", e);
            std::process::exit(1);
        }
    }
}
